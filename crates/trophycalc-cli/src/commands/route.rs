//! Route command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use trophycalc_core::routes::BASE_TITLE;
use trophycalc_core::{Route, document_title};

use crate::output;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Path of the web client, e.g. /games/440/achievements
    pub path: String,

    /// Tab title currently shown, to check whether it is kept
    #[arg(long, default_value = BASE_TITLE)]
    pub current_title: String,

    /// Print the route as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RouteArgs) -> Result<()> {
    let path = args.path.split(['?', '#']).next().unwrap_or_default();
    let route = Route::resolve(path);
    let title = document_title(&route, &args.current_title);

    if args.json {
        return output::json_pretty(&json!({
            "name": route.name(),
            "path": route.path(),
            "title": title,
        }));
    }

    output::field("Route", route.name());
    if let Some(path) = route.path() {
        output::field("Path", &path);
    }
    output::field("Title", &title);

    Ok(())
}
