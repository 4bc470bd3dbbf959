//! Application route table.
//!
//! Maps URL paths of the web client onto named routes, and computes the
//! browser tab title shown for each one.

use std::fmt;

/// Application title, appended to every route title.
pub const BASE_TITLE: &str = "TrophyCalc";

/// A resolved application route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Landing page of the sign-in redirect; carries the issued token.
    AuthCallback,
    MyGames,
    Dashboard,
    /// `app_id` is the raw path segment; the view decides what it names.
    GameAchievements { app_id: String },
    SearchResults,
    UserProfile { steam_id_64: String },
    Legal,
    Leaderboard,
    NotFound,
}

impl Route {
    /// Resolve a URL path (without query or fragment) to a route.
    ///
    /// Matching ignores ASCII case of static segments and a trailing slash.
    /// Anything unmatched resolves to [`Route::NotFound`].
    pub fn resolve(path: &str) -> Route {
        fn is(segment: &str, expected: &str) -> bool {
            segment.eq_ignore_ascii_case(expected)
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            [a, b] if is(a, "auth") && is(b, "callback") => Route::AuthCallback,
            [a] if is(a, "my-games") => Route::MyGames,
            [a] if is(a, "dashboard") => Route::Dashboard,
            [a, id, b] if is(a, "games") && is(b, "achievements") => Route::GameAchievements {
                app_id: (*id).to_string(),
            },
            [a] if is(a, "search") => Route::SearchResults,
            [a, id] if is(a, "profile") => Route::UserProfile {
                steam_id_64: (*id).to_string(),
            },
            [a] if is(a, "legal") => Route::Legal,
            [a] if is(a, "leaderboard") => Route::Leaderboard,
            _ => Route::NotFound,
        }
    }

    /// Stable route name.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::AuthCallback => "auth-callback",
            Route::MyGames => "my-games",
            Route::Dashboard => "dashboard",
            Route::GameAchievements { .. } => "game-achievements",
            Route::SearchResults => "search-results",
            Route::UserProfile { .. } => "user-profile",
            Route::Legal => "legal",
            Route::Leaderboard => "leaderboard",
            Route::NotFound => "not-found",
        }
    }

    /// Static title of the route.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::AuthCallback => "Signing in...",
            Route::MyGames => "My Library",
            Route::Dashboard => "Dashboard",
            Route::GameAchievements { .. } => "Game Achievements",
            Route::SearchResults => "Search Results",
            Route::UserProfile { .. } => "User Profile",
            Route::Legal => "Legal Notice & Privacy",
            Route::Leaderboard => "Leaderboard",
            Route::NotFound => "404 - Page Not Found",
        }
    }

    /// Canonical path of the route. `None` for [`Route::NotFound`].
    pub fn path(&self) -> Option<String> {
        let path = match self {
            Route::Home => "/".to_string(),
            Route::AuthCallback => "/auth/callback".to_string(),
            Route::MyGames => "/my-games".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::GameAchievements { app_id } => format!("/games/{}/achievements", app_id),
            Route::SearchResults => "/search".to_string(),
            Route::UserProfile { steam_id_64 } => format!("/profile/{}", steam_id_64),
            Route::Legal => "/legal".to_string(),
            Route::Leaderboard => "/leaderboard".to_string(),
            Route::NotFound => return None,
        };
        Some(path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute the tab title after navigating to `route`.
///
/// `current` is the title already set. A title that a view set dynamically
/// (neither the base title nor ending in `- TrophyCalc`) is kept as is.
pub fn document_title(route: &Route, current: &str) -> String {
    let suffix = format!("- {}", BASE_TITLE);
    if current != BASE_TITLE && !current.ends_with(&suffix) {
        return current.to_string();
    }

    format!("{} - {}", route.title(), BASE_TITLE)
}
