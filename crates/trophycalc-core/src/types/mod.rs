//! TrophyCalc API types.
//!
//! `ApiUrl` validates at construction time; the response shapes mirror the
//! JSON bodies returned by the backend.

mod api_url;
mod catalog;
mod user;

pub use api_url::ApiUrl;
pub use catalog::{
    Achievement, GameSearchResult, LatestAchievement, NearlyCompletedGame, PublicUserProfile,
    SteamGame, UserSearchResult,
};
pub use user::{User, parse_timestamp};
