//! Game library, achievement and search response shapes.

use serde::{Deserialize, Serialize};

/// A game in the user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteamGame {
    pub app_id: u32,
    pub name: String,
    pub playtime_hours: f64,
    pub icon_url: Option<String>,
}

/// An achievement definition together with the player's status for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub api_name: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub icon_gray: String,
    pub hidden: bool,
    pub achieved: bool,
    /// Unix timestamp of the unlock, if unlocked.
    pub unlock_time: Option<i64>,
    /// Global unlock percentage (rarity).
    pub percent: Option<f64>,
}

/// A recently unlocked achievement with the game it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestAchievement {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub app_id: u32,
    pub game_name: String,
}

/// A game the user has almost fully completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearlyCompletedGame {
    pub app_id: u32,
    pub name: String,
    pub percentage: f64,
    pub unlocked: u32,
    pub total: u32,
    pub icon_url: Option<String>,
}

/// A match from the global game search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSearchResult {
    /// The store calls this `appid`, unlike the library endpoints.
    pub appid: u32,
    pub name: String,
    pub header_image: String,
}

/// A match from the public user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchResult {
    pub id: u64,
    pub name: String,
    pub avatar: String,
    pub steam_id_64: String,
}

/// A user's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUserProfile {
    pub id: u64,
    pub name: String,
    pub avatar: String,
    pub steam_id_64: String,
    /// Sign-up date on TrophyCalc, as sent by the backend.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn latest_achievement_flattens_achievement_fields() {
        let latest: LatestAchievement = serde_json::from_value(json!({
            "api_name": "ACH_WIN_ONE_GAME",
            "name": "Winner",
            "description": null,
            "icon": "https://cdn.example.com/a.jpg",
            "icon_gray": "https://cdn.example.com/a_gray.jpg",
            "hidden": false,
            "achieved": true,
            "unlock_time": 1714564800,
            "percent": 12.5,
            "app_id": 440,
            "game_name": "Team Fortress 2"
        }))
        .unwrap();

        assert_eq!(latest.app_id, 440);
        assert_eq!(latest.achievement.api_name, "ACH_WIN_ONE_GAME");
        assert!(latest.achievement.description.is_none());
        assert_eq!(latest.achievement.unlock_time, Some(1714564800));
    }

    #[test]
    fn library_game_without_icon() {
        let game: SteamGame = serde_json::from_value(json!({
            "app_id": 620,
            "name": "Portal 2",
            "playtime_hours": 31.4,
            "icon_url": null
        }))
        .unwrap();

        assert_eq!(game.app_id, 620);
        assert!(game.icon_url.is_none());
    }

    #[test]
    fn game_search_uses_store_field_name() {
        let result: GameSearchResult = serde_json::from_value(json!({
            "appid": 570,
            "name": "Dota 2",
            "header_image": "https://cdn.example.com/570/header.jpg"
        }))
        .unwrap();
        assert_eq!(result.appid, 570);

        assert!(
            serde_json::from_value::<GameSearchResult>(json!({
                "app_id": 570,
                "name": "Dota 2",
                "header_image": "x"
            }))
            .is_err()
        );
    }

    #[test]
    fn public_profile_signup_date() {
        let profile: PublicUserProfile = serde_json::from_value(json!({
            "id": 7,
            "name": "Alyx",
            "avatar": "https://avatars.example.com/alyx.jpg",
            "steam_id_64": "76561197960287931",
            "created_at": "2023-11-02T09:15:00.000000Z"
        }))
        .unwrap();
        assert_eq!(profile.created_at, "2023-11-02T09:15:00.000000Z");
        assert!(crate::types::parse_timestamp(&profile.created_at).is_some());
    }
}
