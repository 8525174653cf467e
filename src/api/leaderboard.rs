use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

const UNKNOWN_PLAYER_NAME: &str = "Unknown";

lazy_static! {
  static ref NAME_DECORATION_REGEX: Regex = Regex::new(r"\[.*?\]").unwrap();
}

/// Raw leaderboard response: user records and point records are separate
/// arrays joined on `uid`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LeaderboardResponse {
  pub users: Vec<LeaderboardUser>,
  pub points: Vec<LeaderboardPoints>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LeaderboardUser {
  pub uid: i64,
  pub name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LeaderboardPoints {
  pub uid: i64,
  pub value: i64,
}

/// One player's state at one poll, ready for the metrics engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshotRow {
  pub user_id: i64,
  pub player_name: String,
  pub points: i64,
}

impl LeaderboardResponse {
  /// Joins the point records with their user records. Point records with no
  /// matching user record get a placeholder name.
  pub fn into_snapshot_rows(self) -> Vec<PlayerSnapshotRow> {
    let user_names: HashMap<i64, String> = self
      .users
      .into_iter()
      .map(|user| (user.uid, strip_name_decorations(&user.name)))
      .collect();

    self
      .points
      .into_iter()
      .map(|record| PlayerSnapshotRow {
        user_id: record.uid,
        player_name: user_names
          .get(&record.uid)
          .cloned()
          .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string()),
        points: record.value,
      })
      .collect()
  }
}

/// Player names carry bracketed title decorations like `[Rainbow]name`.
pub fn strip_name_decorations(player_name: &str) -> String {
  NAME_DECORATION_REGEX
    .replace_all(player_name, "")
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn strip_name_decorations_removes_every_bracketed_segment() {
    assert_eq!(strip_name_decorations("[Rainbow]kasumi"), "kasumi");
    assert_eq!(strip_name_decorations("[a][b] arisa "), "arisa");
    assert_eq!(strip_name_decorations("plain"), "plain");
  }

  #[test]
  fn into_snapshot_rows_joins_points_with_stripped_user_names() {
    let response: LeaderboardResponse = serde_json::from_value(json!({
      "users": [
        { "uid": 1, "name": "[Rainbow]kasumi" },
        { "uid": 2, "name": "arisa" }
      ],
      "points": [
        { "uid": 1, "value": 1500 },
        { "uid": 2, "value": 500 }
      ]
    }))
    .unwrap();

    let rows = response.into_snapshot_rows();

    assert_eq!(
      rows,
      vec![
        PlayerSnapshotRow {
          user_id: 1,
          player_name: "kasumi".to_string(),
          points: 1500,
        },
        PlayerSnapshotRow {
          user_id: 2,
          player_name: "arisa".to_string(),
          points: 500,
        },
      ]
    );
  }

  #[test]
  fn into_snapshot_rows_uses_a_placeholder_for_unmatched_uids() {
    let response: LeaderboardResponse = serde_json::from_value(json!({
      "users": [],
      "points": [{ "uid": 7, "value": 100 }]
    }))
    .unwrap();

    let rows = response.into_snapshot_rows();

    assert_eq!(rows[0].player_name, "Unknown");
  }
}
