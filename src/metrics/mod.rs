use crate::api::PlayerSnapshotRow;
use std::collections::HashMap;

/// A cell value in a metrics column.
///
/// The sentinel states stay out of the numeric domain so formatting and
/// comparisons never have to guess what a magic number means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricValue {
  Number(i64),
  /// No row ranks above this one.
  None,
  /// No reference player was available for comparison.
  Unavailable,
}

/// One leaderboard row with every derived metric filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
  pub user_id: i64,
  pub player_name: String,
  pub points: i64,
  pub previous_points: i64,
  /// 1-based by points descending. Strictly sequential: ties are NOT
  /// collapsed, every row gets a distinct rank.
  pub rank: usize,
  pub speed: i64,
  /// 1-based by speed descending, competition ranked: tied speeds share the
  /// rank of the first row in the run.
  pub speed_rank: usize,
  pub point_diff: MetricValue,
  pub diff_with_reference: MetricValue,
}

/// Derives ranked, delta-annotated rows from the current poll and the prior
/// snapshot.
///
/// Output keeps the input order; display sorting is the assembler's job.
pub fn calculate_rankings(
  current: Vec<PlayerSnapshotRow>,
  previous: &HashMap<i64, i64>,
  reference_user_id: Option<i64>,
) -> Vec<RankedEntry> {
  let mut entries: Vec<RankedEntry> = current
    .into_iter()
    .map(|row| {
      let previous_points = previous.get(&row.user_id).copied().unwrap_or(0);
      // Known quirk: a stored score of exactly 0 is indistinguishable from
      // "no stored row", and both produce a speed of 0.
      let speed = if previous_points > 0 {
        row.points - previous_points
      } else {
        0
      };

      RankedEntry {
        user_id: row.user_id,
        player_name: row.player_name,
        points: row.points,
        previous_points,
        rank: 0,
        speed,
        speed_rank: 0,
        point_diff: MetricValue::None,
        diff_with_reference: MetricValue::Unavailable,
      }
    })
    .collect();

  // Each pass works on its own index ordering. The entry list itself is
  // never re-sorted, so no pass can disturb another's order.
  let points_order = sorted_indices_by(&entries, |entry| entry.points);
  let speed_order = sorted_indices_by(&entries, |entry| entry.speed);

  for (position, &entry_index) in points_order.iter().enumerate() {
    entries[entry_index].rank = position + 1;
  }

  let mut shared_rank = 1;
  let mut previous_speed = None;

  for (position, &entry_index) in speed_order.iter().enumerate() {
    let speed = entries[entry_index].speed;

    if previous_speed != Some(speed) {
      shared_rank = position + 1;
    }

    entries[entry_index].speed_rank = shared_rank;
    previous_speed = Some(speed);
  }

  for (position, &entry_index) in points_order.iter().enumerate() {
    entries[entry_index].point_diff = if position == 0 {
      MetricValue::None
    } else {
      let next_higher_points = entries[points_order[position - 1]].points;

      MetricValue::Number(next_higher_points - entries[entry_index].points)
    };
  }

  let reference_points = reference_user_id.and_then(|reference_id| {
    entries
      .iter()
      .find(|entry| entry.user_id == reference_id)
      .map(|entry| entry.points)
  });

  for entry in entries.iter_mut() {
    entry.diff_with_reference = match reference_points {
      Some(reference_points) => MetricValue::Number(entry.points - reference_points),
      None => MetricValue::Unavailable,
    };
  }

  entries
}

/// Indices of `entries` sorted descending by the key. The sort is stable, so
/// tied keys keep their input order.
fn sorted_indices_by<K: Ord>(
  entries: &[RankedEntry],
  key: impl Fn(&RankedEntry) -> K,
) -> Vec<usize> {
  let mut indices: Vec<usize> = (0..entries.len()).collect();

  indices.sort_by_key(|&entry_index| std::cmp::Reverse(key(&entries[entry_index])));

  indices
}
