use crate::events::EventProgress;
use crate::metrics::{MetricValue, RankedEntry};
use chrono::{DateTime, Local};

pub mod text_sink;

pub use text_sink::TextTableSink;

/// Rendered in place of a numeric cell when no row ranks above this one.
pub const NONE_GLYPH: &str = "—";
/// Rendered in place of a numeric cell when no reference comparison exists.
pub const UNAVAILABLE_GLYPH: &str = "N/A";
/// Shown in the reference column header when the guild has no reference set.
pub const REFERENCE_UNSET_PLACEHOLDER: &str = "not configured";
/// Shown in the title when the event's progress could not be computed.
pub const UNKNOWN_PROGRESS_PLACEHOLDER: &str = "unknown";

/// Cell highlight class for the speed column.
///
/// A speed of exactly 0 overrides the rank-based classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
  Gold,
  Silver,
  Bronze,
  ZeroSpeed,
  Default,
}

impl Highlight {
  pub fn for_entry(speed: i64, speed_rank: usize) -> Self {
    if speed == 0 {
      return Self::ZeroSpeed;
    }

    match speed_rank {
      1 => Self::Gold,
      2 => Self::Silver,
      3 => Self::Bronze,
      _ => Self::Default,
    }
  }

  pub fn fill_color(&self) -> &'static str {
    match self {
      Self::Gold => "#fff176",
      Self::Silver => "#e0e0e0",
      Self::Bronze => "#d7a86e",
      Self::ZeroSpeed => "#000000",
      Self::Default => "white",
    }
  }

  pub fn text_color(&self) -> &'static str {
    match self {
      Self::ZeroSpeed => "white",
      _ => "black",
    }
  }
}

/// One display row. All numeric cells are already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
  pub rank: usize,
  pub player_name: String,
  pub points: String,
  pub speed: String,
  pub speed_rank: usize,
  pub point_gap: String,
  pub reference_gap: String,
  pub highlight: Highlight,
}

/// Row-oriented table description handed to a [`RenderSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
  pub title: String,
  pub headers: Vec<String>,
  pub rows: Vec<TableRow>,
}

/// Consumes an assembled table. The image backend (plot, footer crop, chat
/// upload) lives behind this seam.
pub trait RenderSink {
  fn render(
    &self,
    table: &TableSpec,
  ) -> impl std::future::Future<Output = Result<(), crate::errors::AppError>> + Send;
}

/// Shapes ranked entries plus presentation metadata into a table description.
///
/// Rows come out ordered by points rank. The reference column header names
/// the reference player, or a placeholder when the guild has none set.
pub fn assemble_table(
  mut entries: Vec<RankedEntry>,
  reference_name: Option<&str>,
  progress: Option<&EventProgress>,
  polled_at: DateTime<Local>,
) -> TableSpec {
  entries.sort_by_key(|entry| entry.rank);

  let progress_text = progress
    .and_then(|progress| progress.percent)
    .map(|percent| format!("{:.2}%", percent))
    .unwrap_or_else(|| UNKNOWN_PROGRESS_PLACEHOLDER.to_string());
  let title = format!(
    "Polled at: {}  Event progress: {}",
    polled_at.format("%Y/%m/%d %H:%M"),
    progress_text
  );

  let reference_header = format!(
    "Vs {}",
    reference_name.unwrap_or(REFERENCE_UNSET_PLACEHOLDER)
  );
  let headers = vec![
    "Rank".to_string(),
    "Player".to_string(),
    "Points".to_string(),
    "Speed".to_string(),
    "Speed Rank".to_string(),
    "Gap Above".to_string(),
    reference_header,
  ];

  let rows = entries
    .into_iter()
    .map(|entry| TableRow {
      rank: entry.rank,
      player_name: entry.player_name,
      points: format_grouped(entry.points),
      speed: format_grouped(entry.speed),
      speed_rank: entry.speed_rank,
      point_gap: format_metric(entry.point_diff),
      reference_gap: format_metric(entry.diff_with_reference),
      highlight: Highlight::for_entry(entry.speed, entry.speed_rank),
    })
    .collect();

  TableSpec {
    title,
    headers,
    rows,
  }
}

/// Formats an integer with thousands separators.
pub fn format_grouped(value: i64) -> String {
  let raw_digits = value.unsigned_abs().to_string();
  let mut grouped = String::with_capacity(raw_digits.len() + raw_digits.len() / 3 + 1);

  for (offset, digit) in raw_digits.chars().rev().enumerate() {
    if offset > 0 && offset % 3 == 0 {
      grouped.push(',');
    }

    grouped.push(digit);
  }

  if value < 0 {
    grouped.push('-');
  }

  grouped.chars().rev().collect()
}

/// Numbers get thousands separators; sentinels get their fixed glyphs.
pub fn format_metric(value: MetricValue) -> String {
  match value {
    MetricValue::Number(value) => format_grouped(value),
    MetricValue::None => NONE_GLYPH.to_string(),
    MetricValue::Unavailable => UNAVAILABLE_GLYPH.to_string(),
  }
}
