use crate::errors::AppError;
use crate::render::{RenderSink, TableSpec};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Renders the table as markdown text on stdout.
///
/// Used by the one-shot CLI and as a log-friendly stand-in for the image
/// backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTableSink;

impl RenderSink for TextTableSink {
  async fn render(&self, table: &TableSpec) -> Result<(), AppError> {
    println!("{}", render_text(table));

    Ok(())
  }
}

/// Headers are taken from the table description rather than a derive so the
/// reference column can carry the player's name.
pub fn render_text(table_spec: &TableSpec) -> String {
  let mut builder = Builder::default();

  builder.push_record(table_spec.headers.clone());

  for row in &table_spec.rows {
    builder.push_record([
      row.rank.to_string(),
      row.player_name.clone(),
      row.points.clone(),
      row.speed.clone(),
      row.speed_rank.to_string(),
      row.point_gap.clone(),
      row.reference_gap.clone(),
    ]);
  }

  let mut table = builder.build();

  table.with(Style::markdown());

  format!("{}\n\n{}", table_spec.title, table)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::TableRow;

  #[test]
  fn render_text_includes_the_title_headers_and_every_row() {
    let table_spec = TableSpec {
      title: "Polled at: 2025/07/12 21:00  Event progress: 42.00%".to_string(),
      headers: vec![
        "Rank".to_string(),
        "Player".to_string(),
        "Points".to_string(),
        "Speed".to_string(),
        "Speed Rank".to_string(),
        "Gap Above".to_string(),
        "Vs kasumi".to_string(),
      ],
      rows: vec![TableRow {
        rank: 1,
        player_name: "kasumi".to_string(),
        points: "1,500".to_string(),
        speed: "500".to_string(),
        speed_rank: 1,
        point_gap: "—".to_string(),
        reference_gap: "0".to_string(),
        highlight: crate::render::Highlight::Gold,
      }],
    };

    let rendered = render_text(&table_spec);

    assert!(rendered.contains("Event progress: 42.00%"));
    assert!(rendered.contains("Vs kasumi"));
    assert!(rendered.contains("1,500"));
    assert!(rendered.contains("—"));
  }
}
