use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Deserialized event catalog (`events/all.5.json`).
///
/// Entries keep the order they appear in the JSON document, so "the first
/// event whose interval contains now" is deterministic.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct EventCatalog {
  entries: Map<String, Value>,
}

/// Progress information for one event.
///
/// `percent` is absent when the interval is degenerate and the elapsed share
/// cannot be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct EventProgress {
  pub event_name: String,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  pub percent: Option<f64>,
}

impl EventCatalog {
  /// Returns the first event whose `[startAt[server], endAt[server])`
  /// interval contains `now_millis`.
  ///
  /// Catalog entries with missing or malformed per-server timestamps are
  /// skipped, not fatal.
  pub fn current_event_id(&self, server: usize, now_millis: f64) -> Option<i64> {
    for (event_id, event_info) in &self.entries {
      let Value::Object(event_info) = event_info else {
        continue;
      };
      let Some(start) = timestamp_at(event_info.get("startAt"), server) else {
        continue;
      };
      let Some(end) = timestamp_at(event_info.get("endAt"), server) else {
        continue;
      };

      if start <= now_millis && now_millis < end {
        if let Ok(event_id) = event_id.parse::<i64>() {
          return Some(event_id);
        }
      }
    }

    None
  }

  /// Returns the event's name, interval and elapsed-progress percentage.
  ///
  /// `None` when the event is missing from the catalog. A degenerate interval
  /// (start equals end) yields `percent: None` instead of failing.
  pub fn event_progress(&self, event_id: i64, now: DateTime<Utc>) -> Option<EventProgress> {
    let event_info = self.entries.get(&event_id.to_string())?;
    let Value::Object(event_info) = event_info else {
      return None;
    };

    let event_name = event_info
      .get("eventName")
      .and_then(Value::as_array)
      .and_then(|names| names.first())
      .and_then(Value::as_str)
      .unwrap_or("Unknown")
      .to_string();

    let start_millis = timestamp_at(event_info.get("startAt"), 0).unwrap_or(0.0);
    let end_millis = timestamp_at(event_info.get("endAt"), 0).unwrap_or(0.0);
    let start = Utc.timestamp_millis_opt(start_millis as i64).single()?;
    let end = Utc.timestamp_millis_opt(end_millis as i64).single()?;

    let interval_millis = end_millis - start_millis;
    let percent = if interval_millis == 0.0 {
      None
    } else {
      let elapsed_millis = now.timestamp_millis() as f64 - start_millis;

      Some((elapsed_millis / interval_millis * 100.0).clamp(0.0, 100.0))
    };

    Some(EventProgress {
      event_name,
      start,
      end,
      percent,
    })
  }
}

/// Reads the timestamp list entry for one server.
///
/// The source API stores epoch millis as either strings or numbers, with
/// `null` for servers the event never ran on.
fn timestamp_at(timestamp_list: Option<&Value>, server: usize) -> Option<f64> {
  match timestamp_list?.as_array()?.get(server)? {
    Value::String(raw_timestamp) => raw_timestamp.parse::<f64>().ok(),
    Value::Number(raw_timestamp) => raw_timestamp.as_f64(),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn test_catalog() -> EventCatalog {
    serde_json::from_value(json!({
      "200": {
        "eventName": ["Finished Event"],
        "startAt": ["1000", "2000"],
        "endAt": ["5000", "6000"]
      },
      "201": {
        "eventName": ["Running Event"],
        "startAt": ["10000", "20000"],
        "endAt": ["50000", "60000"]
      },
      "202": {
        "eventName": ["Broken Event"],
        "startAt": [null, null],
        "endAt": "not a list"
      }
    }))
    .unwrap()
  }

  #[test]
  fn current_event_id_returns_the_first_event_containing_now() {
    let catalog = test_catalog();

    assert_eq!(catalog.current_event_id(0, 30000.0), Some(201));
  }

  #[test]
  fn current_event_id_uses_the_requested_server_slot() {
    let catalog = test_catalog();

    assert_eq!(catalog.current_event_id(1, 3000.0), Some(200));
    assert_eq!(catalog.current_event_id(0, 3000.0), Some(200));
    assert_eq!(catalog.current_event_id(1, 55000.0), Some(201));
  }

  #[test]
  fn current_event_id_skips_malformed_entries_and_can_return_none() {
    let catalog = test_catalog();

    assert_eq!(catalog.current_event_id(0, 999999.0), None);
  }

  #[test]
  fn interval_end_is_exclusive() {
    let catalog = test_catalog();

    assert_eq!(catalog.current_event_id(0, 50000.0), None);
    assert_eq!(catalog.current_event_id(0, 10000.0), Some(201));
  }

  #[test]
  fn event_progress_is_clamped_between_zero_and_one_hundred() {
    let catalog = test_catalog();

    let halfway = catalog
      .event_progress(201, Utc.timestamp_millis_opt(30000).unwrap())
      .unwrap();
    let before_start = catalog
      .event_progress(201, Utc.timestamp_millis_opt(0).unwrap())
      .unwrap();
    let after_end = catalog
      .event_progress(201, Utc.timestamp_millis_opt(99999999).unwrap())
      .unwrap();

    assert_eq!(halfway.percent, Some(50.0));
    assert_eq!(before_start.percent, Some(0.0));
    assert_eq!(after_end.percent, Some(100.0));
  }

  #[test]
  fn event_progress_is_absent_for_an_unknown_event() {
    let catalog = test_catalog();

    assert!(catalog
      .event_progress(999, Utc.timestamp_millis_opt(30000).unwrap())
      .is_none());
  }

  #[test]
  fn a_degenerate_interval_yields_no_percentage_instead_of_failing() {
    let catalog: EventCatalog = serde_json::from_value(json!({
      "300": {
        "eventName": ["Zero Length"],
        "startAt": ["10000"],
        "endAt": ["10000"]
      }
    }))
    .unwrap();

    let progress = catalog
      .event_progress(300, Utc.timestamp_millis_opt(10000).unwrap())
      .unwrap();

    assert_eq!(progress.event_name, "Zero Length");
    assert_eq!(progress.percent, None);
  }

  #[test]
  fn catalog_iteration_follows_document_order() {
    let catalog: EventCatalog = serde_json::from_value(json!({
      "9": {
        "eventName": ["First In Document"],
        "startAt": ["1000"],
        "endAt": ["5000"]
      },
      "10": {
        "eventName": ["Second In Document"],
        "startAt": ["1000"],
        "endAt": ["5000"]
      }
    }))
    .unwrap();

    assert_eq!(catalog.current_event_id(0, 2000.0), Some(9));
  }
}
