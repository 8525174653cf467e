use crate::errors::AppError;
use crate::processes::poll_cycle::run_tracking_cycle;
use crate::render::RenderSink;
use chrono::Utc;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// How often a tracking task fires. Both cadences align to the wall clock:
/// the top of the next hour, or the next even minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
  Hourly,
  TwoMinutes,
}

impl Cadence {
  fn period_seconds(&self) -> i64 {
    match self {
      Self::Hourly => 3600,
      Self::TwoMinutes => 120,
    }
  }

  /// Seconds until the next wall-clock boundary strictly after `now`.
  pub fn seconds_until_next_fire(&self, now_epoch_seconds: i64) -> i64 {
    let period = self.period_seconds();

    period - now_epoch_seconds.rem_euclid(period)
  }
}

impl std::fmt::Display for Cadence {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let cadence_name = match self {
      Self::Hourly => "hourly",
      Self::TwoMinutes => "two-minutes",
    };

    write!(formatter, "{}", cadence_name)
  }
}

impl FromStr for Cadence {
  type Err = AppError;

  fn from_str(cadence_value: &str) -> Result<Self, Self::Err> {
    match cadence_value.to_lowercase().trim() {
      "hourly" | "1h" => Ok(Self::Hourly),
      "two-minutes" | "2min" => Ok(Self::TwoMinutes),
      _ => Err(AppError::UnknownCadence(cadence_value.to_string())),
    }
  }
}

struct TrackerTask {
  cancel_sender: watch::Sender<bool>,
  handle: JoinHandle<()>,
}

/// Running poll tasks, keyed by `(guild_id, cadence)`.
///
/// Stopping is cooperative: the signal is observed while a task sleeps
/// between cycles, never mid-cycle, so a cycle that has started always
/// completes (and its snapshot write stays all-or-nothing).
#[derive(Default)]
pub struct TaskRegistry {
  tasks: Mutex<HashMap<(i64, Cadence), TrackerTask>>,
}

impl TaskRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Spawns a periodic tracking task. Rejects a `(guild, cadence)` pair that
  /// is already running.
  pub async fn start<S>(
    &self,
    guild_id: i64,
    server: usize,
    cadence: Cadence,
    explicit_event_id: Option<i64>,
    sink: S,
  ) -> Result<(), AppError>
  where
    S: RenderSink + Send + Sync + 'static,
  {
    let mut tasks = self.tasks.lock().await;

    if tasks.contains_key(&(guild_id, cadence)) {
      return Err(AppError::TaskAlreadyRunning {
        guild_id,
        cadence: cadence.to_string(),
      });
    }

    let (cancel_sender, cancel_receiver) = watch::channel(false);
    let handle = tokio::spawn(run_tracking_task(
      guild_id,
      server,
      cadence,
      explicit_event_id,
      sink,
      cancel_receiver,
    ));

    tasks.insert(
      (guild_id, cadence),
      TrackerTask {
        cancel_sender,
        handle,
      },
    );

    Ok(())
  }

  /// Signals the task to stop and waits for it to wind down.
  pub async fn stop(&self, guild_id: i64, cadence: Cadence) -> Result<(), AppError> {
    let Some(task) = self.tasks.lock().await.remove(&(guild_id, cadence)) else {
      return Err(AppError::TaskNotRunning {
        guild_id,
        cadence: cadence.to_string(),
      });
    };

    let _ = task.cancel_sender.send(true);

    if let Err(error) = task.handle.await {
      tracing::error!(
        "The {} tracking task for guild {} ended abnormally: {}",
        cadence,
        guild_id,
        error
      );
    }

    Ok(())
  }

  pub async fn is_running(&self, guild_id: i64, cadence: Cadence) -> bool {
    self.tasks.lock().await.contains_key(&(guild_id, cadence))
  }

  pub async fn stop_all(&self) {
    let tasks = std::mem::take(&mut *self.tasks.lock().await);

    for ((guild_id, cadence), task) in tasks {
      let _ = task.cancel_sender.send(true);

      if let Err(error) = task.handle.await {
        tracing::error!(
          "The {} tracking task for guild {} ended abnormally: {}",
          cadence,
          guild_id,
          error
        );
      }
    }
  }
}

async fn run_tracking_task<S>(
  guild_id: i64,
  server: usize,
  cadence: Cadence,
  explicit_event_id: Option<i64>,
  sink: S,
  mut cancel_receiver: watch::Receiver<bool>,
) where
  S: RenderSink + Send + Sync + 'static,
{
  tracing::info!(
    "Starting the {} tracking task for guild {}.",
    cadence,
    guild_id
  );

  loop {
    let wait_seconds = cadence.seconds_until_next_fire(Utc::now().timestamp());

    tokio::select! {
      _ = tokio::time::sleep(Duration::from_secs(wait_seconds as u64)) => (),

      changed_result = cancel_receiver.changed() => {
        // A dropped registry counts as a stop signal.
        if changed_result.is_err() {
          break;
        }
      }
    }

    if *cancel_receiver.borrow() {
      break;
    }

    match run_tracking_cycle(server, guild_id, explicit_event_id).await {
      Ok(Some(table)) => {
        if let Err(error) = sink.render(&table).await {
          tracing::error!("Failed to render the table for guild {}: {}", guild_id, error);
        }
      }

      Ok(None) => {
        tracing::warn!("Skipping the render for guild {} this cycle.", guild_id);
      }

      Err(error) => {
        tracing::error!("The tracking cycle for guild {} failed: {}", guild_id, error);
      }
    }
  }

  tracing::info!(
    "Stopped the {} tracking task for guild {}.",
    cadence,
    guild_id
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hourly_fires_align_to_the_top_of_the_hour() {
    // 2025-07-12 20:15:30 UTC.
    let now = 1752351330;

    assert_eq!(Cadence::Hourly.seconds_until_next_fire(now), 2670);
  }

  #[test]
  fn two_minute_fires_align_to_the_next_even_minute() {
    // 13 seconds past an even minute.
    let now = 1752351133 - 1752351133 % 120 + 13;

    assert_eq!(Cadence::TwoMinutes.seconds_until_next_fire(now), 107);
  }

  #[test]
  fn a_fire_on_the_boundary_schedules_the_full_period_ahead() {
    let on_the_hour = 1752354000;

    assert_eq!(Cadence::Hourly.seconds_until_next_fire(on_the_hour), 3600);
    assert_eq!(
      Cadence::TwoMinutes.seconds_until_next_fire(on_the_hour),
      120
    );
  }

  #[test]
  fn cadences_parse_from_their_command_names() {
    assert_eq!("hourly".parse::<Cadence>().unwrap(), Cadence::Hourly);
    assert_eq!("2min".parse::<Cadence>().unwrap(), Cadence::TwoMinutes);
    assert!("weekly".parse::<Cadence>().is_err());
  }
}
