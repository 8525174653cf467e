use app_config::CLAP_ARGS;
use bestdori_t10_tracker::processes::{run_tracking_cycle, Cadence, TaskRegistry};
use bestdori_t10_tracker::render::{RenderSink, TextTableSink};
use database_connection::get_database_connection;
use entities::reference_player;
use entity_extensions::prelude::*;

#[tokio::main]
async fn main() {
  bestdori_t10_tracker::logging::setup_logging_config().unwrap();

  let server = CLAP_ARGS.server();
  let guild_id = CLAP_ARGS.guild_id();
  let explicit_event_id = CLAP_ARGS.event_id();

  if run_reference_commands(guild_id).await {
    return;
  }

  match CLAP_ARGS.cadence() {
    Some(cadence_value) => {
      let cadence = cadence_value.parse::<Cadence>().unwrap();

      run_periodic(server, guild_id, cadence, explicit_event_id).await;
    }

    None => run_once(server, guild_id, explicit_event_id).await,
  }
}

/// Returns true when a reference maintenance flag was handled and the run
/// should end without tracking anything.
async fn run_reference_commands(guild_id: i64) -> bool {
  if CLAP_ARGS.clear_reference() {
    let database_connection = get_database_connection().await;

    reference_player::Model::delete_reference(guild_id, database_connection)
      .await
      .unwrap();

    println!("Cleared the reference player for guild {}.", guild_id);

    return true;
  }

  if CLAP_ARGS.show_reference() {
    let database_connection = get_database_connection().await;
    let reference = reference_player::Model::get_reference(guild_id, database_connection)
      .await
      .unwrap();

    match reference {
      Some(reference) => println!(
        "The reference player for guild {} is {} (ID: {}).",
        guild_id, reference.player_name, reference.user_id
      ),
      None => println!("Guild {} has no reference player set.", guild_id),
    }

    return true;
  }

  if let Some(user_id) = CLAP_ARGS.set_reference() {
    let player_name = CLAP_ARGS.reference_name().unwrap();
    let database_connection = get_database_connection().await;

    reference_player::Model::set_reference(guild_id, user_id, player_name, database_connection)
      .await
      .unwrap();

    println!(
      "Set the reference player for guild {} to {} (ID: {}).",
      guild_id, player_name, user_id
    );

    return true;
  }

  false
}

async fn run_once(server: usize, guild_id: i64, explicit_event_id: Option<i64>) {
  match run_tracking_cycle(server, guild_id, explicit_event_id).await {
    Ok(Some(table)) => {
      TextTableSink.render(&table).await.unwrap();
    }

    Ok(None) => {
      tracing::warn!("No table was produced. Skipping the render.");

      std::process::exit(1);
    }

    Err(error) => {
      tracing::error!("The tracking cycle failed: {}", error);

      std::process::exit(1);
    }
  }
}

async fn run_periodic(server: usize, guild_id: i64, cadence: Cadence, event_id: Option<i64>) {
  let registry = TaskRegistry::new();

  registry
    .start(guild_id, server, cadence, event_id, TextTableSink)
    .await
    .unwrap();

  println!(
    "Tracking guild {} at the {} cadence. Ctrl-C stops.",
    guild_id, cadence
  );

  tokio::signal::ctrl_c().await.unwrap();

  registry.stop(guild_id, cadence).await.unwrap();
}
