use clap::{Arg, Command};
use lazy_static::lazy_static;

lazy_static! {
  pub static ref CLAP_ARGS: ClapArgs = ClapArgs::new();
}

pub struct ClapArgs {
  args: clap::ArgMatches,
}

impl ClapArgs {
  const SERVER: &'static str = "server";
  const GUILD_ID: &'static str = "guild_id";
  const EVENT_ID: &'static str = "event_id";
  const CADENCE: &'static str = "cadence";
  const SET_REFERENCE: &'static str = "set_reference";
  const REFERENCE_NAME: &'static str = "reference_name";
  const CLEAR_REFERENCE: &'static str = "clear_reference";
  const SHOW_REFERENCE: &'static str = "show_reference";

  pub fn new() -> Self {
    let args = Self::setup_args();

    Self { args }
  }

  pub fn server(&self) -> usize {
    let value = self.args.get_one::<String>(Self::SERVER).unwrap();

    value.parse::<usize>().unwrap()
  }

  pub fn guild_id(&self) -> i64 {
    let value = self.args.get_one::<String>(Self::GUILD_ID).unwrap();

    value.parse::<i64>().unwrap()
  }

  /// An explicit event of 0 (or none at all) means "resolve the current event".
  pub fn event_id(&self) -> Option<i64> {
    let value = self.args.get_one::<String>(Self::EVENT_ID)?;

    value.parse::<i64>().ok()
  }

  pub fn cadence(&self) -> Option<&str> {
    self
      .args
      .get_one::<String>(Self::CADENCE)
      .map(String::as_str)
  }

  pub fn set_reference(&self) -> Option<i64> {
    let value = self.args.get_one::<String>(Self::SET_REFERENCE)?;

    value.parse::<i64>().ok()
  }

  pub fn reference_name(&self) -> Option<&str> {
    self
      .args
      .get_one::<String>(Self::REFERENCE_NAME)
      .map(String::as_str)
  }

  pub fn clear_reference(&self) -> bool {
    self.args.get_flag(Self::CLEAR_REFERENCE)
  }

  pub fn show_reference(&self) -> bool {
    self.args.get_flag(Self::SHOW_REFERENCE)
  }

  fn setup_args() -> clap::ArgMatches {
    Command::new("Bestdori T10 Tracker")
      .arg(
        Arg::new(Self::SERVER)
          .required(true)
          .help("The game server region index to track, as used by the event catalog."),
      )
      .arg(
        Arg::new(Self::GUILD_ID)
          .required(true)
          .help("The tenant (guild) whose reference player and task state should be used."),
      )
      .arg(
        Arg::new(Self::EVENT_ID)
          .help("Track a specific event ID instead of resolving the current one. 0 also resolves."),
      )
      .arg(
        Arg::new(Self::CADENCE)
          .short('c')
          .long("cadence")
          .action(clap::ArgAction::Set)
          .help("Run periodically at the given cadence (hourly or two-minutes) instead of once."),
      )
      .arg(
        Arg::new(Self::SET_REFERENCE)
          .long("set-reference")
          .action(clap::ArgAction::Set)
          .requires(Self::REFERENCE_NAME)
          .help("Register this user ID as the guild's reference player, then exit."),
      )
      .arg(
        Arg::new(Self::REFERENCE_NAME)
          .long("reference-name")
          .action(clap::ArgAction::Set)
          .help("The display name stored alongside --set-reference."),
      )
      .arg(
        Arg::new(Self::CLEAR_REFERENCE)
          .long("clear-reference")
          .action(clap::ArgAction::SetTrue)
          .help("Delete the guild's reference player, then exit."),
      )
      .arg(
        Arg::new(Self::SHOW_REFERENCE)
          .long("show-reference")
          .action(clap::ArgAction::SetTrue)
          .help("Print the guild's reference player, then exit."),
      )
      .get_matches()
  }
}

impl Default for ClapArgs {
  fn default() -> Self {
    Self::new()
  }
}
