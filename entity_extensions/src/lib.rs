#![allow(async_fn_in_trait)]

pub mod errors;
pub mod event_snapshot;
pub mod prelude;
pub mod reference_player;
