pub mod poll_cycle;
pub mod task_registry;

pub use poll_cycle::run_tracking_cycle;
pub use task_registry::{Cadence, TaskRegistry};
