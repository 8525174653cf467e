pub use crate::event_snapshot::{EventSnapshotExtensions, SnapshotWrite};
pub use crate::reference_player::ReferencePlayerExtensions;
