pub use crate::event_snapshot::Entity as EventSnapshot;
pub use crate::reference_player::Entity as ReferencePlayer;
