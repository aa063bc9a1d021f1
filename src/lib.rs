pub mod display;
pub mod error;
pub mod floor;
pub mod interchange;
pub mod roster;
pub mod session;
pub mod store;
pub mod web;

pub use error::{FloorError, ImportError, StoreError};
pub use floor::{AssignOutcome, FloorPlan, SlotId};
pub use roster::{Company, DaysRegistered, RosterRow};
pub use session::EditorSession;
