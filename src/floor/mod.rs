pub mod engine;
pub mod slot_id;
pub mod topology;

pub use engine::{AssignOutcome, FloorPlan};
pub use slot_id::{parse_compact, to_compact, to_internal, Row, SlotId};
pub use topology::{generate_slots, is_wall_section, section_ids, TOTAL_SLOTS};
