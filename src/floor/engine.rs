use crate::error::FloorError;

use super::slot_id::SlotId;
use super::topology::generate_slots;

#[derive(Debug, Clone)]
struct Occupant {
    company_id: String,
    seq: u64,
}

#[derive(Debug, Clone)]
struct SlotState {
    id: SlotId,
    occupant: Option<Occupant>,
}

/// What an `assign` call did besides placing the company on the target slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignOutcome {
    /// The company's oldest slot, freed because its quota was already met.
    pub evicted: Option<SlotId>,
    /// A different company that previously held the target slot.
    pub displaced: Option<String>,
}

/// The floor plan: every slot of the fixed topology plus who currently
/// occupies it. Assignments are stamped with a monotonically increasing
/// sequence number so "oldest assignment" is well-defined when the quota
/// rule has to evict one.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    slots: Vec<SlotState>,
    next_seq: u64,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlan {
    /// A fresh floor with every slot unassigned.
    pub fn new() -> Self {
        let slots = generate_slots()
            .into_iter()
            .map(|id| SlotState { id, occupant: None })
            .collect();
        FloorPlan { slots, next_seq: 0 }
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Clears every assignment. Slot layout and sequence counter survive.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.occupant = None;
        }
    }

    /// Assigns `company_id` to `slot_id`, holding the company to `quota`
    /// simultaneous slots. If the quota is already met, the company's oldest
    /// assignment is freed first; the check runs strictly before the target
    /// slot is written. A different company on the target slot simply loses
    /// it (the overwrite is the removal).
    pub fn assign(
        &mut self,
        company_id: &str,
        quota: u32,
        slot_id: SlotId,
    ) -> Result<AssignOutcome, FloorError> {
        if !self.slots.iter().any(|s| s.id == slot_id) {
            return Err(FloorError::UnknownSlot(slot_id.to_string()));
        }

        let mut outcome = AssignOutcome::default();

        let existing = self.slots_for(company_id);
        if existing.len() as u32 >= quota {
            if let Some(&oldest) = existing.first() {
                self.clear(oldest);
                outcome.evicted = Some(oldest);
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.id == slot_id)
            .expect("slot existence checked above");
        if let Some(previous) = slot.occupant.take() {
            if previous.company_id != company_id {
                outcome.displaced = Some(previous.company_id);
            }
        }
        slot.occupant = Some(Occupant {
            company_id: company_id.to_string(),
            seq,
        });

        Ok(outcome)
    }

    /// Places a company on a slot without the quota check. Used when
    /// restoring assignments from an imported file, which is trusted as-is.
    pub fn place(&mut self, company_id: &str, slot_id: SlotId) -> Result<(), FloorError> {
        let seq = self.next_seq;
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.id == slot_id)
            .ok_or_else(|| FloorError::UnknownSlot(slot_id.to_string()))?;
        self.next_seq += 1;
        slot.occupant = Some(Occupant {
            company_id: company_id.to_string(),
            seq,
        });
        Ok(())
    }

    /// Frees a slot. Returns the company that held it, if any; freeing an
    /// empty or unknown slot is a no-op.
    pub fn unassign(&mut self, slot_id: SlotId) -> Option<String> {
        let slot = self.slots.iter_mut().find(|s| s.id == slot_id)?;
        slot.occupant.take().map(|o| o.company_id)
    }

    /// Number of slots currently held by a company.
    pub fn count_for(&self, company_id: &str) -> usize {
        self.occupied()
            .filter(|(_, occupant)| *occupant == company_id)
            .count()
    }

    /// Slots held by a company, oldest assignment first.
    pub fn slots_for(&self, company_id: &str) -> Vec<SlotId> {
        let mut held: Vec<(u64, SlotId)> = self
            .slots
            .iter()
            .filter_map(|s| {
                s.occupant
                    .as_ref()
                    .filter(|o| o.company_id == company_id)
                    .map(|o| (o.seq, s.id))
            })
            .collect();
        held.sort_by_key(|(seq, _)| *seq);
        held.into_iter().map(|(_, id)| id).collect()
    }

    /// The company holding a slot, if any.
    pub fn occupant(&self, slot_id: SlotId) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.id == slot_id)?
            .occupant
            .as_ref()
            .map(|o| o.company_id.as_str())
    }

    /// Every slot in floor order with its current occupant.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, Option<&str>)> {
        self.slots
            .iter()
            .map(|s| (s.id, s.occupant.as_ref().map(|o| o.company_id.as_str())))
    }

    /// Occupied slots in floor order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotId, &str)> {
        self.slots.iter().filter_map(|s| {
            s.occupant
                .as_ref()
                .map(|o| (s.id, o.company_id.as_str()))
        })
    }

    fn clear(&mut self, slot_id: SlotId) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == slot_id) {
            slot.occupant = None;
        }
    }
}
