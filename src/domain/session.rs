// src/domain/session.rs

use crate::domain::property::{PartialPropertyRecord, PropertyRecord, SlotId};

/// Everything one user is working on: the subject, three comparables and
/// one active listing. Lives in memory only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub subject: PropertyRecord,
    pub comps: [PropertyRecord; 3],
    pub active_listing: PropertyRecord,
}

impl Session {
    pub fn slot(&self, id: SlotId) -> &PropertyRecord {
        match id {
            SlotId::Subject => &self.subject,
            SlotId::Comp1 => &self.comps[0],
            SlotId::Comp2 => &self.comps[1],
            SlotId::Comp3 => &self.comps[2],
            SlotId::ActiveListing => &self.active_listing,
        }
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut PropertyRecord {
        match id {
            SlotId::Subject => &mut self.subject,
            SlotId::Comp1 => &mut self.comps[0],
            SlotId::Comp2 => &mut self.comps[1],
            SlotId::Comp3 => &mut self.comps[2],
            SlotId::ActiveListing => &mut self.active_listing,
        }
    }

    /// Merge the outcome of a parse into a slot. A failed parse leaves the
    /// slot exactly as it was.
    pub fn apply_parse<E>(
        &mut self,
        id: SlotId,
        outcome: Result<PartialPropertyRecord, E>,
    ) -> Result<(), E> {
        let parsed = outcome?;
        self.slot_mut(id).merge(&parsed);
        Ok(())
    }

    pub fn clear(&mut self, id: SlotId) {
        *self.slot_mut(id) = PropertyRecord::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_parse_leaves_slot_untouched() {
        let mut session = Session::default();
        session.subject.address = Some("12 Oak Ln".to_string());
        session.subject.set_acres(Some(3.0));
        let before = session.clone();

        let outcome: Result<PartialPropertyRecord, &str> = Err("boom");
        assert!(session.apply_parse(SlotId::Subject, outcome).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn slots_are_independent() {
        let mut session = Session::default();
        session.slot_mut(SlotId::Comp2).set_price(Some(50_000.0));

        assert_eq!(session.comps[1].price(), Some(50_000.0));
        assert!(session.comps[0].is_blank());
        assert!(session.subject.is_blank());

        session.clear(SlotId::Comp2);
        assert!(session.comps[1].is_blank());
    }
}
