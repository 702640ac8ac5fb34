//! Radar contacts and the per-boat contact table.
//!
//! A contact is keyed by the identity of the sensed entity. Reacquiring the
//! same entity merges the fresh observation into the existing entry, so a
//! mission holding a [`ContactId`] always reads the latest data through
//! [`ContactTable::get`] rather than a stale copy.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::ContactKind;
use crate::types::FactionId;

/// Stable identity of a sensed entity, shared by every boat that sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(pub u64);

/// A time-stamped observation of another entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetContact {
    pub id: ContactId,
    pub kind: ContactKind,
    pub display_name: String,
    pub faction: Option<FactionId>,
    /// Last observed position.
    pub position: DVec2,
    /// Last observed velocity.
    pub velocity: DVec2,
    /// Simulation time of the observation (s).
    pub observed_at: f64,
    /// Cleared when the contact has been disproven.
    pub valid: bool,
}

impl TargetContact {
    pub fn new(
        id: ContactId,
        kind: ContactKind,
        display_name: impl Into<String>,
        faction: Option<FactionId>,
        position: DVec2,
        velocity: DVec2,
        observed_at: f64,
    ) -> Self {
        Self {
            id,
            kind,
            display_name: display_name.into(),
            faction,
            position,
            velocity,
            observed_at,
            valid: true,
        }
    }

    /// Seconds since the contact was last observed.
    pub fn age(&self, now: f64) -> f64 {
        (now - self.observed_at).max(0.0)
    }

    /// Last position extrapolated along the last velocity.
    pub fn estimated_position(&self, now: f64) -> DVec2 {
        self.position + self.velocity * self.age(now)
    }

    /// Position extrapolated `lead` seconds beyond now.
    pub fn projected_position(&self, now: f64, lead: f64) -> DVec2 {
        self.position + self.velocity * (self.age(now) + lead)
    }

    /// Marks the contact as disproven. It stays in the table until pruned or reacquired.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// True if a boat of `own` faction should treat this contact as hostile.
    pub fn is_hostile_to(&self, own: Option<FactionId>) -> bool {
        own.is_none() || self.faction != own
    }

    /// Refreshes this entry from a newer observation of the same entity.
    pub fn merge(&mut self, observation: &TargetContact) {
        debug_assert_eq!(self.id, observation.id);
        self.kind = observation.kind;
        self.display_name.clone_from(&observation.display_name);
        self.faction = observation.faction;
        self.position = observation.position;
        self.velocity = observation.velocity;
        self.observed_at = observation.observed_at;
        self.valid = true;
    }
}

/// The set of contacts a boat currently believes in.
///
/// Iteration order is insertion order, which keeps decisions deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactTable {
    entries: Vec<TargetContact>,
}

impl ContactTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new contact or merges it into the entry with the same id.
    pub fn record_hit(&mut self, observation: TargetContact) -> &TargetContact {
        match self.entries.iter().position(|c| c.id == observation.id) {
            Some(index) => {
                self.entries[index].merge(&observation);
                &self.entries[index]
            }
            None => {
                self.entries.push(observation);
                let last = self.entries.len() - 1;
                &self.entries[last]
            }
        }
    }

    /// Removes every entry matching `is_stale`. Returns the number removed.
    pub fn prune(&mut self, mut is_stale: impl FnMut(&TargetContact) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|c| !is_stale(c));
        before - self.entries.len()
    }

    pub fn get(&self, id: ContactId) -> Option<&TargetContact> {
        self.entries.iter().find(|c| c.id == id)
    }

    /// Looks up a contact that is still valid.
    pub fn get_valid(&self, id: ContactId) -> Option<&TargetContact> {
        self.get(id).filter(|c| c.valid)
    }

    /// Marks a contact as disproven. Returns false if it was not present.
    pub fn invalidate(&mut self, id: ContactId) -> bool {
        match self.entries.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                contact.invalidate();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetContact> {
        self.entries.iter()
    }

    /// Valid contacts only.
    pub fn valid(&self) -> impl Iterator<Item = &TargetContact> {
        self.entries.iter().filter(|c| c.valid)
    }

    /// Nearest valid contact to `origin` (by estimated position) matching `predicate`.
    /// Ties keep the earlier entry.
    pub fn nearest(
        &self,
        origin: DVec2,
        now: f64,
        mut predicate: impl FnMut(&TargetContact) -> bool,
    ) -> Option<&TargetContact> {
        let mut best: Option<(&TargetContact, f64)> = None;
        for contact in self.valid().filter(|c| predicate(c)) {
            let distance_sq = contact.estimated_position(now).distance_squared(origin);
            if best.map_or(true, |(_, d)| distance_sq < d) {
                best = Some((contact, distance_sq));
            }
        }
        best.map(|(contact, _)| contact)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
