//! Priority-based selection between a boat's missions.

use tracing::debug;

use crate::helm::Helm;
use crate::mission::{Mission, MissionStatus};

/// Priority of a mission that aborted, held through the next arbitration cycle.
pub const ABORTED_PRIORITY: f64 = f64::MIN;

struct Slot {
    mission: Box<dyn Mission>,
    priority: f64,
    /// Set by an abort; the mission sits out the next arbitration cycle.
    aborted: bool,
}

impl Slot {
    fn new(mission: Box<dyn Mission>) -> Self {
        Self {
            mission,
            priority: 0.0,
            aborted: false,
        }
    }
}

/// Holds an ordered set of missions and runs the highest-priority one.
///
/// Registration order breaks ties: the earlier mission wins.
#[derive(Default)]
pub struct MissionArbitrator {
    slots: Vec<Slot>,
    active: Option<usize>,
}

/// A change of active mission made by [`MissionArbitrator::arbitrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: Option<&'static str>,
    pub to: &'static str,
}

impl MissionArbitrator {
    pub fn new(missions: Vec<Box<dyn Mission>>) -> Self {
        Self {
            slots: missions.into_iter().map(Slot::new).collect(),
            active: None,
        }
    }

    pub fn register(&mut self, mission: Box<dyn Mission>) {
        self.slots.push(Slot::new(mission));
    }

    /// Rescores every mission and switches the active one if a different
    /// mission now has the highest priority. Runs at 1 Hz, followed by the
    /// active mission's `update1`.
    pub fn arbitrate(&mut self, helm: &mut dyn Helm) -> Option<Transition> {
        for slot in &mut self.slots {
            let priority = slot.mission.compute_priority(&*helm);
            slot.priority = if priority.is_nan() || slot.aborted {
                ABORTED_PRIORITY
            } else {
                priority
            };
            slot.aborted = false;
        }

        let mut best: Option<usize> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            match best {
                Some(b) if slot.priority <= self.slots[b].priority => {}
                _ => best = Some(index),
            }
        }

        let mut transition = None;
        if let Some(next) = best {
            if self.active != Some(next) {
                let from = self.active.map(|i| self.slots[i].mission.name());
                if let Some(previous) = self.active {
                    self.slots[previous].mission.on_lost_priority(helm);
                }
                self.slots[next].mission.on_acquired_priority(helm);
                self.active = Some(next);
                let to = self.slots[next].mission.name();
                debug!(boat = helm.name(), ?from, to, "mission switch");
                transition = Some(Transition { from, to });
            }
        }

        if let Some(active) = self.active {
            self.slots[active].mission.update1(helm);
        }
        transition
    }

    /// Runs the active mission's frame update.
    ///
    /// An aborting mission drops to [`ABORTED_PRIORITY`], is scored at that
    /// value in the next arbitration cycle, and keeps receiving frame updates
    /// until that cycle replaces it.
    pub fn update(&mut self, helm: &mut dyn Helm) -> MissionStatus {
        let Some(active) = self.active else {
            return MissionStatus::Continue;
        };
        let slot = &mut self.slots[active];
        let status = slot.mission.update(helm);
        if status == MissionStatus::Abort {
            slot.priority = ABORTED_PRIORITY;
            slot.aborted = true;
        }
        status
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active.map(|i| self.slots[i].mission.name())
    }

    /// Latest score of every mission in registration order.
    pub fn priorities(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.slots.iter().map(|s| (s.mission.name(), s.priority))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
