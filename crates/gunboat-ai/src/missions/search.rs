//! Search: periodic radar sweeps at increasing range.
//!
//! A fast sweep sees little; slower sweeps reach further. The mission walks
//! Short -> Medium -> Long, then alternates Medium and Long, deferring the
//! next search a little further each step.

use gunboat_core::math::smooth_clamp;

use crate::helm::Helm;
use crate::mission::{Mission, MissionStatus};

/// Weight of the loneliness term, which is largest with no hostile boats in
/// sight and falls to zero as the count reaches `LONELINESS_SATURATION`.
const LONELINESS_WEIGHT: f64 = 0.25;
/// Hostile boat count at which the boat no longer feels alone.
const LONELINESS_SATURATION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchRange {
    Short,
    Medium,
    Long,
}

impl SearchRange {
    /// Radar request for this range band.
    pub fn radar_rpm(self) -> f64 {
        match self {
            SearchRange::Short => 60.0,
            SearchRange::Medium => 30.0,
            SearchRange::Long => 5.0,
        }
    }

    /// Dwell before moving to the next band (s).
    fn dwell(self) -> f64 {
        match self {
            SearchRange::Short => 1.2,
            SearchRange::Medium => 4.2,
            SearchRange::Long => 12.2,
        }
    }

    /// Next band and how long to defer the next search.
    fn next(self) -> (SearchRange, f64) {
        match self {
            SearchRange::Short => (SearchRange::Medium, 10.0),
            SearchRange::Medium => (SearchRange::Long, 20.0),
            SearchRange::Long => (SearchRange::Medium, 20.0),
        }
    }
}

pub struct SearchMission {
    range: SearchRange,
    started_at: f64,
    next_search_at: f64,
}

impl Default for SearchMission {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchMission {
    pub fn new() -> Self {
        Self {
            range: SearchRange::Short,
            started_at: 0.0,
            next_search_at: 0.0,
        }
    }

    pub fn range(&self) -> SearchRange {
        self.range
    }

    pub fn next_search_at(&self) -> f64 {
        self.next_search_at
    }

    fn set_range(&mut self, helm: &mut dyn Helm, range: SearchRange) {
        self.range = range;
        self.started_at = helm.now();
        helm.set_radar_rotation_speed(range.radar_rpm());
        // Turning in place keeps the whole horizon moving past the mast.
        helm.set_rudder(1.0);
        helm.set_gun_azimuth(0.0);
        helm.set_thrust(0.0, 0.0);
    }
}

impl Mission for SearchMission {
    fn name(&self) -> &'static str {
        "Search"
    }

    fn compute_priority(&mut self, helm: &dyn Helm) -> f64 {
        let idle = smooth_clamp((helm.now() - self.next_search_at) / 10.0 + 0.5);
        let own_faction = helm.faction();
        let hostiles = helm
            .contacts()
            .valid()
            .filter(|c| c.kind.is_boat() && c.is_hostile_to(own_faction))
            .count()
            .min(LONELINESS_SATURATION);
        let loneliness = 1.0 - hostiles as f64 / LONELINESS_SATURATION as f64;
        idle + LONELINESS_WEIGHT * loneliness
    }

    fn update(&mut self, helm: &mut dyn Helm) -> MissionStatus {
        let now = helm.now();
        if now - self.started_at > self.range.dwell() {
            let (next, defer) = self.range.next();
            self.next_search_at = now + defer;
            self.set_range(helm, next);
        }
        MissionStatus::Continue
    }

    fn on_acquired_priority(&mut self, helm: &mut dyn Helm) {
        self.set_range(helm, SearchRange::Short);
    }
}
