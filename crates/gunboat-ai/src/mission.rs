//! The mission contract.

use crate::helm::Helm;

/// Outcome of a mission's frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStatus {
    Continue,
    /// The mission gives up its priority until the next arbitration cycle.
    Abort,
}

/// A self-contained behaviour with a desirability score.
///
/// The arbitrator scores every mission once per second and runs the winner
/// every frame.
pub trait Mission: Send + Sync {
    fn name(&self) -> &'static str;

    /// Desirability given the boat's current sensed state. Higher wins.
    /// May refresh mission-local target selection.
    fn compute_priority(&mut self, helm: &dyn Helm) -> f64;

    /// Issues commands while this mission is active.
    fn update(&mut self, helm: &mut dyn Helm) -> MissionStatus;

    /// Low-rate bookkeeping while active.
    fn update1(&mut self, _helm: &mut dyn Helm) {}

    fn on_acquired_priority(&mut self, _helm: &mut dyn Helm) {}

    fn on_lost_priority(&mut self, _helm: &mut dyn Helm) {}
}
