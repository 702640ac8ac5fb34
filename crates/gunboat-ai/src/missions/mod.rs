//! The mission variants flown by mission-arbitrated boats.

pub mod hunt;
pub mod resupply;
pub mod search;

pub use hunt::HuntMission;
pub use resupply::ResupplyMission;
pub use search::SearchMission;

use glam::DVec2;

use crate::helm::Helm;

/// How far ahead of the bow target searches are centred (m).
const SEARCH_ORIGIN_LEAD: f64 = 50.0;

/// Point ahead of the bow used to rank candidates, favouring what lies in front.
fn search_origin(helm: &dyn Helm) -> DVec2 {
    helm.position() + helm.forward() * SEARCH_ORIGIN_LEAD
}
