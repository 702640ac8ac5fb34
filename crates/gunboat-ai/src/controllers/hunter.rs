//! Mission-arbitrated agent: Hunt, Refuel, Repair and Search.

use gunboat_core::enums::AgentKind;

use super::Controller;
use crate::arbitrator::MissionArbitrator;
use crate::error::ControlFault;
use crate::helm::Helm;
use crate::missions::{HuntMission, ResupplyMission, SearchMission};

pub struct HunterController {
    arbitrator: MissionArbitrator,
}

impl Default for HunterController {
    fn default() -> Self {
        Self::new()
    }
}

impl HunterController {
    pub fn new() -> Self {
        Self {
            arbitrator: MissionArbitrator::new(vec![
                Box::new(HuntMission::new()),
                Box::new(ResupplyMission::refuel()),
                Box::new(ResupplyMission::repair()),
                Box::new(SearchMission::new()),
            ]),
        }
    }

    pub fn arbitrator(&self) -> &MissionArbitrator {
        &self.arbitrator
    }
}

impl Controller for HunterController {
    fn kind(&self) -> AgentKind {
        AgentKind::Hunter
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        self.arbitrator.update(helm);
        Ok(())
    }

    fn update1(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        self.arbitrator.arbitrate(helm);
        Ok(())
    }

    fn active_mission(&self) -> Option<&'static str> {
        self.arbitrator.active_name()
    }
}
