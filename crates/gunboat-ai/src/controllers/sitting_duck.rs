use gunboat_core::enums::AgentKind;

use super::Controller;
use crate::error::ControlFault;
use crate::helm::Helm;

/// Issues no commands at all. Useful as target practice.
pub struct SittingDuckController;

impl Controller for SittingDuckController {
    fn kind(&self) -> AgentKind {
        AgentKind::SittingDuck
    }

    fn update(&mut self, _helm: &mut dyn Helm) -> Result<(), ControlFault> {
        Ok(())
    }
}
