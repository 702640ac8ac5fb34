//! Component binding a boat entity to its controller, and the pad slots
//! that player-driven controllers check out.

use gunboat_ai::Controller;
use gunboat_core::commands::PadState;

/// The controller driving a boat. Lives on the boat entity and is dropped with it.
pub struct Pilot {
    pub controller: Box<dyn Controller>,
}

impl Pilot {
    pub fn new(controller: Box<dyn Controller>) -> Self {
        Self { controller }
    }
}

/// One virtual controller. Held by at most one pad-driven boat at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PadSlot {
    pub state: PadState,
    pub checked_out: bool,
}
