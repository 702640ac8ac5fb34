//! Population upkeep: how many boats and powerups are missing.

use std::collections::BTreeMap;

use hecs::World;

use gunboat_core::components::{Boat, Pickup};
use gunboat_core::enums::AgentKind;

/// Entities to spawn this tick to restore the configured population.
#[derive(Debug, Default, PartialEq)]
pub struct Deficit {
    /// One entry per missing boat, in roster order.
    pub boats: Vec<AgentKind>,
    pub powerups: usize,
}

/// Compare live entities against the roster (each entry is one boat) and
/// the powerup target.
pub fn deficit(world: &World, roster: &[AgentKind], powerup_count: usize) -> Deficit {
    let mut live: BTreeMap<AgentKind, usize> = BTreeMap::new();
    for (_entity, boat) in world.query::<&Boat>().iter() {
        *live.entry(boat.kind).or_default() += 1;
    }

    let mut boats = Vec::new();
    for kind in roster {
        match live.get_mut(kind) {
            Some(count) if *count > 0 => *count -= 1,
            _ => boats.push(*kind),
        }
    }

    let powerups = powerup_count.saturating_sub(world.query::<&Pickup>().iter().count());
    Deficit { boats, powerups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use gunboat_core::enums::PowerupKind;

    use crate::world_setup::spawn_powerup_at;

    #[test]
    fn test_deficit_counts_missing_entries() {
        let mut world = World::new();
        spawn_powerup_at(&mut world, PowerupKind::Energy, DVec2::ZERO);
        let roster = [AgentKind::Hunter, AgentKind::Hunter, AgentKind::Spin];
        let d = deficit(&world, &roster, 3);
        assert_eq!(d.boats, roster.to_vec());
        assert_eq!(d.powerups, 2);
    }
}
