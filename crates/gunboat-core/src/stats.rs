//! Cumulative per-agent-kind statistics.
//!
//! Averages divide by `deaths + 1` so they stay meaningful before the first death.

use serde::{Deserialize, Serialize};

use crate::math::safe_divide;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub kills: u32,
    pub deaths: u32,
    pub powerups_killed: u32,
    pub powerups_collected: u32,
    pub shots: u32,
    pub shot_energy: f64,
    pub damage_sustained: f64,
    pub damage_dealt_to_boats: f64,
    pub damage_dealt_to_powerups: f64,
    pub distance_travelled: f64,
}

impl AgentStats {
    pub fn record_shot(&mut self, energy: f64) {
        self.shots += 1;
        self.shot_energy += energy;
    }

    pub fn record_distance(&mut self, distance: f64) {
        if distance.is_finite() {
            self.distance_travelled += distance;
        }
    }

    /// Attacker side of a boat hit.
    pub fn record_hit_dealt(&mut self, damage: f64, killed: bool) {
        self.damage_dealt_to_boats += damage;
        if killed {
            self.kills += 1;
        }
    }

    /// Victim side of a boat hit.
    pub fn record_hit_taken(&mut self, damage: f64, killed: bool) {
        self.damage_sustained += damage;
        if killed {
            self.deaths += 1;
        }
    }

    pub fn record_powerup_hit(&mut self, damage: f64, destroyed: bool) {
        self.damage_dealt_to_powerups += damage;
        if destroyed {
            self.powerups_killed += 1;
        }
    }

    pub fn record_powerup_collected(&mut self) {
        self.powerups_collected += 1;
    }

    /// A death without a killer, e.g. self-destruct.
    pub fn record_death(&mut self) {
        self.deaths += 1;
    }

    fn lives(&self) -> f64 {
        f64::from(self.deaths) + 1.0
    }

    pub fn average_kills(&self) -> f64 {
        f64::from(self.kills) / self.lives()
    }

    pub fn average_powerups_killed(&self) -> f64 {
        f64::from(self.powerups_killed) / self.lives()
    }

    pub fn average_powerups_collected(&self) -> f64 {
        f64::from(self.powerups_collected) / self.lives()
    }

    pub fn average_damage_sustained(&self) -> f64 {
        self.damage_sustained / self.lives()
    }

    pub fn average_damage_dealt_to_boats(&self) -> f64 {
        self.damage_dealt_to_boats / self.lives()
    }

    pub fn average_damage_dealt_to_powerups(&self) -> f64 {
        self.damage_dealt_to_powerups / self.lives()
    }

    pub fn average_distance_travelled(&self) -> f64 {
        self.distance_travelled / self.lives()
    }

    /// Mean energy per shot; falls back to the total when no shot was fired.
    pub fn average_shot_energy(&self) -> f64 {
        safe_divide(self.shot_energy, f64::from(self.shots), self.shot_energy)
    }

    /// Shots per kill; falls back to the shot count when nothing was killed.
    pub fn average_shots_per_kill(&self) -> f64 {
        let shots = f64::from(self.shots);
        safe_divide(shots, f64::from(self.kills), shots)
    }
}
