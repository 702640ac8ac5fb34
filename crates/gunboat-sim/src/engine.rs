//! Simulation engine: the arena's single point of ownership.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued commands,
//! runs all systems at 50 Hz and produces `ArenaSnapshot`s. Completely
//! headless, so a seed fully determines a run.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use gunboat_ai::controllers::registry;
use gunboat_ai::SpawnContext;
use gunboat_core::commands::ArenaCommand;
use gunboat_core::components::{Body, Boat};
use gunboat_core::constants::DEFAULT_POWERUP_COUNT;
use gunboat_core::enums::{AgentKind, ArenaPhase};
use gunboat_core::error::SimError;
use gunboat_core::events::SimEvent;
use gunboat_core::state::ArenaSnapshot;
use gunboat_core::types::SimTime;

use crate::handle::FireOrder;
use crate::pilot::PadSlot;
use crate::scoreboard::Scoreboard;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Boats kept alive, one per entry.
    pub roster: Vec<AgentKind>,
    /// Number of powerups kept on the water.
    pub powerup_count: usize,
    /// Respawn boats and powerups as they are lost.
    pub maintain_population: bool,
    /// Number of virtual controller slots.
    pub pads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            roster: AgentKind::AUTONOMOUS.to_vec(),
            powerup_count: DEFAULT_POWERUP_COUNT,
            maintain_population: true,
            pads: 0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let cells = world_setup::grid_cells().len();
        if self.roster.len() + self.powerup_count > cells {
            return Err(SimError::InvalidConfig(format!(
                "{} boats and {} powerups do not fit in {cells} spawn cells",
                self.roster.len(),
                self.powerup_count
            )));
        }
        let players = self
            .roster
            .iter()
            .filter(|kind| registry::lookup(**kind).is_some_and(|p| p.needs_pad))
            .count();
        if players > self.pads {
            return Err(SimError::InvalidConfig(format!(
                "roster needs {players} pads but only {} are configured",
                self.pads
            )));
        }
        Ok(())
    }
}

/// The simulation engine. Owns the ECS world and all arena state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: ArenaPhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<ArenaCommand>,
    despawn_buffer: Vec<Entity>,
    fire_orders: Vec<FireOrder>,
    events: Vec<SimEvent>,
    scoreboard: Scoreboard,
    /// Last killer of each agent kind.
    grudges: BTreeMap<AgentKind, String>,
    pads: Vec<PadSlot>,
}

impl SimulationEngine {
    /// Create an arena and populate it from the config.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: ArenaPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            fire_orders: Vec::new(),
            events: Vec::new(),
            scoreboard: Scoreboard::default(),
            grudges: BTreeMap::new(),
            pads: vec![PadSlot::default(); config.pads],
            config,
        };

        for _ in 0..engine.config.powerup_count {
            if let Err(err) = engine.spawn_powerup() {
                warn!(%err, "initial powerup not placed");
            }
        }
        let roster = engine.config.roster.clone();
        for kind in roster {
            if let Err(err) = engine.spawn_boat(kind) {
                warn!(%err, "initial boat not placed");
            }
        }
        engine
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ArenaCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ArenaCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == ArenaPhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.scoreboard,
            events,
        )
    }

    pub fn phase(&self) -> ArenaPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Name of the boat that last killed one of `kind`.
    pub fn grudge(&self, kind: AgentKind) -> Option<&str> {
        self.grudges.get(&kind).map(String::as_str)
    }

    /// Spawn a boat of `kind` on a free cell, checking out a pad if it needs one.
    pub fn spawn_boat(&mut self, kind: AgentKind) -> Result<Entity, SimError> {
        let profile = registry::lookup(kind).ok_or(SimError::UnknownAgent(kind))?;
        let pad = if profile.needs_pad {
            let slot = self.pads.iter().position(|p| !p.checked_out).ok_or_else(|| {
                SimError::SpawnFailure {
                    what: format!("{} (no free pad)", profile.name),
                }
            })?;
            Some(slot)
        } else {
            None
        };
        let ctx = SpawnContext {
            grudge: self.grudges.get(&kind).map(String::as_str),
            pad,
        };

        let entity = world_setup::spawn_boat(
            &mut self.world,
            &mut self.rng,
            profile,
            &ctx,
            self.time.elapsed_secs,
            &mut self.fire_orders,
        )?;
        if let Some(slot) = pad.and_then(|i| self.pads.get_mut(i)) {
            slot.checked_out = true;
        }

        let position = self
            .world
            .get::<&Body>(entity)
            .map(|body| body.position)
            .unwrap_or_default();
        info!(boat = profile.name, "boat joined the arena");
        self.events.push(SimEvent::BoatSpawned {
            name: profile.name.to_owned(),
            kind,
            position,
        });
        Ok(entity)
    }

    /// Spawn a powerup of random kind on a free cell.
    pub fn spawn_powerup(&mut self) -> Result<Entity, SimError> {
        world_setup::spawn_powerup(&mut self.world, &mut self.rng)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: ArenaCommand) {
        match command {
            ArenaCommand::SpawnBoat { kind } => {
                if let Err(err) = self.spawn_boat(kind) {
                    warn!(%err, "spawn command failed");
                }
            }
            ArenaCommand::SetPadState { pad, state } => match self.pads.get_mut(pad) {
                Some(slot) => slot.state = state.sanitized(),
                None => debug!(pad, "pad state for unknown slot ignored"),
            },
            ArenaCommand::SelfDestruct { name } => {
                let target = self
                    .world
                    .query_mut::<&mut Boat>()
                    .into_iter()
                    .find(|(_, boat)| boat.name == name && !boat.destroyed);
                match target {
                    Some((_, boat)) => boat.self_destruct = true,
                    None => debug!(%name, "self-destruct for unknown boat ignored"),
                }
            }
            ArenaCommand::Pause => {
                if self.phase == ArenaPhase::Running {
                    self.phase = ArenaPhase::Paused;
                }
            }
            ArenaCommand::Resume => {
                if self.phase == ArenaPhase::Paused {
                    self.phase = ArenaPhase::Running;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;

        // 1. Controls: pad input, then forces from persisted commands
        systems::decision::deliver_input(&mut self.world, &self.pads);
        systems::physics::apply_controls(&mut self.world);
        // 2. Body integration
        systems::physics::integrate(&mut self.world, &mut self.scoreboard);
        // 3. Gun and radar servos
        systems::sensors::step_servos(&mut self.world);
        // 4. Radar sweep queries and contact delivery
        systems::sensors::deliver_contacts(&mut self.world, now);
        // 5. Decision (1 Hz work when due, then frame update)
        systems::decision::run(&mut self.world, &self.time, &mut self.fire_orders);
        // 6. Projectile launch
        systems::ballistics::spawn_projectiles(
            &mut self.world,
            &mut self.rng,
            &mut self.fire_orders,
            now,
            &mut self.scoreboard,
            &mut self.events,
        );
        // 7. Projectile flight and collisions
        systems::ballistics::run(
            &mut self.world,
            now,
            &mut self.scoreboard,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 8. Pickup touches
        systems::pickups::run(
            &mut self.world,
            &mut self.scoreboard,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 9. Cleanup (dead boats, consumed projectiles and pickups)
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.scoreboard,
            &mut self.events,
            &mut self.grudges,
            &mut self.pads,
        );
        // 10. Population upkeep
        if self.config.maintain_population {
            self.restore_population();
        }
    }

    /// Spawn at most one missing powerup and every missing roster boat.
    fn restore_population(&mut self) {
        let deficit = systems::population::deficit(
            &self.world,
            &self.config.roster,
            self.config.powerup_count,
        );
        if deficit.powerups > 0 {
            if let Err(err) = self.spawn_powerup() {
                warn!(%err, "powerup respawn deferred");
            }
        }
        for kind in deficit.boats {
            if let Err(err) = self.spawn_boat(kind) {
                warn!(%err, "boat respawn deferred");
            }
        }
    }
}

#[cfg(test)]
impl SimulationEngine {
    /// Spawn a boat at an exact pose, bypassing cell placement.
    pub fn spawn_boat_at(&mut self, kind: AgentKind, position: glam::DVec2, heading: f64) -> Entity {
        let profile = registry::lookup(kind).expect("registered kind");
        world_setup::spawn_boat_at(
            &mut self.world,
            profile,
            &SpawnContext::default(),
            position,
            heading,
            self.time.elapsed_secs,
            &mut self.fire_orders,
        )
    }

    pub fn spawn_powerup_at(
        &mut self,
        kind: gunboat_core::enums::PowerupKind,
        position: glam::DVec2,
    ) -> Entity {
        world_setup::spawn_powerup_at(&mut self.world, kind, position)
    }

    /// Drive one boat's helm directly, as its controller would this tick.
    pub fn with_helm<R>(
        &mut self,
        entity: Entity,
        f: impl FnOnce(&mut crate::handle::BoatHandle<'_>) -> R,
    ) -> Option<R> {
        let now = self.time.elapsed_secs;
        crate::handle::with_pilot(&mut self.world, entity, now, &mut self.fire_orders, |_, h| f(h))
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn pad_checked_out(&self, slot: usize) -> bool {
        self.pads.get(slot).is_some_and(|p| p.checked_out)
    }
}
