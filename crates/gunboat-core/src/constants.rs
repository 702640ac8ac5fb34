//! Simulation constants and tuning parameters.

/// Physics tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Edge length of a spawn placement cell (m).
pub const GRID_CELL_SIZE: f64 = 30.0;

/// Cell centres are laid out out to this distance from the origin on each axis (m).
pub const GRID_EXTENT: f64 = 100.0;

/// Position jitter applied inside a spawn cell for boats (m).
pub const BOAT_SPAWN_JITTER: f64 = 8.0;

/// Position jitter applied inside a spawn cell for powerups (m).
pub const POWERUP_SPAWN_JITTER: f64 = 12.0;

/// Default number of powerups kept on the water.
pub const DEFAULT_POWERUP_COUNT: usize = 20;

// --- Boat hull ---

pub const BOAT_HEALTH: f64 = 20.0;
pub const BOAT_ENERGY: f64 = 20.0;

/// Hull mass (kg).
pub const BOAT_MASS: f64 = 1000.0;

/// Yaw moment of inertia (kg·m²).
pub const BOAT_YAW_INERTIA: f64 = 8000.0;

/// Linear drag coefficient (velocity loses `drag * dt` of itself per tick).
pub const BOAT_LINEAR_DRAG: f64 = 5.0;

/// Angular drag coefficient.
pub const BOAT_ANGULAR_DRAG: f64 = 5.0;

/// Collision radius of a hull (m).
pub const BOAT_RADIUS: f64 = 5.0;

/// Maximum rudder torque (N·m).
pub const MAX_TORQUE: f64 = 60_000.0;

/// Maximum forward thrust (N).
pub const MAX_FORWARD_THRUST: f64 = 80_000.0;

/// Maximum reverse thrust (N).
pub const MAX_REVERSE_THRUST: f64 = 40_000.0;

/// Maximum lateral thrust (N).
pub const MAX_LATERAL_THRUST: f64 = 20_000.0;

/// Proportional gain from heading error (degrees) to rudder.
pub const HEADING_GAIN: f64 = 0.1;

// --- Gun ---

/// Turret offset ahead of the hull centre (m).
pub const GUN_OFFSET: f64 = 2.0;

/// Barrel length from turret pivot to muzzle (m).
pub const BARREL_LENGTH: f64 = 3.0;

/// Commanded gun azimuth is clamped to ± this value (degrees).
pub const GUN_AZIMUTH_LIMIT: f64 = 140.0;

/// Gun servo smoothing time (s).
pub const GUN_SMOOTH_TIME: f64 = 0.1;

/// Gun servo maximum slew rate (deg/s).
pub const GUN_MAX_SPEED: f64 = 120.0;

/// Main gun round energy bounds.
pub const FIRE_ENERGY_MIN: f64 = 0.1;
pub const FIRE_ENERGY_MAX: f64 = 5.0;

/// Main gun cooldown is `FIRE_BASE_DELAY * sqrt(energy)` seconds.
pub const FIRE_BASE_DELAY: f64 = 0.5;

/// Shotgun fragment count bounds.
pub const SHOTGUN_MIN_FRAGMENTS: u32 = 5;
pub const SHOTGUN_MAX_FRAGMENTS: u32 = 15;

/// Energy carried by each shotgun fragment.
pub const SHOTGUN_FRAGMENT_ENERGY: f64 = 0.2;

/// Shotgun cooldown per fragment (s).
pub const SHOTGUN_DELAY_PER_FRAGMENT: f64 = 0.1;

/// Standard deviation of the per-fragment angular spread (degrees).
pub const SHOTGUN_SPREAD_DEG: f64 = 3.0;

// --- Radar ---

/// Radar mast offset behind the hull centre (m).
pub const RADAR_OFFSET: f64 = -1.0;

/// Radar range constant: range = K / max(1, |angular velocity|).
pub const RADAR_RANGE_K: f64 = 36_000.0;

pub const RADAR_MIN_RANGE: f64 = 25.0;
pub const RADAR_MAX_RANGE: f64 = 2_500.0;

/// Maximum radar slew rate (deg/s).
pub const RADAR_MAX_ANGULAR_VELOCITY: f64 = 360.0;

/// Radar servo smoothing time (s).
pub const RADAR_SMOOTH_TIME: f64 = 0.05;

/// Degrees per second requested per rpm of rotation speed.
pub const RADAR_DEG_PER_RPM: f64 = 6.0;

/// How far ahead the continuous sweep chases its own tail (degrees).
pub const RADAR_SWEEP_LEAD: f64 = 179.0;

/// Slice widening applied on each side of a sweep (degrees).
pub const RADAR_SWEEP_MARGIN: f64 = 3.0;

// --- Projectiles ---

/// Muzzle velocity relative to the firing boat (m/s).
pub const MUZZLE_VELOCITY: f64 = 100.0;

/// Projectile lifetime (s).
pub const PROJECTILE_LIFETIME: f64 = 10.0;

/// Projectile collision radius (m).
pub const PROJECTILE_RADIUS: f64 = 0.25;

/// Impulse transferred to a struck hull per unit of round energy (N·s).
pub const PROJECTILE_IMPULSE_PER_ENERGY: f64 = 100.0;

// --- Combat ---

/// Attacker energy reward per unit of health actually removed.
pub const DAMAGE_REWARD_FACTOR: f64 = 1.5;

// --- Powerups ---

pub const POWERUP_HEALTH: f64 = 5.0;

/// Resource offered to the collector.
pub const POWERUP_AMOUNT: f64 = 10.0;

/// Collision radius of a powerup crate (m).
pub const POWERUP_RADIUS: f64 = 1.5;

// --- Contact staleness ---

/// Default age after which a boat contact is dropped (s).
pub const BOAT_CONTACT_STALE_SECS: f64 = 3.0;

/// Default age after which a powerup contact is dropped (s).
pub const POWERUP_CONTACT_STALE_SECS: f64 = 15.0;
