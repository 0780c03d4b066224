//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives here. Presentation code reads a
//! [`Snapshot`] instead of touching the state directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::{Boundary, Court};
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting at the start spot, player adjusting angle and charging
    #[default]
    Aiming,
    /// Ball in flight (or rolling) after release
    Shooting,
    /// Score celebration, counting down before the next shot
    Celebrating,
}

/// How a basket was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoreKind {
    /// Ball dropped through the rim from above
    #[default]
    Fair,
    /// Ball went up through the rim from below
    Cheat,
}

/// Tunable physics inputs, read every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Restitution coefficient applied on every boundary bounce
    pub bounciness: f32,
    /// Ground friction coefficient (scaled by gravity)
    pub friction: f32,
    /// Global speed multiplier for integration
    pub time_scale: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            bounciness: DEFAULT_BOUNCINESS,
            friction: DEFAULT_FRICTION,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

/// The basketball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::start_position(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Resting spot on the floor where every shot starts
    pub fn start_position() -> Vec2 {
        Vec2::new(BALL_START_X, BALL_START_Y)
    }

    /// Put the ball back on its start spot, motionless
    pub fn reset(&mut self) {
        self.pos = Self::start_position();
        self.vel = Vec2::ZERO;
    }
}

/// Axis-aligned rectangle the hoop may relocate into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for HoopBounds {
    fn default() -> Self {
        Self {
            min: Vec2::new(HOOP_MIN_X, HOOP_MIN_Y),
            max: Vec2::new(HOOP_MAX_X, HOOP_MAX_Y),
        }
    }
}

impl HoopBounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The hoop: a rim with a backboard on its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    /// Rim center
    pub pos: Vec2,
    pub rim_width: f32,
    /// Set once per pass so the same flight cannot score twice
    pub scored: bool,
}

impl Default for Hoop {
    fn default() -> Self {
        Self {
            pos: Vec2::new(HOOP_START_X, HOOP_START_Y),
            rim_width: RIM_WIDTH,
            scored: false,
        }
    }
}

impl Hoop {
    pub fn rim_left(&self) -> f32 {
        self.pos.x - self.rim_width / 2.0
    }

    pub fn rim_right(&self) -> f32 {
        self.pos.x + self.rim_width / 2.0
    }

    /// Jump to a uniformly random spot inside `bounds` and re-arm scoring
    pub fn move_to_random<R: Rng>(&mut self, rng: &mut R, bounds: &HoopBounds) {
        self.pos = Vec2::new(
            random_in(rng, bounds.min.x, bounds.max.x),
            random_in(rng, bounds.min.y, bounds.max.y),
        );
        self.scored = false;
    }
}

/// `min + u * (max - min)` for `u` in [0, 1); tolerates an empty range
fn random_in<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Power bar band, used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerLevel {
    Low,
    Medium,
    High,
}

impl PowerLevel {
    pub fn from_power(power: f32) -> Self {
        if power >= MAX_POWER * 0.8 {
            PowerLevel::High
        } else if power >= MAX_POWER * 0.5 {
            PowerLevel::Medium
        } else {
            PowerLevel::Low
        }
    }
}

/// Shot parameters. Angle and power are only writable through clamping setters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    angle_deg: f32,
    power: f32,
    /// Charge input is held
    pub charging: bool,
}

impl Default for Aim {
    fn default() -> Self {
        Self {
            angle_deg: DEFAULT_ANGLE,
            power: 0.0,
            charging: false,
        }
    }
}

impl Aim {
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle_deg = degrees.clamp(MIN_ANGLE, MAX_ANGLE);
    }

    pub fn set_power(&mut self, power: f32) {
        self.power = power.clamp(0.0, MAX_POWER);
    }

    /// Rotate the aim by `delta` degrees (positive = steeper)
    pub fn turn(&mut self, delta: f32) {
        self.set_angle(self.angle_deg + delta);
    }

    /// Add one charge increment
    pub fn charge(&mut self) {
        self.set_power(self.power + POWER_STEP);
    }

    /// Launch velocity for the current angle and power
    pub fn launch_velocity(&self) -> Vec2 {
        crate::direction_from_degrees(self.angle_deg) * self.power
    }

    /// Power as a fraction of the maximum (0.0 - 1.0)
    pub fn power_fraction(&self) -> f32 {
        self.power / MAX_POWER
    }

    pub fn power_level(&self) -> PowerLevel {
        PowerLevel::from_power(self.power)
    }

    /// Drop any in-progress charge
    pub fn cancel_charge(&mut self) {
        self.charging = false;
        self.power = 0.0;
    }
}

/// Celebration countdown and the kind of basket being celebrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Celebration {
    pub ticks_left: u32,
    pub kind: ScoreKind,
}

impl Celebration {
    pub fn start(kind: ScoreKind) -> Self {
        Self {
            ticks_left: CELEBRATION_TICKS,
            kind,
        }
    }

    /// Blink state for the banner/clown. Always on with reduced motion.
    pub fn is_visible(&self, reduced_motion: bool) -> bool {
        reduced_motion || (self.ticks_left / CELEBRATION_BLINK_TICKS).is_multiple_of(2)
    }
}

/// Things that happened during a tick (cleared at the start of every tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotReleased { velocity: Vec2 },
    Bounced(Boundary),
    Scored(ScoreKind),
    HoopMoved { pos: Vec2 },
    BallReset,
}

/// Read-only view of the state for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub ball_radius: f32,
    pub hoop_pos: Vec2,
    pub hoop_rim_width: f32,
    pub hoop_scored: bool,
    pub phase: GamePhase,
    pub angle_deg: f32,
    pub power: f32,
    pub charging: bool,
    pub score: u32,
    pub celebration_ticks: u32,
    pub celebration_kind: ScoreKind,
}

impl Snapshot {
    pub fn celebration(&self) -> Celebration {
        Celebration {
            ticks_left: self.celebration_ticks,
            kind: self.celebration_kind,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub hoop: Hoop,
    pub hoop_bounds: HoopBounds,
    pub aim: Aim,
    pub phase: GamePhase,
    /// Only meaningful while `phase == Celebrating`
    pub celebration: Celebration,
    pub physics: PhysicsParams,
    pub court: Court,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Hoop placement RNG
    pub(crate) rng: Pcg32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// New game with hoop placement seeded from entropy
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// New game with a fixed hoop placement sequence (tests, demos)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            ball: Ball::default(),
            hoop: Hoop::default(),
            hoop_bounds: HoopBounds::default(),
            aim: Aim::default(),
            phase: GamePhase::Aiming,
            celebration: Celebration::default(),
            physics: PhysicsParams::default(),
            court: Court::default(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Return the ball to the start spot and go back to aiming.
    /// Also drops any charge and re-arms the hoop.
    pub fn reset_ball(&mut self) {
        self.ball.reset();
        self.aim.cancel_charge();
        self.hoop.scored = false;
        self.phase = GamePhase::Aiming;
        self.events.push(GameEvent::BallReset);
    }

    /// Move the hoop somewhere new inside its bounds
    pub fn relocate_hoop(&mut self) {
        self.hoop.move_to_random(&mut self.rng, &self.hoop_bounds);
        self.events.push(GameEvent::HoopMoved { pos: self.hoop.pos });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball_pos: self.ball.pos,
            ball_vel: self.ball.vel,
            ball_radius: self.ball.radius,
            hoop_pos: self.hoop.pos,
            hoop_rim_width: self.hoop.rim_width,
            hoop_scored: self.hoop.scored,
            phase: self.phase,
            angle_deg: self.aim.angle_deg(),
            power: self.aim.power(),
            charging: self.aim.charging,
            score: self.score,
            celebration_ticks: self.celebration.ticks_left,
            celebration_kind: self.celebration.kind,
        }
    }
}
