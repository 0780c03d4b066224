//! Hoop Shot - A single-screen basketball shooting game
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, boundary collisions, shot/score state machine)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Tunable defaults and presentation preferences
//! - `ui`: Tuning widgets (sliders, number fields)

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Court coordinates have their origin at the bottom-left corner of the
/// canvas with y growing upward.
pub mod consts {
    /// Simulation rate used by the web host's fixed-step accumulator
    pub const TICKS_PER_SECOND: f32 = 60.0;
    pub const TICK_DT: f32 = 1.0 / TICKS_PER_SECOND;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas dimensions
    pub const COURT_WIDTH: f32 = 1280.0;
    pub const COURT_HEIGHT: f32 = 720.0;

    /// Floor surface (top of the court floor)
    pub const GROUND_Y: f32 = 100.0;
    pub const CEILING_Y: f32 = COURT_HEIGHT;
    pub const CEILING_HEIGHT: f32 = 20.0;
    pub const WALL_WIDTH: f32 = 20.0;
    pub const LEFT_WALL_X: f32 = 0.0;
    pub const RIGHT_WALL_X: f32 = 1200.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_START_X: f32 = 100.0;
    pub const BALL_START_Y: f32 = GROUND_Y + BALL_RADIUS;

    /// Physics defaults (per tick, not per second)
    pub const DEFAULT_GRAVITY: f32 = 0.5;
    pub const DEFAULT_BOUNCINESS: f32 = 0.5;
    pub const DEFAULT_FRICTION: f32 = 0.1;
    pub const DEFAULT_TIME_SCALE: f32 = 1.0;

    /// Hoop geometry
    pub const HOOP_START_X: f32 = 800.0;
    pub const HOOP_START_Y: f32 = 400.0;
    pub const RIM_WIDTH: f32 = 60.0;
    pub const RIM_THICKNESS: f32 = 5.0;
    pub const BACKBOARD_WIDTH: f32 = 10.0;
    pub const BACKBOARD_HEIGHT: f32 = 80.0;
    pub const NET_DEPTH: f32 = 30.0;
    /// Extra vertical slack when checking whether the ball is at rim height
    pub const RIM_CATCH_MARGIN: f32 = 5.0;

    /// Rectangle the hoop relocates into after a fair score
    pub const HOOP_MIN_X: f32 = 300.0;
    pub const HOOP_MAX_X: f32 = 1100.0;
    pub const HOOP_MIN_Y: f32 = 250.0;
    pub const HOOP_MAX_Y: f32 = 550.0;

    /// Aim limits (degrees)
    pub const MIN_ANGLE: f32 = 10.0;
    pub const MAX_ANGLE: f32 = 90.0;
    pub const DEFAULT_ANGLE: f32 = 60.0;
    pub const ANGLE_STEP: f32 = 1.0;

    /// Charge limits
    pub const MAX_POWER: f32 = 25.0;
    pub const POWER_STEP: f32 = 0.5;

    /// Celebration length in ticks (unaffected by time scale)
    pub const CELEBRATION_TICKS: u32 = 90;
    /// Ticks per on/off phase of the celebration blink
    pub const CELEBRATION_BLINK_TICKS: u32 = 5;
}

/// Unit vector for an angle given in degrees (0° = +x, 90° = straight up)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
