//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! the host builds a `TickInput`, calls `tick`, and reads a `Snapshot`.

pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;

pub use physics::{Boundary, Contacts, Court, integrate, resolve_boundaries, step_ball};
pub use scoring::{check_score, in_rim_zone};
pub use state::{
    Aim, Ball, Celebration, GameEvent, GamePhase, GameState, Hoop, HoopBounds, PhysicsParams,
    PowerLevel, ScoreKind, Snapshot,
};
pub use tick::{TickInput, step, tick};
