//! Ball integration and boundary collision response
//!
//! The court is a box: floor, ceiling and two walls. Each tick the ball gets
//! gravity, moves, then is pushed back out of any boundary it crossed with its
//! velocity reflected and damped by the bounciness.

use serde::{Deserialize, Serialize};

use super::state::{Ball, PhysicsParams};
use crate::consts::*;

/// One side of the court box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Ground,
    LeftWall,
    RightWall,
    Ceiling,
}

/// Inner surfaces of the court box, in court coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Court {
    /// Top of the floor
    pub ground: f32,
    /// Underside of the ceiling
    pub ceiling: f32,
    /// Inner face of the left wall
    pub left: f32,
    /// Inner face of the right wall
    pub right: f32,
}

impl Default for Court {
    fn default() -> Self {
        Self {
            ground: GROUND_Y,
            ceiling: CEILING_Y - CEILING_HEIGHT,
            left: LEFT_WALL_X + WALL_WIDTH,
            right: RIGHT_WALL_X,
        }
    }
}

/// Which boundaries the ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub ground: bool,
    pub left_wall: bool,
    pub right_wall: bool,
    pub ceiling: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.ground || self.left_wall || self.right_wall || self.ceiling
    }

    /// Touched boundaries in resolution order
    pub fn boundaries(&self) -> impl Iterator<Item = Boundary> {
        [
            (self.ground, Boundary::Ground),
            (self.left_wall, Boundary::LeftWall),
            (self.right_wall, Boundary::RightWall),
            (self.ceiling, Boundary::Ceiling),
        ]
        .into_iter()
        .filter_map(|(hit, b)| hit.then_some(b))
    }
}

/// Semi-implicit Euler step: velocity first, then position
#[inline]
pub fn integrate(ball: &mut Ball, params: &PhysicsParams) {
    ball.vel.y -= params.gravity * params.time_scale;
    ball.pos += ball.vel * params.time_scale;
}

/// Push the ball back inside the court and bounce it.
///
/// All four checks run every call, in the order ground, left wall, right
/// wall, ceiling, so a corner hit resolves both axes in one tick.
pub fn resolve_boundaries(ball: &mut Ball, court: &Court, params: &PhysicsParams) -> Contacts {
    let mut contacts = Contacts::default();
    let r = ball.radius;

    if ball.pos.y - r <= court.ground {
        ball.pos.y = court.ground + r;
        ball.vel.y = -ball.vel.y * params.bounciness;
        ball.vel.x = apply_friction(ball.vel.x, params.friction * params.gravity);
        contacts.ground = true;
    }

    if ball.pos.x - r <= court.left {
        ball.pos.x = court.left + r;
        ball.vel.x = -ball.vel.x * params.bounciness;
        contacts.left_wall = true;
    }

    if ball.pos.x + r >= court.right {
        ball.pos.x = court.right - r;
        ball.vel.x = -ball.vel.x * params.bounciness;
        contacts.right_wall = true;
    }

    if ball.pos.y + r >= court.ceiling {
        ball.pos.y = court.ceiling - r;
        ball.vel.y = -ball.vel.y * params.bounciness;
        contacts.ceiling = true;
    }

    contacts
}

/// Full physics tick for the ball
pub fn step_ball(ball: &mut Ball, court: &Court, params: &PhysicsParams) -> Contacts {
    integrate(ball, params);
    resolve_boundaries(ball, court, params)
}

/// Slow `vx` toward zero by `amount` without crossing zero
#[inline]
pub fn apply_friction(vx: f32, amount: f32) -> f32 {
    if vx > 0.0 {
        (vx - amount).max(0.0)
    } else if vx < 0.0 {
        (vx + amount).min(0.0)
    } else {
        vx
    }
}
