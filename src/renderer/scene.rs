//! Scene building: turns a simulation snapshot into a triangle list
//!
//! Pure function of the snapshot and settings, so it can be tested without a
//! GPU. Text (score, angle/power readout, "WELL DONE!") is drawn by the HUD.

use glam::Vec2;
use std::f32::consts::PI;

use super::shapes::{arc_band, circle, line, rect, rect_outline, ring};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, PowerLevel, ScoreKind, Snapshot};

const CIRCLE_SEGMENTS: u32 = 32;

/// Power bar placement (bottom-left of the frame, court coordinates)
pub const POWER_BAR_POS: Vec2 = Vec2::new(30.0, 50.0);
pub const POWER_BAR_SIZE: Vec2 = Vec2::new(150.0, 20.0);

/// Where the clown face is drawn for a cheat basket
pub const CLOWN_CENTER: Vec2 = Vec2::new(COURT_WIDTH / 2.0, COURT_HEIGHT / 2.0);

/// Build all vertices for one frame, back to front
pub fn build_scene(snapshot: &Snapshot, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    court(&mut vertices);
    hoop(&mut vertices, snapshot);

    if snapshot.phase == GamePhase::Aiming && settings.show_aim_guide {
        aim_arrow(&mut vertices, snapshot);
        power_bar(&mut vertices, snapshot.power);
    }

    ball(&mut vertices, snapshot);

    if snapshot.phase == GamePhase::Celebrating {
        let celebration = snapshot.celebration();
        if celebration.kind == ScoreKind::Cheat && celebration.is_visible(settings.reduced_motion)
        {
            clown_face(&mut vertices, CLOWN_CENTER);
        }
    }

    vertices
}

fn court(out: &mut Vec<Vertex>) {
    let wall_height = COURT_HEIGHT - GROUND_Y;

    out.extend(rect(Vec2::ZERO, Vec2::new(COURT_WIDTH, GROUND_Y), colors::FLOOR));
    out.extend(rect(
        Vec2::new(0.0, CEILING_Y - CEILING_HEIGHT),
        Vec2::new(COURT_WIDTH, CEILING_HEIGHT),
        colors::CEILING,
    ));
    out.extend(rect(
        Vec2::new(LEFT_WALL_X, GROUND_Y),
        Vec2::new(WALL_WIDTH, wall_height),
        colors::WALL,
    ));
    out.extend(rect(
        Vec2::new(RIGHT_WALL_X, GROUND_Y),
        Vec2::new(WALL_WIDTH, wall_height),
        colors::WALL,
    ));
}

fn hoop(out: &mut Vec<Vertex>, snapshot: &Snapshot) {
    let center = snapshot.hoop_pos;
    let half_rim = snapshot.hoop_rim_width / 2.0;
    let rim_left = center.x - half_rim;

    // Backboard on the right end of the rim
    let board_min = Vec2::new(center.x + half_rim, center.y - BACKBOARD_HEIGHT / 2.0);
    let board_size = Vec2::new(BACKBOARD_WIDTH, BACKBOARD_HEIGHT);
    out.extend(rect(board_min, board_size, colors::BACKBOARD));
    out.extend(rect_outline(board_min, board_size, 2.0, colors::BACKBOARD_EDGE));

    out.extend(line(
        Vec2::new(rim_left, center.y),
        Vec2::new(center.x + half_rim, center.y),
        RIM_THICKNESS,
        colors::RIM,
    ));

    // Net strands hanging from the rim
    for i in 0..5 {
        let x = rim_left + i as f32 * (snapshot.hoop_rim_width / 4.0);
        out.extend(line(
            Vec2::new(x, center.y),
            Vec2::new(x, center.y - NET_DEPTH),
            1.0,
            colors::NET,
        ));
    }
}

/// Arrow length grows with charge
pub fn aim_arrow_length(power: f32) -> f32 {
    60.0 + power * 3.0
}

fn aim_arrow(out: &mut Vec<Vertex>, snapshot: &Snapshot) {
    let dir = crate::direction_from_degrees(snapshot.angle_deg);
    let end = snapshot.ball_pos + dir * aim_arrow_length(snapshot.power);

    out.extend(line(snapshot.ball_pos, end, 4.0, colors::AIM_LINE));
    out.extend(circle(end, 6.0, colors::AIM_TIP, 16));
}

fn power_bar(out: &mut Vec<Vertex>, power: f32) {
    let fill = (power / MAX_POWER).clamp(0.0, 1.0) * POWER_BAR_SIZE.x;
    let color = match PowerLevel::from_power(power) {
        PowerLevel::Low => colors::POWER_LOW,
        PowerLevel::Medium => colors::POWER_MEDIUM,
        PowerLevel::High => colors::POWER_HIGH,
    };

    if fill > 0.0 {
        out.extend(rect(
            POWER_BAR_POS,
            Vec2::new(fill, POWER_BAR_SIZE.y),
            color,
        ));
    }
    out.extend(rect_outline(POWER_BAR_POS, POWER_BAR_SIZE, 2.0, colors::POWER_FRAME));
}

fn ball(out: &mut Vec<Vertex>, snapshot: &Snapshot) {
    let r = snapshot.ball_radius;
    out.extend(circle(snapshot.ball_pos, r, colors::BALL, CIRCLE_SEGMENTS));
    out.extend(ring(snapshot.ball_pos, r - 1.0, r + 1.0, colors::BALL_EDGE, CIRCLE_SEGMENTS));
}

fn clown_face(out: &mut Vec<Vertex>, c: Vec2) {
    out.extend(circle(c, 80.0, colors::CLOWN_FACE, 48));
    out.extend(ring(c, 78.5, 81.5, colors::CLOWN_OUTLINE, 48));

    out.extend(circle(c + Vec2::new(0.0, -10.0), 20.0, colors::CLOWN_NOSE, 24));

    out.extend(circle(c + Vec2::new(-30.0, 20.0), 18.0, colors::CLOWN_EYE, 24));
    out.extend(circle(c + Vec2::new(30.0, 20.0), 18.0, colors::CLOWN_EYE, 24));
    // Pupils deliberately looking different ways
    out.extend(circle(c + Vec2::new(-25.0, 25.0), 8.0, colors::CLOWN_PUPIL, 16));
    out.extend(circle(c + Vec2::new(35.0, 15.0), 8.0, colors::CLOWN_PUPIL, 16));

    // Smile: lower half of a circle below the nose
    out.extend(arc_band(
        c + Vec2::new(0.0, -40.0),
        47.5,
        52.5,
        PI,
        2.0 * PI,
        colors::CLOWN_SMILE,
        24,
    ));

    for (i, color) in colors::CLOWN_HAIR.iter().enumerate() {
        let tuft = c + Vec2::new(-60.0 + i as f32 * 30.0, 80.0);
        out.extend(circle(tuft, 25.0, *color, 24));
    }
}
