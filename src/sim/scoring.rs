//! Basket detection
//!
//! Geometry alone can't tell which way the ball went through the rim, so the
//! sign of the vertical velocity decides: falling is a fair basket, rising is
//! a cheat (usually a ball that bounced up off the floor under the hoop).

use super::state::{Ball, Hoop, ScoreKind};
use crate::consts::RIM_CATCH_MARGIN;

/// Ball center is horizontally inside the rim and vertically at rim height
pub fn in_rim_zone(hoop: &Hoop, ball: &Ball) -> bool {
    ball.pos.x > hoop.rim_left()
        && ball.pos.x < hoop.rim_right()
        && (ball.pos.y - hoop.pos.y).abs() < ball.radius + RIM_CATCH_MARGIN
}

/// Falling through the rim
pub fn is_fair_score(hoop: &Hoop, ball: &Ball) -> bool {
    ball.vel.y < 0.0 && in_rim_zone(hoop, ball)
}

/// Rising through the rim
pub fn is_cheat_score(hoop: &Hoop, ball: &Ball) -> bool {
    ball.vel.y > 0.0 && in_rim_zone(hoop, ball)
}

/// Check for a basket and mark the hoop as scored if there is one.
///
/// Fair takes priority; cheat is only checked when fair did not match. Once
/// the hoop is marked nothing scores until it is re-armed.
pub fn check_score(hoop: &mut Hoop, ball: &Ball) -> Option<ScoreKind> {
    if hoop.scored {
        return None;
    }

    let kind = if is_fair_score(hoop, ball) {
        ScoreKind::Fair
    } else if is_cheat_score(hoop, ball) {
        ScoreKind::Cheat
    } else {
        return None;
    };

    hoop.scored = true;
    Some(kind)
}
