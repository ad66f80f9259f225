use engine::{InputAction, InputSnapshot};

use super::body::{Ground, PlayerBody};

/// Advances one frame of player motion with a unit time step.
///
/// Horizontal speed is set, not accumulated, so releasing input stops the body
/// at once. Jump only fires from the ground. Gravity is tested against the
/// post-move, pre-collision position.
pub(crate) fn integrate(body: &mut PlayerBody, input: &InputSnapshot, ground: &Ground) {
    let speed = body.tuning.horizontal_speed;
    body.vx = if input.is_down(InputAction::MoveLeft) {
        -speed
    } else if input.is_down(InputAction::MoveRight) {
        speed
    } else {
        0.0
    };

    if input.is_down(InputAction::Jump) && body.grounded {
        body.vy = body.tuning.jump_impulse;
        body.grounded = false;
    }

    body.x += body.vx;
    body.y += body.vy;

    if ground.supports(body) {
        body.vy = 0.0;
        body.grounded = true;
    } else {
        body.vy += body.tuning.gravity_accel;
    }
}
