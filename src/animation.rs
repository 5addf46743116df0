use crate::state::{AppState, HEIGHT, TARGET_FPS, WIDTH};

/// Advances the two animated shapes by `dt` seconds. Velocities are in
/// pixels per frame at the target rate, so movement stays frame-rate
/// independent.
///
/// The circle clamps its center back inside the window on contact and
/// reflects that axis; the ellipse only reflects, so it may overshoot the
/// boundary for a frame before moving back in.
pub fn step(state: &mut AppState, dt: f64) {
    let scale = dt * TARGET_FPS;
    let w = WIDTH as f64;
    let h = HEIGHT as f64;

    let circle = &mut state.moving_circle;
    let r = circle.radius as f64;
    circle.pos.x += circle.vel[0] * scale;
    circle.pos.y += circle.vel[1] * scale;

    if circle.pos.x - r < 0.0 {
        circle.pos.x = r;
        circle.vel[0] = -circle.vel[0];
    }
    if circle.pos.x + r > w {
        circle.pos.x = w - r;
        circle.vel[0] = -circle.vel[0];
    }
    if circle.pos.y - r < 0.0 {
        circle.pos.y = r;
        circle.vel[1] = -circle.vel[1];
    }
    if circle.pos.y + r > h {
        circle.pos.y = h - r;
        circle.vel[1] = -circle.vel[1];
    }

    let ellipse = &mut state.moving_ellipse;
    ellipse.rect.x += ellipse.vel[0] * scale;
    ellipse.rect.y += ellipse.vel[1] * scale;

    if ellipse.rect.left() < 0.0 || ellipse.rect.right() > w {
        ellipse.vel[0] = -ellipse.vel[0];
    }
    if ellipse.rect.top() < 0.0 || ellipse.rect.bottom() > h {
        ellipse.vel[1] = -ellipse.vel[1];
    }
}
