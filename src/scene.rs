use crate::graphics;
use crate::math::{Color, Point, Rect};
use crate::state::{AppState, PENTAGON, POLYGON_COLOR};

const HELP_LINES: [&str; 5] = [
    "LEFT CLICK: ADD CIRCLE / ADD VERTEX IN POLYGON MODE",
    "RIGHT CLICK: RECOLOR NEAREST CIRCLE",
    "P: TOGGLE POLYGON MODE   ENTER: FINISH POLYGON",
    "T: TOGGLE ALPHA   S: SCREENSHOT   C: CLEAR",
    "ESC: QUIT",
];

/// Renders every entity plus the UI overlay into the frame buffer. The
/// caller clears the buffer to the background color first.
pub fn render(frame: &mut [u8], width: u32, height: u32, state: &AppState, fps: f64) {
    let w = width as f64;
    let alpha = state.use_alpha;

    // thick header line
    graphics::draw_line(
        frame,
        width,
        height,
        Point::new(50.0, 40.0),
        Point::new(w - 50.0, 40.0),
        Color::rgb(255, 220, 60),
        6,
        false,
    );

    // demo rectangles, one filled and one bordered
    let fill_color = if alpha {
        Color::rgba(80, 180, 220, 180)
    } else {
        Color::rgb(80, 180, 220)
    };
    graphics::draw_rect(
        frame,
        width,
        height,
        Rect::new(50.0, 350.0, 140.0, 90.0),
        fill_color,
        0,
        alpha,
    );
    graphics::draw_rect(
        frame,
        width,
        height,
        Rect::new(220.0, 350.0, 140.0, 90.0),
        Color::rgb(220, 180, 80),
        4,
        false,
    );

    // demo circles, filled inside a wider border ring
    let circle_center = Point::new(w - 150.0, 120.0);
    let base = Color::rgb(120, 200, 120);
    let (fill, ring) = if alpha {
        (base.with_alpha(160), base.with_alpha(220))
    } else {
        (base, base)
    };
    graphics::draw_circle(frame, width, height, circle_center, 40, fill, 0, alpha);
    graphics::draw_circle(frame, width, height, circle_center, 60, ring, 4, alpha);

    // static pentagon
    graphics::draw_polygon(frame, width, height, &PENTAGON, Color::rgb(180, 120, 220), 0, false);

    // animated shapes
    graphics::draw_ellipse(
        frame,
        width,
        height,
        state.moving_ellipse.rect,
        state.moving_ellipse.color,
        0,
        alpha,
    );
    graphics::draw_circle(
        frame,
        width,
        height,
        state.moving_circle.pos,
        state.moving_circle.radius,
        state.moving_circle.color,
        0,
        alpha,
    );

    // user circles
    for circle in &state.circles {
        graphics::draw_circle(
            frame,
            width,
            height,
            circle.pos,
            circle.radius,
            circle.color,
            0,
            alpha,
        );
    }

    // committed polygons
    for polygon in &state.polygons {
        graphics::draw_polygon(frame, width, height, polygon, POLYGON_COLOR, 0, alpha);
    }

    // in-progress polygon: white segments with yellow vertex dots
    if state.creating_polygon {
        for pair in state.current_polygon.windows(2) {
            graphics::draw_line(
                frame,
                width,
                height,
                pair[0],
                pair[1],
                Color::rgb(255, 255, 255),
                2,
                false,
            );
        }
        for vertex in &state.current_polygon {
            graphics::draw_circle(frame, width, height, *vertex, 4, Color::rgb(255, 255, 0), 0, false);
        }
    }

    // help text and FPS readout
    let text_color = Color::rgb(230, 230, 230);
    for (i, line) in HELP_LINES.iter().enumerate() {
        graphics::draw_text(frame, width, height, 10, 10 + i as i32 * 18, line, text_color);
    }
    let fps_text = format!("FPS: {fps:.0}");
    let fps_x = width as i32 - fps_text.len() as i32 * 6 - 10;
    graphics::draw_text(frame, width, height, fps_x, 10, &fps_text, text_color);

    state.picker.draw(frame, width, height, alpha);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BG_COLOR, HEIGHT, WIDTH};

    fn pixel(frame: &[u8], x: u32, y: u32) -> [u8; 3] {
        let o = ((y * WIDTH + x) * 4) as usize;
        [frame[o], frame[o + 1], frame[o + 2]]
    }

    fn rendered(state: &AppState) -> Vec<u8> {
        let mut frame = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
        graphics::fill(&mut frame, BG_COLOR);
        render(&mut frame, WIDTH, HEIGHT, state, 60.0);
        frame
    }

    #[test]
    fn renders_static_entities() {
        let state = AppState::new();
        let frame = rendered(&state);
        // pentagon interior
        assert_eq!(pixel(&frame, 400, 220), [180, 120, 220]);
        // picker panel background away from tracks and labels
        let px = (state.picker.rect.right() - 4.0) as u32;
        let py = (state.picker.rect.y + 2.0) as u32;
        assert_eq!(pixel(&frame, px, py), [50, 50, 60]);
        // header line
        assert_eq!(pixel(&frame, 450, 40), [255, 220, 60]);
    }

    #[test]
    fn alpha_toggle_changes_compositing_of_demo_rect() {
        let mut state = AppState::new();
        state.use_alpha = false;
        let opaque = rendered(&state);
        assert_eq!(pixel(&opaque, 100, 400), [80, 180, 220]);

        state.use_alpha = true;
        let blended = rendered(&state);
        // 180/255 of the fill over the background
        assert_ne!(pixel(&blended, 100, 400), [80, 180, 220]);

        state.use_alpha = false;
        let restored = rendered(&state);
        assert_eq!(pixel(&restored, 100, 400), [80, 180, 220]);
    }

    #[test]
    fn in_progress_polygon_draws_only_in_creation_mode() {
        let mut state = AppState::new();
        state.current_polygon = vec![Point::new(500.0, 500.0), Point::new(600.0, 500.0)];
        let hidden = rendered(&state);
        assert_eq!(pixel(&hidden, 550, 500), [BG_COLOR.r, BG_COLOR.g, BG_COLOR.b]);

        state.creating_polygon = true;
        let shown = rendered(&state);
        assert_eq!(pixel(&shown, 550, 500), [255, 255, 255]);
        assert_eq!(pixel(&shown, 500, 500), [255, 255, 0]);
    }

    #[test]
    fn user_circles_are_rendered() {
        let mut state = AppState::new();
        state.use_alpha = false;
        state.circles.push(crate::state::UserCircle {
            pos: Point::new(600.0, 500.0),
            radius: 20,
            color: Color::rgb(10, 200, 10),
        });
        let frame = rendered(&state);
        assert_eq!(pixel(&frame, 600, 500), [10, 200, 10]);
    }
}
