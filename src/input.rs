use rand::Rng;

use crate::math::Point;
use crate::state::{AppState, UserCircle};

pub const MIN_CIRCLE_RADIUS: i32 = 12;
pub const MAX_CIRCLE_RADIUS: i32 = 36;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Keys the sandbox reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    C,
    S,
    P,
    Enter,
    T,
}

/// A raw input event, drained from the window queue once per tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyPress(Key),
    MouseDown { button: MouseButton, pos: Point },
    MouseUp { pos: Point },
    MouseMove { pos: Point },
}

/// A side effect the frame loop must run after reducing an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    SaveScreenshot,
}

/// Applies one input event to the application state. The color picker gets
/// first refusal on every mouse event; a press that lands inside the picker
/// panel adjusts a slider and never reaches the canvas, so it cannot spawn
/// or recolor a shape.
pub fn apply(state: &mut AppState, event: &InputEvent) -> Option<Effect> {
    match event {
        InputEvent::Quit | InputEvent::KeyPress(Key::Escape) => {
            state.running = false;
        }
        InputEvent::KeyPress(Key::C) => {
            state.circles.clear();
            state.polygons.clear();
        }
        InputEvent::KeyPress(Key::S) => {
            return Some(Effect::SaveScreenshot);
        }
        InputEvent::KeyPress(Key::P) => {
            state.creating_polygon = !state.creating_polygon;
            if !state.creating_polygon {
                state.current_polygon.clear();
            }
        }
        InputEvent::KeyPress(Key::Enter) => {
            if state.creating_polygon && state.current_polygon.len() >= 3 {
                state.polygons.push(std::mem::take(&mut state.current_polygon));
                state.creating_polygon = false;
            }
        }
        InputEvent::KeyPress(Key::T) => {
            state.use_alpha = !state.use_alpha;
        }
        InputEvent::MouseDown { button, pos } => {
            let on_picker = state.picker.contains(*pos);
            if *button == MouseButton::Left {
                state.picker.mouse_down(*pos);
            }
            if on_picker {
                return None;
            }
            match button {
                MouseButton::Left if state.creating_polygon => {
                    state.current_polygon.push(*pos);
                }
                MouseButton::Left => {
                    state.circles.push(UserCircle {
                        pos: *pos,
                        radius: rand::rng()
                            .random_range(MIN_CIRCLE_RADIUS..=MAX_CIRCLE_RADIUS),
                        color: state.picker.current_color(state.use_alpha),
                    });
                }
                MouseButton::Right if !state.creating_polygon => {
                    let color = state.picker.current_color(state.use_alpha);
                    if let Some(nearest) = state
                        .circles
                        .iter_mut()
                        .min_by(|a, b| a.pos.dist_sq(*pos).total_cmp(&b.pos.dist_sq(*pos)))
                    {
                        nearest.color = color;
                    }
                }
                MouseButton::Right => {}
            }
        }
        InputEvent::MouseUp { .. } => {
            state.picker.mouse_up();
        }
        InputEvent::MouseMove { pos } => {
            state.picker.mouse_moved(*pos);
        }
    }
    None
}
