use crate::graphics;
use crate::math::{Color, Point, Rect};

const ROW_STEP: f64 = 36.0;
const ROW_TOP_PAD: f64 = 8.0;
const TRACK_LEFT_INSET: f64 = 28.0;
const TRACK_RIGHT_INSET: f64 = 12.0;
const TRACK_HEIGHT: f64 = 16.0;
const THUMB_RADIUS: i32 = 8;

/// A panel with three horizontal sliders for the R, G and B channels.
/// Pressing inside the panel starts a drag; motion while dragging keeps
/// re-sampling the channel row under the pointer until the button is
/// released.
pub struct ColorPicker {
    pub rect: Rect,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub dragging: bool,
}

impl ColorPicker {
    pub fn new(rect: Rect) -> Self {
        ColorPicker {
            rect,
            r: 120,
            g: 200,
            b: 150,
            dragging: false,
        }
    }

    /// Whether the point falls inside the picker panel
    pub fn contains(&self, pos: Point) -> bool {
        self.rect.contains(pos)
    }

    /// Handles a primary-button press. Returns true when the press landed
    /// inside the panel and was consumed by the picker.
    pub fn mouse_down(&mut self, pos: Point) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.dragging = true;
        self.update_from(pos);
        true
    }

    pub fn mouse_up(&mut self) {
        self.dragging = false;
    }

    pub fn mouse_moved(&mut self, pos: Point) {
        if self.dragging {
            self.update_from(pos);
        }
    }

    /// The currently selected color; alpha is 200 while alpha compositing
    /// is enabled, fully opaque otherwise
    pub fn current_color(&self, use_alpha: bool) -> Color {
        Color::rgba(self.r, self.g, self.b, if use_alpha { 200 } else { 255 })
    }

    /// The slider track rectangle for a channel row (0 = R, 1 = G, 2 = B)
    fn track_rect(&self, row: usize) -> Rect {
        Rect::new(
            self.rect.x + TRACK_LEFT_INSET,
            self.rect.y + ROW_TOP_PAD + row as f64 * ROW_STEP,
            self.rect.w - TRACK_LEFT_INSET - TRACK_RIGHT_INSET,
            TRACK_HEIGHT,
        )
    }

    /// Re-samples the channel under the pointer row. The horizontal offset
    /// is clamped to the track and scaled linearly to 0..=255; pointer rows
    /// below the third slider hit nothing.
    fn update_from(&mut self, pos: Point) {
        let rel_y = pos.y - self.rect.y;
        if rel_y < 0.0 || rel_y > self.rect.h {
            return;
        }
        let row = (rel_y / ROW_STEP) as usize;
        if row > 2 {
            return;
        }
        let track = self.track_rect(row);
        let value = ((pos.x - track.x).clamp(0.0, track.w) / track.w * 255.0).round() as u8;
        match row {
            0 => self.r = value,
            1 => self.g = value,
            _ => self.b = value,
        }
    }

    /// Paints the panel, the three slider rows and a preview swatch
    pub fn draw(&self, frame: &mut [u8], width: u32, height: u32, use_alpha: bool) {
        graphics::draw_rect(frame, width, height, self.rect, Color::rgb(50, 50, 60), 0, false);

        let labels = ['R', 'G', 'B'];
        for (row, label) in labels.iter().enumerate() {
            let track = self.track_rect(row);
            let value = match row {
                0 => self.r,
                1 => self.g,
                _ => self.b,
            };
            graphics::draw_rect(frame, width, height, track, Color::rgb(100, 100, 100), 0, false);
            let fill_w = value as f64 / 255.0 * track.w;
            graphics::draw_rect(
                frame,
                width,
                height,
                Rect::new(track.x, track.y, fill_w, track.h),
                Color::rgb(200, 200, 200),
                0,
                false,
            );
            graphics::draw_circle(
                frame,
                width,
                height,
                Point::new(track.x + fill_w, track.y + track.h / 2.0),
                THUMB_RADIUS,
                Color::rgb(230, 230, 230),
                0,
                false,
            );
            graphics::draw_text(
                frame,
                width,
                height,
                (self.rect.x + 8.0) as i32,
                (track.y + 4.0) as i32,
                &label.to_string(),
                Color::rgb(240, 240, 240),
            );
            graphics::draw_text(
                frame,
                width,
                height,
                track.x as i32,
                (track.y + track.h + 2.0) as i32,
                &format!("{value}"),
                Color::rgb(240, 240, 240),
            );
        }

        // current color preview
        graphics::draw_rect(
            frame,
            width,
            height,
            Rect::new(
                self.rect.x + 8.0,
                self.rect.bottom() - 34.0,
                self.rect.w - 16.0,
                26.0,
            ),
            self.current_color(use_alpha),
            0,
            true,
        );
    }
}
