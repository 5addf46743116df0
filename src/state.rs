use crate::math::{Color, Point, Rect};
use crate::picker::ColorPicker;

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 650;
pub const TARGET_FPS: f64 = 60.0;
pub const BG_COLOR: Color = Color::rgb(30, 30, 40);

/// The static five-sided demo polygon
pub const PENTAGON: [Point; 5] = [
    Point::new(400.0, 150.0),
    Point::new(460.0, 190.0),
    Point::new(440.0, 260.0),
    Point::new(360.0, 260.0),
    Point::new(340.0, 190.0),
];

/// Fill color for committed user polygons
pub const POLYGON_COLOR: Color = Color::rgba(200, 120, 180, 160);

/// The animated circle; velocity is in pixels per frame at the target rate
pub struct MovingCircle {
    pub pos: Point,
    pub radius: i32,
    pub color: Color,
    pub vel: [f64; 2],
}

/// The animated ellipse, tracked by its bounding rectangle
pub struct MovingEllipse {
    pub rect: Rect,
    pub vel: [f64; 2],
    pub color: Color,
}

/// A circle placed by the user with a left click
#[derive(Clone, Debug, PartialEq)]
pub struct UserCircle {
    pub pos: Point,
    pub radius: i32,
    pub color: Color,
}

/// Application state: every drawable entity plus the mode flags
pub struct AppState {
    pub moving_circle: MovingCircle,
    pub moving_ellipse: MovingEllipse,
    /// User-created circles, only ever bulk-cleared
    pub circles: Vec<UserCircle>,
    /// Committed user polygons
    pub polygons: Vec<Vec<Point>>,
    /// Vertices collected while polygon mode is active
    pub current_polygon: Vec<Point>,
    pub creating_polygon: bool,
    pub use_alpha: bool,
    pub picker: ColorPicker,
    pub running: bool,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            moving_circle: MovingCircle {
                pos: Point::new(100.0, 100.0),
                radius: 30,
                color: Color::rgba(200, 80, 80, 255),
                vel: [3.5, 2.7],
            },
            moving_ellipse: MovingEllipse {
                rect: Rect::new(300.0, 300.0, 140.0, 80.0),
                vel: [2.1, -1.6],
                color: Color::rgba(120, 180, 240, 200),
            },
            circles: Vec::new(),
            polygons: Vec::new(),
            current_polygon: Vec::new(),
            creating_polygon: false,
            use_alpha: true,
            picker: ColorPicker::new(Rect::new(10.0, HEIGHT as f64 - 130.0, 260.0, 120.0)),
            running: true,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
