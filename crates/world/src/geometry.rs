//! Static map geometry: roads, buildings, offices.
//!
//! Mirrors the shapes the map configuration loader parses; everything here
//! is immutable once a [`Map`](crate::map::Map) is constructed.

/// A point on the integer map grid.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A real-valued position, as occupied by a moving dog or a lost object.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RealPoint {
    pub x: f64,
    pub y: f64,
}

impl RealPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub const ZERO: RealPoint = RealPoint::new(0.0, 0.0);
}

impl From<Point> for RealPoint {
    fn from(p: Point) -> Self {
        RealPoint::new(p.x as f64, p.y as f64)
    }
}

/// A rectangular building footprint. Buildings are rendered on the map but
/// play no role in collision or movement.
#[derive(Debug, Clone, Copy)]
pub struct Rectangle {
    pub position: Point,
    pub width: i32,
    pub height: i32,
}

/// An axis-aligned road segment, either horizontal (`start.y == end_coord`
/// is nonsensical — stored as a flat `y`) or vertical.
#[derive(Debug, Clone, Copy)]
pub enum Road {
    Horizontal { y: i32, x0: i32, x1: i32 },
    Vertical { x: i32, y0: i32, y1: i32 },
}

impl Road {
    pub fn horizontal(start: Point, x1: i32) -> Self {
        Road::Horizontal {
            y: start.y,
            x0: start.x,
            x1,
        }
    }
    pub fn vertical(start: Point, y1: i32) -> Self {
        Road::Vertical {
            x: start.x,
            y0: start.y,
            y1,
        }
    }

    /// The road's nominal start point, used as the default spawn position.
    pub fn start(&self) -> Point {
        match *self {
            Road::Horizontal { y, x0, .. } => Point { x: x0, y },
            Road::Vertical { x, y0, .. } => Point { x, y: y0 },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Office {
    pub id: crate::OfficeId,
    pub position: Point,
    pub offset: (i32, i32),
}
