//! Integer device-space geometry shared by every drawing routine.

/// An integer device-space coordinate.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A floating-point coordinate, used where vertices are not grid-aligned
/// (wide-line bodies, caps and joins).
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct FPoint {
    pub x: f64,
    pub y: f64,
}

impl FPoint {
    pub fn new(x: f64, y: f64) -> Self {
        FPoint { x, y }
    }
}

/// An axis-aligned rectangle: upper-left corner plus extent.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }
}

/// An elliptic arc.
///
/// `(x, y)` is the upper-left corner of the bounding box, `width` and
/// `height` its extent.  `angle1` is the start angle and `angle2` the extent
/// of the arc, both in 1/64ths of a degree.  Angles are measured
/// counterclockwise from the positive x axis, with a positive `angle2`
/// sweeping counterclockwise; an extent of +-360*64 or more is a full
/// ellipse.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Arc {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub angle1: i32,
    pub angle2: i32,
}

/// 1/64th-degree units per full turn.
pub const FULL_CIRCLE: i32 = 360 * 64;

impl Arc {
    /// Center of the bounding box.
    pub fn center(&self) -> FPoint {
        FPoint::new(self.x as f64 + self.width as f64 / 2.0,
                    self.y as f64 + self.height as f64 / 2.0)
    }
    /// Point on the arc at parametric angle `theta` (radians).
    pub fn point_at(&self, theta: f64) -> FPoint {
        let c = self.center();
        let a = self.width as f64 / 2.0;
        let b = self.height as f64 / 2.0;
        // device y grows downward
        FPoint::new(c.x + a * theta.cos(), c.y - b * theta.sin())
    }
}

/// How the entries of a point list are interpreted.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CoordMode {
    /// Every point is relative to the drawable's origin.
    Origin,
    /// Every point after the first is relative to the previous one.
    Previous,
}

/// Resolve a point list to absolute coordinates.
pub(crate) fn absolutize(mode: CoordMode, pts: &[Point]) -> Vec<Point> {
    match mode {
        CoordMode::Origin => pts.to_vec(),
        CoordMode::Previous => {
            let mut out = Vec::with_capacity(pts.len());
            let mut last = Point::new(0, 0);
            for (i, p) in pts.iter().enumerate() {
                let q = if i == 0 {
                    *p
                } else {
                    Point::new(last.x + p.x, last.y + p.y)
                };
                out.push(q);
                last = q;
            }
            out
        }
    }
}
