//! The incremental integer edge stepper shared by the polygon fillers.
//!
//! Tracks the x coordinate of a polygon edge as the scanline advances, with
//! y always the major axis.  The +0.5 start adjustment implements the fill
//! convention: for a left edge we want the first pixel inside the polygon,
//! for a right edge the first pixel outside, so that the left pixel of each
//! span is drawn and the right one is not.  Rightward edges therefore flip
//! immediately, leftward edges only after traversing a whole pixel.

#[derive(Debug,Default,Copy,Clone)]
pub struct Bres {
    /// Current x coordinate (the minor axis).
    pub minor: i32,
    d: i32,
    m: i32,
    m1: i32,
    incr1: i32,
    incr2: i32,
}

impl Bres {
    /// Set up stepping for an edge spanning `dy` scanlines (`dy > 0`), from
    /// x = `x1` at the top vertex to x = `x2` at the bottom vertex.
    pub fn new(dy: i32, x1: i32, x2: i32) -> Self {
        debug_assert!(dy > 0, "horizontal edges are never stepped");
        let dx = x2 - x1;
        let (m, m1, incr1, incr2, d);
        if dx < 0 {
            m = dx / dy;
            m1 = m - 1;
            incr1 = -2 * dx + 2 * dy * m1;
            incr2 = -2 * dx + 2 * dy * m;
            d = 2 * m * dy - 2 * dx - 2 * dy;
        } else {
            m = dx / dy;
            m1 = m + 1;
            incr1 = 2 * dx - 2 * dy * m1;
            incr2 = 2 * dx - 2 * dy * m;
            d = -2 * m * dy + 2 * dx;
        }
        Bres { minor: x1, d, m, m1, incr1, incr2 }
    }

    /// Advance one scanline: move x by the slope `m` or by `m1 = m +- 1`
    /// depending on the sign of the decision variable.
    pub fn step(&mut self) {
        if self.m1 > 0 {
            if self.d > 0 {
                self.minor += self.m1;
                self.d += self.incr1;
            } else {
                self.minor += self.m;
                self.d += self.incr2;
            }
        } else if self.d >= 0 {
            self.minor += self.m1;
            self.d += self.incr1;
        } else {
            self.minor += self.m;
            self.d += self.incr2;
        }
    }
}
