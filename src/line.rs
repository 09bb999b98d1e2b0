//! Zero-width ("hairline") polylines, solid and dashed.
//!
//! Width-0 lines bypass polygon filling entirely: each segment is walked
//! with the integer midpoint algorithm and pixels are coalesced into spans
//! (one horizontal run per scanline for shallow segments, width-1 spans for
//! steep ones).  Dash state persists across segment boundaries, so the dash
//! phase of a polyline is continuous around its vertices.

use crate::gc::{CapStyle, GraphicsContext, LineStyle};
use crate::geom::Point;
use crate::span::{PaintedSet, SpanCollector};

/// Walk a segment with the midpoint algorithm, visiting every pixel from
/// `p0` to `p1` inclusive.  With `skip_first` the starting pixel is not
/// visited (used for the continuation segments of a polyline, whose start
/// was already visited as the previous segment's end).
pub(crate) fn walk_segment<F: FnMut(i32, i32)>(p0: Point, p1: Point, skip_first: bool,
                                               mut visit: F) {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let adx = dx.abs();
    let ady = dy.abs();
    let signdx = dx.signum();
    let signdy = dy.signum();
    let mut x = p0.x;
    let mut y = p0.y;

    if !skip_first {
        visit(x, y);
    }
    if adx >= ady {
        // x is the major axis; bias the error term when stepping leftward
        // so a segment rasterizes the same in either direction
        let mut e = -adx - if signdx < 0 { 1 } else { 0 };
        for _ in 0..adx {
            x += signdx;
            e += 2 * ady;
            if e >= 0 {
                y += signdy;
                e -= 2 * adx;
            }
            visit(x, y);
        }
    } else {
        let mut e = -ady - if signdy < 0 { 1 } else { 0 };
        for _ in 0..ady {
            y += signdy;
            e += 2 * adx;
            if e >= 0 {
                x += signdx;
                e -= 2 * ady;
            }
            visit(x, y);
        }
    }
}

/// Persistent dash position: which entry of the dash array we are in and how
/// many pixels of it remain.  The pattern cycles; an odd-length array simply
/// flips on/off parity every time it wraps, which matches treating the array
/// as repeated twice.
#[derive(Debug)]
pub(crate) struct DashState<'a> {
    dashes: &'a [u32],
    /// Cumulative dash ordinal since the pattern origin.
    k: usize,
    remaining: u32,
    on_count: usize,
}

impl<'a> DashState<'a> {
    pub fn new(dashes: &'a [u32], offset: u32) -> Self {
        let mut s = DashState { dashes, k: 0, remaining: dashes[0], on_count: 0 };
        s.advance(offset);
        s
    }

    pub fn is_on(&self) -> bool {
        self.k % 2 == 0
    }

    /// Ordinal of the current (or next) "on" dash, for multicolored dashes.
    pub fn on_index(&self) -> usize {
        self.on_count
    }

    fn next_dash(&mut self) {
        if self.is_on() {
            self.on_count += 1;
        }
        self.k += 1;
        self.remaining = self.dashes[self.k % self.dashes.len()];
    }

    /// Consume `n` pixels of dash pattern.
    pub fn advance(&mut self, mut n: u32) {
        while n >= self.remaining {
            n -= self.remaining;
            self.next_dash();
        }
        self.remaining -= n;
    }
}

/// Solid zero-width polyline.
pub fn zero_line<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                      pts: &[Point]) {
    if pts.is_empty() {
        return;
    }
    let pixel = gc.drawing_pixel();
    let mut col = SpanCollector::new();
    let mut drew = false;
    for w in pts.windows(2) {
        if w[0] == w[1] {
            continue;
        }
        walk_segment(w[0], w[1], drew, |x, y| col.plot(x, y, pixel));
        col.flush(set);
        drew = true;
    }
    if !drew && gc.cap_style != CapStyle::Butt {
        // a degenerate polyline still plots a dot when the cap style
        // makes one visible
        col.plot(pts[0].x, pts[0].y, pixel);
        col.flush(set);
    }
}

/// Dashed zero-width polyline.  One pixel of travel consumes one pixel of
/// dash pattern; "on" dashes cycle through the context's pixel slots and
/// "off" dashes are painted only for double-dashed lines.
pub fn zero_dash<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                      pts: &[Point]) {
    if pts.is_empty() {
        return;
    }
    if !gc.effectively_dashed() {
        zero_line(set, gc, pts);
        return;
    }
    let double = gc.line_style == LineStyle::DoubleDash;
    let off_pixel = gc.off_pixel();
    let mut dash = DashState::new(gc.dashes(), gc.dash_offset);
    let mut col = SpanCollector::new();
    let mut drew = false;
    for w in pts.windows(2) {
        if w[0] == w[1] {
            continue;
        }
        walk_segment(w[0], w[1], drew, |x, y| {
            if dash.is_on() {
                col.plot(x, y, gc.on_dash_pixel(dash.on_index()));
            } else if double {
                col.plot(x, y, off_pixel);
            }
            dash.advance(1);
        });
        col.flush(set);
        drew = true;
    }
    if !drew && gc.cap_style != CapStyle::Butt && dash.is_on() {
        col.plot(pts[0].x, pts[0].y, gc.on_dash_pixel(dash.on_index()));
        col.flush(set);
    }
}
