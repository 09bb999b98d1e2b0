//! Fast fillers for polygons known to be convex.
//!
//! Both fillers order the edges from smallest y to largest y by partitioning
//! the vertex array into a left chain and a right chain, then walk the two
//! chains in lockstep, one scanline at a time, emitting a single span per
//! scanline.  Feeding them a non-convex polygon yields undefined output (the
//! general filler exists for that).
//!
//! The integer filler steps its chains with the shared Bresenham stepper.
//! The subpixel filler operates on f64 vertices with linear-interpolated x
//! per scanline; it exists for shapes whose vertices are not grid-aligned
//! (wide-line bodies, caps and joins) and accepts integer and fractional
//! translations so its rounding can be made to match whatever primitive the
//! shape must abut.

use crate::bres::Bres;
use crate::geom::{FPoint, Point};
use crate::span::{PaintedSet, Span};

const EPSILON: f64 = 0.000_001;

fn iceil(x: f64) -> i32 {
    x.ceil() as i32
}

/// Index of the vertex with the smallest y, plus the y extent.
fn poly_y_bounds(pts: &[Point]) -> (usize, i32, i32) {
    let mut imin = 0;
    let mut ymin = pts[0].y;
    let mut ymax = pts[0].y;
    for (i, p) in pts.iter().enumerate().skip(1) {
        if p.y < ymin {
            imin = i;
            ymin = p.y;
        }
        if p.y > ymax {
            ymax = p.y;
        }
    }
    (imin, ymin, ymax)
}

/// Fill a convex polygon with integer vertices.
///
/// Spans cover `[xl, xr)` per scanline and the bottom scanline is excluded,
/// so abutting polygons share no pixel.
pub fn fill_convex<P: Copy + PartialEq>(set: &mut PaintedSet<P>, pixel: P, pts: &[Point]) {
    if pts.len() < 3 {
        return;
    }
    let n = pts.len();
    let (imin, ymin, ymax) = poly_y_bounds(pts);
    if ymin == ymax {
        return;
    }

    let mut out: Vec<Span> = Vec::with_capacity((ymax - ymin) as usize);
    let mut y = ymin;
    let mut nextleft = imin;
    let mut nextright = imin;
    let mut lb = Bres::default();
    let mut rb = Bres::default();

    loop {
        // pick up a new left edge if the old one ended here
        if pts[nextleft].y == y {
            let left = nextleft;
            nextleft = (nextleft + 1) % n;
            let dy = pts[nextleft].y - pts[left].y;
            if dy > 0 {
                lb = Bres::new(dy, pts[left].x, pts[nextleft].x);
            }
        }
        // likewise on the right, walking the array the other way
        if pts[nextright].y == y {
            let right = nextright;
            nextright = if nextright == 0 { n - 1 } else { nextright - 1 };
            let dy = pts[nextright].y - pts[right].y;
            if dy > 0 {
                rb = Bres::new(dy, pts[right].x, pts[nextright].x);
            }
        }

        let mut i = pts[nextleft].y.min(pts[nextright].y) - y;
        if i < 0 {
            // we were handed a non-convex polygon
            return;
        }
        while i > 0 {
            let (xl, xr) = (lb.minor, rb.minor);
            // the chains may have crossed in x
            let (x0, w) = if xl < xr { (xl, xr - xl) } else { (xr, xl - xr) };
            if w > 0 {
                out.push(Span::new(x0, y, w as u32));
            }
            y += 1;
            lb.step();
            rb.step();
            i -= 1;
        }
        if y == ymax {
            break;
        }
    }

    set.add_spans(out, pixel);
}

fn fpoly_y_bounds(pts: &[FPoint], yftrans: f64) -> (usize, i32, i32) {
    let mut imin = 0;
    let mut ymin = pts[0].y;
    let mut ymax = pts[0].y;
    for (i, p) in pts.iter().enumerate().skip(1) {
        if p.y < ymin {
            imin = i;
            ymin = p.y;
        }
        if p.y > ymax {
            ymax = p.y;
        }
    }
    (imin, iceil(ymin + yftrans), iceil(ymax + yftrans - 1.0))
}

/// Fill a convex polygon with subpixel vertex placement.
///
/// `xtrans`/`ytrans` translate every emitted span; `xftrans`/`yftrans`
/// translate the vertices before scan conversion, which lets a caller match
/// rounding errors with an exactly-drawn shape the polygon abuts.
pub fn fill_spp<P: Copy + PartialEq>(set: &mut PaintedSet<P>, pixel: P, pts: &[FPoint],
                                     xtrans: i32, ytrans: i32, xftrans: f64, yftrans: f64) {
    if pts.len() < 3 {
        return;
    }
    let n = pts.len();
    let (imin, ymin, ymax) = fpoly_y_bounds(pts, yftrans);
    if ymax - ymin + 1 <= 0 {
        return;
    }

    let mut out: Vec<Span> = Vec::with_capacity((ymax - ymin + 1) as usize);
    let mut marked = vec![0i32; n];
    let mut nextleft = imin;
    let mut nextright = imin;
    marked[imin] = -1;
    let mut y = iceil(pts[nextleft].y + yftrans);

    let (mut xl, mut xr) = (0.0f64, 0.0f64);
    let (mut ml, mut mr) = (0.0f64, 0.0f64);

    while y <= ymax {
        // add a left edge if we need to
        if (y as f64 > pts[nextleft].y + yftrans
            || (y as f64 - (pts[nextleft].y + yftrans)).abs() <= EPSILON)
            && marked[nextleft] != 1
        {
            marked[nextleft] += 1;
            let left = nextleft;
            nextleft = (nextleft + 1) % n;

            let dy = pts[nextleft].y - pts[left].y;
            if dy != 0.0 {
                ml = (pts[nextleft].x - pts[left].x) / dy;
                let dy = y as f64 - (pts[left].y + yftrans);
                xl = (pts[left].x + xftrans) + ml * dy.max(0.0);
            }
        }

        // add a right edge if we need to
        if (y as f64 > pts[nextright].y + yftrans)
            || ((y as f64 - (pts[nextright].y + yftrans)).abs() <= EPSILON
                && marked[nextright] != 1)
        {
            marked[nextright] += 1;
            let right = nextright;
            nextright = if nextright == 0 { n - 1 } else { nextright - 1 };

            let dy = pts[nextright].y - pts[right].y;
            if dy != 0.0 {
                mr = (pts[nextright].x - pts[right].x) / dy;
                let dy = y as f64 - (pts[right].y + yftrans);
                xr = (pts[right].x + xftrans) + mr * dy.max(0.0);
            }
        }

        // generate spans while we have both a left and a right edge
        let i = (pts[nextleft].y.min(pts[nextright].y) + yftrans) - y as f64;
        let mut j;
        if i < EPSILON {
            if marked[nextleft] != 0 && marked[nextright] != 0 {
                // trapped: no points remain on either chain
                break;
            }
            continue;
        } else {
            j = i as i32;
            if j == 0 {
                j = 1;
            }
        }
        while j > 0 {
            let cxl = iceil(xl);
            let cxr = iceil(xr);
            let (x0, w) = if xl < xr { (cxl, cxr - cxl) } else { (cxr, cxl - cxr) };
            if w > 0 {
                out.push(Span::new(x0 + xtrans, y + ytrans, w as u32));
            }
            y += 1;
            xl += ml;
            xr += mr;
            j -= 1;
        }
    }

    set.add_spans(out, pixel);
}
