//! Arc and ellipse rasterization.
//!
//! Zero-width arcs are produced pixel-exact: the boundary of the ellipse is
//! computed once per (width, height): one scan along x for the shallow
//! octant, one along y for the steep octant, against the true (possibly
//! half-integer) center, then reflected into all four quadrants, filtered by
//! the arc's angle range and coalesced into spans.  An `EllipseCache`
//! memoizes the per-shape quadrant tables, which pays off when many arcs of
//! one shape are drawn (dashed circles, repeated markers).  Only the
//! explicit-cache form exists; there is no hidden global table.
//!
//! Wide arcs are approximated by polygons (an annulus sector routed through
//! the general filler) and filled arcs by a sampled boundary polygon closed
//! per the arc mode.

use crate::convex::fill_spp;
use crate::gc::{ArcMode, CapStyle, FillRule, GraphicsContext, LineStyle};
use crate::geom::{Arc, FPoint, Point, FULL_CIRCLE};
use crate::line::DashState;
use crate::span::{PaintedSet, SpanCollector};
use crate::wide;
use log::trace;
use std::collections::HashSet;
use std::f64::consts::PI;
use std::rc::Rc;

/// First-quadrant ellipse boundary, as offsets from the center doubled so
/// that half-integer centers stay exact: a pixel (px, py) is stored as
/// (2*(px - cx), 2*(cy - py)), both non-negative.
type Quadrant = Vec<(i32, i32)>;

/// Memo table for ellipse boundary quadrants, keyed by (width, height).
/// Bounded; least-recently-used shapes are evicted.
#[derive(Debug)]
pub struct EllipseCache {
    entries: Vec<((u32, u32), Rc<Quadrant>)>,
    capacity: usize,
}

impl Default for EllipseCache {
    fn default() -> Self {
        EllipseCache::new()
    }
}

impl EllipseCache {
    pub fn new() -> Self {
        EllipseCache::with_capacity(25)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EllipseCache { entries: vec![], capacity: capacity.max(1) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn quadrant(&mut self, width: u32, height: u32) -> Rc<Quadrant> {
        if let Some(i) = self.entries.iter().position(|(k, _)| *k == (width, height)) {
            trace!("ellipse cache hit: {}x{}", width, height);
            let entry = self.entries.remove(i);
            let q = Rc::clone(&entry.1);
            self.entries.insert(0, entry);
            return q;
        }
        trace!("ellipse cache miss: {}x{}", width, height);
        let q = Rc::new(compute_quadrant(width, height));
        self.entries.insert(0, ((width, height), Rc::clone(&q)));
        self.entries.truncate(self.capacity);
        q
    }
}

/// Nearest non-negative integer to `v` with the same parity as `parity`.
fn round_to_parity(v: f64, parity: i32) -> i32 {
    let p = parity & 1;
    let k = (((v - p as f64) / 2.0).round() as i32).max(0);
    2 * k + p
}

/// Boundary pixels of the first quadrant of an ellipse inscribed in a
/// (width x height) box.  The x scan chooses one pixel per column, the y
/// scan one per row; their union is the 8-connected midpoint boundary.
fn compute_quadrant(width: u32, height: u32) -> Quadrant {
    let a = width as f64 / 2.0;
    let b = height as f64 / 2.0;
    let w = width as i32;
    let h = height as i32;
    let mut set: HashSet<(i32, i32)> = HashSet::new();

    // one pixel per column: dx2 runs over offsets with the parity of w
    let mut dx2 = w & 1;
    while dx2 <= w {
        let dx = dx2 as f64 / 2.0;
        let dy = b * (1.0 - (dx / a).powi(2)).max(0.0).sqrt();
        set.insert((dx2, round_to_parity(2.0 * dy, h)));
        dx2 += 2;
    }
    // one pixel per row
    let mut dy2 = h & 1;
    while dy2 <= h {
        let dy = dy2 as f64 / 2.0;
        let dx = a * (1.0 - (dy / b).powi(2)).max(0.0).sqrt();
        set.insert((round_to_parity(2.0 * dx, w), dy2));
        dy2 += 2;
    }

    let mut out: Quadrant = set.into_iter().collect();
    out.sort();
    out
}

/// Angular sweep test.  `theta` is the parametric angle of a boundary pixel,
/// `start` the arc's start angle (radians) and `extent` its signed extent.
fn in_sweep(theta: f64, start: f64, extent: f64) -> bool {
    let tau = 2.0 * PI;
    let d = if extent >= 0.0 {
        (theta - start).rem_euclid(tau)
    } else {
        (start - theta).rem_euclid(tau)
    };
    d <= extent.abs() + 1e-9 || (tau - d) <= 1e-9
}

fn deg64_to_rad(a: i32) -> f64 {
    a as f64 / 64.0 * PI / 180.0
}

/// All boundary pixels of `arc`, with the parametric angle of each.
fn arc_pixels(arc: &Arc, cache: &mut EllipseCache) -> Vec<(Point, f64)> {
    let quad = cache.quadrant(arc.width, arc.height);
    let cx2 = 2 * arc.x + arc.width as i32;
    let cy2 = 2 * arc.y + arc.height as i32;
    let full = arc.angle2 >= FULL_CIRCLE || arc.angle2 <= -FULL_CIRCLE;
    let start = deg64_to_rad(arc.angle1);
    let extent = deg64_to_rad(arc.angle2);

    let mut seen: HashSet<Point> = HashSet::new();
    let mut out = vec![];
    for &(dx2, dy2) in quad.iter() {
        for &(sx, sy) in &[(1, 1), (-1, 1), (-1, -1), (1, -1)] {
            let px = (cx2 + sx * dx2) / 2;
            let py = (cy2 - sy * dy2) / 2;
            let p = Point::new(px, py);
            if !seen.insert(p) {
                continue;
            }
            let theta = ((sy * dy2) as f64 / arc.height as f64)
                .atan2((sx * dx2) as f64 / arc.width as f64);
            if full || in_sweep(theta, start, extent) {
                out.push((p, theta));
            }
        }
    }
    out
}

fn arc_degenerate(arc: &Arc) -> bool {
    arc.width == 0 || arc.height == 0 || arc.angle2 == 0
}

/// Zero-width arcs: Bresenham-exact boundary pixels, as spans.
pub fn zero_poly_arc<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                          arcs: &[Arc], cache: &mut EllipseCache) {
    let dashed = gc.effectively_dashed();
    for arc in arcs {
        if arc_degenerate(arc) {
            continue;
        }
        let mut pixels = arc_pixels(arc, cache);
        let mut col = SpanCollector::new();
        if dashed {
            // walk the pixels in sweep order, one pixel of dash per pixel
            let start = deg64_to_rad(arc.angle1);
            let ccw = arc.angle2 >= 0;
            let tau = 2.0 * PI;
            pixels.sort_by(|a, b| {
                let ka = if ccw { (a.1 - start).rem_euclid(tau) } else { (start - a.1).rem_euclid(tau) };
                let kb = if ccw { (b.1 - start).rem_euclid(tau) } else { (start - b.1).rem_euclid(tau) };
                ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
            });
            let double = gc.line_style == LineStyle::DoubleDash;
            let mut dash = DashState::new(gc.dashes(), gc.dash_offset);
            for (p, _) in pixels {
                if dash.is_on() {
                    col.plot(p.x, p.y, gc.on_dash_pixel(dash.on_index()));
                } else if double {
                    col.plot(p.x, p.y, gc.off_pixel());
                }
                dash.advance(1);
            }
        } else {
            let pixel = gc.drawing_pixel();
            pixels.sort_by_key(|(p, _)| (p.y, p.x));
            for (p, _) in pixels {
                col.plot(p.x, p.y, pixel);
            }
        }
        col.flush(set);
    }
}

/// Sampled polyline along the arc of an ellipse with semi-axes grown by
/// `grow`, from `start` sweeping `extent` radians, endpoints included.
fn sample_arc(arc: &Arc, grow: f64, start: f64, extent: f64) -> Vec<FPoint> {
    let c = arc.center();
    let a = (arc.width as f64 / 2.0 + grow).max(0.0);
    let b = (arc.height as f64 / 2.0 + grow).max(0.0);
    let rmax = a.max(b).max(1.0);
    let da = 2.0 * ((rmax - 0.25).max(0.0) / rmax).acos();
    let n = ((extent.abs() / da).ceil() as usize).max(4);
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let t = start + extent * i as f64 / n as f64;
        out.push(FPoint::new(c.x + a * t.cos(), c.y - b * t.sin()));
    }
    out
}

fn round_poly(pts: &[FPoint]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts {
        let q = Point::new(p.x.round() as i32, p.y.round() as i32);
        if out.last() != Some(&q) {
            out.push(q);
        }
    }
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

fn clamp_extent(angle2: i32) -> i32 {
    if angle2 > FULL_CIRCLE {
        FULL_CIRCLE
    } else if angle2 < -FULL_CIRCLE {
        -FULL_CIRCLE
    } else {
        angle2
    }
}

/// Wide arcs: a polygonal annulus sector through the general filler, plus
/// caps on the free ends.
pub fn wide_poly_arc<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                          arcs: &[Arc]) {
    let hw = gc.line_width as f64 / 2.0;
    let pixel = gc.drawing_pixel();
    for arc in arcs {
        if arc_degenerate(arc) {
            continue;
        }
        let start = deg64_to_rad(arc.angle1);
        let extent = deg64_to_rad(clamp_extent(arc.angle2));
        let full = clamp_extent(arc.angle2).abs() == FULL_CIRCLE;

        if gc.effectively_dashed() {
            // split the sampled center line by arc length and stroke each
            // on dash as a wide polyline of its own
            let center = sample_arc(arc, 0.0, start, extent);
            let double = gc.line_style == LineStyle::DoubleDash;
            let mut polys = vec![];
            for (piece, on, idx) in wide::dash_pieces(gc.dashes(), gc.dash_offset as f64, &center) {
                if on {
                    wide::stroke_polyline(gc, &piece, gc.on_dash_pixel(idx), gc.cap_style,
                                          &mut polys);
                } else if double {
                    wide::stroke_polyline(gc, &piece, gc.off_pixel(), CapStyle::Butt, &mut polys);
                }
            }
            for poly in polys {
                fill_spp(set, poly.pixel, &poly.verts, 0, 0, 0.0, 0.0);
            }
            continue;
        }

        let outer = sample_arc(arc, hw, start, extent);
        let inner_collapsed = arc.width as f64 / 2.0 <= hw || arc.height as f64 / 2.0 <= hw;

        let mut poly: Vec<FPoint> = vec![];
        if inner_collapsed {
            // the brush reaches the center: a solid sector
            poly.extend(outer.iter().cloned());
            if !full {
                poly.push(arc.center());
            }
        } else {
            let inner = sample_arc(arc, -hw, start, extent);
            if full {
                // ring: close each boundary and join them by a coincident
                // seam, which cancels under the even-odd rule
                poly.extend(outer.iter().cloned());
                poly.push(outer[0]);
                poly.push(inner[0]);
                poly.extend(inner.iter().rev().cloned());
            } else {
                poly.extend(outer.iter().cloned());
                poly.extend(inner.iter().rev().cloned());
            }
        }
        crate::polygen::fill_general(set, FillRule::EvenOdd, pixel, &round_poly(&poly));

        if !full {
            // caps at the two free ends, pointing out along the tangents
            let end = start + extent;
            for &(theta, flip) in &[(start, -1.0f64), (end, 1.0f64)] {
                let p = arc.point_at(theta);
                let a = arc.width as f64 / 2.0;
                let b = arc.height as f64 / 2.0;
                // tangent of (a cos t, -b sin t), oriented outward
                let (tx, ty) = (-a * theta.sin(), -b * theta.cos());
                let len = (tx * tx + ty * ty).sqrt();
                if len == 0.0 {
                    continue;
                }
                let dir = FPoint::new(flip * extent.signum() * tx / len,
                                      flip * extent.signum() * ty / len);
                if let Some(verts) = wide::cap_poly(gc.cap_style, p, dir, hw) {
                    fill_spp(set, pixel, &verts, 0, 0, 0.0, 0.0);
                }
            }
        }
    }
}

/// Filled arcs: the sampled boundary closed to the center (pie slice) or
/// along the chord.
pub fn fill_poly_arcs<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                           arcs: &[Arc]) {
    let pixel = gc.drawing_pixel();
    for arc in arcs {
        if arc_degenerate(arc) {
            continue;
        }
        let start = deg64_to_rad(arc.angle1);
        let extent = deg64_to_rad(clamp_extent(arc.angle2));
        let full = clamp_extent(arc.angle2).abs() == FULL_CIRCLE;

        let mut poly = sample_arc(arc, 0.0, start, extent);
        if !full && gc.arc_mode == ArcMode::PieSlice {
            poly.push(arc.center());
        }
        // chord mode closes implicitly
        crate::polygen::fill_general(set, FillRule::EvenOdd, pixel, &round_poly(&poly));
    }
}
