//! Wide (width > 0) polylines, solid and dashed.
//!
//! A wide stroke is decomposed into a stream of convex polygons: one
//! rectangle per segment body, one wedge per join, one cap polygon per free
//! end. Every polygon is rasterized through the subpixel convex filler,
//! so all the pieces share edges without gaps.  The decomposition itself is
//! public: vector backends consume the polygon stream directly and never
//! rasterize it.

use crate::convex::fill_spp;
use crate::gc::{CapStyle, GraphicsContext, JoinStyle, LineStyle};
use crate::geom::{FPoint, Point};
use crate::span::PaintedSet;
use std::f64::consts::PI;

/// One convex piece of a decomposed stroke, tagged with the pixel value it
/// is to be painted with.
#[derive(Debug,Clone)]
pub struct StrokePoly<P> {
    pub verts: Vec<FPoint>,
    pub pixel: P,
}

/// Angular step that keeps the chord error of a polygonal arc of radius `r`
/// under an eighth of a pixel.
fn round_step(r: f64) -> f64 {
    2.0 * (r / (r + 0.125)).acos()
}

fn unit(from: FPoint, to: FPoint) -> FPoint {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    FPoint::new(dx / len, dy / len)
}

fn dist(a: FPoint, b: FPoint) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Polygonal arc on the circle of radius `r` around `c`, from angle `a0`
/// sweeping by `sweep` radians.  Endpoints excluded.
fn arc_points(c: FPoint, r: f64, a0: f64, sweep: f64, out: &mut Vec<FPoint>) {
    let da = round_step(r);
    let n = (sweep.abs() / da).ceil() as usize;
    if n < 2 {
        return;
    }
    let step = sweep / n as f64;
    for i in 1..n {
        let a = a0 + step * i as f64;
        out.push(FPoint::new(c.x + r * a.cos(), c.y + r * a.sin()));
    }
}

/// The body rectangle of one segment.
fn segment_body(p0: FPoint, p1: FPoint, hw: f64) -> Vec<FPoint> {
    let u = unit(p0, p1);
    let nx = u.y * hw;
    let ny = -u.x * hw;
    vec![
        FPoint::new(p0.x + nx, p0.y + ny),
        FPoint::new(p1.x + nx, p1.y + ny),
        FPoint::new(p1.x - nx, p1.y - ny),
        FPoint::new(p0.x - nx, p0.y - ny),
    ]
}

/// The join polygon at the interior vertex `p1` between segments `p0->p1`
/// and `p1->p2`, or `None` when the segments are collinear and the bodies
/// already abut.
fn join_poly<P: Copy + PartialEq>(gc: &GraphicsContext<P>, p0: FPoint, p1: FPoint, p2: FPoint,
                                  hw: f64) -> Option<Vec<FPoint>> {
    let u = unit(p0, p1);
    let v = unit(p1, p2);
    let cross = u.x * v.y - u.y * v.x;
    if cross == 0.0 {
        return None;
    }
    // normals of the two bodies on the gap side of the turn
    let (na, nb) = if cross > 0.0 {
        (FPoint::new(u.y * hw, -u.x * hw), FPoint::new(v.y * hw, -v.x * hw))
    } else {
        (FPoint::new(-u.y * hw, u.x * hw), FPoint::new(-v.y * hw, v.x * hw))
    };
    let a = FPoint::new(p1.x + na.x, p1.y + na.y);
    let b = FPoint::new(p1.x + nb.x, p1.y + nb.y);

    // interior angle between the segments; the miter-spike length is
    // hw / sin(phi/2)
    let sin_half = ((1.0 + (u.x * v.x + u.y * v.y)) / 2.0).max(0.0).sqrt();

    let verts = match gc.join_style {
        JoinStyle::Miter if sin_half > 0.0 && 1.0 / sin_half <= gc.miter_limit => {
            let len = hw / sin_half;
            let mx = na.x + nb.x;
            let my = na.y + nb.y;
            let mlen = (mx * mx + my * my).sqrt();
            let tip = FPoint::new(p1.x + mx / mlen * len, p1.y + my / mlen * len);
            vec![p1, a, tip, b]
        }
        JoinStyle::Round => {
            let mut verts = vec![p1, a];
            let a0 = na.y.atan2(na.x);
            let a1 = nb.y.atan2(nb.x);
            // the gap arc is the short way around, always under pi
            let mut sweep = a1 - a0;
            if sweep > PI {
                sweep -= 2.0 * PI;
            } else if sweep < -PI {
                sweep += 2.0 * PI;
            }
            arc_points(p1, hw, a0, sweep, &mut verts);
            verts.push(b);
            verts
        }
        JoinStyle::Triangular => {
            let mx = na.x + nb.x;
            let my = na.y + nb.y;
            let mlen = (mx * mx + my * my).sqrt();
            if mlen == 0.0 {
                vec![p1, a, b]
            } else {
                let tip = FPoint::new(p1.x + mx / mlen * hw, p1.y + my / mlen * hw);
                vec![p1, a, tip, b]
            }
        }
        // bevel, and miter past its limit
        _ => vec![p1, a, b],
    };
    Some(verts)
}

/// The cap polygon at endpoint `p`, where `dir` is the unit vector pointing
/// out of the polyline.  Butt caps add nothing: the body edge is the cap.
pub(crate) fn cap_poly(cap: CapStyle, p: FPoint, dir: FPoint, hw: f64) -> Option<Vec<FPoint>> {
    let nx = dir.y * hw;
    let ny = -dir.x * hw;
    let a = FPoint::new(p.x + nx, p.y + ny);
    let b = FPoint::new(p.x - nx, p.y - ny);
    let ox = dir.x * hw;
    let oy = dir.y * hw;
    match cap {
        CapStyle::Butt => None,
        CapStyle::Projecting => Some(vec![
            a,
            FPoint::new(a.x + ox, a.y + oy),
            FPoint::new(b.x + ox, b.y + oy),
            b,
        ]),
        CapStyle::Triangular => Some(vec![a, FPoint::new(p.x + ox, p.y + oy), b]),
        CapStyle::Round => {
            let mut verts = vec![a];
            let a0 = ny.atan2(nx);
            let a1 = (-ny).atan2(-nx);
            // half circle passing through p + dir*hw
            let mut sweep = a1 - a0;
            if sweep > PI {
                sweep -= 2.0 * PI;
            } else if sweep < -PI {
                sweep += 2.0 * PI;
            }
            // the two candidate half circles differ by which side of the
            // butt edge they lie on; pick the one containing p + dir*hw
            let mid = a0 + sweep / 2.0;
            let probe = FPoint::new(p.x + hw * mid.cos(), p.y + hw * mid.sin());
            let want = FPoint::new(p.x + ox, p.y + oy);
            let sweep = if dist(probe, want) < hw { sweep } else { -sweep };
            arc_points(p, hw, a0, sweep, &mut verts);
            verts.push(b);
            Some(verts)
        }
    }
}

/// A dot for a polyline that never leaves its starting point.
fn dot_poly(cap: CapStyle, p: FPoint, hw: f64) -> Option<Vec<FPoint>> {
    match cap {
        CapStyle::Butt => None,
        CapStyle::Projecting => Some(vec![
            FPoint::new(p.x - hw, p.y - hw),
            FPoint::new(p.x + hw, p.y - hw),
            FPoint::new(p.x + hw, p.y + hw),
            FPoint::new(p.x - hw, p.y + hw),
        ]),
        CapStyle::Triangular => Some(vec![
            FPoint::new(p.x, p.y - hw),
            FPoint::new(p.x + hw, p.y),
            FPoint::new(p.x, p.y + hw),
            FPoint::new(p.x - hw, p.y),
        ]),
        CapStyle::Round => {
            let mut verts = vec![FPoint::new(p.x + hw, p.y)];
            arc_points(p, hw, 0.0, 2.0 * PI, &mut verts);
            Some(verts)
        }
    }
}

/// Decompose one open or closed polyline into stroke polygons.
/// `caps` selects the cap style for the free ends (dashes use the same
/// machinery but force butt ends for "off" dashes).
pub(crate) fn stroke_polyline<P: Copy + PartialEq>(gc: &GraphicsContext<P>, pts: &[FPoint],
                                                   pixel: P, caps: CapStyle,
                                                   out: &mut Vec<StrokePoly<P>>) {
    let hw = gc.line_width as f64 / 2.0;

    // collapse zero-length segments
    let mut v: Vec<FPoint> = Vec::with_capacity(pts.len());
    for &p in pts {
        if v.last().map_or(true, |&q| dist(p, q) > 0.0) {
            v.push(p);
        }
    }
    if v.len() == 1 {
        if let Some(verts) = dot_poly(caps, v[0], hw) {
            out.push(StrokePoly { verts, pixel });
        }
        return;
    }

    let closed = v.len() > 3 && v[0] == v[v.len() - 1];
    if closed {
        v.pop();
    }
    let n = v.len();

    // segment bodies
    let last_seg = if closed { n } else { n - 1 };
    for i in 0..last_seg {
        let body = segment_body(v[i], v[(i + 1) % n], hw);
        out.push(StrokePoly { verts: body, pixel });
    }

    // joins at interior vertices (every vertex, when closed)
    let join_range = if closed { 0..n } else { 1..n - 1 };
    for i in join_range {
        let prev = v[(i + n - 1) % n];
        let next = v[(i + 1) % n];
        if let Some(verts) = join_poly(gc, prev, v[i], next, hw) {
            out.push(StrokePoly { verts, pixel });
        }
    }

    // caps at the two free ends
    if !closed {
        let d0 = unit(v[1], v[0]);
        if let Some(verts) = cap_poly(caps, v[0], d0, hw) {
            out.push(StrokePoly { verts, pixel });
        }
        let d1 = unit(v[n - 2], v[n - 1]);
        if let Some(verts) = cap_poly(caps, v[n - 1], d1, hw) {
            out.push(StrokePoly { verts, pixel });
        }
    }
}

fn to_fpoints(pts: &[Point]) -> Vec<FPoint> {
    pts.iter().map(|p| FPoint::new(p.x as f64, p.y as f64)).collect()
}

/// Decompose a solid wide polyline into its stroke polygons without
/// rasterizing anything.
pub fn decompose_wide_polyline<P: Copy + PartialEq>(gc: &GraphicsContext<P>, pts: &[Point])
                                                    -> Vec<StrokePoly<P>> {
    let mut out = vec![];
    if !pts.is_empty() {
        stroke_polyline(gc, &to_fpoints(pts), gc.drawing_pixel(), gc.cap_style, &mut out);
    }
    out
}

/// Floating-point dash walker for the wide-line decomposition, where dash
/// boundaries fall at arbitrary positions along a segment.
#[derive(Debug)]
pub(crate) struct FDash<'a> {
    dashes: &'a [u32],
    k: usize,
    remaining: f64,
    on_count: usize,
}

impl<'a> FDash<'a> {
    pub fn new(dashes: &'a [u32], offset: f64) -> Self {
        let mut s = FDash { dashes, k: 0, remaining: dashes[0] as f64, on_count: 0 };
        s.advance_to_offset(offset);
        s
    }

    pub fn is_on(&self) -> bool {
        self.k % 2 == 0
    }

    pub fn on_index(&self) -> usize {
        self.on_count
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn next_dash(&mut self) {
        if self.is_on() {
            self.on_count += 1;
        }
        self.k += 1;
        self.remaining = self.dashes[self.k % self.dashes.len()] as f64;
    }

    fn advance_to_offset(&mut self, mut offset: f64) {
        while offset >= self.remaining {
            offset -= self.remaining;
            self.next_dash();
        }
        self.remaining -= offset;
    }

    /// Consume `d` of the current dash; returns true when the dash ended
    /// exactly there and the walker moved to the next one.
    pub fn consume(&mut self, d: f64) -> bool {
        if d + 1e-9 >= self.remaining {
            self.next_dash();
            true
        } else {
            self.remaining -= d;
            false
        }
    }
}

/// Split a polyline into dash pieces.  Each piece is a polyline of its own
/// (an "on" dash crossing a vertex keeps its join), tagged with its
/// on/off-ness and the ordinal of the on dash it belongs to.
pub(crate) fn dash_pieces(dashes: &[u32], offset: f64, pts: &[FPoint])
                          -> Vec<(Vec<FPoint>, bool, usize)> {
    let mut pieces = vec![];
    let mut dash = FDash::new(dashes, offset);
    let mut cur: Vec<FPoint> = vec![pts[0]];
    let mut cur_on = dash.is_on();
    let mut cur_idx = dash.on_index();

    for w in pts.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg = dist(a, b);
        if seg == 0.0 {
            continue;
        }
        let u = unit(a, b);
        let mut t = 0.0;
        while t < seg {
            let take = (seg - t).min(dash.remaining());
            let tend = t + take;
            let end = FPoint::new(a.x + u.x * tend, a.y + u.y * tend);
            cur.push(end);
            t = tend;
            if dash.consume(take) {
                pieces.push((std::mem::replace(&mut cur, vec![end]), cur_on, cur_idx));
                cur_on = dash.is_on();
                cur_idx = dash.on_index();
            }
        }
    }
    if cur.len() > 1 {
        pieces.push((cur, cur_on, cur_idx));
    }
    pieces
}

/// Decompose a dashed wide polyline: dash break-points are computed along
/// the polyline first, then each on dash (and, for double-dashed lines,
/// each off dash) is stroked independently, caps included.
pub fn decompose_wide_dashes<P: Copy + PartialEq>(gc: &GraphicsContext<P>, pts: &[Point])
                                                  -> Vec<StrokePoly<P>> {
    let mut out = vec![];
    if pts.is_empty() {
        return out;
    }
    if !gc.effectively_dashed() {
        return decompose_wide_polyline(gc, pts);
    }
    let double = gc.line_style == LineStyle::DoubleDash;
    let fpts = to_fpoints(pts);
    for (piece, on, idx) in dash_pieces(gc.dashes(), gc.dash_offset as f64, &fpts) {
        if on {
            stroke_polyline(gc, &piece, gc.on_dash_pixel(idx), gc.cap_style, &mut out);
        } else if double {
            // off dashes abut the on dashes exactly: butt ends
            stroke_polyline(gc, &piece, gc.off_pixel(), CapStyle::Butt, &mut out);
        }
    }
    out
}

fn fill_polys<P: Copy + PartialEq>(set: &mut PaintedSet<P>, polys: Vec<StrokePoly<P>>) {
    for poly in polys {
        fill_spp(set, poly.pixel, &poly.verts, 0, 0, 0.0, 0.0);
    }
}

/// Rasterize a solid wide polyline.
pub fn wide_line<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                      pts: &[Point]) {
    fill_polys(set, decompose_wide_polyline(gc, pts));
}

/// Rasterize a dashed wide polyline.
pub fn wide_dash<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                      pts: &[Point]) {
    fill_polys(set, decompose_wide_dashes(gc, pts));
}
