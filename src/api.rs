//! The drawing entry points.
//!
//! Each function rasterizes one batch of primitives into a `PaintedSet` and
//! uniquifies the set before returning, so a caller can composite it
//! immediately, or keep feeding the same set from further calls (uniquify
//! is idempotent) to build one compound operation that still paints every
//! pixel at most once per pixel value.

use crate::arc as arcmod;
use crate::arc::EllipseCache;
use crate::gc::{FillRule, GraphicsContext};
use crate::geom::{absolutize, Arc, CoordMode, Point, Rect};
use crate::line;
use crate::span::{PaintedSet, Span};
use crate::wide;
use crate::{convex, polygen};

/// Which polygon filler a fill request may use.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PolygonShape {
    /// No promises: the general scanline filler runs.
    General,
    /// Caller guarantees convexity; the fast filler runs and non-convex
    /// input yields undefined output.
    Convex,
}

/// Paint one pixel per point.
pub fn draw_points<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                        mode: CoordMode, pts: &[Point]) {
    if !pts.is_empty() {
        let pts = absolutize(mode, pts);
        let mut spans: Vec<Span> = pts.iter().map(|p| Span::new(p.x, p.y, 1)).collect();
        spans.sort_by_key(|s| (s.y, s.x));
        spans.dedup();
        set.add_spans(spans, gc.drawing_pixel());
    }
    set.uniquify();
}

/// Draw a polyline.  Width 0 selects the Bresenham drawers; dashing follows
/// the context's line style.
pub fn draw_lines<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                       mode: CoordMode, pts: &[Point]) {
    if !pts.is_empty() {
        draw_lines_internal(set, gc, mode, pts);
    }
    set.uniquify();
}

pub(crate) fn draw_lines_internal<P: Copy + PartialEq>(set: &mut PaintedSet<P>,
                                                       gc: &GraphicsContext<P>,
                                                       mode: CoordMode, pts: &[Point]) {
    let pts = absolutize(mode, pts);
    if gc.line_width == 0 {
        if gc.effectively_dashed() {
            line::zero_dash(set, gc, &pts);
        } else {
            line::zero_line(set, gc, &pts);
        }
    } else if gc.effectively_dashed() {
        wide::wide_dash(set, gc, &pts);
    } else {
        wide::wide_line(set, gc, &pts);
    }
}

/// Fill a polygon given as a point list (implicitly closed).
pub fn fill_polygon<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                         shape: PolygonShape, mode: CoordMode, pts: &[Point]) {
    if !pts.is_empty() {
        let pts = absolutize(mode, pts);
        match shape {
            PolygonShape::General => {
                polygen::fill_general(set, gc.fill_rule, gc.drawing_pixel(), &pts)
            }
            PolygonShape::Convex => convex::fill_convex(set, gc.drawing_pixel(), &pts),
        }
    }
    set.uniquify();
}

/// Outline rectangles, honoring the context's line attributes.
pub fn draw_rectangles<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                            rects: &[Rect]) {
    for r in rects {
        let x1 = r.x + r.width as i32;
        let y1 = r.y + r.height as i32;
        let outline = [
            Point::new(r.x, r.y),
            Point::new(x1, r.y),
            Point::new(x1, y1),
            Point::new(r.x, y1),
            Point::new(r.x, r.y),
        ];
        draw_lines_internal(set, gc, CoordMode::Origin, &outline);
    }
    set.uniquify();
}

/// Fill rectangles.  Right and bottom edges stay unpainted so adjacent
/// rectangles abut with no overlaps and no gaps.
pub fn fill_rectangles<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                            rects: &[Rect]) {
    for r in rects {
        if r.width == 0 || r.height == 0 {
            continue;
        }
        let spans = (0..r.height as i32)
            .map(|dy| Span::new(r.x, r.y + dy, r.width))
            .collect();
        set.add_spans(spans, gc.drawing_pixel());
    }
    set.uniquify();
}

/// Draw arc outlines.  Width 0 produces pixel-exact Bresenham boundaries,
/// computed through (and memoized in) the caller's ellipse cache; wider
/// strokes go through the polygon fillers.
pub fn draw_arcs<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                      arcs: &[Arc], cache: &mut EllipseCache) {
    if gc.line_width == 0 {
        arcmod::zero_poly_arc(set, gc, arcs, cache);
    } else {
        arcmod::wide_poly_arc(set, gc, arcs);
    }
    set.uniquify();
}

/// Fill arc sectors per the context's arc mode (pie slice or chord).
pub fn fill_arcs<P: Copy + PartialEq>(set: &mut PaintedSet<P>, gc: &GraphicsContext<P>,
                                      arcs: &[Arc]) {
    arcmod::fill_poly_arcs(set, gc, arcs);
    set.uniquify();
}

/// Fill a polygon with an explicit rule and pixel, bypassing a context.
/// Exists for callers that feed the filler from their own decompositions.
pub fn fill_polygon_with<P: Copy + PartialEq>(set: &mut PaintedSet<P>, rule: FillRule, pixel: P,
                                              pts: &[Point]) {
    polygen::fill_general(set, rule, pixel, pts);
    set.uniquify();
}
