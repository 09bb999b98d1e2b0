//! Scanline fill for general polygons: possibly non-convex, possibly
//! self-intersecting, under either fill rule.
//!
//! Classical edge-table algorithm.  Every non-horizontal polygon edge gets a
//! Bresenham-stepped entry; entries are bucketed by the scanline at which
//! they start (the Edge Table) and migrate into the x-sorted Active Edge
//! Table as the sweep reaches them.  Under the even-odd rule a span is
//! emitted between every successive pair of active edges; under the winding
//! rule a running count of clockwise minus counterclockwise edges decides
//! which pairs bound the interior.
//!
//! Edges live in a flat arena and all linkage is by index, so the AET
//! resort and the winding walk are plain operations over index vectors.

use crate::bres::Bres;
use crate::gc::FillRule;
use crate::geom::Point;
use crate::span::{PaintedSet, Span};
use log::trace;

/// Spans buffered before each flush to the painted set.
const SPAN_BATCH: usize = 200;

#[derive(Debug)]
struct Edge {
    /// Last scanline on which this edge yields a crossing (one above the
    /// lower vertex, so the polygon's bottom scanline stays unpainted).
    ymax: i32,
    bres: Bres,
    /// Whether the edge runs top-to-bottom in vertex order; the winding
    /// rule counts these against the counterclockwise ones.
    clockwise: bool,
}

/// The edge arena plus its scanline buckets.
#[derive(Debug,Default)]
struct EdgeTable {
    edges: Vec<Edge>,
    /// Buckets of edge indices keyed by starting scanline, sorted by key.
    buckets: Vec<(i32, Vec<usize>)>,
    ymin: i32,
    ymax: i32,
}

fn build_edge_table(pts: &[Point]) -> EdgeTable {
    let mut et = EdgeTable {
        edges: vec![],
        buckets: vec![],
        ymin: i32::max_value(),
        ymax: i32::min_value(),
    };
    let mut prev = pts[pts.len() - 1];
    for &cur in pts {
        // horizontal edges contribute no crossings and are dropped here
        if prev.y != cur.y {
            let (top, bottom, clockwise) = if prev.y > cur.y {
                (cur, prev, false)
            } else {
                (prev, cur, true)
            };
            let idx = et.edges.len();
            et.edges.push(Edge {
                ymax: bottom.y - 1,
                bres: Bres::new(bottom.y - top.y, top.x, bottom.x),
                clockwise,
            });
            match et.buckets.binary_search_by_key(&top.y, |&(y, _)| y) {
                Ok(i) => et.buckets[i].1.push(idx),
                Err(i) => et.buckets.insert(i, (top.y, vec![idx])),
            }
            if top.y < et.ymin {
                et.ymin = top.y;
            }
            if bottom.y > et.ymax {
                et.ymax = bottom.y;
            }
        }
        prev = cur;
    }
    et
}

/// Fill a polygon given as a point list (implicitly closed).
pub fn fill_general<P: Copy + PartialEq>(set: &mut PaintedSet<P>, rule: FillRule, pixel: P,
                                         pts: &[Point]) {
    if pts.len() <= 2 {
        return;
    }
    let EdgeTable { mut edges, buckets, ymin, ymax } = build_edge_table(pts);
    if edges.is_empty() {
        return;
    }

    let mut aet: Vec<usize> = vec![];
    let mut out: Vec<Span> = Vec::with_capacity(SPAN_BATCH);
    let mut next_bucket = 0;

    for y in ymin..ymax {
        // migrate newly-starting edges into the AET, keeping it x-sorted
        if next_bucket < buckets.len() && buckets[next_bucket].0 == y {
            for &i in &buckets[next_bucket].1 {
                let x = edges[i].bres.minor;
                let pos = aet.iter()
                    .position(|&j| edges[j].bres.minor > x)
                    .unwrap_or_else(|| aet.len());
                aet.insert(pos, i);
            }
            next_bucket += 1;
        }

        match rule {
            FillRule::EvenOdd => {
                for pair in aet.chunks(2) {
                    if pair.len() == 2 {
                        let xl = edges[pair[0]].bres.minor;
                        let xr = edges[pair[1]].bres.minor;
                        push_span(&mut out, set, pixel, xl, xr, y);
                    }
                }
            }
            FillRule::Winding => {
                // emit exactly where the running count is nonzero
                let mut winding = 0i32;
                let mut start = 0i32;
                for &i in &aet {
                    let was_inside = winding != 0;
                    winding += if edges[i].clockwise { 1 } else { -1 };
                    let x = edges[i].bres.minor;
                    if !was_inside && winding != 0 {
                        start = x;
                    } else if was_inside && winding == 0 {
                        push_span(&mut out, set, pixel, start, x, y);
                    }
                }
            }
        }

        // retire edges that exit at this scanline, step the rest, and
        // restore the x ordering (edges may have crossed)
        aet.retain(|&i| edges[i].ymax != y);
        for &i in &aet {
            edges[i].bres.step();
        }
        aet.sort_by_key(|&i| edges[i].bres.minor);
    }

    if !out.is_empty() {
        trace!("fill_general: flushing {} trailing spans", out.len());
        set.add_spans(out, pixel);
    }
}

fn push_span<P: Copy + PartialEq>(out: &mut Vec<Span>, set: &mut PaintedSet<P>, pixel: P,
                                  xl: i32, xr: i32, y: i32) {
    if xr > xl {
        out.push(Span::new(xl, y, (xr - xl) as u32));
        if out.len() == SPAN_BATCH {
            trace!("fill_general: flushing {} spans", out.len());
            set.add_spans(std::mem::replace(out, Vec::with_capacity(SPAN_BATCH)), pixel);
        }
    }
}
