//! Span accumulation and merging.
//!
//! Every drawing routine in this crate produces its output as lists of
//! horizontal pixel runs (`Span`s) and feeds them into a `PaintedSet`.  The
//! painted set partitions the runs by pixel value and, once `uniquify` has
//! run, guarantees that no pixel appears twice within a partition: the
//! touch-each-pixel-once rule that keeps XOR-like or blending pixel merges
//! from double-applying where primitives overlap.

use log::trace;

/// A horizontal run of pixels on one scanline.
///
/// The run covers the half-open interval `[x, x + width)`: closed on the
/// left, open on the right.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Span {
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

impl Span {
    pub fn new(x: i32, y: i32, width: u32) -> Self {
        Span { x, y, width }
    }
    /// One past the rightmost pixel of the run.
    pub fn xend(&self) -> i32 {
        self.x + self.width as i32
    }
}

/// Sort a span list by y, preserving the relative order of spans that share
/// a scanline.
pub fn sort_spans_y(spans: &mut [Span]) {
    spans.sort_by_key(|s| s.y);
}

/// All span lists painted so far with one particular pixel value, plus the
/// cumulative y range they cover.
///
/// A group holds more than one list because most drawing operations paint
/// several times (one flush per segment, per polygon, per buffer-full).
#[derive(Debug)]
pub struct SpanGroup<P> {
    pixel: P,
    lists: Vec<Vec<Span>>,
    ymin: i32,
    ymax: i32,
}

impl<P: Copy + PartialEq> SpanGroup<P> {
    fn new(pixel: P) -> Self {
        SpanGroup { pixel, lists: vec![], ymin: i32::max_value(), ymax: i32::min_value() }
    }

    pub fn pixel(&self) -> P {
        self.pixel
    }

    /// The merged span list.  Only meaningful after the owning set has been
    /// uniquified; before that it returns whatever was added first.
    pub fn spans(&self) -> &[Span] {
        self.lists.first().map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Cumulative y range over every list added so far, or `None` while the
    /// group is empty.
    pub fn y_range(&self) -> Option<(i32, i32)> {
        if self.ymin <= self.ymax {
            Some((self.ymin, self.ymax))
        } else {
            None
        }
    }

    fn add(&mut self, spans: Vec<Span>) {
        debug_assert!(spans.windows(2).all(|w| w[0].y <= w[1].y),
                      "span list must be y-sorted");
        if let (Some(first), Some(last)) = (spans.first(), spans.last()) {
            if first.y < self.ymin {
                self.ymin = first.y;
            }
            if last.y > self.ymax {
                self.ymax = last.y;
            }
        }
        self.lists.push(spans);
    }

    /// Merge all constituent lists into a single y-sorted list whose runs
    /// are pairwise disjoint in x on every scanline.
    ///
    /// A group holding a single list is left untouched: each drawing routine
    /// already emits internally disjoint lists, so there is nothing to do.
    fn uniquify(&mut self) {
        if self.lists.len() <= 1 {
            return;
        }
        let nlists = self.lists.len();
        let mut all: Vec<Span> = Vec::with_capacity(self.lists.iter().map(|l| l.len()).sum());
        for list in self.lists.drain(..) {
            all.extend(list);
        }
        all.sort_by(|a, b| (a.y, a.x).cmp(&(b.y, b.x)));

        let mut merged: Vec<Span> = Vec::with_capacity(all.len());
        for s in all {
            if s.width == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.y == s.y && s.x <= last.xend() => {
                    // overlapping or abutting runs coalesce
                    if s.xend() > last.xend() {
                        last.width = (s.xend() - last.x) as u32;
                    }
                }
                _ => merged.push(s),
            }
        }
        trace!("uniquify: {} lists merged into {} spans", nlists, merged.len());
        self.lists = vec![merged];
    }
}

/// Accumulator for one compound drawing operation.
///
/// Spans are added by the drawing routines, partitioned by pixel value (at
/// most one `SpanGroup` per distinct value), and merged by `uniquify` before
/// the set is composited onto a canvas or handed to an encoder.
#[derive(Debug,Default)]
pub struct PaintedSet<P> {
    groups: Vec<SpanGroup<P>>,
}

impl<P: Copy + PartialEq> PaintedSet<P> {
    pub fn new() -> Self {
        PaintedSet { groups: vec![] }
    }

    /// Append a y-sorted span list painted with `pixel`, taking ownership.
    ///
    /// An empty list is dropped without creating a group.
    pub fn add_spans(&mut self, spans: Vec<Span>, pixel: P) {
        if spans.is_empty() {
            return;
        }
        // number of distinct pixel values per operation is small, so a
        // linear scan beats any map here
        let idx = match self.groups.iter().position(|g| g.pixel == pixel) {
            Some(i) => i,
            None => {
                self.groups.push(SpanGroup::new(pixel));
                self.groups.len() - 1
            }
        };
        self.groups[idx].add(spans);
    }

    /// Merge every group's lists so that each pixel is represented at most
    /// once per group.  Idempotent.
    pub fn uniquify(&mut self) {
        for g in &mut self.groups {
            g.uniquify();
        }
    }

    pub fn groups(&self) -> &[SpanGroup<P>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Drop all accumulated spans, keeping the set reusable.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

/// Builds span lists out of single-pixel plots, coalescing horizontally
/// adjacent plots on the same scanline into one run.
///
/// Used by the zero-width line and arc drawers, which naturally produce
/// their output pixel by pixel.
#[derive(Debug)]
pub(crate) struct SpanCollector<P> {
    per_pixel: Vec<(P, Vec<Span>)>,
}

impl<P: Copy + PartialEq> SpanCollector<P> {
    pub fn new() -> Self {
        SpanCollector { per_pixel: vec![] }
    }

    pub fn plot(&mut self, x: i32, y: i32, pixel: P) {
        let idx = match self.per_pixel.iter().position(|(p, _)| *p == pixel) {
            Some(i) => i,
            None => {
                self.per_pixel.push((pixel, vec![]));
                self.per_pixel.len() - 1
            }
        };
        let list = &mut self.per_pixel[idx].1;
        match list.last_mut() {
            Some(last) if last.y == y && x == last.xend() => last.width += 1,
            Some(last) if last.y == y && x + 1 == last.x => {
                // leftward walk extends the run at its left end
                last.x = x;
                last.width += 1;
            }
            _ => list.push(Span::new(x, y, 1)),
        }
    }

    /// Sort each per-pixel list by y and move everything into `set`.
    pub fn flush(&mut self, set: &mut PaintedSet<P>) {
        for (pixel, mut list) in self.per_pixel.drain(..) {
            sort_spans_y(&mut list);
            set.add_spans(list, pixel);
        }
    }
}
