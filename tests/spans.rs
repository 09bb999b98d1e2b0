use spanrast::{PaintedSet, Span};

fn assert_disjoint_sorted(spans: &[Span]) {
    for w in spans.windows(2) {
        assert!(w[0].y <= w[1].y, "spans out of y order: {:?} {:?}", w[0], w[1]);
        if w[0].y == w[1].y {
            assert!(w[0].xend() <= w[1].x,
                    "overlapping spans on one scanline: {:?} {:?}", w[0], w[1]);
        }
    }
}

#[test]
fn empty_list_creates_no_group() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    set.add_spans(vec![], 1);
    assert!(set.is_empty());
}

#[test]
fn one_group_per_pixel_value() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    set.add_spans(vec![Span::new(0, 0, 4)], 1);
    set.add_spans(vec![Span::new(0, 1, 4)], 1);
    set.add_spans(vec![Span::new(0, 2, 4)], 2);
    assert_eq!(set.groups().len(), 2);
}

#[test]
fn uniquify_merges_overlaps() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    // three lists with overlapping and abutting runs on shared scanlines
    set.add_spans(vec![Span::new(0, 0, 5), Span::new(0, 1, 3)], 7);
    set.add_spans(vec![Span::new(3, 0, 5), Span::new(3, 1, 1)], 7);
    set.add_spans(vec![Span::new(8, 0, 2), Span::new(10, 1, 2)], 7);
    set.uniquify();

    let g = &set.groups()[0];
    assert_disjoint_sorted(g.spans());
    assert_eq!(g.spans(),
               &[Span::new(0, 0, 10), Span::new(0, 1, 4), Span::new(10, 1, 2)]);
}

#[test]
fn uniquify_is_idempotent() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    set.add_spans(vec![Span::new(0, 0, 5)], 1);
    set.add_spans(vec![Span::new(2, 0, 6)], 1);
    set.uniquify();
    let once: Vec<Span> = set.groups()[0].spans().to_vec();
    set.uniquify();
    assert_eq!(set.groups()[0].spans(), once.as_slice());
}

#[test]
fn duplicate_pixels_collapse() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    set.add_spans(vec![Span::new(4, 2, 1)], 1);
    set.add_spans(vec![Span::new(4, 2, 1)], 1);
    set.uniquify();
    assert_eq!(set.groups()[0].spans(), &[Span::new(4, 2, 1)]);
}

#[test]
fn y_range_accumulates() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    set.add_spans(vec![Span::new(0, 3, 1)], 1);
    set.add_spans(vec![Span::new(0, -2, 1), Span::new(0, 9, 1)], 1);
    assert_eq!(set.groups()[0].y_range(), Some((-2, 9)));
}

#[test]
fn clear_resets() {
    let mut set: PaintedSet<u32> = PaintedSet::new();
    set.add_spans(vec![Span::new(0, 0, 1)], 1);
    set.clear();
    assert!(set.is_empty());
}
