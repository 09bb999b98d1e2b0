use spanrast::{fill_rectangles, Bitmap, Canvas, CoordMode, Custom, draw_lines, FPoint,
               GradientParallel, GraphicsContext, Overwrite, PaintedSet, Pixmap, Point, Rect,
               Span};

fn gc() -> GraphicsContext<u32> {
    GraphicsContext::new(vec![0, 1]).unwrap()
}

#[test]
fn zero_sized_canvas_is_refused() {
    assert!(Canvas::<u32>::new(0, 4, 0).is_none());
    assert!(Canvas::<u32>::new(4, 0, 0).is_none());
    assert!(Pixmap::<u32>::new(0, 1, 0).is_none());
    assert!(Bitmap::new(1, 0, true).is_none());
}

#[test]
fn spans_clip_at_all_four_edges() {
    let mut canvas = Canvas::new(4, 4, 0u32).unwrap();
    let spans = vec![
        Span::new(-2, -1, 8), // above
        Span::new(-2, 0, 8),  // clipped left and right
        Span::new(2, 2, 1),   // inside
        Span::new(-5, 3, 2),  // entirely left
        Span::new(0, 9, 4),   // below
    ];
    canvas.paint_spans(7, &spans, Point::new(0, 0));
    let mut want = vec![0u32; 16];
    for x in 0..4 {
        want[x] = 7;
    }
    want[2 * 4 + 2] = 7;
    assert_eq!(canvas.drawable.pixels(), want.as_slice());
}

#[test]
fn offset_translates_spans() {
    let mut canvas = Canvas::new(5, 5, 0u32).unwrap();
    canvas.paint_spans(3, &[Span::new(0, 0, 2)], Point::new(2, 4));
    assert_eq!(canvas.drawable.get(2, 4), 3);
    assert_eq!(canvas.drawable.get(3, 4), 3);
    assert_eq!(canvas.drawable.get(1, 4), 0);
}

#[test]
fn whole_list_vertical_reject_is_cheap_and_correct() {
    let mut canvas = Canvas::new(4, 4, 0u32).unwrap();
    canvas.paint_spans(5, &[Span::new(0, 10, 4), Span::new(0, 11, 4)], Point::new(0, 0));
    assert!(canvas.drawable.pixels().iter().all(|&p| p == 0));
}

#[test]
fn stipple_masks_pixels_and_tiles() {
    let mut canvas = Canvas::new(6, 2, 0u32).unwrap();
    // 2x1 stipple: paint, skip, paint, skip...
    let stipple = Bitmap::from_rows(&[&[1, 0]]).unwrap();
    canvas.set_stipple(Some(stipple), Point::new(0, 0));
    canvas.paint_spans(9, &[Span::new(0, 0, 6), Span::new(0, 1, 6)], Point::new(0, 0));
    for y in 0..2 {
        for x in 0..6 {
            let want = if x % 2 == 0 { 9 } else { 0 };
            assert_eq!(canvas.drawable.get(x, y), want, "at {},{}", x, y);
        }
    }
}

#[test]
fn stipple_origin_shifts_the_tiling() {
    let mut canvas = Canvas::new(4, 1, 0u32).unwrap();
    let stipple = Bitmap::from_rows(&[&[1, 0]]).unwrap();
    // negative origins must tile the same as any other congruent origin
    canvas.set_stipple(Some(stipple), Point::new(-3, -7));
    canvas.paint_spans(9, &[Span::new(0, 0, 4)], Point::new(0, 0));
    for x in 0..4 {
        let want = if (x + 3) % 2 == 0 { 9 } else { 0 };
        assert_eq!(canvas.drawable.get(x, 0), want, "at {}", x);
    }
}

#[test]
fn texture_replaces_source_under_default_merge() {
    let mut canvas = Canvas::new(4, 2, 0u32).unwrap();
    let mut tex = Pixmap::new(2, 2, 0u32).unwrap();
    tex.set(0, 0, 10);
    tex.set(1, 0, 20);
    tex.set(0, 1, 30);
    tex.set(1, 1, 40);
    canvas.set_texture(Some(tex), Point::new(0, 0));
    canvas.paint_spans(9, &[Span::new(0, 0, 4), Span::new(0, 1, 4)], Point::new(0, 0));
    assert_eq!(canvas.drawable.pixels(), &[10, 20, 10, 20, 30, 40, 30, 40]);
}

#[test]
fn custom_merge_sees_source_and_dest() {
    let mut canvas = Canvas::new(3, 1, 100u32).unwrap();
    canvas.set_merge(Box::new(Custom::new(|_x, _y, src: u32, dst: u32| src + dst)));
    canvas.paint_spans(5, &[Span::new(0, 0, 3)], Point::new(0, 0));
    assert_eq!(canvas.drawable.pixels(), &[105, 105, 105]);
}

#[test]
fn xor_merge_applied_once_per_pixel_after_uniquify() {
    // two overlapping fills in one compound operation: the span engine
    // guarantees the overlap region reaches the merge exactly once
    let mut set = PaintedSet::new();
    let g = gc();
    fill_rectangles(&mut set, &g, &[Rect::new(0, 0, 6, 4)]);
    fill_rectangles(&mut set, &g, &[Rect::new(3, 0, 6, 4)]);

    let mut canvas = Canvas::new(10, 4, 0u32).unwrap();
    canvas.set_merge(Box::new(Custom::new(|_x, _y, src: u32, dst: u32| src ^ dst)));
    canvas.merge_painted_set(&set, Point::new(0, 0));
    for y in 0..4 {
        for x in 0..9 {
            assert_eq!(canvas.drawable.get(x, y), 1, "at {},{}", x, y);
        }
        assert_eq!(canvas.drawable.get(9, y), 0);
    }
}

#[test]
fn gradient_parallel_interpolates_between_anchors() {
    let mut canvas = Canvas::new(11, 1, 0u32).unwrap();
    let grad = GradientParallel::new(
        FPoint::new(0.0, 0.0),
        FPoint::new(10.0, 0.0),
        [0u32, 100],
        |a, b, t| (a as f64 + (b as f64 - a as f64) * t).round() as u32,
    );
    canvas.set_merge(Box::new(grad));
    canvas.paint_spans(1, &[Span::new(0, 0, 11)], Point::new(0, 0));
    assert_eq!(canvas.drawable.get(0, 0), 0);
    assert_eq!(canvas.drawable.get(5, 0), 50);
    assert_eq!(canvas.drawable.get(10, 0), 100);
}

#[test]
fn overwrite_is_the_default_merge() {
    let mut canvas = Canvas::new(2, 1, 3u32).unwrap();
    canvas.set_merge(Box::new(Overwrite));
    canvas.paint_spans(8, &[Span::new(0, 0, 1)], Point::new(0, 0));
    assert_eq!(canvas.drawable.pixels(), &[8, 3]);
}

#[test]
fn end_to_end_draw_then_composite() {
    let g = gc();
    let mut set = PaintedSet::new();
    draw_lines(&mut set, &g, CoordMode::Origin,
               &[Point::new(0, 0), Point::new(7, 0), Point::new(7, 7)]);

    let mut canvas = Canvas::new(8, 8, 0u32).unwrap();
    canvas.merge_painted_set(&set, Point::new(0, 0));
    for x in 0..8 {
        assert_eq!(canvas.drawable.get(x, 0), 1);
    }
    for y in 1..8 {
        assert_eq!(canvas.drawable.get(7, y), 1);
        assert_eq!(canvas.drawable.get(0, y), 0);
    }
}
