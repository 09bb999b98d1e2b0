use spanrast::{ArcMode, CapStyle, FillRule, GraphicsContext, JoinStyle, LineStyle};

#[test]
fn defaults_match_x11() {
    let g = GraphicsContext::new(vec![0u32, 1]).unwrap();
    assert_eq!(g.fill_rule, FillRule::EvenOdd);
    assert_eq!(g.join_style, JoinStyle::Miter);
    assert_eq!(g.cap_style, CapStyle::Butt);
    assert_eq!(g.line_style, LineStyle::Solid);
    assert_eq!(g.arc_mode, ArcMode::PieSlice);
    assert_eq!(g.line_width, 0);
    assert!((g.miter_limit - 10.43).abs() < 1e-12);
    assert_eq!(g.dashes(), &[4, 4]);
    assert_eq!(g.dash_offset, 0);
}

#[test]
fn needs_two_pixel_slots() {
    assert!(GraphicsContext::<u32>::new(vec![]).is_none());
    assert!(GraphicsContext::<u32>::new(vec![5]).is_none());
    assert!(GraphicsContext::<u32>::new(vec![5, 6]).is_some());
}

#[test]
fn bad_dash_patterns_are_ignored() {
    let mut g = GraphicsContext::new(vec![0u32, 1]).unwrap();
    g.set_dashes(vec![], 3);
    assert_eq!(g.dashes(), &[4, 4]);
    g.set_dashes(vec![2, 0, 2], 3);
    assert_eq!(g.dashes(), &[4, 4]);
    g.set_dashes(vec![6, 3], 2);
    assert_eq!(g.dashes(), &[6, 3]);
    assert_eq!(g.dash_offset, 2);
}

#[test]
fn undersized_pixel_arrays_are_ignored() {
    let mut g = GraphicsContext::new(vec![0u32, 1]).unwrap();
    g.set_pixels(vec![7]);
    assert_eq!(g.pixels(), &[0, 1]);
    g.set_pixels(vec![7, 8, 9]);
    assert_eq!(g.pixels(), &[7, 8, 9]);
}

#[test]
fn on_dash_pixels_cycle_past_slot_zero() {
    let g = GraphicsContext::new(vec![0u32, 1, 2, 3]).unwrap();
    assert_eq!(g.on_dash_pixel(0), 1);
    assert_eq!(g.on_dash_pixel(1), 2);
    assert_eq!(g.on_dash_pixel(2), 3);
    assert_eq!(g.on_dash_pixel(3), 1);
    assert_eq!(g.off_pixel(), 0);
    assert_eq!(g.drawing_pixel(), 1);
}
