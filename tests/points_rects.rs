use spanrast::{draw_points, draw_rectangles, fill_rectangles, CoordMode, GraphicsContext,
               PaintedSet, Point, Rect, Span};
use std::collections::HashSet;

fn gc() -> GraphicsContext<u32> {
    GraphicsContext::new(vec![0, 1]).unwrap()
}

fn painted(set: &PaintedSet<u32>) -> HashSet<(i32, i32)> {
    let mut out = HashSet::new();
    for g in set.groups() {
        for s in g.spans() {
            for x in s.x..s.xend() {
                assert!(out.insert((x, s.y)), "pixel painted twice: {},{}", x, s.y);
            }
        }
    }
    out
}

#[test]
fn points_become_sorted_unit_spans() {
    let mut set = PaintedSet::new();
    draw_points(&mut set, &gc(), CoordMode::Origin,
                &[Point::new(5, 9), Point::new(2, 1), Point::new(7, 1)]);
    assert_eq!(set.groups()[0].spans(),
               &[Span::new(2, 1, 1), Span::new(7, 1, 1), Span::new(5, 9, 1)]);
}

#[test]
fn repeated_points_plot_once() {
    let mut set = PaintedSet::new();
    draw_points(&mut set, &gc(), CoordMode::Origin,
                &[Point::new(3, 3), Point::new(3, 3), Point::new(3, 3)]);
    assert_eq!(painted(&set), [(3, 3)].iter().cloned().collect());
}

#[test]
fn points_in_previous_mode() {
    let mut set = PaintedSet::new();
    draw_points(&mut set, &gc(), CoordMode::Previous,
                &[Point::new(2, 2), Point::new(3, 0), Point::new(0, 4)]);
    assert_eq!(painted(&set), [(2, 2), (5, 2), (5, 6)].iter().cloned().collect());
}

#[test]
fn filled_rect_excludes_right_and_bottom() {
    let mut set = PaintedSet::new();
    fill_rectangles(&mut set, &gc(), &[Rect::new(2, 1, 4, 3)]);
    let got = painted(&set);
    assert_eq!(got.len(), 12);
    assert!(got.contains(&(2, 1)) && got.contains(&(5, 3)));
    assert!(!got.contains(&(6, 1)) && !got.contains(&(2, 4)));
}

#[test]
fn abutting_rects_tile_exactly() {
    let mut set = PaintedSet::new();
    fill_rectangles(&mut set, &gc(),
                    &[Rect::new(0, 0, 4, 4), Rect::new(4, 0, 4, 4), Rect::new(0, 4, 8, 4)]);
    // painted() would panic on any doubly-painted pixel
    let got = painted(&set);
    assert_eq!(got.len(), 8 * 8);
}

#[test]
fn zero_sized_rects_are_noops() {
    let mut set = PaintedSet::new();
    fill_rectangles(&mut set, &gc(), &[Rect::new(3, 3, 0, 5), Rect::new(3, 3, 5, 0)]);
    assert!(set.is_empty());
}

#[test]
fn rect_outline_follows_line_attributes() {
    let mut set = PaintedSet::new();
    draw_rectangles(&mut set, &gc(), &[Rect::new(1, 1, 5, 4)]);
    let got = painted(&set);
    // hairline outline of the box [1,6]x[1,5]
    for x in 1..=6 {
        assert!(got.contains(&(x, 1)) && got.contains(&(x, 5)), "column {}", x);
    }
    for y in 1..=5 {
        assert!(got.contains(&(1, y)) && got.contains(&(6, y)), "row {}", y);
    }
    assert!(!got.contains(&(3, 3)));
    assert_eq!(got.len(), 2 * 6 + 2 * 4 - 2);
}
