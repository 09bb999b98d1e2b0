//! The whole pipeline at once: rectangles, dashed polyline and an arc
//! painted into one set, merged onto a canvas, written out and read back.

use spanrast::{draw_arcs, draw_lines, fill_rectangles, ppm, Arc, Canvas, CoordMode,
               EllipseCache, GraphicsContext, LineStyle, PaintedSet, Point, Rect};

fn to_rgb(p: u32) -> [u8; 3] {
    match p {
        0 => [255, 255, 255],
        1 => [0, 0, 0],
        2 => [200, 40, 40],
        _ => [40, 40, 200],
    }
}

#[test]
fn compound_scene_roundtrip() {
    let mut gc = GraphicsContext::new(vec![0u32, 1, 2, 3]).unwrap();
    gc.line_style = LineStyle::OnOffDash;
    gc.set_dashes(vec![4, 2], 0);

    let mut set = PaintedSet::new();
    let mut cache = EllipseCache::new();

    fill_rectangles(&mut set, &gc, &[Rect::new(40, 0, 15, 5)]);
    draw_lines(&mut set, &gc, CoordMode::Origin,
               &[Point::new(25, 5), Point::new(5, 5), Point::new(5, 25), Point::new(35, 22)]);
    draw_arcs(&mut set, &gc,
              &[Arc { x: 20, y: 15, width: 30, height: 16, angle1: 0, angle2: 270 * 64 }],
              &mut cache);

    // spans stay disjoint per pixel value across the whole compound op
    for g in set.groups() {
        let spans = g.spans();
        for w in spans.windows(2) {
            assert!(w[0].y <= w[1].y);
            if w[0].y == w[1].y {
                assert!(w[0].xend() <= w[1].x);
            }
        }
    }

    let mut canvas = Canvas::new(60, 35, 0u32).unwrap();
    canvas.merge_painted_set(&set, Point::new(0, 0));

    // the filled rectangle: right/bottom edges excluded
    assert_eq!(canvas.drawable.get(40, 0), 1);
    assert_eq!(canvas.drawable.get(54, 4), 1);
    assert_eq!(canvas.drawable.get(55, 0), 0);
    assert_eq!(canvas.drawable.get(40, 5), 0);

    // multicolored dashes put more than one drawing pixel on the canvas
    let mut used: Vec<u32> = canvas.drawable.pixels().to_vec();
    used.sort();
    used.dedup();
    assert!(used.contains(&1) && used.contains(&2) && used.contains(&3));

    std::fs::create_dir_all("tests/tmp").unwrap();
    ppm::write_canvas(&canvas, to_rgb, "tests/tmp/scene.png").unwrap();
    let (buf, w, h) = ppm::read_file("tests/tmp/scene.png").unwrap();
    assert_eq!((w, h), (60, 35));

    // the file holds exactly the canvas contents
    let mut expect = Vec::new();
    for &p in canvas.drawable.pixels() {
        expect.extend_from_slice(&to_rgb(p));
    }
    assert_eq!(buf, expect);

    ppm::write_canvas(&canvas, to_rgb, "tests/tmp/scene_copy.png").unwrap();
    assert!(ppm::img_diff("tests/tmp/scene.png", "tests/tmp/scene_copy.png").unwrap());
}
