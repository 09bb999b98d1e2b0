//! The destination canvas and the span compositor.
//!
//! A canvas is a pixmap plus the things that modulate how spans land on it:
//! an optional stipple bitmap (a tiling mask; a zero bit protects the pixel),
//! an optional texture pixmap (tiling color source) and a pluggable pixel
//! merge.  The rasterizer itself never looks inside a pixel value; anything
//! beyond plain overwrite is expressed through the `PixelMerge`
//! implementations, which receive the pixel's device coordinates so the
//! gradient merges can interpolate by position.

use crate::geom::{FPoint, Point};
use crate::span::{PaintedSet, Span};
use log::trace;

/// A rectangular array of pixel values, row-major.
#[derive(Debug,Clone)]
pub struct Pixmap<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: Copy> Pixmap<P> {
    /// A width x height pixmap filled with `init`; `None` if either
    /// dimension is zero.
    pub fn new(width: u32, height: u32, init: P) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Pixmap { width, height, pixels: vec![init; (width * height) as usize] })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> P {
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, pixel: P) {
        self.pixels[(y as u32 * self.width + x as u32) as usize] = pixel;
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }
}

/// A rectangular bit mask.
#[derive(Debug,Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, init: bool) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Bitmap { width, height, bits: vec![init; (width * height) as usize] })
    }

    /// Build from rows of 0/1 values; rows must be equal length.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if width == 0 || height == 0 || rows.iter().any(|r| r.len() as u32 != width) {
            return None;
        }
        let bits = rows.iter().flat_map(|r| r.iter().map(|&b| b != 0)).collect();
        Some(Bitmap { width, height, bits })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, bit: bool) {
        self.bits[(y as u32 * self.width + x as u32) as usize] = bit;
    }
}

/// How a painted source pixel combines with what the canvas already holds.
///
/// `merge2` runs when the canvas has no texture; `merge3` runs with the
/// tiled texture pixel when it has one.  Both receive the destination
/// device coordinates, which is what lets the gradient merges work.
pub trait PixelMerge<P> {
    fn merge2(&self, x: i32, y: i32, source: P, dest: P) -> P;
    fn merge3(&self, x: i32, y: i32, texture: P, source: P, dest: P) -> P;
}

/// Plain replacement; with a texture, the texture pixel wins.
#[derive(Debug,Default,Copy,Clone)]
pub struct Overwrite;

impl<P> PixelMerge<P> for Overwrite {
    fn merge2(&self, _x: i32, _y: i32, source: P, _dest: P) -> P {
        source
    }
    fn merge3(&self, _x: i32, _y: i32, texture: P, _source: P, _dest: P) -> P {
        texture
    }
}

/// Alpha-like blending.  The rasterizer cannot interpret pixel values, so
/// the actual combination is a caller-supplied closure over (source, dest);
/// with a texture present the texture pixel becomes the source.
pub struct AlphaBlend<P> {
    blend: Box<dyn Fn(P, P) -> P>,
}

impl<P> AlphaBlend<P> {
    pub fn new<F: Fn(P, P) -> P + 'static>(blend: F) -> Self {
        AlphaBlend { blend: Box::new(blend) }
    }
}

impl<P: Copy> PixelMerge<P> for AlphaBlend<P> {
    fn merge2(&self, _x: i32, _y: i32, source: P, dest: P) -> P {
        (self.blend)(source, dest)
    }
    fn merge3(&self, _x: i32, _y: i32, texture: P, _source: P, dest: P) -> P {
        (self.blend)(texture, dest)
    }
}

/// Gradient between two anchor points: the painted value is interpolated
/// between two pixels by the projection of the destination coordinate onto
/// the `p0 -> p1` axis.
pub struct GradientParallel<P> {
    pub p0: FPoint,
    pub p1: FPoint,
    pub pixels: [P; 2],
    interp: Box<dyn Fn(P, P, f64) -> P>,
}

impl<P> GradientParallel<P> {
    pub fn new<F>(p0: FPoint, p1: FPoint, pixels: [P; 2], interp: F) -> Self
    where
        F: Fn(P, P, f64) -> P + 'static,
    {
        GradientParallel { p0, p1, pixels, interp: Box::new(interp) }
    }

    fn at(&self, x: i32, y: i32) -> P
    where
        P: Copy,
    {
        let dx = self.p1.x - self.p0.x;
        let dy = self.p1.y - self.p0.y;
        let len2 = dx * dx + dy * dy;
        let t = if len2 == 0.0 {
            0.0
        } else {
            (((x as f64 - self.p0.x) * dx + (y as f64 - self.p0.y) * dy) / len2)
                .max(0.0)
                .min(1.0)
        };
        (self.interp)(self.pixels[0], self.pixels[1], t)
    }
}

impl<P: Copy> PixelMerge<P> for GradientParallel<P> {
    fn merge2(&self, x: i32, y: i32, _source: P, _dest: P) -> P {
        self.at(x, y)
    }
    fn merge3(&self, x: i32, y: i32, _texture: P, _source: P, _dest: P) -> P {
        self.at(x, y)
    }
}

/// Gradient over a triangle: barycentric interpolation of three pixels.
pub struct GradientTriangular<P> {
    pub vertices: [FPoint; 3],
    pub pixels: [P; 3],
    interp: Box<dyn Fn([P; 3], [f64; 3]) -> P>,
}

impl<P> GradientTriangular<P> {
    pub fn new<F>(vertices: [FPoint; 3], pixels: [P; 3], interp: F) -> Self
    where
        F: Fn([P; 3], [f64; 3]) -> P + 'static,
    {
        GradientTriangular { vertices, pixels, interp: Box::new(interp) }
    }

    fn at(&self, x: i32, y: i32) -> P
    where
        P: Copy,
    {
        let [a, b, c] = self.vertices;
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if det == 0.0 {
            return (self.interp)(self.pixels, [1.0, 0.0, 0.0]);
        }
        let px = x as f64;
        let py = y as f64;
        let wa = (((b.y - c.y) * (px - c.x) + (c.x - b.x) * (py - c.y)) / det).max(0.0);
        let wb = (((c.y - a.y) * (px - c.x) + (a.x - c.x) * (py - c.y)) / det).max(0.0);
        let wc = (1.0 - wa - wb).max(0.0);
        let sum = wa + wb + wc;
        (self.interp)(self.pixels, [wa / sum, wb / sum, wc / sum])
    }
}

impl<P: Copy> PixelMerge<P> for GradientTriangular<P> {
    fn merge2(&self, x: i32, y: i32, _source: P, _dest: P) -> P {
        self.at(x, y)
    }
    fn merge3(&self, x: i32, y: i32, _texture: P, _source: P, _dest: P) -> P {
        self.at(x, y)
    }
}

/// Radial gradient: interpolation by normalized elliptical distance from a
/// center, clamped at the boundary.
pub struct GradientElliptical<P> {
    pub center: FPoint,
    pub rx: f64,
    pub ry: f64,
    pub pixels: [P; 2],
    interp: Box<dyn Fn(P, P, f64) -> P>,
}

impl<P> GradientElliptical<P> {
    pub fn new<F>(center: FPoint, rx: f64, ry: f64, pixels: [P; 2], interp: F) -> Self
    where
        F: Fn(P, P, f64) -> P + 'static,
    {
        GradientElliptical { center, rx, ry, pixels, interp: Box::new(interp) }
    }

    fn at(&self, x: i32, y: i32) -> P
    where
        P: Copy,
    {
        let dx = (x as f64 - self.center.x) / self.rx.max(1e-9);
        let dy = (y as f64 - self.center.y) / self.ry.max(1e-9);
        let t = (dx * dx + dy * dy).sqrt().min(1.0);
        (self.interp)(self.pixels[0], self.pixels[1], t)
    }
}

impl<P: Copy> PixelMerge<P> for GradientElliptical<P> {
    fn merge2(&self, x: i32, y: i32, _source: P, _dest: P) -> P {
        self.at(x, y)
    }
    fn merge3(&self, x: i32, y: i32, _texture: P, _source: P, _dest: P) -> P {
        self.at(x, y)
    }
}

/// Arbitrary caller-supplied merge closures.
pub struct Custom<P> {
    merge2: Box<dyn Fn(i32, i32, P, P) -> P>,
    merge3: Option<Box<dyn Fn(i32, i32, P, P, P) -> P>>,
}

impl<P> Custom<P> {
    pub fn new<F: Fn(i32, i32, P, P) -> P + 'static>(merge2: F) -> Self {
        Custom { merge2: Box::new(merge2), merge3: None }
    }

    pub fn with_merge3<F: Fn(i32, i32, P, P, P) -> P + 'static>(mut self, merge3: F) -> Self {
        self.merge3 = Some(Box::new(merge3));
        self
    }
}

impl<P: Copy> PixelMerge<P> for Custom<P> {
    fn merge2(&self, x: i32, y: i32, source: P, dest: P) -> P {
        (self.merge2)(x, y, source, dest)
    }
    fn merge3(&self, x: i32, y: i32, texture: P, source: P, dest: P) -> P {
        match &self.merge3 {
            Some(f) => f(x, y, texture, source, dest),
            // fall back to the binary merge with the texture as source
            None => (self.merge2)(x, y, texture, dest),
        }
    }
}

/// Destination drawable plus painting state.
pub struct Canvas<P> {
    pub drawable: Pixmap<P>,
    stipple: Option<Bitmap>,
    stipple_origin: Point,
    texture: Option<Pixmap<P>>,
    texture_origin: Point,
    merge: Box<dyn PixelMerge<P>>,
}

impl<P: Copy + PartialEq + 'static> Canvas<P> {
    /// A width x height canvas filled with `init`, with no stipple, no
    /// texture and plain-overwrite merging.
    pub fn new(width: u32, height: u32, init: P) -> Option<Self> {
        let drawable = Pixmap::new(width, height, init)?;
        Some(Canvas {
            drawable,
            stipple: None,
            stipple_origin: Point::new(0, 0),
            texture: None,
            texture_origin: Point::new(0, 0),
            merge: Box::new(Overwrite),
        })
    }

    pub fn set_stipple(&mut self, stipple: Option<Bitmap>, origin: Point) {
        self.stipple = stipple;
        self.stipple_origin = origin;
    }

    pub fn set_texture(&mut self, texture: Option<Pixmap<P>>, origin: Point) {
        self.texture = texture;
        self.texture_origin = origin;
    }

    pub fn set_merge(&mut self, merge: Box<dyn PixelMerge<P>>) {
        self.merge = merge;
    }

    /// Paint a y-sorted span list onto the canvas with the given pixel
    /// value; `offset` is where span coordinate (0, 0) lands.
    pub fn paint_spans(&mut self, pixel: P, spans: &[Span], offset: Point) {
        let (first, last) = match (spans.first(), spans.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return,
        };
        let wmax = self.drawable.width() as i32 - 1;
        let hmax = self.drawable.height() as i32 - 1;
        // cheap reject when the whole list misses vertically
        if first.y + offset.y > hmax || last.y + offset.y < 0 {
            trace!("paint_spans: all {} spans clipped out", spans.len());
            return;
        }

        for s in spans {
            let y = s.y + offset.y;
            if y > hmax {
                return; // spans are y-sorted: nothing further can hit
            }
            if y < 0 {
                continue;
            }
            let xstart = (s.x + offset.x).max(0);
            let xend = (s.x + offset.x + s.width as i32 - 1).min(wmax);
            for x in xstart..=xend {
                if let Some(st) = &self.stipple {
                    let sx = (x - self.stipple_origin.x).rem_euclid(st.width() as i32);
                    let sy = (y - self.stipple_origin.y).rem_euclid(st.height() as i32);
                    if !st.get(sx, sy) {
                        continue;
                    }
                }
                let dest = self.drawable.get(x, y);
                let new = match &self.texture {
                    Some(tex) => {
                        let tx = (x - self.texture_origin.x).rem_euclid(tex.width() as i32);
                        let ty = (y - self.texture_origin.y).rem_euclid(tex.height() as i32);
                        self.merge.merge3(x, y, tex.get(tx, ty), pixel, dest)
                    }
                    None => self.merge.merge2(x, y, pixel, dest),
                };
                self.drawable.set(x, y, new);
            }
        }
    }

    /// Composite a uniquified painted set onto the canvas.
    pub fn merge_painted_set(&mut self, set: &PaintedSet<P>, offset: Point) {
        for group in set.groups() {
            self.paint_spans(group.pixel(), group.spans(), offset);
        }
    }
}
