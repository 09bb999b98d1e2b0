//! The graphics context: the bundle of stroke and fill attributes consumed,
//! read-only, by every drawing routine.

/// Polygon interior test.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum FillRule {
    /// A point is inside if a ray from it crosses an odd number of edges.
    EvenOdd,
    /// A point is inside if clockwise and counterclockwise crossings of a
    /// ray from it differ in number.
    Winding,
}

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum LineStyle {
    Solid,
    /// Dashes alternate painted and unpainted.
    OnOffDash,
    /// "Off" dashes are painted too, in the pixel from slot 0.
    DoubleDash,
}

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum JoinStyle {
    Miter,
    Round,
    Bevel,
    /// Bevel with one additional projecting vertex.
    Triangular,
}

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CapStyle {
    Butt,
    Round,
    /// Square cap projecting half a line width past the endpoint.
    Projecting,
    Triangular,
}

/// What a filled arc is closed with.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ArcMode {
    /// Fill between the arc and its chord.
    Chord,
    /// Fill the wedge from the arc to the ellipse center.
    PieSlice,
}

/// How painted pixels get their value.
///
/// `Solid` paints from the context's pixel array.  The interpolated styles
/// declare that the compositor should derive each pixel's value by gradient
/// interpolation between the anchor pixels stored alongside (see the
/// `PixelMerge` implementations in the canvas module, which carry the
/// matching geometry).
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PaintStyle {
    Solid,
    InterpolatedParallel,
    InterpolatedTriangular,
    InterpolatedElliptical,
}

/// Drawing attributes, with X11-compatible defaults.
///
/// Pixel slot 0 is the "off dash" pixel for double-dashed lines, slot 1 the
/// default drawing pixel; when more than two slots are present, successive
/// "on" dashes cycle through slots 1..n.
#[derive(Debug,Clone)]
pub struct GraphicsContext<P> {
    pub fill_rule: FillRule,
    pub line_style: LineStyle,
    pub join_style: JoinStyle,
    pub cap_style: CapStyle,
    pub arc_mode: ArcMode,
    /// Line thickness in pixels; 0 selects the Bresenham hairline drawers.
    pub line_width: u32,
    /// Maximum ratio of miter-spike length to half line width before a
    /// miter join falls back to bevel.
    pub miter_limit: f64,
    /// Pixel offset into the dash pattern at the start of a polyline.
    pub dash_offset: u32,
    dashes: Vec<u32>,
    pub paint_style: PaintStyle,
    pixels: Vec<P>,
    pub parallel_pixels: [P; 2],
    pub triangular_pixels: [P; 3],
    pub elliptical_pixels: [P; 3],
}

impl<P: Copy + PartialEq> GraphicsContext<P> {
    /// Build a context with X11 defaults.  At least two pixel values are
    /// required (slot 0 and slot 1); fewer returns `None`.
    pub fn new(pixels: Vec<P>) -> Option<Self> {
        if pixels.len() < 2 {
            return None;
        }
        let p0 = pixels[0];
        let p1 = pixels[1];
        Some(GraphicsContext {
            fill_rule: FillRule::EvenOdd,
            line_style: LineStyle::Solid,
            join_style: JoinStyle::Miter,
            cap_style: CapStyle::Butt,
            arc_mode: ArcMode::PieSlice,
            line_width: 0,
            miter_limit: 10.43, // as hardcoded in X11
            dashes: vec![4, 4],
            dash_offset: 0,
            paint_style: PaintStyle::Solid,
            pixels,
            parallel_pixels: [p0, p1],
            triangular_pixels: [p0, p1, p1],
            elliptical_pixels: [p0, p1, p1],
        })
    }

    /// The default drawing pixel (slot 1).
    pub fn drawing_pixel(&self) -> P {
        self.pixels[1]
    }

    /// The pixel for "off" dashes of a double-dashed line (slot 0).
    pub fn off_pixel(&self) -> P {
        self.pixels[0]
    }

    /// The pixel for the `n`th "on" dash of a polyline.  With more than two
    /// slots, on-dashes cycle through slots 1..len.
    pub fn on_dash_pixel(&self, n: usize) -> P {
        let cycle = self.pixels.len() - 1;
        self.pixels[1 + n % cycle]
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Replace the pixel array.  Fewer than two values is ignored.
    pub fn set_pixels(&mut self, pixels: Vec<P>) {
        if pixels.len() >= 2 {
            self.pixels = pixels;
        }
    }

    /// Dash lengths in pixels, alternating on/off starting with on.
    pub fn dashes(&self) -> &[u32] {
        &self.dashes
    }

    /// Replace the dash pattern.  Zero-length entries would stall the dash
    /// steppers, so any pattern containing one is ignored, as is an empty
    /// pattern.
    pub fn set_dashes(&mut self, dashes: Vec<u32>, offset: u32) {
        if dashes.is_empty() || dashes.iter().any(|&d| d == 0) {
            return;
        }
        self.dashes = dashes;
        self.dash_offset = offset;
    }

    /// Dashed drawing is only meaningful with a usable pattern; everything
    /// else renders solid.
    pub(crate) fn effectively_dashed(&self) -> bool {
        self.line_style != LineStyle::Solid && !self.dashes.is_empty()
    }
}
