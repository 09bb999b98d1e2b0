//! Scan conversion of geometric primitives into exact pixel spans.
//!
//! How this works:
//!
//!    set = PaintedSet::new()
//!    gc  = GraphicsContext::new(pixels)
//!  Drawing (each call rasterizes + uniquifies)
//!    draw_lines / fill_polygon / draw_arcs / ...
//!      line (width 0)  -- Bresenham walk, spans per scanline
//!      wide (width >0) -- convex polygon decomposition
//!        convex::fill_spp()   -- subpixel chain sweep
//!      polygen::fill_general() -- edge table / AET sweep
//!      arc             -- quadrant tables via EllipseCache
//!    Output: y-sorted, x-disjoint spans per pixel value
//!  Compositing
//!    canvas.merge_painted_set(set, offset)
//!      stipple test -> texture fetch -> PixelMerge -> store
//!
//! Vector backends skip the compositing half entirely and consume either
//! the primitives themselves or the wide-line decomposition
//! (`decompose_wide_polyline`); nothing forces spans to become pixels.

pub mod geom;
pub mod span;
pub mod gc;
pub mod bres;
pub mod convex;
pub mod polygen;
pub mod line;
pub mod wide;
pub mod arc;
pub mod canvas;
pub mod api;
pub mod ppm;

pub use crate::geom::*;
pub use crate::span::{sort_spans_y, PaintedSet, Span, SpanGroup};
pub use crate::gc::*;
pub use crate::bres::Bres;
pub use crate::convex::{fill_convex, fill_spp};
pub use crate::polygen::fill_general;
pub use crate::line::{zero_dash, zero_line};
pub use crate::wide::{decompose_wide_dashes, decompose_wide_polyline, wide_dash, wide_line,
                      StrokePoly};
pub use crate::arc::EllipseCache;
pub use crate::canvas::*;
pub use crate::api::*;
