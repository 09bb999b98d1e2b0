//! Writing canvases to image files, and diffing them.
//!
//! The rasterizer treats pixel values as opaque, so serialization takes a
//! caller hook mapping each pixel to RGB bytes.  Used by the tests for
//! regression comparison against reference images.

use crate::canvas::Canvas;
use std::path::Path;

pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(filename)?.to_rgb();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    Ok((buf, w as usize, h as usize))
}

pub fn write_file<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P)
                                  -> Result<(), std::io::Error> {
    image::save_buffer(filename, buf, width as u32, height as u32, image::RGB(8))
}

/// Serialize a canvas with a pixel-to-RGB hook.
pub fn write_canvas<T, F, P>(canvas: &Canvas<T>, to_rgb: F, filename: P)
                             -> Result<(), std::io::Error>
where
    T: Copy + PartialEq + 'static,
    F: Fn(T) -> [u8; 3],
    P: AsRef<Path>,
{
    let w = canvas.drawable.width() as usize;
    let h = canvas.drawable.height() as usize;
    let mut buf = Vec::with_capacity(w * h * 3);
    for &px in canvas.drawable.pixels() {
        buf.extend_from_slice(&to_rgb(px));
    }
    write_file(&buf, w, h, filename)
}

/// Compare two image files pixel by pixel.
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, image::ImageError> {
    let (d1, w1, h1) = read_file(f1)?;
    let (d2, w2, h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 || d1.len() != d2.len() {
        return Ok(false);
    }
    let mut flag = true;
    for (i, (v1, v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            println!("{} [{},{},{}]: {} {}", i, (i / 3) % w1, (i / 3) / w1, i % 3, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
