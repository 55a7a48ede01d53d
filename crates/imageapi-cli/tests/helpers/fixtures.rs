//! Test fixtures: encoded images.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([64u8, 128, 32]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
