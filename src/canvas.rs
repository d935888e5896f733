// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer the orbit paints into.

use image::RgbImage;
use itertools::iproduct;

use crate::color::Hsv;
use crate::planes::Pixel;

/// A width × height grid of color samples, stored row by row.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Hsv,
    pixels: Vec<Hsv>,
}

impl Canvas {
    /// A canvas filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Canvas::with_background(width, height, Hsv::BLACK)
    }

    /// A canvas filled with `background`.
    pub fn with_background(width: usize, height: usize, background: Hsv) -> Self {
        Canvas {
            width,
            height,
            background,
            pixels: vec![background; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The color the canvas is cleared to.
    pub fn background(&self) -> Hsv {
        self.background
    }

    /// Paint everything back to the background.
    pub fn clear(&mut self) {
        let background = self.background;
        for p in self.pixels.iter_mut() {
            *p = background;
        }
    }

    fn offset(&self, pixel: Pixel) -> Option<usize> {
        if !pixel.within(self.width, self.height) {
            return None;
        }
        Some(pixel.1 as usize * self.width + pixel.0 as usize)
    }

    /// The sample at a pixel, if it lies on the canvas.
    pub fn get(&self, pixel: Pixel) -> Option<Hsv> {
        self.offset(pixel).map(|i| self.pixels[i])
    }

    /// Blend `color` into one pixel.  Pixels off the canvas are ignored.
    pub fn blend(&mut self, pixel: Pixel, color: Hsv) {
        if let Some(i) = self.offset(pixel) {
            self.pixels[i] = self.pixels[i].blend(color, self.background);
        }
    }

    /// Draw a dot of diameter `size` centered on `pixel`.  Size 0 draws
    /// nothing, size 1 a single pixel, anything larger a filled disc.
    pub fn dot(&mut self, pixel: Pixel, size: u8, color: Hsv) {
        match size {
            0 => {}
            1 => self.blend(pixel, color),
            _ => {
                let r = i64::from(size / 2);
                for (dx, dy) in iproduct!(-r..=r, -r..=r) {
                    if dx * dx + dy * dy <= r * r {
                        self.blend(Pixel(pixel.0.saturating_add(dx), pixel.1.saturating_add(dy)), color);
                    }
                }
            }
        }
    }

    /// Draw the same dot at every pixel of a set.
    pub fn dots(&mut self, pixels: &[Pixel], size: u8, color: Hsv) {
        for pixel in pixels {
            self.dot(*pixel, size, color);
        }
    }

    /// Render to 8-bit RGB for display or export.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            self.pixels[y as usize * self.width + x as usize].to_rgb()
        })
    }
}
