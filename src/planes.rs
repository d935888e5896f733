// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes the relationship
//! between the integral plane of the canvas, with an origin at 0,0 in
//! the upper left corner, and the real plane the orbit lives on.
//!
//! The real square from -2 to 2 on both axes fills the height of the
//! canvas and is centered horizontally.  On top of that fixed frame the
//! view can zoom each axis, rotate, pan by whole pixels and reflect.
use std::f64::consts::{FRAC_PI_4, PI};

use crate::complex::{self, point, Point};
use crate::error::{Error, Result};
use crate::params::ParameterState;

/// Describes the x, y of a pixel.  Coordinates may fall outside the
/// canvas; callers clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub i64, pub i64);

impl Pixel {
    /// True when the pixel lies on a `width` by `height` canvas.
    pub fn within(self, width: usize, height: usize) -> bool {
        self.0 >= 0 && self.1 >= 0 && self.0 < width as i64 && self.1 < height as i64
    }
}

/// Maps points of the real plane to pixels of a canvas and back.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    // Pixels per unit of the real plane: a quarter of the height.
    scale: f64,
    // Horizontal offset that centers the frame on a wide canvas.
    centering: f64,
}

impl PlaneMapper {
    /// Constructor.  Both sides of the canvas must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(Error::Shape(format!(
                "a {}x{} canvas has no pixels",
                width, height
            )));
        }
        Ok(PlaneMapper {
            width,
            height,
            scale: height as f64 / 4.0,
            centering: (width as f64 - height as f64) / 2.0,
        })
    }

    /// Pixels per unit of the real plane.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    // Projected coordinates beyond this distance from the origin stay
    // off the canvas whatever the shift and reflection, so they can be
    // pinned there before the integer arithmetic.
    fn guard(&self, shift: (i64, i64)) -> f64 {
        let side = self.width.max(self.height) as f64;
        let pan = shift.0.unsigned_abs().max(shift.1.unsigned_abs()) as f64;
        2.0 * side + pan + 1.0
    }

    /// Given a point on the real plane, map it to the pixel it paints:
    /// orient it, zoom it, project it, shift it, reflect it.  A point
    /// that lands on no pixel at all, because it is not finite, is a
    /// render fault.  Finite points far off the canvas map to some
    /// pixel that is still off the canvas.
    pub fn point_to_pixel(&self, p: Point, params: &ParameterState) -> Result<Pixel> {
        let p = orient(p, params);
        let x = self.centering + ((p.re * params.scale.0 + 2.0) * self.scale).round();
        let y = ((p.im * params.scale.1 + 2.0) * self.scale).round();
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::RenderFault);
        }
        let guard = self.guard(params.shift);
        let x = x.max(-guard).min(guard);
        let y = y.max(-guard).min(guard);
        let mut px = (x as i64).saturating_add(params.shift.0);
        let mut py = (y as i64).saturating_add(params.shift.1);
        if params.flags.reflect_x {
            px = (self.width as i64 - 1).saturating_sub(px);
        }
        if params.flags.reflect_y {
            py = (self.height as i64 - 1).saturating_sub(py);
        }
        Ok(Pixel(px, py))
    }

    /// Given a pixel, return the point of the real plane that projects
    /// onto it, in the unrotated, unshifted and unreflected frame.
    pub fn pixel_to_point(&self, pixel: &Pixel, params: &ParameterState) -> Point {
        point(
            ((pixel.0 as f64 - self.centering) / self.scale - 2.0) / params.scale.0,
            (pixel.1 as f64 / self.scale - 2.0) / params.scale.1,
        )
    }

    /// The mirror set of a pixel on this canvas.
    pub fn mirror(&self, pixel: Pixel) -> Vec<Pixel> {
        mirror_pixel(pixel.0, pixel.1, self.width as i64, self.height as i64)
    }
}

/// Rotate a point for display: the quarter turn first, then π/4, then
/// half a sector, as the flags ask.
pub fn orient(p: Point, params: &ParameterState) -> Point {
    let mut p = p;
    if params.flags.quarter_turn {
        p = complex::neg_re(complex::swap(p));
    }
    if params.flags.eighth_turn {
        p = complex::rotate(p, FRAC_PI_4);
    }
    if params.flags.half_sector {
        p = complex::rotate(p, PI / f64::from(params.order));
    }
    p
}

/// The four lattice-aligned mirror images of a pixel on a `width` by
/// `height` canvas.  The pixel is halved first, so only pixels with two
/// even coordinates have a mirror set; any other pixel has none.
pub fn mirror_pixel(x: i64, y: i64, width: i64, height: i64) -> Vec<Pixel> {
    if x % 2 != 0 || y % 2 != 0 {
        return vec![];
    }
    let (p, q) = (x / 2, y / 2);
    vec![
        Pixel(p, q),
        Pixel(width - p - 1, q),
        Pixel(p, height - q - 1),
        Pixel(width - p - 1, height - q - 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Flags;

    fn identity() -> ParameterState {
        ParameterState::default()
    }

    #[test]
    fn planemapper_fails_on_empty_shape() {
        assert!(PlaneMapper::new(0, 4).is_err());
        assert!(PlaneMapper::new(4, 0).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(768, 768).unwrap();
        assert_eq!(pm.scale(), 192.0);
    }

    #[test]
    fn point_to_pixel_on_square_canvas() {
        let pm = PlaneMapper::new(400, 400).unwrap();
        let p = identity();
        assert_eq!(pm.point_to_pixel(point(0.0, 0.0), &p).unwrap(), Pixel(200, 200));
        assert_eq!(pm.point_to_pixel(point(-2.0, -2.0), &p).unwrap(), Pixel(0, 0));
        assert_eq!(pm.point_to_pixel(point(1.0, -1.0), &p).unwrap(), Pixel(300, 100));
    }

    #[test]
    fn point_to_pixel_centers_a_wide_canvas() {
        let pm = PlaneMapper::new(600, 400).unwrap();
        assert_eq!(pm.point_to_pixel(point(0.0, 0.0), &identity()).unwrap(), Pixel(300, 200));
    }

    #[test]
    fn forward_then_inverse_is_within_a_pixel() {
        let pm = PlaneMapper::new(800, 600).unwrap();
        let p = identity();
        for z in &[point(0.1, 0.2), point(-1.3, 0.77), point(1.9, -1.9), point(0.0, 0.0)] {
            let pixel = pm.point_to_pixel(*z, &p).unwrap();
            let back = pm.pixel_to_point(&pixel, &p);
            assert!((back.re - z.re).abs() * pm.scale() <= 1.0);
            assert!((back.im - z.im).abs() * pm.scale() <= 1.0);
        }
    }

    #[test]
    fn inverse_honors_zoom() {
        let pm = PlaneMapper::new(400, 400).unwrap();
        let p = ParameterState {
            scale: (2.0, 0.5),
            ..identity()
        };
        let z = point(0.25, 1.5);
        let pixel = pm.point_to_pixel(z, &p).unwrap();
        let back = pm.pixel_to_point(&pixel, &p);
        assert!((back - z).norm() < 0.05);
    }

    #[test]
    fn shift_then_reflect() {
        let pm = PlaneMapper::new(400, 400).unwrap();
        let p = ParameterState {
            shift: (10, -20),
            flags: Flags {
                reflect_x: true,
                reflect_y: true,
                ..Flags::default()
            },
            ..identity()
        };
        assert_eq!(pm.point_to_pixel(point(0.0, 0.0), &p).unwrap(), Pixel(189, 219));
    }

    #[test]
    fn quarter_turn_swaps_with_a_sign_flip() {
        let p = ParameterState {
            flags: Flags {
                quarter_turn: true,
                ..Flags::default()
            },
            ..identity()
        };
        let z = orient(point(1.0, 0.0), &p);
        assert!((z - point(0.0, 1.0)).norm() < 1e-12);
        let z = orient(point(0.0, 1.0), &p);
        assert!((z - point(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn rotations_compose_in_order() {
        let p = ParameterState {
            order: 4,
            flags: Flags {
                quarter_turn: true,
                eighth_turn: true,
                half_sector: true,
                ..Flags::default()
            },
            ..identity()
        };
        // π/2 + π/4 + π/4 is a half turn.
        let z = orient(point(1.0, 0.0), &p);
        assert!((z - point(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn non_finite_points_are_render_faults() {
        let pm = PlaneMapper::new(400, 400).unwrap();
        match pm.point_to_pixel(point(std::f64::NAN, 0.0), &identity()) {
            Err(Error::RenderFault) => {}
            other => panic!("expected a render fault, got {:?}", other),
        }
        assert!(pm.point_to_pixel(point(std::f64::INFINITY, 0.0), &identity()).is_err());
    }

    #[test]
    fn mirror_of_even_pixel() {
        assert_eq!(
            mirror_pixel(2, 4, 768, 768),
            vec![Pixel(1, 2), Pixel(766, 2), Pixel(1, 765), Pixel(766, 765)]
        );
    }

    #[test]
    fn mirror_of_odd_pixel_is_empty() {
        assert!(mirror_pixel(3, 4, 768, 768).is_empty());
        assert!(mirror_pixel(2, 5, 768, 768).is_empty());
    }

    #[test]
    fn within_clips_the_edges() {
        assert!(Pixel(0, 0).within(10, 5));
        assert!(Pixel(9, 4).within(10, 5));
        assert!(!Pixel(10, 4).within(10, 5));
        assert!(!Pixel(-1, 0).within(10, 5));
    }

    #[test]
    fn huge_finite_points_land_off_the_canvas() {
        let pm = PlaneMapper::new(400, 300).unwrap();
        let shifted = ParameterState {
            shift: (10, -10),
            flags: Flags {
                reflect_x: true,
                reflect_y: true,
                ..Flags::default()
            },
            ..identity()
        };
        for params in &[identity(), shifted] {
            for z in &[point(1e300, -1e300), point(-1e20, 0.0), point(0.0, 1e17), point(-1e300, 1.0)] {
                let pixel = pm.point_to_pixel(*z, params).unwrap();
                assert!(!pixel.within(400, 300), "{:?} -> {:?}", z, pixel);
            }
        }
    }

    #[test]
    fn extreme_shifts_do_not_overflow() {
        let pm = PlaneMapper::new(10, 10).unwrap();
        let p = ParameterState {
            shift: (std::i64::MAX, std::i64::MIN),
            flags: Flags {
                reflect_x: true,
                reflect_y: true,
                ..Flags::default()
            },
            ..identity()
        };
        let pixel = pm.point_to_pixel(point(1e300, -1e300), &p).unwrap();
        assert!(!pixel.within(10, 10));
    }
}
