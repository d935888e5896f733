// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arithmetic on points of the plane.
//!
//! A point is just a `num::Complex<f64>`: the real part is the x
//! component and the imaginary part is the y component, so the same
//! value can be added like a vector or multiplied like a complex
//! number.  The helpers here cover the operations `num` does not
//! provide, plus the one operation whose behavior we cannot leave to
//! IEEE: division by a zero-modulus denominator, which returns
//! `SENTINEL` rather than an infinity or a NaN.

use num::Complex;

/// A point on the plane, read as a complex number when that is useful.
pub type Point = Complex<f64>;

/// What a division by a zero-modulus denominator returns.  It is large
/// enough to throw the point far off the canvas and finite, so the
/// rest of the pipeline never sees an infinity from a division.
pub const SENTINEL: Point = Complex { re: 1.0e10, im: 1.0e10 };

/// Shorthand constructor.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Complex::new(x, y)
}

/// Complex division.  Returns `SENTINEL` when `|b|²` is exactly zero,
/// which covers both `a / 0` and `0 / 0`.
#[inline]
pub fn div(a: Point, b: Point) -> Point {
    let d = b.norm_sqr();
    if d == 0.0 {
        return SENTINEL;
    }
    Complex::new(
        (a.re * b.re + a.im * b.im) / d,
        (a.im * b.re - a.re * b.im) / d,
    )
}

/// Divide a point by a real number, under the same sentinel rule.
#[inline]
pub fn unscale(a: Point, d: f64) -> Point {
    div(a, Complex::new(d, 0.0))
}

/// `1 / z`.
#[inline]
pub fn recip(z: Point) -> Point {
    div(Complex::new(1.0, 0.0), z)
}

/// Exchange the two components.
#[inline]
pub fn swap(z: Point) -> Point {
    Complex::new(z.im, z.re)
}

/// Negate only the real part.
#[inline]
pub fn neg_re(z: Point) -> Point {
    Complex::new(-z.re, z.im)
}

/// Negate only the imaginary part.
#[inline]
pub fn neg_im(z: Point) -> Point {
    Complex::new(z.re, -z.im)
}

/// Rotate counter-clockwise about the origin.
#[inline]
pub fn rotate(z: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    Complex::new(z.re * c - z.im * s, z.re * s + z.im * c)
}

/// `z * z`.
#[inline]
pub fn square(z: Point) -> Point {
    z * z
}

/// Principal square root, built from the modulus and the half argument.
pub fn principal_sqrt(z: Point) -> Point {
    let (s, c) = (z.arg() / 2.0).sin_cos();
    Complex::new(c, s).scale(z.norm().sqrt())
}

/// Read `z` as `(r, θ)` and return the Cartesian point it names.
#[inline]
pub fn polar_to_cartesian(z: Point) -> Point {
    let (s, c) = z.im.sin_cos();
    Complex::new(z.re * c, z.re * s)
}

/// Square that keeps the sign of its argument.
#[inline]
pub fn signed_sqr(v: f64) -> f64 {
    v * v.abs()
}

/// Square root of the absolute value, carrying the sign of the
/// argument.  Negative inputs stay in their quadrant instead of turning
/// imaginary.
#[inline]
pub fn signed_sqrt(v: f64) -> f64 {
    v.abs().sqrt().copysign(v)
}

/// Elementwise `signed_sqr`.
#[inline]
pub fn signed_sqr_components(z: Point) -> Point {
    Complex::new(signed_sqr(z.re), signed_sqr(z.im))
}

/// Elementwise `signed_sqrt`.
#[inline]
pub fn signed_sqrt_components(z: Point) -> Point {
    Complex::new(signed_sqrt(z.re), signed_sqrt(z.im))
}

/// Natural log of `|v|`, with zero clamped to the smallest positive
/// normal so the result stays finite.
#[inline]
pub fn ln_abs(v: f64) -> f64 {
    v.abs().max(std::f64::MIN_POSITIVE).ln()
}

/// Euclidean distance between two points.
#[inline]
pub fn dist(i: Point, j: Point) -> f64 {
    (i - j).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: Point, b: Point) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn division_by_zero_is_the_sentinel() {
        assert_eq!(div(point(3.0, -2.0), point(0.0, 0.0)), SENTINEL);
        assert_eq!(div(point(0.0, 0.0), point(0.0, 0.0)), SENTINEL);
        assert_eq!(recip(point(0.0, 0.0)), SENTINEL);
        assert_eq!(unscale(point(1.0, 1.0), 0.0), SENTINEL);
        assert!(SENTINEL.re.is_finite() && SENTINEL.im.is_finite());
    }

    #[test]
    fn division_matches_num() {
        let a = point(1.5, -0.25);
        let b = point(-0.5, 2.0);
        assert!(close(div(a, b), a / b));
        assert!(close(recip(b), b.inv()));
    }

    #[test]
    fn rotation_by_quarter_turn() {
        assert!(close(rotate(point(1.0, 0.0), FRAC_PI_2), point(0.0, 1.0)));
        assert!(close(rotate(point(0.0, 2.0), PI), point(0.0, -2.0)));
    }

    #[test]
    fn principal_sqrt_squares_back() {
        for z in &[point(4.0, 0.0), point(-4.0, 0.0), point(1.0, 1.0), point(-3.0, -0.5)] {
            let r = principal_sqrt(*z);
            assert!(close(square(r), *z));
            assert!(r.re >= 0.0);
        }
    }

    #[test]
    fn signed_operations_keep_the_quadrant() {
        assert_eq!(signed_sqrt(-9.0), -3.0);
        assert_eq!(signed_sqrt(16.0), 4.0);
        assert_eq!(signed_sqr(-3.0), -9.0);
        let z = signed_sqrt_components(point(-4.0, 9.0));
        assert_eq!(z, point(-2.0, 3.0));
        assert_eq!(signed_sqr_components(point(-2.0, 3.0)), point(-4.0, 9.0));
    }

    #[test]
    fn polar_remap_and_component_flips() {
        assert!(close(polar_to_cartesian(point(2.0, FRAC_PI_2)), point(0.0, 2.0)));
        assert_eq!(swap(point(1.0, 2.0)), point(2.0, 1.0));
        assert_eq!(neg_re(point(1.0, 2.0)), point(-1.0, 2.0));
        assert_eq!(neg_im(point(1.0, 2.0)), point(1.0, -2.0));
    }

    #[test]
    fn log_of_zero_is_finite() {
        assert!(ln_abs(0.0).is_finite());
        assert_eq!(ln_abs(-1.0), 0.0);
    }
}
