// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The n-gon step and the ball fold.
//!
//! With t = u = 0.5, a = 0.75, b = 0, n = 3 and the identity variation,
//! `step` is the classic chaos game for the Sierpinski triangle: halve
//! the distance to a vertex at radius 1.5 chosen at random from the
//! three.  Other orders give the analogous n-gon construction, and the
//! attractor has n-fold rotational symmetry as long as nothing is
//! applied after the rotation.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::f64::consts::PI;

use crate::complex::{point, rotate, unscale, Point};

/// Radial fold.  Points inside `|r|` are scaled by `1/r²`, points in
/// the shell between `|r|` and `|big_r|` are inverted by their own
/// modulus squared, and points outside are left alone.
pub fn ball_fold(z: Point, r: f64, big_r: f64) -> Point {
    let m = z.norm();
    if m < r.abs() {
        unscale(z, r * r)
    } else if m < big_r.abs() {
        unscale(z, m * m)
    } else {
        z
    }
}

/// The affine map of the n-gon step for a fixed spoke.
pub fn affine(v: Point, t: f64, u: f64, a: f64, b: f64, order: u32, spoke: u32) -> Point {
    let moved = point(t * v.re + a, u * v.im + b);
    rotate(moved, 2.0 * PI * f64::from(spoke) / f64::from(order))
}

/// Pick a spoke uniformly from `0..order`.
pub fn spoke<R: Rng + ?Sized>(order: u32, rng: &mut R) -> u32 {
    Uniform::new(0, order.max(1)).sample(rng)
}

/// One n-gon step: apply the variation, the affine map, and a rotation
/// by a freshly drawn spoke.
pub fn step<R, F>(
    z: Point,
    t: f64,
    u: f64,
    a: f64,
    b: f64,
    order: u32,
    variation: F,
    rng: &mut R,
) -> Point
where
    R: Rng + ?Sized,
    F: Fn(Point) -> Point,
{
    let k = spoke(order, rng);
    affine(variation(z), t, u, a, b, order, k)
}
