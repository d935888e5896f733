// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pre-transform catalog.
//!
//! Pre-transforms are simpler maps than variations.  When enabled they
//! run first, before the fold and the n-gon step, and they are followed
//! by two optional adjustments: a signed square (or square root) of
//! each component, then a complex square (or square root) of the whole
//! value.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::complex::{
    ln_abs, point, principal_sqrt, recip, signed_sqr_components, signed_sqrt,
    signed_sqrt_components, square, unscale, Point,
};

/// Number of pre-transforms.
pub const COUNT: usize = 21;

/// A square/root adjustment.  Each pair of toggles can hold at most
/// one of the two, which this type enforces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    /// Leave the value alone.
    None,
    /// Square it.
    Square,
    /// Take its square root.
    Root,
}

impl Default for Power {
    fn default() -> Self {
        Power::None
    }
}

impl Power {
    /// Build from the two raw toggles.  When both are set the square
    /// wins.
    pub fn from_flags(square: bool, root: bool) -> Self {
        match (square, root) {
            (true, _) => Power::Square,
            (false, true) => Power::Root,
            (false, false) => Power::None,
        }
    }

    /// None, then Square, then Root, then back to None.
    pub fn cycle(self) -> Self {
        match self {
            Power::None => Power::Square,
            Power::Square => Power::Root,
            Power::Root => Power::None,
        }
    }

    /// Apply to each component with the sign-preserving operations.
    pub fn components(self, z: Point) -> Point {
        match self {
            Power::None => z,
            Power::Square => signed_sqr_components(z),
            Power::Root => signed_sqrt_components(z),
        }
    }

    /// Apply to the value as a complex number.
    pub fn whole(self, z: Point) -> Point {
        match self {
            Power::None => z,
            Power::Square => square(z),
            Power::Root => principal_sqrt(z),
        }
    }
}

type Trig = fn(f64) -> f64;

const PAIRS: [(Trig, Trig); 4] = [
    (f64::cos, f64::cos),
    (f64::sin, f64::sin),
    (f64::cos, f64::sin),
    (f64::sin, f64::cos),
];

#[inline]
fn doubled(z: Point, k: usize) -> Point {
    let (f, g) = PAIRS[k];
    point(f(2.0 * z.re), g(2.0 * z.im))
}

#[inline]
fn squared(z: Point, k: usize) -> Point {
    let (f, g) = PAIRS[k];
    let (a, b) = (f(z.re), g(z.im));
    point(a * a, b * b)
}

#[inline]
fn rooted(z: Point, k: usize) -> Point {
    let (f, g) = PAIRS[k];
    point(signed_sqrt(f(z.re)), signed_sqrt(g(z.im)))
}

#[inline]
fn trig_of_pi(a: f64, b: f64) -> Point {
    point((PI * a).cos(), (PI * b).sin())
}

/// Apply pre-transform `index` (wrapping past the end).
pub fn apply(index: usize, z: Point) -> Point {
    let (x, y) = (z.re, z.im);
    match index % COUNT {
        k @ 0..=3 => doubled(z, k),
        k @ 4..=7 => squared(z, k - 4),
        k @ 8..=11 => rooted(z, k - 8),
        12 => point(
            signed_sqrt(x.sin()) * signed_sqrt(y.cos()),
            signed_sqrt(x.cos()) * signed_sqrt(y.sin()),
        ),
        13 => point(x.sin() + y.cos(), y.sin() + x.cos()),
        14 => point(x.sin() + y.sin(), x.cos() + y.cos()),
        15 => recip(z),
        16 => {
            let (s, c) = y.atan2(x).sin_cos();
            unscale(point(c, s), z.norm())
        }
        17 => trig_of_pi(x.exp(), y.exp()),
        18 => trig_of_pi(x.exp_m1(), y.exp_m1()),
        19 => trig_of_pi(ln_abs(x), ln_abs(y)),
        _ => trig_of_pi(x.abs().ln_1p(), y.abs().ln_1p()),
    }
}

/// The full pre-processing stage: catalog lookup, then the component
/// adjustment, then the whole-value adjustment.
pub fn pretransform(index: usize, components: Power, whole: Power, z: Point) -> Point {
    whole.whole(components.components(apply(index, z)))
}

/// Name for logs.
pub fn name(index: usize) -> &'static str {
    const NAMES: [&str; COUNT] = [
        "cos2-cos2",
        "sin2-sin2",
        "cos2-sin2",
        "sin2-cos2",
        "cos²-cos²",
        "sin²-sin²",
        "cos²-sin²",
        "sin²-cos²",
        "rcos-rcos",
        "rsin-rsin",
        "rcos-rsin",
        "rsin-rcos",
        "root-mix",
        "sin+cos",
        "sin+sin",
        "reciprocal",
        "inverse-polar",
        "exp",
        "expm1",
        "log",
        "log1p",
    ];
    NAMES[index % COUNT]
}
