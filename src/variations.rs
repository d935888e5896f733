// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The variation catalog.
//!
//! A variation is a pure map from a point to a point, applied to the
//! orbit before the n-gon step (and, optionally, again after it).  The
//! catalog is a fixed-size array, so every index in `0..COUNT` names a
//! function and the compiler checks that the table is full.
//!
//! Most entries follow the flame-fractal convention: `r` is the
//! modulus of the point and `θ` is the argument of the *swapped* pair,
//! `atan2(x, y)`, not `atan2(y, x)`.

use std::f64::consts::PI;

use crate::complex::{self, div, point, polar_to_cartesian, recip, unscale, Point};

/// A single catalog entry.
#[derive(Copy, Clone)]
pub struct Variation {
    /// Human readable name, used in logs and the CLI.
    pub name: &'static str,
    /// The map itself.
    pub map: fn(Point) -> Point,
}

impl Variation {
    /// Apply the variation to `z`.
    #[inline]
    pub fn apply(&self, z: Point) -> Point {
        (self.map)(z)
    }
}

/// Number of variations in the catalog.
pub const COUNT: usize = 43;

macro_rules! v {
    ($name: expr, $map: expr) => {
        Variation {
            name: $name,
            map: $map,
        }
    };
}

/// Every variation, in index order.  Entry 0 is the identity.
pub static CATALOG: [Variation; COUNT] = [
    v!("identity", identity),
    v!("sinusoidal", sinusoidal),
    v!("spherical", spherical),
    v!("swirl", swirl),
    v!("horseshoe", horseshoe),
    v!("polar", polar),
    v!("handkerchief", handkerchief),
    v!("heart", heart),
    v!("disc", disc),
    v!("spiral", spiral),
    v!("hyperbolic", hyperbolic),
    v!("diamond", diamond),
    v!("ex", ex),
    v!("julia", julia),
    v!("bent", bent),
    v!("fisheye", fisheye),
    v!("exponential", exponential),
    v!("power", power),
    v!("cosine", cosine),
    v!("bubble", bubble),
    v!("cylinder", cylinder),
    v!("eyefish", eyefish),
    v!("tangent", tangent),
    v!("cross", cross),
    v!("polar-cx", polar_to_cartesian),
    v!("exp", exp),
    v!("log", log),
    v!("sin", sin),
    v!("cos", cos),
    v!("tan", tan),
    v!("sec", sec),
    v!("csc", csc),
    v!("cot", cot),
    v!("sinh", sinh),
    v!("cosh", cosh),
    v!("tanh", tanh),
    v!("square", complex::square),
    v!("sqrt", complex::principal_sqrt),
    v!("power-x", power_x),
    v!("reciprocal", recip),
    v!("sinusoidal-cx", sinusoidal_cx),
    v!("swirl-cx", swirl_cx),
    v!("handkerchief-cx", handkerchief_cx),
];

/// Look up a variation.  Indices past the end wrap around.
#[inline]
pub fn get(index: usize) -> &'static Variation {
    &CATALOG[index % COUNT]
}

/// The variation at `index`, optionally composed with the polar remap
/// as an outer wrapper.
pub fn select(index: usize, polarize: bool) -> impl Fn(Point) -> Point {
    let inner = get(index).map;
    move |z| {
        let v = inner(z);
        if polarize {
            polar_to_cartesian(v)
        } else {
            v
        }
    }
}

#[inline]
fn r_theta(z: Point) -> (f64, f64) {
    (z.norm(), z.re.atan2(z.im))
}

fn identity(z: Point) -> Point {
    z
}

fn sinusoidal(z: Point) -> Point {
    point(z.re.sin(), z.im.sin())
}

fn spherical(z: Point) -> Point {
    unscale(z, z.norm_sqr())
}

fn swirl(z: Point) -> Point {
    let (s, c) = z.norm_sqr().sin_cos();
    point(z.re * s - z.im * c, z.re * c + z.im * s)
}

fn horseshoe(z: Point) -> Point {
    let (x, y) = (z.re, z.im);
    unscale(point((x - y) * (x + y), 2.0 * x * y), z.norm())
}

fn polar(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    point(theta / PI, r - 1.0)
}

fn handkerchief(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    point((theta + r).sin(), (theta - r).cos()).scale(r)
}

fn heart(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let (s, c) = (theta * r).sin_cos();
    point(s, -c).scale(r)
}

fn disc(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let (s, c) = (PI * r).sin_cos();
    point(s, c).scale(theta / PI)
}

fn spiral(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    unscale(point(theta.cos() + r.sin(), theta.sin() - r.cos()), r)
}

fn hyperbolic(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let x = unscale(point(theta.sin(), 0.0), r).re;
    point(x, r * theta.cos())
}

fn diamond(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    point(theta.sin() * r.cos(), theta.cos() * r.sin())
}

fn ex(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let n0 = (theta + r).sin();
    let n1 = (theta - r).cos();
    let (m0, m1) = (n0 * n0 * n0, n1 * n1 * n1);
    point(m0 + m1, m0 - m1).scale(r)
}

fn julia(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let (s, c) = (theta / 2.0).sin_cos();
    point(c, s).scale(r.sqrt())
}

fn bent(z: Point) -> Point {
    let (x, y) = (z.re, z.im);
    match (x >= 0.0, y >= 0.0) {
        (true, true) => z,
        (false, true) => point(2.0 * x, y),
        (true, false) => point(x, y / 2.0),
        (false, false) => point(2.0 * x, y / 2.0),
    }
}

fn fisheye(z: Point) -> Point {
    unscale(complex::swap(z).scale(2.0), z.norm() + 1.0)
}

fn exponential(z: Point) -> Point {
    let t = (z.re - 1.0).exp();
    let (s, c) = (PI * z.im).sin_cos();
    point(t * c, t * s)
}

fn power(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let (s, c) = theta.sin_cos();
    point(c, s).scale(r.max(std::f64::MIN_POSITIVE).powf(s))
}

fn cosine(z: Point) -> Point {
    let (s, c) = (PI * z.re).sin_cos();
    point(c * z.im.cosh(), -s * z.im.sinh())
}

fn bubble(z: Point) -> Point {
    unscale(z.scale(4.0), z.norm_sqr() + 4.0)
}

fn cylinder(z: Point) -> Point {
    point(z.re.sin(), z.im)
}

fn eyefish(z: Point) -> Point {
    unscale(z.scale(2.0), z.norm() + 1.0)
}

fn tangent(z: Point) -> Point {
    let x = unscale(point(z.re.sin(), 0.0), z.im.cos()).re;
    point(x, z.im.tan())
}

fn cross(z: Point) -> Point {
    let d = z.re * z.re - z.im * z.im;
    unscale(z, d.abs())
}

fn exp(z: Point) -> Point {
    z.exp()
}

fn log(z: Point) -> Point {
    point(complex::ln_abs(z.norm()), z.im.atan2(z.re))
}

fn sin(z: Point) -> Point {
    point(z.re.sin() * z.im.cosh(), z.re.cos() * z.im.sinh())
}

fn cos(z: Point) -> Point {
    point(z.re.cos() * z.im.cosh(), -z.re.sin() * z.im.sinh())
}

fn tan(z: Point) -> Point {
    div(sin(z), cos(z))
}

fn sec(z: Point) -> Point {
    recip(cos(z))
}

fn csc(z: Point) -> Point {
    recip(sin(z))
}

fn cot(z: Point) -> Point {
    div(cos(z), sin(z))
}

fn sinh(z: Point) -> Point {
    point(z.re.sinh() * z.im.cos(), z.re.cosh() * z.im.sin())
}

fn cosh(z: Point) -> Point {
    point(z.re.cosh() * z.im.cos(), z.re.sinh() * z.im.sin())
}

fn tanh(z: Point) -> Point {
    div(sinh(z), cosh(z))
}

fn power_x(z: Point) -> Point {
    let (r, theta) = r_theta(z);
    let (s, c) = theta.sin_cos();
    point(c, s).scale(r.max(std::f64::MIN_POSITIVE).powf(z.re.sin()))
}

fn sinusoidal_cx(z: Point) -> Point {
    polar_to_cartesian(sinusoidal(z))
}

fn swirl_cx(z: Point) -> Point {
    polar_to_cartesian(swirl(z))
}

fn handkerchief_cx(z: Point) -> Point {
    polar_to_cartesian(handkerchief(z))
}
