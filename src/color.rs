// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hue selection and blending.
//!
//! Canvas samples are HSV triples on a byte-sized wheel: hue in
//! `[0, 256)`, saturation and value in `[0, 255]`.  Blending is a
//! componentwise linear interpolation, so repeated visits to a pixel
//! pull it towards the newest color without erasing the older ones.

use image::Rgb;

use crate::complex::{dist, Point};
use crate::params::ParameterState;

/// Multiplier from orbit speed to hue.
pub const SPEED_HUE: f64 = 100.0;

/// Multiplier from curvature to hue.
pub const CURVATURE_HUE: f64 = 20.0;

/// How far a fresh paint moves a background pixel towards the new color.
pub const FIRST_PAINT_WEIGHT: f32 = 0.75;

/// How far a repaint moves a painted pixel towards the new color.
pub const REPAINT_WEIGHT: f32 = 0.5;

/// A color sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    /// Hue, `[0, 256)`.
    pub h: f32,
    /// Saturation, `[0, 255]`.
    pub s: f32,
    /// Value, `[0, 255]`.
    pub v: f32,
}

impl Hsv {
    /// The background every canvas starts from.
    pub const BLACK: Hsv = Hsv {
        h: 0.0,
        s: 0.0,
        v: 0.0,
    };

    /// A fully saturated, fully bright color of the given hue.
    pub fn vivid(h: f64) -> Hsv {
        Hsv {
            h: h as f32,
            s: 255.0,
            v: 255.0,
        }
    }

    /// `self + (other − self)·weight`, component by component.
    pub fn lerp(self, other: Hsv, weight: f32) -> Hsv {
        Hsv {
            h: self.h + (other.h - self.h) * weight,
            s: self.s + (other.s - self.s) * weight,
            v: self.v + (other.v - self.v) * weight,
        }
    }

    /// Paint `fresh` over `self`.  A pixel still showing `background`
    /// moves three quarters of the way; a painted one moves halfway.
    pub fn blend(self, fresh: Hsv, background: Hsv) -> Hsv {
        let weight = if self == background {
            FIRST_PAINT_WEIGHT
        } else {
            REPAINT_WEIGHT
        };
        self.lerp(fresh, weight)
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb(self) -> Rgb<u8> {
        let s = f64::from(self.s) / 255.0;
        let v = f64::from(self.v) / 255.0;
        let h = (f64::from(self.h) / 256.0 * 6.0).rem_euclid(6.0);
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        let byte = |c: f64| (c * 255.0).round().max(0.0).min(255.0) as u8;
        Rgb([byte(r), byte(g), byte(b)])
    }
}

/// Offset, invert and band-skip a raw hue source.  The narrow band
/// `[64, 85)` is folded onto `(170, 191]`.
pub fn final_hue(source: f64, offset: f64, invert: bool) -> f64 {
    let mut h = (source + offset).rem_euclid(256.0);
    if invert {
        h = (h + 128.0).rem_euclid(256.0);
    }
    if h >= 64.0 && h < 85.0 {
        h = 255.0 - h;
    }
    h
}

/// The hue of the latest point, from its speed or from the curvature of
/// the orbit, as the parameters ask.
pub fn hue(params: &ParameterState, current: Point, previous: Point, curvature: f64) -> f64 {
    let source = if params.flags.color_by_speed {
        dist(current, previous) * SPEED_HUE
    } else {
        curvature * CURVATURE_HUE
    };
    final_hue(source, params.hue_offset, params.flags.invert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::point;
    use crate::params::Flags;
    use std::f64::consts::PI;

    #[test]
    fn first_paint_moves_three_quarters() {
        let painted = Hsv::BLACK.blend(Hsv::vivid(128.0), Hsv::BLACK);
        assert_eq!(painted.h, 96.0);
        assert_eq!(painted.v, 191.25);
    }

    #[test]
    fn repaint_moves_halfway() {
        let once = Hsv::BLACK.blend(Hsv::vivid(128.0), Hsv::BLACK);
        let twice = once.blend(Hsv::vivid(128.0), Hsv::BLACK);
        assert_eq!(twice.h, 0.5 * 96.0 + 0.5 * 128.0);
        assert_eq!(twice.s, 0.5 * once.s + 0.5 * 255.0);
    }

    #[test]
    fn hue_wraps_and_inverts() {
        assert_eq!(final_hue(300.0, 0.0, false), 44.0);
        assert_eq!(final_hue(10.0, 250.0, false), 4.0);
        assert_eq!(final_hue(10.0, 0.0, true), 138.0);
        assert_eq!(final_hue(-6.0, 0.0, false), 250.0);
    }

    #[test]
    fn unpleasant_band_is_skipped() {
        assert_eq!(final_hue(64.0, 0.0, false), 191.0);
        assert_eq!(final_hue(84.0, 0.0, false), 171.0);
        assert_eq!(final_hue(85.0, 0.0, false), 85.0);
        assert_eq!(final_hue(63.0, 0.0, false), 63.0);
    }

    #[test]
    fn speed_or_curvature() {
        let by_speed = ParameterState {
            flags: Flags {
                color_by_speed: true,
                ..Flags::default()
            },
            ..ParameterState::default()
        };
        assert_eq!(hue(&by_speed, point(0.5, 0.0), point(0.0, 0.0), 0.0), 50.0);
        let by_curvature = ParameterState::default();
        let h = hue(&by_curvature, point(0.0, 0.0), point(0.0, 0.0), 2.0 * PI);
        assert!((h - (40.0 * PI).rem_euclid(256.0)).abs() < 1e-9);
    }

    #[test]
    fn primaries_convert() {
        assert_eq!(Hsv::vivid(0.0).to_rgb(), Rgb([255, 0, 0]));
        assert_eq!(Hsv::vivid(256.0 / 3.0).to_rgb(), Rgb([0, 255, 0]));
        assert_eq!(Hsv::BLACK.to_rgb(), Rgb([0, 0, 0]));
    }
}
