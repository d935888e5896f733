// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameter state.
//!
//! `ParameterState` is a plain value.  Nothing in the pipeline mutates
//! one in place: input handling, the randomizer and snapshot import all
//! build a new state and hand it over whole, so a step never sees a
//! half-updated configuration.

use serde::{Deserialize, Serialize};

use crate::pretransforms::{self, Power};
use crate::variations;

/// Smallest polygon order.
pub const MIN_ORDER: u32 = 3;

/// Largest dot diameter.
pub const MAX_DOT_SIZE: u8 = 8;

/// What the four direction commands adjust.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Direction commands zoom each axis.
    Scale,
    /// Direction commands pan the image.
    Shift,
}

/// The boolean switches of the pipeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    /// Run the pre-transform stage.
    pub pretransform: bool,
    /// Swap the components after the pre-transform stage.
    pub swap: bool,
    /// Read the point as `(r, θ)` and convert it to Cartesian.
    pub polar: bool,
    /// Wrap the selected variation in the polar remap.
    pub polarize: bool,
    /// Apply the ball fold before the n-gon step.
    pub fold: bool,
    /// Apply the variation again after the n-gon step.  Breaks the
    /// rotational symmetry.
    pub reapply: bool,
    /// Paint four lattice-aligned mirror images instead of one pixel.
    pub mirror: bool,
    /// Reflect horizontally.
    pub reflect_x: bool,
    /// Reflect vertically.
    pub reflect_y: bool,
    /// Rotate the view by a quarter turn.
    pub quarter_turn: bool,
    /// Rotate the view by π/4.
    pub eighth_turn: bool,
    /// Rotate the view by half a sector, π/n.
    pub half_sector: bool,
    /// Take the hue from the speed of the orbit instead of its
    /// curvature.
    pub color_by_speed: bool,
    /// Shift every hue by half the wheel.
    pub invert: bool,
    /// Save video frames while drawing.
    pub video: bool,
}

/// Names for each flag, so they can be toggled from outside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flag {
    /// `Flags::pretransform`
    Pretransform,
    /// `Flags::swap`
    Swap,
    /// `Flags::polar`
    Polar,
    /// `Flags::polarize`
    Polarize,
    /// `Flags::fold`
    Fold,
    /// `Flags::reapply`
    Reapply,
    /// `Flags::mirror`
    Mirror,
    /// `Flags::reflect_x`
    ReflectX,
    /// `Flags::reflect_y`
    ReflectY,
    /// `Flags::quarter_turn`
    QuarterTurn,
    /// `Flags::eighth_turn`
    EighthTurn,
    /// `Flags::half_sector`
    HalfSector,
    /// `Flags::color_by_speed`
    ColorBySpeed,
    /// `Flags::invert`
    Invert,
}

impl Flags {
    fn slot(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::Pretransform => &mut self.pretransform,
            Flag::Swap => &mut self.swap,
            Flag::Polar => &mut self.polar,
            Flag::Polarize => &mut self.polarize,
            Flag::Fold => &mut self.fold,
            Flag::Reapply => &mut self.reapply,
            Flag::Mirror => &mut self.mirror,
            Flag::ReflectX => &mut self.reflect_x,
            Flag::ReflectY => &mut self.reflect_y,
            Flag::QuarterTurn => &mut self.quarter_turn,
            Flag::EighthTurn => &mut self.eighth_turn,
            Flag::HalfSector => &mut self.half_sector,
            Flag::ColorBySpeed => &mut self.color_by_speed,
            Flag::Invert => &mut self.invert,
        }
    }

    /// A copy with `flag` flipped.
    pub fn toggled(mut self, flag: Flag) -> Self {
        let slot = self.slot(flag);
        *slot = !*slot;
        self
    }

    /// Read a single flag.
    pub fn get(mut self, flag: Flag) -> bool {
        *self.slot(flag)
    }
}

/// Everything the pipeline reads to take a step and paint it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterState {
    /// Polygon order n, at least 3.
    pub order: u32,
    /// Index into the variation catalog.
    pub variation: usize,
    /// Index into the pre-transform catalog.
    pub pretransform: usize,
    /// Horizontal contraction of the affine map.
    pub t: f64,
    /// Vertical contraction of the affine map.
    pub u: f64,
    /// Auxiliary parameter.  Snapshots carry it and the randomizer
    /// draws it, but no stage of the step reads it.
    pub w: f64,
    /// Horizontal offset of the affine map, also the inner fold radius.
    pub a: f64,
    /// Vertical offset of the affine map, also the outer fold radius.
    pub b: f64,
    /// How far one nudge moves t, u, w, a or b.
    pub delta: f64,
    /// Per-axis zoom of the view.
    pub scale: (f64, f64),
    /// Pixel offset of the view.
    pub shift: (i64, i64),
    /// Dot diameter in pixels; 0 disables drawing.
    pub dot_size: u8,
    /// Added to every hue, in `[0, 256)`.
    pub hue_offset: f64,
    /// What the direction commands adjust.
    pub view_mode: ViewMode,
    /// Component square/root toggles of the pre-transform stage.
    pub components: Power,
    /// Whole-value square/root toggles of the pre-transform stage.
    pub whole: Power,
    /// Boolean switches.
    pub flags: Flags,
}

impl Default for ParameterState {
    fn default() -> Self {
        ParameterState {
            order: MIN_ORDER,
            variation: 0,
            pretransform: 0,
            t: 0.5,
            u: 0.5,
            w: 0.5,
            a: 0.75,
            b: 0.0,
            delta: 0.01,
            scale: (1.0, 1.0),
            shift: (0, 0),
            dot_size: 1,
            hue_offset: 0.0,
            view_mode: ViewMode::Scale,
            components: Power::None,
            whole: Power::None,
            flags: Flags::default(),
        }
    }
}

impl ParameterState {
    /// Bring every field back inside its invariant range.  Indices wrap,
    /// the order and dot size clamp.
    pub fn sanitized(self) -> Self {
        ParameterState {
            order: self.order.max(MIN_ORDER),
            variation: self.variation % variations::COUNT,
            pretransform: self.pretransform % pretransforms::COUNT,
            dot_size: self.dot_size.min(MAX_DOT_SIZE),
            hue_offset: self.hue_offset.rem_euclid(256.0),
            ..self
        }
    }

    /// Name of the active variation.
    pub fn variation_name(&self) -> &'static str {
        variations::get(self.variation).name
    }
}

/// `index + 1`, wrapping to 0 past `len - 1`.
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// `index - 1`, wrapping to `len - 1` below 0.
pub fn prev_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_sierpinski_triangle() {
        let p = ParameterState::default();
        assert_eq!(p.order, 3);
        assert_eq!(p.variation_name(), "identity");
        assert_eq!((p.t, p.u, p.a, p.b), (0.5, 0.5, 0.75, 0.0));
        assert!(!p.flags.reapply && !p.flags.pretransform);
    }

    #[test]
    fn variation_index_wraps_both_ways() {
        assert_eq!(prev_index(0, variations::COUNT), variations::COUNT - 1);
        assert_eq!(next_index(variations::COUNT - 1, variations::COUNT), 0);
        assert_eq!(next_index(4, variations::COUNT), 5);
    }

    #[test]
    fn pretransform_index_wraps_both_ways() {
        assert_eq!(prev_index(0, pretransforms::COUNT), 20);
        assert_eq!(next_index(20, pretransforms::COUNT), 0);
    }

    #[test]
    fn sanitize_restores_invariants() {
        let p = ParameterState {
            order: 1,
            variation: variations::COUNT + 2,
            pretransform: 44,
            dot_size: 40,
            hue_offset: -8.0,
            ..ParameterState::default()
        }
        .sanitized();
        assert_eq!(p.order, 3);
        assert_eq!(p.variation, 2);
        assert_eq!(p.pretransform, 2);
        assert_eq!(p.dot_size, MAX_DOT_SIZE);
        assert_eq!(p.hue_offset, 248.0);
    }

    #[test]
    fn toggling_a_flag_touches_only_that_flag() {
        let f = Flags::default().toggled(Flag::Mirror);
        assert!(f.mirror);
        assert!(f.get(Flag::Mirror));
        assert_eq!(f.toggled(Flag::Mirror), Flags::default());
    }
}
