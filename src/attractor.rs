// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orbit state and the per-step pipeline.
//!
//! One step runs the stages in a fixed order: pre-transform (with its
//! component and whole-value adjustments), swap, polar reading, ball
//! fold, the n-gon step with the selected variation, and finally the
//! optional reapplication of the variation.  The state keeps the last
//! two points so the painter can measure speed and curvature.

use rand::Rng;
use std::f64::consts::PI;

use crate::complex::{self, point, Point};
use crate::ngon;
use crate::params::ParameterState;
use crate::pretransforms;
use crate::variations;

/// The evolving orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct AttractorState {
    /// The latest point.
    pub current: Point,
    /// The point before it.
    pub previous: Point,
    /// Steps taken since the last reset.
    pub iterations: u64,
    /// Video frames requested since the last reset.
    pub frames: u64,
}

/// What a step produced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// The new current point.
    pub point: Point,
    /// Turning angle between the last two displacements, offset by 2π.
    pub curvature: f64,
    /// When the cadence says a video frame is due, its sequence number.
    pub frame_due: Option<u64>,
}

impl Default for AttractorState {
    fn default() -> Self {
        AttractorState::at(point(0.0, 0.0))
    }
}

impl AttractorState {
    /// A fresh orbit seeded at `start`.
    pub fn at(start: Point) -> Self {
        AttractorState {
            current: start,
            previous: start,
            iterations: 0,
            frames: 0,
        }
    }

    /// Advance the orbit by one step.
    pub fn step<R: Rng + ?Sized>(&mut self, params: &ParameterState, rng: &mut R) -> StepOutcome {
        let z = self.current;
        let z0 = self.previous;
        let flags = params.flags;

        let mut p = if flags.pretransform {
            pretransforms::pretransform(params.pretransform, params.components, params.whole, z)
        } else {
            z
        };
        if flags.swap {
            p = complex::swap(p);
        }
        if flags.polar {
            p = complex::polar_to_cartesian(p);
        }
        if flags.fold {
            p = ngon::ball_fold(p, params.a, params.b);
        }

        let variation = variations::select(params.variation, flags.polarize);
        let mut next = ngon::step(
            p,
            params.t,
            params.u,
            params.a,
            params.b,
            params.order,
            &variation,
            rng,
        );
        if flags.reapply {
            next = variation(next);
        }

        let curvature = curvature(z0, z, next);

        self.previous = z;
        self.current = next;
        self.iterations += 1;

        let frame_due = if flags.video && params.dot_size > 0 && frame_cadence(self.iterations) {
            self.frames += 1;
            Some(self.frames)
        } else {
            None
        };

        StepOutcome {
            point: next,
            curvature,
            frame_due,
        }
    }
}

/// `2π + arg(next − z) − arg(z − z0)`.
pub fn curvature(z0: Point, z: Point, next: Point) -> f64 {
    2.0 * PI + ((next - z).arg() - (z - z0).arg())
}

/// True when `count` is a multiple of `floor(20·ln(count))`.  Frames
/// come quickly while the picture is sparse and thin out as it fills.
pub fn frame_cadence(count: u64) -> bool {
    if count == 0 {
        return false;
    }
    let every = (20.0 * (count as f64).ln()).floor() as u64;
    every > 0 && count % every == 0
}
