// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rendering session.
//!
//! A session owns everything that changes from one frame to the next:
//! the parameters, the orbit, the canvas and the random source.  The
//! driver calls `tick` once per frame; each tick takes one step and
//! paints it.  This is also the one place a render fault is caught: the
//! session steps back one variation, restores the default parameters,
//! clears everything and carries on.

use log::{info, warn};
use rand::Rng;

use crate::attractor::{AttractorState, StepOutcome};
use crate::canvas::Canvas;
use crate::color::{self, Hsv};
use crate::controls::Command;
use crate::error::{Error, Result};
use crate::params::{prev_index, ParameterState};
use crate::planes::{Pixel, PlaneMapper};
use crate::pretransforms;
use crate::random;
use crate::variations;

/// What a tick did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// The step was painted (or skipped, for dot size 0).
    Drawn,
    /// The step was painted and a video frame is due; the caller should
    /// save the canvas as frame `n`.
    FrameDue(u64),
    /// The step produced a non-finite point and the session was reset.
    Recovered,
}

/// Parameters, orbit, canvas and randomness for one picture.
pub struct Session<R: Rng> {
    params: ParameterState,
    attractor: AttractorState,
    canvas: Canvas,
    planes: PlaneMapper,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// A blank canvas of the given size, with the orbit at the origin.
    pub fn new(width: usize, height: usize, params: ParameterState, rng: R) -> Result<Self> {
        let planes = PlaneMapper::new(width, height)?;
        Ok(Session {
            params: params.sanitized(),
            attractor: AttractorState::default(),
            canvas: Canvas::new(width, height),
            planes,
            rng,
        })
    }

    /// The live parameters.
    pub fn params(&self) -> &ParameterState {
        &self.params
    }

    /// The orbit.
    pub fn attractor(&self) -> &AttractorState {
        &self.attractor
    }

    /// The canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The projection in use.
    pub fn planes(&self) -> &PlaneMapper {
        &self.planes
    }

    /// Swap in a whole new parameter state between frames.
    pub fn replace_params(&mut self, params: ParameterState) {
        self.params = params.sanitized();
    }

    /// Apply one input command.
    pub fn apply(&mut self, command: Command) {
        self.params = self.params.apply(command);
    }

    /// Take one step and paint it.
    pub fn tick(&mut self) -> Tick {
        let outcome = self.attractor.step(&self.params, &mut self.rng);
        match self.paint(&outcome) {
            Ok(()) => match outcome.frame_due {
                Some(n) => Tick::FrameDue(n),
                None => Tick::Drawn,
            },
            Err(e) => {
                self.recover(e);
                Tick::Recovered
            }
        }
    }

    /// Run `count` ticks and return how many recovered from a fault.
    /// Frame requests are passed to `on_frame`.
    pub fn run<F>(&mut self, count: u64, mut on_frame: F) -> u64
    where
        F: FnMut(&Canvas, u64),
    {
        let mut recovered = 0;
        for _ in 0..count {
            match self.tick() {
                Tick::Drawn => {}
                Tick::FrameDue(n) => on_frame(&self.canvas, n),
                Tick::Recovered => recovered += 1,
            }
        }
        recovered
    }

    fn paint(&mut self, outcome: &StepOutcome) -> Result<()> {
        let pixel = self.planes.point_to_pixel(outcome.point, &self.params)?;
        if self.params.dot_size == 0 {
            return Ok(());
        }
        let hue = color::hue(
            &self.params,
            self.attractor.current,
            self.attractor.previous,
            outcome.curvature,
        );
        if !hue.is_finite() {
            return Err(Error::RenderFault);
        }
        let color = Hsv::vivid(hue);
        if self.params.flags.mirror {
            let set = self.planes.mirror(pixel);
            self.canvas.dots(&set, self.params.dot_size, color);
        } else {
            self.canvas.dot(pixel, self.params.dot_size, color);
        }
        Ok(())
    }

    fn recover(&mut self, cause: Error) {
        let variation = prev_index(self.params.variation, variations::COUNT);
        warn!(
            "{} under variation '{}'; resetting with '{}'",
            cause,
            self.params.variation_name(),
            variations::get(variation).name
        );
        self.params = ParameterState {
            variation,
            ..ParameterState::default()
        };
        self.clear();
    }

    fn clear(&mut self) {
        self.attractor = AttractorState::default();
        self.canvas.clear();
    }

    /// Clear the canvas and restart the orbit at the origin.
    pub fn reset(&mut self) {
        info!("reset: {} on a {}-gon", self.params.variation_name(), self.params.order);
        self.clear();
    }

    /// Restart the orbit at the point under `pixel` and clear the canvas.
    pub fn seed_at(&mut self, pixel: Pixel) {
        let start = self.planes.pixel_to_point(&pixel, &self.params);
        self.attractor = AttractorState::at(start);
        self.canvas.clear();
    }

    /// Replace the parameters with a random draw and reset.
    pub fn randomize(&mut self, symmetric: bool) {
        self.params = random::randomize(&self.params, symmetric, &mut self.rng);
        info!(
            "random draw: variation '{}', pre-transform '{}' ({}), t={:.3} u={:.3}{}",
            self.params.variation_name(),
            pretransforms::name(self.params.pretransform),
            if self.params.flags.pretransform { "on" } else { "off" },
            self.params.t,
            self.params.u,
            if symmetric { " (symmetric)" } else { "" }
        );
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::point;
    use crate::params::Flags;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(params: ParameterState) -> Session<StdRng> {
        Session::new(200, 200, params, StdRng::seed_from_u64(42)).unwrap()
    }

    fn painted(s: &Session<StdRng>) -> usize {
        let bg = s.canvas().background();
        let mut n = 0;
        for y in 0..s.canvas().height() as i64 {
            for x in 0..s.canvas().width() as i64 {
                if s.canvas().get(Pixel(x, y)) != Some(bg) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn ticks_paint_the_sierpinski_triangle() {
        let mut s = session(ParameterState::default());
        let recovered = s.run(5_000, |_, _| {});
        assert_eq!(recovered, 0);
        assert_eq!(s.attractor().iterations, 5_000);
        assert!(painted(&s) > 100);
    }

    #[test]
    fn dot_size_zero_paints_nothing_but_still_steps() {
        let mut s = session(ParameterState {
            dot_size: 0,
            ..ParameterState::default()
        });
        s.run(1_000, |_, _| {});
        assert_eq!(painted(&s), 0);
        assert_eq!(s.attractor().iterations, 1_000);
    }

    #[test]
    fn mirrored_painting_is_symmetric() {
        let mut s = session(ParameterState {
            flags: Flags {
                mirror: true,
                ..Flags::default()
            },
            ..ParameterState::default()
        });
        s.run(3_000, |_, _| {});
        let c = s.canvas();
        for (x, y) in &[(10i64, 20i64), (50, 70), (99, 99)] {
            let p = c.get(Pixel(*x, *y));
            assert_eq!(p.is_some(), c.get(Pixel(199 - x, *y)).is_some());
            assert_eq!(
                p == Some(c.background()),
                c.get(Pixel(199 - x, 199 - y)) == Some(c.background())
            );
        }
    }

    #[test]
    fn render_fault_steps_back_and_resets() {
        let mut s = session(ParameterState {
            variation: 0,
            order: 5,
            ..ParameterState::default()
        });
        s.run(100, |_, _| {});
        s.attractor.current = point(std::f64::NAN, 0.0);
        assert_eq!(s.tick(), Tick::Recovered);
        assert_eq!(s.params().variation, variations::COUNT - 1);
        assert_eq!(s.params().order, 3);
        assert_eq!(s.attractor().iterations, 0);
        assert_eq!(painted(&s), 0);
        assert_eq!(s.tick(), Tick::Drawn);
    }

    #[test]
    fn huge_finite_iterates_are_drawn_off_the_canvas() {
        for &(dot_size, shift) in &[(3u8, (0i64, 0i64)), (1, (10, 10))] {
            let mut s = session(ParameterState {
                variation: 16,
                dot_size,
                shift,
                ..ParameterState::default()
            });
            s.attractor.current = point(100.0, 0.25);
            assert_eq!(s.tick(), Tick::Drawn);
            assert!(s.attractor().current.norm() > 1e20);
            assert_eq!(painted(&s), 0);
        }
    }

    #[test]
    fn non_finite_hues_are_render_faults() {
        let mut s = session(ParameterState {
            variation: 1,
            flags: Flags {
                color_by_speed: true,
                ..Flags::default()
            },
            ..ParameterState::default()
        });
        s.attractor.current = point(1e307, 0.0);
        assert_eq!(s.tick(), Tick::Recovered);
        assert_eq!(s.params().variation, 0);
        assert_eq!(painted(&s), 0);
    }

    #[test]
    fn frames_are_requested_while_capturing() {
        let mut s = session(ParameterState {
            flags: Flags {
                video: true,
                ..Flags::default()
            },
            ..ParameterState::default()
        });
        let mut frames = vec![];
        s.run(500, |_, n| frames.push(n));
        // Counts 89, 214, 351, 492 and 496 are due.
        assert_eq!(frames, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn seeding_starts_the_orbit_under_the_pointer() {
        let mut s = session(ParameterState::default());
        s.run(10, |_, _| {});
        s.seed_at(Pixel(150, 50));
        let start = s.attractor().current;
        assert!((start - point(1.0, -1.0)).norm() < 1e-12);
        assert_eq!(painted(&s), 0);
    }

    #[test]
    fn randomize_clears_and_respects_symmetry() {
        let mut s = session(ParameterState::default());
        s.run(100, |_, _| {});
        s.randomize(true);
        assert!(!s.params().flags.reapply);
        assert_eq!(s.attractor().iterations, 0);
        assert_eq!(painted(&s), 0);
    }

    #[test]
    fn commands_replace_the_state() {
        let mut s = session(ParameterState::default());
        s.apply(Command::OrderUp);
        assert_eq!(s.params().order, 4);
        s.replace_params(ParameterState {
            order: 0,
            ..ParameterState::default()
        });
        assert_eq!(s.params().order, 3);
    }
}
