#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Chaos-game renderer
//!
//! The chaos game draws a fractal by wandering: start anywhere, pick a
//! vertex of a regular polygon at random, move part of the way towards
//! it, paint the spot, repeat.  With a triangle and a halfway step the
//! wandering point traces out the Sierpinski triangle; everything else
//! in this crate is a way of bending that walk.
//!
//! Before each step the point can be warped by a pre-transform, have
//! its components swapped, be read as polar coordinates or be folded
//! through a ball.  The step itself passes the point through one of a
//! catalog of nonlinear "variations" before the affine contraction
//! towards the chosen vertex, and the variation can be applied once
//! more afterwards.  Because every vertex is a rotation of the first,
//! the picture keeps the polygon's symmetry unless that last
//! reapplication breaks it.
//!
//! Each new point is projected to a pixel and painted with a hue taken
//! from the orbit's curvature or speed, blended into what is already
//! there.  A `Session` holds the whole picture: the parameters, the
//! orbit, the canvas and the random source.

pub mod attractor;
pub mod canvas;
pub mod color;
pub mod complex;
pub mod controls;
pub mod error;
pub mod ngon;
pub mod params;
pub mod persistence;
pub mod planes;
pub mod pretransforms;
pub mod random;
pub mod session;
pub mod variations;

pub use crate::canvas::Canvas;
pub use crate::complex::Point;
pub use crate::controls::Command;
pub use crate::error::{Error, Result};
pub use crate::params::ParameterState;
pub use crate::planes::{Pixel, PlaneMapper};
pub use crate::session::{Session, Tick};
