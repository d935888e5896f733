// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Random configurations for exploration.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::params::{Flags, ParameterState};
use crate::pretransforms::{self, Power};
use crate::variations;

/// Draw a new configuration from `base`.
///
/// The catalog indices, t, u, w and the structural switches are drawn
/// afresh, the view is reset to the identity and video capture stops.
/// The polygon order, dot size and coloring are kept.  With
/// `symmetric` the variation is never reapplied after the n-gon step,
/// so the picture keeps its n-fold symmetry.
pub fn randomize<R: Rng + ?Sized>(base: &ParameterState, symmetric: bool, rng: &mut R) -> ParameterState {
    let coefficient = Uniform::new_inclusive(-2.0, 2.0);

    let variation = Uniform::new(0, variations::COUNT).sample(rng);
    let pretransform = Uniform::new(0, pretransforms::COUNT).sample(rng);
    let t = coefficient.sample(rng);
    let u = coefficient.sample(rng);
    let w = coefficient.sample(rng);

    let pretransform_on: bool = rng.gen();
    let polar: bool = rng.gen();
    let polarize: bool = rng.gen();
    let swap: bool = rng.gen();
    let fold: bool = rng.gen();
    let root_whole: bool = rng.gen();
    let square_whole: bool = rng.gen();
    let root_components: bool = rng.gen();
    let square_components: bool = rng.gen();
    let reapply = if symmetric { false } else { rng.gen() };

    ParameterState {
        variation,
        pretransform,
        t,
        u,
        w,
        scale: (1.0, 1.0),
        shift: (0, 0),
        whole: Power::from_flags(square_whole, root_whole),
        components: Power::from_flags(square_components, root_components),
        flags: Flags {
            pretransform: pretransform_on,
            polar,
            polarize,
            swap,
            fold,
            reapply,
            video: false,
            ..base.flags
        },
        ..base.clone()
    }
}
