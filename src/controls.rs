// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Commands that move from one parameter state to the next.
//!
//! Whatever drives the renderer (a keyboard, a script, the CLI) turns
//! its input into `Command`s.  Each command maps a complete, valid
//! `ParameterState` to another one; no command can push an index out
//! of its catalog or the order below three.

use std::str::FromStr;

use crate::params::{next_index, prev_index, Flag, ParameterState, ViewMode, MAX_DOT_SIZE, MIN_ORDER};
use crate::pretransforms;
use crate::variations;

/// Order at which increments switch from +1 to doubling.
pub const ORDER_DOUBLING: u32 = 64;

/// Zoom factor of one scale command.
pub const ZOOM_STEP: f64 = 1.1;

/// Pan distance of one shift command, in pixels.
pub const PAN_STEP: i64 = 10;

/// Hue change of one hue command.
pub const HUE_STEP: f64 = 8.0;

/// A real parameter that can be nudged by `delta`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coefficient {
    /// `t`
    T,
    /// `u`
    U,
    /// `w`
    W,
    /// `a`
    A,
    /// `b`
    B,
}

/// Which way an adjustment goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    /// Increase.
    Plus,
    /// Decrease.
    Minus,
}

/// One discrete input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Raise the polygon order.
    OrderUp,
    /// Lower the polygon order.
    OrderDown,
    /// Next variation, wrapping.
    VariationNext,
    /// Previous variation, wrapping.
    VariationPrev,
    /// Next pre-transform, wrapping.
    PretransformNext,
    /// Previous pre-transform, wrapping.
    PretransformPrev,
    /// Move a coefficient by `delta`.
    Nudge(Coefficient, Sign),
    /// Divide `delta` by ten.
    DeltaFiner,
    /// Multiply `delta` by ten.
    DeltaCoarser,
    /// Narrow the x axis, or pan left.
    Left,
    /// Widen the x axis, or pan right.
    Right,
    /// Widen the y axis, or pan up.
    Up,
    /// Narrow the y axis, or pan down.
    Down,
    /// Switch the direction commands between zooming and panning.
    ToggleViewMode,
    /// Grow the dot.
    DotBigger,
    /// Shrink the dot.
    DotSmaller,
    /// Rotate the hue wheel forward.
    HueUp,
    /// Rotate the hue wheel back.
    HueDown,
    /// Flip a switch.
    Toggle(Flag),
    /// Cycle the whole-value square/root adjustment.
    CycleWhole,
    /// Cycle the component square/root adjustment.
    CycleComponents,
}

/// Next polygon order: +1 below `ORDER_DOUBLING`, doubling from there.
pub fn order_up(n: u32) -> u32 {
    if n < ORDER_DOUBLING {
        n + 1
    } else {
        n.saturating_mul(2)
    }
}

/// Previous polygon order: halving above `ORDER_DOUBLING`, -1 below,
/// never under `MIN_ORDER`.
pub fn order_down(n: u32) -> u32 {
    if n > ORDER_DOUBLING {
        n / 2
    } else {
        n.saturating_sub(1).max(MIN_ORDER)
    }
}

impl ParameterState {
    /// The state that follows this one after `command`.
    pub fn apply(&self, command: Command) -> ParameterState {
        let mut next = self.clone();
        match command {
            Command::OrderUp => next.order = order_up(self.order),
            Command::OrderDown => next.order = order_down(self.order),
            Command::VariationNext => next.variation = next_index(self.variation, variations::COUNT),
            Command::VariationPrev => next.variation = prev_index(self.variation, variations::COUNT),
            Command::PretransformNext => {
                next.pretransform = next_index(self.pretransform, pretransforms::COUNT)
            }
            Command::PretransformPrev => {
                next.pretransform = prev_index(self.pretransform, pretransforms::COUNT)
            }
            Command::Nudge(c, s) => {
                let d = match s {
                    Sign::Plus => self.delta,
                    Sign::Minus => -self.delta,
                };
                match c {
                    Coefficient::T => next.t += d,
                    Coefficient::U => next.u += d,
                    Coefficient::W => next.w += d,
                    Coefficient::A => next.a += d,
                    Coefficient::B => next.b += d,
                }
            }
            Command::DeltaFiner => next.delta = self.delta / 10.0,
            Command::DeltaCoarser => next.delta = self.delta * 10.0,
            Command::Left | Command::Right | Command::Up | Command::Down => {
                next = self.direction(command)
            }
            Command::ToggleViewMode => {
                next.view_mode = match self.view_mode {
                    ViewMode::Scale => ViewMode::Shift,
                    ViewMode::Shift => ViewMode::Scale,
                }
            }
            Command::DotBigger => next.dot_size = self.dot_size.saturating_add(1).min(MAX_DOT_SIZE),
            Command::DotSmaller => next.dot_size = self.dot_size.saturating_sub(1),
            Command::HueUp => next.hue_offset = (self.hue_offset + HUE_STEP).rem_euclid(256.0),
            Command::HueDown => next.hue_offset = (self.hue_offset - HUE_STEP).rem_euclid(256.0),
            Command::Toggle(flag) => next.flags = self.flags.toggled(flag),
            Command::CycleWhole => next.whole = self.whole.cycle(),
            Command::CycleComponents => next.components = self.components.cycle(),
        }
        next
    }

    fn direction(&self, command: Command) -> ParameterState {
        let mut next = self.clone();
        let (sx, sy) = self.scale;
        let (px, py) = self.shift;
        match (self.view_mode, command) {
            (ViewMode::Scale, Command::Left) => next.scale = (sx / ZOOM_STEP, sy),
            (ViewMode::Scale, Command::Right) => next.scale = (sx * ZOOM_STEP, sy),
            (ViewMode::Scale, Command::Up) => next.scale = (sx, sy * ZOOM_STEP),
            (ViewMode::Scale, Command::Down) => next.scale = (sx, sy / ZOOM_STEP),
            (ViewMode::Shift, Command::Left) => next.shift = (px - PAN_STEP, py),
            (ViewMode::Shift, Command::Right) => next.shift = (px + PAN_STEP, py),
            (ViewMode::Shift, Command::Up) => next.shift = (px, py - PAN_STEP),
            (ViewMode::Shift, Command::Down) => next.shift = (px, py + PAN_STEP),
            _ => {}
        }
        next
    }

    /// Apply a sequence of commands in order.
    pub fn apply_all<'a, I>(&self, commands: I) -> ParameterState
    where
        I: IntoIterator<Item = &'a Command>,
    {
        commands
            .into_iter()
            .fold(self.clone(), |state, command| state.apply(*command))
    }
}

const FLAG_NAMES: [(&str, Flag); 14] = [
    ("pretransform", Flag::Pretransform),
    ("swap", Flag::Swap),
    ("polar", Flag::Polar),
    ("polarize", Flag::Polarize),
    ("fold", Flag::Fold),
    ("reapply", Flag::Reapply),
    ("mirror", Flag::Mirror),
    ("reflect-x", Flag::ReflectX),
    ("reflect-y", Flag::ReflectY),
    ("quarter-turn", Flag::QuarterTurn),
    ("eighth-turn", Flag::EighthTurn),
    ("half-sector", Flag::HalfSector),
    ("speed", Flag::ColorBySpeed),
    ("invert", Flag::Invert),
];

impl FromStr for Command {
    type Err = String;

    /// Parse a command token such as `order+`, `variation-`, `t+`,
    /// `delta/`, `left`, `mode`, `toggle:mirror` or `whole`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix("toggle:") {
            return FLAG_NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, f)| Command::Toggle(*f))
                .ok_or_else(|| format!("unknown flag '{}'", name));
        }
        let command = match s {
            "order+" => Command::OrderUp,
            "order-" => Command::OrderDown,
            "variation+" => Command::VariationNext,
            "variation-" => Command::VariationPrev,
            "pretransform+" => Command::PretransformNext,
            "pretransform-" => Command::PretransformPrev,
            "delta/" => Command::DeltaFiner,
            "delta*" => Command::DeltaCoarser,
            "left" => Command::Left,
            "right" => Command::Right,
            "up" => Command::Up,
            "down" => Command::Down,
            "mode" => Command::ToggleViewMode,
            "dot+" => Command::DotBigger,
            "dot-" => Command::DotSmaller,
            "hue+" => Command::HueUp,
            "hue-" => Command::HueDown,
            "whole" => Command::CycleWhole,
            "components" => Command::CycleComponents,
            _ => return nudge(s).ok_or_else(|| format!("unknown command '{}'", s)),
        };
        Ok(command)
    }
}

fn nudge(s: &str) -> Option<Command> {
    let mut chars = s.chars();
    let c = match chars.next()? {
        't' => Coefficient::T,
        'u' => Coefficient::U,
        'w' => Coefficient::W,
        'a' => Coefficient::A,
        'b' => Coefficient::B,
        _ => return None,
    };
    let sign = match chars.next()? {
        '+' => Sign::Plus,
        '-' => Sign::Minus,
        _ => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(Command::Nudge(c, sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretransforms::Power;

    #[test]
    fn order_steps_by_one_then_doubles() {
        assert_eq!(order_up(3), 4);
        assert_eq!(order_up(63), 64);
        assert_eq!(order_up(64), 128);
        assert_eq!(order_down(128), 64);
        assert_eq!(order_down(64), 63);
        assert_eq!(order_down(3), 3);
    }

    #[test]
    fn variation_wraps_through_commands() {
        let p = ParameterState::default();
        assert_eq!(p.apply(Command::VariationPrev).variation, variations::COUNT - 1);
        let last = ParameterState {
            variation: variations::COUNT - 1,
            ..ParameterState::default()
        };
        assert_eq!(last.apply(Command::VariationNext).variation, 0);
    }

    #[test]
    fn pretransform_wraps_through_commands() {
        let p = ParameterState::default();
        assert_eq!(p.apply(Command::PretransformPrev).pretransform, 20);
        let last = p.apply(Command::PretransformPrev);
        assert_eq!(last.apply(Command::PretransformNext).pretransform, 0);
    }

    #[test]
    fn nudges_use_delta() {
        let p = ParameterState::default()
            .apply(Command::DeltaCoarser)
            .apply(Command::Nudge(Coefficient::A, Sign::Minus));
        assert!((p.a - 0.65).abs() < 1e-12);
        assert!((p.delta - 0.1).abs() < 1e-12);
    }

    #[test]
    fn directions_follow_the_view_mode() {
        let p = ParameterState::default();
        let zoomed = p.apply(Command::Right);
        assert!((zoomed.scale.0 - 1.1).abs() < 1e-12);
        assert_eq!(zoomed.shift, (0, 0));
        let panned = p.apply(Command::ToggleViewMode).apply(Command::Right);
        assert_eq!(panned.scale, (1.0, 1.0));
        assert_eq!(panned.shift, (PAN_STEP, 0));
    }

    #[test]
    fn dot_and_hue_stay_in_range() {
        let mut p = ParameterState::default();
        for _ in 0..20 {
            p = p.apply(Command::DotBigger);
        }
        assert_eq!(p.dot_size, MAX_DOT_SIZE);
        for _ in 0..20 {
            p = p.apply(Command::DotSmaller);
        }
        assert_eq!(p.dot_size, 0);
        assert_eq!(p.apply(Command::HueDown).hue_offset, 248.0);
    }

    #[test]
    fn power_toggles_cycle() {
        let p = ParameterState::default().apply(Command::CycleWhole);
        assert_eq!(p.whole, Power::Square);
        assert_eq!(p.apply(Command::CycleWhole).whole, Power::Root);
        assert_eq!(p.components, Power::None);
    }

    #[test]
    fn tokens_parse() {
        assert_eq!("order+".parse::<Command>(), Ok(Command::OrderUp));
        assert_eq!(
            "b-".parse::<Command>(),
            Ok(Command::Nudge(Coefficient::B, Sign::Minus))
        );
        assert_eq!(
            "toggle:reflect-x".parse::<Command>(),
            Ok(Command::Toggle(Flag::ReflectX))
        );
        assert!("toggle:nothing".parse::<Command>().is_err());
        assert!("t+x".parse::<Command>().is_err());
        assert!("sideways".parse::<Command>().is_err());
    }

    #[test]
    fn apply_all_runs_in_order() {
        let commands: Vec<Command> = vec![Command::OrderUp, Command::OrderUp, Command::OrderDown];
        assert_eq!(ParameterState::default().apply_all(&commands).order, 4);
    }
}
