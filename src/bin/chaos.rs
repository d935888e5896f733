// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::str::FromStr;

use chaosgame::persistence::{self, VideoCapture};
use chaosgame::{Command, Error, ParameterState, Session};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_commands(s: &str) -> Result<Vec<Command>, String> {
    s.split(',')
        .filter(|token| !token.trim().is_empty())
        .map(Command::from_str)
        .collect()
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const LOAD: &str = "load";
const RANDOM: &str = "random";
const SYMMETRIC: &str = "symmetric";
const SEED: &str = "seed";
const COMMANDS: &str = "commands";
const VIDEO: &str = "video";

fn args<'a>() -> ArgMatches<'a> {
    App::new("chaos")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Chaos-game renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG; the snapshot is written beside it"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("768x768")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("200000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        50_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 50000000",
                    )
                })
                .help("Number of points to plot"),
        )
        .arg(
            Arg::with_name(LOAD)
                .required(false)
                .long(LOAD)
                .short("l")
                .takes_value(true)
                .help("Snapshot to start from"),
        )
        .arg(
            Arg::with_name(RANDOM)
                .required(false)
                .long(RANDOM)
                .short("r")
                .help("Start from a random configuration"),
        )
        .arg(
            Arg::with_name(SYMMETRIC)
                .required(false)
                .long(SYMMETRIC)
                .requires(RANDOM)
                .help("Keep the random configuration rotationally symmetric"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse seed".to_string())
                })
                .help("Seed for the random source"),
        )
        .arg(
            Arg::with_name(COMMANDS)
                .required(false)
                .long(COMMANDS)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| parse_commands(&s).map(|_| ()))
                .help("Comma separated commands to apply before drawing, e.g. order+,t-,toggle:mirror"),
        )
        .arg(
            Arg::with_name(VIDEO)
                .required(false)
                .long(VIDEO)
                .takes_value(true)
                .help("Save video frames into a new numbered directory here"),
        )
        .get_matches()
}

fn render(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = parse_pair::<u16>(matches.value_of(SIZE).unwrap_or("768x768"), 'x')
        .ok_or_else(|| Error::Shape("could not parse output image size".to_string()))?;
    let iterations = matches
        .value_of(ITERATIONS)
        .and_then(|s| u64::from_str(s).ok())
        .unwrap_or(200_000);
    let rng = match matches.value_of(SEED).and_then(|s| u64::from_str(s).ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut params = ParameterState::default();
    if let Some(load) = matches.value_of(LOAD) {
        match persistence::import(Path::new(load), &params) {
            Ok(loaded) => params = loaded,
            Err(Error::Missing(path)) => warn!("no snapshot at {}; using defaults", path),
            Err(e) => return Err(e),
        }
    }

    let mut session = Session::new(usize::from(width), usize::from(height), params, rng)?;
    if matches.is_present(RANDOM) {
        session.randomize(matches.is_present(SYMMETRIC));
    }
    if let Some(commands) = matches.value_of(COMMANDS) {
        let commands = parse_commands(commands).unwrap_or_default();
        let params = session.params().apply_all(&commands);
        session.replace_params(params);
    }

    let capture = match matches.value_of(VIDEO) {
        Some(root) => {
            let mut params = session.params().clone();
            params.flags.video = true;
            session.replace_params(params);
            Some(VideoCapture::start(Path::new(root), session.params())?)
        }
        None => None,
    };

    info!(
        "drawing {} points: {} on a {}-gon",
        iterations,
        session.params().variation_name(),
        session.params().order
    );
    let mut failed = None;
    let recovered = session.run(iterations, |canvas, n| {
        if failed.is_some() {
            return;
        }
        if let Some(capture) = &capture {
            if let Err(e) = capture.save_frame(canvas, n) {
                failed = Some(e);
            }
        }
    });
    if let Some(e) = failed {
        return Err(e);
    }
    if recovered > 0 {
        warn!("recovered from {} render faults", recovered);
    }

    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("chaos.png"));
    persistence::export(session.canvas(), session.params(), output)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = render(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
