// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors.
//!
//! Arithmetic never fails (see `complex::SENTINEL`).  What can go wrong
//! is a non-finite point reaching the canvas, which the session
//! recovers from, and the filesystem.

use failure::Fail;
use std::io;
use std::path::Path;

/// Everything that can go wrong in this crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// A snapshot or image that was asked for does not exist.
    #[fail(display = "no such file: {}", _0)]
    Missing(String),

    /// Reading or writing a file failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),

    /// Encoding or decoding a raster failed.
    #[fail(display = "image error: {}", _0)]
    Image(#[cause] image::ImageError),

    /// A snapshot could not be read or written.
    #[fail(display = "malformed snapshot: {}", _0)]
    Snapshot(#[cause] serde_json::Error),

    /// A canvas shape that cannot hold an image.
    #[fail(display = "bad canvas shape: {}", _0)]
    Shape(String),

    /// A non-finite point reached the projection stage.
    #[fail(display = "non-finite point reached the canvas")]
    RenderFault,
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build the missing-file error for a path.
    pub fn missing(path: &Path) -> Self {
        Error::Missing(path.display().to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Snapshot(e)
    }
}
