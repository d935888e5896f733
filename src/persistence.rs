// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Saving and loading pictures, snapshots and video frames.
//!
//! A picture is saved as a PNG with a JSON snapshot of its parameters
//! beside it.  Loading a snapshot merges it into the live state key by
//! key, so a snapshot written by an older build, missing some keys,
//! still loads.  Session-only settings (the nudge step, the view mode
//! and video capture) never travel through a snapshot.

use image::RgbImage;
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::params::ParameterState;

/// Keys left out of exported snapshots.
const NOT_EXPORTED: [&str; 1] = ["delta"];

/// Keys an import never takes from the file.
const NOT_IMPORTED: [&str; 2] = ["delta", "view_mode"];

/// Keys under `flags` that are session-only.
const SESSION_FLAGS: [&str; 1] = ["video"];

/// Snapshot file name inside a video directory.
pub const VIDEO_SNAPSHOT: &str = "snapshot.json";

/// The snapshot of `params` as a JSON value, without session-only keys.
pub fn snapshot(params: &ParameterState) -> Result<Value> {
    let mut value = serde_json::to_value(params)?;
    if let Value::Object(ref mut map) = value {
        for key in NOT_EXPORTED.iter() {
            map.remove(*key);
        }
        if let Some(Value::Object(flags)) = map.get_mut("flags") {
            for key in SESSION_FLAGS.iter() {
                flags.remove(*key);
            }
        }
    }
    Ok(value)
}

/// Write the snapshot of `params` to `path`.
pub fn write_snapshot(params: &ParameterState, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(&snapshot(params)?)?;
    fs::write(path, text)?;
    Ok(())
}

/// Where the snapshot of a picture saved at `image` goes.
pub fn snapshot_path(image: &Path) -> PathBuf {
    image.with_extension("json")
}

/// Save the canvas as a PNG at `path` and the parameters beside it.
/// Returns the snapshot path.
pub fn export(canvas: &Canvas, params: &ParameterState, path: &Path) -> Result<PathBuf> {
    canvas.to_rgb_image().save(path)?;
    let sidecar = snapshot_path(path);
    write_snapshot(params, &sidecar)?;
    info!("saved {} and {}", path.display(), sidecar.display());
    Ok(sidecar)
}

fn merge(base: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if let Value::Object(sub) = value {
            if let Some(Value::Object(inner)) = base.get_mut(&key) {
                merge(inner, sub);
                continue;
            }
            base.insert(key, Value::Object(sub));
        } else {
            base.insert(key, value);
        }
    }
}

/// Merge a snapshot into `live`.  Keys present in the snapshot replace
/// the live ones, except the session-only keys, which always come from
/// `live`.  The result is sanitized.
pub fn merge_snapshot(live: &ParameterState, snapshot: Value) -> Result<ParameterState> {
    let mut patch = match snapshot {
        Value::Object(map) => map,
        _ => return Ok(live.clone()),
    };
    for key in NOT_IMPORTED.iter() {
        patch.remove(*key);
    }
    if let Some(Value::Object(flags)) = patch.get_mut("flags") {
        for key in SESSION_FLAGS.iter() {
            flags.remove(*key);
        }
    }

    let mut merged = match serde_json::to_value(live)? {
        Value::Object(map) => map,
        _ => return Ok(live.clone()),
    };
    merge(&mut merged, patch);
    let params: ParameterState = serde_json::from_value(Value::Object(merged))?;
    Ok(params.sanitized())
}

/// Load the snapshot at `path` and merge it into `live`.
pub fn import(path: &Path, live: &ParameterState) -> Result<ParameterState> {
    if !path.exists() {
        return Err(Error::missing(path));
    }
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let params = merge_snapshot(live, value)?;
    info!("loaded {} ({})", path.display(), params.variation_name());
    Ok(params)
}

/// Load a raster for display.  Parameters are not touched.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(Error::missing(path));
    }
    Ok(image::open(path)?.to_rgb8())
}

/// An active video capture: a numbered directory that receives one PNG
/// per requested frame.
#[derive(Debug)]
pub struct VideoCapture {
    dir: PathBuf,
}

impl VideoCapture {
    /// Create the first free `video_NNNN` directory under `root`, and
    /// store the current snapshot in it.
    pub fn start(root: &Path, params: &ParameterState) -> Result<VideoCapture> {
        fs::create_dir_all(root)?;
        let mut n = 1;
        let dir = loop {
            let candidate = root.join(format!("video_{:04}", n));
            if !candidate.exists() {
                break candidate;
            }
            n += 1;
        };
        fs::create_dir(&dir)?;
        write_snapshot(params, &dir.join(VIDEO_SNAPSHOT))?;
        info!("capturing video frames into {}", dir.display());
        Ok(VideoCapture { dir })
    }

    /// The directory frames go to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path of frame `index`.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", index))
    }

    /// Write frame `index`.
    pub fn save_frame(&self, canvas: &Canvas, index: u64) -> Result<PathBuf> {
        let path = self.frame_path(index);
        canvas.to_rgb_image().save(&path)?;
        debug!("frame {} -> {}", index, path.display());
        Ok(path)
    }
}
