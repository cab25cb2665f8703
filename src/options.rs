//! # World Options
//!
//! Startup options for the world subsystem, read once from a JSON file and then passed by
//! value into [`crate::voxels::world::World::new`]. Missing keys fall back to their defaults,
//! and a missing or unreadable file falls back to [`WorldOptions::default`].
//!
//! ```json
//! { "world_seed": 1234, "render_distance": 7, "initial_radius": 2, "reach": 6.0 }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::voxels::raycast::DEFAULT_REACH;

/// Errors raised while reading an options file.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// The file could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid options JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options controlling generation, streaming and interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldOptions {
    /// Seed every noise sampler derives its own seed from.
    pub world_seed: u32,
    /// Visible distance in chunks around the player.
    pub render_distance: i32,
    /// Radius of the square generated synchronously before streaming starts.
    pub initial_radius: i32,
    /// Maximum distance, in world units, for block interaction and look-at queries.
    pub reach: f32,
}

impl Default for WorldOptions {
    fn default() -> Self {
        WorldOptions {
            world_seed: 1234,
            render_distance: 7,
            initial_radius: 2,
            reach: DEFAULT_REACH,
        }
    }
}

impl WorldOptions {
    /// Reads options from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Location of the options file
    ///
    /// # Returns
    /// The parsed options, or an [`OptionsError`] if the file is missing or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let options = serde_json::from_reader(reader)?;
        Ok(options)
    }

    /// Reads options from a JSON file, falling back to defaults when it cannot be read.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(options) => options,
            Err(err) => {
                warn!("Using default options, could not read {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Radius, in chunks, kept loaded around the player.
    ///
    /// One ring wider than the render distance so the outermost visible chunks always have
    /// neighbours to mesh against.
    pub fn streaming_radius(&self) -> i32 {
        self.render_distance + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let options: WorldOptions = serde_json::from_str(r#"{ "world_seed": 99 }"#).unwrap();
        assert_eq!(options.world_seed, 99);
        assert_eq!(options.render_distance, 7);
        assert_eq!(options.initial_radius, 2);
        assert_eq!(options.reach, DEFAULT_REACH);
    }

    #[test]
    fn streaming_radius_adds_helper_ring() {
        let options = WorldOptions {
            render_distance: 3,
            ..WorldOptions::default()
        };
        assert_eq!(options.streaming_radius(), 4);
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let options = WorldOptions::load_or_default("definitely/not/here/options.json");
        assert_eq!(options, WorldOptions::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = serde_json::from_str::<WorldOptions>("{ world_seed: }").unwrap_err();
        let err = OptionsError::from(err);
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
