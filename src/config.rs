use tsdf_access::{HashLayout, LayoutError, PlainArrayLayout};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Layouts shared with the allocator, loaded from a RON file.
///
/// Missing fields take the allocator's defaults.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub hash: HashLayout,
    pub plain_array: PlainArrayLayout,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

impl Config {
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = std::fs::File::open(path)?;
        let config: Self = ron::de::from_reader(reader)?;
        config.validated()
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if let Err(e) = self.hash.validate().and_then(|()| self.plain_array.validate()) {
            log::warn!("Rejected config {:?}: {}", self, e);
            return Err(e.into());
        }
        Ok(self)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
