//-
// Copyright (c) 2024, Jason Lingle
//
// This file is part of Recast.
//
// Recast is free software: you can  redistribute it and/or modify it under the
// terms of  the GNU General Public  License as published by  the Free Software
// Foundation, either version  3 of the License, or (at  your option) any later
// version.
//
// Recast is distributed  in the hope that  it will be useful,  but WITHOUT ANY
// WARRANTY; without  even the implied  warranty of MERCHANTABILITY  or FITNESS
// FOR  A PARTICULAR  PURPOSE.  See the  GNU General  Public  License for  more
// details.
//
// You should have received a copy of the GNU General Public License along with
// Recast. If not, see <http://www.gnu.org/licenses/>.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::support::error::Error;

/// Configuration for converting legacy records.
///
/// This is typically stored in a file named `recast.toml`. Every key is
/// optional.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompatConfig {
    /// The directory holding per-user Google Cloud Storage credential files.
    ///
    /// Legacy records which neither embed their credentials nor use
    /// automatic credentials are resolved against
    /// `<credentials_dir>/<user>_gcs_credentials.json`.
    ///
    /// A relative path is interpreted relative to the directory containing
    /// the configuration file.
    pub credentials_dir: PathBuf,
}

impl Default for CompatConfig {
    fn default() -> Self {
        CompatConfig {
            credentials_dir: PathBuf::from("credentials"),
        }
    }
}

impl CompatConfig {
    /// Load the configuration from the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let mut config: CompatConfig = toml::from_slice(&data)?;

        if config.credentials_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.credentials_dir = parent.join(&config.credentials_dir);
            }
        }

        Ok(config)
    }
}
