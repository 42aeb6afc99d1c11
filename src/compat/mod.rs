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

//! Conversion of records written by older releases into the current account
//! model.
//!
//! Each supported legacy format has a submodule holding a frozen copy of its
//! wire shape and the mapping from that shape to the current one. The
//! version of a record is never guessed from its content; callers say which
//! format they are holding by picking the `LegacyUser` or `LegacyBackup`
//! variant.
//!
//! Conversion never mutates the legacy record and has no side effects beyond
//! reading credential files and logging, so the same `Converter` may be used
//! from several threads at once.

pub mod secret;
pub mod v2;
pub mod v4;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::account::model::User;
use crate::support::error::Error;
use crate::support::system_config::CompatConfig;
use self::secret::SecretMigrator;

/// The legacy formats which can be converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatVersion {
    V2,
    V4,
}

impl FromStr for FormatVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim_start_matches(|c| 'v' == c || 'V' == c) {
            "2" => Ok(FormatVersion::V2),
            "4" => Ok(FormatVersion::V4),
            _ => Err(format!("Unsupported legacy format version '{}'", s)),
        }
    }
}

impl FormatVersion {
    pub fn name(self) -> &'static str {
        match self {
            FormatVersion::V2 => "v2",
            FormatVersion::V4 => "v4",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single legacy user record, tagged with the format it was written in.
#[derive(Clone, Debug)]
pub enum LegacyUser {
    V2(v2::CompatUserV2),
    V4(v4::CompatUserV4),
}

impl LegacyUser {
    pub fn username(&self) -> &str {
        match *self {
            LegacyUser::V2(ref u) => &u.username,
            LegacyUser::V4(ref u) => &u.username,
        }
    }

    pub fn version(&self) -> FormatVersion {
        match *self {
            LegacyUser::V2(..) => FormatVersion::V2,
            LegacyUser::V4(..) => FormatVersion::V4,
        }
    }
}

/// A whole legacy backup, tagged with the format it was written in.
#[derive(Clone, Debug)]
pub enum LegacyBackup {
    V2(v2::BackupV2),
    V4(v4::BackupV4),
}

impl LegacyBackup {
    /// Parse a JSON backup written in the format `version`.
    pub fn from_json(version: FormatVersion, data: &[u8]) -> Result<Self, Error> {
        Ok(match version {
            FormatVersion::V2 => LegacyBackup::V2(serde_json::from_slice(data)?),
            FormatVersion::V4 => LegacyBackup::V4(serde_json::from_slice(data)?),
        })
    }

    pub fn version(&self) -> FormatVersion {
        match *self {
            LegacyBackup::V2(..) => FormatVersion::V2,
            LegacyBackup::V4(..) => FormatVersion::V4,
        }
    }

    /// Split the backup into its user records.
    pub fn into_users(self) -> Vec<LegacyUser> {
        match self {
            LegacyBackup::V2(b) => {
                b.users.into_iter().map(LegacyUser::V2).collect()
            },
            LegacyBackup::V4(b) => {
                b.users.into_iter().map(LegacyUser::V4).collect()
            },
        }
    }
}

/// Converts legacy records into the current model.
pub struct Converter {
    config: CompatConfig,
    secrets: SecretMigrator,
}

impl Converter {
    /// Create a converter which reads credential files from the file system
    /// and decodes `$aes$` secrets.
    pub fn new(config: CompatConfig) -> Self {
        Self::with_secret_migrator(config, SecretMigrator::default())
    }

    pub fn with_secret_migrator(
        config: CompatConfig,
        secrets: SecretMigrator,
    ) -> Self {
        Converter { config, secrets }
    }

    pub fn config(&self) -> &CompatConfig {
        &self.config
    }

    /// Convert `user` into the current model.
    ///
    /// On error, nothing of the record is returned. Errors are also logged
    /// against the user name.
    pub fn convert_user(&self, user: &LegacyUser) -> Result<User, Error> {
        match *user {
            LegacyUser::V2(ref u) => Ok(self.convert_user_v2(u)),
            LegacyUser::V4(ref u) => self.convert_user_v4(u),
        }
    }
}

/// Deserialises `null` as the default value.
///
/// Older writers emitted `null` rather than `[]` or `{}` for empty
/// collections.
pub(crate) fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}
