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

//! The current representation of secret values.
//!
//! Every secret carries an explicit status, so there is never any doubt as
//! to whether its payload is usable as-is, still encrypted at rest, or
//! simply absent.

use std::fmt;

use secstr::SecStr;
use serde::{Deserialize, Serialize};

/// How the payload of a `Secret` is protected.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretStatus {
    /// No secret is set. The payload is empty.
    #[serde(rename = "")]
    Empty,
    /// The payload is the cleartext secret.
    #[serde(rename = "Plain")]
    Plain,
    /// The payload is encrypted at rest with AES-256-GCM.
    #[serde(rename = "AES-256-GCM")]
    Aes256Gcm,
    /// The payload is encrypted at rest with NaCl secretbox.
    #[serde(rename = "Secretbox")]
    Secretbox,
}

impl Default for SecretStatus {
    fn default() -> Self {
        SecretStatus::Empty
    }
}

/// A sensitive credential value.
///
/// The payload lives in memory that is locked against paging where the OS
/// allows it and is zeroed when dropped. The `Debug` implementation never
/// shows it.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct Secret {
    #[serde(default)]
    pub status: SecretStatus,
    #[serde(default = "empty_payload", with = "payload")]
    payload: SecStr,
    /// Key material for encrypted statuses, empty otherwise.
    #[serde(default)]
    pub key: String,
    /// Additional authenticated data for encrypted statuses.
    #[serde(default)]
    pub additional_data: String,
}

impl Secret {
    /// Return a secret in the `Empty` state.
    pub fn empty() -> Self {
        Secret {
            status: SecretStatus::Empty,
            payload: empty_payload(),
            key: String::new(),
            additional_data: String::new(),
        }
    }

    /// Return a `Plain` secret holding exactly `payload`.
    pub fn plain(payload: impl Into<Vec<u8>>) -> Self {
        Secret {
            status: SecretStatus::Plain,
            payload: SecStr::new(payload.into()),
            key: String::new(),
            additional_data: String::new(),
        }
    }

    /// Return a secret that is still encrypted at rest.
    pub fn encrypted(
        status: SecretStatus,
        payload: impl Into<Vec<u8>>,
        key: String,
        additional_data: String,
    ) -> Self {
        Secret {
            status,
            payload: SecStr::new(payload.into()),
            key,
            additional_data,
        }
    }

    pub fn payload(&self) -> &[u8] {
        self.payload.unsecure()
    }

    pub fn is_empty(&self) -> bool {
        SecretStatus::Empty == self.status
    }

    pub fn is_plain(&self) -> bool {
        SecretStatus::Plain == self.status
    }

    pub fn is_encrypted(&self) -> bool {
        match self.status {
            SecretStatus::Aes256Gcm | SecretStatus::Secretbox => true,
            SecretStatus::Empty | SecretStatus::Plain => false,
        }
    }
}

impl Default for Secret {
    fn default() -> Self {
        Secret::empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Secret")
            .field("status", &self.status)
            .field("payload", &self.payload)
            .field("additional_data", &self.additional_data)
            .finish()
    }
}

fn empty_payload() -> SecStr {
    SecStr::new(Vec::new())
}

mod payload {
    use secstr::SecStr;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        payload: &SecStr,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::Error;
        let s = std::str::from_utf8(payload.unsecure()).map_err(|_| {
            S::Error::custom("secret payload is not valid UTF-8")
        })?;
        ser.serialize_str(s)
    }

    pub fn deserialize<'a, D: Deserializer<'a>>(
        de: D,
    ) -> Result<SecStr, D::Error> {
        String::deserialize(de).map(|s| SecStr::new(s.into_bytes()))
    }
}
