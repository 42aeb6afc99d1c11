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

//! Serde adapter for byte strings stored as standard base64 text.
//!
//! Use with `#[serde(with = "crate::support::b64")]`. A JSON `null` is read
//! as an empty byte string, since older writers emitted `null` for unset
//! byte arrays.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(
    bytes: &Vec<u8>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&base64::encode(bytes))
}

pub fn deserialize<'a, D: Deserializer<'a>>(de: D) -> Result<Vec<u8>, D::Error> {
    use serde::de::Error;
    match Option::<String>::deserialize(de)? {
        None => Ok(Vec::new()),
        Some(s) => {
            base64::decode(&s).map_err(|err| Error::custom(err.to_string()))
        }
    }
}
