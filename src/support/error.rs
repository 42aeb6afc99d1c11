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

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Unable to read credential file '{}': {}",
        .path.display(),
        .source
    )]
    SecretResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to decode {field} of user {username:?}: {source}")]
    SecretDecode {
        username: String,
        field: &'static str,
        #[source]
        source: DecodeError,
    },
    #[error("Unsupported filesystem provider {0}")]
    UnsupportedProvider(i32),
    #[error("Unsafe user name {0:?}")]
    UnsafeName(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Errors produced while decoding a secret stored in a legacy encoded form.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Encoded secret is not in the expected format")]
    BadFormat,
    #[error("Decoded secret is not valid UTF-8")]
    NotUtf8,
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Ssl(#[from] openssl::error::ErrorStack),
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
