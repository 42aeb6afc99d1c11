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

//! Fixtures and fake collaborators shared by tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::account::secret::Secret;
use crate::compat::secret::{CredentialReader, SecretDecoder};
use crate::support::error::DecodeError;

/// A V2 backup with one fully populated user and one whose optional fields
/// are `null` or missing.
pub static V2_BACKUP: &[u8] = include_bytes!("v2_backup.json");

/// A V4 backup with one user per filesystem provider.
///
/// - `alice`: S3 with a `$aes$` access secret. Her GCS and Azure blocks hold
///   stale values that must be ignored.
/// - `bob`: GCS relying on the conventional credential file.
/// - `carol`: GCS with inline credentials.
/// - `dave`: Azure Blob with a `$aes$` account key, a virtual folder and
///   filters.
/// - `erin`: local, with `null` collections.
pub static V4_BACKUP: &[u8] = include_bytes!("v4_backup.json");

/// The cleartext of alice's S3 access secret in `V4_BACKUP`.
pub const ALICE_ACCESS_SECRET: &str = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

/// The cleartext of dave's Azure account key in `V4_BACKUP`.
pub const DAVE_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq";

/// An in-memory `CredentialReader` which records every path it is asked
/// for.
#[derive(Clone, Default)]
pub struct MemReader {
    files: HashMap<PathBuf, Vec<u8>>,
    reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemReader {
    pub fn with_file(mut self, path: impl Into<PathBuf>, data: &[u8]) -> Self {
        self.files.insert(path.into(), data.to_owned());
        self
    }

    /// A handle on the paths read so far, which stays valid after the reader
    /// is moved into a `SecretMigrator`.
    pub fn reads(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        Arc::clone(&self.reads)
    }
}

impl CredentialReader for MemReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.lock().unwrap().push(path.to_owned());
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "nx"))
    }
}

/// Decodes `enc:<cleartext>` into a `Plain` secret and rejects anything
/// else.
#[derive(Clone, Copy, Debug, Default)]
pub struct FakeDecoder;

impl SecretDecoder for FakeDecoder {
    fn decode(&self, encoded: &str) -> Result<Secret, DecodeError> {
        if encoded.starts_with("enc:") {
            Ok(Secret::plain(&encoded[4..]))
        } else {
            Err(DecodeError::BadFormat)
        }
    }
}
