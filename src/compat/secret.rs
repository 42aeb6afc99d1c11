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

//! Resolution of legacy secrets into the current `Secret` representation.
//!
//! A legacy secret field was stored in one of three ways: as the plaintext
//! itself, as the path of a file holding the plaintext, or as a string in an
//! older encoded form. Older writers sometimes populated more than one of
//! these, so the first populated one, in that order, wins. A field with
//! nothing populated resolves to an empty secret; this is not an error.
//!
//! Secret payloads are carried as strings in the current model, so plaintext
//! or file content that is not UTF-8 fails resolution of that one secret.

use std::fs;
use std::io;
use std::path::Path;

use crate::account::secret::Secret;
use crate::crypt::legacy_secret::AesCompatDecoder;
use crate::support::error::{DecodeError, Error};

/// Reads credential files.
pub trait CredentialReader: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads credential files from the file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsCredentialReader;

impl CredentialReader for FsCredentialReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Decodes secrets stored in a legacy encoded string form.
pub trait SecretDecoder: Send + Sync {
    fn decode(&self, encoded: &str) -> Result<Secret, DecodeError>;
}

/// The raw state of one legacy secret field.
///
/// Empty values count as not populated.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacySecret<'a> {
    pub plaintext: &'a [u8],
    pub credential_file: Option<&'a Path>,
    pub encoded: &'a str,
}

impl<'a> LegacySecret<'a> {
    pub fn plaintext(plaintext: &'a [u8]) -> Self {
        LegacySecret {
            plaintext,
            ..LegacySecret::default()
        }
    }

    pub fn encoded(encoded: &'a str) -> Self {
        LegacySecret {
            encoded,
            ..LegacySecret::default()
        }
    }
}

/// Resolves `LegacySecret`s, reading files and decoding through the
/// collaborators it was built with.
pub struct SecretMigrator {
    reader: Box<dyn CredentialReader>,
    decoder: Box<dyn SecretDecoder>,
}

impl Default for SecretMigrator {
    fn default() -> Self {
        SecretMigrator::new(
            Box::new(FsCredentialReader),
            Box::new(AesCompatDecoder),
        )
    }
}

impl SecretMigrator {
    pub fn new(
        reader: Box<dyn CredentialReader>,
        decoder: Box<dyn SecretDecoder>,
    ) -> Self {
        SecretMigrator { reader, decoder }
    }

    /// Resolve `secret`, which is the field `field` of the user `username`.
    ///
    /// `username` and `field` only serve to identify the secret in errors.
    pub fn resolve(
        &self,
        secret: &LegacySecret<'_>,
        username: &str,
        field: &'static str,
    ) -> Result<Secret, Error> {
        let decode_error = |source: DecodeError| Error::SecretDecode {
            username: username.to_owned(),
            field,
            source,
        };

        if !secret.plaintext.is_empty() {
            return utf8_secret(secret.plaintext.to_vec()).map_err(decode_error);
        }

        if let Some(path) = secret
            .credential_file
            .filter(|p| !p.as_os_str().is_empty())
        {
            let data = self.reader.read(path).map_err(|source| {
                Error::SecretResolution {
                    path: path.to_owned(),
                    source,
                }
            })?;
            return utf8_secret(data).map_err(decode_error);
        }

        if !secret.encoded.is_empty() {
            return self.decoder.decode(secret.encoded).map_err(decode_error);
        }

        Ok(Secret::empty())
    }
}

fn utf8_secret(data: Vec<u8>) -> Result<Secret, DecodeError> {
    String::from_utf8(data)
        .map(Secret::plain)
        .map_err(|_| DecodeError::NotUtf8)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use proptest::prelude::*;

    use super::*;
    use crate::test_data::{FakeDecoder, MemReader};

    fn migrator(reader: MemReader) -> SecretMigrator {
        SecretMigrator::new(Box::new(reader), Box::new(FakeDecoder))
    }

    #[test]
    fn nothing_populated_is_empty() {
        let secret = migrator(MemReader::default())
            .resolve(&LegacySecret::default(), "alice", "field")
            .unwrap();
        assert!(secret.is_empty());
        assert!(secret.payload().is_empty());

        let secret = migrator(MemReader::default())
            .resolve(
                &LegacySecret {
                    credential_file: Some(Path::new("")),
                    ..LegacySecret::default()
                },
                "alice",
                "field",
            )
            .unwrap();
        assert!(secret.is_empty());
    }

    #[test]
    fn reads_credential_file() {
        let reader = MemReader::default().with_file("/creds/a.json", b"{}");
        let secret = migrator(reader)
            .resolve(
                &LegacySecret {
                    credential_file: Some(Path::new("/creds/a.json")),
                    ..LegacySecret::default()
                },
                "alice",
                "field",
            )
            .unwrap();
        assert!(secret.is_plain());
        assert_eq!(b"{}", secret.payload());
    }

    #[test]
    fn unreadable_credential_file_names_path() {
        let result = migrator(MemReader::default()).resolve(
            &LegacySecret {
                credential_file: Some(Path::new("/creds/nx.json")),
                ..LegacySecret::default()
            },
            "alice",
            "field",
        );
        match result {
            Err(Error::SecretResolution { path, source }) => {
                assert_eq!(PathBuf::from("/creds/nx.json"), path);
                assert_eq!(io::ErrorKind::NotFound, source.kind());
            },
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn real_file_system() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("alice_gcs_credentials.json");
        fs::write(&path, b"{\"type\":\"service_account\"}").unwrap();

        let secret = SecretMigrator::default()
            .resolve(
                &LegacySecret {
                    credential_file: Some(path.as_path()),
                    ..LegacySecret::default()
                },
                "alice",
                "gcsconfig.credentials",
            )
            .unwrap();
        assert_eq!(b"{\"type\":\"service_account\"}", secret.payload());

        let missing = root.path().join("nx");
        let err = SecretMigrator::default()
            .resolve(
                &LegacySecret {
                    credential_file: Some(missing.as_path()),
                    ..LegacySecret::default()
                },
                "alice",
                "gcsconfig.credentials",
            )
            .unwrap_err();
        assert!(err.to_string().contains("nx"), "bad message: {}", err);
    }

    #[test]
    fn decodes_encoded_string() {
        let secret = migrator(MemReader::default())
            .resolve(&LegacySecret::encoded("enc:hunter2"), "alice", "field")
            .unwrap();
        assert!(secret.is_plain());
        assert_eq!(b"hunter2", secret.payload());
    }

    #[test]
    fn decode_error_names_user_and_field() {
        let result = migrator(MemReader::default()).resolve(
            &LegacySecret::encoded("garbage"),
            "alice",
            "s3config.access_secret",
        );
        match result {
            Err(Error::SecretDecode {
                username,
                field,
                source: DecodeError::BadFormat,
            }) => {
                assert_eq!("alice", username);
                assert_eq!("s3config.access_secret", field);
            },
            r => panic!("Unexpected result: {:?}", r),
        }
    }

    #[test]
    fn priority_order() {
        let reader = MemReader::default().with_file("/f", b"from-file");
        let migrator = migrator(reader);

        let all = LegacySecret {
            plaintext: b"inline",
            credential_file: Some(Path::new("/f")),
            encoded: "enc:decoded",
        };
        assert_eq!(
            b"inline",
            migrator.resolve(&all, "u", "f").unwrap().payload()
        );

        let file_and_encoded = LegacySecret {
            plaintext: b"",
            ..all
        };
        assert_eq!(
            b"from-file",
            migrator
                .resolve(&file_and_encoded, "u", "f")
                .unwrap()
                .payload()
        );

        // A missing file is not masked by a valid encoded string
        let missing_file = LegacySecret {
            credential_file: Some(Path::new("/nx")),
            ..file_and_encoded
        };
        assert_matches!(
            Err(Error::SecretResolution { .. }),
            migrator.resolve(&missing_file, "u", "f")
        );
    }

    #[test]
    fn non_utf8_is_rejected() {
        let reader = MemReader::default().with_file("/bin.json", b"{\xFF}");
        let migrator = migrator(reader);

        assert_matches!(
            Err(Error::SecretDecode {
                source: DecodeError::NotUtf8,
                ..
            }),
            migrator.resolve(
                &LegacySecret::plaintext(b"\xFF"),
                "carol",
                "gcsconfig.credentials"
            )
        );
        assert_matches!(
            Err(Error::SecretDecode {
                source: DecodeError::NotUtf8,
                ..
            }),
            migrator.resolve(
                &LegacySecret {
                    credential_file: Some(Path::new("/bin.json")),
                    ..LegacySecret::default()
                },
                "carol",
                "gcsconfig.credentials"
            )
        );
    }

    proptest! {
        #[test]
        fn plaintext_is_kept_exactly(
            plaintext in ".+",
            encoded in ".*",
        ) {
            let secret = migrator(MemReader::default())
                .resolve(
                    &LegacySecret {
                        plaintext: plaintext.as_bytes(),
                        credential_file: Some(Path::new("/nx")),
                        encoded: &encoded,
                    },
                    "alice",
                    "field",
                )
                .unwrap();
            prop_assert!(secret.is_plain());
            prop_assert_eq!(plaintext.as_bytes(), secret.payload());
        }
    }
}
