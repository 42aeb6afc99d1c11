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

//! The V4 record format.
//!
//! V4 users carry a filesystem configuration holding a provider
//! discriminator and one block per object storage provider. Only the block
//! selected by the discriminator means anything; the others are whatever the
//! old admin UI happened to leave behind and are never looked at.
//!
//! Secrets were stored in the `$aes$` encoded form, except for Google Cloud
//! Storage credentials, which were either inline or kept in a file named
//! after the user in the credentials directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::secret::LegacySecret;
use super::{nullable, Converter};
use crate::account::model::*;
use crate::support::b64;
use crate::support::error::Error;
use crate::support::log_prefix::LogPrefix;
use crate::support::safe_name::is_safe_name;

pub const PROVIDER_LOCAL: i32 = 0;
pub const PROVIDER_S3: i32 = 1;
pub const PROVIDER_GCS: i32 = 2;
pub const PROVIDER_AZBLOB: i32 = 3;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompatS3FsConfigV4 {
    pub bucket: String,
    pub key_prefix: String,
    pub region: String,
    pub access_key: String,
    /// `$aes$`-encoded.
    pub access_secret: String,
    pub endpoint: String,
    pub storage_class: String,
    pub upload_part_size: i64,
    pub upload_concurrency: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompatGcsFsConfigV4 {
    pub bucket: String,
    pub key_prefix: String,
    /// Never serialised. Filled in by the converter from the user name when
    /// credentials are neither inline nor automatic.
    #[serde(skip)]
    pub credential_file: String,
    #[serde(with = "b64", skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<u8>,
    pub automatic_credentials: i32,
    pub storage_class: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompatAzBlobFsConfigV4 {
    pub container: String,
    pub account_name: String,
    /// `$aes$`-encoded.
    pub account_key: String,
    pub endpoint: String,
    pub sas_url: String,
    pub key_prefix: String,
    pub upload_part_size: i64,
    pub upload_concurrency: i32,
    pub use_emulator: bool,
    pub access_tier: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompatFilesystemV4 {
    /// Kept raw so that unknown providers are reported by the converter
    /// rather than failing the whole backup at parse time.
    pub provider: i32,
    #[serde(deserialize_with = "nullable")]
    pub s3config: CompatS3FsConfigV4,
    #[serde(deserialize_with = "nullable")]
    pub gcsconfig: CompatGcsFsConfigV4,
    #[serde(deserialize_with = "nullable")]
    pub azblobconfig: CompatAzBlobFsConfigV4,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompatUserV4 {
    pub id: i64,
    pub status: i32,
    pub username: String,
    pub expiration_date: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub public_keys: Vec<String>,
    pub home_dir: String,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub virtual_folders: Vec<VirtualFolder>,
    pub uid: i32,
    pub gid: i32,
    pub max_sessions: i32,
    pub quota_size: i64,
    pub quota_files: i32,
    #[serde(deserialize_with = "nullable")]
    pub permissions: BTreeMap<String, Vec<String>>,
    pub used_quota_size: i64,
    pub used_quota_files: i32,
    pub last_quota_update: i64,
    pub upload_bandwidth: i64,
    pub download_bandwidth: i64,
    pub last_login: i64,
    #[serde(deserialize_with = "nullable")]
    pub filters: UserFilters,
    #[serde(rename = "filesystem", deserialize_with = "nullable")]
    pub fs_config: CompatFilesystemV4,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BackupV4 {
    #[serde(deserialize_with = "nullable")]
    pub users: Vec<CompatUserV4>,
    #[serde(deserialize_with = "nullable")]
    pub folders: Vec<BaseVirtualFolder>,
}

/// Return the conventional location of the GCS credentials of `username`.
pub fn gcs_credential_path(
    credentials_dir: &Path,
    username: &str,
) -> Result<PathBuf, Error> {
    if !is_safe_name(username) {
        return Err(Error::UnsafeName(username.to_owned()));
    }

    Ok(credentials_dir.join(format!("{}_gcs_credentials.json", username)))
}

impl Converter {
    /// Convert a V4 user.
    ///
    /// Fails if any secret of the selected filesystem provider cannot be
    /// resolved.
    pub fn convert_user_v4(&self, user: &CompatUserV4) -> Result<User, Error> {
        let fs_config =
            self.convert_fs_config_v4(&user.fs_config, &user.username)?;

        debug!(
            "{} Converted user on '{}' file system",
            LogPrefix::new("v4").with_user(&user.username),
            fs_config.provider_name(),
        );

        Ok(User {
            id: user.id,
            status: user.status,
            username: user.username.clone(),
            expiration_date: user.expiration_date,
            password: user.password.clone(),
            public_keys: user.public_keys.clone(),
            home_dir: user.home_dir.clone(),
            virtual_folders: user.virtual_folders.clone(),
            uid: user.uid,
            gid: user.gid,
            max_sessions: user.max_sessions,
            quota_size: user.quota_size,
            quota_files: user.quota_files,
            permissions: user.permissions.clone(),
            used_quota_size: user.used_quota_size,
            used_quota_files: user.used_quota_files,
            last_quota_update: user.last_quota_update,
            upload_bandwidth: user.upload_bandwidth,
            download_bandwidth: user.download_bandwidth,
            last_login: user.last_login,
            filters: user.filters.clone(),
            fs_config,
        })
    }

    /// Convert the filesystem configuration of the V4 user `username`.
    ///
    /// Only the block selected by `fs.provider` is read.
    pub fn convert_fs_config_v4(
        &self,
        fs: &CompatFilesystemV4,
        username: &str,
    ) -> Result<Filesystem, Error> {
        let result = match fs.provider {
            PROVIDER_LOCAL => Ok(Filesystem::Local),
            PROVIDER_S3 => {
                self.convert_s3_v4(&fs.s3config, username).map(Filesystem::S3)
            },
            PROVIDER_GCS => self
                .convert_gcs_v4(&fs.gcsconfig, username)
                .map(Filesystem::Gcs),
            PROVIDER_AZBLOB => self
                .convert_azblob_v4(&fs.azblobconfig, username)
                .map(Filesystem::AzBlob),
            provider => Err(Error::UnsupportedProvider(provider)),
        };

        if let Err(ref e) = result {
            error!(
                "{} Unable to convert v4 filesystem: {}",
                LogPrefix::new("v4").with_user(username),
                e
            );
        }

        result
    }

    fn convert_s3_v4(
        &self,
        config: &CompatS3FsConfigV4,
        username: &str,
    ) -> Result<S3FsConfig, Error> {
        let access_secret = self.secrets.resolve(
            &LegacySecret::encoded(&config.access_secret),
            username,
            "s3config.access_secret",
        )?;

        Ok(S3FsConfig {
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
            region: config.region.clone(),
            access_key: config.access_key.clone(),
            access_secret,
            endpoint: config.endpoint.clone(),
            storage_class: config.storage_class.clone(),
            upload_part_size: config.upload_part_size,
            upload_concurrency: config.upload_concurrency,
        })
    }

    fn convert_gcs_v4(
        &self,
        config: &CompatGcsFsConfigV4,
        username: &str,
    ) -> Result<GcsFsConfig, Error> {
        let credential_file =
            if 0 == config.automatic_credentials && config.credentials.is_empty()
            {
                gcs_credential_path(&self.config.credentials_dir, username)?
            } else {
                PathBuf::from(&config.credential_file)
            };

        let credentials = self.secrets.resolve(
            &LegacySecret {
                plaintext: &config.credentials,
                credential_file: Some(credential_file.as_path()),
                encoded: "",
            },
            username,
            "gcsconfig.credentials",
        )?;

        Ok(GcsFsConfig {
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
            credential_file: config.credential_file.clone(),
            credentials,
            automatic_credentials: config.automatic_credentials,
            storage_class: config.storage_class.clone(),
        })
    }

    fn convert_azblob_v4(
        &self,
        config: &CompatAzBlobFsConfigV4,
        username: &str,
    ) -> Result<AzBlobFsConfig, Error> {
        let account_key = self.secrets.resolve(
            &LegacySecret::encoded(&config.account_key),
            username,
            "azblobconfig.account_key",
        )?;

        Ok(AzBlobFsConfig {
            container: config.container.clone(),
            account_name: config.account_name.clone(),
            account_key,
            endpoint: config.endpoint.clone(),
            sas_url: config.sas_url.clone(),
            key_prefix: config.key_prefix.clone(),
            upload_part_size: config.upload_part_size,
            upload_concurrency: config.upload_concurrency,
            use_emulator: config.use_emulator,
            access_tier: config.access_tier.clone(),
        })
    }
}
