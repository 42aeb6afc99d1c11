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

//! The current account model.
//!
//! These are the shapes the rest of the system works with. Legacy records
//! are converted into them by the `compat` module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::secret::Secret;

/// Permission granting every operation.
pub const PERM_ANY: &str = "*";

/// A user account.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct User {
    pub id: i64,
    /// 1 if the account is enabled, 0 if disabled.
    pub status: i32,
    pub username: String,
    /// Expiration as milliseconds since the UNIX epoch, 0 for none.
    pub expiration_date: i64,
    /// The password hash, or cleartext for accounts never logged into.
    pub password: String,
    pub public_keys: Vec<String>,
    pub home_dir: String,
    pub virtual_folders: Vec<VirtualFolder>,
    pub uid: i32,
    pub gid: i32,
    pub max_sessions: i32,
    pub quota_size: i64,
    pub quota_files: i32,
    /// Permissions per virtual directory. `/` holds the defaults.
    pub permissions: BTreeMap<String, Vec<String>>,
    pub used_quota_size: i64,
    pub used_quota_files: i32,
    pub last_quota_update: i64,
    /// Upload bandwidth cap in KB/s, 0 for unlimited.
    pub upload_bandwidth: i64,
    /// Download bandwidth cap in KB/s, 0 for unlimited.
    pub download_bandwidth: i64,
    pub last_login: i64,
    pub filters: UserFilters,
    #[serde(rename = "filesystem")]
    pub fs_config: Filesystem,
}

/// Additional restrictions on a user.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UserFilters {
    /// Networks, in CIDR notation, allowed to log in. Empty allows all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_ip: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub denied_ip: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub denied_login_methods: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub denied_protocols: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_patterns: Vec<PatternsFilter>,
    /// Maximum size of a single upload in bytes, 0 for unlimited.
    #[serde(skip_serializing_if = "is_zero")]
    pub max_upload_file_size: i64,
}

/// Shell-style file name patterns allowed or denied under a path.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PatternsFilter {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub denied_patterns: Vec<String>,
}

/// A folder shared between users.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BaseVirtualFolder {
    pub id: i64,
    pub mapped_path: String,
    pub used_quota_size: i64,
    pub used_quota_files: i32,
    pub last_quota_update: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
}

/// A `BaseVirtualFolder` as mounted into one user's tree.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct VirtualFolder {
    #[serde(flatten)]
    pub base: BaseVirtualFolder,
    pub virtual_path: String,
    /// -1 to use the user's quota, 0 for unlimited.
    pub quota_size: i64,
    pub quota_files: i32,
}

/// Where a user's files are stored.
///
/// Only the configuration of the selected provider exists.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "provider", content = "config", rename_all = "lowercase")]
pub enum Filesystem {
    /// The local file system, rooted at the user's home directory.
    Local,
    S3(S3FsConfig),
    Gcs(GcsFsConfig),
    AzBlob(AzBlobFsConfig),
}

impl Default for Filesystem {
    fn default() -> Self {
        Filesystem::Local
    }
}

impl Filesystem {
    pub fn provider_name(&self) -> &'static str {
        match *self {
            Filesystem::Local => "local",
            Filesystem::S3(..) => "s3",
            Filesystem::Gcs(..) => "gcs",
            Filesystem::AzBlob(..) => "azblob",
        }
    }
}

/// Configuration for S3 and S3-compatible object storage.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct S3FsConfig {
    pub bucket: String,
    /// Restricts the user to objects under this prefix. Must end with `/`
    /// if set.
    pub key_prefix: String,
    pub region: String,
    pub access_key: String,
    pub access_secret: Secret,
    pub endpoint: String,
    pub storage_class: String,
    /// Multipart upload part size in MB, 0 for the default.
    pub upload_part_size: i64,
    /// Parts uploaded in parallel, 0 for the default.
    pub upload_concurrency: i32,
}

/// Configuration for Google Cloud Storage.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct GcsFsConfig {
    pub bucket: String,
    pub key_prefix: String,
    pub credential_file: String,
    pub credentials: Secret,
    /// Nonzero to use the credentials of the environment instead of
    /// `credentials`.
    pub automatic_credentials: i32,
    pub storage_class: String,
}

/// Configuration for Azure Blob Storage.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AzBlobFsConfig {
    pub container: String,
    pub account_name: String,
    pub account_key: Secret,
    pub endpoint: String,
    /// Shared access signature URL, used instead of the account key.
    pub sas_url: String,
    pub key_prefix: String,
    /// Block size in MB, 0 for the default.
    pub upload_part_size: i64,
    pub upload_concurrency: i32,
    pub use_emulator: bool,
    pub access_tier: String,
}

fn is_zero(v: &i64) -> bool {
    0 == *v
}
