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

//! The V2 record format.
//!
//! V2 users are flat: they have no filesystem configuration (everything was
//! on the local file system), no virtual folders, no filters, and a single
//! list of permissions applying to the whole home directory.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{nullable, Converter};
use crate::account::model::{Filesystem, User, UserFilters};
use crate::support::log_prefix::LogPrefix;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompatUserV2 {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub public_keys: Vec<String>,
    pub home_dir: String,
    pub uid: i32,
    pub gid: i32,
    pub max_sessions: i32,
    pub quota_size: i64,
    pub quota_files: i32,
    #[serde(deserialize_with = "nullable")]
    pub permissions: Vec<String>,
    pub used_quota_size: i64,
    pub used_quota_files: i32,
    pub last_quota_update: i64,
    pub upload_bandwidth: i64,
    pub download_bandwidth: i64,
    pub expiration_date: i64,
    pub last_login: i64,
    pub status: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BackupV2 {
    #[serde(deserialize_with = "nullable")]
    pub users: Vec<CompatUserV2>,
}

impl Converter {
    /// Convert a V2 user.
    ///
    /// This cannot fail since V2 records carry no secrets besides the
    /// password, which is kept as-is.
    pub fn convert_user_v2(&self, user: &CompatUserV2) -> User {
        let mut permissions = BTreeMap::new();
        permissions.insert("/".to_owned(), user.permissions.clone());

        debug!(
            "{} Converted user with {} permissions",
            LogPrefix::new("v2").with_user(&user.username),
            user.permissions.len(),
        );

        User {
            id: user.id,
            status: user.status,
            username: user.username.clone(),
            expiration_date: user.expiration_date,
            password: user.password.clone(),
            public_keys: user.public_keys.clone(),
            home_dir: user.home_dir.clone(),
            virtual_folders: Vec::new(),
            uid: user.uid,
            gid: user.gid,
            max_sessions: user.max_sessions,
            quota_size: user.quota_size,
            quota_files: user.quota_files,
            permissions,
            used_quota_size: user.used_quota_size,
            used_quota_files: user.used_quota_files,
            last_quota_update: user.last_quota_update,
            upload_bandwidth: user.upload_bandwidth,
            download_bandwidth: user.download_bandwidth,
            last_login: user.last_login,
            filters: UserFilters::default(),
            fs_config: Filesystem::Local,
        }
    }
}
