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

use log::{info, warn};
use serde::Serialize;

use crate::account::model::{BaseVirtualFolder, User};
use crate::compat::{Converter, LegacyBackup};
use crate::support::error::Error;
use crate::support::log_prefix::LogPrefix;

/// A backup in the current format.
#[derive(Serialize, Debug, Default)]
pub struct ConvertedBackup {
    pub users: Vec<User>,
    pub folders: Vec<BaseVirtualFolder>,
}

/// Convert every user in `backup`.
///
/// If `keep_going` is false, the first user that fails to convert aborts the
/// whole backup. Otherwise, failing users are logged and left out.
pub fn convert_backup(
    converter: &Converter,
    backup: LegacyBackup,
    keep_going: bool,
) -> Result<ConvertedBackup, Error> {
    let folders = match backup {
        LegacyBackup::V2(..) => Vec::new(),
        LegacyBackup::V4(ref b) => b.folders.clone(),
    };

    let mut users = Vec::new();
    let mut skipped = 0;
    for legacy in backup.into_users() {
        match converter.convert_user(&legacy) {
            Ok(user) => users.push(user),
            Err(e) if keep_going => {
                warn!(
                    "{} Skipping user: {}",
                    LogPrefix::new(legacy.version().name())
                        .with_user(legacy.username()),
                    e
                );
                skipped += 1;
            },
            Err(e) => return Err(e),
        }
    }

    info!(
        "Converted {} users and {} folders; skipped {} users",
        users.len(),
        folders.len(),
        skipped
    );
    Ok(ConvertedBackup { users, folders })
}
