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

use std::fmt;

/// Text included at the start of every log statement about one record.
///
/// Renders as the legacy format name, followed by the user name in brackets
/// once it is known, e.g. `v4[alice]`.
#[derive(Clone, Debug)]
pub struct LogPrefix {
    format: &'static str,
    user: Option<String>,
}

impl LogPrefix {
    pub fn new(format: &'static str) -> Self {
        Self { format, user: None }
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(sanitise(user));
        self
    }
}

impl fmt::Display for LogPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format)?;
        if let Some(ref user) = self.user {
            write!(f, "[{user}]")?;
        }

        Ok(())
    }
}

// User names come straight out of backup files, so they may contain
// anything at all.
fn sanitise(s: &str) -> String {
    let mut s = s.to_owned();
    s.retain(|c| !c.is_control());
    if let Some((truncate_len, _)) = s.char_indices().nth(64) {
        s.truncate(truncate_len);
    }

    s
}
