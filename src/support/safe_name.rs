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

/// Determine whether the given user name can be embedded in a file name.
///
/// This excludes empty names and anything that could escape the directory
/// the file is placed in. The name is only ever used as the prefix of a
/// longer file name, so leading dots are harmless. It does not check whether
/// the name is ultimately a valid file name; the OS rejects those.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty() &&
        name.find('/').is_none() &&
        // Only a path separator on Windows, but block it everywhere
        name.find('\\').is_none() &&
        name.find(|c| c < ' ' || c == '\x7F').is_none()
}
