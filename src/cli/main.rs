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

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use structopt::StructOpt;

use super::convert::convert_backup;
use crate::compat::{Converter, FormatVersion, LegacyBackup};
use crate::support::sysexits::*;
use crate::support::system_config::CompatConfig;

#[derive(StructOpt)]
#[structopt(max_term_width = 80)]
enum Command {
    Convert(ConvertSubcommand),
}

/// Convert a backup written by an older release into the current format.
///
/// The format version of the input must be given explicitly; it is never
/// guessed from the content.
///
/// Google Cloud Storage users which neither embed their credentials nor use
/// automatic credentials have them read from
/// `<credentials_dir>/<user>_gcs_credentials.json`, where `credentials_dir`
/// comes from the configuration file.
///
/// The converted backup is written as JSON. Secrets are written in the
/// clear, so the output must be protected like the input.
#[derive(StructOpt)]
struct ConvertSubcommand {
    /// The format version of the input: 2 or 4.
    #[structopt(long)]
    format_version: FormatVersion,

    /// The configuration file [default: built-in defaults]
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// A log4rs configuration file. Without it, log to standard error.
    #[structopt(long, parse(from_os_str))]
    log_config: Option<PathBuf>,

    /// Leave out users that cannot be converted instead of failing.
    #[structopt(long)]
    keep_going: bool,

    /// Write the converted backup here instead of standard output.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// The backup to convert. "-" reads from stdin.
    #[structopt(parse(from_os_str), default_value = "-")]
    input: PathBuf,
}

pub fn main() {
    // Clap exits with status 1 instead of EX_USAGE if we use the more concise
    // API
    let cmd = Command::from_clap(&match Command::clap().get_matches_safe() {
        Ok(matches) => matches,
        Err(
            e @ clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            },
        )
        | Err(
            e @ clap::Error {
                kind: clap::ErrorKind::VersionDisplayed,
                ..
            },
        ) => {
            println!("{}", e.message);
            return;
        }
        Err(e) => {
            eprintln!("{}", e.message);
            EX_USAGE.exit()
        }
    });

    match cmd {
        Command::Convert(cmd) => convert(cmd),
    }
}

fn convert(cmd: ConvertSubcommand) {
    init_log(cmd.log_config.as_deref());

    let config = match cmd.config {
        None => CompatConfig::default(),
        Some(ref path) => match CompatConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error in config file at '{}': {}", path.display(), e);
                EX_CONFIG.exit()
            }
        },
    };

    let data = match read_input(&cmd.input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading '{}': {}", cmd.input.display(), e);
            EX_NOINPUT.exit()
        }
    };

    let backup = match LegacyBackup::from_json(cmd.format_version, &data) {
        Ok(backup) => backup,
        Err(e) => {
            eprintln!(
                "'{}' is not a {} backup: {}",
                cmd.input.display(),
                cmd.format_version,
                e
            );
            EX_DATAERR.exit()
        }
    };

    let converter = Converter::new(config);
    let converted = match convert_backup(&converter, backup, cmd.keep_going) {
        Ok(converted) => converted,
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            EX_DATAERR.exit()
        }
    };

    let mut json = match serde_json::to_vec_pretty(&converted) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Unable to serialise converted backup: {}", e);
            EX_SOFTWARE.exit()
        }
    };
    json.push(b'\n');

    let written = match cmd.output {
        None => io::stdout().write_all(&json),
        Some(ref path) => fs::write(path, &json),
    };
    if let Err(e) = written {
        eprintln!("Error writing converted backup: {}", e);
        EX_CANTCREAT.exit()
    }
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if Path::new("-") == path {
        io::stdin().read_to_end(&mut data)?;
    } else {
        fs::File::open(path)?.read_to_end(&mut data)?;
    }

    Ok(data)
}

fn init_log(log_config: Option<&Path>) {
    match log_config {
        None => crate::init_simple_log(),
        Some(path) => {
            if let Err(e) = log4rs::init_file(
                path,
                log4rs::file::Deserializers::new(),
            ) {
                eprintln!(
                    "Failed to initialise logging from '{}': {}",
                    path.display(),
                    e
                );
                EX_CONFIG.exit()
            }
        }
    }
}
