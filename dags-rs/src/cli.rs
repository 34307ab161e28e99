//! Command-line argument parsing.
//!
//! Usage:
//!   dags [-f[<file>]] [-c<script>] [-D<key>=<value>]... [-oVqd] [--] [<key>...]

use std::path::PathBuf;

use directories::BaseDirs;

/// Name of the user config file.
pub const CONFIG_NAME: &str = ".dagsrc";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Which config file to load.
    pub config: ConfigFile,
    /// Script to run after loading config (`-c<script>`).
    pub command: Option<String>,
    /// Base-layer entries (`-D<key>=<value>`).
    pub defines: Vec<(String, String)>,
    /// Overlay mode (`-o`).
    pub overlay: bool,
    /// Validate the dictionary and exit (`-V`).
    pub validate: bool,
    /// Don't echo the out-channel (`-q`).
    pub quiet: bool,
    /// Debug logging (`-d`).
    pub debug: bool,
    /// Dictionary keys whose scripts are run in order.
    pub keys: Vec<String>,
}

/// How to choose the user config file.
#[derive(Debug, Default)]
pub enum ConfigFile {
    /// Search `./.dagsrc` then `~/.dagsrc` (default).
    #[default]
    Search,
    /// `-f` with no file argument: skip user config.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            args.keys.extend(argv[i + 1..].iter().cloned());
            break;
        }

        if !arg.starts_with('-') || arg == "-" {
            args.keys.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => args.debug = true,
                'o' => args.overlay = true,
                'q' => args.quiet = true,
                'V' => args.validate = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else if i + 1 < argv.len() && !argv[i + 1].starts_with('-') {
                        i += 1;
                        args.config = ConfigFile::Explicit(PathBuf::from(&argv[i]));
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                // -c<script>, -D<key>=<value>
                c @ ('c' | 'D') => {
                    let value = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err(format!("-{c} requires an argument"));
                    };
                    if c == 'c' {
                        args.command = Some(value);
                    } else {
                        let Some((key, value)) = value.split_once('=') else {
                            return Err(format!("-D expects <key>=<value>, got: {value}"));
                        };
                        args.defines.push((key.to_owned(), value.to_owned()));
                    }
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    Ok(args)
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Search for the user config file: `./.dagsrc`, then `~/.dagsrc`.
/// Returns the first path that exists, or `None`.
pub fn find_user_config() -> Option<PathBuf> {
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_NAME));
    std::iter::once(PathBuf::from(".").join(CONFIG_NAME))
        .chain(home)
        .find(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
