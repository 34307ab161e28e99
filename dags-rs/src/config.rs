//! `.dagsrc` configuration file parser.
//!
//! Recognises a small line-oriented command set:
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <option>=<value>` or `/set <option> <value>` | set an engine option |
//! | `/define <key> <value>` | seed a base-layer dictionary entry |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Options: `overlay`, `undo`, `max_depth`, `max_jumps`, `seed`.  Boolean
//! options take the same vocabulary as script booleans (`on`, `yes`, `1`, …).

use std::path::Path;

use tracing::debug;

use crate::script::interp::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_JUMPS};
use crate::script::value::to_bool;
use crate::script::Interpreter;
use crate::store::{normalize_key, StoreError};

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Engine options and seed data.
#[derive(Debug, Clone)]
pub struct Config {
    /// Route writes to the overlay layer.
    pub use_overlay: bool,
    /// Record undo snapshots.
    pub allow_undo: bool,
    pub max_depth: usize,
    pub max_jumps: usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Base-layer entries in file order.
    pub defines: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_overlay: false,
            allow_undo: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_jumps: DEFAULT_MAX_JUMPS,
            seed: None,
            defines: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config text.
    ///
    /// Unknown directives are skipped so one file can carry commands for
    /// other tools.  Returns the config and any errors on recognised lines.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));
            let tokens = split_args(args_str.trim());

            let result = match cmd {
                "set" => config.parse_set(&tokens),
                "define" => config.parse_define(&tokens),
                _ => Ok(()),
            };
            if let Err(message) = result {
                errors.push(ConfigError { line: lineno, message });
            }
        }

        (config, errors)
    }

    /// Read and parse a config file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading config");
        Ok(Self::load_str(&s))
    }

    /// Add a base-layer entry, as `/define` does.
    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.defines.push((key.into(), value.into()));
    }

    /// Apply options to `interp` and load the defines into its base layer.
    pub fn apply(&self, interp: &mut Interpreter) -> Result<(), StoreError> {
        interp.set_limits(self.max_depth, self.max_jumps);
        if let Some(seed) = self.seed {
            interp.seed(seed);
        }

        let data = interp.data_mut();
        // defines always land in the base layer
        data.set_use_overlay(false);
        for (key, value) in &self.defines {
            data.set(key, value)?;
        }
        data.set_use_overlay(self.use_overlay);
        data.set_allow_undo(self.allow_undo);
        debug!(defines = self.defines.len(), overlay = self.use_overlay, "config applied");
        Ok(())
    }

    // ── /set ──────────────────────────────────────────────────────────────────

    /// Parse `/set <option>=<value>` or `/set <option> <value>`.
    fn parse_set(&mut self, tokens: &[String]) -> Result<(), String> {
        if tokens.is_empty() {
            return Err("/set: requires an argument".into());
        }

        let (name, value) = if let Some((name, value)) = tokens[0].split_once('=') {
            (name.to_owned(), value.to_owned())
        } else if tokens.len() >= 2 {
            (tokens[0].clone(), tokens[1..].join(" "))
        } else {
            return Err(format!("/set: missing value for '{}'", tokens[0]));
        };

        let flag = |v: &str| to_bool(v).map_err(|e| format!("/set {name}: {e}"));
        let count = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| format!("/set {name}: not a count: {v}"))
        };

        match name.to_ascii_lowercase().as_str() {
            "overlay" => self.use_overlay = flag(&value)?,
            "undo" => self.allow_undo = flag(&value)?,
            "max_depth" => self.max_depth = count(&value)?,
            "max_jumps" => self.max_jumps = count(&value)?,
            "seed" => {
                let seed = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| format!("/set seed: not a number: {value}"))?;
                self.seed = Some(seed);
            }
            "" => return Err("/set: option name cannot be empty".into()),
            other => return Err(format!("/set: unknown option '{other}'")),
        }
        Ok(())
    }

    // ── /define ───────────────────────────────────────────────────────────────

    /// Parse `/define <key> <value>`.  A missing value defines an empty entry.
    fn parse_define(&mut self, tokens: &[String]) -> Result<(), String> {
        let Some(key) = tokens.first() else {
            return Err("/define: requires a key".into());
        };
        normalize_key(key).map_err(|e| format!("/define: {e}"))?;
        self.define(key.clone(), tokens[1..].join(" "));
        Ok(())
    }
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if !in_quotes => {
                in_quotes = true;
                quoted = true;
            }
            '"' if in_quotes => in_quotes = false,
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() || quoted {
                    args.push(std::mem::take(&mut cur));
                }
                quoted = false;
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() || quoted {
        args.push(cur);
    }
    args
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // -- split_args -----------------------------------------------------------

    #[test]
    fn split_simple() {
        assert_eq!(split_args("foo bar baz"), ["foo", "bar", "baz"]);
    }

    #[test]
    fn split_quoted_script() {
        assert_eq!(
            split_args(r#"@greet(x) "@write(\"hi \",$x)""#),
            ["@greet(x)", r#"@write("hi ",$x)"#]
        );
    }

    #[test]
    fn split_empty_quotes() {
        assert_eq!(split_args(r#"key """#), ["key", ""]);
    }

    // -- /set -----------------------------------------------------------------

    #[test]
    fn set_options() {
        let (cfg, errs) = Config::load_str(
            "/set overlay=on\n/set undo yes\n/set max_depth=50\n/set max_jumps 10\n/set seed=42",
        );
        assert!(errs.is_empty(), "{errs:?}");
        assert!(cfg.use_overlay);
        assert!(cfg.allow_undo);
        assert_eq!(cfg.max_depth, 50);
        assert_eq!(cfg.max_jumps, 10);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn set_defaults() {
        let cfg = Config::new();
        assert!(!cfg.use_overlay);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn set_errors_are_collected() {
        let (cfg, errs) = Config::load_str("/set overlay=maybe\n/set bogus=1\n/set max_depth=-3\n/set");
        assert_eq!(errs.len(), 4);
        assert_eq!(errs[0].line, 1);
        assert!(errs[1].to_string().starts_with("line 2: /set: unknown option"));
        assert!(!cfg.use_overlay);
    }

    // -- /define --------------------------------------------------------------

    #[test]
    fn define_entries() {
        let (cfg, errs) = Config::load_str(
            "/define greeting hello world\n/define \"@boo\" \"@write(eek!)\"\n/define empty",
        );
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            cfg.defines,
            vec![
                ("greeting".to_owned(), "hello world".to_owned()),
                ("@boo".to_owned(), "@write(eek!)".to_owned()),
                ("empty".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn define_rejects_bad_key() {
        let (_, errs) = Config::load_str("/define \"two words\" x\n/define");
        assert_eq!(errs.len(), 2);
    }

    // -- Comments & skipping --------------------------------------------------

    #[test]
    fn comments_and_unknown_commands_skipped() {
        let (cfg, errs) = Config::load_str(
            ";; comment\n\n; another\n/bind ^X = /quit\nnot a command\n/define loaded yes",
        );
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(cfg.defines.len(), 1);
    }

    // -- apply ----------------------------------------------------------------

    #[test]
    fn apply_seeds_base_layer() {
        let (cfg, _) = Config::load_str("/set overlay=on\n/set undo=on\n/define a 1");
        let mut interp = Interpreter::new();
        cfg.apply(&mut interp).unwrap();
        let data = interp.data();
        assert!(data.use_overlay());
        assert!(data.allow_undo());
        assert_eq!(data.keys(crate::store::Which::Base), vec!["a".to_owned()]);
        assert!(data.keys(crate::store::Which::Overlay).is_empty());
    }

    #[test]
    fn apply_limits_and_seed() {
        let (cfg, _) = Config::load_str("/set max_depth=7\n/set max_jumps=9\n/set seed=1");
        let mut a = Interpreter::new();
        let mut b = Interpreter::new();
        cfg.apply(&mut a).unwrap();
        cfg.apply(&mut b).unwrap();
        assert_eq!(a.limits(), (7, 9));
        let (mut x, mut y) = (String::new(), String::new());
        a.run_script("@rnd(1000) @rnd(1000)", &mut x);
        b.run_script("@rnd(1000) @rnd(1000)", &mut y);
        assert_eq!(x, y);
    }
}
