use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use dags::cli::{self, CliArgs, ConfigFile};
use dags::config::Config;
use dags::script::keyword::NL_VALUE;
use dags::Interpreter;

const USAGE: &str = "Usage: dags [-f[<file>]] [-c<script>] [-D<key>=<value>]... [-oVqd] [--] [<key>...]";

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("dags: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    init_logging(args.debug);

    match run(args) {
        Ok(code) => code,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dags: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr.  `DAGS_LOG` sets the filter; `-d` forces `debug`.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("DAGS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(spec: &ConfigFile) -> Config {
    let path = match spec {
        ConfigFile::Skip => return Config::new(),
        ConfigFile::Explicit(path) => Some(path.clone()),
        ConfigFile::Search => cli::find_user_config(),
    };
    let Some(path) = path else {
        return Config::new();
    };
    match Config::load_file(&path) {
        Ok((config, errors)) => {
            for e in errors {
                eprintln!("dags: {}: {e}", path.display());
            }
            config
        }
        Err(e) => {
            eprintln!("dags: warning: {}: {e}", path.display());
            Config::new()
        }
    }
}

fn run(args: CliArgs) -> io::Result<ExitCode> {
    let mut config = load_config(&args.config);
    for (key, value) in &args.defines {
        config.define(key.clone(), value.clone());
    }
    if args.overlay {
        config.use_overlay = true;
    }

    let mut interp = Interpreter::new();
    if let Err(e) = config.apply(&mut interp) {
        eprintln!("dags: {e}");
        return Ok(ExitCode::FAILURE);
    }
    debug!(keys = interp.data().count(dags::Which::Both), "dictionary loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.validate {
        let mut report = String::new();
        let ok = interp.validate_dictionary(&mut report);
        out.write_all(report.as_bytes())?;
        if !ok {
            warn!("dictionary failed validation");
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut ran = false;
    if let Some(script) = &args.command {
        run_one(&mut interp, script, args.quiet, &mut out)?;
        ran = true;
    }
    for key in &args.keys {
        // same as @script(key)
        let script = match interp.data().get(key) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("dags: {e}");
                return Ok(ExitCode::FAILURE);
            }
        };
        run_one(&mut interp, &script, args.quiet, &mut out)?;
        ran = true;
    }

    if !ran {
        for line in io::stdin().lock().lines() {
            run_one(&mut interp, &line?, args.quiet, &mut out)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Run one script and print its output followed by anything it queued on
/// the out-channel.
fn run_one(interp: &mut Interpreter, script: &str, quiet: bool, out: &mut impl Write) -> io::Result<()> {
    let mut text = String::new();
    interp.run_script(script, &mut text);
    let text = text.replace(NL_VALUE, "\n");
    out.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(out)?;
    }

    let queued: Vec<String> = interp.out_channel.drain(..).collect();
    if !quiet {
        for value in queued {
            writeln!(out, "OUT: {value}")?;
        }
    }
    out.flush()
}
