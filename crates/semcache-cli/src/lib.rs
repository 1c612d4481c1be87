// semcache-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use semcache_automaton::vocabulary::parse_word_list;
use semcache_automaton::{AutomatonError, KeywordAutomaton, build_automaton};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable naming a vocabulary file.
pub const VOCABULARY_ENV: &str = "SEMCACHE_VOCABULARY";

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SEMCACHE_LOG";

/// Install a stderr `tracing` subscriber filtered by `SEMCACHE_LOG`
/// (default `warn`).
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Pick the vocabulary file to load.
///
/// Search order:
/// 1. `flag` argument (if provided)
/// 2. `env` value (the `SEMCACHE_VOCABULARY` variable)
///
/// `None` means the compiled-in technology list.
pub fn vocabulary_path(flag: Option<&str>, env: Option<String>) -> Option<PathBuf> {
    flag.map(PathBuf::from)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Build the keyword automaton for a CLI run.
pub fn load_automaton(flag: Option<&str>) -> Result<KeywordAutomaton, String> {
    let path = vocabulary_path(flag, std::env::var(VOCABULARY_ENV).ok());
    let Some(path) = path else {
        tracing::debug!("using built-in technology vocabulary");
        return KeywordAutomaton::technology().map_err(describe);
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let words = parse_word_list(&text);
    tracing::debug!(path = %path.display(), keywords = words.len(), "loaded vocabulary");
    build_automaton(&words).map_err(|e| format!("invalid vocabulary {}: {}", path.display(), e))
}

fn describe(e: AutomatonError) -> String {
    format!("invalid vocabulary: {e}")
}

/// Remove `--long=VALUE`, `--long VALUE` or `-s VALUE` from `args`.
///
/// Returns `(value, remaining_args)`; the last occurrence wins.
pub fn take_option(
    args: &[String],
    long: &str,
    short: &str,
) -> Result<(Option<String>, Vec<String>), String> {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || arg == short {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Remove every occurrence of the boolean flag `name` from `args`.
pub fn take_flag(args: &[String], name: &str) -> (bool, Vec<String>) {
    let found = args.iter().any(|a| a == name);
    let remaining = args.iter().filter(|a| *a != name).cloned().collect();
    (found, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
