mod ui;

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use clearn_core::config::SiteConfig;
use clearn_core::persistence::FileStorage;
use clearn_core::persistence::format_timestamp;
use clearn_core::persistence::load_document;
use clearn_core::preferences::StorageBackend;
use clearn_core::preferences::UnavailableStorage;
use clearn_core::reply::classify;
use clearn_core::reply::select_reply;
use clearn_core::site::Site;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::ui::TerminalSurface;
use crate::ui::run_session;

const LOG_ENV: &str = "CLEARN_LOG";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        return run_site(SessionArgs::default());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("clearn {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "run" => run_site(parse_session_args(&args[1..])?),
        "reply" => print_reply(&args[1..]),
        "prefs" => print_preferences(parse_session_args(&args[1..])?),
        flag if flag.starts_with("--") => run_site(parse_session_args(&args)?),
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SessionArgs {
    config: Option<PathBuf>,
    storage: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_session_args(args: &[String]) -> Result<SessionArgs, Box<dyn std::error::Error>> {
    let mut parsed = SessionArgs::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let Some(value) = args.get(i + 1) else {
            return Err(format!("{flag} requires a value").into());
        };
        match flag {
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--storage" => parsed.storage = Some(PathBuf::from(value)),
            "--seed" => {
                let seed = value
                    .parse::<u64>()
                    .map_err(|err| format!("--seed expects an integer: {err}"))?;
                parsed.seed = Some(seed);
            }
            other => {
                return Err(format!("unsupported argument: {other}").into());
            }
        }
        i += 2;
    }
    Ok(parsed)
}

fn run_site(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if args.storage.is_some() {
        config.storage.path = args.storage;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    init_tracing(&config.log_level);

    let backend = open_storage(&storage_path(&config));
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut surface = TerminalSurface::new(io::stdout());
    let site = Site::start(config, backend, rng, &mut surface)?;
    run_session(site, &mut surface)?;
    Ok(())
}

fn print_reply(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut seed = None;
    let mut words = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--seed" {
            let value = args.get(i + 1).ok_or("--seed requires a value")?;
            seed = Some(
                value
                    .parse::<u64>()
                    .map_err(|err| format!("--seed expects an integer: {err}"))?,
            );
            i += 2;
        } else {
            words.push(args[i].as_str());
            i += 1;
        }
    }
    let prompt = words.join(" ");
    if prompt.trim().is_empty() {
        return Err("reply requires some text".into());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    println!("[{}] {}", classify(&prompt).label(), select_reply(&prompt, &mut rng));
    Ok(())
}

fn print_preferences(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if args.storage.is_some() {
        config.storage.path = args.storage;
    }
    let path = storage_path(&config);
    let document = load_document(&path)?;
    println!("storage: {}", path.display());
    if document.entries.is_empty() {
        println!("(no preferences stored)");
    }
    for (key, entry) in &document.entries {
        let updated = format_timestamp(entry.updated_at_ms);
        println!("{key} = {} (updated {updated})", entry.value);
    }
    Ok(())
}

/// Explicit `--config` files must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> Result<SiteConfig, Box<dyn std::error::Error>> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|path| path.exists()),
    };
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .map_err(|err| format!("read config {}: {err}", path.display()))?;
            toml::from_str::<SiteConfig>(&raw)
                .map_err(|err| format!("parse config {}: {err}", path.display()))?
        }
        None => SiteConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clearn").join("config.toml"))
}

fn storage_path(config: &SiteConfig) -> PathBuf {
    config.storage.path.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .map(|dir| dir.join("clearn"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("preferences.json")
    })
}

/// Falls back to disabled storage so the session still runs from memory.
fn open_storage(path: &Path) -> Box<dyn StorageBackend> {
    match FileStorage::open(path) {
        Ok(storage) => {
            info!(path = %path.display(), "preferences storage opened");
            Box::new(storage)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "preferences storage unavailable");
            Box::new(UnavailableStorage)
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn print_help() {
    println!("clearn {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  clearn [run] [--config PATH] [--storage PATH] [--seed N]");
    println!("  clearn reply [--seed N] TEXT");
    println!("  clearn prefs [--config PATH] [--storage PATH]");
    println!("  clearn --help");
    println!("  clearn --version");
    println!();
    println!("Set {LOG_ENV} (e.g. {LOG_ENV}=debug) to change log output on stderr.");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clearn_core::config::ConfigError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::SessionArgs;
    use super::load_config;
    use super::parse_session_args;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn session_args_parse_all_flags() {
        let parsed = parse_session_args(&args(&[
            "--config", "site.toml", "--storage", "prefs.json", "--seed", "9",
        ]))
        .expect("parse");
        assert_eq!(
            parsed,
            SessionArgs {
                config: Some(PathBuf::from("site.toml")),
                storage: Some(PathBuf::from("prefs.json")),
                seed: Some(9),
            }
        );
    }

    #[test]
    fn session_args_reject_bad_input() {
        assert!(parse_session_args(&args(&["--storage"])).is_err());
        assert!(parse_session_args(&args(&["--seed", "soon"])).is_err());
        assert!(parse_session_args(&args(&["--colour", "blue"])).is_err());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "log_level = \"debug\"\nseed = 5\n\n[dialogue]\nreply_delay_ms = 400\n\n[font_scale]\nlarge_px = 20\n",
        )
        .expect("write config");

        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.dialogue.reply_delay_ms, 400);
        assert_eq!(config.font_scale.large_px, 20);
        assert_eq!(config.font_scale.medium_px, 16);
        assert_eq!(config.carousel.period_ms, 8_000);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[carousel]\nperiod_ms = 0\n").expect("write config");

        let err = load_config(Some(&path)).expect_err("zero period");
        assert_eq!(err.to_string(), ConfigError::ZeroCarouselPeriod.to_string());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempdir().expect("tmpdir");
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
