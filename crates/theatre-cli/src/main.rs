use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use theatre_core::bookmarks::BookmarkStore;
use theatre_core::config::AppConfig;
use theatre_core::error::TheatreError;
use theatre_core::storage::Preferences;

/// Inspect and edit saved DVD bookmarks.
#[derive(Debug, Parser)]
#[command(name = "theatre", version, about)]
struct Cli {
    /// Preference database to use instead of the default one.
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List bookmarks, optionally only those of one disc.
    List {
        #[arg(long)]
        disc: Option<String>,
    },
    /// List discs that have bookmarks.
    Discs,
    /// Set or clear (no NAME) the name of a bookmark.
    Rename { index: usize, name: Option<String> },
    /// Delete a bookmark.
    Remove { index: usize },
    /// Print the config file and preference database locations.
    ConfigPath,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Theatre(#[from] TheatreError),
    #[error("no bookmark at index {0}")]
    NoSuchBookmark(usize),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_err) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = config_err {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
    }

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open_store(prefs: Option<PathBuf>, config: &AppConfig) -> Result<BookmarkStore, CliError> {
    let prefs_path = match prefs {
        Some(path) => path,
        None => AppConfig::ensure_prefs_path()?,
    };
    let prefs = Preferences::open(&prefs_path)?;
    Ok(BookmarkStore::open(
        prefs,
        config.bookmarks.preference_key.as_str(),
    ))
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), CliError> {
    match cli.command {
        Command::List { disc } => {
            let store = open_store(cli.prefs, config)?;
            for (index, bookmark) in store.all().iter().enumerate() {
                if disc.as_deref().is_some_and(|d| d != bookmark.disc_name()) {
                    continue;
                }
                println!(
                    "{index:>4}  {}  [{}]",
                    bookmark.display_label(),
                    bookmark.summary()
                );
            }
        }
        Command::Discs => {
            let store = open_store(cli.prefs, config)?;
            for disc in store.disc_names() {
                let count = store.bookmarks_for_disc(&disc).len();
                println!("{disc}\t{count}");
            }
        }
        Command::Rename { index, name } => {
            let mut store = open_store(cli.prefs, config)?;
            if !store.rename_at(index, name) {
                return Err(CliError::NoSuchBookmark(index));
            }
            // Mutations only log save failures; save again to report them.
            store.save()?;
        }
        Command::Remove { index } => {
            let mut store = open_store(cli.prefs, config)?;
            let removed = store
                .remove_at(index)
                .ok_or(CliError::NoSuchBookmark(index))?;
            store.save()?;
            println!("removed {}", removed.display_label());
        }
        Command::ConfigPath => {
            println!("config: {}", AppConfig::config_path().display());
            println!("prefs:  {}", AppConfig::prefs_path().display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename_without_name_clears() {
        let cli = Cli::try_parse_from(["theatre", "rename", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Rename {
                index: 3,
                name: None
            }
        ));
    }

    #[test]
    fn test_parse_global_prefs_after_subcommand() {
        let cli =
            Cli::try_parse_from(["theatre", "list", "--disc", "ALIEN", "--prefs", "x.db"]).unwrap();
        assert_eq!(cli.prefs, Some(PathBuf::from("x.db")));
        assert!(matches!(cli.command, Command::List { disc: Some(ref d) } if d == "ALIEN"));
    }

    const TWO_AT_SAME_SPOT: &str = r#"[
        {"name": "first", "discName": "ALIEN", "title": 1, "chapter": 2, "frame": 0, "seconds": 30},
        {"name": "second", "discName": "ALIEN", "title": 1, "chapter": 2, "frame": 0, "seconds": 30}
    ]"#;

    fn seeded_prefs(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("p.db");
        let key = AppConfig::default().bookmarks.preference_key;
        Preferences::open(&path)
            .unwrap()
            .set(&key, TWO_AT_SAME_SPOT)
            .unwrap();
        path
    }

    fn run_args(args: &[&str], prefs: &std::path::Path) -> Result<(), CliError> {
        let mut argv = vec!["theatre"];
        argv.extend_from_slice(args);
        argv.extend(["--prefs", prefs.to_str().unwrap()]);
        run(Cli::try_parse_from(argv).unwrap(), &AppConfig::default())
    }

    fn names(prefs: &std::path::Path) -> Vec<Option<String>> {
        let store = open_store(Some(prefs.to_path_buf()), &AppConfig::default()).unwrap();
        store
            .all()
            .iter()
            .map(|b| b.name().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_rename_targets_listed_index_among_equal_bookmarks() {
        let dir = tempfile::TempDir::new().unwrap();
        let prefs = seeded_prefs(&dir);

        run_args(&["rename", "1", "renamed"], &prefs).unwrap();
        assert_eq!(
            names(&prefs),
            vec![Some("first".to_string()), Some("renamed".to_string())]
        );
    }

    #[test]
    fn test_remove_targets_listed_index_among_equal_bookmarks() {
        let dir = tempfile::TempDir::new().unwrap();
        let prefs = seeded_prefs(&dir);

        run_args(&["remove", "1"], &prefs).unwrap();
        assert_eq!(names(&prefs), vec![Some("first".to_string())]);
    }

    #[test]
    fn test_rename_out_of_range_changes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let prefs = seeded_prefs(&dir);

        let err = run_args(&["rename", "2", "x"], &prefs).unwrap_err();
        assert!(matches!(err, CliError::NoSuchBookmark(2)));
        assert_eq!(
            names(&prefs),
            vec![Some("first".to_string()), Some("second".to_string())]
        );
    }

    #[test]
    fn test_remove_out_of_range() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "theatre",
            "remove",
            "0",
            "--prefs",
            dir.path().join("p.db").to_str().unwrap(),
        ])
        .unwrap();

        let err = run(cli, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::NoSuchBookmark(0)));
    }
}
