mod app;
mod calendar;
mod config;
mod grade;
mod help;
mod picker;
mod store;
mod theme;
mod view;
use crate::app::App;
use crate::config::{default_store_path, Config};
use crate::store::{GradeStore, JsonFileStore, KeyValueStore, MemoryStore};
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        store: Option<PathBuf>,
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut store = None;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("store") => {
                    store = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            store,
            config,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                store,
                config,
                log_file,
            } => {
                // Determine the local date before anything (such as the
                // logger) has a chance to spawn threads
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let config = Config::load(config.as_deref())?;
                let _logger = log_file
                    .map(|path| init_logging(&path, config.log_level()))
                    .transpose()?;
                log::info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                let start = date.unwrap_or(today);
                match store.or(config.store).or_else(default_store_path) {
                    Some(path) => {
                        let backend = JsonFileStore::open(&path)?;
                        log::info!("Using grades file {}", backend.path().display());
                        let store = GradeStore::new(backend).with_prefix(config.key_prefix);
                        run_app(App::new(store, today).start_date(start))
                    }
                    None => {
                        log::warn!("No data directory found; grades will be kept in memory");
                        let store =
                            GradeStore::new(MemoryStore::new()).with_prefix(config.key_prefix);
                        let app = App::new(store, today)
                            .start_date(start)
                            .status("No data directory found; grades will not be saved");
                        run_app(app)
                    }
                }
            }
            Command::Help => {
                println!("Usage: daygrade [options] [YYYY-MM-DD]");
                println!();
                println!("Terminal month calendar for grading each day S/A/B/C/D/F");
                println!();
                println!("Options:");
                println!("  -s, --store <PATH>    Read & write grades in the given file");
                println!("  -c, --config <PATH>   Read configuration from the given file");
                println!("      --log-file <PATH> Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path, level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)
        .context("invalid log level")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .start()
        .context("failed to start logger")?;
    Ok(handle)
}

fn run_app<B: KeyValueStore>(app: App<B>) -> anyhow::Result<()> {
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        app.run(&mut terminal)?;
        Ok(())
    })
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        let args = args.iter().map(OsString::from).collect::<Vec<_>>();
        Command::from_parser(Parser::from_iter(
            std::iter::once(OsString::from("daygrade")).chain(args),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                date: None,
                store: None,
                config: None,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&[
                "--store",
                "g.json",
                "-c",
                "cfg.toml",
                "--log-file=daygrade.log",
                "2023-07-04"
            ])
            .unwrap(),
            Command::Run {
                date: Some(date!(2023 - 07 - 04)),
                store: Some(PathBuf::from("g.json")),
                config: Some(PathBuf::from("cfg.toml")),
                log_file: Some(PathBuf::from("daygrade.log")),
            }
        );
    }

    #[test]
    fn test_bad_date() {
        assert!(matches!(
            parse(&["2023-02-30"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_two_dates() {
        assert!(parse(&["2023-02-01", "2023-02-02"]).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }
}
