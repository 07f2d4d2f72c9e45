mod app;
mod calendar;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{
    weekday_from_index0, AdapterParams, TimeZone, WeekPager, WeeksAdapter, DEFAULT_NUM_WEEKS,
};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, UtcOffset,
    Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    week_start: Option<Weekday>,
    num_weeks: Option<u16>,
    days: Option<u8>,
    tz: Option<String>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("week-start") => {
                    opts.week_start = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Short('n') | Arg::Long("num-weeks") => {
                    opts.num_weeks =
                        Some(parser.value()?.parse_with(|s| parse_bounded(s, 1, 52))?);
                }
                Arg::Short('d') | Arg::Long("days") => {
                    opts.days = Some(parser.value()?.parse_with(|s| parse_bounded(s, 1, 7))?);
                }
                Arg::Short('z') | Arg::Long("tz") => {
                    opts.tz = Some(parser.value()?.string()?);
                }
                Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
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
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // The local offset can only be determined while the process
                // is single-threaded, so it is fetched before the logger
                // starts.
                let zone = resolve_zone(opts.tz.as_deref())?;
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                let now = OffsetDateTime::now_utc();
                let today = zone.today(now);
                log::info!("Starting up; today is {today} in time zone {}", zone.name());
                let adapter = WeeksAdapter::new(
                    opts.date.unwrap_or(today),
                    &AdapterParams {
                        focus_month: None,
                        week_start: opts.week_start,
                        selected_date: None,
                        num_weeks: opts.num_weeks,
                        days_per_week: opts.days,
                    },
                );
                let pager = WeekPager::new(adapter, zone, now);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(pager).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: weekgrid [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Scrollable terminal calendar laid out one week per row");
                println!();
                println!("Options:");
                println!("  -s, --week-start <DAY>  Day on which weeks start [default: sunday]");
                println!(
                    "  -n, --num-weeks <N>     Number of weeks to fit on screen [default: {DEFAULT_NUM_WEEKS}]"
                );
                println!("  -d, --days <N>          Number of days to show per week, 1-7 [default: 7]");
                println!("  -z, --tz <ZONE>         \"local\", \"UTC\", an offset like +05:30, or a name like");
                println!("                          Europe/Paris [default: local]");
                println!("      --log-file <PATH>   Write log messages to the given file");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
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

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
enum ArgError {
    #[error("expected a day of the week, e.g. \"monday\", or a number from 0 (Sunday) through 6")]
    Weekday,
    #[error("expected an integer from {min} through {max}")]
    OutOfRange { min: u16, max: u16 },
}

/// Parses a weekday given by name, by an abbreviation of at least three
/// letters, or by number with Sunday as 0
fn parse_weekday(s: &str) -> Result<Weekday, ArgError> {
    if let Ok(i) = s.parse::<u8>() {
        return weekday_from_index0(i).ok_or(ArgError::Weekday);
    }
    if s.len() < 3 {
        return Err(ArgError::Weekday);
    }
    (0..7)
        .filter_map(weekday_from_index0)
        .find(|wd| {
            wd.to_string()
                .get(..s.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(s))
        })
        .ok_or(ArgError::Weekday)
}

fn parse_bounded<T>(s: &str, min: T, max: T) -> Result<T, ArgError>
where
    T: FromStr + PartialOrd + Into<u16> + Copy,
{
    s.parse::<T>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or(ArgError::OutOfRange {
            min: min.into(),
            max: max.into(),
        })
}

fn resolve_zone(tz: Option<&str>) -> anyhow::Result<TimeZone> {
    let tz = tz.unwrap_or("local");
    let zone = match UtcOffset::current_local_offset() {
        Ok(offset) => TimeZone::parse(tz, offset)?,
        Err(e) if tz.eq_ignore_ascii_case("local") => {
            return Err(e).context("failed to determine local time zone offset")
        }
        Err(_) => TimeZone::parse(tz, UtcOffset::UTC)?,
    };
    Ok(zone)
}

fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    if let Err(e) = execute!(std::io::stdout(), EnableMouseCapture) {
        log::warn!("Failed to enable mouse capture: {e}");
    }
    let r = func(terminal);
    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
