mod app;
mod calendar;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{MonthWindow, WeekRule, YearMonth};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        week_start: Weekday,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut week_start = Weekday::Sunday;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    let value = parser.value()?.string()?;
                    match parse_weekday(&value) {
                        Some(wd) => week_start = wd,
                        None => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(UnknownWeekdayError),
                            })
                        }
                    }
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
        Ok(Command::Run { date, week_start })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, week_start } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut window =
                        MonthWindow::launch(today, week_start, WeekRule::TrailingWeek);
                    if let Some(date) = date {
                        window = window.open_at(YearMonth::of(date));
                    }
                    App::new(window).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: weekfold [-w DAY] [YYYY-MM-DD]");
                println!();
                println!("Scrollable month calendar that folds down to the current week");
                println!();
                println!("The optional date selects the month the calendar opens on.");
                println!();
                println!("Options:");
                println!("  -w DAY, --week-start DAY");
                println!("                    Weekday the calendar weeks begin on  [default: sunday]");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
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

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Monday),
        "tuesday" | "tue" => Some(Weekday::Tuesday),
        "wednesday" | "wed" => Some(Weekday::Wednesday),
        "thursday" | "thu" => Some(Weekday::Thursday),
        "friday" | "fri" => Some(Weekday::Friday),
        "saturday" | "sat" => Some(Weekday::Saturday),
        "sunday" | "sun" => Some(Weekday::Sunday),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("expected a weekday name")]
struct UnknownWeekdayError;
