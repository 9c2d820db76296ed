// File: ./src/cli.rs
//! Command-line argument handling shared by the `homecal` binary.
use crate::model::bucket::MAX_WINDOW_DAYS;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Init,
    Render {
        input: String,
        date: Option<NaiveDate>,
        days: Option<usize>,
        html: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub verbose: bool,
}

impl Args {
    /// Parses arguments, excluding the binary name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut root = None;
        let mut verbose = false;
        let mut date = None;
        let mut days = None;
        let mut html = false;
        let mut positional: Vec<&str> = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => {
                    return Ok(Self {
                        command: Command::Help,
                        root,
                        verbose,
                    });
                }
                "-r" | "--root" => {
                    let value = iter.next().context("--root needs a path")?;
                    root = Some(PathBuf::from(value));
                }
                "-v" | "--verbose" => verbose = true,
                "--html" => html = true,
                "--date" => {
                    let value = iter.next().context("--date needs a YYYY-MM-DD value")?;
                    date = Some(
                        NaiveDate::parse_from_str(value, "%Y-%m-%d")
                            .with_context(|| format!("Invalid --date '{}'", value))?,
                    );
                }
                "--days" => {
                    let value = iter.next().context("--days needs a number")?;
                    let n = value
                        .parse::<usize>()
                        .with_context(|| format!("Invalid --days '{}'", value))?;
                    if n > MAX_WINDOW_DAYS {
                        anyhow::bail!("--days is {}, at most {} is allowed", n, MAX_WINDOW_DAYS);
                    }
                    days = Some(n);
                }
                other if other.starts_with('-') && other != "-" => {
                    anyhow::bail!("Unknown option '{}'", other);
                }
                other => positional.push(other),
            }
        }

        let command = match positional.as_slice() {
            [] => Command::Help,
            ["init"] => Command::Init,
            ["render", input] => Command::Render {
                input: input.to_string(),
                date,
                days,
                html,
            },
            ["render"] => anyhow::bail!("render needs an events file (or - for stdin)"),
            [other, ..] => anyhow::bail!("Unknown command '{}'", other),
        };

        Ok(Self {
            command,
            root,
            verbose,
        })
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Homecal v{} - Calendar day blocks with game matchups and pickup icons",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} render <events.json> [OPTIONS]", binary_name);
    println!("    {} init [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    --date <YYYY-MM-DD>   First day of the window (default: today).");
    println!("    --days <N>            Number of days to render (at most 366).");
    println!("    --html                Print HTML instead of the JSON render tree.");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    -v, --verbose         Log debug information to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("INPUT:");
    println!("    Either a bare JSON array of events, or an object with");
    println!("    \"maximumNumberOfDays\", \"calendars\" and \"events\".");
    println!("    Each event has \"title\", \"startDate\", \"fullDayEvent\", \"calendarName\".");
    println!("    Use - to read from stdin.");
    println!();
    println!("EXAMPLES:");
    println!("    {} render events.json --days 3", binary_name);
    println!("    {} render - --html < batch.json > board.html", binary_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_with_options() {
        let parsed = Args::parse(&args(&[
            "render", "ev.json", "--days", "3", "--date", "2024-07-04", "--html", "-v",
        ]))
        .unwrap();
        assert!(parsed.verbose);
        assert_eq!(
            parsed.command,
            Command::Render {
                input: "ev.json".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 7, 4),
                days: Some(3),
                html: true,
            }
        );
    }

    #[test]
    fn test_stdin_and_root() {
        let parsed = Args::parse(&args(&["--root", "/tmp/x", "render", "-"])).unwrap();
        assert_eq!(parsed.root, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(parsed.command, Command::Render { ref input, .. } if input == "-"));
    }

    #[test]
    fn test_errors() {
        assert!(Args::parse(&args(&["render"])).is_err());
        assert!(Args::parse(&args(&["render", "x", "--days", "many"])).is_err());
        assert!(Args::parse(&args(&["render", "x", "--days", "367"])).is_err());
        assert!(Args::parse(&args(&["render", "x", "--days", "18446744073709551615"])).is_err());
        assert!(Args::parse(&args(&["render", "x", "--days", "366"])).is_ok());
        assert!(Args::parse(&args(&["frobnicate"])).is_err());
        assert!(Args::parse(&args(&["--bogus"])).is_err());
        assert_eq!(Args::parse(&[]).unwrap().command, Command::Help);
    }
}
