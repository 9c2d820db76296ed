use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use homecal::cli::{Args, Command, print_help};
use homecal::config::Config;
use homecal::context::{AppContext, StandardContext};
use homecal::engine::{Board, CalendarBatch, Homecal};
use homecal::model::date::system_locale;
use homecal::model::{DateStyle, DayKey, RawEvent};
use homecal::render::to_html;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io::Read;

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = Args::parse(&argv)?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Logging is optional; a second logger or a missing terminal is not fatal.
    let _ = TermLogger::init(
        level,
        ConfigBuilder::new().set_time_level(LevelFilter::Off).build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let ctx = StandardContext::new(args.root.clone());

    match args.command {
        Command::Help => {
            print_help("homecal");
            Ok(())
        }
        Command::Init => init(&ctx),
        Command::Render {
            input,
            date,
            days,
            html,
        } => {
            let config = Config::load_or_default(&ctx)?;
            let batch = read_batch(&input, &config, days)?;
            match config.time_zone()? {
                Some(tz) => render(&config, tz, batch, date, html),
                None => render(&config, Local, batch, date, html),
            }
        }
    }
}

fn init(ctx: &dyn AppContext) -> Result<()> {
    let path = ctx.get_config_file_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    Config::default().save(ctx)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Accepts a full batch object or a bare event array. Calendars and the
/// window size fall back to the config file when the input leaves them out.
fn read_batch(input: &str, config: &Config, days: Option<usize>) -> Result<CalendarBatch> {
    let contents = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read events from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read '{}'", input))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| format!("'{}' is not JSON", input))?;

    let mut batch = if value.is_array() {
        let events: Vec<RawEvent> =
            serde_json::from_value(value).context("Failed to parse event list")?;
        CalendarBatch {
            maximum_number_of_days: config.maximum_number_of_days,
            calendars: Vec::new(),
            events,
        }
    } else {
        serde_json::from_value(value).context("Failed to parse event batch")?
    };

    if batch.calendars.is_empty() {
        batch.calendars = config.calendars.clone();
    }
    if let Some(days) = days {
        batch.maximum_number_of_days = days;
    }
    batch.validate()?;
    Ok(batch)
}

fn render<Tz: TimeZone>(
    config: &Config,
    tz: Tz,
    batch: CalendarBatch,
    date: Option<chrono::NaiveDate>,
    html: bool,
) -> Result<()> {
    let mut engine = Homecal::from_config(config, tz)?;
    if config.locale.is_none()
        && let Some(locale) = system_locale()
    {
        log::debug!("Using system locale {:?}", locale);
        engine.style = DateStyle::new(config.formats.clone(), locale)?;
    }
    let reference_day = date.map(DayKey::new).unwrap_or_else(|| engine.today());

    let mut board = Board::new();
    board.receive(batch);
    let rendered = board.render(&engine, reference_day);

    if html {
        print!("{}", to_html(&rendered.container()));
    } else {
        println!("{}", serde_json::to_string_pretty(&rendered.container())?);
    }

    let errors = rendered.errors().count();
    if errors > 0 {
        eprintln!("{} event(s) could not be rendered as configured", errors);
    }
    Ok(())
}
