// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::bucket::MAX_WINDOW_DAYS;
use crate::model::date::{DEFAULT_LOCALE, DateFormats, DateStyle, parse_locale};
use crate::model::event::SourceConfig;
use crate::model::icons::default_icon_table;
use crate::model::teams::{DEFAULT_LOGO_URL, default_team_table};
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

fn default_days() -> usize {
    1
}
fn default_logo_url() -> String {
    DEFAULT_LOGO_URL.to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Days rendered when the event batch does not say otherwise.
    #[serde(default = "default_days")]
    pub maximum_number_of_days: usize,
    /// Logo URL template; `{0}` is replaced by the team id.
    #[serde(default = "default_logo_url")]
    pub logo_url: String,
    /// IANA zone name. Local time when unset.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Locale for weekday names and `%x`-style patterns, e.g. `de_DE`.
    /// The binary falls back to the system locale when unset.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub formats: DateFormats,
    #[serde(default)]
    pub calendars: Vec<SourceConfig>,
    #[serde(default = "default_team_table")]
    pub teams: HashMap<String, String>,
    #[serde(default = "default_icon_table")]
    pub icons: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            maximum_number_of_days: 1,
            logo_url: default_logo_url(),
            timezone: None,
            locale: None,
            formats: DateFormats::default(),
            calendars: Vec::new(),
            teams: default_team_table(),
            icons: default_icon_table(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        Self::from_toml(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })
    }

    /// Parses and checks a config. Patterns, locale and window size are
    /// validated here so nothing fails later while rendering.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        if config.maximum_number_of_days > MAX_WINDOW_DAYS {
            anyhow::bail!(
                "maximum_number_of_days is {}, at most {} is allowed",
                config.maximum_number_of_days,
                MAX_WINDOW_DAYS
            );
        }
        config.date_style()?;
        Ok(config)
    }

    /// The configured patterns in the configured locale (`en_US` when unset).
    pub fn date_style(&self) -> Result<DateStyle> {
        let locale = match &self.locale {
            Some(name) => parse_locale(name)?,
            None => DEFAULT_LOCALE,
        };
        DateStyle::new(self.formats.clone(), locale)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str).map_err(|e| {
            anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e)
        })?;
        Ok(())
    }

    /// The configured zone, if any. Unknown names are an error rather than
    /// a silent fallback to local time.
    pub fn time_zone(&self) -> Result<Option<chrono_tz::Tz>> {
        match &self.timezone {
            None => Ok(None),
            Some(name) => name
                .parse::<chrono_tz::Tz>()
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {}", name, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use crate::model::event::PlacementZone;

    #[test]
    fn test_minimal_file_gets_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.teams.len(), 32);
        assert_eq!(config.icons.get("yard").unwrap(), "fab fa-pagelines");
    }

    #[test]
    fn test_calendar_fields_keep_presence() {
        let config = Config::from_toml(
            r#"
maximum_number_of_days = 3
timezone = "America/New_York"

[[calendars]]
name = "NBA"
placement_zone = "top"
use_icons = true

[[calendars]]
name = "Pickup"
cal_location = "sideways"
use_icons = false

[[calendars]]
name = "Family"
"#,
        )
        .unwrap();

        assert_eq!(config.maximum_number_of_days, 3);
        assert_eq!(config.calendars[0].placement_zone, Some(PlacementZone::Top));
        assert_eq!(config.calendars[1].placement_zone, Some(PlacementZone::Middle));
        assert_eq!(config.calendars[1].use_icons, Some(false));
        assert_eq!(config.calendars[2].use_icons, None);
        assert!(config.time_zone().unwrap().is_some());
    }

    #[test]
    fn test_bad_timezone() {
        let config = Config {
            timezone: Some("Mars/Olympus".to_string()),
            ..Config::default()
        };
        assert!(config.time_zone().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let ctx = TestContext::new();
        assert!(Config::is_missing_config_error(&Config::load(&ctx).unwrap_err()));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());

        let mut config = Config::default();
        config.calendars.push(SourceConfig::new("NBA").with_icons(true));
        config.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), config);
    }

    #[test]
    fn test_bad_pattern_is_rejected() {
        let err = Config::from_toml("[formats]\nweekday = \"%Q\"\n").unwrap_err();
        assert!(err.to_string().contains("formats.weekday"));
        let err = Config::from_toml("[formats]\ntime = \"%H:%\"\n").unwrap_err();
        assert!(err.to_string().contains("formats.time"));
    }

    #[test]
    fn test_locale_and_window_are_checked() {
        let config = Config::from_toml("locale = \"de_DE\"\n").unwrap();
        let style = config.date_style().unwrap();
        let day = crate::model::DayKey::from_ymd(2024, 7, 4).unwrap();
        assert_eq!(day.weekday_name(&style), "Donnerstag");

        assert!(Config::from_toml("locale = \"Klingon\"\n").is_err());
        assert!(Config::from_toml("maximum_number_of_days = 100000\n").is_err());
        assert!(Config::from_toml("maximum_number_of_days = 366\n").is_ok());
    }
}
