// File: ./src/model/event.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Start value as delivered by the event source. Some sources send a string
/// of digits, others a bare JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Number(i64),
    Text(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Number(n) => write!(f, "{}", n),
            Timestamp::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Timestamp::Text(s.to_string())
    }
}

impl From<i64> for Timestamp {
    fn from(n: i64) -> Self {
        Timestamp::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub title: String,
    pub start_date: Timestamp,
    #[serde(default)]
    pub full_day_event: bool,
    pub calendar_name: String,
}

impl RawEvent {
    pub fn new(
        title: &str,
        start_date: impl Into<Timestamp>,
        full_day_event: bool,
        calendar_name: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            start_date: start_date.into(),
            full_day_event,
            calendar_name: calendar_name.to_string(),
        }
    }
}

/// Vertical region of a day block.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlacementZone {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl PlacementZone {
    /// Anything that is not a known zone lands in the middle.
    pub fn parse_lenient(value: &str) -> Self {
        value.trim().parse().unwrap_or_else(|_| {
            log::debug!("Unknown placement zone '{}', using middle", value);
            PlacementZone::Middle
        })
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PlacementZone::Top => "content-top",
            PlacementZone::Middle => "content-middle",
            PlacementZone::Bottom => "content-bottom",
        }
    }
}

impl From<String> for PlacementZone {
    fn from(value: String) -> Self {
        PlacementZone::parse_lenient(&value)
    }
}

/// Per-calendar display settings. Absent fields stay `None` so that an
/// explicit `use_icons = false` can be told apart from a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default, alias = "cal_location", skip_serializing_if = "Option::is_none")]
    pub placement_zone: Option<PlacementZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_icons: Option<bool>,
}

impl SourceConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            placement_zone: None,
            use_icons: None,
        }
    }

    pub fn with_zone(mut self, zone: PlacementZone) -> Self {
        self.placement_zone = Some(zone);
        self
    }

    pub fn with_icons(mut self, use_icons: bool) -> Self {
        self.use_icons = Some(use_icons);
        self
    }
}

/// A raw event with its calendar's settings resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEvent {
    pub event: RawEvent,
    pub placement_zone: PlacementZone,
    pub use_icons: bool,
}

impl EnrichedEvent {
    pub fn title(&self) -> &str {
        &self.event.title
    }

    pub fn is_full_day(&self) -> bool {
        self.event.full_day_event
    }
}
