// File: ./src/engine.rs
// The pipeline from a batch of raw events to one render tree per day.
use crate::config::Config;
use crate::error::{HomecalError, Issue};
use crate::model::bucket::{DayBucket, DayBucketer, MAX_WINDOW_DAYS};
use crate::model::classifier::classify_all;
use crate::model::date::{DateStyle, DayKey};
use crate::model::event::{RawEvent, SourceConfig};
use crate::model::icons::KeywordIconMatcher;
use crate::model::teams::{DEFAULT_LOGO_URL, TeamDirectory};
use crate::render::{DayBlockRenderer, RenderNode};
use anyhow::Result;
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// One tree per window day, reference day first.
    pub days: Vec<RenderNode>,
    pub issues: Vec<Issue>,
}

impl Rendered {
    /// All day blocks wrapped in a single container node.
    pub fn container(&self) -> RenderNode {
        RenderNode::new("div", "calendar-container").with_children(self.days.iter().cloned())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }
}

/// Lookup tables and formatting rules, fixed for the lifetime of a display.
#[derive(Debug, Clone)]
pub struct Homecal<Tz: TimeZone> {
    pub teams: TeamDirectory,
    pub icons: KeywordIconMatcher,
    pub style: DateStyle,
    pub logo_url: String,
    pub tz: Tz,
}

impl<Tz: TimeZone> Homecal<Tz> {
    /// Built-in tables and formats.
    pub fn new(tz: Tz) -> Self {
        Self {
            teams: TeamDirectory::default(),
            icons: KeywordIconMatcher::default(),
            style: DateStyle::default(),
            logo_url: DEFAULT_LOGO_URL.to_string(),
            tz,
        }
    }

    /// Tables, patterns and locale from `config`. Fails on patterns or a
    /// locale name that cannot be used.
    pub fn from_config(config: &Config, tz: Tz) -> Result<Self> {
        Ok(Self {
            teams: TeamDirectory::new(config.teams.clone()),
            icons: KeywordIconMatcher::new(config.icons.clone()),
            style: config.date_style()?,
            logo_url: config.logo_url.clone(),
            tz,
        })
    }

    pub fn today(&self) -> DayKey {
        DayKey::today(&self.tz)
    }

    /// Classifies and buckets a batch without rendering it.
    pub fn buckets(
        &self,
        events: &[RawEvent],
        sources: &[SourceConfig],
        window_size: usize,
        reference_day: DayKey,
    ) -> (Vec<DayBucket>, Vec<Issue>) {
        let (enriched, mut issues) = classify_all(events, sources);
        let (buckets, bucket_issues) =
            DayBucketer::new(&self.tz, &self.style).bucket(&enriched, window_size, reference_day);
        issues.extend(bucket_issues);
        (buckets, issues)
    }

    /// Renders `window_size` days starting at `reference_day`.
    ///
    /// Problems with individual events end up in `Rendered::issues`; they
    /// never stop the remaining events or days from rendering.
    pub fn render_window(
        &self,
        events: &[RawEvent],
        sources: &[SourceConfig],
        window_size: usize,
        reference_day: DayKey,
    ) -> Rendered {
        let (buckets, mut issues) = self.buckets(events, sources, window_size, reference_day);

        let renderer = DayBlockRenderer {
            teams: &self.teams,
            icons: &self.icons,
            style: &self.style,
            logo_url: &self.logo_url,
            tz: &self.tz,
        };

        let mut days = Vec::with_capacity(buckets.len());
        for bucket in &buckets {
            let (node, day_issues) = renderer.render(bucket);
            days.push(node);
            issues.extend(day_issues);
        }

        Rendered { days, issues }
    }
}

fn default_days() -> usize {
    1
}

/// What the calendar source pushes: its window size, its calendars and
/// every event it currently knows about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarBatch {
    #[serde(default = "default_days")]
    pub maximum_number_of_days: usize,
    #[serde(default)]
    pub calendars: Vec<SourceConfig>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

impl CalendarBatch {
    /// Rejects a batch asking for more days than a window may hold.
    pub fn validate(&self) -> Result<(), HomecalError> {
        if self.maximum_number_of_days > MAX_WINDOW_DAYS {
            return Err(HomecalError::WindowTooLarge {
                requested: self.maximum_number_of_days,
                max: MAX_WINDOW_DAYS,
            });
        }
        Ok(())
    }
}

/// Holds the latest batch. A new batch replaces the old one as a whole, so
/// a render never mixes the window size of one batch with the events of
/// another.
#[derive(Debug, Clone, Default)]
pub struct Board {
    current: Option<CalendarBatch>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current batch, returning the previous one.
    pub fn receive(&mut self, batch: CalendarBatch) -> Option<CalendarBatch> {
        log::debug!(
            "Received {} events for {} calendars ({} days)",
            batch.events.len(),
            batch.calendars.len(),
            batch.maximum_number_of_days
        );
        self.current.replace(batch)
    }

    pub fn current(&self) -> Option<&CalendarBatch> {
        self.current.as_ref()
    }

    /// Renders the current batch. Before any batch arrives this is an
    /// empty render.
    pub fn render<Tz: TimeZone>(&self, engine: &Homecal<Tz>, reference_day: DayKey) -> Rendered {
        match &self.current {
            Some(batch) => engine.render_window(
                &batch.events,
                &batch.calendars,
                batch.maximum_number_of_days,
                reference_day,
            ),
            None => Rendered {
                days: Vec::new(),
                issues: Vec::new(),
            },
        }
    }
}
