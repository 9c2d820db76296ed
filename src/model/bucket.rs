// File: ./src/model/bucket.rs
// Sorts classified events into one bucket per day of the display window.
use crate::error::{HomecalError, Issue};
use crate::model::date::{DateStyle, DayKey, normalize};
use crate::model::event::{EnrichedEvent, PlacementZone};
use chrono::TimeZone;
use std::collections::HashMap;

/// Upper bound on the number of days a single window may span.
pub const MAX_WINDOW_DAYS: usize = 366;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub day: DayKey,
    /// 0 is the reference day.
    pub position: usize,
    pub top: Vec<EnrichedEvent>,
    pub middle: Vec<EnrichedEvent>,
    pub bottom: Vec<EnrichedEvent>,
}

impl DayBucket {
    pub fn new(day: DayKey, position: usize) -> Self {
        Self {
            day,
            position,
            top: Vec::new(),
            middle: Vec::new(),
            bottom: Vec::new(),
        }
    }

    pub fn zone(&self, zone: PlacementZone) -> &[EnrichedEvent] {
        match zone {
            PlacementZone::Top => &self.top,
            PlacementZone::Middle => &self.middle,
            PlacementZone::Bottom => &self.bottom,
        }
    }

    pub fn push(&mut self, event: EnrichedEvent) {
        match event.placement_zone {
            PlacementZone::Top => self.top.push(event),
            PlacementZone::Middle => self.middle.push(event),
            PlacementZone::Bottom => self.bottom.push(event),
        }
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.middle.len() + self.bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct DayBucketer<'a, Tz: TimeZone> {
    tz: &'a Tz,
    style: &'a DateStyle,
}

impl<'a, Tz: TimeZone> DayBucketer<'a, Tz> {
    pub fn new(tz: &'a Tz, style: &'a DateStyle) -> Self {
        Self { tz, style }
    }

    /// Builds exactly `window_size` buckets starting at `reference_day`.
    ///
    /// Days without events still get an (empty) bucket. An event belongs to
    /// the day whose short date string equals its own. Events outside the
    /// window are dropped silently; events whose start cannot be read at all
    /// are dropped and reported.
    ///
    /// A window larger than `MAX_WINDOW_DAYS`, or one running past the last
    /// representable date, is cut short and reported.
    pub fn bucket(
        &self,
        events: &[EnrichedEvent],
        window_size: usize,
        reference_day: DayKey,
    ) -> (Vec<DayBucket>, Vec<Issue>) {
        let mut issues = Vec::new();

        let size = if window_size > MAX_WINDOW_DAYS {
            issues.push(Issue::error(HomecalError::WindowTooLarge {
                requested: window_size,
                max: MAX_WINDOW_DAYS,
            }));
            MAX_WINDOW_DAYS
        } else {
            window_size
        };

        let mut buckets: Vec<DayBucket> = Vec::with_capacity(size);
        for i in 0..size {
            match reference_day.add_days(i as u64) {
                Some(day) => buckets.push(DayBucket::new(day, i)),
                None => {
                    issues.push(Issue::error(HomecalError::WindowOutOfRange {
                        last_day: buckets
                            .last()
                            .map(|b| b.day)
                            .unwrap_or(reference_day)
                            .to_string(),
                        requested: size,
                        built: buckets.len(),
                    }));
                    break;
                }
            }
        }

        // Short date -> bucket index. First day wins if the pattern is too
        // coarse to tell two window days apart.
        let mut index: HashMap<String, usize> = HashMap::new();
        for b in &buckets {
            index
                .entry(b.day.short_date(self.style))
                .or_insert(b.position);
        }

        let mut dropped = 0usize;

        for event in events {
            let normalized = match normalize(&event.event.start_date, self.tz) {
                Ok(n) => n,
                Err(e) => {
                    issues.push(Issue::error(e));
                    continue;
                }
            };
            if normalized.guessed {
                issues.push(Issue::ambiguous_date(&event.event.start_date.to_string()));
            }

            match index.get(&normalized.day.short_date(self.style)) {
                Some(&i) => buckets[i].push(event.clone()),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            log::debug!("{} events fall outside the {}-day window", dropped, window_size);
        }
        (buckets, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::RawEvent;
    use chrono::Utc;

    fn enriched(title: &str, start: &str, zone: PlacementZone) -> EnrichedEvent {
        EnrichedEvent {
            event: RawEvent::new(title, start, true, "home"),
            placement_zone: zone,
            use_icons: false,
        }
    }

    fn july(day: u32) -> DayKey {
        DayKey::from_ymd(2024, 7, day).unwrap()
    }

    #[test]
    fn test_window_length_without_events() {
        let style = DateStyle::default();
        let bucketer = DayBucketer::new(&Utc, &style);
        for size in [0, 1, 7] {
            let (buckets, issues) = bucketer.bucket(&[], size, july(1));
            assert_eq!(buckets.len(), size);
            assert!(issues.is_empty());
            assert!(buckets.iter().all(DayBucket::is_empty));
        }
    }

    #[test]
    fn test_events_land_in_day_and_zone() {
        let style = DateStyle::default();
        let bucketer = DayBucketer::new(&Utc, &style);
        let events = vec![
            enriched("a", "20240702", PlacementZone::Top),
            enriched("b", "20240701", PlacementZone::Bottom),
            enriched("c", "20240702", PlacementZone::Top),
            enriched("far", "20240801", PlacementZone::Middle),
            enriched("past", "20240630", PlacementZone::Middle),
        ];
        let (buckets, issues) = bucketer.bucket(&events, 3, july(1));
        assert!(issues.is_empty());
        assert_eq!(buckets[0].day, july(1));
        assert_eq!(buckets[2].position, 2);

        assert_eq!(buckets[0].bottom.len(), 1);
        let titles: Vec<&str> = buckets[1].top.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(buckets[2].is_empty());
        assert_eq!(buckets.iter().map(DayBucket::len).sum::<usize>(), 3);
    }

    #[test]
    fn test_unreadable_start_is_reported() {
        let style = DateStyle::default();
        let bucketer = DayBucketer::new(&Utc, &style);
        let events = vec![
            enriched("bad", "20241399", PlacementZone::Middle),
            enriched("guess", "2024-07-01", PlacementZone::Middle),
        ];
        let (buckets, issues) = bucketer.bucket(&events, 1, july(1));
        assert_eq!(buckets[0].middle.len(), 1);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].is_error());
        assert!(!issues[1].is_error());
    }

    #[test]
    fn test_window_is_capped() {
        let style = DateStyle::default();
        let bucketer = DayBucketer::new(&Utc, &style);
        let (buckets, issues) = bucketer.bucket(&[], usize::MAX, july(1));
        assert_eq!(buckets.len(), MAX_WINDOW_DAYS);
        assert_eq!(
            issues[0].error,
            Some(HomecalError::WindowTooLarge {
                requested: usize::MAX,
                max: MAX_WINDOW_DAYS,
            })
        );
    }

    #[test]
    fn test_window_stops_at_last_date() {
        let style = DateStyle::default();
        let bucketer = DayBucketer::new(&Utc, &style);
        let last = DayKey::new(chrono::NaiveDate::MAX);
        let events = vec![enriched("end", "20240701", PlacementZone::Middle)];
        let (buckets, issues) = bucketer.bucket(&events, 2, last);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].day, last);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].error,
            Some(HomecalError::WindowOutOfRange { built: 1, requested: 2, .. })
        ));
    }
}
