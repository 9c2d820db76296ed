// File: ./src/model/classifier.rs
// Attaches per-calendar display settings to raw events.
use crate::error::{HomecalError, Issue};
use crate::model::event::{EnrichedEvent, RawEvent, SourceConfig};

/// Resolves the settings of `event`'s calendar.
///
/// Unset settings take their defaults (`middle`, no icons). An explicitly
/// configured value always wins, `use_icons = false` included.
pub fn classify(event: &RawEvent, sources: &[SourceConfig]) -> Result<EnrichedEvent, HomecalError> {
    let source = sources
        .iter()
        .find(|s| s.name == event.calendar_name)
        .ok_or_else(|| HomecalError::ConfigurationMismatch {
            calendar: event.calendar_name.clone(),
            title: event.title.clone(),
        })?;

    Ok(EnrichedEvent {
        event: event.clone(),
        placement_zone: source.placement_zone.unwrap_or_default(),
        use_icons: source.use_icons.unwrap_or(false),
    })
}

/// Classifies a whole batch. Events without a calendar configuration are
/// left out and reported; the rest keep their input order.
pub fn classify_all(events: &[RawEvent], sources: &[SourceConfig]) -> (Vec<EnrichedEvent>, Vec<Issue>) {
    let mut enriched = Vec::with_capacity(events.len());
    let mut issues = Vec::new();

    for event in events {
        match classify(event, sources) {
            Ok(e) => enriched.push(e),
            Err(e) => issues.push(Issue::error(e)),
        }
    }

    log::debug!(
        "Classified {} of {} events ({} unmatched)",
        enriched.len(),
        events.len(),
        issues.len()
    );
    (enriched, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::PlacementZone;

    fn event(calendar: &str) -> RawEvent {
        RawEvent::new("Trash", "20240704", true, calendar)
    }

    #[test]
    fn test_defaults_when_unset() {
        let sources = vec![SourceConfig::new("home")];
        let e = classify(&event("home"), &sources).unwrap();
        assert_eq!(e.placement_zone, PlacementZone::Middle);
        assert!(!e.use_icons);
    }

    #[test]
    fn test_explicit_values_win() {
        let sources = vec![
            SourceConfig::new("home")
                .with_zone(PlacementZone::Bottom)
                .with_icons(true),
        ];
        let e = classify(&event("home"), &sources).unwrap();
        assert_eq!(e.placement_zone, PlacementZone::Bottom);
        assert!(e.use_icons);
    }

    #[test]
    fn test_missing_configuration() {
        let sources = vec![SourceConfig::new("home")];
        let err = classify(&event("work"), &sources).unwrap_err();
        assert_eq!(
            err,
            HomecalError::ConfigurationMismatch {
                calendar: "work".to_string(),
                title: "Trash".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_all_keeps_siblings() {
        let sources = vec![SourceConfig::new("home")];
        let events = vec![event("home"), event("nowhere"), event("home")];
        let (enriched, issues) = classify_all(&events, &sources);
        assert_eq!(enriched.len(), 2);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }
}
