// File: ./src/render/day_block.rs
// Builds the render tree for one day of the window.
use crate::error::{HomecalError, Issue};
use crate::model::bucket::DayBucket;
use crate::model::date::{DateStyle, local_time_from_seconds};
use crate::model::event::{EnrichedEvent, PlacementZone};
use crate::model::icons::KeywordIconMatcher;
use crate::model::teams::{TeamDirectory, logo_url};
use crate::render::RenderNode;
use chrono::TimeZone;
use strum::IntoEnumIterator;

/// Titles longer than this (in UTF-16 code units) get the compact text style.
pub const LONG_TITLE_CHARS: usize = 50;

pub struct DayBlockRenderer<'a, Tz: TimeZone> {
    pub teams: &'a TeamDirectory,
    pub icons: &'a KeywordIconMatcher,
    pub style: &'a DateStyle,
    pub logo_url: &'a str,
    pub tz: &'a Tz,
}

impl<'a, Tz: TimeZone> DayBlockRenderer<'a, Tz> {
    /// Renders a bucket as:
    ///
    /// ```text
    /// div.calendar-day
    ///   div.shaded-header       weekday
    ///   div.body
    ///     div.day-of-month      day number
    ///     div.content-top
    ///     div.content-middle
    ///     div.content-bottom
    /// ```
    pub fn render(&self, bucket: &DayBucket) -> (RenderNode, Vec<Issue>) {
        let mut issues = Vec::new();

        let header = RenderNode::text(
            "div",
            "shaded-header",
            &bucket.day.weekday_name(self.style),
        );
        let mut body = RenderNode::new("div", "body");
        body.push(RenderNode::text(
            "div",
            "day-of-month",
            &bucket.day.day_of_month(self.style),
        ));

        for zone in PlacementZone::iter() {
            let mut section = RenderNode::new("div", zone.css_class());
            for event in bucket.zone(zone) {
                if event.is_full_day() {
                    section.push(self.render_full_day(event));
                } else {
                    section
                        .children
                        .extend(self.render_timed(event, &mut issues));
                }
            }
            body.push(section);
        }

        let block = RenderNode::new("div", "calendar-day").with_children([header, body]);
        (block, issues)
    }

    fn render_full_day(&self, event: &EnrichedEvent) -> RenderNode {
        if event.use_icons {
            let classes = self.icons.icons_for(event.title());
            if !classes.is_empty() {
                return RenderNode::new("div", "icons").with_children(
                    classes
                        .iter()
                        .map(|c| RenderNode::new("i", &format!("{} icon", c))),
                );
            }
        }
        title_text(event.title())
    }

    /// A matchup row followed by the start time, or the bare title when the
    /// title is not a `home @ away` pair.
    fn render_timed(&self, event: &EnrichedEvent, issues: &mut Vec<Issue>) -> Vec<RenderNode> {
        let Some((home, away)) = split_matchup(event.title()) else {
            issues.push(Issue::error(HomecalError::MalformedMatchup {
                title: event.title().to_string(),
            }));
            return vec![title_text(event.title())];
        };

        let (home_node, away_node) = if event.use_icons {
            (self.team_logo(home, issues), self.team_logo(away, issues))
        } else {
            (
                RenderNode::text("span", "team-text", home),
                RenderNode::text("span", "team-text", away),
            )
        };

        let matchup = RenderNode::new("div", "game-logos").with_children([
            home_node,
            RenderNode::text("div", "vs", "vs"),
            away_node,
        ]);

        let mut nodes = vec![matchup];
        match local_time_from_seconds(&event.event.start_date, self.tz) {
            Ok(t) => nodes.push(RenderNode::text("div", "game-info", &self.style.time(t))),
            Err(e) => issues.push(Issue::error(e)),
        }
        nodes
    }

    /// Logo image, or the team name as text when the team is unknown.
    fn team_logo(&self, team: &str, issues: &mut Vec<Issue>) -> RenderNode {
        match self.teams.lookup(team) {
            Ok(id) => RenderNode::new("img", "team-logo")
                .with_attr("src", &logo_url(self.logo_url, id))
                .with_attr("alt", &format!("{} Logo", team)),
            Err(e) => {
                issues.push(Issue::error(e));
                RenderNode::text("span", "team-text", team)
            }
        }
    }
}

fn title_text(title: &str) -> RenderNode {
    let class = if title.encode_utf16().count() > LONG_TITLE_CHARS {
        "team-text-long"
    } else {
        "team-text"
    };
    RenderNode::text("span", class, title)
}

/// `"Boston Celtics @ Miami Heat"` -> `("Boston Celtics", "Miami Heat")`.
/// Anything other than exactly one `@` is rejected.
fn split_matchup(title: &str) -> Option<(&str, &str)> {
    let (home, away) = title.split_once('@')?;
    if away.contains('@') {
        return None;
    }
    Some((home.trim(), away.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_matchup() {
        assert_eq!(
            split_matchup("Boston Celtics @ Miami Heat"),
            Some(("Boston Celtics", "Miami Heat"))
        );
        assert_eq!(split_matchup("Heat@Celtics"), Some(("Heat", "Celtics")));
        assert_eq!(split_matchup("Practice"), None);
        assert_eq!(split_matchup("a @ b @ c"), None);
    }

    #[test]
    fn test_long_title_style() {
        assert_eq!(title_text("short").class, "team-text");
        let long = "x".repeat(LONG_TITLE_CHARS + 1);
        assert_eq!(title_text(&long).class, "team-text-long");
        let exact = "x".repeat(LONG_TITLE_CHARS);
        assert_eq!(title_text(&exact).class, "team-text");
    }

    #[test]
    fn test_long_title_counts_utf16_units() {
        // 25 emoji are 25 chars but 50 UTF-16 units.
        let emoji = "\u{1F3C0}".repeat(LONG_TITLE_CHARS / 2);
        assert_eq!(title_text(&emoji).class, "team-text");
        let over = format!("{}x", emoji);
        assert_eq!(over.chars().count(), LONG_TITLE_CHARS / 2 + 1);
        assert_eq!(title_text(&over).class, "team-text-long");
    }
}
