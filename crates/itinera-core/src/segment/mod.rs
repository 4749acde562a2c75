//! Itinerary text segmentation.
//!
//! Splits free-form model output into titled sections (Overview, Day N,
//! Activities, Food, Hotels, Tips, Transportation) for structured display.
//! [`segment`] is a pure function: the same text always yields the same
//! sections, and it never fails.

mod heading;
mod render;

pub use heading::{HeadingMatch, HeadingRule, heading_rules, match_heading};
pub use render::{DisplayLine, display_line};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

pub const OVERVIEW_TITLE: &str = "Overview";
pub const FALLBACK_TITLE: &str = "Generated Itinerary";

/// Icon tag shown next to a section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SectionIcon {
    Info,
    Calendar,
    MapPin,
    Utensils,
    Bed,
    Lightbulb,
    Car,
    FileText,
}

/// A titled block of itinerary lines. Derived at render time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub icon: SectionIcon,
    pub content: Vec<String>,
}

impl Section {
    fn new(title: impl Into<String>, icon: SectionIcon) -> Self {
        Self {
            title: title.into(),
            icon,
            content: Vec::new(),
        }
    }
}

/// Segments itinerary text into sections.
///
/// Lines are trimmed and blank lines dropped. Each line is checked against
/// [`heading_rules`] in order; the first rule that matches opens a new
/// section. Lines before the first heading go to a single "Overview"
/// section.
///
/// The "Generated Itinerary" branch is unreachable: every non-blank line
/// lands in Overview or a heading section.
pub fn segment(text: &str) -> Vec<Section> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in &lines {
        if let Some(heading) = match_heading(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            let mut section = Section::new(heading.title, heading.icon);
            if let Some(first) = heading.first_line {
                section.content.push(first);
            }
            current = Some(section);
            continue;
        }

        // Only the very first unmatched lines can land here, so Overview
        // is opened at most once.
        current
            .get_or_insert_with(|| Section::new(OVERVIEW_TITLE, SectionIcon::Info))
            .content
            .push((*line).to_string());
    }

    if let Some(done) = current {
        sections.push(done);
    }

    if sections.is_empty() && !text.trim().is_empty() {
        let mut fallback = Section::new(FALLBACK_TITLE, SectionIcon::FileText);
        fallback.content = lines.iter().map(|line| (*line).to_string()).collect();
        sections.push(fallback);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_and_food_sections() {
        let text = "Day 1: Arrival\nVisit the museum\nFood: Try local street food";
        let sections = segment(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Day 1: Arrival");
        assert_eq!(sections[0].icon, SectionIcon::Calendar);
        assert_eq!(sections[0].content, vec!["Visit the museum"]);
        assert_eq!(sections[1].title, "Food Recommendations");
        assert_eq!(sections[1].content, vec!["Try local street food"]);
    }

    #[test]
    fn test_text_without_headings_is_one_overview() {
        let sections = segment("Just walk around and enjoy.\nBring comfortable shoes.");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Overview");
        assert_eq!(
            sections[0].content,
            vec!["Just walk around and enjoy.", "Bring comfortable shoes."]
        );
    }

    #[test]
    fn test_segment_is_deterministic() {
        let text = "Intro line\nDay 2:\n- Hike\nHotels: Casa Azul\nTips\nCarry cash";
        assert_eq!(segment(text), segment(text));
    }

    #[test]
    fn test_overview_precedes_first_heading() {
        let text = "A relaxed three day plan.\n\nDay 1\nBeach\nDay 2:\nOld town";
        let sections = segment(text);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Overview", "Day 1", "Day 2"]);
        assert_eq!(sections[2].content, vec!["Old town"]);
    }

    #[test]
    fn test_heading_aliases_share_canonical_titles() {
        let text = "Attractions:\nTower\nAccommodation: Hostel Sol\nLocal Tips: tip first\nTransportation:\nMetro";
        let sections = segment(text);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Activities", "Hotel Suggestions", "Local Tips", "Transportation"]
        );
        assert_eq!(sections[1].content, vec!["Hostel Sol"]);
        assert_eq!(sections[2].content, vec!["tip first"]);
        assert_eq!(sections[3].icon, SectionIcon::Car);
    }

    #[test]
    fn test_headings_are_case_insensitive() {
        let sections = segment("DAY 3: Departure\nfood recommendations:\nRamen");
        assert_eq!(sections[0].title, "DAY 3: Departure");
        assert_eq!(sections[1].title, "Food Recommendations");
        assert_eq!(sections[1].content, vec!["Ramen"]);
    }

    #[test]
    fn test_every_non_blank_line_is_placed() {
        let text = "  Pack light  \n\nDay 1: Porto\nRibeira walk\nTips\n\nBuy a transit card";
        let sections = segment(text);

        let placed: usize = sections
            .iter()
            .map(|s| s.content.len() + usize::from(s.title != OVERVIEW_TITLE))
            .sum();
        assert_eq!(placed, 5);
        assert!(sections.iter().all(|s| s.title != FALLBACK_TITLE));
        assert_eq!(sections[0].content, vec!["Pack light"]);
    }

    #[test]
    fn test_empty_and_blank_text_yield_nothing() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n  ").is_empty());
    }

    #[test]
    fn test_content_is_kept_verbatim() {
        let sections = segment("Day 1\n- Morning: * walk *");
        assert_eq!(sections[0].content, vec!["- Morning: * walk *"]);
    }
}
