//! The ordered heading table used by the segmenter.

use super::SectionIcon;
use once_cell::sync::Lazy;
use regex::Regex;

/// How a matched heading names its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingTitle {
    /// The matched line itself, minus one trailing colon ("Day 3: Kyoto").
    MatchedLine,
    /// A fixed label shared by all aliases ("Food" and "Food Recommendations").
    Canonical(&'static str),
}

/// One row of the heading table.
#[derive(Debug)]
pub struct HeadingRule {
    pattern: Regex,
    title: HeadingTitle,
    icon: SectionIcon,
}

impl HeadingRule {
    fn day() -> Self {
        Self {
            pattern: Regex::new(r"(?i)^day\s*\d+\b").expect("day pattern is valid"),
            title: HeadingTitle::MatchedLine,
            icon: SectionIcon::Calendar,
        }
    }

    /// Matches any of `aliases` at line start, an optional colon, and
    /// captures the rest of the line.
    fn label(aliases: &str, canonical: &'static str, icon: SectionIcon) -> Self {
        let pattern = format!(r"(?i)^(?:{aliases})\b\s*:?\s*(?P<rest>.*)$");
        Self {
            pattern: Regex::new(&pattern).expect("label pattern is valid"),
            title: HeadingTitle::Canonical(canonical),
            icon,
        }
    }

    pub fn icon(&self) -> SectionIcon {
        self.icon
    }

    /// The fixed title, or `None` for rules titled by the matched line.
    pub fn canonical_title(&self) -> Option<&'static str> {
        match self.title {
            HeadingTitle::Canonical(title) => Some(title),
            HeadingTitle::MatchedLine => None,
        }
    }

    /// Tries this rule against a trimmed line.
    pub fn apply(&self, line: &str) -> Option<HeadingMatch> {
        let captures = self.pattern.captures(line)?;
        let matched = match self.title {
            HeadingTitle::MatchedLine => HeadingMatch {
                title: line.strip_suffix(':').unwrap_or(line).trim_end().to_string(),
                icon: self.icon,
                first_line: None,
            },
            HeadingTitle::Canonical(title) => {
                let rest = captures
                    .name("rest")
                    .map(|m| m.as_str().trim())
                    .filter(|rest| !rest.is_empty())
                    .map(str::to_string);
                HeadingMatch {
                    title: title.to_string(),
                    icon: self.icon,
                    first_line: rest,
                }
            }
        };
        Some(matched)
    }
}

/// Result of matching a heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub title: String,
    pub icon: SectionIcon,
    /// Text after the heading on the same line, if any.
    pub first_line: Option<String>,
}

// Order matters: the first matching rule wins. Within a rule, longer
// aliases come first.
static HEADING_RULES: Lazy<Vec<HeadingRule>> = Lazy::new(|| {
    vec![
        HeadingRule::day(),
        HeadingRule::label(
            r"activities\s*(?:&|and)\s*attractions|activities|attractions",
            "Activities",
            SectionIcon::MapPin,
        ),
        HeadingRule::label(
            r"food\s+recommendations|food",
            "Food Recommendations",
            SectionIcon::Utensils,
        ),
        HeadingRule::label(
            r"hotel\s+suggestions|hotels|accommodations?",
            "Hotel Suggestions",
            SectionIcon::Bed,
        ),
        HeadingRule::label(r"local\s+tips|tips", "Local Tips", SectionIcon::Lightbulb),
        HeadingRule::label(r"transportation", "Transportation", SectionIcon::Car),
    ]
});

/// The heading table, in evaluation order.
pub fn heading_rules() -> &'static [HeadingRule] {
    &HEADING_RULES
}

/// Returns the first rule match for `line`, if any.
pub fn match_heading(line: &str) -> Option<HeadingMatch> {
    heading_rules().iter().find_map(|rule| rule.apply(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_rule_is_first() {
        let rules = heading_rules();
        assert_eq!(rules[0].icon(), SectionIcon::Calendar);
        assert_eq!(rules[0].canonical_title(), None);
    }

    #[test]
    fn test_day_title_keeps_number_and_drops_trailing_colon() {
        let matched = match_heading("Day 12:").unwrap();
        assert_eq!(matched.title, "Day 12");
        assert_eq!(matched.first_line, None);

        let matched = match_heading("day 4: Nara day trip").unwrap();
        assert_eq!(matched.title, "day 4: Nara day trip");
    }

    #[test]
    fn test_day_title_drops_only_one_colon() {
        assert_eq!(match_heading("Day 2::").unwrap().title, "Day 2:");
        assert_eq!(match_heading("Day 5 :").unwrap().title, "Day 5");
    }

    #[test]
    fn test_day_requires_a_number() {
        assert!(match_heading("Daytime markets are busy").is_none());
        assert!(match_heading("Day trip to Sintra").is_none());
    }

    #[test]
    fn test_label_with_trailing_text() {
        let matched = match_heading("Hotel Suggestions: Ryokan Kaede").unwrap();
        assert_eq!(matched.title, "Hotel Suggestions");
        assert_eq!(matched.first_line.as_deref(), Some("Ryokan Kaede"));
    }

    #[test]
    fn test_label_needs_word_boundary() {
        assert!(match_heading("Foodie walking tour").is_none());
        assert!(match_heading("Tipsy bar crawl").is_none());
    }

    #[test]
    fn test_combined_activities_label() {
        let matched = match_heading("Activities & Attractions:").unwrap();
        assert_eq!(matched.title, "Activities");
        assert_eq!(matched.first_line, None);
    }

    #[test]
    fn test_heading_must_start_the_line() {
        assert!(match_heading("Try the Food: market").is_none());
    }
}
