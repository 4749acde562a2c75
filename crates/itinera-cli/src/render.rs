//! Terminal rendering of itineraries and chat turns.

use colored::Colorize;
use itinera_core::chat::{ChatMessage, ChatRole};
use itinera_core::itinerary::ItineraryRecord;
use itinera_core::segment::{DisplayLine, Section, SectionIcon, display_line, segment};

pub fn icon_glyph(icon: SectionIcon) -> &'static str {
    match icon {
        SectionIcon::Info => "ℹ️ ",
        SectionIcon::Calendar => "📅",
        SectionIcon::MapPin => "📍",
        SectionIcon::Utensils => "🍴",
        SectionIcon::Bed => "🛏️ ",
        SectionIcon::Lightbulb => "💡",
        SectionIcon::Car => "🚗",
        SectionIcon::FileText => "📄",
    }
}

fn format_section(section: &Section) -> String {
    let mut out = format!(
        "{} {}\n",
        icon_glyph(section.icon),
        section.title.bold().bright_cyan()
    );
    for line in &section.content {
        let rendered = match display_line(line) {
            bullet @ DisplayLine::Bullet(_) => format!("  {}", bullet.to_string().green()),
            text @ DisplayLine::Text(_) => format!("  {text}"),
        };
        out.push_str(&rendered);
        out.push('\n');
    }
    out
}

/// Itinerary text split into sections, one block per section.
pub fn format_itinerary(content: &str) -> String {
    segment(content)
        .iter()
        .map(format_section)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_itinerary(content: &str) {
    print!("{}", format_itinerary(content));
}

/// One line per record for `itinera list`.
pub fn format_summary(record: &ItineraryRecord) -> String {
    let mut details = Vec::new();
    if let Some(days) = record.duration {
        details.push(format!("{days} days"));
    }
    if let (Some(amount), Some(currency)) = (record.budget_amount, record.currency.as_deref()) {
        details.push(format!("{amount} {currency}"));
    }
    let local = record.generated_date.with_timezone(&chrono::Local);

    let mut line = format!(
        "{}  {}  {}",
        record.id.bright_black(),
        local.format("%Y-%m-%d %H:%M"),
        record.destination.bold()
    );
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    line
}

pub fn print_chat_message(message: &ChatMessage) {
    match message.role {
        ChatRole::User => println!("{} {}", "you>".green().bold(), message.content),
        ChatRole::Model => {
            println!("{}", "guide>".bright_magenta().bold());
            for line in message.content.lines() {
                println!("  {}", display_line(line).to_string().bright_blue());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::itinerary::NewItinerary;

    #[test]
    fn test_format_itinerary_shows_sections_and_bullets() {
        let text = "A sunny long weekend.\nDay 1: Arrival\n- Check in\nFood: Try bifanas";
        let rendered = format_itinerary(text);

        assert!(rendered.contains("Overview"));
        assert!(rendered.contains("Day 1: Arrival"));
        assert!(rendered.contains("• Check in"));
        assert!(!rendered.contains("- Check in"));
        assert!(rendered.contains("Food Recommendations"));
        assert!(rendered.contains("Try bifanas"));
    }

    #[test]
    fn test_every_icon_has_a_glyph() {
        for icon in [
            SectionIcon::Info,
            SectionIcon::Calendar,
            SectionIcon::MapPin,
            SectionIcon::Utensils,
            SectionIcon::Bed,
            SectionIcon::Lightbulb,
            SectionIcon::Car,
            SectionIcon::FileText,
        ] {
            assert!(!icon_glyph(icon).trim().is_empty());
        }
    }

    #[test]
    fn test_summary_lists_trip_details() {
        let record = NewItinerary {
            destination: "Lisbon".to_string(),
            content: String::new(),
            currency: Some("EUR".to_string()),
            budget_amount: Some(1200.0),
            duration: Some(3),
            interests: None,
        }
        .into_record("17-abc".to_string(), chrono::Utc::now());

        let summary = format_summary(&record);
        assert!(summary.contains("17-abc"));
        assert!(summary.contains("Lisbon"));
        assert!(summary.contains("3 days, 1200 EUR"));
    }
}
