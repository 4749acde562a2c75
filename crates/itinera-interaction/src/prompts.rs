//! Prompt templates and response schemas for the itinerary flows.
//!
//! Templates are Jinja (minijinja) so the wording lives apart from the code
//! that fills it in. Each flow has a fixed system instruction, a user-turn
//! template, and the JSON schema the model is asked to answer with.

use itinera_core::chat::ChatMessage;
use itinera_core::validation::TripPreferences;
use itinera_core::{ItineraError, Result};
use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde_json::{Value, json};

pub const GENERATE_SYSTEM: &str = "You are an expert travel planner. You write practical, \
well-paced day-by-day itineraries that respect the traveler's budget and interests.";

pub const REFINE_SYSTEM: &str = "You are an expert travel planner revising an itinerary you \
wrote earlier. Apply the traveler's feedback and keep everything they did not ask to change.";

pub const SUGGEST_SYSTEM: &str = "You suggest short travel interests (one to three words each) \
that help a traveler describe what they enjoy.";

const GENERATE_TEMPLATE: &str = r#"Create a {{ duration }}-day travel itinerary for {{ destination }}.

Traveler interests: {{ interests }}
Total budget: {{ budget }} {{ currency }}

Format rules:
- Start with a short overview paragraph.
- Give each day its own heading line, "Day 1:", "Day 2:" and so on, followed by that day's plan.
- Then add the headings "Food Recommendations:", "Hotel Suggestions:", "Local Tips:" and "Transportation:", each on its own line.
- Put list items on separate lines starting with "- ".
- Keep every cost estimate in {{ currency }}.

Answer with a JSON object whose "itinerary" field holds the full itinerary text."#;

const REFINE_TEMPLATE: &str = r#"Here is the current itinerary:

{{ existing_itinerary }}

Traveler feedback:
{{ user_feedback }}

Rewrite the complete itinerary with the feedback applied, keeping the same heading format.
Answer with a JSON object whose "refinedItinerary" field holds the full revised text."#;

const CHAT_SYSTEM_TEMPLATE: &str = r#"You are a friendly travel assistant helping a traveler with their trip to {{ destination }}.
Answer questions about the itinerary below. Be concise and specific. If a question is unrelated to the trip, steer back to it politely.

Itinerary:
{{ itinerary_content }}

Answer with a JSON object whose "response" field holds your reply."#;

const SUGGEST_TEMPLATE: &str = r#"The traveler is typing an interest: "{{ query }}".
{% if existing_interests %}They already listed: {{ existing_interests }}. Do not repeat those.
{% endif %}Suggest 3 to 5 related interests.
Answer with a JSON object whose "suggestions" field is a list of strings."#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("generate", GENERATE_TEMPLATE),
        ("refine", REFINE_TEMPLATE),
        ("chat_system", CHAT_SYSTEM_TEMPLATE),
        ("suggest", SUGGEST_TEMPLATE),
    ] {
        env.add_template(name, source)
            .expect("built-in prompt template is valid");
    }
    env
});

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    TEMPLATES
        .get_template(name)
        .and_then(|template| template.render(ctx))
        .map_err(|e| ItineraError::internal(format!("Failed to render prompt '{name}': {e}")))
}

/// Whole amounts print without decimals, others with two.
fn format_budget(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

pub fn generate_prompt(preferences: &TripPreferences) -> Result<String> {
    let currency = preferences
        .currency_code()
        .map(|c| c.code().to_string())
        .unwrap_or_else(|| preferences.currency.trim().to_uppercase());
    render(
        "generate",
        context! {
            destination => preferences.destination.trim(),
            interests => preferences.interests.trim(),
            currency => currency,
            budget => format_budget(preferences.budget_amount),
            duration => preferences.duration,
        },
    )
}

pub fn refine_prompt(existing_itinerary: &str, user_feedback: &str) -> Result<String> {
    render(
        "refine",
        context! {
            existing_itinerary => existing_itinerary,
            user_feedback => user_feedback.trim(),
        },
    )
}

/// The chat system turn embeds the itinerary; earlier messages travel as
/// conversation history, not in this text.
pub fn chat_system_instruction(destination: &str, itinerary_content: &str) -> Result<String> {
    render(
        "chat_system",
        context! {
            destination => destination,
            itinerary_content => itinerary_content,
        },
    )
}

pub fn suggest_prompt(query: &str, existing_interests: Option<&str>) -> Result<String> {
    let existing = existing_interests
        .map(str::trim)
        .filter(|interests| !interests.is_empty());
    render(
        "suggest",
        context! {
            query => query.trim(),
            existing_interests => existing,
        },
    )
}

fn single_string_schema(field: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": { field: { "type": "STRING" } },
        "required": [field],
    })
}

pub fn generate_schema() -> Value {
    single_string_schema("itinerary")
}

pub fn refine_schema() -> Value {
    single_string_schema("refinedItinerary")
}

pub fn chat_schema() -> Value {
    single_string_schema("response")
}

pub fn suggest_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["suggestions"],
    })
}

/// Drops history turns with no text; the model API rejects empty parts.
pub fn chat_history(history: &[ChatMessage]) -> Vec<ChatMessage> {
    history
        .iter()
        .filter(|message| !message.content.trim().is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferences() -> TripPreferences {
        TripPreferences {
            destination: "  Kyoto ".to_string(),
            interests: "temples, tea ceremonies".to_string(),
            currency: "jpy".to_string(),
            budget_amount: 250000.0,
            duration: 4,
        }
    }

    #[test]
    fn test_generate_prompt_carries_every_trip_field() {
        let prompt = generate_prompt(&preferences()).unwrap();
        assert!(prompt.starts_with("Create a 4-day travel itinerary for Kyoto."));
        assert!(prompt.contains("Traveler interests: temples, tea ceremonies"));
        assert!(prompt.contains("Total budget: 250000 JPY"));
        assert!(prompt.contains("\"Day 1:\""));
    }

    #[test]
    fn test_budget_formatting() {
        assert_eq!(format_budget(1500.0), "1500");
        assert_eq!(format_budget(99.5), "99.50");
    }

    #[test]
    fn test_suggest_prompt_mentions_existing_only_when_present() {
        let with = suggest_prompt("hik", Some("museums, food")).unwrap();
        assert!(with.contains("They already listed: museums, food."));

        let without = suggest_prompt("hik", Some("   ")).unwrap();
        assert!(!without.contains("already listed"));
        assert!(without.contains("\"hik\""));
    }

    #[test]
    fn test_chat_system_instruction_embeds_itinerary() {
        let text = chat_system_instruction("Lisbon", "Day 1: Alfama").unwrap();
        assert!(text.contains("trip to Lisbon"));
        assert!(text.contains("Day 1: Alfama"));
    }

    #[test]
    fn test_schemas_name_output_fields() {
        assert_eq!(refine_schema()["required"][0], "refinedItinerary");
        assert_eq!(suggest_schema()["properties"]["suggestions"]["type"], "ARRAY");
    }

    #[test]
    fn test_chat_history_skips_blank_turns() {
        let history = vec![
            ChatMessage::user("Where to eat?"),
            ChatMessage::model("  "),
            ChatMessage::model("Try Time Out Market."),
        ];
        assert_eq!(chat_history(&history).len(), 2);
    }
}
