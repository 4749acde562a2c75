//! Itinerary domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Currencies accepted for a trip budget.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
    Aud,
    Cad,
    Chf,
    Cny,
    Mxn,
}

impl Currency {
    const ALL: [Currency; 10] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Inr,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Mxn,
    ];

    pub fn all() -> &'static [Currency] {
        &Self::ALL
    }

    /// ISO 4217 code, e.g. `"USD"`.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Mxn => "MXN",
        }
    }
}

/// A generated itinerary saved in a user's history.
///
/// Records are never edited in place. A refined itinerary is saved as a new
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRecord {
    /// Time-plus-random identifier, unique within the store.
    pub id: String,
    pub destination: String,
    pub generated_date: DateTime<Utc>,
    /// Raw text returned by the model.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_amount: Option<f64>,
    /// Trip length in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

/// An itinerary before the repository assigns its id and date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItinerary {
    pub destination: String,
    pub content: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub budget_amount: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub interests: Option<String>,
}

impl NewItinerary {
    pub fn new(destination: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Completes the record with the identity assigned at save time.
    pub fn into_record(self, id: String, generated_date: DateTime<Utc>) -> ItineraryRecord {
        ItineraryRecord {
            id,
            destination: self.destination,
            generated_date,
            content: self.content,
            currency: self.currency,
            budget_amount: self.budget_amount,
            duration: self.duration,
            interests: self.interests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_parsing_and_display() {
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("GBP").unwrap(), Currency::Gbp);
        assert!(Currency::from_str("BTC").is_err());
        assert_eq!(Currency::Jpy.to_string(), "JPY");
        for currency in Currency::all() {
            assert_eq!(currency.as_ref(), currency.code());
        }
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let record = NewItinerary {
            destination: "Lisbon".to_string(),
            content: "Day 1: Alfama".to_string(),
            budget_amount: Some(1500.0),
            ..Default::default()
        }
        .into_record("1-abc".to_string(), Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("generatedDate").is_some());
        assert_eq!(json["budgetAmount"], 1500.0);
        assert!(json.get("currency").is_none());
    }

    #[test]
    fn test_record_reads_minimal_json() {
        let json = r#"{"id":"x","destination":"Oslo","generatedDate":"2024-05-01T10:00:00Z","content":"hi"}"#;
        let record: ItineraryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.destination, "Oslo");
        assert_eq!(record.duration, None);
    }
}
