//! Cookie-consent classification and the stored consent record.
//!
//! Jurisdictions fall into three tiers: GDPR-style regimes get a blocking
//! banner with granular choices, the US gets a dismissible notice, and the
//! rest of the world gets nothing. Classification is by ISO 3166-1 alpha-2
//! country code; when geolocation fails the caller may fall back to a small
//! language-to-country table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentRequirement {
    /// Explicit opt-in required before optional cookies (EU/EEA, GB, BR,
    /// KR, CH, NO, IS, LI).
    Required,
    /// Notice-only regime (US).
    Notification,
    /// No banner.
    None,
}

impl ConsentRequirement {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsentRequirement::Required => "required",
            ConsentRequirement::Notification => "notification",
            ConsentRequirement::None => "none",
        }
    }
}

/// EU member states.
const EU_MEMBERS: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

/// Non-EU jurisdictions with GDPR-equivalent consent rules.
const OTHER_REQUIRED: [&str; 7] = ["GB", "BR", "KR", "CH", "NO", "IS", "LI"];

pub fn classify(country_code: &str) -> ConsentRequirement {
    let code = country_code.trim().to_ascii_uppercase();
    if EU_MEMBERS.contains(&code.as_str()) || OTHER_REQUIRED.contains(&code.as_str()) {
        ConsentRequirement::Required
    } else if code == "US" {
        ConsentRequirement::Notification
    } else {
        ConsentRequirement::None
    }
}

/// Guess a country from a browser language tag when geolocation fails.
/// Region-qualified English and Portuguese are distinguished; otherwise the
/// primary subtag decides.
pub fn country_for_language(tag: &str) -> Option<&'static str> {
    let tag = tag.trim();
    match tag {
        "en-GB" => return Some("GB"),
        "en-US" => return Some("US"),
        "pt-BR" => return Some("BR"),
        _ => {}
    }
    let primary = tag.split(['-', '_']).next().unwrap_or("");
    match primary.to_ascii_lowercase().as_str() {
        "uk" => Some("UA"),
        "ru" => Some("RU"),
        "de" => Some("DE"),
        "fr" => Some("FR"),
        "es" => Some("ES"),
        "it" => Some("IT"),
        "pt" => Some("PT"),
        "nl" => Some("NL"),
        "pl" => Some("PL"),
        "ko" => Some("KR"),
        _ => None,
    }
}

/// Per-category grants. `necessary` is always true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentCategories {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl ConsentCategories {
    pub fn new(analytics: bool, marketing: bool) -> ConsentCategories {
        ConsentCategories {
            necessary: true,
            analytics,
            marketing,
        }
    }

    pub fn all() -> ConsentCategories {
        ConsentCategories::new(true, true)
    }

    pub fn none() -> ConsentCategories {
        ConsentCategories::new(false, false)
    }
}

/// The visitor's stored consent decision. `accepted` means "the visitor
/// responded to the banner", not "everything was granted"; the category
/// booleans carry the actual grants. Overwritten on every new choice, never
/// expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub accepted: bool,
    pub categories: ConsentCategories,
    pub timestamp_ms: u64,
    pub requirement: ConsentRequirement,
}

impl ConsentRecord {
    pub fn accept_all(requirement: ConsentRequirement, timestamp_ms: u64) -> ConsentRecord {
        ConsentRecord {
            accepted: true,
            categories: ConsentCategories::all(),
            timestamp_ms,
            requirement,
        }
    }

    pub fn reject_all(requirement: ConsentRequirement, timestamp_ms: u64) -> ConsentRecord {
        ConsentRecord {
            accepted: true,
            categories: ConsentCategories::none(),
            timestamp_ms,
            requirement,
        }
    }

    pub fn custom(
        categories: ConsentCategories,
        requirement: ConsentRequirement,
        timestamp_ms: u64,
    ) -> ConsentRecord {
        ConsentRecord {
            accepted: true,
            categories: ConsentCategories::new(categories.analytics, categories.marketing),
            timestamp_ms,
            requirement,
        }
    }
}

/// The banner shows only where a requirement applies and the visitor has not
/// yet responded.
pub fn banner_visible(requirement: ConsentRequirement, prior: Option<&ConsentRecord>) -> bool {
    if requirement == ConsentRequirement::None {
        return false;
    }
    !prior.is_some_and(|record| record.accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_tiers() {
        assert_eq!(classify("DE"), ConsentRequirement::Required);
        assert_eq!(classify("fr"), ConsentRequirement::Required);
        assert_eq!(classify("GB"), ConsentRequirement::Required);
        assert_eq!(classify("BR"), ConsentRequirement::Required);
        assert_eq!(classify("US"), ConsentRequirement::Notification);
        assert_eq!(classify("UA"), ConsentRequirement::None);
        assert_eq!(classify(""), ConsentRequirement::None);
    }

    #[test]
    fn all_eu_members_require_consent() {
        for code in EU_MEMBERS {
            assert_eq!(classify(code), ConsentRequirement::Required, "{code}");
        }
    }

    #[test]
    fn language_fallback_table() {
        assert_eq!(country_for_language("uk-UA"), Some("UA"));
        assert_eq!(country_for_language("de"), Some("DE"));
        assert_eq!(country_for_language("en-GB"), Some("GB"));
        assert_eq!(country_for_language("en-US"), Some("US"));
        assert_eq!(country_for_language("en"), None);
        assert_eq!(country_for_language("pt-BR"), Some("BR"));
        assert_eq!(country_for_language("pt-PT"), Some("PT"));
        assert_eq!(country_for_language("ja"), None);
    }

    #[test]
    fn reject_all_still_counts_as_a_response() {
        let record = ConsentRecord::reject_all(ConsentRequirement::Required, 1_700_000_000_000);
        assert!(record.accepted);
        assert!(record.categories.necessary);
        assert!(!record.categories.analytics);
        assert!(!record.categories.marketing);
    }

    #[test]
    fn custom_choice_cannot_drop_necessary() {
        let sneaky = ConsentCategories {
            necessary: false,
            analytics: true,
            marketing: false,
        };
        let record = ConsentRecord::custom(sneaky, ConsentRequirement::Required, 0);
        assert!(record.categories.necessary);
        assert!(record.categories.analytics);
    }

    #[test]
    fn banner_visibility() {
        let accepted = ConsentRecord::accept_all(ConsentRequirement::Required, 0);
        assert!(banner_visible(ConsentRequirement::Required, None));
        assert!(banner_visible(ConsentRequirement::Notification, None));
        assert!(!banner_visible(ConsentRequirement::Required, Some(&accepted)));
        assert!(!banner_visible(ConsentRequirement::None, None));

        let rejected = ConsentRecord::reject_all(ConsentRequirement::Required, 0);
        assert!(!banner_visible(ConsentRequirement::Required, Some(&rejected)));
    }
}
