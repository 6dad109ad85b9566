//! Contact form validation and submit lifecycle.
//!
//! Validation is pure and deterministic so the browser mirror in
//! `static/public/app.js` and the tests here agree on every rule. The form
//! itself is a small state machine: `Idle -> Submitting -> Success | Error`,
//! with a timed reset back to `Idle` and optimistic per-field error
//! clearing while the visitor types.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::locale::Translations;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

/// How long a Success/Error banner stays up before the form returns to Idle.
pub const STATUS_RESET_DELAY: Duration = Duration::from_millis(5_000);

/// `@username` or a bare phone number.
static TELEGRAM_CONTACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(@[A-Za-z0-9_]+|[0-9]+)$").expect("valid telegram contact regex"));

/// `@username`, dots allowed.
static INSTAGRAM_CONTACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[A-Za-z0-9_.]+$").expect("valid instagram contact regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Telegram,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Telegram => "telegram",
        }
    }

    pub fn from_str(value: &str) -> Option<Platform> {
        match value {
            "instagram" => Some(Platform::Instagram),
            "telegram" => Some(Platform::Telegram),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Platform,
    Contact,
    Message,
}

/// Stable identifiers for each validation failure. The `key` values appear
/// in the rendered form's data attributes so the browser mirror can map
/// them back to fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    NameRequired,
    NameMin,
    PlatformRequired,
    ContactRequired,
    TelegramFormat,
    InstagramFormat,
    MessageMin,
}

impl ValidationCode {
    pub fn key(self) -> &'static str {
        match self {
            ValidationCode::NameRequired => "nameRequired",
            ValidationCode::NameMin => "nameMin",
            ValidationCode::PlatformRequired => "platformRequired",
            ValidationCode::ContactRequired => "contactRequired",
            ValidationCode::TelegramFormat => "telegramFormat",
            ValidationCode::InstagramFormat => "instagramFormat",
            ValidationCode::MessageMin => "messageMin",
        }
    }

    pub fn message(self, t: &Translations) -> &'static str {
        match self {
            ValidationCode::NameRequired => t.name_required,
            ValidationCode::NameMin => t.name_min,
            ValidationCode::PlatformRequired => t.platform_required,
            ValidationCode::ContactRequired => t.contact_required,
            ValidationCode::TelegramFormat => t.telegram_format,
            ValidationCode::InstagramFormat => t.instagram_format,
            ValidationCode::MessageMin => t.message_min,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub platform: Option<Platform>,
    pub contact: String,
    pub message: String,
}

/// Validate all fields at once. At most one code per field; the first
/// failing rule for a field wins.
pub fn validate(fields: &ContactFields) -> BTreeMap<ContactField, ValidationCode> {
    let mut errors = BTreeMap::new();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.insert(ContactField::Name, ValidationCode::NameRequired);
    } else if name.chars().count() < NAME_MIN_CHARS {
        errors.insert(ContactField::Name, ValidationCode::NameMin);
    }

    if fields.platform.is_none() {
        errors.insert(ContactField::Platform, ValidationCode::PlatformRequired);
    }

    let contact = fields.contact.trim();
    if contact.is_empty() {
        errors.insert(ContactField::Contact, ValidationCode::ContactRequired);
    } else {
        match fields.platform {
            Some(Platform::Telegram) if !TELEGRAM_CONTACT.is_match(contact) => {
                errors.insert(ContactField::Contact, ValidationCode::TelegramFormat);
            }
            Some(Platform::Instagram) if !INSTAGRAM_CONTACT.is_match(contact) => {
                errors.insert(ContactField::Contact, ValidationCode::InstagramFormat);
            }
            _ => {}
        }
    }

    let message = fields.message.trim();
    if !message.is_empty() && message.chars().count() < MESSAGE_MIN_CHARS {
        errors.insert(ContactField::Message, ValidationCode::MessageMin);
    }

    errors
}

/// A validated, trimmed lead ready for delivery. `message` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub platform: Platform,
    pub contact: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: ContactFields,
    errors: BTreeMap<ContactField, ValidationCode>,
    status: SubmitStatus,
    status_since: Option<Instant>,
}

impl Default for ContactForm {
    fn default() -> Self {
        ContactForm::new()
    }
}

impl ContactForm {
    pub fn new() -> ContactForm {
        ContactForm {
            fields: ContactFields::default(),
            errors: BTreeMap::new(),
            status: SubmitStatus::Idle,
            status_since: None,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn errors(&self) -> &BTreeMap<ContactField, ValidationCode> {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    // Editing a field optimistically clears only that field's error; the
    // rest stay until the next submit.

    pub fn set_name(&mut self, value: &str) {
        self.fields.name = value.to_owned();
        self.errors.remove(&ContactField::Name);
    }

    pub fn set_platform(&mut self, value: Option<Platform>) {
        self.fields.platform = value;
        self.errors.remove(&ContactField::Platform);
    }

    pub fn set_contact(&mut self, value: &str) {
        self.fields.contact = value.to_owned();
        self.errors.remove(&ContactField::Contact);
    }

    pub fn set_message(&mut self, value: &str) {
        self.fields.message = value.to_owned();
        self.errors.remove(&ContactField::Message);
    }

    /// Attempt a submit. On validation failure the errors are recorded and
    /// the form stays Idle; otherwise a trimmed draft is handed out and the
    /// form enters Submitting.
    pub fn begin_submit(&mut self) -> Option<LeadDraft> {
        if self.status == SubmitStatus::Submitting {
            return None;
        }
        let errors = validate(&self.fields);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.status = SubmitStatus::Submitting;
        self.status_since = None;
        let platform = self.fields.platform?;
        Some(LeadDraft {
            name: self.fields.name.trim().to_owned(),
            platform,
            contact: self.fields.contact.trim().to_owned(),
            message: self.fields.message.trim().to_owned(),
        })
    }

    /// Delivery succeeded: show the success banner and clear the form.
    pub fn complete_success(&mut self, now: Instant) {
        self.fields = ContactFields::default();
        self.errors.clear();
        self.status = SubmitStatus::Success;
        self.status_since = Some(now);
    }

    /// Delivery failed: show the error banner, keep what the visitor typed.
    pub fn complete_error(&mut self, now: Instant) {
        self.status = SubmitStatus::Error;
        self.status_since = Some(now);
    }

    /// Advance the timed reset: a Success/Error banner older than
    /// [`STATUS_RESET_DELAY`] drops back to Idle.
    pub fn poll(&mut self, now: Instant) {
        if matches!(self.status, SubmitStatus::Success | SubmitStatus::Error)
            && self
                .status_since
                .is_some_and(|since| now.duration_since(since) >= STATUS_RESET_DELAY)
        {
            self.status = SubmitStatus::Idle;
            self.status_since = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> ContactFields {
        ContactFields {
            name: "Anna".into(),
            platform: Some(Platform::Telegram),
            contact: "@anna_retouch".into(),
            message: String::new(),
        }
    }

    #[test]
    fn empty_form_fails_on_required_fields() {
        let errors = validate(&ContactFields::default());
        assert_eq!(
            errors.get(&ContactField::Name),
            Some(&ValidationCode::NameRequired)
        );
        assert_eq!(
            errors.get(&ContactField::Platform),
            Some(&ValidationCode::PlatformRequired)
        );
        assert_eq!(
            errors.get(&ContactField::Contact),
            Some(&ValidationCode::ContactRequired)
        );
        assert!(!errors.contains_key(&ContactField::Message));
    }

    #[test]
    fn telegram_accepts_usernames_and_phone_numbers() {
        let mut fields = valid_fields();
        for contact in ["@anna_retouch", "@A1", "380501234567"] {
            fields.contact = contact.into();
            assert!(validate(&fields).is_empty(), "{contact}");
        }
        for contact in ["anna", "@anna.retouch", "+380501234567", "@"] {
            fields.contact = contact.into();
            assert_eq!(
                validate(&fields).get(&ContactField::Contact),
                Some(&ValidationCode::TelegramFormat),
                "{contact}"
            );
        }
    }

    #[test]
    fn instagram_requires_a_handle_with_dots_allowed() {
        let mut fields = valid_fields();
        fields.platform = Some(Platform::Instagram);
        for contact in ["@anna.retouch", "@anna_retouch", "@a.b.c"] {
            fields.contact = contact.into();
            assert!(validate(&fields).is_empty(), "{contact}");
        }
        for contact in ["anna.retouch", "380501234567", "@anna retouch"] {
            fields.contact = contact.into();
            assert_eq!(
                validate(&fields).get(&ContactField::Contact),
                Some(&ValidationCode::InstagramFormat),
                "{contact}"
            );
        }
    }

    #[test]
    fn telegram_username_valid_for_telegram_fails_for_instagram() {
        // The worked example: a phone number is fine on Telegram, never on
        // Instagram.
        let mut fields = valid_fields();
        fields.contact = "380501234567".into();
        assert!(validate(&fields).is_empty());
        fields.platform = Some(Platform::Instagram);
        assert_eq!(
            validate(&fields).get(&ContactField::Contact),
            Some(&ValidationCode::InstagramFormat)
        );
    }

    #[test]
    fn short_name_and_short_message() {
        let mut fields = valid_fields();
        fields.name = " A ".into();
        fields.message = "hi there".into();
        let errors = validate(&fields);
        assert_eq!(errors.get(&ContactField::Name), Some(&ValidationCode::NameMin));
        assert_eq!(
            errors.get(&ContactField::Message),
            Some(&ValidationCode::MessageMin)
        );
    }

    #[test]
    fn empty_message_is_allowed() {
        let mut fields = valid_fields();
        fields.message = "   ".into();
        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn validation_is_pure() {
        let fields = valid_fields();
        assert_eq!(validate(&fields), validate(&fields));
    }

    #[test]
    fn submit_with_errors_stays_idle_and_records_them() {
        let mut form = ContactForm::new();
        form.set_name("Anna");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert!(form.errors().contains_key(&ContactField::Platform));
        assert!(form.errors().contains_key(&ContactField::Contact));
    }

    #[test]
    fn editing_a_field_clears_only_its_own_error() {
        let mut form = ContactForm::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors().len(), 3);
        form.set_contact("@anna");
        assert!(!form.errors().contains_key(&ContactField::Contact));
        assert!(form.errors().contains_key(&ContactField::Name));
        assert!(form.errors().contains_key(&ContactField::Platform));
    }

    #[test]
    fn successful_cycle_clears_fields_and_resets_after_delay() {
        let mut form = ContactForm::new();
        form.set_name("  Anna  ");
        form.set_platform(Some(Platform::Telegram));
        form.set_contact(" @anna ");
        form.set_message("  please retouch my wedding photos  ");

        let draft = form.begin_submit().expect("draft");
        assert_eq!(form.status(), SubmitStatus::Submitting);
        assert_eq!(draft.name, "Anna");
        assert_eq!(draft.contact, "@anna");
        assert_eq!(draft.message, "please retouch my wedding photos");

        let now = Instant::now();
        form.complete_success(now);
        assert_eq!(form.status(), SubmitStatus::Success);
        assert_eq!(form.fields(), &ContactFields::default());

        form.poll(now + Duration::from_millis(4_999));
        assert_eq!(form.status(), SubmitStatus::Success);
        form.poll(now + STATUS_RESET_DELAY);
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn failed_cycle_preserves_fields() {
        let mut form = ContactForm::new();
        form.set_name("Anna");
        form.set_platform(Some(Platform::Instagram));
        form.set_contact("@anna.retouch");
        let draft = form.begin_submit();
        assert!(draft.is_some());

        let now = Instant::now();
        form.complete_error(now);
        assert_eq!(form.status(), SubmitStatus::Error);
        assert_eq!(form.fields().name, "Anna");
        assert_eq!(form.fields().contact, "@anna.retouch");

        form.poll(now + STATUS_RESET_DELAY);
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.fields().name, "Anna");
    }

    #[test]
    fn double_submit_is_ignored_while_in_flight() {
        let mut form = ContactForm::new();
        form.set_name("Anna");
        form.set_platform(Some(Platform::Telegram));
        form.set_contact("@anna");
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), SubmitStatus::Submitting);
    }
}
