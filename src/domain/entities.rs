//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::locale::{LocalizedList, LocalizedText};

/// A published before/after case study.
///
/// The `legacy_*` fields are single-locale columns retained from early
/// records; display always goes through the [`LocalizedText::localize`]
/// fallback chain so old rows keep rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyRecord {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub client: String,
    pub title: LocalizedText,
    pub legacy_title: Option<String>,
    pub category_label: LocalizedText,
    pub legacy_category: Option<String>,
    pub description: LocalizedText,
    pub legacy_description: Option<String>,
    pub services: LocalizedList,
    pub legacy_services: Option<Vec<String>>,
    pub content: LocalizedText,
    pub before_image: String,
    pub after_image: String,
    pub additional_images: Vec<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: LocalizedText,
    pub created_at: OffsetDateTime,
}

/// Site-wide contact details shown in the footer and contact section.
/// Stored as a single row, upserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettingsRecord {
    pub email: String,
    pub location: LocalizedText,
    pub instagram_url: String,
    pub telegram_user: String,
    pub phone: String,
    pub updated_at: OffsetDateTime,
}

impl SiteSettingsRecord {
    /// Placeholder row used until the admin saves real settings.
    pub fn placeholder() -> SiteSettingsRecord {
        SiteSettingsRecord {
            email: String::new(),
            location: LocalizedText::default(),
            instagram_url: String::new(),
            telegram_user: String::new(),
            phone: String::new(),
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}
