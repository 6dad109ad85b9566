//! Admin-panel templates and view models. The admin UI is single-locale;
//! per-locale content is edited through explicit uk/ru/en fields.

use askama::Template;
use time::OffsetDateTime;
use time::macros::format_description;
use uuid::Uuid;

use crate::application::admin::dashboard::DashboardCounts;
use crate::domain::entities::{CaseStudyRecord, CategoryRecord, SiteSettingsRecord};
use crate::domain::locale::Locale;

fn format_date(value: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    value.format(&format).unwrap_or_else(|_| value.to_string())
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub counts: DashboardCounts,
}

#[derive(Clone)]
pub struct CaseStudyRowView {
    pub id: Uuid,
    pub title: String,
    pub client: String,
    pub category: String,
    pub created_at: String,
}

impl CaseStudyRowView {
    pub fn from_record(record: &CaseStudyRecord) -> CaseStudyRowView {
        CaseStudyRowView {
            id: record.id,
            title: record
                .title
                .localize(record.legacy_title.as_deref(), Locale::En)
                .to_owned(),
            client: record.client.clone(),
            category: record
                .category_label
                .localize(record.legacy_category.as_deref(), Locale::En)
                .to_owned(),
            created_at: format_date(record.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/case_studies.html")]
pub struct CaseStudyListTemplate {
    pub studies: Vec<CaseStudyRowView>,
    pub alert: Option<String>,
}

#[derive(Clone)]
pub struct CategoryOptionView {
    pub id: Uuid,
    pub name: String,
    pub selected: bool,
}

/// Form echo for the case-study editor; every field is the raw string the
/// admin typed so a failed save re-renders losslessly.
#[derive(Clone, Default)]
pub struct CaseStudyFormView {
    pub client: String,
    pub title_uk: String,
    pub title_ru: String,
    pub title_en: String,
    pub category_uk: String,
    pub category_ru: String,
    pub category_en: String,
    pub description_uk: String,
    pub description_ru: String,
    pub description_en: String,
    pub services_uk: String,
    pub services_ru: String,
    pub services_en: String,
    pub content_uk: String,
    pub content_ru: String,
    pub content_en: String,
    pub before_image: String,
    pub after_image: String,
    pub additional_images: String,
}

impl CaseStudyFormView {
    pub fn from_record(record: &CaseStudyRecord) -> CaseStudyFormView {
        CaseStudyFormView {
            client: record.client.clone(),
            title_uk: record.title.uk.clone(),
            title_ru: record.title.ru.clone(),
            title_en: record.title.en.clone(),
            category_uk: record.category_label.uk.clone(),
            category_ru: record.category_label.ru.clone(),
            category_en: record.category_label.en.clone(),
            description_uk: record.description.uk.clone(),
            description_ru: record.description.ru.clone(),
            description_en: record.description.en.clone(),
            services_uk: record.services.uk.join("\n"),
            services_ru: record.services.ru.join("\n"),
            services_en: record.services.en.join("\n"),
            content_uk: record.content.uk.clone(),
            content_ru: record.content.ru.clone(),
            content_en: record.content.en.clone(),
            before_image: record.before_image.clone(),
            after_image: record.after_image.clone(),
            additional_images: record.additional_images.join("\n"),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/case_study_form.html")]
pub struct CaseStudyFormTemplate {
    pub heading: &'static str,
    pub action: String,
    pub form: CaseStudyFormView,
    pub categories: Vec<CategoryOptionView>,
    pub alert: Option<String>,
}

#[derive(Clone)]
pub struct CategoryRowView {
    pub id: Uuid,
    pub name_uk: String,
    pub name_ru: String,
    pub name_en: String,
    pub created_at: String,
}

impl CategoryRowView {
    pub fn from_record(record: &CategoryRecord) -> CategoryRowView {
        CategoryRowView {
            id: record.id,
            name_uk: record.name.uk.clone(),
            name_ru: record.name.ru.clone(),
            name_en: record.name.en.clone(),
            created_at: format_date(record.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/categories.html")]
pub struct CategoriesTemplate {
    pub categories: Vec<CategoryRowView>,
    pub alert: Option<String>,
}

#[derive(Clone, Default)]
pub struct SettingsFormView {
    pub email: String,
    pub location_uk: String,
    pub location_ru: String,
    pub location_en: String,
    pub instagram_url: String,
    pub telegram_user: String,
    pub phone: String,
}

impl SettingsFormView {
    pub fn from_record(record: &SiteSettingsRecord) -> SettingsFormView {
        SettingsFormView {
            email: record.email.clone(),
            location_uk: record.location.uk.clone(),
            location_ru: record.location.ru.clone(),
            location_en: record.location.en.clone(),
            instagram_url: record.instagram_url.clone(),
            telegram_user: record.telegram_user.clone(),
            phone: record.phone.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub form: SettingsFormView,
    pub alert: Option<String>,
    pub saved: bool,
}
