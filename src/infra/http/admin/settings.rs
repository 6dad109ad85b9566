use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::AdminSettingsError;
use crate::application::error::HttpError;
use crate::application::repos::SiteSettingsDraft;
use crate::domain::locale::LocalizedText;
use crate::presentation::admin::views::{SettingsFormView, SettingsTemplate};
use crate::presentation::views::render_template_response;

use super::state::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub email: String,
    pub location_uk: String,
    pub location_ru: String,
    pub location_en: String,
    pub instagram_url: String,
    pub telegram_user: String,
    pub phone: String,
}

impl SettingsForm {
    fn to_draft(&self) -> SiteSettingsDraft {
        SiteSettingsDraft {
            email: self.email.trim().to_owned(),
            location: LocalizedText::new(
                self.location_uk.trim(),
                self.location_ru.trim(),
                self.location_en.trim(),
            ),
            instagram_url: self.instagram_url.trim().to_owned(),
            telegram_user: self.telegram_user.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }

    fn to_view(&self) -> SettingsFormView {
        SettingsFormView {
            email: self.email.clone(),
            location_uk: self.location_uk.clone(),
            location_ru: self.location_ru.clone(),
            location_en: self.location_en.clone(),
            instagram_url: self.instagram_url.clone(),
            telegram_user: self.telegram_user.clone(),
            phone: self.phone.clone(),
        }
    }
}

pub async fn admin_settings(State(state): State<AdminState>) -> Response {
    match state.settings.load().await {
        Ok(record) => render_template_response(
            SettingsTemplate {
                form: SettingsFormView::from_record(&record),
                alert: None,
                saved: false,
            },
            StatusCode::OK,
        ),
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_settings_update(
    State(state): State<AdminState>,
    axum::Form(form): axum::Form<SettingsForm>,
) -> Response {
    match state.settings.update(form.to_draft()).await {
        Ok(record) => render_template_response(
            SettingsTemplate {
                form: SettingsFormView::from_record(&record),
                alert: None,
                saved: true,
            },
            StatusCode::OK,
        ),
        Err(AdminSettingsError::ConstraintViolation(message)) => render_template_response(
            SettingsTemplate {
                form: form.to_view(),
                alert: Some(message.to_owned()),
                saved: false,
            },
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(err) => admin_error_response(err),
    }
}

fn admin_error_response(err: AdminSettingsError) -> Response {
    const SOURCE: &str = "infra::http::admin::settings";
    match err {
        AdminSettingsError::ConstraintViolation(message) => {
            HttpError::new(SOURCE, StatusCode::UNPROCESSABLE_ENTITY, message, message)
                .into_response()
        }
        AdminSettingsError::Repo(err) => HttpError::from(err).into_response(),
    }
}
