//! Public-site templates and view models.

use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};
use crate::application::showcase::{ProjectView, ShowcaseGroup};
use crate::domain::entities::SiteSettingsRecord;
use crate::domain::locale::{Locale, Translations, translations};
use crate::domain::slider::ComparisonSlider;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: SiteChrome) -> Response {
    let mut response =
        render_template_response(NotFoundTemplate { chrome }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Localized site settings for the footer and contact section.
#[derive(Clone)]
pub struct SettingsView {
    pub email: String,
    pub location: String,
    pub instagram_url: String,
    pub telegram_user: String,
    pub phone: String,
}

/// Initial markup values for a comparison slider, taken from the
/// authoritative state machine so server-rendered widgets agree with the
/// browser mirror.
#[derive(Clone, Copy)]
pub struct SliderInit {
    pub position: f64,
    pub clip_right: f64,
}

impl SliderInit {
    pub fn centered() -> SliderInit {
        let slider = ComparisonSlider::new();
        SliderInit {
            position: slider.divider_left_percent(),
            clip_right: slider.clip_right_percent(),
        }
    }
}

/// Everything the shared page frame needs.
#[derive(Clone)]
pub struct SiteChrome {
    pub lang: &'static str,
    pub t: &'static Translations,
    pub settings: SettingsView,
}

impl SiteChrome {
    pub fn new(locale: Locale, settings: &SiteSettingsRecord) -> SiteChrome {
        SiteChrome {
            lang: locale.as_str(),
            t: translations(locale),
            settings: SettingsView {
                email: settings.email.clone(),
                location: settings.location.localize(None, locale).to_owned(),
                instagram_url: settings.instagram_url.clone(),
                telegram_user: settings.telegram_user.clone(),
                phone: settings.phone.clone(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub chrome: SiteChrome,
    pub groups: Vec<ShowcaseGroup>,
    pub slider: SliderInit,
    pub degraded: bool,
}

#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectTemplate {
    pub chrome: SiteChrome,
    pub project: ProjectView,
    pub slider: SliderInit,
}

#[derive(Template)]
#[template(path = "privacy.html")]
pub struct PrivacyTemplate {
    pub chrome: SiteChrome,
}

#[derive(Template)]
#[template(path = "cookies.html")]
pub struct CookiesTemplate {
    pub chrome: SiteChrome,
}

#[derive(Template)]
#[template(path = "thanks.html")]
pub struct ThanksTemplate {
    pub chrome: SiteChrome,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: SiteChrome,
}
