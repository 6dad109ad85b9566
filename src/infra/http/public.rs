use std::{io::ErrorKind, net::IpAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{
        HeaderMap, Request, StatusCode,
        header::{ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use lustro_api_types::{ConsentClassification, LeadAccepted, LeadRejected, LeadRequest};

use crate::{
    application::{
        error::{ErrorReport, HttpError},
        geo::GeoService,
        leads::{LeadError, LeadService},
        repos::{HealthRepo, SettingsRepo},
        showcase::ShowcaseService,
    },
    domain::{entities::SiteSettingsRecord, locale::Locale},
    infra::uploads::{UploadStorage, UploadStorageError},
    presentation::views::{
        CookiesTemplate, IndexTemplate, PrivacyTemplate, ProjectTemplate, SiteChrome, SliderInit,
        ThanksTemplate, render_not_found_response, render_template_response,
    },
};

use super::{
    LANG_COOKIE, db_health_response,
    middleware::{log_responses, set_request_context},
};

#[derive(Clone)]
pub struct PublicState {
    pub showcase: Arc<ShowcaseService>,
    pub settings: Arc<dyn SettingsRepo>,
    pub leads: Arc<LeadService>,
    pub geo: Arc<GeoService>,
    pub health: Arc<dyn HealthRepo>,
    pub upload_storage: Arc<UploadStorage>,
}

pub fn build_router(state: PublicState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/projects/{id}", get(project_detail))
        .route("/privacy", get(privacy))
        .route("/cookies", get(cookies))
        .route("/thanks", get(thanks))
        .route("/locale", post(set_locale))
        .route("/api/consent", get(consent))
        .route("/api/leads", post(submit_lead))
        .route("/uploads/{*path}", get(serve_upload))
        .route(
            "/static/public/{*path}",
            get(crate::infra::assets::serve_public),
        )
        .route("/_health/db", get(public_health))
        .fallback(fallback_not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

/// Saved cookie first, `Accept-Language` second, Ukrainian last.
fn resolve_locale(jar: &CookieJar, headers: &HeaderMap) -> Locale {
    let saved = jar.get(LANG_COOKIE).map(|cookie| cookie.value());
    let accept = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    Locale::resolve(saved, accept)
}

/// Site settings degrade to the placeholder row so public pages always
/// render, even with the database down.
async fn load_settings(state: &PublicState) -> SiteSettingsRecord {
    match state.settings.load_site_settings().await {
        Ok(Some(settings)) => settings,
        Ok(None) => SiteSettingsRecord::placeholder(),
        Err(err) => {
            warn!(error = %err, "failed to load site settings, serving placeholder");
            SiteSettingsRecord::placeholder()
        }
    }
}

async fn index(State(state): State<PublicState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let locale = resolve_locale(&jar, &headers);
    let chrome = SiteChrome::new(locale, &load_settings(&state).await);

    let (groups, degraded) = match state.showcase.grouped(locale).await {
        Ok(groups) => (groups, false),
        Err(err) => {
            warn!(error = %err, "failed to load showcase, rendering empty state");
            (Vec::new(), true)
        }
    };

    render_template_response(
        IndexTemplate {
            chrome,
            groups,
            slider: SliderInit::centered(),
            degraded,
        },
        StatusCode::OK,
    )
}

async fn project_detail(
    State(state): State<PublicState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let locale = resolve_locale(&jar, &headers);
    let chrome = SiteChrome::new(locale, &load_settings(&state).await);

    let Ok(id) = Uuid::parse_str(&id) else {
        return render_not_found_response(chrome);
    };

    match state.showcase.project(id, locale).await {
        Ok(Some(project)) => render_template_response(
            ProjectTemplate {
                chrome,
                project,
                slider: SliderInit::centered(),
            },
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(chrome),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn privacy(State(state): State<PublicState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let locale = resolve_locale(&jar, &headers);
    let chrome = SiteChrome::new(locale, &load_settings(&state).await);
    render_template_response(PrivacyTemplate { chrome }, StatusCode::OK)
}

async fn cookies(State(state): State<PublicState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let locale = resolve_locale(&jar, &headers);
    let chrome = SiteChrome::new(locale, &load_settings(&state).await);
    render_template_response(CookiesTemplate { chrome }, StatusCode::OK)
}

async fn thanks(State(state): State<PublicState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let locale = resolve_locale(&jar, &headers);
    let chrome = SiteChrome::new(locale, &load_settings(&state).await);
    render_template_response(ThanksTemplate { chrome }, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct LocaleForm {
    lang: String,
}

/// Persist the visitor's language choice in a year-long cookie. Unknown
/// tags leave the cookie untouched.
async fn set_locale(jar: CookieJar, axum::Form(form): axum::Form<LocaleForm>) -> Response {
    match Locale::from_tag(&form.lang) {
        Some(locale) => {
            let cookie = Cookie::build((LANG_COOKIE, locale.as_str()))
                .path("/")
                .max_age(time::Duration::days(365))
                .build();
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        None => {
            let mut response = (StatusCode::BAD_REQUEST, "Unknown language").into_response();
            ErrorReport::from_message(
                "infra::http::public::set_locale",
                StatusCode::BAD_REQUEST,
                format!("unsupported language tag `{}`", form.lang),
            )
            .attach(&mut response);
            response
        }
    }
}

/// Best-effort client address: first `X-Forwarded-For` hop, then
/// `X-Real-IP`. Absent or unparseable addresses fall back to the
/// language-based classification.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
        && let Ok(ip) = first.trim().parse()
    {
        return Some(ip);
    }
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

async fn consent(State(state): State<PublicState>, headers: HeaderMap) -> Response {
    let accept = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let classification = state.geo.classify(client_ip(&headers), accept).await;
    Json(ConsentClassification {
        country_code: classification.country_code,
        requirement: classification.requirement.as_str().to_owned(),
    })
    .into_response()
}

async fn submit_lead(
    State(state): State<PublicState>,
    Json(request): Json<LeadRequest>,
) -> Response {
    const SOURCE: &str = "infra::http::public::submit_lead";

    match state.leads.submit(&request).await {
        Ok(()) => Json(LeadAccepted {
            success: true,
            message: "Lead sent successfully".to_owned(),
        })
        .into_response(),
        Err(LeadError::Invalid(message)) => {
            let mut response = (
                StatusCode::BAD_REQUEST,
                Json(LeadRejected {
                    error: message.clone(),
                    details: None,
                }),
            )
                .into_response();
            ErrorReport::from_message(SOURCE, StatusCode::BAD_REQUEST, message).attach(&mut response);
            response
        }
        Err(LeadError::Unconfigured(message)) => {
            let mut response = (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LeadRejected {
                    error: message.to_owned(),
                    details: None,
                }),
            )
                .into_response();
            ErrorReport::from_message(SOURCE, StatusCode::INTERNAL_SERVER_ERROR, message)
                .attach(&mut response);
            response
        }
        Err(LeadError::Delivery { detail }) => {
            let mut response = (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LeadRejected {
                    error: "Failed to send lead notification".to_owned(),
                    details: None,
                }),
            )
                .into_response();
            ErrorReport::from_message(SOURCE, StatusCode::INTERNAL_SERVER_ERROR, detail)
                .attach(&mut response);
            response
        }
    }
}

async fn serve_upload(State(state): State<PublicState>, Path(path): Path<String>) -> Response {
    const SOURCE: &str = "infra::http::public::serve_upload";

    match state.upload_storage.read(&path).await {
        Ok(bytes) => build_upload_response(&path, bytes),
        Err(UploadStorageError::InvalidPath) => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Upload not found",
            "The requested upload is not available",
        )
        .into_response(),
        Err(UploadStorageError::Io(err)) if err.kind() == ErrorKind::NotFound => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Upload not found",
            "The requested upload is not available",
        )
        .into_response(),
        Err(err) => {
            error!(
                target = SOURCE,
                path = %path,
                error = %err,
                "failed to read stored upload"
            );
            HttpError::new(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read uploaded file",
                err.to_string(),
            )
            .into_response()
        }
    }
}

fn build_upload_response(path: &str, bytes: Bytes) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let mut response = Response::new(Body::from(bytes.clone()));
    let headers = response.headers_mut();
    if let Ok(value) = mime.as_ref().parse() {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = bytes.len().to_string().parse() {
        headers.insert(CONTENT_LENGTH, value);
    }
    if let Ok(value) = "public, max-age=31536000, immutable".parse() {
        headers.insert(CACHE_CONTROL, value);
    }
    response
}

async fn public_health(State(state): State<PublicState>) -> Response {
    db_health_response(state.health.ping().await)
}

async fn fallback_not_found(
    State(state): State<PublicState>,
    jar: CookieJar,
    request: Request<Body>,
) -> Response {
    let locale = resolve_locale(&jar, request.headers());
    let chrome = SiteChrome::new(locale, &load_settings(&state).await);
    render_not_found_response(chrome)
}
