use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::info;

use crate::application::error::ErrorReport;
use crate::presentation::admin::views::LoginTemplate;
use crate::presentation::views::render_template_response;

use super::state::AdminState;

pub const SESSION_COOKIE: &str = "lustro_admin_session";

/// Gate for every admin route except login/logout. Requests without a
/// live session are bounced to the login form.
pub async fn require_session(
    State(state): State<AdminState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());
    match token {
        Some(token) if state.auth.validate(token).await => next.run(request).await,
        _ => {
            let mut response = Redirect::to("/login").into_response();
            ErrorReport::from_message(
                "infra::http::admin::require_session",
                StatusCode::SEE_OTHER,
                "missing or expired admin session",
            )
            .attach(&mut response);
            response
        }
    }
}

pub async fn admin_login_form(State(state): State<AdminState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(SESSION_COOKIE).map(|cookie| cookie.value())
        && state.auth.validate(token).await
    {
        return Redirect::to("/").into_response();
    }
    render_template_response(LoginTemplate { error: None }, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    password: String,
}

pub async fn admin_login(
    State(state): State<AdminState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    if !state.auth.verify_password(&form.password) {
        let mut response = render_template_response(
            LoginTemplate {
                error: Some("Invalid password"),
            },
            StatusCode::UNAUTHORIZED,
        );
        ErrorReport::from_message(
            "infra::http::admin::admin_login",
            StatusCode::UNAUTHORIZED,
            "admin login rejected",
        )
        .attach(&mut response);
        return response;
    }

    let token = state.auth.issue().await;
    info!("admin session issued");
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), Redirect::to("/")).into_response()
}

pub async fn admin_logout(State(state): State<AdminState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(SESSION_COOKIE).map(|cookie| cookie.value()) {
        state.auth.revoke(token).await;
    }
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Redirect::to("/login")).into_response()
}
