mod auth;
mod case_studies;
mod categories;
mod dashboard;
mod settings;
mod state;
mod uploads;

pub use state::AdminState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use super::middleware::{log_responses, set_request_context};

/// Admin surface bound to its own listener. Everything except the login
/// and logout routes sits behind the session guard.
pub fn build_admin_router(state: AdminState, upload_body_limit: usize) -> Router {
    let protected = Router::new()
        .route("/", get(dashboard::admin_dashboard))
        .route("/case-studies", get(case_studies::admin_case_studies))
        .route("/case-studies/new", get(case_studies::admin_case_study_new))
        .route(
            "/case-studies/create",
            post(case_studies::admin_case_study_create),
        )
        .route(
            "/case-studies/{id}/edit",
            get(case_studies::admin_case_study_edit).post(case_studies::admin_case_study_update),
        )
        .route(
            "/case-studies/{id}/delete",
            post(case_studies::admin_case_study_delete),
        )
        .route(
            "/categories",
            get(categories::admin_categories).post(categories::admin_category_create),
        )
        .route(
            "/categories/{id}/update",
            post(categories::admin_category_update),
        )
        .route(
            "/categories/{id}/delete",
            post(categories::admin_category_delete),
        )
        .route(
            "/settings",
            get(settings::admin_settings).post(settings::admin_settings_update),
        )
        .route(
            "/uploads",
            post(uploads::admin_upload_image).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/login", get(auth::admin_login_form).post(auth::admin_login))
        .route("/logout", post(auth::admin_logout))
        .merge(protected)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
