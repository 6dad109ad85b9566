use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::error::HttpError;
use crate::presentation::admin::views::DashboardTemplate;
use crate::presentation::views::render_template_response;

use super::state::AdminState;

pub async fn admin_dashboard(State(state): State<AdminState>) -> Response {
    match state.dashboard.counts().await {
        Ok(counts) => render_template_response(DashboardTemplate { counts }, StatusCode::OK),
        Err(err) => HttpError::from(err).into_response(),
    }
}
