use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::categories::AdminCategoryError;
use crate::application::error::HttpError;
use crate::domain::locale::LocalizedText;
use crate::presentation::admin::views::{CategoriesTemplate, CategoryRowView};
use crate::presentation::views::render_template_response;

use super::state::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name_uk: String,
    pub name_ru: String,
    pub name_en: String,
}

impl CategoryForm {
    fn to_name(&self) -> LocalizedText {
        LocalizedText::new(
            self.name_uk.trim(),
            self.name_ru.trim(),
            self.name_en.trim(),
        )
    }
}

async fn render_list(state: &AdminState, alert: Option<String>, status: StatusCode) -> Response {
    match state.categories.list().await {
        Ok(records) => {
            let categories = records.iter().map(CategoryRowView::from_record).collect();
            render_template_response(CategoriesTemplate { categories, alert }, status)
        }
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_categories(State(state): State<AdminState>) -> Response {
    render_list(&state, None, StatusCode::OK).await
}

pub async fn admin_category_create(
    State(state): State<AdminState>,
    axum::Form(form): axum::Form<CategoryForm>,
) -> Response {
    match state.categories.create(form.to_name()).await {
        Ok(_) => Redirect::to("/categories").into_response(),
        Err(AdminCategoryError::ConstraintViolation(message)) => {
            render_list(
                &state,
                Some(message.to_owned()),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_category_update(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    axum::Form(form): axum::Form<CategoryForm>,
) -> Response {
    match state.categories.update(id, form.to_name()).await {
        Ok(_) => Redirect::to("/categories").into_response(),
        Err(AdminCategoryError::ConstraintViolation(message)) => {
            render_list(
                &state,
                Some(message.to_owned()),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_category_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.categories.delete(id).await {
        Ok(()) => Redirect::to("/categories").into_response(),
        Err(err) => admin_error_response(err),
    }
}

fn admin_error_response(err: AdminCategoryError) -> Response {
    const SOURCE: &str = "infra::http::admin::categories";
    match err {
        AdminCategoryError::NotFound => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Category not found",
            "category row missing",
        )
        .into_response(),
        AdminCategoryError::ConstraintViolation(message) => {
            HttpError::new(SOURCE, StatusCode::UNPROCESSABLE_ENTITY, message, message)
                .into_response()
        }
        AdminCategoryError::Repo(err) => HttpError::from(err).into_response(),
    }
}
