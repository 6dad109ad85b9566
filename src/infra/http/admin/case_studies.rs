use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::case_studies::AdminCaseStudyError;
use crate::application::admin::categories::AdminCategoryError;
use crate::application::error::HttpError;
use crate::application::repos::CaseStudyDraft;
use crate::domain::entities::CategoryRecord;
use crate::domain::locale::{LocalizedList, LocalizedText};
use crate::presentation::admin::views::{
    CaseStudyFormTemplate, CaseStudyFormView, CaseStudyListTemplate, CaseStudyRowView,
    CategoryOptionView,
};
use crate::presentation::views::render_template_response;

use super::state::AdminState;

/// One textarea line per entry; blank lines are dropped.
fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CaseStudyForm {
    pub client: String,
    pub category_id: String,
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

impl CaseStudyForm {
    fn to_draft(&self) -> CaseStudyDraft {
        CaseStudyDraft {
            category_id: Uuid::parse_str(self.category_id.trim()).ok(),
            client: self.client.trim().to_owned(),
            title: LocalizedText::new(
                self.title_uk.trim(),
                self.title_ru.trim(),
                self.title_en.trim(),
            ),
            category_label: LocalizedText::new(
                self.category_uk.trim(),
                self.category_ru.trim(),
                self.category_en.trim(),
            ),
            description: LocalizedText::new(
                self.description_uk.trim(),
                self.description_ru.trim(),
                self.description_en.trim(),
            ),
            services: LocalizedList {
                uk: parse_lines(&self.services_uk),
                ru: parse_lines(&self.services_ru),
                en: parse_lines(&self.services_en),
            },
            content: LocalizedText::new(
                self.content_uk.trim(),
                self.content_ru.trim(),
                self.content_en.trim(),
            ),
            before_image: self.before_image.trim().to_owned(),
            after_image: self.after_image.trim().to_owned(),
            additional_images: parse_lines(&self.additional_images),
        }
    }

    fn to_view(&self) -> CaseStudyFormView {
        CaseStudyFormView {
            client: self.client.clone(),
            title_uk: self.title_uk.clone(),
            title_ru: self.title_ru.clone(),
            title_en: self.title_en.clone(),
            category_uk: self.category_uk.clone(),
            category_ru: self.category_ru.clone(),
            category_en: self.category_en.clone(),
            description_uk: self.description_uk.clone(),
            description_ru: self.description_ru.clone(),
            description_en: self.description_en.clone(),
            services_uk: self.services_uk.clone(),
            services_ru: self.services_ru.clone(),
            services_en: self.services_en.clone(),
            content_uk: self.content_uk.clone(),
            content_ru: self.content_ru.clone(),
            content_en: self.content_en.clone(),
            before_image: self.before_image.clone(),
            after_image: self.after_image.clone(),
            additional_images: self.additional_images.clone(),
        }
    }
}

fn category_options(
    categories: &[CategoryRecord],
    selected: Option<Uuid>,
) -> Vec<CategoryOptionView> {
    categories
        .iter()
        .map(|category| CategoryOptionView {
            id: category.id,
            name: category
                .name
                .localize(None, crate::domain::locale::Locale::En)
                .to_owned(),
            selected: selected == Some(category.id),
        })
        .collect()
}

async fn load_category_options(
    state: &AdminState,
    selected: Option<Uuid>,
) -> Result<Vec<CategoryOptionView>, Response> {
    match state.categories.list().await {
        Ok(categories) => Ok(category_options(&categories, selected)),
        Err(AdminCategoryError::Repo(err)) => Err(HttpError::from(err).into_response()),
        Err(err) => Err(HttpError::new(
            "infra::http::admin::case_studies",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load categories",
            err.to_string(),
        )
        .into_response()),
    }
}

pub async fn admin_case_studies(State(state): State<AdminState>) -> Response {
    match state.case_studies.list().await {
        Ok(records) => {
            let studies = records.iter().map(CaseStudyRowView::from_record).collect();
            render_template_response(
                CaseStudyListTemplate {
                    studies,
                    alert: None,
                },
                StatusCode::OK,
            )
        }
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_case_study_new(State(state): State<AdminState>) -> Response {
    let categories = match load_category_options(&state, None).await {
        Ok(categories) => categories,
        Err(response) => return response,
    };
    render_template_response(
        CaseStudyFormTemplate {
            heading: "New case study",
            action: "/case-studies/create".to_owned(),
            form: CaseStudyFormView::default(),
            categories,
            alert: None,
        },
        StatusCode::OK,
    )
}

pub async fn admin_case_study_create(
    State(state): State<AdminState>,
    axum::Form(form): axum::Form<CaseStudyForm>,
) -> Response {
    let draft = form.to_draft();
    match state.case_studies.create(draft.clone()).await {
        Ok(_) => Redirect::to("/case-studies").into_response(),
        Err(AdminCaseStudyError::ConstraintViolation(message)) => {
            let categories = match load_category_options(&state, draft.category_id).await {
                Ok(categories) => categories,
                Err(response) => return response,
            };
            render_template_response(
                CaseStudyFormTemplate {
                    heading: "New case study",
                    action: "/case-studies/create".to_owned(),
                    form: form.to_view(),
                    categories,
                    alert: Some(message.to_owned()),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_case_study_edit(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    let record = match state.case_studies.get(id).await {
        Ok(record) => record,
        Err(err) => return admin_error_response(err),
    };
    let categories = match load_category_options(&state, record.category_id).await {
        Ok(categories) => categories,
        Err(response) => return response,
    };
    render_template_response(
        CaseStudyFormTemplate {
            heading: "Edit case study",
            action: format!("/case-studies/{id}/edit"),
            form: CaseStudyFormView::from_record(&record),
            categories,
            alert: None,
        },
        StatusCode::OK,
    )
}

pub async fn admin_case_study_update(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    axum::Form(form): axum::Form<CaseStudyForm>,
) -> Response {
    let draft = form.to_draft();
    match state.case_studies.update(id, draft.clone()).await {
        Ok(_) => Redirect::to("/case-studies").into_response(),
        Err(AdminCaseStudyError::ConstraintViolation(message)) => {
            let categories = match load_category_options(&state, draft.category_id).await {
                Ok(categories) => categories,
                Err(response) => return response,
            };
            render_template_response(
                CaseStudyFormTemplate {
                    heading: "Edit case study",
                    action: format!("/case-studies/{id}/edit"),
                    form: form.to_view(),
                    categories,
                    alert: Some(message.to_owned()),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => admin_error_response(err),
    }
}

pub async fn admin_case_study_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.case_studies.delete(id).await {
        Ok(()) => Redirect::to("/case-studies").into_response(),
        Err(err) => admin_error_response(err),
    }
}

fn admin_error_response(err: AdminCaseStudyError) -> Response {
    const SOURCE: &str = "infra::http::admin::case_studies";
    match err {
        AdminCaseStudyError::NotFound => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Case study not found",
            "case study row missing",
        )
        .into_response(),
        AdminCaseStudyError::ConstraintViolation(message) => {
            HttpError::new(SOURCE, StatusCode::UNPROCESSABLE_ENTITY, message, message)
                .into_response()
        }
        AdminCaseStudyError::Repo(err) => HttpError::from(err).into_response(),
    }
}
