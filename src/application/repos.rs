//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{CaseStudyRecord, CategoryRecord, SiteSettingsRecord};
use crate::domain::locale::{LocalizedList, LocalizedText};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Fields of a case study under admin control. `id` and `created_at` are
/// repository-assigned.
#[derive(Debug, Clone, Default)]
pub struct CaseStudyDraft {
    pub category_id: Option<Uuid>,
    pub client: String,
    pub title: LocalizedText,
    pub category_label: LocalizedText,
    pub description: LocalizedText,
    pub services: LocalizedList,
    pub content: LocalizedText,
    pub before_image: String,
    pub after_image: String,
    pub additional_images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SiteSettingsDraft {
    pub email: String,
    pub location: LocalizedText,
    pub instagram_url: String,
    pub telegram_user: String,
    pub phone: String,
}

#[async_trait]
pub trait CaseStudiesRepo: Send + Sync {
    /// All case studies, newest first.
    async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, RepoError>;
    async fn find_case_study(&self, id: Uuid) -> Result<Option<CaseStudyRecord>, RepoError>;
    async fn count_case_studies(&self) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait CaseStudiesWriteRepo: Send + Sync {
    async fn create_case_study(&self, draft: CaseStudyDraft) -> Result<CaseStudyRecord, RepoError>;
    async fn update_case_study(
        &self,
        id: Uuid,
        draft: CaseStudyDraft,
    ) -> Result<CaseStudyRecord, RepoError>;
    async fn delete_case_study(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    /// All categories in creation order.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError>;
    async fn find_category(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError>;
    async fn count_categories(&self) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait CategoriesWriteRepo: Send + Sync {
    async fn create_category(&self, name: LocalizedText) -> Result<CategoryRecord, RepoError>;
    async fn update_category(
        &self,
        id: Uuid,
        name: LocalizedText,
    ) -> Result<CategoryRecord, RepoError>;
    /// Deleting a category detaches its case studies rather than deleting
    /// them.
    async fn delete_category(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_site_settings(&self) -> Result<Option<SiteSettingsRecord>, RepoError>;
    async fn upsert_site_settings(
        &self,
        draft: SiteSettingsDraft,
    ) -> Result<SiteSettingsRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
