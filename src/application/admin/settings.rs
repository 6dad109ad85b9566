use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::application::repos::{RepoError, SettingsRepo, SiteSettingsDraft};
use crate::domain::entities::SiteSettingsRecord;

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct AdminSettingsService {
    repo: Arc<dyn SettingsRepo>,
}

impl AdminSettingsService {
    pub fn new(repo: Arc<dyn SettingsRepo>) -> Self {
        Self { repo }
    }

    /// Missing row reads as the placeholder so the form always renders.
    pub async fn load(&self) -> Result<SiteSettingsRecord, AdminSettingsError> {
        Ok(self
            .repo
            .load_site_settings()
            .await?
            .unwrap_or_else(SiteSettingsRecord::placeholder))
    }

    pub async fn update(
        &self,
        draft: SiteSettingsDraft,
    ) -> Result<SiteSettingsRecord, AdminSettingsError> {
        if draft.email.trim().is_empty() || !draft.email.contains('@') {
            return Err(AdminSettingsError::ConstraintViolation(
                "A contact email address is required",
            ));
        }
        if !draft.instagram_url.trim().is_empty() {
            let parsed = Url::parse(draft.instagram_url.trim()).map_err(|_| {
                AdminSettingsError::ConstraintViolation("Instagram link must be a valid URL")
            })?;
            if parsed.scheme() != "https" && parsed.scheme() != "http" {
                return Err(AdminSettingsError::ConstraintViolation(
                    "Instagram link must be an http(s) URL",
                ));
            }
        }
        Ok(self.repo.upsert_site_settings(draft).await?)
    }
}
