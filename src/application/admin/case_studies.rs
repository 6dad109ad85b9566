use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    CaseStudiesRepo, CaseStudiesWriteRepo, CaseStudyDraft, CategoriesRepo, RepoError,
};
use crate::domain::entities::CaseStudyRecord;

#[derive(Debug, Error)]
pub enum AdminCaseStudyError {
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error("case study not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct AdminCaseStudyService {
    read: Arc<dyn CaseStudiesRepo>,
    write: Arc<dyn CaseStudiesWriteRepo>,
    categories: Arc<dyn CategoriesRepo>,
}

impl AdminCaseStudyService {
    pub fn new(
        read: Arc<dyn CaseStudiesRepo>,
        write: Arc<dyn CaseStudiesWriteRepo>,
        categories: Arc<dyn CategoriesRepo>,
    ) -> Self {
        Self {
            read,
            write,
            categories,
        }
    }

    pub async fn list(&self) -> Result<Vec<CaseStudyRecord>, AdminCaseStudyError> {
        Ok(self.read.list_case_studies().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<CaseStudyRecord, AdminCaseStudyError> {
        self.read
            .find_case_study(id)
            .await?
            .ok_or(AdminCaseStudyError::NotFound)
    }

    pub async fn create(
        &self,
        draft: CaseStudyDraft,
    ) -> Result<CaseStudyRecord, AdminCaseStudyError> {
        self.validate(&draft).await?;
        Ok(self.write.create_case_study(draft).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        draft: CaseStudyDraft,
    ) -> Result<CaseStudyRecord, AdminCaseStudyError> {
        self.validate(&draft).await?;
        match self.write.update_case_study(id, draft).await {
            Ok(record) => Ok(record),
            Err(RepoError::NotFound) => Err(AdminCaseStudyError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AdminCaseStudyError> {
        match self.write.delete_case_study(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(AdminCaseStudyError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    async fn validate(&self, draft: &CaseStudyDraft) -> Result<(), AdminCaseStudyError> {
        if draft.title.is_empty() {
            return Err(AdminCaseStudyError::ConstraintViolation(
                "Title is required in at least one language",
            ));
        }
        if draft.before_image.trim().is_empty() {
            return Err(AdminCaseStudyError::ConstraintViolation(
                "Before image is required",
            ));
        }
        if draft.after_image.trim().is_empty() {
            return Err(AdminCaseStudyError::ConstraintViolation(
                "After image is required",
            ));
        }
        if let Some(category_id) = draft.category_id
            && self.categories.find_category(category_id).await?.is_none()
        {
            return Err(AdminCaseStudyError::ConstraintViolation(
                "Selected category does not exist",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::entities::CategoryRecord;
    use crate::domain::locale::LocalizedText;

    struct NoCategories;

    #[async_trait]
    impl CategoriesRepo for NoCategories {
        async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
            Ok(vec![])
        }

        async fn find_category(&self, _id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
            Ok(None)
        }

        async fn count_categories(&self) -> Result<u64, RepoError> {
            Ok(0)
        }
    }

    struct PanickingWrites;

    #[async_trait]
    impl CaseStudiesRepo for PanickingWrites {
        async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, RepoError> {
            Ok(vec![])
        }

        async fn find_case_study(&self, _id: Uuid) -> Result<Option<CaseStudyRecord>, RepoError> {
            Ok(None)
        }

        async fn count_case_studies(&self) -> Result<u64, RepoError> {
            Ok(0)
        }
    }

    #[async_trait]
    impl CaseStudiesWriteRepo for PanickingWrites {
        async fn create_case_study(
            &self,
            _draft: CaseStudyDraft,
        ) -> Result<CaseStudyRecord, RepoError> {
            panic!("create must not be reached on validation failure");
        }

        async fn update_case_study(
            &self,
            _id: Uuid,
            _draft: CaseStudyDraft,
        ) -> Result<CaseStudyRecord, RepoError> {
            panic!("update must not be reached on validation failure");
        }

        async fn delete_case_study(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
    }

    fn service() -> AdminCaseStudyService {
        let repo = Arc::new(PanickingWrites);
        AdminCaseStudyService::new(repo.clone(), repo, Arc::new(NoCategories))
    }

    fn valid_draft() -> CaseStudyDraft {
        CaseStudyDraft {
            title: LocalizedText::new("", "", "Editorial"),
            before_image: "/uploads/a.jpg".into(),
            after_image: "/uploads/b.jpg".into(),
            ..CaseStudyDraft::default()
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_images_before_touching_the_repo() {
        let mut draft = valid_draft();
        draft.after_image = "  ".into();
        let err = service().create(draft).await.unwrap_err();
        assert!(matches!(err, AdminCaseStudyError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn create_rejects_fully_empty_titles() {
        let mut draft = valid_draft();
        draft.title = LocalizedText::default();
        let err = service().create(draft).await.unwrap_err();
        assert!(matches!(err, AdminCaseStudyError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn create_rejects_unknown_categories() {
        let mut draft = valid_draft();
        draft.category_id = Some(Uuid::new_v4());
        let err = service().create(draft).await.unwrap_err();
        assert!(matches!(err, AdminCaseStudyError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn delete_maps_missing_rows_to_not_found() {
        let err = service().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AdminCaseStudyError::NotFound));
    }
}
