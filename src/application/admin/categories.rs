use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{CategoriesRepo, CategoriesWriteRepo, RepoError};
use crate::domain::entities::CategoryRecord;
use crate::domain::locale::LocalizedText;

#[derive(Debug, Error)]
pub enum AdminCategoryError {
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error("category not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct AdminCategoryService {
    read: Arc<dyn CategoriesRepo>,
    write: Arc<dyn CategoriesWriteRepo>,
}

impl AdminCategoryService {
    pub fn new(read: Arc<dyn CategoriesRepo>, write: Arc<dyn CategoriesWriteRepo>) -> Self {
        Self { read, write }
    }

    pub async fn list(&self) -> Result<Vec<CategoryRecord>, AdminCategoryError> {
        Ok(self.read.list_categories().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryRecord, AdminCategoryError> {
        self.read
            .find_category(id)
            .await?
            .ok_or(AdminCategoryError::NotFound)
    }

    pub async fn create(&self, name: LocalizedText) -> Result<CategoryRecord, AdminCategoryError> {
        ensure_named(&name)?;
        Ok(self.write.create_category(name).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: LocalizedText,
    ) -> Result<CategoryRecord, AdminCategoryError> {
        ensure_named(&name)?;
        match self.write.update_category(id, name).await {
            Ok(record) => Ok(record),
            Err(RepoError::NotFound) => Err(AdminCategoryError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// Case studies in the deleted category are detached, not deleted.
    pub async fn delete(&self, id: Uuid) -> Result<(), AdminCategoryError> {
        match self.write.delete_category(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(AdminCategoryError::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}

fn ensure_named(name: &LocalizedText) -> Result<(), AdminCategoryError> {
    if name.is_empty() {
        return Err(AdminCategoryError::ConstraintViolation(
            "Category name is required in at least one language",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct RejectingRepo;

    #[async_trait]
    impl CategoriesRepo for RejectingRepo {
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

    #[async_trait]
    impl CategoriesWriteRepo for RejectingRepo {
        async fn create_category(&self, _name: LocalizedText) -> Result<CategoryRecord, RepoError> {
            panic!("create must not be reached on validation failure");
        }

        async fn update_category(
            &self,
            _id: Uuid,
            _name: LocalizedText,
        ) -> Result<CategoryRecord, RepoError> {
            Err(RepoError::NotFound)
        }

        async fn delete_category(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
    }

    fn service() -> AdminCategoryService {
        let repo = Arc::new(RejectingRepo);
        AdminCategoryService::new(repo.clone(), repo)
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let err = service()
            .create(LocalizedText::new("  ", "", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminCategoryError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn update_and_delete_map_missing_rows_to_not_found() {
        let name = LocalizedText::new("Портрети", "", "");
        let err = service().update(Uuid::new_v4(), name).await.unwrap_err();
        assert!(matches!(err, AdminCategoryError::NotFound));

        let err = service().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AdminCategoryError::NotFound));
    }
}
