use async_trait::async_trait;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CategoriesRepo, CategoriesWriteRepo, RepoError},
    domain::entities::CategoryRecord,
    domain::locale::LocalizedText,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name_uk: String,
    name_ru: String,
    name_en: String,
    created_at: OffsetDateTime,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: LocalizedText::new(row.name_uk, row.name_ru, row.name_en),
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name_uk, name_ru, name_en, created_at";

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(CategoryRecord::from))
    }

    async fn count_categories(&self) -> Result<u64, RepoError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM categories")
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        let count: i64 = row.try_get("count").map_err(map_sqlx_error)?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl CategoriesWriteRepo for PostgresRepositories {
    async fn create_category(&self, name: LocalizedText) -> Result<CategoryRecord, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "INSERT INTO categories (name_uk, name_ru, name_en) \
             VALUES ($1, $2, $3) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&name.uk)
        .bind(&name.ru)
        .bind(&name.en)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(CategoryRecord::from(row))
    }

    async fn update_category(
        &self,
        id: Uuid,
        name: LocalizedText,
    ) -> Result<CategoryRecord, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "UPDATE categories SET name_uk = $2, name_ru = $3, name_en = $4 \
             WHERE id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&name.uk)
        .bind(&name.ru)
        .bind(&name.en)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        row.map(CategoryRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), RepoError> {
        // ON DELETE SET NULL on case_studies.category_id does the detaching.
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
