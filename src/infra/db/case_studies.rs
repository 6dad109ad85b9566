use async_trait::async_trait;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CaseStudiesRepo, CaseStudiesWriteRepo, CaseStudyDraft, RepoError},
    domain::entities::CaseStudyRecord,
    domain::locale::{LocalizedList, LocalizedText},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CaseStudyRow {
    id: Uuid,
    category_id: Option<Uuid>,
    client: String,
    title_uk: String,
    title_ru: String,
    title_en: String,
    legacy_title: Option<String>,
    category_uk: String,
    category_ru: String,
    category_en: String,
    legacy_category: Option<String>,
    description_uk: String,
    description_ru: String,
    description_en: String,
    legacy_description: Option<String>,
    services_uk: Vec<String>,
    services_ru: Vec<String>,
    services_en: Vec<String>,
    legacy_services: Option<Vec<String>>,
    content_uk: String,
    content_ru: String,
    content_en: String,
    before_image: String,
    after_image: String,
    additional_images: Vec<String>,
    created_at: OffsetDateTime,
}

impl From<CaseStudyRow> for CaseStudyRecord {
    fn from(row: CaseStudyRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            client: row.client,
            title: LocalizedText::new(row.title_uk, row.title_ru, row.title_en),
            legacy_title: row.legacy_title,
            category_label: LocalizedText::new(row.category_uk, row.category_ru, row.category_en),
            legacy_category: row.legacy_category,
            description: LocalizedText::new(
                row.description_uk,
                row.description_ru,
                row.description_en,
            ),
            legacy_description: row.legacy_description,
            services: LocalizedList {
                uk: row.services_uk,
                ru: row.services_ru,
                en: row.services_en,
            },
            legacy_services: row.legacy_services,
            content: LocalizedText::new(row.content_uk, row.content_ru, row.content_en),
            before_image: row.before_image,
            after_image: row.after_image,
            additional_images: row.additional_images,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, category_id, client, \
    title_uk, title_ru, title_en, legacy_title, \
    category_uk, category_ru, category_en, legacy_category, \
    description_uk, description_ru, description_en, legacy_description, \
    services_uk, services_ru, services_en, legacy_services, \
    content_uk, content_ru, content_en, \
    before_image, after_image, additional_images, created_at";

#[async_trait]
impl CaseStudiesRepo for PostgresRepositories {
    async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CaseStudyRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM case_studies ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(CaseStudyRecord::from).collect())
    }

    async fn find_case_study(&self, id: Uuid) -> Result<Option<CaseStudyRecord>, RepoError> {
        let row = sqlx::query_as::<_, CaseStudyRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM case_studies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(CaseStudyRecord::from))
    }

    async fn count_case_studies(&self) -> Result<u64, RepoError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM case_studies")
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        let count: i64 = row.try_get("count").map_err(map_sqlx_error)?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl CaseStudiesWriteRepo for PostgresRepositories {
    async fn create_case_study(&self, draft: CaseStudyDraft) -> Result<CaseStudyRecord, RepoError> {
        let row = sqlx::query_as::<_, CaseStudyRow>(&format!(
            "INSERT INTO case_studies ( \
                category_id, client, \
                title_uk, title_ru, title_en, \
                category_uk, category_ru, category_en, \
                description_uk, description_ru, description_en, \
                services_uk, services_ru, services_en, \
                content_uk, content_ru, content_en, \
                before_image, after_image, additional_images \
            ) VALUES ( \
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20 \
            ) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(draft.category_id)
        .bind(&draft.client)
        .bind(&draft.title.uk)
        .bind(&draft.title.ru)
        .bind(&draft.title.en)
        .bind(&draft.category_label.uk)
        .bind(&draft.category_label.ru)
        .bind(&draft.category_label.en)
        .bind(&draft.description.uk)
        .bind(&draft.description.ru)
        .bind(&draft.description.en)
        .bind(&draft.services.uk)
        .bind(&draft.services.ru)
        .bind(&draft.services.en)
        .bind(&draft.content.uk)
        .bind(&draft.content.ru)
        .bind(&draft.content.en)
        .bind(&draft.before_image)
        .bind(&draft.after_image)
        .bind(&draft.additional_images)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(CaseStudyRecord::from(row))
    }

    async fn update_case_study(
        &self,
        id: Uuid,
        draft: CaseStudyDraft,
    ) -> Result<CaseStudyRecord, RepoError> {
        let row = sqlx::query_as::<_, CaseStudyRow>(&format!(
            "UPDATE case_studies SET \
                category_id = $2, client = $3, \
                title_uk = $4, title_ru = $5, title_en = $6, \
                category_uk = $7, category_ru = $8, category_en = $9, \
                description_uk = $10, description_ru = $11, description_en = $12, \
                services_uk = $13, services_ru = $14, services_en = $15, \
                content_uk = $16, content_ru = $17, content_en = $18, \
                before_image = $19, after_image = $20, additional_images = $21 \
            WHERE id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(draft.category_id)
        .bind(&draft.client)
        .bind(&draft.title.uk)
        .bind(&draft.title.ru)
        .bind(&draft.title.en)
        .bind(&draft.category_label.uk)
        .bind(&draft.category_label.ru)
        .bind(&draft.category_label.en)
        .bind(&draft.description.uk)
        .bind(&draft.description.ru)
        .bind(&draft.description.en)
        .bind(&draft.services.uk)
        .bind(&draft.services.ru)
        .bind(&draft.services.en)
        .bind(&draft.content.uk)
        .bind(&draft.content.ru)
        .bind(&draft.content.en)
        .bind(&draft.before_image)
        .bind(&draft.after_image)
        .bind(&draft.additional_images)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        row.map(CaseStudyRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_case_study(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM case_studies WHERE id = $1")
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
