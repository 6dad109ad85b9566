use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{RepoError, SettingsRepo, SiteSettingsDraft},
    domain::entities::SiteSettingsRecord,
    domain::locale::LocalizedText,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SiteSettingsRow {
    email: String,
    location_uk: String,
    location_ru: String,
    location_en: String,
    instagram_url: String,
    telegram_user: String,
    phone: String,
    updated_at: OffsetDateTime,
}

impl From<SiteSettingsRow> for SiteSettingsRecord {
    fn from(row: SiteSettingsRow) -> Self {
        Self {
            email: row.email,
            location: LocalizedText::new(row.location_uk, row.location_ru, row.location_en),
            instagram_url: row.instagram_url,
            telegram_user: row.telegram_user,
            phone: row.phone,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "email, location_uk, location_ru, location_en, instagram_url, telegram_user, phone, updated_at";

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn load_site_settings(&self) -> Result<Option<SiteSettingsRecord>, RepoError> {
        let row = sqlx::query_as::<_, SiteSettingsRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM site_settings WHERE id = 1"
        ))
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(SiteSettingsRecord::from))
    }

    async fn upsert_site_settings(
        &self,
        draft: SiteSettingsDraft,
    ) -> Result<SiteSettingsRecord, RepoError> {
        let row = sqlx::query_as::<_, SiteSettingsRow>(&format!(
            "INSERT INTO site_settings ( \
                id, email, location_uk, location_ru, location_en, \
                instagram_url, telegram_user, phone, updated_at \
            ) VALUES (1, $1, $2, $3, $4, $5, $6, $7, NOW()) \
            ON CONFLICT (id) DO UPDATE SET \
                email = EXCLUDED.email, \
                location_uk = EXCLUDED.location_uk, \
                location_ru = EXCLUDED.location_ru, \
                location_en = EXCLUDED.location_en, \
                instagram_url = EXCLUDED.instagram_url, \
                telegram_user = EXCLUDED.telegram_user, \
                phone = EXCLUDED.phone, \
                updated_at = NOW() \
            RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&draft.email)
        .bind(&draft.location.uk)
        .bind(&draft.location.ru)
        .bind(&draft.location.en)
        .bind(&draft.instagram_url)
        .bind(&draft.telegram_user)
        .bind(&draft.phone)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(SiteSettingsRecord::from(row))
    }
}
