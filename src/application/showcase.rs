//! Public showcase: case studies grouped by category and project detail
//! pages, localized for the active visitor.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::repos::{CaseStudiesRepo, CategoriesRepo, RepoError};
use crate::domain::entities::CaseStudyRecord;
use crate::domain::locale::{Locale, translations};

/// A case study card on the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStudyView {
    pub id: Uuid,
    pub title: String,
    pub client: String,
    pub category_label: String,
    pub description: String,
    pub services: Vec<String>,
    pub before_image: String,
    pub after_image: String,
}

/// One category section of the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseGroup {
    pub title: String,
    pub studies: Vec<CaseStudyView>,
}

/// Full project detail, with sanitized long-form content.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub id: Uuid,
    pub title: String,
    pub client: String,
    pub category_label: String,
    pub description: String,
    pub services: Vec<String>,
    pub before_image: String,
    pub after_image: String,
    pub gallery: Vec<String>,
    pub content_html: Option<String>,
}

pub struct ShowcaseService {
    case_studies: Arc<dyn CaseStudiesRepo>,
    categories: Arc<dyn CategoriesRepo>,
}

impl ShowcaseService {
    pub fn new(
        case_studies: Arc<dyn CaseStudiesRepo>,
        categories: Arc<dyn CategoriesRepo>,
    ) -> ShowcaseService {
        ShowcaseService {
            case_studies,
            categories,
        }
    }

    /// Case studies grouped by category, in category creation order, with
    /// uncategorized (or dangling) records collected under a localized
    /// catch-all group. Empty groups are dropped.
    pub async fn grouped(&self, locale: Locale) -> Result<Vec<ShowcaseGroup>, RepoError> {
        let categories = self.categories.list_categories().await?;
        let studies = self.case_studies.list_case_studies().await?;

        let mut groups: Vec<(Option<Uuid>, ShowcaseGroup)> = categories
            .iter()
            .map(|category| {
                (
                    Some(category.id),
                    ShowcaseGroup {
                        title: category.name.localize(None, locale).to_owned(),
                        studies: Vec::new(),
                    },
                )
            })
            .collect();
        let mut other = ShowcaseGroup {
            title: translations(locale).other_work.to_owned(),
            studies: Vec::new(),
        };

        for record in &studies {
            let view = card_view(record, locale);
            let slot = record
                .category_id
                .and_then(|id| groups.iter_mut().find(|(key, _)| *key == Some(id)));
            match slot {
                Some((_, group)) => group.studies.push(view),
                None => other.studies.push(view),
            }
        }

        let mut result: Vec<ShowcaseGroup> = groups
            .into_iter()
            .map(|(_, group)| group)
            .filter(|group| !group.studies.is_empty())
            .collect();
        if !other.studies.is_empty() {
            result.push(other);
        }
        Ok(result)
    }

    pub async fn project(
        &self,
        id: Uuid,
        locale: Locale,
    ) -> Result<Option<ProjectView>, RepoError> {
        let Some(record) = self.case_studies.find_case_study(id).await? else {
            return Ok(None);
        };
        let card = card_view(&record, locale);
        let content = record.content.localize(None, locale);
        let content_html = if content.trim().is_empty() {
            None
        } else {
            Some(ammonia::clean(content))
        };
        Ok(Some(ProjectView {
            id: card.id,
            title: card.title,
            client: card.client,
            category_label: card.category_label,
            description: card.description,
            services: card.services,
            before_image: card.before_image,
            after_image: card.after_image,
            gallery: record.additional_images.clone(),
            content_html,
        }))
    }
}

fn card_view(record: &CaseStudyRecord, locale: Locale) -> CaseStudyView {
    CaseStudyView {
        id: record.id,
        title: record
            .title
            .localize(record.legacy_title.as_deref(), locale)
            .to_owned(),
        client: record.client.clone(),
        category_label: record
            .category_label
            .localize(record.legacy_category.as_deref(), locale)
            .to_owned(),
        description: record
            .description
            .localize(record.legacy_description.as_deref(), locale)
            .to_owned(),
        services: record
            .services
            .localize(record.legacy_services.as_deref(), locale)
            .to_vec(),
        before_image: record.before_image.clone(),
        after_image: record.after_image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::entities::CategoryRecord;
    use crate::domain::locale::{LocalizedList, LocalizedText};

    struct FakeRepo {
        studies: Vec<CaseStudyRecord>,
        categories: Vec<CategoryRecord>,
    }

    #[async_trait]
    impl CaseStudiesRepo for FakeRepo {
        async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, RepoError> {
            Ok(self.studies.clone())
        }

        async fn find_case_study(&self, id: Uuid) -> Result<Option<CaseStudyRecord>, RepoError> {
            Ok(self.studies.iter().find(|s| s.id == id).cloned())
        }

        async fn count_case_studies(&self) -> Result<u64, RepoError> {
            Ok(self.studies.len() as u64)
        }
    }

    #[async_trait]
    impl CategoriesRepo for FakeRepo {
        async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
            Ok(self.categories.clone())
        }

        async fn find_category(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
            Ok(self.categories.iter().find(|c| c.id == id).cloned())
        }

        async fn count_categories(&self) -> Result<u64, RepoError> {
            Ok(self.categories.len() as u64)
        }
    }

    fn study(category_id: Option<Uuid>, title_en: &str) -> CaseStudyRecord {
        CaseStudyRecord {
            id: Uuid::new_v4(),
            category_id,
            client: "Studio".into(),
            title: LocalizedText::new("", "", title_en),
            legacy_title: None,
            category_label: LocalizedText::default(),
            legacy_category: None,
            description: LocalizedText::default(),
            legacy_description: None,
            services: LocalizedList::default(),
            legacy_services: None,
            content: LocalizedText::default(),
            before_image: "/uploads/before.jpg".into(),
            after_image: "/uploads/after.jpg".into(),
            additional_images: vec![],
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn service(repo: FakeRepo) -> ShowcaseService {
        let repo = Arc::new(repo);
        ShowcaseService::new(repo.clone(), repo)
    }

    #[tokio::test]
    async fn groups_follow_category_order_with_catch_all_last() {
        let portraits = CategoryRecord {
            id: Uuid::new_v4(),
            name: LocalizedText::new("Портрети", "Портреты", "Portraits"),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let dangling = Uuid::new_v4();
        let repo = FakeRepo {
            studies: vec![
                study(Some(portraits.id), "Evening portrait"),
                study(None, "Loose piece"),
                study(Some(dangling), "Orphaned"),
            ],
            categories: vec![portraits],
        };

        let groups = service(repo).grouped(Locale::En).await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Portraits");
        assert_eq!(groups[0].studies.len(), 1);
        assert_eq!(groups[1].title, "Other work");
        assert_eq!(groups[1].studies.len(), 2);
    }

    #[tokio::test]
    async fn empty_categories_are_dropped() {
        let empty = CategoryRecord {
            id: Uuid::new_v4(),
            name: LocalizedText::new("", "", "Weddings"),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let repo = FakeRepo {
            studies: vec![study(None, "Solo")],
            categories: vec![empty],
        };

        let groups = service(repo).grouped(Locale::Uk).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Інші роботи");
    }

    #[tokio::test]
    async fn project_detail_sanitizes_content() {
        let mut record = study(None, "Editorial");
        record.content = LocalizedText::new(
            "",
            "",
            "<p>Full retouch</p><script>alert('x')</script>",
        );
        let id = record.id;
        let repo = FakeRepo {
            studies: vec![record],
            categories: vec![],
        };

        let project = service(repo)
            .project(id, Locale::En)
            .await
            .unwrap()
            .expect("project");
        let html = project.content_html.expect("content");
        assert!(html.contains("<p>Full retouch</p>"));
        assert!(!html.contains("script"));
    }

    #[tokio::test]
    async fn missing_project_is_none() {
        let repo = FakeRepo {
            studies: vec![],
            categories: vec![],
        };
        let project = service(repo).project(Uuid::new_v4(), Locale::En).await.unwrap();
        assert!(project.is_none());
    }

    #[tokio::test]
    async fn cards_fall_back_through_legacy_fields() {
        let mut record = study(None, "");
        record.legacy_title = Some("Old title".into());
        record.legacy_services = Some(vec!["Retouch".into()]);
        let repo = FakeRepo {
            studies: vec![record],
            categories: vec![],
        };

        let groups = service(repo).grouped(Locale::Ru).await.unwrap();
        let card = &groups[0].studies[0];
        assert_eq!(card.title, "Old title");
        assert_eq!(card.services, ["Retouch".to_string()]);
    }
}
