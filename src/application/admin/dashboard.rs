use std::sync::Arc;

use crate::application::repos::{CaseStudiesRepo, CategoriesRepo, RepoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCounts {
    pub case_studies: u64,
    pub categories: u64,
}

#[derive(Clone)]
pub struct AdminDashboardService {
    case_studies: Arc<dyn CaseStudiesRepo>,
    categories: Arc<dyn CategoriesRepo>,
}

impl AdminDashboardService {
    pub fn new(
        case_studies: Arc<dyn CaseStudiesRepo>,
        categories: Arc<dyn CategoriesRepo>,
    ) -> Self {
        Self {
            case_studies,
            categories,
        }
    }

    pub async fn counts(&self) -> Result<DashboardCounts, RepoError> {
        let case_studies = self.case_studies.count_case_studies().await?;
        let categories = self.categories.count_categories().await?;
        Ok(DashboardCounts {
            case_studies,
            categories,
        })
    }
}
