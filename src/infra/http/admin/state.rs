use std::sync::Arc;

use crate::application::admin::{
    case_studies::AdminCaseStudyService, categories::AdminCategoryService,
    dashboard::AdminDashboardService, settings::AdminSettingsService,
};
use crate::application::session::AdminAuth;
use crate::infra::uploads::UploadStorage;

#[derive(Clone)]
pub struct AdminState {
    pub auth: Arc<AdminAuth>,
    pub dashboard: Arc<AdminDashboardService>,
    pub case_studies: Arc<AdminCaseStudyService>,
    pub categories: Arc<AdminCategoryService>,
    pub settings: Arc<AdminSettingsService>,
    pub upload_storage: Arc<UploadStorage>,
}
