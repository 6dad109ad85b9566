use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use lustro::application::geo::{CountryLookup, GeoError, GeoService};
use lustro::application::leads::{LeadService, LeadTransport, TransportError};
use lustro::application::repos::{
    CaseStudiesRepo, CategoriesRepo, HealthRepo, RepoError, SettingsRepo, SiteSettingsDraft,
};
use lustro::application::showcase::ShowcaseService;
use lustro::domain::entities::{CaseStudyRecord, CategoryRecord, SiteSettingsRecord};
use lustro::infra::http::{PublicState, build_router};
use lustro::infra::uploads::UploadStorage;

struct EmptyContent;

#[async_trait]
impl CaseStudiesRepo for EmptyContent {
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
impl CategoriesRepo for EmptyContent {
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
impl SettingsRepo for EmptyContent {
    async fn load_site_settings(&self) -> Result<Option<SiteSettingsRecord>, RepoError> {
        Ok(None)
    }

    async fn upsert_site_settings(
        &self,
        _draft: SiteSettingsDraft,
    ) -> Result<SiteSettingsRecord, RepoError> {
        Err(RepoError::NotFound)
    }
}

#[async_trait]
impl HealthRepo for EmptyContent {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait]
impl CountryLookup for EmptyContent {
    async fn country_for_ip(&self, _ip: IpAddr) -> Result<Option<String>, GeoError> {
        Ok(None)
    }
}

#[derive(Default)]
struct CapturingTransport {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl LeadTransport for CapturingTransport {
    async fn latest_chat_id(&self) -> Result<Option<String>, TransportError> {
        Ok(None)
    }

    async fn send_notification(&self, chat_id: &str, text: &str) -> Result<bool, TransportError> {
        self.sent
            .lock()
            .await
            .push((chat_id.to_owned(), text.to_owned()));
        Ok(true)
    }
}

fn router_with_leads(leads: LeadService) -> Router {
    let content = Arc::new(EmptyContent);
    let storage_root = tempfile::tempdir().unwrap().keep();
    build_router(PublicState {
        showcase: Arc::new(ShowcaseService::new(content.clone(), content.clone())),
        settings: content.clone(),
        leads: Arc::new(leads),
        geo: Arc::new(GeoService::new(
            content.clone(),
            Duration::from_secs(3600),
            NonZeroUsize::new(16).unwrap(),
        )),
        health: content,
        upload_storage: Arc::new(UploadStorage::new(storage_root).unwrap()),
    })
}

fn lead_request(body: &str) -> Request<Body> {
    Request::post("/api/leads")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_lead_is_relayed_to_the_configured_chat() {
    let transport = Arc::new(CapturingTransport::default());
    let router = router_with_leads(LeadService::new(
        Some(transport.clone()),
        Some("42".into()),
    ));

    let response = router
        .oneshot(lead_request(
            r#"{"name":"Anna","platform":"telegram","contact":"@anna","message":"Ten photos from a studio shoot"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let sent = transport.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "42");
    assert!(sent[0].1.contains("Anna"));
}

#[tokio::test]
async fn missing_fields_are_rejected_with_the_field_list() {
    let router = router_with_leads(LeadService::new(
        Some(Arc::new(CapturingTransport::default())),
        Some("42".into()),
    ));

    let response = router
        .oneshot(lead_request(r#"{"name":"","platform":"telegram"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing required fields: name, contact");
}

#[tokio::test]
async fn unknown_platform_is_rejected() {
    let router = router_with_leads(LeadService::new(
        Some(Arc::new(CapturingTransport::default())),
        Some("42".into()),
    ));

    let response = router
        .oneshot(lead_request(
            r#"{"name":"Anna","platform":"whatsapp","contact":"@anna"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid platform");
}

#[tokio::test]
async fn missing_bot_token_reads_as_server_error() {
    let router = router_with_leads(LeadService::new(None, Some("42".into())));

    let response = router
        .oneshot(lead_request(
            r#"{"name":"Anna","platform":"telegram","contact":"@anna"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn lead_endpoint_only_accepts_post() {
    let router = router_with_leads(LeadService::new(
        Some(Arc::new(CapturingTransport::default())),
        Some("42".into()),
    ));

    let response = router
        .oneshot(Request::get("/api/leads").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
