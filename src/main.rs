use std::{process, sync::Arc};

use lustro::{
    application::{
        admin::{
            case_studies::AdminCaseStudyService, categories::AdminCategoryService,
            dashboard::AdminDashboardService, settings::AdminSettingsService,
        },
        error::AppError,
        geo::GeoService,
        leads::{LeadService, LeadTransport},
        repos::{
            CaseStudiesRepo, CaseStudiesWriteRepo, CategoriesRepo, CategoriesWriteRepo, HealthRepo,
            SettingsRepo,
        },
        session::AdminAuth,
        showcase::ShowcaseService,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        geoip::IpApiLookup,
        http::{self, AdminState, PublicState},
        telegram::TelegramApi,
        telemetry,
        uploads::UploadStorage,
    },
};
use futures::FutureExt;
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let database_url = settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| AppError::unexpected("database.url is not configured"))?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    let db = Arc::new(PostgresRepositories::new(pool));

    let case_studies_read: Arc<dyn CaseStudiesRepo> = db.clone();
    let case_studies_write: Arc<dyn CaseStudiesWriteRepo> = db.clone();
    let categories_read: Arc<dyn CategoriesRepo> = db.clone();
    let categories_write: Arc<dyn CategoriesWriteRepo> = db.clone();
    let settings_repo: Arc<dyn SettingsRepo> = db.clone();
    let health: Arc<dyn HealthRepo> = db.clone();

    let transport: Option<Arc<dyn LeadTransport>> = match &settings.telegram.bot_token {
        Some(token) => Some(Arc::new(TelegramApi::new(
            settings.telegram.api_base_url.clone(),
            token.clone(),
        ))),
        None => {
            warn!("telegram.bot_token not configured, lead delivery is disabled");
            None
        }
    };
    let leads = Arc::new(LeadService::new(
        transport,
        settings.telegram.chat_id.clone(),
    ));

    let geo = Arc::new(GeoService::new(
        Arc::new(IpApiLookup::new(settings.geolocation.api_base_url.clone())),
        settings.geolocation.cache_ttl,
        settings.geolocation.cache_capacity,
    ));

    if settings.admin.password.is_none() {
        warn!("admin.password not configured, the admin panel will reject all logins");
    }
    let auth = Arc::new(AdminAuth::new(
        settings.admin.password.as_deref(),
        settings.admin.session_ttl,
    ));

    let upload_storage = Arc::new(
        UploadStorage::new(settings.uploads.directory.clone())
            .map_err(|err| AppError::from(InfraError::from(err)))?,
    );

    let showcase = Arc::new(ShowcaseService::new(
        case_studies_read.clone(),
        categories_read.clone(),
    ));

    let public_state = PublicState {
        showcase,
        settings: settings_repo.clone(),
        leads,
        geo,
        health,
        upload_storage: upload_storage.clone(),
    };

    let admin_state = AdminState {
        auth,
        dashboard: Arc::new(AdminDashboardService::new(
            case_studies_read.clone(),
            categories_read.clone(),
        )),
        case_studies: Arc::new(AdminCaseStudyService::new(
            case_studies_read,
            case_studies_write,
            categories_read.clone(),
        )),
        categories: Arc::new(AdminCategoryService::new(categories_read, categories_write)),
        settings: Arc::new(AdminSettingsService::new(settings_repo)),
        upload_storage,
    };

    serve_http(&settings, public_state, admin_state).await
}

async fn serve_http(
    settings: &config::Settings,
    public_state: PublicState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_router(public_state);
    let upload_body_limit = settings.uploads.max_request_bytes.get() as usize;
    let admin_router = http::build_admin_router(admin_state, upload_body_limit);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        public = %settings.server.public_addr,
        admin = %settings.server.admin_addr,
        "listening",
    );

    let shutdown = shutdown_signal(settings.server.graceful_shutdown).shared();
    let public_server = axum::serve(public_listener, public_router.into_make_service())
        .with_graceful_shutdown(shutdown.clone());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service())
        .with_graceful_shutdown(shutdown);

    try_join!(public_server, admin_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

/// Resolves on Ctrl-C. Open connections get the configured grace period
/// to drain before the process exits regardless.
async fn shutdown_signal(grace: std::time::Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!("shutdown signal received, draining connections");
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        warn!("graceful shutdown deadline reached, exiting");
        process::exit(0);
    });
}
