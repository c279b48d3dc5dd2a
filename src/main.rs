mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, EmailTransport};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::middleware;
use crate::features::admin::{routes as admin_routes, AdminConfigService};
use crate::features::reports::models::default_recipient_entries;
use crate::features::reports::routes as reports_routes;
use crate::features::submissions::{routes as submissions_routes, SubmissionService};
use crate::modules::email::{EmailGateway, HttpApiMailer, SmtpMailer};
use crate::modules::storage::RecipientStore;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    if config.admin.password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; all admin requests will be denied");
    }

    // Initialize the recipient configuration store, seeding the document with
    // the report directory on first start
    let store = Arc::new(RecipientStore::new(&config.recipients));
    store
        .ensure_seeded(default_recipient_entries())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed recipient store: {}", e))?;
    tracing::info!(
        "Recipient store ready at {}",
        config.recipients.path.display()
    );

    // Construct the active email transport. A misconfigured transport is
    // logged up front but does not stop the server; affected requests fail
    // with a configuration error.
    let mailer: Arc<dyn EmailGateway> = match config.email.transport {
        EmailTransport::Smtp => Arc::new(SmtpMailer::new(config.email.smtp.clone())),
        EmailTransport::HttpApi => Arc::new(HttpApiMailer::new(config.email.http_api.clone())),
    };
    match mailer.verify() {
        Ok(()) => tracing::info!("Email transport verified ({:?})", config.email.transport),
        Err(e) => tracing::warn!("Email transport not ready: {}", e),
    }

    // Initialize services
    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&store),
        Arc::clone(&mailer),
        config.email.from_email.clone(),
        config.recipients.org_file_prefix.clone(),
    ));
    let admin_service = Arc::new(AdminConfigService::new(
        Arc::clone(&store),
        Arc::clone(&mailer),
        config.email.from_email.clone(),
    ));
    tracing::info!("Services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(reports_routes())
        .merge(submissions_routes(submission_service));

    // Admin routes (shared-secret bearer token)
    let protected_routes = admin_routes(admin_service, Arc::new(config.admin.clone()));

    let app = Router::new()
        .merge(swagger)
        .merge(public_routes)
        .merge(protected_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
