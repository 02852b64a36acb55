use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use finance_coach_core::domain::profile::ProfileRequest;
use finance_coach_core::domain::report::CombinedReport;
use finance_coach_core::llm::Provider;
use finance_coach_core::FinanceCoach;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finance_coach_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    // A selected backend without credentials stops startup here.
    let coach = FinanceCoach::from_settings(&settings).inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
        tracing::error!(error = %e, "invalid narrative configuration");
    })?;

    let app = router(AppState {
        coach: Arc::new(coach),
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/report", post(create_report))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    coach: Arc<FinanceCoach>,
}

#[derive(Debug, Serialize)]
struct ApiReport {
    report_id: Uuid,
    generated_at: DateTime<Utc>,
    narrative_backend: Option<Provider>,
    report: CombinedReport,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

type ApiFailure = (StatusCode, Json<ApiError>);

/// Body rejections keep axum's status (422 for data errors such as a repeated expense
/// category, 400 for broken syntax) but answer with the same `{error}` shape.
fn rejected_body(rejection: JsonRejection) -> ApiFailure {
    tracing::info!(error = %rejection.body_text(), "rejected request body");
    (
        rejection.status(),
        Json(ApiError {
            error: rejection.body_text(),
        }),
    )
}

async fn create_report(
    State(state): State<AppState>,
    body: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ApiReport>, ApiFailure> {
    let Json(req) = body.map_err(rejected_body)?;
    let report = state.coach.run_request(req).await.map_err(|e| {
        tracing::info!(error = %e, "rejected profile");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError {
                error: e.to_string(),
            }),
        )
    })?;

    let report_id = Uuid::new_v4();
    tracing::info!(%report_id, "report generated");

    Ok(Json(ApiReport {
        report_id,
        generated_at: Utc::now(),
        narrative_backend: state.coach.narrator().provider(),
        report,
    }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &finance_coach_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
