use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAccountRepository, InMemoryProfileRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use internlink::config::AppConfig;
use internlink::error::AppError;
use internlink::telemetry;
use internlink::workflows::accounts::{AccountService, TokenAuthority};
use internlink::workflows::eligibility::EligibilityEvaluator;
use internlink::workflows::profiles::CandidateProfileService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let tokens = Arc::new(TokenAuthority::from_config(&config.auth));
    let evaluator = EligibilityEvaluator::new(config.eligibility);
    let account_service = Arc::new(AccountService::new(
        Arc::new(InMemoryAccountRepository::default()),
        tokens.clone(),
    ));
    let profile_service = Arc::new(CandidateProfileService::new(
        Arc::new(InMemoryProfileRepository::default()),
        evaluator,
    ));

    let app = with_service_routes(account_service, profile_service, tokens)
        .layer(Extension(evaluator))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        min_age = config.eligibility.min_age,
        max_age = config.eligibility.max_age,
        "internlink service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
