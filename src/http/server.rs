//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for `/voting/*` and, when enabled, `/testnet/*`
//! - Wire up middleware (request id, tracing, timeout, metrics)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::blockchain::client::LedgerGateway;
use crate::blockchain::contract::ContractBinding;
use crate::blockchain::relay::SubmissionRelay;
use crate::config::GatewayConfig;
use crate::http::middleware::metrics::request_metrics_middleware;
use crate::http::{testnet, voting};
use crate::voting::VotingService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub voting: VotingService,
    pub relay: SubmissionRelay,
}

/// HTTP server for the voting gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server over an already connected ledger gateway and
    /// a resolved contract binding.
    pub fn new(config: GatewayConfig, gateway: Arc<dyn LedgerGateway>, binding: ContractBinding) -> Self {
        let state = AppState {
            voting: VotingService::new(gateway.clone(), binding, config.fees.clone()),
            relay: SubmissionRelay::new(gateway),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// An expired request answers an empty 500 like any other non-revert
    /// failure. On submit the transaction may still be mined afterwards.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(
                "/voting/candidates",
                post(voting::add_candidate).get(voting::list_candidates),
            )
            .route("/voting/vote", post(voting::vote))
            .route("/voting/winner", get(voting::winner));

        if config.testnet.enabled {
            tracing::warn!("Testnet signing routes enabled; never expose them with real keys");
            router = router
                .route("/testnet/sign", post(testnet::sign))
                .route("/testnet/submit", post(testnet::submit));
        }

        router
            .route_layer(middleware::from_fn(request_metrics_middleware))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        let request_id = req
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            path = %req.uri().path(),
                            request_id,
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Duration::from_secs(config.timeouts.request_secs),
                    )),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            testnet = self.config.testnet.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
