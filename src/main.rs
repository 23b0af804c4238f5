//! Herald - GraphQL pub/sub demonstration server
//!
//! Stands up a GraphQL API at /graphql with a handful of demonstration
//! queries, a validation-guarded mutation, and a timer-driven subscription
//! feed delivered over WebSocket.

mod api;
mod broadcast;
mod config;
mod graphql;
mod jobs;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::WebSocketUpgrade;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::broadcast::Broadcaster;
use crate::config::Config;
use crate::graphql::HeraldSchema;

/// Event payload carried on every topic: opaque JSON supplied by the
/// publisher.
pub type EventBus = Broadcaster<serde_json::Value>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub schema: HeraldSchema,
    pub broadcaster: EventBus,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let config = Arc::new(config);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Herald");
    tracing::info!("Configuration loaded");

    // One broadcaster instance, handed by clone to every publisher and
    // subscription resolver.
    let broadcaster = EventBus::new(config.subscriber_queue_capacity);

    // Build GraphQL schema
    let schema = graphql::build_schema(broadcaster.clone());
    tracing::info!("GraphQL schema built");

    // Start the periodic change announcer
    let cancel = tokio_util::sync::CancellationToken::new();
    let _ticker = jobs::start_ticker(broadcaster.clone(), config.tick_interval, cancel.clone());
    tracing::info!(
        interval_ms = config.tick_interval.as_millis() as u64,
        "Ticker started"
    );

    // Build application state
    let state = AppState {
        schema,
        broadcaster,
    };

    // Build router - GraphQL is the primary API
    let app = Router::new()
        // Health endpoint (no auth required)
        .merge(api::health::router())
        // GraphQL endpoint (handles all queries and mutations)
        .route("/graphql", get(graphiql).post(graphql_handler))
        // GraphQL WebSocket endpoint for subscriptions
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let host: IpAddr = config
        .host
        .as_deref()
        .unwrap_or("0.0.0.0")
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid HOST: {e}"))?;
    let addr = SocketAddr::from((host, config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    cancel.cancel();
    Ok(())
}

/// GraphQL query/mutation handler; errors are logged and scrubbed before
/// the response leaves the boundary
async fn graphql_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let response = state.schema.execute(req.into_inner()).await;
    graphql::errors::scrub_response(response).into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    // Check if this is a browser request (accepts HTML)
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(
            GraphiQLSource::build()
                .endpoint("/graphql")
                .subscription_endpoint("/graphql/ws")
                .finish(),
        )
        .into_response()
    } else {
        // Return a helpful JSON error for non-browser requests
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

/// GraphQL WebSocket handler for subscriptions
async fn graphql_ws_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    protocol: async_graphql_axum::GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| {
            async_graphql_axum::GraphQLWebSocket::new(socket, state.schema.clone(), protocol)
                .serve()
        })
}
