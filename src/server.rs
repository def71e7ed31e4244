use std::net::SocketAddr;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::context::AppContext;
use crate::domain::ticket::{Ticket, load_tickets};
use crate::error::AppResult;
use crate::workflow::batch::classify_batch;

pub async fn serve(ctx: AppContext, port: u16) -> AppResult<()> {
    let app = router(ctx);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/classify", post(classify))
        .route("/process-batch", post(process_batch))
        .layer(cors)
        .with_state(ctx)
}

async fn health(State(ctx): State<AppContext>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "classifier_ready": ctx.classifier_ready(),
    }))
}

async fn classify(State(ctx): State<AppContext>, Json(ticket): Json<Ticket>) -> Response {
    let Some(classifier) = ctx.classifier.as_ref() else {
        return not_initialized();
    };

    let outcome = classifier.classify(&ticket).await;
    Json(outcome).into_response()
}

async fn process_batch(State(ctx): State<AppContext>) -> Response {
    let Some(classifier) = ctx.classifier.as_ref() else {
        return not_initialized();
    };

    match load_tickets(&ctx.config.tickets_path) {
        Ok(tickets) => {
            let results = classify_batch(classifier.as_ref(), &tickets).await;
            Json(results).into_response()
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

fn not_initialized() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "classifier not initialized" })),
    )
        .into_response()
}
