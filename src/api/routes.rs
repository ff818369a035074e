use axum::{
    routing::get,
    Router,
    extract::{Query, State},
    response::IntoResponse,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use std::time::Instant;
use tracing::info;

use crate::error::{AppError, Result};
use crate::api::models::{HomeResponse, PinterestDataQuery};
use crate::api::response;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/get_pinterest_data", get(pinterest_data_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn home_handler() -> impl IntoResponse {
    response::success(HomeResponse::default())
}

async fn pinterest_data_handler(
    State(state): State<AppState>,
    Query(query): Query<PinterestDataQuery>,
) -> Result<impl IntoResponse> {
    let post_url = query.post_url().ok_or(AppError::MissingUrl)?;

    let start_time = Instant::now();
    let data = state.downloader.fetch(post_url).await?;
    info!(post_url, elapsed = ?start_time.elapsed(), "resolved pinterest data");

    Ok(response::success(data))
}
