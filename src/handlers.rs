use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::{
    CreateInsuredRequest, InsuredResponse, MessageResponse, PagedResponse, PageParams,
    SearchResponse, UpdateInsuredRequest,
};
use crate::service::InsuredService;
use crate::validation::{validate_create, validate_update};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
}

/// The insured resource routes, without middleware. The caller layers on
/// whatever the deployment needs (rate limiting, body limits) and merges
/// the health check.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/insureds", get(list_insureds).post(create_insured))
        .route(
            "/api/insureds/:id",
            get(get_insured).put(update_insured).delete(delete_insured),
        )
        .route("/api/insureds/search/:fragment", get(search_insureds))
}

/// The complete router with state applied: the API routes plus the health
/// check. Deployment middleware is left to `main`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api_routes())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "seguros-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /api/insureds?pageNumber=&pageSize=
pub async fn list_insureds(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResponse<InsuredResponse>>, AppError> {
    tracing::debug!("GET /api/insureds - params: {:?}", params);

    let service = InsuredService::new(state.db.clone());
    let page = service
        .get_all(
            params.page_number.unwrap_or(1),
            params.page_size.unwrap_or(10),
        )
        .await?;

    Ok(Json(page))
}

/// GET /api/insureds/:id
pub async fn get_insured(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<InsuredResponse>, AppError> {
    tracing::debug!("GET /api/insureds/{}", id);

    let service = InsuredService::new(state.db.clone());
    let insured = service.get_by_id(id).await?;

    Ok(Json(insured))
}

/// GET /api/insureds/search/:fragment
pub async fn search_insureds(
    State(state): State<Arc<AppState>>,
    AppPath(fragment): AppPath<String>,
) -> Result<Json<SearchResponse<InsuredResponse>>, AppError> {
    tracing::debug!("GET /api/insureds/search/{}", fragment);

    let service = InsuredService::new(state.db.clone());
    let result = service.search_by_identification(&fragment).await?;

    Ok(Json(result))
}

/// POST /api/insureds
///
/// Structural validation runs before the service; business rules
/// (uniqueness, age) live in the service. On success the response is
/// `201 Created` with a `Location` header resolving to the get-by-id route.
pub async fn create_insured(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<CreateInsuredRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(
        "POST /api/insureds - id {}",
        request.identification_number
    );

    let errors = validate_create(&request);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let service = InsuredService::new(state.db.clone());
    let created = service.create(request).await?;
    let location = format!("/api/insureds/{}", created.identification_number);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/insureds/:id
pub async fn update_insured(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateInsuredRequest>,
) -> Result<Json<InsuredResponse>, AppError> {
    tracing::debug!("PUT /api/insureds/{}", id);

    let errors = validate_update(&request);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let service = InsuredService::new(state.db.clone());
    let updated = service.update(id, request).await?;

    Ok(Json(updated))
}

/// DELETE /api/insureds/:id
pub async fn delete_insured(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    tracing::debug!("DELETE /api/insureds/{}", id);

    let service = InsuredService::new(state.db.clone());
    service.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Insured deleted successfully".to_string(),
    }))
}
