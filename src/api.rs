use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, DefaultBodyLimit, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::services::{InventoryService, ProcessError};
use crate::utils::{looks_like_xlsx, XLSX_MIME};

/// Shown when the export lacks the two LLANTAS separator rows
pub const STRUCTURAL_ERROR_MESSAGE: &str = "Error crítico: La estructura del Excel no es válida. No se encontró el separador 'LLANTAS' las veces necesarias.";
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Solo se permiten archivos Excel (.xlsx)";

#[derive(Clone)]
pub struct AppState {
    pub inventory_service: InventoryService,
    pub max_upload_bytes: usize,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Raw xlsx document
#[derive(ToSchema)]
#[schema(value_type = String, format = Binary)]
pub struct XlsxPayload(pub Vec<u8>);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProcessParams {
    /// Date printed in the sheet title (defaults to today)
    pub date: Option<NaiveDate>,
}

/// Errors surfaced to API clients
#[derive(Debug)]
pub enum ApiError {
    UnsupportedFormat,
    Structural,
    InvalidInput(String),
    Internal(String),
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Structural(_) => ApiError::Structural,
            ProcessError::Read(e) => ApiError::InvalidInput(e.to_string()),
            ProcessError::Format(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnsupportedFormat => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            ),
            ApiError::Structural => (
                StatusCode::UNPROCESSABLE_ENTITY,
                STRUCTURAL_ERROR_MESSAGE.to_string(),
            ),
            ApiError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, unexpected_error_message(&msg))
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                unexpected_error_message(&msg),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Generic message for failures the user cannot fix by editing the export
pub fn unexpected_error_message(detail: &str) -> String {
    format!("Ocurrió un error inesperado: {detail}")
}

#[derive(OpenApi)]
#[openapi(
    paths(health, process_inventory),
    components(schemas(HealthResponse, ErrorResponse, XlsxPayload)),
    tags((name = "inventory", description = "ERP inventory export processing"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/inventory/process", post(process_inventory))
        .layer(body_limit)
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "inventory",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Split an ERP export into the two warehouse price sheets
#[utoipa::path(
    post,
    path = "/api/v1/inventory/process",
    tag = "inventory",
    params(ProcessParams),
    request_body(
        content = XlsxPayload,
        content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        description = "Valor del inventario por clasificación.xlsx as exported by the ERP"
    ),
    responses(
        (status = 200, description = "Processed workbook", body = XlsxPayload,
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Invalid date or unreadable workbook", body = ErrorResponse),
        (status = 415, description = "Upload is not an xlsx document", body = ErrorResponse),
        (status = 422, description = "LLANTAS separator missing", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body), fields(bytes = body.len()))]
async fn process_inventory(
    State(state): State<AppState>,
    query: Result<Query<ProcessParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        warn!("Rejected query string: {}", rejection);
        ApiError::InvalidInput(rejection.body_text())
    })?;

    if !looks_like_xlsx(&body) {
        warn!("Rejected upload that is not an xlsx document");
        return Err(ApiError::UnsupportedFormat);
    }

    let report_date = params.date.unwrap_or_else(|| Local::now().date_naive());
    debug!("Processing upload with report date {}", report_date);

    let service = state.inventory_service.clone();
    let processed = tokio::task::spawn_blocking(move || service.process(&body, report_date))
        .await
        .map_err(|e| {
            error!("Processing task failed: {}", e);
            ApiError::Internal(e.to_string())
        })??;

    info!(
        "Returning {} ({} bytes)",
        processed.file_name,
        processed.workbook.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", processed.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        processed.workbook,
    )
        .into_response())
}
