// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use prodtrack_api::{
    ApiError, EntryRequest, EntryResponse, LossRequest, entry_to_response, parse_entry_request,
};
use prodtrack_domain::ProductionEntry;
use prodtrack_persistence::{Persistence, PersistenceError};
use prodtrack_report::{ProductionReport, ReportKind, ReportRange, build_report, render_pdf};

/// Production tracking server - HTTP API for shift production entries and
/// reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for production entries and losses.
    persistence: Arc<Mutex<Persistence>>,
}

/// API request body for creating or replacing a production entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EntryApiRequest {
    /// The production line number (1 or 2).
    line_number: u8,
    /// The window start time as `HH:MM`.
    from_time: String,
    /// The window end time as `HH:MM`.
    to_time: String,
    /// Planned output count for the window.
    planned: u32,
    /// Actual output count for the window.
    actual: u32,
    /// Total downtime minutes; defaults to 0 when omitted.
    #[serde(default)]
    total_loss_time: Option<u32>,
    /// Downtime causes; defaults to empty when omitted.
    #[serde(default)]
    losses: Vec<LossApiRequest>,
}

/// One downtime cause within an entry request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LossApiRequest {
    /// The reason label.
    reason: String,
    /// Minutes lost to this cause.
    loss_time: u32,
    /// Optional free-text remarks.
    #[serde(default)]
    remarks: Option<String>,
}

/// API response body describing a stored production entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryApiResponse {
    /// The entry's database identifier.
    id: i64,
    /// The production line number (1 or 2).
    line_number: u8,
    /// The window start time as `HH:MM`.
    from_time: String,
    /// The window end time as `HH:MM`.
    to_time: String,
    /// Planned output count.
    planned: u32,
    /// Actual output count.
    actual: u32,
    /// Total downtime minutes.
    total_loss_time: u32,
    /// Downtime causes within the window.
    losses: Vec<LossApiResponse>,
}

/// One downtime cause within an entry response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LossApiResponse {
    /// The reason label.
    reason: String,
    /// Minutes lost to this cause.
    loss_time: u32,
    /// Optional free-text remarks.
    remarks: Option<String>,
}

/// API response for write operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// The ID of the affected entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_id: Option<i64>,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Fixed status string.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::EntryNotFound(entry_id) => Self {
                status: StatusCode::NOT_FOUND,
                message: format!("Production entry {entry_id} not found"),
            },
            other => {
                error!(error = %other, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Persistence error: {other}"),
                }
            }
        }
    }
}

/// Converts a wire request body into the API boundary's request type.
fn request_to_api(req: EntryApiRequest) -> EntryRequest {
    EntryRequest {
        line_number: req.line_number,
        from_time: req.from_time,
        to_time: req.to_time,
        planned: req.planned,
        actual: req.actual,
        total_loss_time: req.total_loss_time,
        losses: req
            .losses
            .into_iter()
            .map(|loss| LossRequest {
                reason: loss.reason,
                loss_time: loss.loss_time,
                remarks: loss.remarks,
            })
            .collect(),
    }
}

/// Converts an API boundary response into its wire form.
fn response_to_wire(response: EntryResponse) -> EntryApiResponse {
    EntryApiResponse {
        id: response.id,
        line_number: response.line_number,
        from_time: response.from_time,
        to_time: response.to_time,
        planned: response.planned,
        actual: response.actual,
        total_loss_time: response.total_loss_time,
        losses: response
            .losses
            .into_iter()
            .map(|loss| LossApiResponse {
                reason: loss.reason,
                loss_time: loss.loss_time,
                remarks: loss.remarks,
            })
            .collect(),
    }
}

/// Parses a report kind path segment.
fn parse_report_kind(kind: &str) -> Result<ReportKind, HttpError> {
    match kind {
        "daily" => Ok(ReportKind::Daily),
        "weekly" => Ok(ReportKind::Weekly),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid report kind: '{kind}'. Must be 'daily' or 'weekly'"),
        }),
    }
}

/// Handler for POST `/api/entry` endpoint.
///
/// Validates and inserts a new production entry with its losses.
async fn handle_create_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EntryApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        line_number = req.line_number,
        from_time = %req.from_time,
        to_time = %req.to_time,
        "Handling create_entry request"
    );

    let recorded_at: NaiveDateTime = Local::now().naive_local();
    let entry: ProductionEntry = parse_entry_request(&request_to_api(req), recorded_at)?;

    let mut persistence = app_state.persistence.lock().await;
    let entry_id: i64 = persistence.insert_entry(&entry)?;
    drop(persistence);

    info!(entry_id, "Successfully added production entry");

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Entry added successfully")),
        entry_id: Some(entry_id),
    }))
}

/// Handler for GET `/api/entry/{entry_id}` endpoint.
///
/// Returns one production entry with its losses.
async fn handle_get_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<i64>,
) -> Result<Json<EntryApiResponse>, HttpError> {
    info!(entry_id, "Handling get_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let entry: ProductionEntry = persistence.get_entry(entry_id)?;
    drop(persistence);

    Ok(Json(response_to_wire(entry_to_response(&entry))))
}

/// Handler for PUT `/api/entry/{entry_id}` endpoint.
///
/// Replaces the entry's fields and its complete loss list.
async fn handle_update_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<i64>,
    Json(req): Json<EntryApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(entry_id, "Handling update_entry request");

    // The recording timestamp is kept by the update; parsing just needs one.
    let recorded_at: NaiveDateTime = Local::now().naive_local();
    let entry: ProductionEntry = parse_entry_request(&request_to_api(req), recorded_at)?;

    let mut persistence = app_state.persistence.lock().await;
    persistence.update_entry(entry_id, &entry)?;
    drop(persistence);

    info!(entry_id, "Successfully updated production entry");

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Entry updated successfully")),
        entry_id: Some(entry_id),
    }))
}

/// Handler for DELETE `/api/entry/{entry_id}` endpoint.
///
/// Deletes the entry; its losses are removed by cascade.
async fn handle_delete_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(entry_id, "Handling delete_entry request");

    let mut persistence = app_state.persistence.lock().await;
    persistence.delete_entry(entry_id)?;
    drop(persistence);

    info!(entry_id, "Successfully deleted production entry");

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Entry deleted successfully")),
        entry_id: Some(entry_id),
    }))
}

/// Handler for GET `/api/daily-report` endpoint.
///
/// Returns today's entries with their losses, ordered by window start.
async fn handle_daily_report(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<EntryApiResponse>>, HttpError> {
    let today: NaiveDate = Local::now().date_naive();
    info!(%today, "Handling daily_report request");

    let mut persistence = app_state.persistence.lock().await;
    let entries: Vec<ProductionEntry> = persistence.entries_for_date(today)?;
    drop(persistence);

    let response: Vec<EntryApiResponse> = entries
        .iter()
        .map(|entry| response_to_wire(entry_to_response(entry)))
        .collect();

    Ok(Json(response))
}

/// Handler for GET `/api/report/{kind}` endpoint.
///
/// Aggregates the requested range and returns a rendered PDF document.
async fn handle_render_report(
    AxumState(app_state): AxumState<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, HttpError> {
    info!(kind = %kind, "Handling render_report request");

    let report_kind: ReportKind = parse_report_kind(&kind)?;
    let today: NaiveDate = Local::now().date_naive();
    let range: ReportRange = report_kind.range(today);

    let mut persistence = app_state.persistence.lock().await;
    let entries: Vec<ProductionEntry> = persistence.entries_between(range.start, range.end)?;
    drop(persistence);

    let report: ProductionReport = build_report(&entries);
    let bytes: Vec<u8> = render_pdf(&report, &range);

    info!(
        kind = %kind,
        entries = entries.len(),
        bytes = bytes.len(),
        "Rendered production report"
    );

    let headers = [
        (header::CONTENT_TYPE, String::from("application/pdf")),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", range.filename()),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/entry", post(handle_create_entry))
        .route(
            "/api/entry/{entry_id}",
            get(handle_get_entry)
                .put(handle_update_entry)
                .delete(handle_delete_entry),
        )
        .route("/api/daily-report", get(handle_daily_report))
        .route("/api/report/{kind}", get(handle_render_report))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing production tracking server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Helper to create a test entry request body.
    fn create_test_entry_request(line_number: u8, from: &str, to: &str) -> EntryApiRequest {
        EntryApiRequest {
            line_number,
            from_time: from.to_string(),
            to_time: to.to_string(),
            planned: 500,
            actual: 480,
            total_loss_time: Some(20),
            losses: vec![LossApiRequest {
                reason: String::from("Changeover"),
                loss_time: 20,
                remarks: Some(String::from("tooling swap")),
            }],
        }
    }

    /// Posts an entry and returns the assigned ID.
    async fn post_entry(app: &Router, req: &EntryApiRequest) -> i64 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entry")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(req).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let write_response: WriteResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert!(write_response.success);
        write_response.entry_id.unwrap()
    }

    #[tokio::test]
    async fn test_create_entry_succeeds() {
        let app: Router = build_router(create_test_app_state());

        let entry_id: i64 = post_entry(&app, &create_test_entry_request(1, "08:00", "16:00")).await;

        assert!(entry_id > 0);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let app: Router = build_router(create_test_app_state());
        let entry_id: i64 = post_entry(&app, &create_test_entry_request(2, "08:00", "16:00")).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/entry/{entry_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let entry: EntryApiResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(entry.id, entry_id);
        assert_eq!(entry.line_number, 2);
        assert_eq!(entry.from_time, "08:00");
        assert_eq!(entry.to_time, "16:00");
        assert_eq!(entry.planned, 500);
        assert_eq!(entry.actual, 480);
        assert_eq!(entry.total_loss_time, 20);
        assert_eq!(entry.losses.len(), 1);
        assert_eq!(entry.losses[0].reason, "Changeover");
        assert_eq!(entry.losses[0].remarks.as_deref(), Some("tooling swap"));
    }

    #[tokio::test]
    async fn test_create_entry_defaults_optional_fields() {
        let app: Router = build_router(create_test_app_state());

        // Minimal body: no total_loss_time, no losses
        let body = serde_json::json!({
            "line_number": 1,
            "from_time": "08:00",
            "to_time": "16:00",
            "planned": 100,
            "actual": 100
        });

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entry")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let write_response: WriteResponse = serde_json::from_slice(&body_bytes).unwrap();
        let entry_id: i64 = write_response.entry_id.unwrap();

        let get_response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/entry/{entry_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let get_bytes = axum::body::to_bytes(get_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let entry: EntryApiResponse = serde_json::from_slice(&get_bytes).unwrap();

        assert_eq!(entry.total_loss_time, 0);
        assert!(entry.losses.is_empty());
    }

    #[tokio::test]
    async fn test_create_entry_with_invalid_line_fails() {
        let app: Router = build_router(create_test_app_state());
        let req: EntryApiRequest = create_test_entry_request(3, "08:00", "16:00");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entry")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert!(error_response.error);
        assert!(error_response.message.contains("line_number"));
    }

    #[tokio::test]
    async fn test_create_entry_with_inverted_window_fails() {
        let app: Router = build_router(create_test_app_state());
        let req: EntryApiRequest = create_test_entry_request(1, "16:00", "08:00");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entry")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_persist_anything() {
        let app: Router = build_router(create_test_app_state());
        let req: EntryApiRequest = create_test_entry_request(3, "08:00", "16:00");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entry")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let report_response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/daily-report")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(report_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let entries: Vec<EntryApiResponse> = serde_json::from_slice(&body_bytes).unwrap();

        assert!(entries.is_empty(), "No entry should have been persisted");
    }

    #[tokio::test]
    async fn test_get_missing_entry_returns_404() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/entry/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_losses() {
        let app: Router = build_router(create_test_app_state());
        let entry_id: i64 = post_entry(&app, &create_test_entry_request(1, "08:00", "16:00")).await;

        let replacement: EntryApiRequest = EntryApiRequest {
            line_number: 2,
            from_time: String::from("16:00"),
            to_time: String::from("23:30"),
            planned: 600,
            actual: 590,
            total_loss_time: Some(5),
            losses: vec![LossApiRequest {
                reason: String::from("Jam"),
                loss_time: 5,
                remarks: None,
            }],
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/entry/{entry_id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&replacement).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let get_response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/entry/{entry_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(get_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let entry: EntryApiResponse = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(entry.line_number, 2);
        assert_eq!(entry.from_time, "16:00");
        assert_eq!(entry.planned, 600);
        assert_eq!(entry.losses.len(), 1);
        assert_eq!(entry.losses[0].reason, "Jam");
    }

    #[tokio::test]
    async fn test_update_missing_entry_returns_404() {
        let app: Router = build_router(create_test_app_state());
        let req: EntryApiRequest = create_test_entry_request(1, "08:00", "16:00");

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/entry/99")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&req).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_entry_then_get_returns_404() {
        let app: Router = build_router(create_test_app_state());
        let entry_id: i64 = post_entry(&app, &create_test_entry_request(1, "08:00", "16:00")).await;

        let delete_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/entry/{entry_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete_response.status(), HttpStatusCode::OK);

        let get_response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/entry/{entry_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(get_response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_entry_returns_404() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/entry/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_daily_report_orders_by_window_start() {
        let app: Router = build_router(create_test_app_state());

        // Created out of window order; both are recorded "today"
        post_entry(&app, &create_test_entry_request(1, "16:00", "23:30")).await;
        post_entry(&app, &create_test_entry_request(1, "08:00", "16:00")).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/daily-report")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let entries: Vec<EntryApiResponse> = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].from_time, "08:00");
        assert_eq!(entries[1].from_time, "16:00");
    }

    #[tokio::test]
    async fn test_daily_pdf_report_returns_pdf_bytes() {
        let app: Router = build_router(create_test_app_state());
        post_entry(&app, &create_test_entry_request(1, "08:00", "16:00")).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/report/daily")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"production_report_"));

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body_bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_weekly_pdf_report_includes_todays_entries() {
        let app: Router = build_router(create_test_app_state());
        post_entry(&app, &create_test_entry_request(2, "08:00", "16:00")).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/report/weekly")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        // Content streams are uncompressed; the loss summary row is visible.
        let needle: &[u8] = b"Total for Changeover";
        assert!(
            body_bytes
                .windows(needle.len())
                .any(|window| window == needle)
        );
    }

    #[tokio::test]
    async fn test_invalid_report_kind_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/report/monthly")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(health.status, "ok");
    }
}
