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

mod identity;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use timesheet::WorkflowConfig;
use timesheet_api::{
    AdminOverrideRequest, ApiError, ListMineRequest, ListMineResponse, ReviewActionRequest,
    ReviewRequest, ReviewResponse, StatusHistoryResponse, SubmitTimesheetRequest, TimesheetInfo,
    UpsertTimesheetRequest, admin_override, list_mine, review, review_action, status_history,
    submit_mine, upsert_mine,
};
use timesheet_domain::EditPolicy;
use timesheet_persistence::{PersistenceError, SqlitePersistence, UserData};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::identity::RequestIdentity;

/// Timesheet Server - HTTP server for the weekly timesheet workflow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Lock submitted timesheets against owner edits, not only approved ones
    #[arg(long)]
    lock_submitted: bool,

    /// Register the demo accounts and a sample worker timesheet on startup
    #[arg(long)]
    seed_demo_users: bool,
}

impl Args {
    const fn workflow_config(&self) -> WorkflowConfig {
        if self.lock_submitted {
            WorkflowConfig::new(EditPolicy::LockSubmittedAndApproved)
        } else {
            WorkflowConfig::new(EditPolicy::LockApprovedOnly)
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialised behind a mutex.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Workflow configuration fixed at startup.
    config: WorkflowConfig,
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
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidState { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Handler for GET `/api/timesheets/mine`.
///
/// Lists the caller's own timesheets, optionally restricted by year and week.
async fn handle_list_mine(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Query(query): Query<ListMineRequest>,
) -> Result<Json<ListMineResponse>, HttpError> {
    info!(username = %user.username, "Handling list_mine request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListMineResponse = list_mine(&mut *persistence, &identity, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/timesheets/upsert`.
async fn handle_upsert(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Json(req): Json<UpsertTimesheetRequest>,
) -> Result<Json<TimesheetInfo>, HttpError> {
    info!(
        username = %user.username,
        year = req.year,
        week = req.week,
        rows = req.rows.len(),
        "Handling upsert request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TimesheetInfo =
        upsert_mine(&mut *persistence, &identity, &app_state.config, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/timesheets/submit`.
async fn handle_submit(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Json(req): Json<SubmitTimesheetRequest>,
) -> Result<Json<TimesheetInfo>, HttpError> {
    info!(
        username = %user.username,
        year = req.year,
        week = req.week,
        "Handling submit request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TimesheetInfo = submit_mine(&mut *persistence, &identity, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/timesheets/review`.
async fn handle_review(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Query(query): Query<ReviewRequest>,
) -> Result<Json<ReviewResponse>, HttpError> {
    info!(username = %user.username, "Handling review request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ReviewResponse = review(&mut *persistence, &identity, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/timesheets/review/action`.
async fn handle_review_action(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Json(req): Json<ReviewActionRequest>,
) -> Result<Json<TimesheetInfo>, HttpError> {
    info!(
        username = %user.username,
        timesheet_id = req.timesheet_id,
        approve = req.approve,
        "Handling review action request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TimesheetInfo = review_action(&mut *persistence, &identity, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/timesheets/admin/override`.
async fn handle_admin_override(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Json(req): Json<AdminOverrideRequest>,
) -> Result<Json<TimesheetInfo>, HttpError> {
    info!(
        username = %user.username,
        timesheet_id = req.timesheet_id,
        status = %req.status,
        "Handling admin override request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TimesheetInfo = admin_override(&mut *persistence, &identity, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/timesheets/{timesheet_id}/history`.
async fn handle_status_history(
    AxumState(app_state): AxumState<AppState>,
    RequestIdentity(identity, user): RequestIdentity,
    Path(timesheet_id): Path<i64>,
) -> Result<Json<StatusHistoryResponse>, HttpError> {
    info!(
        username = %user.username,
        timesheet_id,
        "Handling status history request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: StatusHistoryResponse =
        status_history(&mut *persistence, &identity, timesheet_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/timesheets/mine", get(handle_list_mine))
        .route("/api/timesheets/upsert", post(handle_upsert))
        .route("/api/timesheets/submit", post(handle_submit))
        .route("/api/timesheets/review", get(handle_review))
        .route("/api/timesheets/review/action", post(handle_review_action))
        .route("/api/timesheets/admin/override", post(handle_admin_override))
        .route(
            "/api/timesheets/{timesheet_id}/history",
            get(handle_status_history),
        )
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

    info!("Initializing Timesheet Server");

    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    if args.seed_demo_users {
        let users: Vec<UserData> = persistence.seed_demo_data(OffsetDateTime::now_utc())?;
        for user in &users {
            info!(
                user_id = user.user_id,
                username = %user.username,
                role = %user.role,
                rank = ?user.supervisor_rank,
                "Demo user available"
            );
        }
    }

    let config: WorkflowConfig = args.workflow_config();
    info!(edit_policy = ?config.edit_policy, "Workflow configured");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
