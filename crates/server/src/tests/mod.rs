// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use timesheet::WorkflowConfig;
use timesheet_persistence::{SqlitePersistence, UserData};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::identity::USER_ID_HEADER;
use crate::{AppState, build_router};

/// Demo user ids, in seeding order.
pub struct DemoUsers {
    pub admin: i64,
    pub super1: i64,
    pub super2: i64,
    pub worker: i64,
}

/// Builds a router over a fresh in-memory database with the demo users.
pub fn create_test_app(config: WorkflowConfig) -> (Router, DemoUsers) {
    let mut persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    let users: Vec<UserData> = persistence.seed_demo_users().unwrap();
    let demo: DemoUsers = DemoUsers {
        admin: users[0].user_id,
        super1: users[1].user_id,
        super2: users[2].user_id,
        worker: users[3].user_id,
    };
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };
    (build_router(app_state), demo)
}

/// Sends a request and returns the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
