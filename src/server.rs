use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::database::{Database, DatabaseError};
use crate::models::{Category, EntryForm};
use crate::render::{FormValues, SubmissionStatus, render_page};
use crate::utils::parse_date;
use crate::weekly::{WeekStart, group_by_week_with, week_key};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Database lock poisoned")]
    LockPoisoned,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong while talking to the journal store").into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
    week_start: WeekStart,
}

impl AppState {
    pub fn new(db: Database, week_start: WeekStart) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            week_start,
        }
    }

    fn db(&self) -> Result<MutexGuard<'_, Database>, ServerError> {
        self.db.lock().map_err(|_| ServerError::LockPoisoned)
    }

    fn render(&self, values: &FormValues, status: &SubmissionStatus) -> Result<String, ServerError> {
        let entries = self.db()?.get_all_entries()?;
        let weeks = group_by_week_with(&entries, self.week_start);
        Ok(render_page(&weeks, values, status))
    }
}

/// Query string carried back by the redirect after a successful save
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    pub category: Option<String>,
    pub saved: Option<String>,
}

impl PageQuery {
    fn status(&self) -> SubmissionStatus {
        if self.saved.is_some() {
            SubmissionStatus::Saved
        } else {
            SubmissionStatus::Idle
        }
    }

    /// Form defaults, ignoring anything in the query that would not validate
    fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        if let Some(date) = self.created_at.as_deref().filter(|d| parse_date(d).is_ok()) {
            values.created_at = date.to_string();
        }
        if let Some(category) = self.category.as_deref().filter(|c| c.parse::<Category>().is_ok()) {
            values.category = category.to_string();
        }
        values
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(create_entry))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Result<Html<String>, ServerError> {
    let page = state.render(&query.form_values(), &query.status())?;
    Ok(Html(page))
}

async fn create_entry(State(state): State<AppState>, Form(form): Form<EntryForm>) -> Result<Response, ServerError> {
    match form.validate() {
        Ok(new_entry) => {
            let entry = state.db()?.insert_entry(&new_entry)?;
            info!(
                id = entry.id,
                week = %week_key(new_entry.created_at, state.week_start),
                category = %new_entry.category,
                "entry created"
            );
            let location = format!(
                "/?saved=1&createdAt={}&category={}",
                entry.created_at,
                new_entry.category.as_str()
            );
            Ok(Redirect::to(&location).into_response())
        }
        Err(errors) => {
            warn!(fields = ?errors.fields(), "rejected entry submission");
            let page = state.render(&FormValues::from_form(&form), &SubmissionStatus::Rejected(errors))?;
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
    }
}

async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ServerError> {
    let entries = state.db()?.count_entries()?;
    Ok(Json(serde_json::json!({ "status": "ok", "entries": entries })))
}

pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    Ok(TcpListener::bind(addr).await?)
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    info!(addr = %listener.local_addr()?, "journal listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("journal stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
