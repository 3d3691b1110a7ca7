#![cfg(not(tarpaulin_include))]
#![cfg(feature = "web")]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::downloader;
use crate::graph::{ChartKind, chart_options, render_chart};
use crate::inventory::{Inventory, StockFilter};
use crate::loader::{self, LoaderError};
use crate::record::DEFAULT_EXCESS_UNIT_COST;

/// Launch configuration. Immutable once the server starts: every request
/// re-reads the inventory file, so this is the only application state.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub csv_path: PathBuf,
    pub bind_addr: String,
    pub excess_unit_cost: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("warehouse_inventory.csv"),
            bind_addr: "127.0.0.1:3000".to_string(),
            excess_unit_cost: DEFAULT_EXCESS_UNIT_COST,
        }
    }
}

impl DashboardConfig {
    /// Configuration from the environment: `STOCKBOARD_CSV`,
    /// `STOCKBOARD_ADDR` and `STOCKBOARD_EXCESS_UNIT_COST` override the
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = DashboardConfig::default();
        if let Ok(path) = std::env::var("STOCKBOARD_CSV") {
            config.csv_path = PathBuf::from(path);
        }
        if let Ok(addr) = std::env::var("STOCKBOARD_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(rate) = std::env::var("STOCKBOARD_EXCESS_UNIT_COST") {
            if let Ok(rate) = rate.parse() {
                config.excess_unit_cost = rate;
            }
        }
        config
    }
}

/// Warehouse/category selection from the query string. Values are
/// comma-separated lists, e.g. `?warehouse=WH1,WH2&category=Electronics`.
#[derive(Deserialize)]
struct FilterParams {
    warehouse: Option<String>,
    category: Option<String>,
}

impl FilterParams {
    fn to_filter(&self) -> StockFilter {
        StockFilter {
            warehouses: split_list(self.warehouse.as_deref()),
            categories: split_list(self.category.as_deref()),
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Deserialize)]
struct ExportParams {
    warehouse: Option<String>,
    category: Option<String>,
    format: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

/// Start the dashboard server with the given configuration.
pub async fn run(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(config);

    // Build router
    let app = Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/filters", get(get_filters))
        .route("/api/summary", get(get_summary))
        .route("/api/records", get(get_records))
        .route("/api/charts/:kind", get(get_chart))
        .route("/api/export", get(export_records))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state.clone());

    // Start server
    let listener = TcpListener::bind(&state.bind_addr).await?;
    log::info!("Dashboard listening on http://{}", state.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

/// Loader failures become a JSON error body the page shows in its banner.
fn error_response(err: &LoaderError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: err.to_string(),
        }),
    )
        .into_response()
}

/// One view refresh: read the file, apply the filter, discard afterwards.
fn load_filtered(
    config: &DashboardConfig,
    filter: &StockFilter,
) -> Result<Inventory, LoaderError> {
    let inventory = loader::load_inventory(&config.csv_path)?;
    Ok(inventory.filter(filter))
}

async fn get_filters(State(state): State<Arc<DashboardConfig>>) -> impl IntoResponse {
    match loader::load_inventory(&state.csv_path) {
        Ok(inventory) => Json(serde_json::json!({
            "warehouses": inventory.warehouses(),
            "categories": inventory.categories(),
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

async fn get_summary(
    Query(params): Query<FilterParams>,
    State(state): State<Arc<DashboardConfig>>,
) -> impl IntoResponse {
    let inventory = match load_filtered(&state, &params.to_filter()) {
        Ok(inventory) => inventory,
        Err(e) => return error_response(&e),
    };

    let as_of = Local::now().date_naive();
    Json(serde_json::json!({
        "summary": inventory.summary(),
        "insights": inventory.insights(state.excess_unit_cost, as_of),
    }))
    .into_response()
}

async fn get_records(
    Query(params): Query<FilterParams>,
    State(state): State<Arc<DashboardConfig>>,
) -> impl IntoResponse {
    let inventory = match load_filtered(&state, &params.to_filter()) {
        Ok(inventory) => inventory,
        Err(e) => return error_response(&e),
    };

    let as_of = Local::now().date_naive();
    let rows = inventory.rows(state.excess_unit_cost, as_of);
    Json(serde_json::json!({
        "count": rows.len(),
        "records": rows,
    }))
    .into_response()
}

async fn get_chart(
    Path(kind): Path<String>,
    Query(params): Query<FilterParams>,
    State(state): State<Arc<DashboardConfig>>,
) -> impl IntoResponse {
    let Some(kind) = ChartKind::from_slug(&kind) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                status: "error".to_string(),
                message: format!("Unknown chart: {}", kind),
            }),
        )
            .into_response();
    };

    let inventory = match load_filtered(&state, &params.to_filter()) {
        Ok(inventory) => inventory,
        Err(e) => return error_response(&e),
    };

    let as_of = Local::now().date_naive();
    match render_chart(&inventory, kind, &chart_options(kind), as_of) {
        Ok(png_data) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .body(axum::body::Body::from(png_data))
            .unwrap(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                status: "error".to_string(),
                message: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn export_records(
    Query(params): Query<ExportParams>,
    State(state): State<Arc<DashboardConfig>>,
) -> impl IntoResponse {
    let filter = StockFilter {
        warehouses: split_list(params.warehouse.as_deref()),
        categories: split_list(params.category.as_deref()),
    };
    let inventory = match load_filtered(&state, &filter) {
        Ok(inventory) => inventory,
        Err(e) => return error_response(&e),
    };

    let as_of = Local::now().date_naive();
    let rows = inventory.rows(state.excess_unit_cost, as_of);

    let result = if params.format.as_deref() == Some("xlsx") {
        downloader::to_xlsx(&rows).map(|data| {
            (
                data,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                "attachment; filename=\"warehouse_inventory_export.xlsx\"",
            )
        })
    } else {
        downloader::to_csv(&rows).map(|data| {
            (
                data.into_bytes(),
                "text/csv",
                "attachment; filename=\"warehouse_inventory_export.csv\"",
            )
        })
    };

    match result {
        Ok((data, content_type, disposition)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_DISPOSITION, disposition)
            .body(axum::body::Body::from(data))
            .unwrap(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                status: "error".to_string(),
                message: e.to_string(),
            }),
        )
            .into_response(),
    }
}
