//! Reporting handlers for the dashboard and the order report export

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::StaffToken;
use crate::services::reporting::{DashboardMetrics, ReportFilter, ReportingService};
use crate::services::{InventoryService, OrderService};
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub format: Option<String>, // "json" or "csv"
}

impl ReportQuery {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            from: self.from,
            to: self.to,
        }
    }
}

fn reporting(state: AppState) -> ReportingService {
    ReportingService::new(
        OrderService::new(state.api.clone()),
        InventoryService::new(state.api),
    )
}

/// Get dashboard metrics
pub async fn get_dashboard(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<DashboardMetrics>> {
    let metrics = reporting(state).dashboard(&token, &query.filter()).await?;
    Ok(Json(metrics))
}

/// Get the order report
pub async fn get_order_report(
    State(state): State<AppState>,
    token: StaffToken,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let rows = reporting(state).order_report(&token, &query.filter()).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&rows)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"order_report.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(rows).into_response())
    }
}
