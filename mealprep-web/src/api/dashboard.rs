//! Analytics chart dispatch

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::error;

use crate::api::ui;
use crate::db::analytics::{AnalyticsQuery, ChartData};
use crate::AppState;

/// Query string for the chart selection
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub query: Option<String>,
}

/// GET /query?query=<id>
///
/// Missing and unknown identifiers redirect to the home page. A failed
/// query logs the detail and renders the dashboard with an empty chart
/// instead of an error page.
pub async fn run_query(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let Some(query) = params.query.as_deref().and_then(AnalyticsQuery::from_id) else {
        return Redirect::to("/").into_response();
    };

    match query.run(&state.db).await {
        Ok(chart) => ui::dashboard_page(Some(query), Some(&chart)).into_response(),
        Err(err) => {
            error!("Analytics query '{}' failed: {:#}", query.id(), err);
            let mut chart = ChartData::empty();
            chart.datasets[0].label = query.dataset_label().to_string();
            ui::dashboard_page(Some(query), Some(&chart)).into_response()
        }
    }
}

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/query", get(run_query))
}
