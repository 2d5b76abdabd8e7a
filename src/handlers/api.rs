use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{ProductLine, SalesTotals, ViewMode};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub date: String,
    pub mode: ViewMode,
    pub product_count: usize,
    pub totals: SalesTotals,
}

pub async fn products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductLine>>> {
    let dashboard = state.dashboard()?.clone();
    Ok(Json(dashboard.lines()?))
}

pub async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryResponse>> {
    let dashboard = state.dashboard()?.clone();

    Ok(Json(SummaryResponse {
        date: dashboard.date().display(),
        mode: dashboard.mode(),
        product_count: dashboard.products().len(),
        totals: dashboard.totals()?,
    }))
}
