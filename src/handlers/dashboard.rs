use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::error::{AppResult, RenderHtml};
use crate::models::{DisplaySettings, ProductField};
use crate::state::AppState;
use crate::VERSION;

/// One table row, pre-formatted for the template.
#[derive(Debug, Clone)]
pub struct LineView {
    pub id: i64,
    pub name: String,
    pub buy_price: String,
    pub sale_price: String,
    pub buy_price_display: String,
    pub sale_price_display: String,
    pub initial_stock: i64,
    pub remaining_stock: i64,
    pub sold: i64,
    pub revenue: String,
    pub profit: String,
}

/// Everything the inventory fragment renders: table, totals and controls.
#[derive(Debug, Clone)]
pub struct InventoryView {
    pub date: String,
    pub edit_mode: bool,
    pub toggle_label: &'static str,
    pub lines: Vec<LineView>,
    pub total_sold: i64,
    pub total_revenue: String,
    pub total_profit: String,
}

impl InventoryView {
    pub fn build(dashboard: &Dashboard, settings: &DisplaySettings) -> AppResult<Self> {
        let lines = dashboard
            .lines()?
            .into_iter()
            .map(|line| LineView {
                id: line.product.id,
                buy_price: line.product.buy_price.normalize().to_string(),
                sale_price: line.product.sale_price.normalize().to_string(),
                buy_price_display: settings.format_money_plain(&line.product.buy_price),
                sale_price_display: settings.format_money_plain(&line.product.sale_price),
                initial_stock: line.product.initial_stock,
                remaining_stock: line.product.remaining_stock,
                sold: line.figures.sold,
                revenue: settings.format_money(&line.figures.revenue),
                profit: settings.format_money(&line.figures.profit),
                name: line.product.name,
            })
            .collect();

        let totals = dashboard.totals()?;
        let mode = dashboard.mode();

        Ok(Self {
            date: dashboard.date().display(),
            edit_mode: mode.is_edit(),
            toggle_label: mode.toggle_label(),
            lines,
            total_sold: totals.sold,
            total_revenue: settings.format_money(&totals.revenue),
            total_profit: settings.format_money(&totals.profit),
        })
    }
}

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub version: &'static str,
    pub xsrf_token: String,
    pub inventory: InventoryView,
}

#[derive(Template)]
#[template(path = "partials/inventory.html")]
pub struct InventoryTemplate {
    pub xsrf_token: String,
    pub inventory: InventoryView,
}

#[derive(Debug, Deserialize)]
pub struct RemainingStockForm {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldForm {
    pub field: ProductField,
    #[serde(default)]
    pub value: String,
}

/// Clone the dashboard out from under the lock. The product list is shared,
/// so this is a reference-count bump.
fn current(state: &AppState) -> AppResult<Dashboard> {
    Ok(state.dashboard()?.clone())
}

fn inventory_view(state: &AppState, dashboard: &Dashboard) -> AppResult<InventoryView> {
    InventoryView::build(dashboard, &state.config.display)
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// HTMX requests get the re-rendered fragment; plain form posts go back to the page.
fn after_change(state: &AppState, headers: &HeaderMap, dashboard: &Dashboard) -> AppResult<Response> {
    if !is_htmx(headers) {
        return Ok(Redirect::to("/").into_response());
    }

    let template = InventoryTemplate {
        xsrf_token: state.xsrf_token.value().to_string(),
        inventory: inventory_view(state, dashboard)?,
    };
    Ok(template.render_html()?.into_response())
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    debug!("Loading dashboard");
    let dashboard = current(&state)?;

    let template = DashboardTemplate {
        title: "Sales Dashboard".into(),
        version: VERSION,
        xsrf_token: state.xsrf_token.value().to_string(),
        inventory: inventory_view(&state, &dashboard)?,
    };

    template.render_html()
}

pub async fn inventory(State(state): State<AppState>) -> AppResult<Html<String>> {
    let dashboard = current(&state)?;

    let template = InventoryTemplate {
        xsrf_token: state.xsrf_token.value().to_string(),
        inventory: inventory_view(&state, &dashboard)?,
    };

    template.render_html()
}

pub async fn update_remaining_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<RemainingStockForm>,
) -> AppResult<Response> {
    let dashboard = state.with_dashboard(|d| {
        d.update_remaining_stock(id, &form.value)?;
        Ok(d.clone())
    })?;

    info!(product_id = id, value = %form.value, "Remaining stock updated");
    after_change(&state, &headers, &dashboard)
}

pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<FieldForm>,
) -> AppResult<Response> {
    let dashboard = state.with_dashboard(|d| {
        d.update_field(id, form.field, &form.value)?;
        Ok(d.clone())
    })?;

    info!(product_id = id, field = %form.field, "Product field updated");
    after_change(&state, &headers, &dashboard)
}

pub async fn toggle_edit_mode(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let dashboard = state.with_dashboard(|d| {
        d.toggle_mode();
        Ok(d.clone())
    })?;

    after_change(&state, &headers, &dashboard)
}
