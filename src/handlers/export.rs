use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::AppResult;
use crate::services::export::{build_report, XLSX_CONTENT_TYPE};
use crate::state::AppState;

pub async fn download(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (products, date) = {
        let dashboard = state.dashboard()?;
        (dashboard.snapshot(), dashboard.date())
    };

    let report = build_report(&products, date)?;

    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        report.file_name,
        urlencoding::encode(&report.file_name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    ))
}
