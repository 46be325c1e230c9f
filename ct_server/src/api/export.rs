//! CSV export API handlers.
//!
//! Both endpoints respond with `text/csv` as an attachment; the filename
//! derives from the tournament date for single exports and is fixed for the
//! full dump.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chess_tracker::export::CsvDownload;
use chess_tracker::roster::TournamentId;

use super::{AppState, ErrorResponse, store_error_response};

/// Download one tournament's results as CSV.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament id
pub async fn export_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let download = state
        .export_manager
        .export_tournament(tournament_id)
        .await
        .map_err(store_error_response)?;
    Ok(csv_response(download))
}

/// Download every recorded point as CSV, ordered by tournament date.
pub async fn export_all(
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let download = state
        .export_manager
        .export_all()
        .await
        .map_err(store_error_response)?;
    Ok(csv_response(download))
}

fn csv_response(download: CsvDownload) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.filename),
            ),
        ],
        download.content,
    )
        .into_response()
}
