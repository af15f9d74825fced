use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use oobflash_core::FlashError;

pub fn flash_error_response(err: &FlashError, operation: &str) -> Response {
    let status = status_for_flash_error(err);
    (status, Json(err.to_payload(operation))).into_response()
}

fn status_for_flash_error(err: &FlashError) -> StatusCode {
    match err {
        FlashError::Validation(_) => StatusCode::BAD_REQUEST,
        FlashError::Render(_) | FlashError::Config(_) | FlashError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
