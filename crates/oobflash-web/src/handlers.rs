use axum::{
    Extension, Form, Json,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::{info, warn};

use oobflash_core::policy::{HX_REDIRECT as HX_REDIRECT_NAME, HX_REFRESH as HX_REFRESH_NAME};
use oobflash_core::{FlashError, Notification, NotificationSource};

use crate::WebState;
use crate::dto::{AddItemForm, PendingNotificationsResponse};
use crate::error::flash_error_response;
use crate::html::{FLASH_CSS, render_index_page, render_item};
use crate::store::Flashes;

const HX_REFRESH: HeaderName = HeaderName::from_static(HX_REFRESH_NAME);
const HX_REDIRECT: HeaderName = HeaderName::from_static(HX_REDIRECT_NAME);

/// Full page. Pending notifications are rendered in place and acknowledged,
/// each starting its own dismiss timer on load.
pub async fn index(
    State(state): State<WebState>,
    Extension(flashes): Extension<Flashes>,
) -> Response {
    let batch = flashes.snapshot();
    let notifications = match state.renderer.render(&batch.peek(), false) {
        Ok(markup) => markup,
        Err(err) => {
            warn!(error = %err, "page notification render failed");
            return flash_error_response(&err, "page.render");
        }
    };
    flashes.acknowledge(&batch, batch.len());
    let items = state.items.read().await;
    Html(render_index_page(&items, &notifications)).into_response()
}

pub async fn flash_css() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        FLASH_CSS,
    )
        .into_response()
}

/// Partial update: returns only the new list item. The success notification
/// reaches the client through the injection middleware.
pub async fn add_item(
    State(state): State<WebState>,
    Extension(flashes): Extension<Flashes>,
    Form(form): Form<AddItemForm>,
) -> Response {
    let text = match validate_item_text(&form.text) {
        Ok(text) => text,
        Err(err) => {
            flashes.push(Notification::error(err.to_string()));
            return Html(String::new()).into_response();
        }
    };
    let index = push_item(&state, &text).await;
    flashes.push(Notification::success(format!("Added \"{text}\"")));
    info!(index, client = flashes.client_id(), "item added");
    Html(render_item(index, &text)).into_response()
}

/// Adds an item and asks the client for a full reload; the notification is
/// shown by the reloaded page instead of being injected here.
pub async fn add_item_and_reload(
    State(state): State<WebState>,
    Extension(flashes): Extension<Flashes>,
    Form(form): Form<AddItemForm>,
) -> Response {
    let text = match validate_item_text(&form.text) {
        Ok(text) => text,
        Err(err) => return flash_error_response(&err, "items.add_reload"),
    };
    push_item(&state, &text).await;
    flashes.push(Notification::success(format!("Added \"{text}\"; page reloaded")));
    (
        [(HX_REFRESH, HeaderValue::from_static("true"))],
        Html(String::new()),
    )
        .into_response()
}

pub async fn redirect_home(Extension(flashes): Extension<Flashes>) -> Response {
    flashes.push(Notification::info("Redirected home"));
    (
        [(HX_REDIRECT, HeaderValue::from_static("/"))],
        Html(String::new()),
    )
        .into_response()
}

/// JSON view of the pending queue. Peeks only.
pub async fn pending_notifications(Extension(flashes): Extension<Flashes>) -> Response {
    Json(PendingNotificationsResponse {
        client_id: flashes.client_id().to_string(),
        notifications: flashes.peek(),
    })
    .into_response()
}

fn validate_item_text(raw: &str) -> Result<String, FlashError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(FlashError::Validation("item text must not be empty".to_string()));
    }
    if text.chars().count() > 200 {
        return Err(FlashError::Validation(
            "item text must be at most 200 characters".to_string(),
        ));
    }
    Ok(text.to_string())
}

async fn push_item(state: &WebState, text: &str) -> usize {
    let mut items = state.items.write().await;
    items.push(text.to_string());
    items.len() - 1
}
