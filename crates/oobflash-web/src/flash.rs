use std::collections::BTreeSet;

use axum::{
    body::{Body, HttpBody, to_bytes},
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{self, HeaderName},
    },
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use oobflash_core::{FlashError, NotificationSource, RequestContext};

use crate::WebState;
use crate::error::flash_error_response;
use crate::store::Flashes;

pub const HX_REQUEST: &str = "hx-request";
pub const CLIENT_COOKIE: &str = "oobflash_client";

/// Appends pending notifications as an out-of-band fragment to every eligible
/// response. Installed once on the router, so handlers only ever push.
///
/// The augmenter works on a snapshot of the client's queue. After a successful
/// injection exactly the rendered entries are acknowledged; skipped or failed
/// injections leave them pending for the next partial response or full page.
pub async fn flash_middleware(
    State(state): State<WebState>,
    mut request: Request,
    next: Next,
) -> Response {
    let (client_id, issued) = match client_id_from_cookies(request.headers()) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };
    let flashes = state.store.handle(&client_id);
    let ctx = request_context(request.headers());
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(flashes.clone());

    let response = next.run(request).await;
    let mut response = augment_response(&state, ctx, &flashes, response, &path).await;

    if issued {
        let cookie = format!("{CLIENT_COOKIE}={client_id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => warn!(error = %err, "client cookie rejected"),
        }
    }
    response
}

async fn augment_response(
    state: &WebState,
    mut ctx: RequestContext,
    flashes: &Flashes,
    response: Response,
    path: &str,
) -> Response {
    ctx.set_response_headers(response.headers().keys().map(HeaderName::as_str));

    let outcome = state.augmenter.policy().evaluate(&ctx, flashes.has_any());
    if !outcome.is_injected() {
        debug!(path, outcome = outcome.as_str(), "notification injection skipped");
        return response;
    }
    if !is_html(response.headers()) {
        debug!(path, "notification injection skipped for non-html body");
        return response;
    }
    let within_limit = response
        .body()
        .size_hint()
        .upper()
        .and_then(|upper| usize::try_from(upper).ok())
        .is_some_and(|upper| upper <= state.config.max_body_bytes);
    if !within_limit {
        debug!(path, "notification injection skipped for unbounded or oversized body");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let mut buffer = match to_bytes(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes.to_vec(),
        Err(err) => {
            warn!(path, error = %err, "failed to buffer response body");
            return flash_error_response(
                &FlashError::Internal(format!("response body unreadable: {err}")),
                "flash.augment",
            );
        }
    };

    let batch = flashes.snapshot();
    match state
        .augmenter
        .augment(&mut buffer, &ctx, &batch, state.renderer.as_ref())
    {
        Ok(result) if result.is_injected() => {
            parts.headers.remove(header::CONTENT_LENGTH);
            flashes.acknowledge(&batch, result.delivered);
            debug!(
                path,
                client = flashes.client_id(),
                delivered = result.delivered,
                "notification fragment injected"
            );
        }
        Ok(result) => {
            debug!(path, outcome = result.outcome.as_str(), "notification injection skipped");
        }
        Err(err) => {
            warn!(path, error = %err, code = err.code(), "notification render failed; sending response unaugmented");
        }
    }
    Response::from_parts(parts, Body::from(buffer))
}

pub(crate) fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        is_partial_update: is_partial_update(headers),
        request_headers: header_names(headers),
        response_headers: BTreeSet::new(),
    }
}

pub(crate) fn is_partial_update(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

fn header_names(headers: &HeaderMap) -> BTreeSet<String> {
    headers.keys().map(|name| name.as_str().to_string()).collect()
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().to_ascii_lowercase().starts_with("text/html"))
}

fn client_id_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CLIENT_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| Uuid::parse_str(value).is_ok())
        .map(str::to_string)
}
