use std::{convert::Infallible, sync::Arc};

use bytes::Bytes;
use warp::{
    Rejection, Reply,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    hyper::Body,
    path::FullPath,
    reply::{self, Response},
};
use weather_core::{ForecastRequest, GeocodeRequest};

use crate::{ProxyState, google};

/// Error payload; logged and sent with a 200 status.
fn error_reply(message: String) -> Response {
    tracing::warn!("writing error: {message}");
    reply::json(&serde_json::json!({ "error": message })).into_response()
}

fn upstream_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
}

pub async fn forecast(state: Arc<ProxyState>, body: Bytes) -> Result<Response, Infallible> {
    Ok(proxy_forecast(&state, &body).await.unwrap_or_else(error_reply))
}

async fn proxy_forecast(state: &ProxyState, body: &[u8]) -> Result<Response, String> {
    let request: ForecastRequest = serde_json::from_slice(body)
        .map_err(|e| format!("parsing request body for forecast failed: {e}"))?;

    tracing::info!(
        lat = request.latitude,
        lng = request.longitude,
        units = %request.units,
        "proxying forecast"
    );

    let res = state
        .http
        .get(state.config.forecast_url(&request))
        .query(&[("units", request.units.as_str()), ("exclude", &request.exclude.join(","))])
        .send()
        .await
        .map_err(|e| format!("request to the forecast API failed: {}", e.without_url()))?;

    let status = upstream_status(res.status().as_u16());
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok());
    let upstream_body = res
        .bytes()
        .await
        .map_err(|e| format!("reading response body from the forecast API failed: {}", e.without_url()))?;

    let mut response = Response::new(Body::from(upstream_body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}

pub async fn geocode(state: Arc<ProxyState>, body: Bytes) -> Result<Response, Infallible> {
    Ok(proxy_geocode(&state, &body).await.unwrap_or_else(error_reply))
}

async fn proxy_geocode(state: &ProxyState, body: &[u8]) -> Result<Response, String> {
    let request: GeocodeRequest = serde_json::from_slice(body)
        .map_err(|e| format!("parsing request body for geocode failed: {e}"))?;

    if request.location.is_empty() {
        return Err("Location was not sent.".to_string());
    }

    tracing::info!(location = %request.location, "proxying geocode");

    let res = state
        .http
        .get(&state.config.geocode_api_uri)
        .query(&[
            ("address", request.location.as_str()),
            ("key", state.config.geocode_api_key.as_str()),
        ])
        .send()
        .await
        .map_err(|e| format!("request to the geocode API failed: {}", e.without_url()))?;

    let status = upstream_status(res.status().as_u16());
    let upstream_body = res
        .bytes()
        .await
        .map_err(|e| format!("reading response body from the geocode API failed: {}", e.without_url()))?;

    let parsed: google::GeocodeResponse = serde_json::from_slice(&upstream_body)
        .map_err(|e| format!("parsing response body for geocode failed: {e}"))?;

    // These messages come from the Google Geocoding API server.
    if !parsed.error_message.is_empty() {
        return Err(format!(
            "Google Geocode API response error: {} - {}",
            parsed.status, parsed.error_message
        ));
    }

    let result = parsed.results.first().ok_or_else(|| "No results found.".to_string())?;

    Ok(reply::with_status(reply::json(&result.to_geocode()), status).into_response())
}

pub fn not_found(path: FullPath) -> Response {
    reply::with_status(
        reply::json(&serde_json::json!({
            "error": format!("Not a valid endpoint: {}", path.as_str())
        })),
        StatusCode::NOT_FOUND,
    )
    .into_response()
}

/// Body-limit rejections get a JSON error instead of falling through to the
/// not-found handler.
pub async fn body_rejection(rejection: Rejection) -> Result<Response, Rejection> {
    let (status, message) = if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.")
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Request body was not sent.")
    } else {
        return Err(rejection);
    };

    tracing::warn!("writing error: {message}");
    Ok(reply::with_status(reply::json(&serde_json::json!({ "error": message })), status)
        .into_response())
}
