use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlResponse;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};
use lambda_runtime::Error;
use serde::Serialize;

fn response(
    status: &StatusCode,
    content_type: &'static str,
    body: String,
    is_base64_encoded: bool,
) -> LambdaFunctionUrlResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

    LambdaFunctionUrlResponse {
        status_code: i64::from(status.as_u16()),
        headers,
        body: Some(body),
        is_base64_encoded,
        cookies: Vec::new(),
    }
}

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::to_string(body)?;

    Ok(response(status, "application/json", body, false))
}

pub fn text_response(status: &StatusCode, body: String) -> LambdaFunctionUrlResponse {
    response(status, "text/plain", body, false)
}

/// Function URLs carry binary payloads base64-encoded with `isBase64Encoded` set.
pub fn binary_response(
    status: &StatusCode,
    content_type: &'static str,
    body: &[u8],
) -> LambdaFunctionUrlResponse {
    response(status, content_type, STANDARD.encode(body), true)
}
