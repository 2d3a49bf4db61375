use crate::pdf::DocumentRenderer;
use crate::validation::{validate_message, ErrorCode};
use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use http::header::CACHE_CONTROL;
use http::{HeaderValue, StatusCode};
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use shared::clock::{Clock, TimestampZone};
use shared::utils::{binary_response, json_response};

pub(crate) struct HandlerDeps<C: Clock, R: DocumentRenderer> {
    pub clock: C,
    pub renderer: R,
    pub timestamp_zone: TimestampZone,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    code: ErrorCode,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<C: Clock, R: DocumentRenderer>(
    deps: &HandlerDeps<C, R>,
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let message = event
        .payload
        .query_string_parameters
        .get("message")
        .map(String::as_str);

    let message = match validate_message(message) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Rejected message: {}", e);
            return error_response(&StatusCode::BAD_REQUEST, &e.to_string(), e.code());
        }
    };

    let timestamp = deps.timestamp_zone.bucket(deps.clock.now());
    match deps.renderer.render(&message, &timestamp) {
        Ok(pdf) => Ok(binary_response(&StatusCode::OK, "application/pdf", &pdf)),
        Err(e) => {
            tracing::error!("Failed to render PDF: {:?}", e);
            error_response(
                &StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                ErrorCode::InternalError,
            )
        }
    }
}

/// Errors must never be cached by the CDN.
fn error_response(
    status: &StatusCode,
    message: &str,
    code: ErrorCode,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = json_response(status, &ErrorBody { message, code })?;
    response
        .headers
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::{function_handler, HandlerDeps};
    use crate::pdf::{MockDocumentRenderer, PdfLayout, PdfRenderer, RenderError};
    use aws_lambda_events::event::lambda_function_urls::{
        LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use chrono::{TimeZone, Utc};
    use lambda_runtime::{Context, LambdaEvent};
    use mockall::predicate::function;
    use serde_json::{json, Value};
    use shared::clock::{MockClock, TimestampZone};
    use shared::time_bucket::TimeBucket;

    fn create_lambda_event(message: Option<&str>) -> LambdaEvent<LambdaFunctionUrlRequest> {
        let mut payload = json!({
            "version": "2.0",
            "rawPath": "/",
            "rawQueryString": "",
            "headers": { "host": "abcdefg.lambda-url.ap-northeast-1.on.aws" },
            "requestContext": {
                "accountId": "123456789012",
                "apiId": "abcdefg",
                "domainName": "abcdefg.lambda-url.ap-northeast-1.on.aws",
                "domainPrefix": "abcdefg",
                "http": {
                    "method": "GET",
                    "path": "/",
                    "protocol": "HTTP/1.1",
                    "sourceIp": "198.51.100.11",
                    "userAgent": "Amazon CloudFront"
                },
                "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
                "routeKey": "$default",
                "stage": "$default",
                "time": "09/Jan/2025:07:09:59 +0000",
                "timeEpoch": 1736406599000_i64
            },
            "isBase64Encoded": false
        });
        if let Some(message) = message {
            payload["rawQueryString"] = json!(format!("message={}", message));
            payload["queryStringParameters"] = json!({ "message": message });
        }
        let request: LambdaFunctionUrlRequest = serde_json::from_value(payload).unwrap();
        LambdaEvent::new(request, Context::default())
    }

    fn fixed_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Utc.with_ymd_and_hms(2025, 5, 20, 8, 27, 13).unwrap());
        clock
    }

    fn pdf_deps() -> HandlerDeps<MockClock, PdfRenderer> {
        HandlerDeps {
            clock: fixed_clock(),
            renderer: PdfRenderer::new(PdfLayout::default()),
            timestamp_zone: TimestampZone::Utc,
        }
    }

    fn decoded_body(response: &LambdaFunctionUrlResponse) -> Vec<u8> {
        STANDARD
            .decode(response.body.as_deref().unwrap())
            .unwrap()
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    fn assert_error(response: &LambdaFunctionUrlResponse, status: i64, expected: Value) {
        assert_eq!(response.status_code, status);
        assert_eq!(response.headers["content-type"], "application/json");
        assert_eq!(response.headers["cache-control"], "no-store");
        assert!(!response.is_base64_encoded);
        let body: Value = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn when_valid_message_is_passed_should_return_pdf() {
        let deps = pdf_deps();

        let response = function_handler(&deps, create_lambda_event(Some("Hello")))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["content-type"], "application/pdf");
        assert!(response.headers.get("cache-control").is_none());
        assert!(response.is_base64_encoded);
        let pdf = decoded_body(&response);
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(contains(&pdf, "Message: Hello"));
        assert!(contains(&pdf, "Timestamp: 2025/5/20 8:20 block"));
    }

    #[tokio::test]
    async fn when_message_has_markup_should_render_it_escaped() {
        let deps = pdf_deps();

        let response = function_handler(&deps, create_lambda_event(Some("<script>")))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        let pdf = decoded_body(&response);
        assert!(contains(&pdf, "Message: &lt;script&gt;"));
        assert!(!contains(&pdf, "<script>"));
    }

    #[tokio::test]
    async fn when_message_is_missing_should_return_400() {
        let deps = pdf_deps();

        let response = function_handler(&deps, create_lambda_event(None))
            .await
            .unwrap();

        assert_error(
            &response,
            400,
            json!({"message": "Message parameter is required", "code": "MISSING_PARAMETER"}),
        );
        assert_eq!(
            response.body.as_deref(),
            Some(r#"{"message":"Message parameter is required","code":"MISSING_PARAMETER"}"#)
        );
    }

    #[tokio::test]
    async fn when_message_is_too_long_should_return_400() {
        let deps = pdf_deps();
        let message = "x".repeat(31);

        let response = function_handler(&deps, create_lambda_event(Some(&message)))
            .await
            .unwrap();

        assert_error(
            &response,
            400,
            json!({"message": "Message is too long (max 30 characters)", "code": "MESSAGE_TOO_LONG"}),
        );
    }

    #[tokio::test]
    async fn when_message_is_not_ascii_should_return_400() {
        let deps = pdf_deps();

        let response = function_handler(&deps, create_lambda_event(Some("こんにちは")))
            .await
            .unwrap();

        assert_error(
            &response,
            400,
            json!({"message": "Message must contain only ASCII characters", "code": "INVALID_CHARACTERS"}),
        );
    }

    #[tokio::test]
    async fn when_validation_fails_should_not_render() {
        let mut renderer = MockDocumentRenderer::new();
        renderer.expect_render().times(0);
        let mut clock = MockClock::new();
        clock.expect_now().times(0);
        let deps = HandlerDeps {
            clock,
            renderer,
            timestamp_zone: TimestampZone::Utc,
        };

        let response = function_handler(&deps, create_lambda_event(Some("")))
            .await
            .unwrap();

        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn when_rendering_fails_should_return_500_without_details() {
        let mut renderer = MockDocumentRenderer::new();
        renderer.expect_render().times(1).returning(|_, _| {
            Err(RenderError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        });
        let deps = HandlerDeps {
            clock: fixed_clock(),
            renderer,
            timestamp_zone: TimestampZone::Utc,
        };

        let response = function_handler(&deps, create_lambda_event(Some("Hello")))
            .await
            .unwrap();

        assert_error(
            &response,
            500,
            json!({"message": "Internal server error", "code": "INTERNAL_ERROR"}),
        );
        assert!(!response.body.unwrap().contains("disk full"));
    }

    #[tokio::test]
    async fn should_render_with_the_bucket_of_the_configured_zone() {
        let mut renderer = MockDocumentRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .with(
                function(|message: &crate::validation::ValidatedMessage| {
                    message.as_str() == "Hi"
                }),
                function(|timestamp: &TimeBucket| timestamp.as_str() == "2025/5/20 8:20 block"),
            )
            .returning(|_, _| Ok(b"%PDF-1.5".to_vec()));
        let deps = HandlerDeps {
            clock: fixed_clock(),
            renderer,
            timestamp_zone: TimestampZone::Utc,
        };

        let response = function_handler(&deps, create_lambda_event(Some("Hi")))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(decoded_body(&response), b"%PDF-1.5");
    }

    #[tokio::test]
    async fn same_message_in_same_window_should_render_identical_bytes() {
        let deps = pdf_deps();

        let first = function_handler(&deps, create_lambda_event(Some("stable")))
            .await
            .unwrap();
        let second = function_handler(&deps, create_lambda_event(Some("stable")))
            .await
            .unwrap();

        assert_eq!(first.body, second.body);
    }
}
