use crate::greeting::{greeting, parse_count};
use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use http::StatusCode;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use shared::utils::text_response;

#[derive(Debug, Serialize)]
struct GreetingResponse {
    message: String,
}

#[tracing::instrument(skip(event))]
pub(crate) async fn function_handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let raw = event
        .payload
        .query_string_parameters
        .get("wasshoi")
        .map(String::as_str);
    let count = parse_count(raw);
    tracing::debug!("Parsed wasshoi count {:?} from {:?}", count, raw);

    let body = serde_json::to_string(&GreetingResponse {
        message: greeting(count),
    })?;
    Ok(text_response(&StatusCode::OK, body))
}
