use crate::edge::{EdgeRequest, ViewerRequestEvent};
use lambda_runtime::{tracing, Error, LambdaEvent};
use shared::clock::Clock;
use shared::time_bucket::TimeBucket;
use shared::DATETIME_BLOCK_HEADER;

pub(crate) struct HandlerDeps<C: Clock> {
    pub clock: C,
}

/// Tags the request with the current UTC bucket so the CDN caches per window.
#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<C: Clock>(
    deps: &HandlerDeps<C>,
    event: LambdaEvent<ViewerRequestEvent>,
) -> Result<EdgeRequest, Error> {
    let mut request = event.payload.request;
    let bucket = TimeBucket::from_datetime(&deps.clock.now());
    tracing::debug!("Computed datetime block: {}", bucket);

    request.set_header(DATETIME_BLOCK_HEADER, bucket);
    Ok(request)
}
