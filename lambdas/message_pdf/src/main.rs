use crate::config::Config;
use crate::http_handler::{function_handler, HandlerDeps};
use crate::pdf::{PdfLayout, PdfRenderer};
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::clock::{Clock, SystemClock};

mod config;
mod http_handler;
mod pdf;
mod validation;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = Config::load()?;
    let clock = SystemClock;

    if config.timestamp_zone.diverges_from_utc(clock.now()) {
        tracing::warn!(
            "Local timezone is not UTC; rendered timestamps may not match the x-datetime-block cache key. Set TIMESTAMP_ZONE=utc to align them"
        );
    }

    let handler_deps = HandlerDeps {
        clock,
        renderer: PdfRenderer::new(PdfLayout::default()),
        timestamp_zone: config.timestamp_zone,
    };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
