use crate::event_handler::{function_handler, HandlerDeps};
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::clock::SystemClock;

mod edge;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let handler_deps = HandlerDeps { clock: SystemClock };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
