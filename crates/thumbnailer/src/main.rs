use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use pinboard_cloud::{S3ObjectStore, SnsNotifier};
use pinboard_thumbnailer::{InvocationContext, InvocationResponse, ThumbnailPipeline, ThumbnailerConfig};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinboard_thumbnailer=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .without_time()
                .with_current_span(false),
        )
        .init();

    // --- Configuration ---
    let config = ThumbnailerConfig::from_env()?;
    tracing::info!(
        output_bucket = config.output_bucket.as_deref().unwrap_or("-"),
        topic_arn = config.topic_arn.as_deref().unwrap_or("-"),
        sizes = config.specs.len(),
        "Loaded thumbnailer configuration"
    );

    // --- Clients ---
    let sdk_config = pinboard_cloud::load_sdk_config().await;
    let pipeline = Arc::new(ThumbnailPipeline::new(
        config,
        Arc::new(S3ObjectStore::from_sdk_config(&sdk_config)),
        Arc::new(SnsNotifier::from_sdk_config(&sdk_config)),
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let pipeline = Arc::clone(&pipeline);
        async move {
            let context = InvocationContext::new(event.context.request_id);
            let response: InvocationResponse =
                pipeline.handle_event(&event.payload, &context).await;
            Ok::<_, Error>(response)
        }
    }))
    .await
}
