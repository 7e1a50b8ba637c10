//! Async pipeline over a slow producer, consumed sequentially.
//!
//! Usage: PULLSEQ_EXHAUSTION=done_flag cargo run --example async_pipeline

use std::time::Duration;

use futures::StreamExt;
use pullseq_chain::ext::AsyncSequenceExt;
use pullseq_chain::lambda::from_async_fn;
use pullseq_chain::mock::DelayedSource;
use pullseq_core::config::SeqConfig;
use pullseq_core::error::{Result, SeqError};
use pullseq_core::source::{AsyncSource, BoxAsyncPullSource, SourceKind};
use pullseq_core::step::Step;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pullseq_core=debug".into()),
        )
        .init();

    let config = SeqConfig::from_env().map_err(SeqError::Other)?.with_label("readings");
    tracing::info!(policy = %config.exhaustion, "starting async pipeline");

    let readings: BoxAsyncPullSource<u32> = Box::new(DelayedSource::new(
        vec![12, 48, 7, 91, 33, 64],
        Duration::from_millis(20),
    ));
    AsyncSource::with_config(SourceKind::Pull(readings), config)?
        .filter(|r| Ok(*r >= 10))
        .map(|r| Ok(r * 2))
        .as_indexed_pairs()
        .for_each(|(i, r)| async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            println!("reading #{i}: {r}");
            Ok(())
        })
        .await?;

    let mut tick = 0u32;
    let mut ticks = from_async_fn(move || {
        tick += 1;
        let current = tick;
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(Step::from((current <= 5).then_some(current)))
        }
    })
    .flat_map(|t| Ok(vec![t, t * 100]))
    .into_stream();

    while let Some(item) = ticks.next().await {
        println!("tick item: {}", item?);
    }

    let any_large = AsyncSource::from_vec(vec![3, 9, 27])
        .some(|x| Ok(x > 20))
        .await?;
    println!("any reading above 20: {any_large}");

    Ok(())
}
