//! Drains a slow, paged source through a handle, with a deadline layered on
//! top as the ambient cancellation token.
//!
//! Run with `RUST_LOG=asyncoro=debug` to see the handle's lifecycle.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use asyncoro::{IterConfig, IterError, Iterable, Producer, Step};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("page {0} is unavailable")]
struct PageUnavailable(usize);

/// Pretends to fetch pages of rows from a remote service. Rows are buffered
/// one page at a time.
#[derive(Debug, Clone)]
struct Pages {
    next_page: usize,
    last_page: usize,
    latency: Duration,
    buffer: VecDeque<String>,
}

impl Pages {
    async fn fetch(
        &self,
        page: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, PageUnavailable> {
        tokio::select! {
            _ = cancel.cancelled() => Err(PageUnavailable(page)),
            _ = tokio::time::sleep(self.latency) => {
                Ok((0..3).map(|row| format!("page {page} row {row}")).collect())
            }
        }
    }
}

#[async_trait]
impl Producer for Pages {
    type Item = String;
    type Error = PageUnavailable;

    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<String>, PageUnavailable> {
        if self.buffer.is_empty() && self.next_page <= self.last_page {
            let rows = self.fetch(self.next_page, cancel).await?;
            self.buffer.extend(rows);
            self.next_page += 1;
        }
        Ok(self.buffer.pop_front().into())
    }
}

async fn drain(
    template: &Iterable<Pages>,
    deadline: Duration,
) -> Result<usize, IterError<PageUnavailable>> {
    let ambient = CancellationToken::new();
    let timer = ambient.clone();
    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        timer.cancel();
    });

    let mut handle = template.acquire();
    let mut rows = 0;
    while handle.advance(&ambient).await? {
        tracing::info!(row = %handle.current()?, "received");
        rows += 1;
    }
    Ok(rows)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let template = Iterable::new(Pages {
        next_page: 1,
        last_page: 4,
        latency: Duration::from_millis(50),
        buffer: VecDeque::new(),
    })
    .with_config(IterConfig::default().with_label("pages"));

    match drain(&template, Duration::from_secs(2)).await {
        Ok(rows) => tracing::info!(rows, "drained before the deadline"),
        Err(e) => tracing::warn!(error = %e, "drain failed"),
    }

    // The template is untouched, so it can be traversed again, this time
    // with a deadline too short to finish.
    match drain(&template, Duration::from_millis(120)).await {
        Ok(rows) => tracing::info!(rows, "drained before the deadline"),
        Err(e) => tracing::warn!(error = %e, "drain failed"),
    }
}
