//! Batch loading, retry, and restart

use futures::future::join_all;

use crate::model::CatClient;
use super::AppController;

impl AppController {
    /// Load a fresh batch of `n` cards: take a load token, fetch and confirm
    /// every image concurrently, then install the deck under that token.
    ///
    /// The join waits for all fetches to settle rather than failing fast: a
    /// card whose image cannot be confirmed is logged and kept in the deck
    /// without a preview. Only a failure before any fetch starts (no usable
    /// HTTP client) fails the batch as a whole.
    pub async fn load_batch(&self, n: usize) {
        let mut model = self.model.lock().await;
        let token = model.begin_batch(n).await;

        let cat = match &model.cat {
            Some(cat) => cat.clone(),
            // Client construction failed at startup; retry it here so the
            // error state has a way out.
            None => match CatClient::new() {
                Ok(cat) => {
                    model.set_cat_client(cat.clone());
                    cat
                }
                Err(e) => {
                    let message = Self::format_error(&e);
                    model.fail_batch(token, message).await;
                    return;
                }
            },
        };
        drop(model);

        tracing::info!(n, "Loading card batch");
        let urls: Vec<String> = (0..n).map(|seq| cat.fresh_url(seq)).collect();

        let fetches = urls.iter().map(|url| {
            let cat = cat.clone();
            let url = url.clone();
            async move { cat.preload(&url).await }
        });
        let settled = join_all(fetches).await;

        let mut failures = 0usize;
        let previews = urls
            .iter()
            .zip(settled)
            .map(|(url, outcome)| match outcome {
                Ok(preview) => Some(preview),
                Err(e) => {
                    failures += 1;
                    tracing::warn!(url = %url, error = %e, "Image preload failed, card stays in deck");
                    None
                }
            })
            .collect();

        let model = self.model.lock().await;
        if model.install_batch(token, urls, previews).await {
            tracing::info!(n, failures, "Batch ready");
        } else {
            tracing::debug!("Discarded stale batch completion");
        }
    }

    /// Start over with a new batch of the same size. Only available from the
    /// results screen or after a failed load.
    pub async fn restart(&self) {
        let n = {
            let model = self.model.lock().await;
            model.restart_batch_size().await
        };
        match n {
            Some(n) => self.load_batch(n).await,
            None => tracing::debug!("Restart requested outside results"),
        }
    }
}
