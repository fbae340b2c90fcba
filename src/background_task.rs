use std::sync::Arc;

use tokio::time::{interval, Duration};

use crate::cache::page_cache::PageCache;

pub async fn start_cache_sweep_task(cache: Arc<PageCache>, every: Duration) {
    let mut interval = interval(every);

    loop {
        interval.tick().await;

        let swept = cache.sweep_expired();
        if swept > 0 {
            tracing::info!("Swept {} expired cached pages", swept);
        }
    }
}
