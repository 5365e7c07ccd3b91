use crate::config::ScoutConfig;
use crate::extractor::{snapshot_from_html, PageScript};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::search::{
    trait_def::PageHost,
    types::{ListenerId, PageId, PageStatus, PageStatusEvent, Subscription},
};
use crate::types::ExtractionResult;
use anyhow::{bail, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

enum PageState {
    Loading(JoinHandle<()>),
    Loaded(String),
    Failed,
}

#[derive(Default)]
struct Shared {
    pages: Mutex<HashMap<PageId, PageState>>,
    listeners: Mutex<HashMap<ListenerId, mpsc::UnboundedSender<PageStatusEvent>>>,
    next_id: AtomicU64,
}

impl Shared {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn publish(&self, page: PageId, status: PageStatus) {
        self.listeners.lock().retain(|_, tx| {
            tx.send(PageStatusEvent { page, status: status.clone() }).is_ok()
        });
    }

    /// 載入結束時更新頁面；頁面已關閉則回傳 false
    fn finish(&self, page: PageId, state: PageState) -> bool {
        let mut pages = self.pages.lock();
        match pages.get_mut(&page) {
            Some(slot) => {
                *slot = state;
                true
            }
            None => false,
        }
    }
}

/// 以 HTTP 請求模擬背景頁面的宿主
///
/// 開啟頁面時在背景任務抓取網址，回應完整讀取後發出 `Complete` 事件，
/// 失敗則發出 `Failed`。
pub struct HttpPageHost {
    fetcher: Arc<HttpFetcher>,
    shared: Arc<Shared>,
}

impl HttpPageHost {
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Arc::new(HttpFetcher::new(config)?),
            shared: Arc::new(Shared::default()),
        })
    }

    #[cfg(test)]
    fn open_pages(&self) -> usize {
        self.shared.pages.lock().len()
    }
}

#[async_trait::async_trait]
impl PageHost for HttpPageHost {
    fn name(&self) -> &str {
        "http"
    }

    fn subscribe(&self) -> Subscription {
        let id = ListenerId(self.shared.next_id());
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared.listeners.lock().insert(id, tx);
        Subscription { id, events: rx }
    }

    fn unsubscribe(&self, listener: ListenerId) {
        self.shared.listeners.lock().remove(&listener);
    }

    async fn open_page(&self, url: &str) -> Result<PageId> {
        let page = PageId(self.shared.next_id());
        let fetcher = Arc::clone(&self.fetcher);
        let shared = Arc::clone(&self.shared);
        let url = url.to_string();

        // 先持有鎖再啟動任務，任務結束時必定看得到這個頁面
        let mut pages = self.shared.pages.lock();
        let task = tokio::spawn(async move {
            let (state, status) = match fetcher.fetch_page(&url).await {
                Ok(html) => (PageState::Loaded(html), PageStatus::Complete),
                Err(e) => {
                    debug!(action = "load", component = "http_host", page_id = %page, error = %e, "頁面載入失敗");
                    (PageState::Failed, PageStatus::Failed(format!("{:#}", e)))
                }
            };

            if shared.finish(page, state) {
                shared.publish(page, status);
            }
        });
        pages.insert(page, PageState::Loading(task));
        drop(pages);

        self.shared.publish(page, PageStatus::Loading);
        Ok(page)
    }

    async fn run_in_page(&self, page: PageId, script: PageScript) -> Result<ExtractionResult> {
        let html = match self.shared.pages.lock().get(&page) {
            Some(PageState::Loaded(html)) => html.clone(),
            Some(PageState::Loading(_)) => bail!("{} 尚未載入完成", page),
            Some(PageState::Failed) => bail!("{} 載入失敗", page),
            None => bail!("{} 不存在", page),
        };

        let snapshot = snapshot_from_html(&html);
        Ok(script(&snapshot))
    }

    async fn close_page(&self, page: PageId) -> Result<()> {
        match self.shared.pages.lock().remove(&page) {
            Some(PageState::Loading(task)) => {
                task.abort();
                Ok(())
            }
            Some(_) => Ok(()),
            None => bail!("{} 不存在", page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use crate::search::{CancelSignal, PageQueryOrchestrator};
    use std::time::Duration;

    fn host() -> HttpPageHost {
        HttpPageHost::new(&ScoutConfig::default().with_max_retries(0)).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_url_reports_failed() {
        let host = host();
        let mut subscription = host.subscribe();

        let page = host.open_page("http://[invalid").await.unwrap();
        let mut statuses = vec![];
        while let Ok(Some(event)) =
            tokio::time::timeout(Duration::from_secs(5), subscription.events.recv()).await
        {
            assert_eq!(event.page, page);
            let done = !matches!(event.status, PageStatus::Loading);
            statuses.push(event.status);
            if done {
                break;
            }
        }

        assert_eq!(statuses.first(), Some(&PageStatus::Loading));
        assert!(matches!(statuses.last(), Some(PageStatus::Failed(_))));
        assert!(host.run_in_page(page, crate::extractor::extract_result_count).await.is_err());

        host.close_page(page).await.unwrap();
        assert_eq!(host.open_pages(), 0);
        host.unsubscribe(subscription.id);
    }

    #[tokio::test]
    async fn test_close_unknown_page() {
        let host = host();
        assert!(host.close_page(PageId(42)).await.is_err());
    }

    #[tokio::test]
    async fn test_unsubscribed_listener_gets_nothing() {
        let host = host();
        let mut subscription = host.subscribe();
        host.unsubscribe(subscription.id);

        let page = host.open_page("http://[invalid").await.unwrap();
        assert!(subscription.events.recv().await.is_none());
        host.close_page(page).await.unwrap();
    }

    #[tokio::test]
    async fn test_orchestrator_over_http_host_cleans_up() {
        let host = Arc::new(host());
        let config = ScoutConfig::default().with_search_host("[invalid");
        let orchestrator = PageQueryOrchestrator::new(Arc::clone(&host) as Arc<dyn PageHost>, config);

        let err = orchestrator
            .search_intitle_count("rust", CancelSignal::never())
            .await
            .unwrap_err();

        assert!(matches!(err, ScoutError::PageLoadFailed(_)));
        assert_eq!(host.open_pages(), 0);
        assert!(host.shared.listeners.lock().is_empty());
    }
}
