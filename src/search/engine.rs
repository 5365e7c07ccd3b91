use crate::config::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use crate::extractor::extract_result_count;
use crate::types::ExtractionResult;
use super::{
    trait_def::PageHost,
    types::{CancelSignal, PageId, PageStatus, Subscription},
    utils,
};
use anyhow::anyhow;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 頁面狀態監聽；離開作用域時一定會解除註冊
struct LoadListener<'a> {
    host: &'a dyn PageHost,
    subscription: Option<Subscription>,
}

impl<'a> LoadListener<'a> {
    fn register(host: &'a dyn PageHost) -> Self {
        Self {
            host,
            subscription: Some(host.subscribe()),
        }
    }

    /// 等待指定頁面載入完成，命中後立即解除註冊
    async fn wait_complete(&mut self, page: PageId) -> ScoutResult<()> {
        let Some(subscription) = self.subscription.as_mut() else {
            return Err(anyhow!("監聽已解除").into());
        };

        let outcome = loop {
            match subscription.events.recv().await {
                Some(event) if event.page == page => match event.status {
                    PageStatus::Complete => break Ok(()),
                    PageStatus::Failed(reason) => break Err(ScoutError::PageLoadFailed(reason)),
                    PageStatus::Loading => {}
                },
                Some(_) => {}
                None => break Err(anyhow!("頁面狀態通道已關閉").into()),
            }
        };

        self.release();
        outcome
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.host.unsubscribe(subscription.id);
        }
    }
}

impl Drop for LoadListener<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

/// 已開啟的背景頁面；未明確關閉就被丟棄時改由背景任務關閉
struct PageGuard {
    host: Arc<dyn PageHost>,
    page: PageId,
    closed: bool,
}

impl PageGuard {
    fn new(host: Arc<dyn PageHost>, page: PageId) -> Self {
        Self { host, page, closed: false }
    }

    async fn close(mut self) -> anyhow::Result<()> {
        self.closed = true;
        self.host.close_page(self.page).await
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let host = Arc::clone(&self.host);
        let page = self.page;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Err(e) = host.close_page(page).await {
                        warn!(action = "close", component = "orchestrator", page_id = %page, error = %e, "關閉頁面失敗");
                    }
                });
            }
            Err(_) => warn!(action = "close", component = "orchestrator", page_id = %page, "無執行環境，無法關閉頁面"),
        }
    }
}

/// 查詢標題結果數的流程
pub struct PageQueryOrchestrator {
    host: Arc<dyn PageHost>,
    config: ScoutConfig,
}

impl PageQueryOrchestrator {
    pub fn new(host: Arc<dyn PageHost>, config: ScoutConfig) -> Self {
        Self { host, config }
    }

    pub fn host_name(&self) -> &str {
        self.host.name()
    }

    /// 查詢 `intitle:"<keyword>"` 的結果數
    pub async fn search_intitle_count(
        &self,
        keyword: &str,
        cancel: CancelSignal,
    ) -> ScoutResult<ExtractionResult> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ScoutError::EmptyKeyword);
        }

        if !self.host.supports_scripting() {
            error!(action = "precondition", component = "orchestrator", host = self.host.name(), "宿主不支援頁面腳本");
            return Err(ScoutError::CapabilityUnavailable(self.host.name().to_string()));
        }

        let url = utils::search_url(&self.config.search_host, &utils::intitle_query(keyword));
        info!(action = "start", component = "orchestrator", keyword, url = %url, "開始查詢");

        let mut listener = LoadListener::register(self.host.as_ref());
        let page = self.host.open_page(&url).await?;
        let guard = PageGuard::new(Arc::clone(&self.host), page);
        debug!(action = "open", component = "orchestrator", page_id = %page, "已開啟背景頁面");

        let outcome = self.extract_on_page(page, &mut listener, cancel).await;
        drop(listener);

        if let Err(e) = guard.close().await {
            warn!(action = "close", component = "orchestrator", page_id = %page, error = %e, "關閉頁面失敗");
        }

        match &outcome {
            Ok(result) => info!(
                action = "done",
                component = "orchestrator",
                keyword,
                count = %result.count,
                match_type = result.match_type.label(),
                "查詢完成"
            ),
            Err(e) => error!(action = "failed", component = "orchestrator", keyword, error = %e, "查詢失敗"),
        }

        outcome
    }

    async fn extract_on_page(
        &self,
        page: PageId,
        listener: &mut LoadListener<'_>,
        mut cancel: CancelSignal,
    ) -> ScoutResult<ExtractionResult> {
        let timeout = self.config.load_timeout();

        tokio::select! {
            loaded = tokio::time::timeout(timeout, listener.wait_complete(page)) => match loaded {
                Ok(result) => result?,
                Err(_) => return Err(ScoutError::PageLoadTimeout(timeout)),
            },
            _ = cancel.cancelled() => return Err(ScoutError::Cancelled),
        }

        let result = self.host.run_in_page(page, extract_result_count).await?;
        debug!(
            action = "extract",
            component = "orchestrator",
            page_id = %page,
            preview = %result.text_preview,
            result_stats = ?result.result_stats,
            "擷取結果"
        );

        Ok(result)
    }
}
