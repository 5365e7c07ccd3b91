use crate::extractor::PageScript;
use crate::types::ExtractionResult;
use super::types::{ListenerId, PageId, Subscription};
use anyhow::Result;

/// 頁面宿主能力
///
/// 查詢流程所需的全部外部能力：開啟背景頁面、監聽載入狀態、
/// 在頁面內執行擷取函式、關閉頁面。
#[async_trait::async_trait]
pub trait PageHost: Send + Sync {
    /// 宿主名稱
    fn name(&self) -> &str;

    /// 是否能在頁面內執行腳本
    fn supports_scripting(&self) -> bool {
        true
    }

    /// 註冊頁面狀態監聽
    fn subscribe(&self) -> Subscription;

    /// 移除監聽
    fn unsubscribe(&self, listener: ListenerId);

    /// 以非前景方式開啟頁面
    async fn open_page(&self, url: &str) -> Result<PageId>;

    /// 在已載入的頁面內執行擷取函式
    async fn run_in_page(&self, page: PageId, script: PageScript) -> Result<ExtractionResult>;

    async fn close_page(&self, page: PageId) -> Result<()>;
}
