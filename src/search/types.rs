use std::fmt;
use tokio::sync::{mpsc, watch};

/// 背景頁面編號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// 狀態監聽器編號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// 頁面載入狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    Complete,
    Failed(String),
}

/// 頁面狀態變更事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStatusEvent {
    pub page: PageId,
    pub status: PageStatus,
}

/// 一個已註冊的狀態監聽
#[derive(Debug)]
pub struct Subscription {
    pub id: ListenerId,
    pub events: mpsc::UnboundedReceiver<PageStatusEvent>,
}

/// 取消查詢的控制端
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        // 接收端都已結束時無需通知
        let _ = self.0.send(true);
    }
}

/// 查詢端持有的取消訊號
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    pub fn channel() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle(tx), CancelSignal(rx))
    }

    /// 永遠不會觸發的訊號
    pub fn never() -> Self {
        let (_, signal) = Self::channel();
        signal
    }

    /// 等到被取消為止；控制端被丟棄後永不返回
    pub async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
