use std::time::Duration;

/// 查詢配置
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// 搜尋引擎主機
    pub search_host: String,
    /// 等待頁面載入完成的上限（秒）
    pub load_timeout_secs: u64,
    /// 單次請求超時（秒）
    pub request_timeout_secs: u64,
    /// 最大重試次數
    pub max_retries: u32,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            search_host: "www.google.com".to_string(),
            load_timeout_secs: 30,
            request_timeout_secs: 30,
            max_retries: 3,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
        }
    }
}

impl ScoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_host(mut self, host: impl Into<String>) -> Self {
        self.search_host = host.into();
        self
    }

    pub fn with_load_timeout(mut self, secs: u64) -> Self {
        self.load_timeout_secs = secs;
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = value.into();
        self
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}
