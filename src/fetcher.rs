use crate::config::ScoutConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::warn;

/// HTTP Fetcher trait
pub trait Fetcher {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// HTTP 實作
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
}

impl HttpFetcher {
    /// 依配置建立 HTTP Fetcher
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("User-Agent 格式錯誤")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
        ));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language).context("Accept-Language 格式錯誤")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .context("無法建立 HTTP 客戶端")?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
        })
    }

    /// 帶重試的請求
    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // 指數退避
                let wait_time = Duration::from_secs(2u64.pow(attempt - 1));
                tokio::time::sleep(wait_time).await;
                warn!(action = "retry", component = "fetcher", attempt, url, "重試請求");
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(e) => {
                                last_error = Some(anyhow::anyhow!("讀取回應失敗: {}", e));
                                continue;
                            }
                        }
                    } else {
                        last_error = Some(anyhow::anyhow!(
                            "HTTP 錯誤: {}",
                            response.status()
                        ));
                        continue;
                    }
                }
                Err(e) => {
                    last_error = Some(anyhow::anyhow!("請求失敗: {}", e));
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("未知錯誤")))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.fetch_with_retry(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_default_config() {
        let fetcher = HttpFetcher::new(&ScoutConfig::default()).unwrap();
        assert_eq!(fetcher.max_retries, 3);
    }

    #[test]
    fn test_rejects_invalid_header() {
        let mut config = ScoutConfig::default();
        config.user_agent = "bad\nagent".to_string();
        assert!(HttpFetcher::new(&config).is_err());
    }
}
