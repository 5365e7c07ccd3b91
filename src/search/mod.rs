// 宣告子模組
pub mod types;
pub mod trait_def;
pub mod engine;
pub mod utils;
pub mod services;

// 重新導出常用項目
pub use types::CancelSignal;
pub use trait_def::PageHost;
pub use engine::PageQueryOrchestrator;
pub use services::HttpPageHost;

use crate::error::{ScoutError, ScoutResult};

/// 手動搜尋用的網址（不加 intitle 限定）
pub fn manual_search_url(search_host: &str, keyword: &str) -> ScoutResult<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ScoutError::EmptyKeyword);
    }
    Ok(utils::search_url(search_host, keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_search_url() {
        let url = manual_search_url("www.google.com", "  kgr tool ").unwrap();
        assert_eq!(url, "https://www.google.com/search?q=kgr%20tool");
    }

    #[test]
    fn test_manual_search_requires_keyword() {
        assert!(matches!(
            manual_search_url("www.google.com", ""),
            Err(ScoutError::EmptyKeyword)
        ));
    }
}
