/// 限定標題的查詢字串
pub fn intitle_query(keyword: &str) -> String {
    format!("intitle:\"{}\"", keyword)
}

/// 搜尋結果頁網址
pub fn search_url(search_host: &str, query: &str) -> String {
    format!(
        "https://{}/search?q={}",
        search_host,
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intitle_url() {
        let url = search_url("www.google.com", &intitle_query("rust web"));
        assert_eq!(url, "https://www.google.com/search?q=intitle%3A%22rust%20web%22");
    }

    #[test]
    fn test_raw_keyword_url() {
        let url = search_url("www.google.com", "長尾 關鍵字");
        assert!(url.starts_with("https://www.google.com/search?q="));
        assert!(url.contains("%E9%95%B7%E5%B0%BE%20"));
    }
}
