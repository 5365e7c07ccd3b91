use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// 命中的樣式層級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// 沒有任何樣式命中
    None,
    /// 中文樣式：「找到约 N 条结果」
    Localized,
    /// 英文樣式：「About N results」
    English,
    /// 寬鬆樣式：任意數字後接「条结果」或「results」
    Loose,
}

impl MatchType {
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::None => "未匹配",
            MatchType::Localized => "中文",
            MatchType::English => "英文",
            MatchType::Loose => "寬鬆",
        }
    }
}

/// 頁面快照：在頁面內執行擷取函式時看得到的內容
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// 頁面可見文字（不含 markup、script、style）
    pub text: String,
    /// `#result-stats` 元素的文字
    pub result_stats: Option<String>,
}

impl PageSnapshot {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            result_stats: None,
        }
    }
}

/// 單次擷取的結果數量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// 只含數字，已去除千分位
    pub count: String,
    pub match_type: MatchType,
    /// 可見文字前 500 字（除錯用）
    pub text_preview: String,
    /// `#result-stats` 文字（除錯用）
    pub result_stats: Option<String>,
    /// 擷取時間
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// 沒有命中時的結果
    pub fn miss(snapshot: &PageSnapshot) -> Self {
        Self::matched("0".to_string(), MatchType::None, snapshot)
    }

    pub fn matched(count: String, match_type: MatchType, snapshot: &PageSnapshot) -> Self {
        Self {
            count,
            match_type,
            text_preview: snapshot.text.chars().take(500).collect(),
            result_stats: snapshot.result_stats.clone(),
            extracted_at: Utc::now(),
        }
    }

    pub fn is_miss(&self) -> bool {
        self.match_type == MatchType::None
    }
}
