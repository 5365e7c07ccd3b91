use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// 指標輸入欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    TitleCount,
    MonthlyVolume,
    Difficulty,
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricField::TitleCount => "標題結果數",
            MetricField::MonthlyVolume => "月搜尋量",
            MetricField::Difficulty => "關鍵字難度",
        };
        f.write_str(name)
    }
}

/// 欄位驗證失敗的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// 空白、零或不是數字
    Missing,
    /// 超出允許範圍
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: MetricField,
    pub problem: FieldProblem,
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "{}", self.field),
            FieldProblem::OutOfRange => write!(f, "{}（超出範圍）", self.field),
        }
    }
}

fn join_fields(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("、")
}

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("請輸入關鍵詞")]
    EmptyKeyword,

    #[error("請輸入有效的數值：{}", join_fields(.fields))]
    InvalidMetrics { fields: Vec<InvalidField> },

    #[error("{0} 無法執行頁面腳本，請確認環境後重試")]
    CapabilityUnavailable(String),

    #[error("頁面載入失敗: {0}")]
    PageLoadFailed(String),

    #[error("頁面在 {0:?} 內未載入完成")]
    PageLoadTimeout(Duration),

    #[error("查詢已取消")]
    Cancelled,

    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

impl ScoutError {
    /// 驗證類錯誤：直接把訊息顯示給使用者
    pub fn is_validation(&self) -> bool {
        matches!(self, ScoutError::EmptyKeyword | ScoutError::InvalidMetrics { .. })
    }

    /// 給使用者看的訊息；非預期錯誤一律顯示重試提示
    pub fn user_message(&self) -> String {
        match self {
            ScoutError::EmptyKeyword
            | ScoutError::InvalidMetrics { .. }
            | ScoutError::CapabilityUnavailable(_)
            | ScoutError::Cancelled => self.to_string(),
            _ => "查詢失敗，請重試".to_string(),
        }
    }
}

pub type ScoutResult<T> = std::result::Result<T, ScoutError>;
