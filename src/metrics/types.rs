use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// 競爭程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CompetitionLevel::Low => "低競爭",
            CompetitionLevel::Medium => "中等競爭",
            CompetitionLevel::High => "高競爭",
        }
    }
}

/// 投資報酬評等
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiLevel {
    /// 報酬率 > 300%
    Excellent,
    /// 100% < 報酬率 <= 300%
    Cautious,
    /// 報酬率 <= 100%
    NotRecommended,
}

impl RoiLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RoiLevel::Excellent => "極佳",
            RoiLevel::Cautious => "謹慎",
            RoiLevel::NotRecommended => "不建議",
        }
    }
}

/// KDROI 計算結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdroiResult {
    pub roi_percent: f64,
    /// 需要的引用網域數
    pub required_domains: u32,
    /// 外鏈總投入
    pub total_investment: f64,
    /// 預估年收益
    pub annual_revenue: f64,
    pub level: RoiLevel,
}

/// 三項指標
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsOutput {
    pub kgr: f64,
    pub kgr_level: CompetitionLevel,
    pub ekgr: f64,
    pub ekgr_level: CompetitionLevel,
    pub kdroi: KdroiResult,
    pub computed_at: DateTime<Utc>,
}
