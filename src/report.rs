use crate::error::ScoutResult;
use crate::metrics::MetricsOutput;
use crate::types::ExtractionResult;

/// 結果區塊的三種狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// 需要使用者補上輸入
    Empty(String),
    Success(String),
    Error(String),
}

impl ResultView {
    pub fn from_count(outcome: &ScoutResult<ExtractionResult>) -> Self {
        match outcome {
            Ok(result) => ResultView::Success(format!(" {} ", result.count)),
            Err(e) if e.is_validation() => ResultView::Empty(e.to_string()),
            Err(e) => ResultView::Error(e.user_message()),
        }
    }

    pub fn from_metrics(outcome: &ScoutResult<MetricsOutput>) -> Self {
        match outcome {
            Ok(output) => ResultView::Success(metrics_rows(output).join("\n")),
            Err(e) if e.is_validation() => ResultView::Empty(e.to_string()),
            Err(e) => ResultView::Error(e.user_message()),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ResultView::Success(_))
    }

    pub fn print(&self) {
        match self {
            ResultView::Empty(msg) => println!("⚠️  {}", msg),
            ResultView::Success(msg) if msg.is_empty() => {}
            ResultView::Success(msg) => println!("{}", msg),
            ResultView::Error(msg) => eprintln!("❌ {}", msg),
        }
    }
}

/// 三列指標輸出
pub fn metrics_rows(output: &MetricsOutput) -> [String; 3] {
    let kdroi = &output.kdroi;
    [
        format!("KGR:   {:.3}（{}）", output.kgr, output.kgr_level.label()),
        format!("EKGR:  {:.3}（{}）", output.ekgr, output.ekgr_level.label()),
        format!(
            "KDROI: {:.1}%（{}）｜需 {} 個引用網域，投入 ${:.2}，預估年收益 ${:.2}",
            kdroi.roi_percent,
            kdroi.level.label(),
            kdroi.required_domains,
            kdroi.total_investment,
            kdroi.annual_revenue
        ),
    ]
}

/// 擷取細節（除錯用）
pub fn print_extraction_details(result: &ExtractionResult) {
    println!("\n╔══════════════════════════════════╗");
    println!("║   🔎 擷取細節                    ║");
    println!("╠══════════════════════════════════╣");
    println!("║ 結果數:     {:>20} ║", result.count);
    println!("║ 匹配方式:   {:>20} ║", result.match_type.label());
    println!("║ result-stats: {:>18} ║", if result.result_stats.is_some() { "有" } else { "無" });
    println!("╚══════════════════════════════════╝\n");

    if let Some(stats) = &result.result_stats {
        println!("📋 result-stats: {}", stats);
    }
    if result.is_miss() {
        println!("📋 頁面預覽:\n{}", result.text_preview.trim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use crate::metrics::{calculate, MetricsInput};
    use crate::types::{MatchType, PageSnapshot};

    #[test]
    fn test_count_views() {
        let hit = ExtractionResult::matched(
            "6130".to_string(),
            MatchType::Localized,
            &PageSnapshot::from_text("找到约 6,130 条结果"),
        );
        assert_eq!(ResultView::from_count(&Ok(hit)), ResultView::Success(" 6130 ".to_string()));

        let empty = ResultView::from_count(&Err(ScoutError::EmptyKeyword));
        assert_eq!(empty, ResultView::Empty("請輸入關鍵詞".to_string()));

        let failed = ResultView::from_count(&Err(ScoutError::Host(anyhow::anyhow!("tab crashed"))));
        assert_eq!(failed, ResultView::Error("查詢失敗，請重試".to_string()));
        assert!(failed.is_error());
    }

    #[test]
    fn test_metrics_rows() {
        let output = calculate(&MetricsInput::new(100.0, 1000.0, 40.0).unwrap());
        let rows = metrics_rows(&output);

        assert_eq!(rows[0], "KGR:   0.100（低競爭）");
        assert_eq!(rows[1], "EKGR:  0.140（中等競爭）");
        assert!(rows[2].starts_with("KDROI: -81.8%（不建議）"));
        assert!(rows[2].contains("需 56 個引用網域"));
        assert!(rows[2].contains("$6691.50"));
    }

    #[test]
    fn test_metrics_validation_view() {
        let view = ResultView::from_metrics(&MetricsInput::parse("", "1000", "40").map(|i| calculate(&i)));
        assert!(matches!(view, ResultView::Empty(msg) if msg.contains("標題結果數")));
    }
}
