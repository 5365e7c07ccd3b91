// 子模組
pub mod types;
pub mod input;
pub mod kgr;
pub mod kdroi;

// 重新導出
pub use types::{CompetitionLevel, MetricsOutput, RoiLevel};
pub use input::MetricsInput;

use tracing::debug;

/// 計算 KGR、EKGR 與 KDROI
pub fn calculate(input: &MetricsInput) -> MetricsOutput {
    let kgr = kgr::kgr(input.title_count, input.monthly_volume);
    let ekgr = kgr::ekgr(input.title_count, input.monthly_volume, input.difficulty);
    let kdroi = kdroi::kdroi(input);

    debug!(
        action = "calculate",
        component = "metrics",
        kgr,
        ekgr,
        required_domains = kdroi.required_domains,
        total_investment = kdroi.total_investment,
        roi_percent = kdroi.roi_percent,
        "指標計算完成"
    );

    MetricsOutput {
        kgr,
        kgr_level: kgr::kgr_level(kgr),
        ekgr,
        ekgr_level: kgr::ekgr_level(ekgr, input.difficulty),
        kdroi,
        computed_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_all_three() {
        let input = MetricsInput::parse("100", "1000", "40").unwrap();
        let output = calculate(&input);

        assert_eq!(output.kgr, 0.1);
        assert_eq!(output.kgr_level, CompetitionLevel::Low);
        assert!((output.ekgr - 0.14).abs() < 1e-12);
        // EKGR 雖低於 0.25，但難度 >= 30
        assert_eq!(output.ekgr_level, CompetitionLevel::Medium);
        assert_eq!(output.kdroi.required_domains, 56);
        assert_eq!(output.kdroi.level, RoiLevel::NotRecommended);
    }

    #[test]
    fn test_output_serializes() {
        let input = MetricsInput::new(10.0, 100_000.0, 10.0).unwrap();
        let json = serde_json::to_value(calculate(&input)).unwrap();

        assert_eq!(json["kgr_level"], "low");
        assert_eq!(json["kdroi"]["level"], "excellent");
        assert_eq!(json["kdroi"]["required_domains"], 10);
    }
}
