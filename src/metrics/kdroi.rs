use super::input::MetricsInput;
use super::types::{KdroiResult, RoiLevel};

/// 難度斷點 → 需要的引用網域數
pub const DIFFICULTY_DOMAIN_TABLE: [(u32, u32); 10] = [
    (0, 1),
    (10, 10),
    (20, 22),
    (30, 36),
    (40, 56),
    (50, 84),
    (60, 130),
    (70, 203),
    (80, 350),
    (90, 756),
];

/// 每條外鏈的基礎價格 100，以半單位計
const BASE_PRICE_HALVES: u64 = 200;

/// 假設的點擊率
const CLICK_THROUGH_RATE: f64 = 0.1;

/// 依難度內插需要的引用網域數
///
/// 超出表格範圍時取端點值；剛好落在斷點時直接回傳表格值。
pub fn required_domains(difficulty: f64) -> u32 {
    let (first_kd, first_domains) = DIFFICULTY_DOMAIN_TABLE[0];
    let (last_kd, last_domains) = DIFFICULTY_DOMAIN_TABLE[DIFFICULTY_DOMAIN_TABLE.len() - 1];

    if difficulty <= first_kd as f64 {
        return first_domains;
    }
    if difficulty >= last_kd as f64 {
        return last_domains;
    }

    for window in DIFFICULTY_DOMAIN_TABLE.windows(2) {
        let (lo_kd, lo_domains) = window[0];
        let (hi_kd, hi_domains) = window[1];

        if difficulty == lo_kd as f64 {
            return lo_domains;
        }
        if difficulty < hi_kd as f64 {
            let ratio = (difficulty - lo_kd as f64) / (hi_kd - lo_kd) as f64;
            let domains = lo_domains as f64 + ratio * (hi_domains as f64 - lo_domains as f64);
            return domains.round() as u32;
        }
    }

    last_domains
}

/// 第 position 條外鏈的價格，以半單位（0.5）計
///
/// 10 條以內為基礎價；11-50 每條加 1%，51-200 每條再加 1.5%，
/// 200 以上每條再加 2%，各級只計算落在該級的數量。
fn link_price_halves(position: u32) -> u64 {
    let position = position as u64;
    let tier1 = position.saturating_sub(10).min(40);
    let tier2 = position.saturating_sub(50).min(150);
    let tier3 = position.saturating_sub(200);

    BASE_PRICE_HALVES + 2 * tier1 + 3 * tier2 + 4 * tier3
}

pub fn link_price(position: u32) -> f64 {
    link_price_halves(position) as f64 / 2.0
}

/// 購買 1..=total_links 條外鏈的總成本
pub fn total_link_cost(total_links: u32) -> f64 {
    let halves: u64 = (1..=total_links).map(link_price_halves).sum();
    halves as f64 / 2.0
}

/// 以 10% 點擊率估算的年收益
pub fn annual_revenue(monthly_volume: f64) -> f64 {
    (monthly_volume / 30.0) * CLICK_THROUGH_RATE * 365.0
}

pub fn roi_percent(annual_revenue: f64, total_investment: f64) -> f64 {
    (annual_revenue - total_investment) / total_investment * 100.0
}

pub fn roi_level(roi_percent: f64) -> RoiLevel {
    if roi_percent > 300.0 {
        RoiLevel::Excellent
    } else if roi_percent > 100.0 {
        RoiLevel::Cautious
    } else {
        RoiLevel::NotRecommended
    }
}

pub fn kdroi(input: &MetricsInput) -> KdroiResult {
    let required_domains = required_domains(input.difficulty);
    let total_investment = total_link_cost(required_domains);
    let annual_revenue = annual_revenue(input.monthly_volume);
    let roi_percent = roi_percent(annual_revenue, total_investment);

    KdroiResult {
        roi_percent,
        required_domains,
        total_investment,
        annual_revenue,
        level: roi_level(roi_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_breakpoints() {
        assert_eq!(required_domains(40.0), 56);
        assert_eq!(required_domains(90.0), 756);
        for (kd, domains) in DIFFICULTY_DOMAIN_TABLE {
            assert_eq!(required_domains(kd as f64), domains);
        }
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(required_domains(35.0), 46);
        assert_eq!(required_domains(85.0), 553);
        assert_eq!(required_domains(12.5), 13);
    }

    #[test]
    fn test_clamped_to_table() {
        assert_eq!(required_domains(-3.0), 1);
        assert_eq!(required_domains(95.0), 756);
        assert_eq!(required_domains(100.0), 756);
    }

    #[test]
    fn test_first_ten_links_at_base_price() {
        assert_eq!(total_link_cost(10), 1000.0);
        assert_eq!(total_link_cost(1), 100.0);
    }

    #[test]
    fn test_price_ladder() {
        assert_eq!(link_price(10), 100.0);
        assert_eq!(link_price(11), 101.0);
        assert_eq!(link_price(50), 140.0);
        assert_eq!(link_price(51), 141.5);
        assert_eq!(link_price(200), 365.0);
        assert_eq!(link_price(201), 367.0);
        assert_eq!(total_link_cost(11), 1101.0);
    }

    #[test]
    fn test_total_cost_strictly_increasing() {
        let mut previous = total_link_cost(1);
        for n in 2..=1000 {
            let current = total_link_cost(n);
            assert!(current > previous, "cost({}) = {} <= {}", n, current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_annual_revenue() {
        assert!((annual_revenue(3000.0) - 3650.0).abs() < 1e-9);
    }

    #[test]
    fn test_kdroi_not_recommended() {
        let input = MetricsInput::new(100.0, 1000.0, 40.0).unwrap();
        let result = kdroi(&input);

        assert_eq!(result.required_domains, 56);
        assert_eq!(result.total_investment, 6691.5);
        assert!((result.annual_revenue - 1216.666_666_666_7).abs() < 1e-6);
        assert!((result.roi_percent - -81.8177).abs() < 1e-3);
        assert_eq!(result.level, RoiLevel::NotRecommended);
    }

    #[test]
    fn test_kdroi_levels() {
        let excellent = kdroi(&MetricsInput::new(10.0, 100_000.0, 10.0).unwrap());
        assert_eq!(excellent.required_domains, 10);
        assert_eq!(excellent.level, RoiLevel::Excellent);

        let cautious = kdroi(&MetricsInput::new(10.0, 2000.0, 10.0).unwrap());
        assert_eq!(cautious.level, RoiLevel::Cautious);
    }

    #[test]
    fn test_roi_level_edges() {
        assert_eq!(roi_level(300.0), RoiLevel::Cautious);
        assert_eq!(roi_level(300.1), RoiLevel::Excellent);
        assert_eq!(roi_level(100.0), RoiLevel::NotRecommended);
    }
}
