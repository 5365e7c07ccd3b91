use super::types::CompetitionLevel;

/// KGR = 標題結果數 / 月搜尋量
pub fn kgr(title_count: f64, monthly_volume: f64) -> f64 {
    title_count / monthly_volume
}

pub fn kgr_level(kgr: f64) -> CompetitionLevel {
    if kgr < 0.25 {
        CompetitionLevel::Low
    } else if kgr <= 1.0 {
        CompetitionLevel::Medium
    } else {
        CompetitionLevel::High
    }
}

/// EKGR = 標題結果數 × (1 + 難度/100) / 月搜尋量
pub fn ekgr(title_count: f64, monthly_volume: f64, difficulty: f64) -> f64 {
    title_count * (1.0 + difficulty / 100.0) / monthly_volume
}

/// EKGR 評等同時看數值與難度；兩個條件都不符合時落到高競爭
pub fn ekgr_level(ekgr: f64, difficulty: f64) -> CompetitionLevel {
    if ekgr < 0.25 && difficulty < 30.0 {
        CompetitionLevel::Low
    } else if ekgr <= 1.0 && difficulty <= 50.0 {
        CompetitionLevel::Medium
    } else {
        CompetitionLevel::High
    }
}
