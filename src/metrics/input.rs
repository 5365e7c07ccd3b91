use crate::error::{FieldProblem, InvalidField, MetricField, ScoutError, ScoutResult};

/// 已驗證的指標輸入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsInput {
    pub title_count: f64,
    pub monthly_volume: f64,
    /// 0-100
    pub difficulty: f64,
}

impl MetricsInput {
    /// 驗證數值
    ///
    /// 零視同未填寫，與空白欄位一樣被拒絕。
    pub fn new(title_count: f64, monthly_volume: f64, difficulty: f64) -> ScoutResult<Self> {
        let mut problems = Vec::new();

        check(MetricField::TitleCount, title_count, None, &mut problems);
        check(MetricField::MonthlyVolume, monthly_volume, None, &mut problems);
        check(MetricField::Difficulty, difficulty, Some(100.0), &mut problems);

        if !problems.is_empty() {
            return Err(ScoutError::InvalidMetrics { fields: problems });
        }

        Ok(Self {
            title_count,
            monthly_volume,
            difficulty,
        })
    }

    /// 從使用者輸入的文字解析
    pub fn parse(title_count: &str, monthly_volume: &str, difficulty: &str) -> ScoutResult<Self> {
        // 無法解析的欄位以 0 代入，與未填寫一樣被拒絕
        Self::new(
            parse_number(title_count).unwrap_or(0.0),
            parse_number(monthly_volume).unwrap_or(0.0),
            parse_number(difficulty).unwrap_or(0.0),
        )
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace([',', '，'], "")
        .parse::<f64>()
        .ok()
}

fn check(field: MetricField, value: f64, max: Option<f64>, problems: &mut Vec<InvalidField>) {
    let problem = if !value.is_finite() || value == 0.0 {
        Some(FieldProblem::Missing)
    } else if value < 0.0 || max.is_some_and(|max| value > max) {
        Some(FieldProblem::OutOfRange)
    } else {
        None
    };

    if let Some(problem) = problem {
        problems.push(InvalidField { field, problem });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_fields(result: ScoutResult<MetricsInput>) -> Vec<InvalidField> {
        match result {
            Err(ScoutError::InvalidMetrics { fields }) => fields,
            other => panic!("expected InvalidMetrics, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_input() {
        let input = MetricsInput::parse("1,200", " 3000 ", "45.5").unwrap();
        assert_eq!(input.title_count, 1200.0);
        assert_eq!(input.monthly_volume, 3000.0);
        assert_eq!(input.difficulty, 45.5);
    }

    #[test]
    fn test_zero_is_treated_as_missing() {
        for (t, v, d, field) in [
            (0.0, 1000.0, 40.0, MetricField::TitleCount),
            (100.0, 0.0, 40.0, MetricField::MonthlyVolume),
            (100.0, 1000.0, 0.0, MetricField::Difficulty),
        ] {
            let fields = invalid_fields(MetricsInput::new(t, v, d));
            assert_eq!(fields, vec![InvalidField { field, problem: FieldProblem::Missing }]);
        }
    }

    #[test]
    fn test_reports_every_missing_field() {
        let fields = invalid_fields(MetricsInput::parse("", "abc", "  "));
        let names: Vec<_> = fields.iter().map(|f| f.field).collect();
        assert_eq!(
            names,
            vec![MetricField::TitleCount, MetricField::MonthlyVolume, MetricField::Difficulty]
        );
        assert!(fields.iter().all(|f| f.problem == FieldProblem::Missing));
    }

    #[test]
    fn test_difficulty_out_of_range() {
        let fields = invalid_fields(MetricsInput::parse("10", "100", "101"));
        assert_eq!(
            fields,
            vec![InvalidField { field: MetricField::Difficulty, problem: FieldProblem::OutOfRange }]
        );

        let fields = invalid_fields(MetricsInput::new(10.0, 100.0, -5.0));
        assert_eq!(fields[0].problem, FieldProblem::OutOfRange);
    }

    #[test]
    fn test_non_finite_rejected() {
        let fields = invalid_fields(MetricsInput::parse("NaN", "inf", "50"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_boundary_difficulty_accepted() {
        assert!(MetricsInput::new(1.0, 1.0, 100.0).is_ok());
    }
}
