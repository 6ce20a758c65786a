//! 백테스트 결과 표시 포맷팅.
//!
//! 서비스가 반환한 결과를 변경하지 않고, 화면에 필요한 파생 필드만 계산합니다.

use crate::domain::backtest::{BacktestResult, BacktestStatus};
use crate::types::ResourceId;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

const NOT_AVAILABLE: &str = "N/A";
const SECONDS_PER_DAY: f64 = 86_400.0;

/// 상태 표시 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Blue,
    Yellow,
    Red,
    Gray,
}

impl StatusColor {
    pub fn for_status(status: Option<&BacktestStatus>) -> Self {
        match status {
            Some(BacktestStatus::Completed) => StatusColor::Green,
            Some(BacktestStatus::Running) => StatusColor::Blue,
            Some(BacktestStatus::Pending) => StatusColor::Yellow,
            Some(BacktestStatus::Failed) => StatusColor::Red,
            _ => StatusColor::Gray,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Blue => "blue",
            StatusColor::Yellow => "yellow",
            StatusColor::Red => "red",
            StatusColor::Gray => "gray",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 표시용 필드가 추가된 백테스트 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayResult {
    #[serde(flatten)]
    pub result: BacktestResult,
    pub total_return_display: String,
    pub annualized_return_display: String,
    pub max_drawdown_display: String,
    pub sharpe_ratio_display: String,
    pub execution_time_display: String,
    pub status_color: StatusColor,
    /// 기간 (일, 올림). 날짜를 해석할 수 없으면 `None`.
    pub duration_days: Option<i64>,
}

/// 퍼센트 단위 값을 소수점 둘째 자리까지 표시합니다 (`12.345` → `"12.35%"`).
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", round2(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn format_ratio(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}", round2(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// 실행 시간(초)을 크기에 따라 초/분/시간 단위로 표시합니다.
///
/// ```
/// use dashboard_core::format_execution_time;
///
/// assert_eq!(format_execution_time(Some(45.0)), "45.0s");
/// assert_eq!(format_execution_time(Some(125.0)), "2.1m");
/// assert_eq!(format_execution_time(Some(7200.0)), "2.0h");
/// assert_eq!(format_execution_time(None), "N/A");
/// ```
pub fn format_execution_time(seconds: Option<f64>) -> String {
    match seconds {
        None => NOT_AVAILABLE.to_string(),
        Some(s) if s < 60.0 => format!("{:.1}s", s),
        Some(s) if s < 3600.0 => format!("{:.1}m", s / 60.0),
        Some(s) => format!("{:.1}h", s / 3600.0),
    }
}

/// 시작~종료 기간을 일 단위로 올림하여 계산합니다.
///
/// 각 값은 `YYYY-MM-DD` 날짜, RFC 3339 타임스탬프 또는 오프셋 없는 ISO 타임스탬프일 수 있습니다.
pub fn duration_days(start: &str, end: &str) -> Option<i64> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let seconds = (end - start).num_seconds() as f64;
    Some((seconds / SECONDS_PER_DAY).ceil() as i64)
}

fn parse_instant(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    // 오프셋 없는 ISO 타임스탬프는 UTC로 간주
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(trimmed, crate::sanitize::DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl DisplayResult {
    /// 결과에 표시용 필드를 추가합니다.
    pub fn from_result(result: &BacktestResult) -> Self {
        let duration = match (result.start_date.as_deref(), result.end_date.as_deref()) {
            (Some(start), Some(end)) => duration_days(start, end),
            _ => None,
        };

        Self {
            total_return_display: format_percent(result.total_return),
            annualized_return_display: format_percent(result.annualized_return),
            max_drawdown_display: format_percent(result.max_drawdown.map(|d| d.abs())),
            sharpe_ratio_display: format_ratio(result.sharpe_ratio),
            execution_time_display: format_execution_time(result.execution_time),
            status_color: StatusColor::for_status(result.status.as_ref()),
            duration_days: duration,
            result: result.clone(),
        }
    }
}

/// 입력이 없으면 `None`을 반환합니다.
pub fn format_result_for_display(result: Option<&BacktestResult>) -> Option<DisplayResult> {
    result.map(DisplayResult::from_result)
}

/// 비교용 성과 점수.
///
/// `max(0, sharpe × 30 + total_return × 0.5 − |max_drawdown| × 0.3)`.
/// 샤프 비율이 없으면 0입니다. 수익률/낙폭이 없으면 0으로 취급합니다.
pub fn compute_performance_score(result: &BacktestResult) -> Decimal {
    let Some(sharpe) = result.sharpe_ratio else {
        return Decimal::ZERO;
    };
    let total_return = result.total_return.unwrap_or(Decimal::ZERO);
    let drawdown = result.max_drawdown.unwrap_or(Decimal::ZERO).abs();

    // 극단값에서도 패닉 없이 포화
    let score = sharpe
        .saturating_mul(Decimal::from(30))
        .saturating_add(total_return.saturating_mul(Decimal::new(5, 1)))
        .saturating_sub(drawdown.saturating_mul(Decimal::new(3, 1)));
    score.max(Decimal::ZERO)
}

/// 성과 점수 순위 항목.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRank {
    pub id: Option<ResourceId>,
    pub name: Option<String>,
    pub score: Decimal,
}

/// 성과 점수 내림차순으로 정렬합니다. 동점이면 입력 순서를 유지합니다.
pub fn rank_by_performance(results: &[BacktestResult]) -> Vec<PerformanceRank> {
    let mut ranks: Vec<PerformanceRank> = results
        .iter()
        .map(|r| PerformanceRank {
            id: r.id.clone(),
            name: r.name.clone(),
            score: compute_performance_score(r),
        })
        .collect();
    ranks.sort_by(|a, b| b.score.cmp(&a.score));
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn result(sharpe: Option<Decimal>, tr: Option<Decimal>, dd: Option<Decimal>) -> BacktestResult {
        BacktestResult {
            sharpe_ratio: sharpe,
            total_return: tr,
            max_drawdown: dd,
            ..Default::default()
        }
    }

    #[test]
    fn test_performance_score() {
        let r = result(Some(dec!(2)), Some(dec!(10)), Some(dec!(-5)));
        assert_eq!(compute_performance_score(&r), dec!(63.5));

        assert_eq!(
            compute_performance_score(&result(None, Some(dec!(50)), None)),
            Decimal::ZERO
        );
        assert_eq!(
            compute_performance_score(&result(Some(dec!(-1)), Some(dec!(-20)), Some(dec!(-40)))),
            Decimal::ZERO
        );
        assert_eq!(
            compute_performance_score(&result(Some(dec!(1)), None, None)),
            dec!(30)
        );
    }

    #[test]
    fn test_performance_score_saturates_on_extreme_values() {
        let huge = result(Some(Decimal::MAX), Some(Decimal::MAX), Some(Decimal::MAX));
        assert!(compute_performance_score(&huge) > Decimal::ZERO);

        let sunk = result(Some(Decimal::MIN), Some(Decimal::MIN), Some(Decimal::MAX));
        assert_eq!(compute_performance_score(&sunk), Decimal::ZERO);
    }

    #[test]
    fn test_execution_time_tiers() {
        assert_eq!(format_execution_time(Some(0.42)), "0.4s");
        assert_eq!(format_execution_time(Some(45.0)), "45.0s");
        assert_eq!(format_execution_time(Some(60.0)), "1.0m");
        assert_eq!(format_execution_time(Some(125.0)), "2.1m");
        assert_eq!(format_execution_time(Some(3600.0)), "1.0h");
        assert_eq!(format_execution_time(Some(7200.0)), "2.0h");
        assert_eq!(format_execution_time(None), "N/A");
    }

    #[test]
    fn test_duration_days_rounds_up() {
        assert_eq!(duration_days("2023-01-01", "2023-12-31"), Some(364));
        assert_eq!(
            duration_days("2024-01-01T23:00:00Z", "2024-01-02T01:00:00Z"),
            Some(1)
        );
        assert_eq!(
            duration_days("2024-01-01", "2024-01-03T00:00:01+00:00"),
            Some(3)
        );
        assert_eq!(duration_days("2024-01-01", "soon"), None);
    }

    #[test]
    fn test_duration_days_accepts_naive_timestamps() {
        assert_eq!(
            duration_days("2023-01-01T00:00:00", "2023-01-31T12:00:00"),
            Some(31)
        );
        assert_eq!(
            duration_days("2023-01-01", "2023-01-02T00:00:00.250"),
            Some(2)
        );
    }

    #[test]
    fn test_format_result_for_display() {
        assert!(format_result_for_display(None).is_none());

        let result: BacktestResult = serde_json::from_value(json!({
            "id": 7,
            "name": "MA run",
            "status": "completed",
            "start_date": "2023-01-01",
            "end_date": "2023-01-31",
            "total_return": 12.345,
            "annualized_return": 8.1,
            "max_drawdown": -5,
            "sharpe_ratio": 1.234,
            "execution_time": 125.0,
            "final_value": 112345
        }))
        .unwrap();

        let display = format_result_for_display(Some(&result)).unwrap();
        assert_eq!(display.total_return_display, "12.35%");
        assert_eq!(display.annualized_return_display, "8.10%");
        assert_eq!(display.max_drawdown_display, "5.00%");
        assert_eq!(display.sharpe_ratio_display, "1.23");
        assert_eq!(display.execution_time_display, "2.1m");
        assert_eq!(display.status_color, StatusColor::Green);
        assert_eq!(display.duration_days, Some(30));

        let body = serde_json::to_value(&display).unwrap();
        assert_eq!(body["final_value"], json!(112345));
        assert_eq!(body["status_color"], json!("green"));
        assert_eq!(body["name"], json!("MA run"));
    }

    #[test]
    fn test_display_for_sparse_result() {
        let sparse = BacktestResult {
            status: Some(BacktestStatus::Other("queued".to_string())),
            ..Default::default()
        };
        let display = format_result_for_display(Some(&sparse)).unwrap();
        assert_eq!(display.total_return_display, "N/A");
        assert_eq!(display.sharpe_ratio_display, "N/A");
        assert_eq!(display.execution_time_display, "N/A");
        assert_eq!(display.status_color, StatusColor::Gray);
        assert_eq!(display.duration_days, None);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(
            StatusColor::for_status(Some(&BacktestStatus::Running)),
            StatusColor::Blue
        );
        assert_eq!(
            StatusColor::for_status(Some(&BacktestStatus::Pending)),
            StatusColor::Yellow
        );
        assert_eq!(
            StatusColor::for_status(Some(&BacktestStatus::Failed)),
            StatusColor::Red
        );
        assert_eq!(StatusColor::for_status(None), StatusColor::Gray);
    }

    #[test]
    fn test_rank_by_performance() {
        let mut low = result(Some(dec!(0.5)), Some(dec!(2)), Some(dec!(-10)));
        low.id = Some(ResourceId::from(1));
        let mut high = result(Some(dec!(2)), Some(dec!(10)), Some(dec!(-5)));
        high.id = Some(ResourceId::from(2));
        let mut none = result(None, Some(dec!(99)), None);
        none.id = Some(ResourceId::from("bt-3"));

        let ranks = rank_by_performance(&[low, none, high]);
        let ids: Vec<String> = ranks
            .iter()
            .map(|r| r.id.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["2", "1", "bt-3"]);
        assert_eq!(ranks[0].score, dec!(63.5));
        assert_eq!(ranks[1].score, dec!(13));
    }
}
