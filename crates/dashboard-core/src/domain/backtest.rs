//! 백테스트 요청 빌더.
//!
//! 폼 입력(`BacktestDraft`)을 정제하고 고정된 순서로 검증하여
//! `POST /backtests` 본문(`BacktestConfig`)을 만듭니다.
//! 첫 번째 실패에서 중단하므로 같은 입력은 항상 같은 에러를 냅니다.

use crate::domain::strategy::{merge_parameters, Parameters, StrategyId};
use crate::error::ValidationError;
use crate::sanitize::{normalize_universe, parse_date, sanitize_optional};
use crate::types::{decimal_or_default, NumericInput, ResourceId, SymbolToken};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 기본 수수료율 (0.1%).
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);
/// 기본 슬리피지율 (0.05%).
pub const DEFAULT_SLIPPAGE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 4);
/// 수수료율 상한 (10%).
pub const MAX_COMMISSION_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);
/// 슬리피지율 상한 (5%).
pub const MAX_SLIPPAGE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

// ==================== 요청 ====================

/// 사용자가 입력한 백테스트 요청 (검증 전).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BacktestDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub initial_capital: Option<NumericInput>,
    #[serde(default)]
    pub universe: Vec<String>,
    #[serde(default)]
    pub strategy_parameters: Parameters,
    #[serde(default)]
    pub commission_rate: Option<NumericInput>,
    #[serde(default)]
    pub slippage_rate: Option<NumericInput>,
    #[serde(default)]
    pub benchmark_symbol: Option<String>,
}

/// 검증된 백테스트 요청 (`POST /backtests` 본문).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub strategy_id: StrategyId,
    #[serde(with = "date_format")]
    pub start_date: NaiveDate,
    #[serde(with = "date_format")]
    pub end_date: NaiveDate,
    pub initial_capital: Decimal,
    pub universe: Vec<SymbolToken>,
    pub strategy_parameters: Parameters,
    pub commission_rate: Decimal,
    pub slippage_rate: Decimal,
    pub benchmark_symbol: SymbolToken,
}

mod date_format {
    use crate::sanitize::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }
}

/// 오늘(UTC) 기준으로 백테스트 요청을 만듭니다.
pub fn build_backtest_request(draft: &BacktestDraft) -> Result<BacktestConfig, ValidationError> {
    build_backtest_request_at(draft, Utc::now().date_naive())
}

/// 기준일 `today`를 지정하여 백테스트 요청을 만듭니다.
///
/// 검증 순서 (첫 실패에서 중단):
/// 이름 → 전략 ID → 시작일 형식 → 종료일 형식 → 시작일 < 종료일 → 종료일 ≤ 오늘
/// → 초기 자본금 > 0 → 유니버스 비어 있지 않음 → 유니버스 심볼 → 벤치마크 심볼
/// → 수수료율 범위 → 슬리피지율 범위
pub fn build_backtest_request_at(
    draft: &BacktestDraft,
    today: NaiveDate,
) -> Result<BacktestConfig, ValidationError> {
    let name = sanitize_optional(draft.name.as_deref())
        .ok_or_else(|| ValidationError::MissingField("name".to_string()))?;

    let strategy_id = sanitize_optional(draft.strategy_id.as_deref())
        .map(|id| StrategyId::parse(&id))
        .ok_or_else(|| ValidationError::MissingField("strategy_id".to_string()))?;

    let start_date = required_date(draft.start_date.as_deref(), "start_date")?;
    let end_date = required_date(draft.end_date.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(ValidationError::DateOrder);
    }
    if end_date > today {
        return Err(ValidationError::FutureEndDate);
    }

    let initial_capital = draft
        .initial_capital
        .as_ref()
        .and_then(NumericInput::to_decimal)
        .filter(|capital| *capital > Decimal::ZERO)
        .ok_or(ValidationError::NonPositiveCapital)?;

    let symbols = normalize_universe(&draft.universe);
    if symbols.is_empty() {
        return Err(ValidationError::EmptyUniverse);
    }
    let universe = symbols
        .iter()
        .map(|s| SymbolToken::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let benchmark_symbol = match sanitize_optional(draft.benchmark_symbol.as_deref()) {
        Some(symbol) => SymbolToken::parse(&symbol)?,
        None => SymbolToken::spy(),
    };

    let commission_rate = bounded_rate(
        draft.commission_rate.as_ref(),
        "commission_rate",
        DEFAULT_COMMISSION_RATE,
        MAX_COMMISSION_RATE,
    )?;
    let slippage_rate = bounded_rate(
        draft.slippage_rate.as_ref(),
        "slippage_rate",
        DEFAULT_SLIPPAGE_RATE,
        MAX_SLIPPAGE_RATE,
    )?;

    Ok(BacktestConfig {
        name,
        description: sanitize_optional(draft.description.as_deref()),
        strategy_parameters: merge_parameters(&strategy_id, &draft.strategy_parameters),
        strategy_id,
        start_date,
        end_date,
        initial_capital,
        universe,
        commission_rate,
        slippage_rate,
        benchmark_symbol,
    })
}

fn required_date(input: Option<&str>, field: &str) -> Result<NaiveDate, ValidationError> {
    input
        .map(str::trim)
        .and_then(parse_date)
        .ok_or_else(|| ValidationError::InvalidDate(field.to_string()))
}

fn bounded_rate(
    input: Option<&NumericInput>,
    field: &str,
    default: Decimal,
    max: Decimal,
) -> Result<Decimal, ValidationError> {
    decimal_or_default(input, default)
        .filter(|rate| *rate >= Decimal::ZERO && *rate <= max)
        .ok_or_else(|| ValidationError::RateOutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO.to_string(),
            max: max.to_string(),
        })
}

// ==================== 목록 조회 / 비교 ====================

/// `GET /backtests` 필터. 값이 없는 항목은 쿼리에서 생략됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BacktestListQuery {
    pub status: Option<BacktestStatus>,
    pub strategy_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl BacktestListQuery {
    /// 쿼리 파라미터 쌍.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        if let Some(strategy_id) = sanitize_optional(self.strategy_id.as_deref()) {
            query.push(("strategy_id".to_string(), strategy_id));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query
    }
}

/// `POST /backtests/compare` 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareRequest {
    pub backtest_ids: Vec<ResourceId>,
}

impl CompareRequest {
    /// 비교 요청을 만듭니다. 최소 2개의 ID가 필요합니다.
    pub fn new(backtest_ids: Vec<ResourceId>) -> Result<Self, ValidationError> {
        if backtest_ids.len() < 2 {
            return Err(ValidationError::TooFewBacktests(backtest_ids.len()));
        }
        Ok(Self { backtest_ids })
    }
}

// ==================== 결과 ====================

/// 서비스가 보고하는 백테스트 상태.
///
/// 전이는 서비스가 수행합니다: `pending → running → {completed, failed}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BacktestStatus {
    Pending,
    Running,
    Completed,
    Failed,
    /// 알 수 없는 상태 문자열
    Other(String),
}

impl BacktestStatus {
    /// 더 이상 전이되지 않는 상태인지 확인합니다.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BacktestStatus::Completed | BacktestStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            BacktestStatus::Pending => "pending",
            BacktestStatus::Running => "running",
            BacktestStatus::Completed => "completed",
            BacktestStatus::Failed => "failed",
            BacktestStatus::Other(s) => s,
        }
    }
}

impl From<String> for BacktestStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => BacktestStatus::Pending,
            "running" => BacktestStatus::Running,
            "completed" => BacktestStatus::Completed,
            "failed" => BacktestStatus::Failed,
            _ => BacktestStatus::Other(value),
        }
    }
}

impl From<&str> for BacktestStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<BacktestStatus> for String {
    fn from(value: BacktestStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BacktestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 서비스가 반환한 백테스트 결과.
///
/// 표시 계산에 쓰는 필드만 타입을 지정하고 나머지는 `extra`에 보존합니다.
/// 수익률/낙폭은 퍼센트 단위입니다 (10 = 10%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BacktestStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_return: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annualized_return: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<Decimal>,
    /// 실행 시간 (초)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /backtests/{id}/status` 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestProgress {
    pub status: BacktestStatus,
    /// 진행률 (0 ~ 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
