//! 요청 검증 에러 타입.
//!
//! 네트워크 호출 전에 로컬에서 발생하는 검증 실패를 정의합니다.
//! 각 variant의 `Display` 출력은 화면에 그대로 표시할 수 있는 메시지입니다.

use thiserror::Error;

/// 요청 검증 에러.
///
/// 검증 규칙마다 하나의 variant가 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 필수 필드 누락
    #[error("{}", missing_field_message(.0))]
    MissingField(String),

    /// 유효하지 않은 날짜 (필드명)
    #[error("{}", invalid_date_message(.0))]
    InvalidDate(String),

    /// 시작일이 종료일보다 늦거나 같음
    #[error("Start date must be before end date")]
    DateOrder,

    /// 종료일이 미래
    #[error("End date cannot be in the future")]
    FutureEndDate,

    /// 초기 자본금이 0 이하이거나 숫자가 아님
    #[error("Initial capital must be positive")]
    NonPositiveCapital,

    /// 유니버스가 비어 있음
    #[error("Universe must contain at least one symbol")]
    EmptyUniverse,

    /// 유효하지 않은 심볼
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// 비율 필드가 허용 범위를 벗어남
    #[error("{field} must be between {min} and {max}")]
    RateOutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// 포트폴리오 ID를 정수로 변환할 수 없음
    #[error("Invalid portfolio ID: {0}")]
    InvalidPortfolioId(String),

    /// 전략 파라미터 규칙 위반
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// 비교 대상 백테스트 부족
    #[error("At least 2 backtests are required for comparison (got {0})")]
    TooFewBacktests(usize),
}

fn missing_field_message(field: &str) -> String {
    match field {
        "name" => "Backtest name is required".to_string(),
        "strategy_id" => "Strategy ID is required".to_string(),
        other => format!("{} is required", other),
    }
}

fn invalid_date_message(field: &str) -> String {
    match field {
        "start_date" => "Invalid start date".to_string(),
        "end_date" => "Invalid end date".to_string(),
        other => format!("Invalid date: {}", other),
    }
}

impl ValidationError {
    /// 안정적인 기계 판독용 에러 코드를 반환합니다.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "MISSING_FIELD",
            ValidationError::InvalidDate(_) => "INVALID_DATE",
            ValidationError::DateOrder => "DATE_ORDER",
            ValidationError::FutureEndDate => "FUTURE_END_DATE",
            ValidationError::NonPositiveCapital => "NON_POSITIVE_CAPITAL",
            ValidationError::EmptyUniverse => "EMPTY_UNIVERSE",
            ValidationError::InvalidSymbol(_) => "INVALID_SYMBOL",
            ValidationError::RateOutOfRange { .. } => "RATE_OUT_OF_RANGE",
            ValidationError::InvalidPortfolioId(_) => "INVALID_PORTFOLIO_ID",
            ValidationError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ValidationError::TooFewBacktests(_) => "TOO_FEW_BACKTESTS",
        }
    }

    /// 에러가 특정 필드에 묶여 있으면 그 필드명을 반환합니다.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field) | ValidationError::InvalidDate(field) => {
                Some(field.as_str())
            }
            ValidationError::DateOrder => Some("start_date"),
            ValidationError::FutureEndDate => Some("end_date"),
            ValidationError::NonPositiveCapital => Some("initial_capital"),
            ValidationError::EmptyUniverse | ValidationError::InvalidSymbol(_) => Some("universe"),
            ValidationError::RateOutOfRange { field, .. } => Some(field.as_str()),
            ValidationError::InvalidPortfolioId(_) => Some("portfolio_id"),
            ValidationError::InvalidParameter { name, .. } => Some(name.as_str()),
            ValidationError::TooFewBacktests(_) => Some("backtest_ids"),
        }
    }
}

/// 검증 작업을 위한 Result 타입.
pub type ValidationResult<T> = Result<T, ValidationError>;
