//! 전략 설정 빌더.
//!
//! - `StrategyId` - 내장 전략 + 사용자 정의 전략 식별자
//! - `StrategyDefaults` - 전략별 기본 파라미터 레코드
//! - `build_strategy_config` - 기본값 병합 및 유니버스 정규화
//! - `validate_run_request` - 실행 요청 검증 (첫 에러에서 중단)
//! - `validate_strategy_parameters` - 파라미터 사전 검증 (모든 에러 수집)

use crate::error::ValidationError;
use crate::sanitize::{normalize_symbols, normalize_universe, sanitize_optional, sanitize_text};
use crate::types::{parse_universe, SymbolToken};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 파라미터 맵 타입.
pub type Parameters = Map<String, Value>;

// ==================== 전략 식별자 ====================

/// 전략 식별자.
///
/// 내장 전략은 고유 variant를 가지며, 그 외 문자열은 `Custom`으로 보존됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StrategyId {
    /// 이동평균 크로스오버
    MovingAverage,
    /// 모멘텀
    Momentum,
    /// 매수 후 보유
    BuyHold,
    /// 사용자 정의 전략
    Custom(String),
}

impl StrategyId {
    /// 문자열에서 식별자를 만듭니다.
    ///
    /// 내장 식별자와 정확히 일치할 때만 내장 전략이 되며, 그 외 값은 그대로 `Custom`이 됩니다.
    pub fn parse(input: &str) -> Self {
        match input {
            "moving_average" => StrategyId::MovingAverage,
            "momentum" => StrategyId::Momentum,
            "buy_hold" => StrategyId::BuyHold,
            _ => StrategyId::Custom(input.to_string()),
        }
    }

    /// 서비스에 전달되는 식별자 문자열.
    pub fn as_str(&self) -> &str {
        match self {
            StrategyId::MovingAverage => "moving_average",
            StrategyId::Momentum => "momentum",
            StrategyId::BuyHold => "buy_hold",
            StrategyId::Custom(id) => id,
        }
    }

    /// 내장 전략 여부.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, StrategyId::Custom(_))
    }

    /// 전략별 기본 파라미터 레코드.
    pub fn defaults(&self) -> StrategyDefaults {
        match self {
            StrategyId::MovingAverage => {
                StrategyDefaults::MovingAverage(MovingAverageParams::default())
            }
            StrategyId::Momentum => StrategyDefaults::Momentum(MomentumParams::default()),
            StrategyId::BuyHold => StrategyDefaults::BuyHold(BuyHoldParams::default()),
            StrategyId::Custom(_) => StrategyDefaults::Empty,
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StrategyId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for StrategyId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StrategyId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// ==================== 기본 파라미터 ====================

/// 이동평균 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaType {
    /// 단순 이동평균
    Sma,
    /// 지수 이동평균
    Ema,
}

/// 이동평균 크로스오버 기본 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageParams {
    /// 단기 이동평균 기간
    pub fast_period: u32,
    /// 장기 이동평균 기간
    pub slow_period: u32,
    /// 이동평균 종류
    pub ma_type: MaType,
}

impl Default for MovingAverageParams {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
            ma_type: MaType::Sma,
        }
    }
}

/// 모멘텀 기본 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumParams {
    /// 수익률 계산 기간
    pub lookback_period: u32,
    /// 진입 임계 수익률 (0.02 = 2%)
    pub threshold: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            lookback_period: 14,
            threshold: 0.02,
        }
    }
}

/// 매수 후 보유 기본 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyHoldParams {
    /// 주기적 리밸런싱 여부
    pub rebalance: bool,
    /// 배분 방식
    pub allocation: String,
}

impl Default for BuyHoldParams {
    fn default() -> Self {
        Self {
            rebalance: false,
            allocation: "equal".to_string(),
        }
    }
}

/// 전략별 기본 파라미터.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyDefaults {
    MovingAverage(MovingAverageParams),
    Momentum(MomentumParams),
    BuyHold(BuyHoldParams),
    /// 사용자 정의 전략은 기본값 없음
    Empty,
}

impl StrategyDefaults {
    /// 파라미터 맵으로 변환합니다.
    pub fn to_parameters(&self) -> Parameters {
        let value = match self {
            StrategyDefaults::MovingAverage(p) => serde_json::to_value(p),
            StrategyDefaults::Momentum(p) => serde_json::to_value(p),
            StrategyDefaults::BuyHold(p) => serde_json::to_value(p),
            StrategyDefaults::Empty => return Parameters::new(),
        };

        match value {
            Ok(Value::Object(map)) => map,
            _ => Parameters::new(),
        }
    }
}

/// 기본값 위에 사용자 파라미터를 덮어씁니다. 같은 키는 사용자 값이 우선합니다.
pub fn merge_parameters(strategy_id: &StrategyId, user: &Parameters) -> Parameters {
    let mut merged = strategy_id.defaults().to_parameters();
    for (key, value) in user {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

// ==================== 전략 설정 ====================

/// 전략 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// 전략 식별자
    pub strategy_id: StrategyId,
    /// 기본값이 병합된 파라미터
    pub parameters: Parameters,
    /// 대문자로 정규화된 유니버스
    pub universe: Vec<String>,
}

/// 기본값을 병합하고 유니버스를 대문자로 정규화한 전략 설정을 만듭니다.
///
/// 심볼 형식은 검사하지 않습니다. 검증은 `validate_run_request`에서 수행합니다.
pub fn build_strategy_config<I, S>(
    strategy_id: impl Into<StrategyId>,
    user_parameters: &Parameters,
    universe: I,
) -> StrategyConfig
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let strategy_id = strategy_id.into();
    StrategyConfig {
        parameters: merge_parameters(&strategy_id, user_parameters),
        universe: normalize_universe(universe),
        strategy_id,
    }
}

// ==================== 실행 요청 ====================

/// 포트폴리오 ID 입력 (정수 또는 숫자 문자열).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortfolioRef {
    Id(i64),
    Text(String),
}

impl PortfolioRef {
    fn coerce(&self) -> Result<i64, ValidationError> {
        match self {
            PortfolioRef::Id(id) => Ok(*id),
            PortfolioRef::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidPortfolioId(text.clone())),
        }
    }
}

/// 사용자가 입력한 전략 실행 요청 (검증 전).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyRunDraft {
    /// 전략 식별자
    #[serde(default)]
    pub strategy_id: Option<String>,
    /// 유니버스
    #[serde(default)]
    pub universe: Vec<String>,
    /// 사용자 파라미터
    #[serde(default)]
    pub parameters: Parameters,
    /// 대상 포트폴리오 (선택)
    #[serde(default)]
    pub portfolio_id: Option<PortfolioRef>,
}

/// 검증된 전략 실행 요청 (`POST /strategies/run` 본문).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRunRequest {
    pub strategy_id: StrategyId,
    pub universe: Vec<SymbolToken>,
    pub parameters: Parameters,
    /// 없으면 본문에서 생략됩니다 (`null`과 포트폴리오 0을 구분).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<i64>,
}

/// 실행 요청을 검증하고 기본 파라미터를 병합합니다.
///
/// 검증 순서: 전략 ID → 유니버스 비어 있음 → 심볼 형식 (첫 번째 무효 심볼) → 포트폴리오 ID.
pub fn validate_run_request(
    draft: &StrategyRunDraft,
) -> Result<StrategyRunRequest, ValidationError> {
    let strategy_id = draft
        .strategy_id
        .as_deref()
        .map(sanitize_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::MissingField("strategy_id".to_string()))?;

    let config = build_strategy_config(strategy_id.as_str(), &draft.parameters, &draft.universe);
    let universe = parse_universe(&config.universe)?;

    let portfolio_id = draft
        .portfolio_id
        .as_ref()
        .map(PortfolioRef::coerce)
        .transpose()?;

    Ok(StrategyRunRequest {
        strategy_id: config.strategy_id,
        universe,
        parameters: config.parameters,
        portfolio_id,
    })
}

// ==================== 신호 조회 ====================

/// 기본 신호 조회 기간 (일).
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// `GET /strategies/{id}/signals` 쿼리.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalQuery {
    /// 대상 심볼
    pub symbols: Vec<SymbolToken>,
    /// 조회 기간 (일)
    pub lookback_days: u32,
}

impl SignalQuery {
    /// 심볼을 검증하여 쿼리를 만듭니다.
    pub fn new<I, S>(symbols: I, lookback_days: Option<u32>) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            symbols: parse_universe(normalize_symbols(symbols))?,
            lookback_days: lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS),
        })
    }

    /// 쿼리 파라미터 쌍. `symbols`는 쉼표로 연결됩니다.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let symbols = self
            .symbols
            .iter()
            .map(SymbolToken::as_str)
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("symbols".to_string(), symbols),
            ("lookback_days".to_string(), self.lookback_days.to_string()),
        ]
    }
}

// ==================== 파라미터 사전 검증 ====================

/// 파라미터 사전 검증 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// 모든 규칙 통과 여부
    pub is_valid: bool,
    /// 위반된 규칙 목록
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// 표시용 메시지 목록.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// 첫 번째 에러를 반환하여 `Result`로 변환합니다.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn invalid(name: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn positive_integer(
    parameters: &Parameters,
    name: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<u64> {
    match parameters.get(name) {
        None => {
            errors.push(invalid(name, "is required"));
            None
        }
        Some(value) => match value.as_u64() {
            Some(n) if n > 0 => Some(n),
            _ => {
                errors.push(invalid(name, "must be a positive integer"));
                None
            }
        },
    }
}

/// 전략 파라미터를 검사하고 모든 위반 사항을 수집합니다.
///
/// 보통 `merge_parameters` 결과를 넘기며, 사용자 정의 전략은 로컬에서 항상 통과합니다.
pub fn validate_strategy_parameters(
    strategy_id: &StrategyId,
    parameters: &Parameters,
) -> ValidationReport {
    let mut errors = Vec::new();

    match strategy_id {
        StrategyId::MovingAverage => {
            let fast = positive_integer(parameters, "fast_period", &mut errors);
            let slow = positive_integer(parameters, "slow_period", &mut errors);
            if let (Some(fast), Some(slow)) = (fast, slow) {
                if fast >= slow {
                    errors.push(invalid("fast_period", "must be less than slow_period"));
                }
            }
            if let Some(ma_type) = parameters.get("ma_type") {
                if serde_json::from_value::<MaType>(ma_type.clone()).is_err() {
                    errors.push(invalid("ma_type", "must be one of: sma, ema"));
                }
            }
        }
        StrategyId::Momentum => {
            positive_integer(parameters, "lookback_period", &mut errors);
            match parameters.get("threshold").map(Value::as_f64) {
                None => errors.push(invalid("threshold", "is required")),
                Some(Some(t)) if t >= 0.0 => {}
                Some(_) => errors.push(invalid("threshold", "must be a non-negative number")),
            }
        }
        StrategyId::BuyHold => {
            if let Some(rebalance) = parameters.get("rebalance") {
                if !rebalance.is_boolean() {
                    errors.push(invalid("rebalance", "must be a boolean"));
                }
            }
        }
        StrategyId::Custom(_) => {}
    }

    ValidationReport::from_errors(errors)
}

// ==================== 사용자 전략 ====================

/// 사용자 전략 저장 입력 (검증 전).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserStrategyDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub universe: Vec<String>,
}

/// `POST/PUT /strategies/user` 본문.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStrategyPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub strategy_id: StrategyId,
    pub parameters: Parameters,
    pub universe: Vec<SymbolToken>,
}

/// 사용자 전략 저장 요청을 만듭니다.
///
/// 이름과 전략 ID가 필요하며, 유니버스는 비어 있어도 됩니다.
/// 병합된 파라미터가 사전 검증을 통과하지 못하면 첫 번째 위반을 반환합니다.
pub fn build_user_strategy(
    draft: &UserStrategyDraft,
) -> Result<UserStrategyPayload, ValidationError> {
    let name = sanitize_optional(draft.name.as_deref())
        .ok_or_else(|| ValidationError::MissingField("strategy_name".to_string()))?;
    let strategy_id = sanitize_optional(draft.strategy_id.as_deref())
        .ok_or_else(|| ValidationError::MissingField("strategy_id".to_string()))?;

    let config = build_strategy_config(strategy_id.as_str(), &draft.parameters, &draft.universe);
    let universe = config
        .universe
        .iter()
        .map(|s| SymbolToken::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    validate_strategy_parameters(&config.strategy_id, &config.parameters).into_result()?;

    Ok(UserStrategyPayload {
        name,
        description: sanitize_optional(draft.description.as_deref()),
        strategy_id: config.strategy_id,
        parameters: config.parameters,
        universe,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_build_strategy_config_merges_defaults() {
        let config = build_strategy_config(
            "moving_average",
            &params(json!({ "fast_period": 5 })),
            ["aapl"],
        );

        assert_eq!(config.universe, vec!["AAPL"]);
        assert_eq!(config.strategy_id, StrategyId::MovingAverage);
        assert_eq!(config.parameters["fast_period"], json!(5));
        assert_eq!(config.parameters["slow_period"], json!(50));
        assert_eq!(config.parameters["ma_type"], json!("sma"));
    }

    #[test]
    fn test_custom_strategy_gets_no_defaults() {
        let config = build_strategy_config(
            "my_pairs_trade",
            &params(json!({ "z_entry": 2.0 })),
            ["KO", "pep"],
        );

        assert_eq!(
            config.strategy_id,
            StrategyId::Custom("my_pairs_trade".to_string())
        );
        assert_eq!(config.parameters.len(), 1);
        assert_eq!(config.universe, vec!["KO", "PEP"]);
    }

    #[test]
    fn test_near_builtin_ids_stay_custom() {
        let config = build_strategy_config("ma_crossover", &Parameters::new(), ["aapl"]);
        assert_eq!(
            config.strategy_id,
            StrategyId::Custom("ma_crossover".to_string())
        );
        assert!(config.parameters.is_empty());

        let id = StrategyId::parse("MOMENTUM");
        assert_eq!(id, StrategyId::Custom("MOMENTUM".to_string()));
        assert_eq!(id.as_str(), "MOMENTUM");
        assert_eq!(StrategyId::parse(" momentum"), StrategyId::Custom(" momentum".to_string()));
    }

    #[test]
    fn test_blank_universe_entries_are_rejected() {
        let config = build_strategy_config("momentum", &Parameters::new(), ["aapl", ""]);
        assert_eq!(config.universe, vec!["AAPL", ""]);

        let draft = StrategyRunDraft {
            strategy_id: Some("momentum".to_string()),
            universe: vec!["AAPL".to_string(), "".to_string()],
            ..Default::default()
        };
        assert_eq!(
            validate_run_request(&draft).unwrap_err(),
            ValidationError::InvalidSymbol(String::new())
        );
    }

    #[test]
    fn test_strategy_id_serialization() {
        assert_eq!(
            serde_json::to_string(&StrategyId::BuyHold).unwrap(),
            "\"buy_hold\""
        );
        let id: StrategyId = serde_json::from_str("\"momentum\"").unwrap();
        assert_eq!(id, StrategyId::Momentum);
        let id: StrategyId = serde_json::from_str("\"Momentum\"").unwrap();
        assert_eq!(id, StrategyId::Custom("Momentum".to_string()));
        let id: StrategyId = serde_json::from_str("\"mean_revert_v2\"").unwrap();
        assert_eq!(id.as_str(), "mean_revert_v2");
        assert!(!id.is_builtin());
    }

    #[test]
    fn test_momentum_and_buy_hold_defaults() {
        let momentum = StrategyId::Momentum.defaults().to_parameters();
        assert_eq!(momentum["lookback_period"], json!(14));
        assert_eq!(momentum["threshold"], json!(0.02));

        let buy_hold = StrategyId::BuyHold.defaults().to_parameters();
        assert_eq!(buy_hold["rebalance"], json!(false));
        assert_eq!(buy_hold["allocation"], json!("equal"));
    }

    #[test]
    fn test_validate_run_request_requires_strategy() {
        let draft = StrategyRunDraft {
            strategy_id: Some("   ".to_string()),
            universe: vec!["AAPL".to_string()],
            ..Default::default()
        };
        assert_eq!(
            validate_run_request(&draft).unwrap_err(),
            ValidationError::MissingField("strategy_id".to_string())
        );
    }

    #[test]
    fn test_validate_run_request_universe_rules() {
        let mut draft = StrategyRunDraft {
            strategy_id: Some("momentum".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_run_request(&draft).unwrap_err(),
            ValidationError::EmptyUniverse
        );

        draft.universe = vec!["aapl".to_string(), "b4d".to_string(), "x!".to_string()];
        assert_eq!(
            validate_run_request(&draft).unwrap_err(),
            ValidationError::InvalidSymbol("B4D".to_string())
        );
    }

    #[test]
    fn test_portfolio_id_is_omitted_or_coerced() {
        let draft: StrategyRunDraft = serde_json::from_value(json!({
            "strategy_id": "buy_hold",
            "universe": ["spy"],
        }))
        .unwrap();
        let request = validate_run_request(&draft).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("portfolio_id").is_none());
        assert_eq!(body["universe"], json!(["SPY"]));
        assert_eq!(body["parameters"]["allocation"], json!("equal"));

        let draft: StrategyRunDraft = serde_json::from_value(json!({
            "strategy_id": "buy_hold",
            "universe": ["spy"],
            "portfolio_id": "0",
        }))
        .unwrap();
        let body = serde_json::to_value(validate_run_request(&draft).unwrap()).unwrap();
        assert_eq!(body["portfolio_id"], json!(0));

        let draft: StrategyRunDraft = serde_json::from_value(json!({
            "strategy_id": "buy_hold",
            "universe": ["spy"],
            "portfolio_id": "main",
        }))
        .unwrap();
        assert_eq!(
            validate_run_request(&draft).unwrap_err(),
            ValidationError::InvalidPortfolioId("main".to_string())
        );
    }

    #[test]
    fn test_signal_query_joins_symbols() {
        let query = SignalQuery::new(["aapl", " msft"], None).unwrap();
        assert_eq!(
            query.to_query(),
            vec![
                ("symbols".to_string(), "AAPL,MSFT".to_string()),
                ("lookback_days".to_string(), "30".to_string()),
            ]
        );
        assert!(SignalQuery::new(Vec::<String>::new(), Some(5)).is_err());
    }

    #[test]
    fn test_parameter_validation_collects_all_errors() {
        let report = validate_strategy_parameters(
            &StrategyId::MovingAverage,
            &params(json!({ "fast_period": 0, "slow_period": "fifty", "ma_type": "wma" })),
        );

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(
            report.messages()[0],
            "Invalid parameter fast_period: must be a positive integer"
        );
    }

    #[test]
    fn test_parameter_validation_period_order() {
        let merged = merge_parameters(
            &StrategyId::MovingAverage,
            &params(json!({ "fast_period": 60 })),
        );
        let report = validate_strategy_parameters(&StrategyId::MovingAverage, &merged);
        assert_eq!(
            report.into_result().unwrap_err(),
            invalid("fast_period", "must be less than slow_period")
        );

        let defaults = merge_parameters(&StrategyId::MovingAverage, &Parameters::new());
        assert!(validate_strategy_parameters(&StrategyId::MovingAverage, &defaults).is_valid);
    }

    #[test]
    fn test_parameter_validation_momentum_and_custom() {
        let report = validate_strategy_parameters(
            &StrategyId::Momentum,
            &params(json!({ "lookback_period": 10, "threshold": -0.5 })),
        );
        assert_eq!(report.errors.len(), 1);

        let report = validate_strategy_parameters(
            &StrategyId::Custom("anything".to_string()),
            &params(json!({ "whatever": null })),
        );
        assert!(report.is_valid);
    }

    #[test]
    fn test_build_user_strategy() {
        let draft = UserStrategyDraft {
            name: Some(" Fast crossover ".to_string()),
            strategy_id: Some("moving_average".to_string()),
            parameters: params(json!({ "fast_period": 8, "slow_period": 21 })),
            universe: vec!["spy".to_string()],
            ..Default::default()
        };
        let payload = build_user_strategy(&draft).unwrap();
        assert_eq!(payload.name, "Fast crossover");
        assert_eq!(payload.strategy_id, StrategyId::MovingAverage);
        assert_eq!(payload.parameters["ma_type"], json!("sma"));
        assert_eq!(payload.universe[0].as_str(), "SPY");

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("description").is_none());
    }

    #[test]
    fn test_build_user_strategy_rejects_bad_parameters() {
        let draft = UserStrategyDraft {
            name: Some("Broken".to_string()),
            strategy_id: Some("moving_average".to_string()),
            parameters: params(json!({ "fast_period": 60 })),
            ..Default::default()
        };
        assert!(matches!(
            build_user_strategy(&draft),
            Err(ValidationError::InvalidParameter { .. })
        ));

        let unnamed = UserStrategyDraft {
            strategy_id: Some("momentum".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_user_strategy(&unnamed).unwrap_err(),
            ValidationError::MissingField("strategy_name".to_string())
        );
    }
}
