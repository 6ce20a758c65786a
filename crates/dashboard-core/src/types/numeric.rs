//! 폼 입력 숫자 처리.
//!
//! 폼에서 넘어오는 금액/비율은 JSON 숫자이거나 숫자 문자열일 수 있습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 숫자 또는 숫자 문자열 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// JSON 숫자
    Number(serde_json::Number),
    /// 숫자 문자열 (예: "10000", " 0.001 ")
    Text(String),
}

impl NumericInput {
    /// Decimal로 변환합니다. 숫자가 아니면 `None`을 반환합니다.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NumericInput::Number(n) => parse_decimal(&n.to_string()),
            NumericInput::Text(s) => parse_decimal(s),
        }
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value.into())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// 문자열을 Decimal로 파싱합니다. 지수 표기(`1e5`)도 허용합니다.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// 선택 입력을 파싱합니다.
///
/// - 입력 없음 → `Some(default)`
/// - 파싱 실패 → `None`
pub fn decimal_or_default(input: Option<&NumericInput>, default: Decimal) -> Option<Decimal> {
    match input {
        None => Some(default),
        Some(value) => value.to_decimal(),
    }
}
