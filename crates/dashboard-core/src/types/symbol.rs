//! 티커 심볼 타입.

use crate::error::ValidationError;
use crate::sanitize::is_valid_symbol;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 검증된 대문자 티커 심볼.
///
/// `parse`를 통해서만 생성되므로 항상 대문자이며 형식이 유효합니다.
/// 예: `AAPL`, `BRK.B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SymbolToken(String);

impl SymbolToken {
    /// 공백 제거 및 대문자 변환 후 검증합니다.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_uppercase();
        if is_valid_symbol(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::InvalidSymbol(normalized))
        }
    }

    /// 기본 벤치마크 심볼 (SPY).
    pub fn spy() -> Self {
        Self("SPY".to_string())
    }

    /// 문자열 슬라이스로 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SymbolToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SymbolToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SymbolToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// 심볼 목록을 검증합니다. 첫 번째 무효 심볼에서 중단합니다.
///
/// 빈 목록은 `EmptyUniverse`로 거부됩니다.
pub fn parse_universe<I, S>(symbols: I) -> Result<Vec<SymbolToken>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let universe = symbols
        .into_iter()
        .map(|s| SymbolToken::parse(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if universe.is_empty() {
        return Err(ValidationError::EmptyUniverse);
    }
    Ok(universe)
}
