//! 전략/백테스트 API facade.
//!
//! 각 메서드는 로컬 검증을 먼저 수행하고, 통과한 경우에만 게이트웨이를 한 번 호출합니다.

mod backtest;
mod strategy;

pub use backtest::*;
pub use strategy::*;

use crate::error::RemoteError;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 경로 세그먼트에서 인코딩할 문자.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 세그먼트를 퍼센트 인코딩하여 `/a/b/c` 형태의 경로를 만듭니다.
pub(crate) fn resource_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| format!("/{}", utf8_percent_encode(segment, SEGMENT)))
        .collect()
}

/// 배열 자체 또는 `keys` 중 첫 번째로 존재하는 키의 값을 찾습니다.
pub(crate) fn find_list<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    match value {
        Value::Array(_) => Some(value),
        Value::Object(map) => keys.iter().find_map(|key| map.get(*key)),
        _ => None,
    }
}

/// JSON 응답을 타입으로 변환합니다.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RemoteError> {
    Ok(serde_json::from_value(value)?)
}

/// 목록 응답을 변환합니다.
///
/// 서비스는 배열을 그대로 반환하거나 `{ "<key>": [...] }` 형태로 감싸서 반환합니다.
pub(crate) fn decode_list<T: DeserializeOwned>(
    value: Value,
    keys: &[&str],
) -> Result<Vec<T>, RemoteError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => decode(value),
        Value::Object(mut map) => {
            match keys.iter().find_map(|key| map.remove(*key)) {
                Some(items) => decode(items),
                None => Err(RemoteError::Decode(format!(
                    "expected a list under one of {:?}",
                    keys
                ))),
            }
        }
        other => Err(RemoteError::Decode(format!(
            "expected a list, got {}",
            other
        ))),
    }
}
