//! 입력 정제 및 검증.
//!
//! 전략/백테스트 빌더가 공유하는 순수 함수 모음입니다.
//! - `sanitize_text` / `sanitize_value` - 앞뒤 공백 제거
//! - `is_valid_symbol` - 티커 형식 검사 (대소문자 무관)
//! - `is_valid_date` - `YYYY-MM-DD` 달력 날짜 검사

use chrono::NaiveDate;
use serde_json::Value;

/// 날짜 입출력 형식.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 앞뒤 공백을 제거한 문자열을 반환합니다.
pub fn sanitize_text(input: &str) -> String {
    input.trim().to_string()
}

/// JSON 문자열 값은 공백을 제거하고 그 외 값은 그대로 반환합니다.
pub fn sanitize_value(input: &Value) -> Value {
    match input {
        Value::String(s) => Value::String(sanitize_text(s)),
        other => other.clone(),
    }
}

/// 선택 텍스트 필드를 정제합니다. 공백뿐인 값은 `None`이 됩니다.
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input.map(sanitize_text).filter(|s| !s.is_empty())
}

/// 티커 심볼 형식인지 확인합니다.
///
/// 영문자 1~5자, 선택적으로 `.` 뒤에 영문자 1~2자 (예: `AAPL`, `BRK.B`, `shop.to`).
/// 입력을 대문자로 바꾼 뒤 검사하므로 대소문자는 구분하지 않습니다.
pub fn is_valid_symbol(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }

    let upper = input.to_uppercase();
    let (root, suffix) = match upper.split_once('.') {
        Some((root, suffix)) => (root, Some(suffix)),
        None => (upper.as_str(), None),
    };

    let letters = |s: &str, max: usize| {
        (1..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_uppercase())
    };

    letters(root, 5) && suffix.map_or(true, |s| letters(s, 2))
}

/// `YYYY-MM-DD` 형식의 실제 달력 날짜인지 확인합니다.
///
/// 존재하지 않는 날짜(`2023-02-30`)와 비정규 형식(`2024-1-05`)은 거부합니다.
pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_some()
}

/// 유효한 달력 날짜이면 파싱된 값을 반환합니다.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if !has_date_shape(input) {
        return None;
    }

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).ok()?;
    // 파싱 후 다시 포맷했을 때 원문과 같아야 정규형으로 인정
    (date.format(DATE_FORMAT).to_string() == input).then_some(date)
}

fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// 유니버스 항목을 정규화합니다 (공백 제거, 대문자 변환).
///
/// 빈 항목도 그대로 남겨 이후 심볼 검증에서 거부되도록 합니다.
pub fn normalize_universe<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .collect()
}

/// 심볼 목록을 정규화하고 빈 항목을 제거합니다. 신호 조회용.
pub fn normalize_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    normalize_universe(symbols)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  My Backtest \n"), "My Backtest");
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_optional(Some("   ")), None);
        assert_eq!(sanitize_optional(Some(" desc ")), Some("desc".to_string()));
    }

    #[test]
    fn test_sanitize_value_passes_non_strings() {
        assert_eq!(sanitize_value(&json!("  x ")), json!("x"));
        assert_eq!(sanitize_value(&json!(42)), json!(42));
        assert_eq!(sanitize_value(&json!(null)), json!(null));
        assert_eq!(sanitize_value(&json!([" a "])), json!([" a "]));
    }

    #[test]
    fn test_valid_symbols() {
        for symbol in ["AAPL", "aapl", "F", "GOOGL", "BRK.B", "brk.b", "SHOP.TO"] {
            assert!(is_valid_symbol(symbol), "{} should be valid", symbol);
        }
    }

    #[test]
    fn test_invalid_symbols() {
        for symbol in [
            "", "TOOLONG", "AAPL1", "BRK.", ".B", "BRK.ABC", "A.B.C", "AA PL", "$SPY", "123",
        ] {
            assert!(!is_valid_symbol(symbol), "{} should be invalid", symbol);
        }
    }

    #[test]
    fn test_valid_dates() {
        assert!(is_valid_date("2024-02-29"));
        assert!(is_valid_date("2023-12-31"));
        assert_eq!(
            parse_date("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_invalid_dates() {
        for date in [
            "2023-02-30",
            "2023-02-29",
            "2024-13-01",
            "2024-00-10",
            "2024-1-05",
            "2024/01/05",
            "20240105",
            " 2024-01-05",
            "2024-01-05T00:00:00",
            "",
        ] {
            assert!(!is_valid_date(date), "{} should be invalid", date);
        }
    }

    #[test]
    fn test_normalize_symbols() {
        assert_eq!(
            normalize_symbols([" aapl", "msft ", "", "brk.b"]),
            vec!["AAPL", "MSFT", "BRK.B"]
        );
    }

    #[test]
    fn test_normalize_universe_keeps_blank_entries() {
        assert_eq!(
            normalize_universe([" aapl", "  ", ""]),
            vec!["AAPL", "", ""]
        );
    }

    proptest! {
        #[test]
        fn prop_valid_dates_round_trip(y in 1900i32..2100, m in 1u32..=12, d in 1u32..=31) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                let literal = date.format(DATE_FORMAT).to_string();
                prop_assert!(is_valid_date(&literal));
                prop_assert_eq!(parse_date(&literal).unwrap().format(DATE_FORMAT).to_string(), literal);
            } else {
                let literal = format!("{:04}-{:02}-{:02}", y, m, d);
                prop_assert!(!is_valid_date(&literal));
            }
        }

        #[test]
        fn prop_out_of_range_months_rejected(y in 1900i32..2100, m in 13u32..100, d in 1u32..=28) {
            let literal = format!("{:04}-{:02}-{:02}", y, m, d);
            prop_assert!(!is_valid_date(&literal));
        }

        #[test]
        fn prop_symbols_valid_in_any_case(root in "[a-zA-Z]{1,5}", suffix in proptest::option::of("[a-zA-Z]{1,2}")) {
            let symbol = match suffix {
                Some(s) => format!("{}.{}", root, s),
                None => root,
            };
            prop_assert!(is_valid_symbol(&symbol));
            prop_assert!(is_valid_symbol(&symbol.to_lowercase()));
            prop_assert!(is_valid_symbol(&symbol.to_uppercase()));
        }

        #[test]
        fn prop_symbols_with_non_letters_rejected(prefix in "[A-Z]{0,2}", bad in "[0-9$#@ _-]", rest in "[A-Z]{0,2}") {
            let symbol = format!("{}{}{}", prefix, bad, rest);
            prop_assert!(!is_valid_symbol(&symbol));
        }
    }
}
