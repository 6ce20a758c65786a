//! 전략 신호 집계.
//!
//! 서비스가 반환한 매매 신호 목록에서 화면 표시용 요약 값을 계산합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 신호 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    /// 매수
    #[serde(alias = "buy")]
    Buy,
    /// 매도
    #[serde(alias = "sell")]
    Sell,
    /// 관망
    #[serde(alias = "hold")]
    Hold,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
            SignalKind::Hold => write!(f, "HOLD"),
        }
    }
}

/// 전략이 생성한 매매 신호 (서비스 응답).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    /// 대상 심볼
    #[serde(default)]
    pub symbol: String,
    /// 신호 방향
    pub signal_type: SignalKind,
    /// 신호 강도 (0.0 ~ 1.0)
    pub strength: f64,
    /// 신호 가격
    pub price: Decimal,
    /// 제안 수량
    pub quantity: Decimal,
    /// 생성 시각 (서비스 형식 그대로)
    #[serde(default)]
    pub timestamp: Option<String>,
    /// 그 외 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TradeSignal {
    /// 신호 금액 (수량 × 가격). 범위를 넘으면 포화됩니다.
    pub fn notional(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }
}

/// 신호 목록 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDisplayMetrics {
    /// 전체 신호 수
    pub total_signals: usize,
    /// 매수 신호 수
    pub buy_signals: usize,
    /// 매도 신호 수
    pub sell_signals: usize,
    /// 관망 신호 수
    pub hold_signals: usize,
    /// 평균 신호 강도 (신호가 없으면 0)
    pub average_strength: f64,
    /// 매수 신호 금액 합계
    pub potential_investment: Decimal,
}

/// 신호 목록을 요약합니다. 입력 순서와 무관합니다.
pub fn compute_signal_display_metrics(signals: &[TradeSignal]) -> SignalDisplayMetrics {
    let mut buy_signals = 0;
    let mut sell_signals = 0;
    let mut hold_signals = 0;
    let mut strength_sum = 0.0;
    let mut potential_investment = Decimal::ZERO;

    for signal in signals {
        match signal.signal_type {
            SignalKind::Buy => {
                buy_signals += 1;
                potential_investment = potential_investment.saturating_add(signal.notional());
            }
            SignalKind::Sell => sell_signals += 1,
            SignalKind::Hold => hold_signals += 1,
        }
        strength_sum += signal.strength;
    }

    let average_strength = if signals.is_empty() {
        0.0
    } else {
        strength_sum / signals.len() as f64
    };

    SignalDisplayMetrics {
        total_signals: signals.len(),
        buy_signals,
        sell_signals,
        hold_signals,
        average_strength,
        potential_investment,
    }
}
