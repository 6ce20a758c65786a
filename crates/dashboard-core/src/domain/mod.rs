//! 도메인 계층: 전략/백테스트 요청 생성과 결과 파생 값.

pub mod backtest;
pub mod display;
pub mod signal;
pub mod strategy;

pub use backtest::*;
pub use display::*;
pub use signal::*;
pub use strategy::*;
