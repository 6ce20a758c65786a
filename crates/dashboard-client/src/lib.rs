//! # Dashboard Client
//!
//! 원격 트레이딩 서비스와 통신하는 계층입니다.
//!
//! - `Gateway`: 요청 하나를 보내고 JSON 응답을 돌려주는 계약
//! - `HttpGateway`: reqwest 기반 구현 (Bearer 토큰, 타임아웃)
//! - `BacktestApi` / `StrategyApi`: 로컬 검증 후 게이트웨이를 호출하는 facade
//!
//! # 예제
//!
//! ```no_run
//! use dashboard_client::{BacktestApi, HttpGateway};
//! use dashboard_core::{BacktestListQuery, GatewayConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpGateway::new(&GatewayConfig::default())?;
//! let backtests = BacktestApi::new(Arc::new(gateway));
//! let recent = backtests
//!     .list(&BacktestListQuery {
//!         limit: Some(10),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} backtests", recent.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod gateway;

#[cfg(test)]
mod mock;

pub use api::*;
pub use error::*;
pub use gateway::*;
