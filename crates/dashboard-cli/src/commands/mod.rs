//! CLI 명령어 구현 모듈.

pub mod backtest;
pub mod strategy;

use anyhow::{Context, Result};
use dashboard_client::{BacktestApi, HttpGateway, StrategyApi};
use dashboard_core::GatewayConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// 원격 API 묶음.
pub struct Session {
    pub backtests: BacktestApi,
    pub strategies: StrategyApi,
}

impl Session {
    pub fn connect(config: &GatewayConfig) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::new(config).context("Failed to create HTTP gateway")?);
        Ok(Self {
            backtests: BacktestApi::new(gateway.clone()),
            strategies: StrategyApi::new(gateway),
        })
    }
}

/// JSON 입력 파일을 읽습니다.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// 값을 보기 좋은 JSON으로 출력합니다.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
