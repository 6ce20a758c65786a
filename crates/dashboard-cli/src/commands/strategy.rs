//! 전략 명령어.

use super::{print_json, read_json, Session};
use anyhow::{bail, Result};
use dashboard_core::{
    compute_signal_display_metrics, merge_parameters, validate_strategy_parameters, Parameters,
    SignalQuery, StrategyId, StrategyRunDraft,
};
use std::path::Path;

pub async fn list(session: &Session) -> Result<()> {
    print_json(&session.strategies.list().await?)
}

pub async fn templates(session: &Session) -> Result<()> {
    print_json(&session.strategies.list_templates().await?)
}

pub async fn run(session: &Session, file: &Path) -> Result<()> {
    let draft: StrategyRunDraft = read_json(file)?;
    print_json(&session.strategies.run(&draft).await?)
}

pub async fn signals(
    session: &Session,
    strategy_id: &str,
    symbols: &[String],
    lookback_days: Option<u32>,
) -> Result<()> {
    let strategy_id = StrategyId::parse(strategy_id);
    let query = SignalQuery::new(symbols, lookback_days)?;
    let signals = session.strategies.signals(&strategy_id, &query).await?;

    for signal in &signals {
        println!(
            "{:<8} {:<5} strength={:.2} price={} qty={}",
            signal.symbol, signal.signal_type, signal.strength, signal.price, signal.quantity
        );
    }

    let metrics = compute_signal_display_metrics(&signals);
    println!();
    print_json(&metrics)
}

/// 로컬 사전 검증 결과를 출력하고, 통과하면 서비스 검증을 요청합니다.
pub async fn validate(
    session: &Session,
    strategy_id: &str,
    file: Option<&Path>,
    local_only: bool,
) -> Result<()> {
    let strategy_id = StrategyId::parse(strategy_id);
    let parameters: Parameters = match file {
        Some(path) => read_json(path)?,
        None => Parameters::new(),
    };

    let merged = merge_parameters(&strategy_id, &parameters);
    let report = validate_strategy_parameters(&strategy_id, &merged);
    if !report.is_valid {
        for message in report.messages() {
            eprintln!("  - {}", message);
        }
        bail!("{} parameter rule(s) violated", report.errors.len());
    }
    println!("Local validation passed for {}", strategy_id);
    if !strategy_id.is_builtin() {
        println!(
            "{} is a custom strategy, its parameters are only checked by the service",
            strategy_id
        );
    }

    if local_only {
        return Ok(());
    }
    print_json(&session.strategies.validate(&strategy_id, &parameters).await?)
}
