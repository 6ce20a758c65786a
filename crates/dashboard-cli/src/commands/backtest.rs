//! 백테스트 명령어.

use super::{print_json, read_json, Session};
use anyhow::Result;
use dashboard_core::{
    build_backtest_request, compute_performance_score, BacktestDraft, BacktestListQuery,
    DisplayResult, ResourceId,
};
use std::path::Path;
use tracing::info;

/// 로컬 검증만 수행하고 제출될 본문을 출력합니다.
pub fn check(file: &Path) -> Result<()> {
    let draft: BacktestDraft = read_json(file)?;
    let config = build_backtest_request(&draft)?;
    print_json(&config)
}

pub async fn submit(session: &Session, file: &Path) -> Result<()> {
    let draft: BacktestDraft = read_json(file)?;
    let result = session.backtests.create(&draft).await?;
    info!(backtest_id = ?result.id, "Backtest submitted");
    print_json(&result)
}

pub async fn list(
    session: &Session,
    status: Option<String>,
    strategy_id: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<()> {
    let query = BacktestListQuery {
        status: status.map(Into::into),
        strategy_id,
        limit,
        offset,
    };
    let results = session.backtests.list(&query).await?;

    println!("{:<12} {:<28} {:<12} {:>10} {:>8}", "ID", "NAME", "STATUS", "RETURN", "SCORE");
    for result in &results {
        let display = DisplayResult::from_result(result);
        println!(
            "{:<12} {:<28} {:<12} {:>10} {:>8}",
            result.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            result.name.as_deref().unwrap_or("-"),
            result
                .status
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            display.total_return_display,
            compute_performance_score(result).round_dp(1),
        );
    }
    println!("\n{} backtests", results.len());
    Ok(())
}

pub async fn show(session: &Session, id: &str) -> Result<()> {
    let display = session.backtests.get_display(&ResourceId::from(id)).await?;
    let score = compute_performance_score(&display.result);
    print_json(&display)?;
    println!("\nPerformance score: {}", score.round_dp(2));
    Ok(())
}

pub async fn status(session: &Session, id: &str) -> Result<()> {
    let progress = session.backtests.status(&ResourceId::from(id)).await?;
    match progress.progress {
        Some(pct) => println!("{} ({:.1}%)", progress.status, pct),
        None => println!("{}", progress.status),
    }
    if let Some(message) = &progress.message {
        println!("{}", message);
    }
    Ok(())
}

pub async fn delete(session: &Session, id: &str) -> Result<()> {
    session.backtests.delete(&ResourceId::from(id)).await?;
    println!("Deleted backtest {}", id);
    Ok(())
}

pub async fn compare(session: &Session, ids: &[String]) -> Result<()> {
    let ids = ids.iter().map(|id| ResourceId::from(id.as_str())).collect();
    let comparison = session.backtests.compare(ids).await?;

    if comparison.ranking.is_empty() {
        return print_json(&comparison.raw);
    }

    println!("{:<6} {:<12} {:<28} {:>8}", "RANK", "ID", "NAME", "SCORE");
    for (rank, entry) in comparison.ranking.iter().enumerate() {
        println!(
            "{:<6} {:<12} {:<28} {:>8}",
            rank + 1,
            entry.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            entry.name.as_deref().unwrap_or("-"),
            entry.score.round_dp(2),
        );
    }
    Ok(())
}
