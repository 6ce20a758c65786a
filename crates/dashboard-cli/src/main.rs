//! 트레이딩 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 백테스트 요청을 로컬에서만 검증
//! dashboard check-backtest -f drafts/golden_cross.json
//!
//! # 검증 후 제출
//! dashboard submit-backtest -f drafts/golden_cross.json
//!
//! # 완료된 백테스트 목록
//! dashboard list-backtests --status completed --limit 20
//!
//! # 두 백테스트를 성과 점수로 비교
//! dashboard compare 12 15
//!
//! # 전략 신호 요약
//! dashboard signals moving_average -s AAPL,MSFT --lookback-days 10
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dashboard_core::{init_logging, AppConfig, LogConfig};
use std::path::PathBuf;
use tracing::debug;

mod commands;

use commands::{backtest, strategy, Session};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Trading dashboard CLI - 전략/백테스트 요청 검증 및 제출", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML, 선택)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 서비스 기본 URL (설정 파일보다 우선)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// 개발 모드 (게이트웨이 실패를 warn 레벨로 기록)
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 백테스트 요청을 로컬에서 검증하고 정규화된 JSON 출력 (네트워크 호출 없음)
    CheckBacktest {
        /// 백테스트 입력 파일 (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// 백테스트 요청 검증 후 제출
    SubmitBacktest {
        /// 백테스트 입력 파일 (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// 백테스트 목록 조회
    ListBacktests {
        /// 상태 필터 (pending, running, completed, failed)
        #[arg(long)]
        status: Option<String>,

        /// 전략 필터
        #[arg(long)]
        strategy_id: Option<String>,

        /// 최대 결과 수
        #[arg(long)]
        limit: Option<u32>,

        /// 건너뛸 결과 수
        #[arg(long)]
        offset: Option<u32>,
    },

    /// 백테스트 결과 (표시용 필드 + 성과 점수)
    ShowBacktest {
        /// 백테스트 ID
        id: String,
    },

    /// 백테스트 실행 상태
    BacktestStatus {
        /// 백테스트 ID
        id: String,
    },

    /// 백테스트 삭제
    DeleteBacktest {
        /// 백테스트 ID
        id: String,
    },

    /// 백테스트 비교 (성과 점수 순위)
    Compare {
        /// 비교할 백테스트 ID (2개 이상)
        ids: Vec<String>,
    },

    /// 사용 가능한 전략 목록
    Strategies,

    /// 전략 템플릿 목록
    Templates,

    /// 전략 실행 요청 검증 후 제출
    RunStrategy {
        /// 실행 요청 입력 파일 (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// 전략 신호 조회 및 요약
    Signals {
        /// 전략 ID
        strategy_id: String,

        /// 대상 심볼 (쉼표로 구분, 예: AAPL,MSFT)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// 조회 기간 (일, 기본: 30)
        #[arg(long)]
        lookback_days: Option<u32>,
    },

    /// 전략 파라미터 사전 검증 후 서비스 검증
    ValidateStrategy {
        /// 전략 ID
        strategy_id: String,

        /// 파라미터 파일 (JSON 객체, 생략 시 기본값만 사용)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 로컬 검증만 수행
        #[arg(long)]
        local_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일은 선택 사항
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.gateway.base_url = base_url;
    }
    if cli.dev {
        config.gateway = config.gateway.with_development(true);
    }

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;
    debug!(base_url = %config.gateway.base_url, "Configuration loaded");

    match cli.command {
        Commands::CheckBacktest { file } => backtest::check(&file)?,
        command => {
            let session = Session::connect(&config.gateway)?;
            run(session, command).await?;
        }
    }

    Ok(())
}

async fn run(session: Session, command: Commands) -> Result<()> {
    match command {
        Commands::CheckBacktest { file } => backtest::check(&file),
        Commands::SubmitBacktest { file } => backtest::submit(&session, &file).await,
        Commands::ListBacktests {
            status,
            strategy_id,
            limit,
            offset,
        } => backtest::list(&session, status, strategy_id, limit, offset).await,
        Commands::ShowBacktest { id } => backtest::show(&session, &id).await,
        Commands::BacktestStatus { id } => backtest::status(&session, &id).await,
        Commands::DeleteBacktest { id } => backtest::delete(&session, &id).await,
        Commands::Compare { ids } => backtest::compare(&session, &ids).await,
        Commands::Strategies => strategy::list(&session).await,
        Commands::Templates => strategy::templates(&session).await,
        Commands::RunStrategy { file } => strategy::run(&session, &file).await,
        Commands::Signals {
            strategy_id,
            symbols,
            lookback_days,
        } => strategy::signals(&session, &strategy_id, &symbols, lookback_days).await,
        Commands::ValidateStrategy {
            strategy_id,
            file,
            local_only,
        } => strategy::validate(&session, &strategy_id, file.as_deref(), local_only).await,
    }
}
