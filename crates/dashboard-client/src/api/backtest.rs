//! 백테스트 API.

use super::{decode, decode_list, find_list, resource_path};
use crate::error::{ClientResult, RemoteError};
use crate::gateway::Gateway;
use dashboard_core::{
    build_backtest_request, rank_by_performance, BacktestDraft, BacktestListQuery,
    BacktestProgress, BacktestResult, CompareRequest, DisplayResult, PerformanceRank, ResourceId,
};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

const BACKTESTS: &str = "/backtests";
const LIST_KEYS: &[&str] = &["backtests", "results", "items"];

fn backtest_path(id: &ResourceId, action: Option<&str>) -> String {
    let id = id.to_string();
    match action {
        Some(action) => resource_path(&["backtests", &id, action]),
        None => resource_path(&["backtests", &id]),
    }
}

/// 비교 응답과 성과 점수 순위.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestComparison {
    /// 서비스 응답 원본
    pub raw: Value,
    /// 응답에 포함된 결과의 성과 점수 순위
    pub ranking: Vec<PerformanceRank>,
}

/// 백테스트 API facade.
#[derive(Clone)]
pub struct BacktestApi {
    gateway: Arc<dyn Gateway>,
}

impl BacktestApi {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// 백테스트를 검증 후 제출합니다. 검증 실패 시 네트워크 호출이 없습니다.
    pub async fn create(&self, draft: &BacktestDraft) -> ClientResult<BacktestResult> {
        let config = build_backtest_request(draft)?;
        info!(
            strategy_id = %config.strategy_id,
            symbols = config.universe.len(),
            "Submitting backtest"
        );

        let body = serde_json::to_value(&config).map_err(RemoteError::from)?;
        let response = self
            .gateway
            .request(Method::POST, BACKTESTS, &[], Some(&body))
            .await?;
        Ok(decode(response)?)
    }

    /// 백테스트 목록을 조회합니다.
    pub async fn list(&self, query: &BacktestListQuery) -> ClientResult<Vec<BacktestResult>> {
        let response = self
            .gateway
            .request(Method::GET, BACKTESTS, &query.to_query(), None)
            .await?;
        let results: Vec<BacktestResult> = decode_list(response, LIST_KEYS)?;
        debug!(count = results.len(), "Listed backtests");
        Ok(results)
    }

    /// 백테스트 결과를 조회합니다.
    pub async fn get(&self, id: &ResourceId) -> ClientResult<BacktestResult> {
        let response = self
            .gateway
            .request(Method::GET, &backtest_path(id, None), &[], None)
            .await?;
        Ok(decode(response)?)
    }

    /// 표시용 필드가 추가된 결과를 조회합니다.
    pub async fn get_display(&self, id: &ResourceId) -> ClientResult<DisplayResult> {
        let result = self.get(id).await?;
        Ok(DisplayResult::from_result(&result))
    }

    /// 실행 상태를 조회합니다.
    pub async fn status(&self, id: &ResourceId) -> ClientResult<BacktestProgress> {
        let response = self
            .gateway
            .request(Method::GET, &backtest_path(id, Some("status")), &[], None)
            .await?;
        Ok(decode(response)?)
    }

    /// 백테스트를 삭제합니다.
    pub async fn delete(&self, id: &ResourceId) -> ClientResult<()> {
        info!(backtest_id = %id, "Deleting backtest");
        self.gateway
            .request(Method::DELETE, &backtest_path(id, None), &[], None)
            .await?;
        Ok(())
    }

    /// 백테스트를 비교합니다. 2개 미만이면 네트워크 호출 없이 실패합니다.
    pub async fn compare(&self, ids: Vec<ResourceId>) -> ClientResult<BacktestComparison> {
        let request = CompareRequest::new(ids)?;
        info!(count = request.backtest_ids.len(), "Comparing backtests");

        let body = serde_json::to_value(&request).map_err(RemoteError::from)?;
        let raw = self
            .gateway
            .request(
                Method::POST,
                &format!("{}/compare", BACKTESTS),
                &[],
                Some(&body),
            )
            .await?;

        // 목록이 있는데 변환에 실패하면 에러, 목록이 없으면 순위 없이 원본만 반환
        let ranking = match find_list(&raw, LIST_KEYS) {
            Some(items) => {
                let results: Vec<BacktestResult> = decode(items.clone())?;
                rank_by_performance(&results)
            }
            None => {
                warn!("Comparison response has no result list, ranking skipped");
                Vec::new()
            }
        };
        Ok(BacktestComparison { raw, ranking })
    }
}
