//! 전략 API.

use super::{decode, decode_list, resource_path};
use crate::error::{ClientResult, RemoteError};
use crate::gateway::Gateway;
use dashboard_core::{
    build_user_strategy, merge_parameters, validate_run_request, Parameters, ResourceId,
    SignalQuery, StrategyId, StrategyRunDraft, TradeSignal, UserStrategyDraft,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

const STRATEGIES: &str = "/strategies";
const USER_STRATEGIES: &str = "/strategies/user";

fn user_strategy_path(id: &ResourceId) -> String {
    resource_path(&["strategies", "user", &id.to_string()])
}

/// 템플릿으로 전략을 만들 때의 덮어쓰기 값.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
}

/// 전략 API facade.
#[derive(Clone)]
pub struct StrategyApi {
    gateway: Arc<dyn Gateway>,
}

impl StrategyApi {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, RemoteError> {
        self.gateway.request(method, path, query, body).await
    }

    /// 사용 가능한 전략 목록.
    pub async fn list(&self) -> ClientResult<Vec<Value>> {
        let response = self.call(Method::GET, STRATEGIES, &[], None).await?;
        Ok(decode_list(response, &["strategies", "items"])?)
    }

    /// 전략을 실행합니다. 검증 실패 시 네트워크 호출이 없습니다.
    pub async fn run(&self, draft: &StrategyRunDraft) -> ClientResult<Value> {
        let request = validate_run_request(draft)?;
        info!(
            strategy_id = %request.strategy_id,
            symbols = request.universe.len(),
            "Running strategy"
        );

        let body = serde_json::to_value(&request).map_err(RemoteError::from)?;
        Ok(self
            .call(
                Method::POST,
                &format!("{}/run", STRATEGIES),
                &[],
                Some(&body),
            )
            .await?)
    }

    /// 전략 신호를 조회합니다.
    pub async fn signals(
        &self,
        strategy_id: &StrategyId,
        query: &SignalQuery,
    ) -> ClientResult<Vec<TradeSignal>> {
        let response = self
            .call(
                Method::GET,
                &resource_path(&["strategies", strategy_id.as_str(), "signals"]),
                &query.to_query(),
                None,
            )
            .await?;
        let signals: Vec<TradeSignal> = decode_list(response, &["signals", "items"])?;
        debug!(strategy_id = %strategy_id, count = signals.len(), "Fetched signals");
        Ok(signals)
    }

    /// 기본값을 병합한 파라미터를 서비스에서 검증합니다.
    pub async fn validate(
        &self,
        strategy_id: &StrategyId,
        parameters: &Parameters,
    ) -> ClientResult<Value> {
        let body = json!({ "parameters": merge_parameters(strategy_id, parameters) });
        Ok(self
            .call(
                Method::POST,
                &resource_path(&["strategies", strategy_id.as_str(), "validate"]),
                &[],
                Some(&body),
            )
            .await?)
    }

    // ==================== 사용자 전략 ====================

    pub async fn list_user_strategies(&self) -> ClientResult<Vec<Value>> {
        let response = self.call(Method::GET, USER_STRATEGIES, &[], None).await?;
        Ok(decode_list(response, &["strategies", "items"])?)
    }

    pub async fn get_user_strategy(&self, id: &ResourceId) -> ClientResult<Value> {
        Ok(self
            .call(
                Method::GET,
                &user_strategy_path(id),
                &[],
                None,
            )
            .await?)
    }

    /// 사용자 전략을 저장합니다. 파라미터 사전 검증을 통과해야 합니다.
    pub async fn create_user_strategy(&self, draft: &UserStrategyDraft) -> ClientResult<Value> {
        let payload = build_user_strategy(draft)?;
        info!(strategy_id = %payload.strategy_id, name = %payload.name, "Creating user strategy");

        let body = serde_json::to_value(&payload).map_err(RemoteError::from)?;
        Ok(self
            .call(Method::POST, USER_STRATEGIES, &[], Some(&body))
            .await?)
    }

    /// 사용자 전략을 수정합니다. 파라미터 사전 검증을 통과해야 합니다.
    pub async fn update_user_strategy(
        &self,
        id: &ResourceId,
        draft: &UserStrategyDraft,
    ) -> ClientResult<Value> {
        let payload = build_user_strategy(draft)?;
        info!(user_strategy_id = %id, "Updating user strategy");

        let body = serde_json::to_value(&payload).map_err(RemoteError::from)?;
        Ok(self
            .call(
                Method::PUT,
                &user_strategy_path(id),
                &[],
                Some(&body),
            )
            .await?)
    }

    pub async fn delete_user_strategy(&self, id: &ResourceId) -> ClientResult<()> {
        info!(user_strategy_id = %id, "Deleting user strategy");
        self.call(
            Method::DELETE,
            &user_strategy_path(id),
            &[],
            None,
        )
        .await?;
        Ok(())
    }

    // ==================== 템플릿 ====================

    pub async fn list_templates(&self) -> ClientResult<Vec<Value>> {
        let response = self
            .call(
                Method::GET,
                &format!("{}/templates", STRATEGIES),
                &[],
                None,
            )
            .await?;
        Ok(decode_list(response, &["templates", "items"])?)
    }

    /// 템플릿으로 사용자 전략을 만듭니다.
    pub async fn create_from_template(
        &self,
        template_id: &ResourceId,
        overrides: &TemplateOverrides,
    ) -> ClientResult<Value> {
        let body = serde_json::to_value(overrides).map_err(RemoteError::from)?;
        let response = self
            .call(
                Method::POST,
                &resource_path(&["strategies", "from-template", &template_id.to_string()]),
                &[],
                Some(&body),
            )
            .await?;
        Ok(decode(response)?)
    }
}
