//! 원격 트레이딩 서비스 게이트웨이.
//!
//! `Gateway` trait는 요청 하나를 보내고 JSON 응답을 돌려주는 계약만 정의합니다.
//! 재시도나 캐시는 없으며, 실패는 호출자에게 한 번 전달됩니다.

use crate::error::RemoteError;
use async_trait::async_trait;
use dashboard_core::GatewayConfig;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// 쿼리 파라미터 목록.
pub type Query = [(String, String)];

/// 원격 서비스 호출 계약.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// 요청을 보내고 JSON 응답을 반환합니다.
    ///
    /// - 2xx: 응답 본문 (빈 본문은 `Value::Null`)
    /// - 그 외: `RemoteError::Http` (메시지는 본문의 `error` 필드 또는 표준 사유)
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Value, RemoteError>;
}

/// reqwest 기반 HTTP 게이트웨이.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    development: bool,
}

impl HttpGateway {
    /// 설정으로 게이트웨이를 생성합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `RemoteError::Network`를 반환합니다.
    pub fn new(config: &GatewayConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            development: config.development,
        })
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn report_failure(&self, method: &Method, path: &str, err: &RemoteError) {
        if self.development {
            warn!(%method, path, error = %err, "Gateway request failed");
        } else {
            debug!(%method, path, error = %err, "Gateway request failed");
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Value, RemoteError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(status, &text)
    }
}

/// 응답 상태와 본문을 해석합니다.
fn decode_response(status: StatusCode, text: &str) -> Result<Value, RemoteError> {
    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_str(text)?);
    }

    let message = serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|payload| {
            payload
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    Err(RemoteError::Http {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Value, RemoteError> {
        debug!(%method, path, "Gateway request");

        let result = self.send(&method, path, query, body).await;
        if let Err(err) = &result {
            self.report_failure(&method, path, err);
        }
        result
    }
}
