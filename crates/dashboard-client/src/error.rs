//! 원격 호출 에러 타입.

use dashboard_core::ValidationError;
use thiserror::Error;

/// 원격 서비스 호출 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// 2xx가 아닌 응답
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 응답 본문 파싱 에러
    #[error("Decode error: {0}")]
    Decode(String),
}

impl RemoteError {
    /// HTTP 상태 코드 (HTTP 에러인 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 4xx 에러인지 확인.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// 5xx 에러인지 확인.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// 리소스 없음 (404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout(err.to_string())
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}

/// API facade 에러. 로컬 검증 실패는 네트워크 호출 없이 반환됩니다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ClientError {
    /// 로컬 검증 실패인지 확인.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// API facade 결과 타입.
pub type ClientResult<T> = Result<T, ClientError>;
