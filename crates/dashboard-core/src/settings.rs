//! 설정 관리.
//!
//! 설정은 기본값 → TOML 파일 → `DASHBOARD__*` 환경 변수 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "DASHBOARD";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 원격 서비스 연결 설정
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 원격 트레이딩 서비스 연결 설정.
///
/// `Debug` 구현은 `auth_token`을 마스킹합니다.
#[derive(Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// API 기본 URL (예: "http://localhost:8000/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 개발 모드. 켜져 있으면 요청 실패를 warn 레벨로 기록합니다.
    #[serde(default)]
    pub development: bool,
    /// Bearer 토큰 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            development: false,
            auth_token: None,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("development", &self.development)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "***REDACTED***"),
            )
            .finish()
    }
}

impl GatewayConfig {
    /// 기본 URL을 지정한 설정을 생성합니다.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// 개발 모드를 설정합니다.
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// 인증 토큰을 설정합니다.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// 타임아웃을 설정합니다.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨 필터
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 지정되지 않으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = Self::defaults()?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// TOML 문자열에서 설정을 로드합니다 (환경 변수 미적용).
    pub fn from_toml(content: &str) -> Result<Self, config::ConfigError> {
        Self::defaults()?
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("gateway.base_url", default_base_url())?
            .set_default("gateway.timeout_secs", default_timeout_secs() as i64)?
            .set_default("gateway.development", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")
    }
}
