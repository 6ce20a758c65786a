//! # Dashboard Core
//!
//! 트레이딩 대시보드의 전략/백테스트 요청 계층을 제공합니다.
//!
//! 이 크레이트는 원격 트레이딩 서비스로 요청이 나가기 전후의 규칙을 담당합니다:
//! - 입력 정제 및 검증 (심볼, 날짜, 숫자)
//! - 전략 타입별 기본 파라미터 병합
//! - 백테스트 요청 생성 및 순서가 고정된 검증
//! - 백테스트 결과의 표시용 필드 및 성과 점수 계산
//! - 매매 신호 집계
//! - 설정 관리
//! - 로깅 인프라
//!
//! 모든 연산은 순수 함수이며 호출 간 상태를 유지하지 않습니다.

pub mod domain;
pub mod error;
pub mod logging;
pub mod sanitize;
pub mod settings;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use sanitize::*;
pub use settings::*;
pub use types::*;
