//! 요청 계층 전반에서 사용되는 공통 타입.

mod ids;
mod numeric;
mod symbol;

pub use ids::*;
pub use numeric::*;
pub use symbol::*;
