//! 도메인 타입.
//!
//! 이 모듈은 분석 파이프라인의 입력 도메인 타입을 정의합니다:
//! - `Stock` - 종목 식별 정보
//! - `PriceObservation` - 일일 가격 관측치
//! - `PriceSeries` - 날짜순으로 검증된 가격 시계열

pub mod series;
pub mod stock;

pub use series::{PriceObservation, PriceSeries};
pub use stock::Stock;
