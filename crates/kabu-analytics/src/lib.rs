//! # Kabu Analytics
//!
//! 일일 가격 시계열로부터 기술적 지표를 계산합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 평가일 기준 지표 집합 (`IndicatorSet`) 계산
//! - 추세 지표 (단기/장기 이동평균)
//! - 모멘텀 지표 (관측치 기준 변동률, RSI, 유의미 변동 플래그)
//! - 변동성 지표 (일일 수익률 표준편차)
//!
//! 모든 계산은 입력에 대한 순수 함수이며 호출 간 상태를 유지하지 않습니다.

pub mod indicators;

pub use indicators::{IndicatorEngine, IndicatorSet};
