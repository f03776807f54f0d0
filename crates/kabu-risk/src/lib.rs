//! # Kabu Risk
//!
//! 지표 집합(`IndicatorSet`)을 이산적인 추세 및 리스크 등급으로
//! 분류합니다.
//!
//! 분류는 전체 함수(total function)입니다: 모든 필드가 부재한 지표
//! 집합에 대해서도 항상 `RiskAssessment`를 반환하며 실패하지 않습니다.
//! 데이터 부재는 폴백으로 처리되고 판단 근거(rationale)에 기록됩니다.

pub mod classifier;

pub use classifier::{RationaleTag, RiskAssessment, RiskClassifier, RiskTier, Trend};
