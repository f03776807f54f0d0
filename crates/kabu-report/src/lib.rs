//! # Kabu Report
//!
//! 지표와 리스크 평가를 사람이 읽을 수 있는 텍스트 요약으로
//! 렌더링합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 단일 종목 요약 및 시장 다이제스트 작성 (`SummaryComposer`)
//! - (추세 × 리스크 등급) 9가지 조합 전체를 정적으로 보장하는
//!   내러티브 템플릿
//! - 시계열 → 지표 → 리스크 → 요약을 잇는 배치 파이프라인
//!
//! 렌더링된 본문의 모든 수치는 `structured_facts`에 그대로 담겨
//! 하위 소비자(JSON/CSV 내보내기 등)가 본문을 재파싱하지 않아도 됩니다.

pub mod composer;
pub mod pipeline;
pub mod templates;
pub mod types;

pub use composer::{StockAnalysis, SummaryComposer};
pub use pipeline::AnalysisPipeline;
pub use types::{Insight, InsightLevel, Summary, SummarySubject};
