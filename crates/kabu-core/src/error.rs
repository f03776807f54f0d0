//! 분석 파이프라인의 에러 타입.
//!
//! 이 모듈은 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.
//! 지표의 미설정 필드(데이터 부족)는 정상 값이며 에러가 아닙니다.
//! 에러는 잘못된 입력(존재하지 않는 평가일, 0 이하 가격)과
//! 내부 불변식 위반에만 사용됩니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// 핵심 분석 에러.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 요청한 평가일이 시계열에 존재하지 않음
    #[error("데이터가 부족합니다: {symbol} 시계열에 평가일 {date}이(가) 없습니다")]
    InsufficientData { symbol: String, date: NaiveDate },

    /// 비율 계산 중 0 이하 가격을 만남
    #[error("잘못된 가격: {symbol} {date}의 종가 {price}은(는) 0보다 커야 합니다")]
    InvalidPrice {
        symbol: String,
        date: NaiveDate,
        price: Decimal,
    },

    /// 내러티브 템플릿 매핑 누락 (내부 불변식 위반)
    #[error("템플릿을 찾을 수 없습니다: 추세 {trend}, 리스크 {risk_tier}")]
    TemplateNotFound { trend: String, risk_tier: String },

    /// 시계열 구성 규칙 위반 (정렬/중복)
    #[error("잘못된 시계열: {0}")]
    InvalidSeries(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 분석 작업을 위한 Result 타입.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl AnalysisError {
    /// 배치 호출자가 해당 종목만 건너뛰고 계속 진행할 수 있는 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InsufficientData { .. } | AnalysisError::InvalidPrice { .. }
        )
    }

    /// 프로그래밍 결함(내부 불변식 위반)인지 확인합니다.
    ///
    /// 결함은 조용히 무시하지 않고 해당 항목의 처리를 즉시 중단해야 합니다.
    pub fn is_defect(&self) -> bool {
        matches!(self, AnalysisError::TemplateNotFound { .. })
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AnalysisError {
    fn from(err: config::ConfigError) -> Self {
        AnalysisError::Config(err.to_string())
    }
}
