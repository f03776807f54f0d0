//! 기술적 지표 모듈.
//!
//! 이 모듈은 하나의 평가일에 대한 지표 집합(`IndicatorSet`)을 계산합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단기/장기 단순 이동평균
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **변동률**: 관측치 기준 1일/5일 변동률 (%)
//! - **유의미 변동 플래그**: 일일 변동률 임계값 초과 여부
//! - **RSI**: 단순 평균 방식의 상대강도지수
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **수익률 표준편차**: 최근 일일 수익률의 표본 표준편차
//!
//! 기록이 부족한 지표 필드는 `None`으로 남습니다. 부재는 0이 아니며
//! 에러도 아닙니다. 그대로 하위 단계(리스크 분류, 요약)로 전파됩니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! use kabu_analytics::IndicatorEngine;
//! use kabu_core::IndicatorConfig;
//!
//! let engine = IndicatorEngine::new();
//! let set = engine.evaluate(&series, eval_date, &IndicatorConfig::default())?;
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kabu_core::{AnalysisError, AnalysisResult, IndicatorConfig, PriceSeries};

pub use momentum::MomentumCalculator;
pub use trend::TrendIndicators;
pub use volatility::VolatilityIndicators;

/// 1일 변동률 계산 기준 (관측치 개수).
pub const DAILY_CHANGE_HORIZON: usize = 1;

/// 5일 변동률 계산 기준 (관측치 개수).
pub const WEEKLY_CHANGE_HORIZON: usize = 5;

/// 하나의 평가일에 대한 지표 집합.
///
/// `IndicatorEngine::evaluate`가 호출될 때마다 새로 생성되며
/// 생성 이후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// 평가일
    pub eval_date: NaiveDate,
    /// 평가일 종가
    pub close: Decimal,
    /// 단기 이동평균 (기록 부족 시 None)
    pub sma_short: Option<Decimal>,
    /// 장기 이동평균 (기록 부족 시 None)
    pub sma_long: Option<Decimal>,
    /// 1일 변동률 (%)
    pub pct_change_1d: Option<Decimal>,
    /// 5일 변동률 (%)
    pub pct_change_5d: Option<Decimal>,
    /// RSI (0-100)
    pub rsi: Option<Decimal>,
    /// 일일 수익률 표본 표준편차 (%)
    pub volatility: Option<Decimal>,
    /// 유의미한 일일 변동 여부 (1일 변동률 부재 시 false)
    pub is_significant_move: bool,
}

/// 통합 지표 엔진.
///
/// 추세/모멘텀/변동성 계산기를 묶어 평가일 기준 지표 집합을 생성합니다.
/// 호출 간 상태를 유지하지 않으며, 동일 입력은 항상 동일 출력을 냅니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 평가일에 대한 지표 집합을 계산합니다.
    ///
    /// # 인자
    /// * `series` - 검증된 가격 시계열
    /// * `date` - 평가일 (시계열에 존재해야 함)
    /// * `config` - 지표 계산 설정
    ///
    /// # 에러
    /// * `InsufficientData` - 평가일이 시계열에 없음
    /// * `InvalidPrice` - 변동률 계산 중 0 이하 가격을 만남
    pub fn evaluate(
        &self,
        series: &PriceSeries,
        date: NaiveDate,
        config: &IndicatorConfig,
    ) -> AnalysisResult<IndicatorSet> {
        let index = series
            .index_of(date)
            .ok_or_else(|| AnalysisError::InsufficientData {
                symbol: series.symbol().to_string(),
                date,
            })?;

        let closes = series.closes();
        let close = closes[index];

        let sma_short = self.trend.sma_at(&closes, index, config.sma_short_window);
        let sma_long = self.trend.sma_at(&closes, index, config.sma_long_window);

        let pct_change_1d = self
            .momentum
            .pct_change_at(series, index, DAILY_CHANGE_HORIZON)?;
        let pct_change_5d = self
            .momentum
            .pct_change_at(series, index, WEEKLY_CHANGE_HORIZON)?;

        // 데이터 부재는 변동이 아님: 1일 변동률이 없으면 false
        let is_significant_move = pct_change_1d
            .map(|p| p.abs() >= config.significance_threshold)
            .unwrap_or(false);

        let rsi = self.momentum.rsi_at(&closes, index, config.rsi_period);
        let volatility = self
            .volatility
            .volatility_at(series, index, config.volatility_window)?;

        tracing::debug!(
            symbol = %series.symbol(),
            %date,
            significant = is_significant_move,
            "지표 계산 완료"
        );

        Ok(IndicatorSet {
            eval_date: date,
            close,
            sma_short,
            sma_long,
            pct_change_1d,
            pct_change_5d,
            rsi,
            volatility,
            is_significant_move,
        })
    }
}
