//! 변동성 지표 (Volatility Indicators).
//!
//! 최근 일일 수익률의 표본 표준편차로 가격 변동성을 측정합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kabu_core::{AnalysisError, AnalysisResult, PriceSeries};

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 평가 인덱스 기준 변동성 (일일 수익률 표본 표준편차, %) 계산.
    ///
    /// 평가 인덱스로 끝나는 `window`개 관측치 구간에서 연속 관측치 간
    /// 수익률(%)을 구하고 그 표본 표준편차를 반환합니다.
    /// 구간이 확보되지 않거나 수익률이 2개 미만이면 `None`입니다.
    ///
    /// # 에러
    /// 구간 내 기준 종가가 0 이하이면 `InvalidPrice`를 반환합니다.
    pub fn volatility_at(
        &self,
        series: &PriceSeries,
        index: usize,
        window: usize,
    ) -> AnalysisResult<Option<Decimal>> {
        if index >= series.len() || index + 1 < window || window < 3 {
            return Ok(None);
        }

        let observations = &series.observations()[index + 1 - window..=index];

        let mut returns = Vec::with_capacity(window - 1);
        for pair in observations.windows(2) {
            let base = pair[0];
            if base.close <= Decimal::ZERO {
                return Err(AnalysisError::InvalidPrice {
                    symbol: series.symbol().to_string(),
                    date: base.date,
                    price: base.close,
                });
            }
            returns.push((pair[1].close - base.close) / base.close * dec!(100));
        }

        let n = Decimal::from(returns.len());
        let mean: Decimal = returns.iter().sum::<Decimal>() / n;
        let variance: Decimal = returns
            .iter()
            .map(|r| {
                let diff = *r - mean;
                diff * diff
            })
            .sum::<Decimal>()
            / (n - Decimal::ONE);

        Ok(Some(sqrt_decimal(variance)))
    }
}

/// Decimal 제곱근 계산 (Newton-Raphson 방법).
///
/// Decimal 타입은 기본 제곱근 함수가 없으므로 직접 구현합니다.
fn sqrt_decimal(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut x = value;
    let two = dec!(2);

    // 10회 반복이면 충분한 정밀도
    for _ in 0..10 {
        x = (x + value / x) / two;
    }

    x
}
