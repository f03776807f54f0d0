//! 모멘텀 지표 (Momentum Indicators).
//!
//! 관측치 기준 변동률과 단순 평균 방식의 RSI를 제공합니다.
//! 변동률은 달력일이 아닌 시계열상의 H번째 이전 관측치를 기준으로
//! 계산하므로 휴장일 공백이 자연스럽게 처리됩니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kabu_core::{AnalysisError, AnalysisResult, PriceSeries};

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// H개 관측치 이전 대비 변동률 (%) 계산.
    ///
    /// 변동률 = (현재 종가 - 기준 종가) / 기준 종가 × 100
    ///
    /// 기준은 시계열상의 `horizon`번째 이전 관측치입니다.
    /// 이전 관측치가 부족하면 `Ok(None)`을 반환합니다.
    ///
    /// # 에러
    /// 기준 종가가 0 이하이면 `InvalidPrice`를 반환합니다.
    /// Infinity나 NaN을 조용히 만들지 않습니다.
    pub fn pct_change_at(
        &self,
        series: &PriceSeries,
        index: usize,
        horizon: usize,
    ) -> AnalysisResult<Option<Decimal>> {
        if index < horizon {
            return Ok(None);
        }

        let current = match series.get(index) {
            Some(obs) => obs,
            None => return Ok(None),
        };
        let base = match series.get(index - horizon) {
            Some(obs) => obs,
            None => return Ok(None),
        };

        if base.close <= Decimal::ZERO {
            return Err(AnalysisError::InvalidPrice {
                symbol: series.symbol().to_string(),
                date: base.date,
                price: base.close,
            });
        }

        let change = (current.close - base.close) / base.close * dec!(100);
        Ok(Some(change))
    }

    /// 평가 인덱스 기준 RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평가 인덱스로 끝나는 `period`개의 가격 변화에 대한 단순 평균을
    /// 사용합니다. 변화 개수가 부족하면 `None`, 평균 하락폭이 0이면
    /// 100을 반환합니다.
    pub fn rsi_at(&self, closes: &[Decimal], index: usize, period: usize) -> Option<Decimal> {
        if period == 0 || index >= closes.len() || index < period {
            return None;
        }

        let mut gain_sum = Decimal::ZERO;
        let mut loss_sum = Decimal::ZERO;

        for i in index + 1 - period..=index {
            let delta = closes[i] - closes[i - 1];
            if delta > Decimal::ZERO {
                gain_sum += delta;
            } else {
                loss_sum += delta.abs();
            }
        }

        let period_decimal = Decimal::from(period);
        let avg_gain = gain_sum / period_decimal;
        let avg_loss = loss_sum / period_decimal;

        if avg_loss == Decimal::ZERO {
            return Some(dec!(100));
        }

        let rs = avg_gain / avg_loss;
        Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs)))
    }
}
