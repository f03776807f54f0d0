//! 추세 지표 (Trend Indicators).
//!
//! 평가일로 끝나는 창에 대한 단순 이동평균을 제공합니다.

use rust_decimal::Decimal;

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 평가 인덱스로 끝나는 창의 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// 평가 인덱스 이전(포함)에 `window`개 미만의 관측치만 있으면
    /// `None`을 반환합니다. 부재는 0이 아니며 에러도 아닙니다.
    ///
    /// # 인자
    /// * `closes` - 날짜순 종가
    /// * `index` - 평가 인덱스 (창의 마지막 요소)
    /// * `window` - 창 크기 (관측치 개수)
    pub fn sma_at(&self, closes: &[Decimal], index: usize, window: usize) -> Option<Decimal> {
        if window == 0 || index >= closes.len() || index + 1 < window {
            return None;
        }

        let slice = &closes[index + 1 - window..=index];
        let sum: Decimal = slice.iter().sum();
        Some(sum / Decimal::from(window))
    }
}
