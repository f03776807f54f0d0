//! 가격 관측치 및 시계열 타입.
//!
//! `PriceSeries`는 한 종목의 일일 종가를 날짜 오름차순으로 보관합니다.
//! 생성 시점에 정렬과 중복 여부를 검증하며, 이후 변경되지 않습니다.
//! 휴장일 등으로 인한 날짜 공백은 허용되며, 공백은 변동 0으로
//! 취급되지 않습니다 (변동률은 관측치 기준으로 계산).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// 일일 가격 관측치.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// 거래일
    pub date: NaiveDate,
    /// 종가 (JPY)
    pub close: Decimal,
    /// 거래량 (선택)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PriceObservation {
    /// 새 관측치를 생성합니다.
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self {
            date,
            close,
            volume: None,
        }
    }

    /// 거래량을 설정합니다.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// 한 종목의 검증된 가격 시계열.
///
/// 불변식: 날짜 오름차순 정렬, 중복 날짜 없음.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// 종목 코드
    symbol: String,
    /// 날짜순 관측치
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// 관측치 목록에서 시계열을 생성합니다.
    ///
    /// 날짜가 엄격하게 증가하지 않으면 `InvalidSeries`를 반환합니다.
    pub fn new(
        symbol: impl Into<String>,
        observations: Vec<PriceObservation>,
    ) -> AnalysisResult<Self> {
        let symbol = symbol.into();

        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AnalysisError::InvalidSeries(format!(
                    "{}: {} 다음에 {}이(가) 올 수 없습니다 (날짜는 엄격히 증가해야 함)",
                    symbol, pair[0].date, pair[1].date
                )));
            }
        }

        Ok(Self {
            symbol,
            observations,
        })
    }

    /// 종목 코드를 반환합니다.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 관측치 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// 시계열이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// 전체 관측치 슬라이스를 반환합니다.
    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// 인덱스로 관측치를 조회합니다.
    pub fn get(&self, index: usize) -> Option<&PriceObservation> {
        self.observations.get(index)
    }

    /// 마지막(최신) 관측치를 반환합니다.
    pub fn last(&self) -> Option<&PriceObservation> {
        self.observations.last()
    }

    /// 주어진 날짜의 관측치 인덱스를 찾습니다.
    ///
    /// 시계열이 정렬되어 있으므로 이진 탐색을 사용합니다.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.observations
            .binary_search_by_key(&date, |obs| obs.date)
            .ok()
    }

    /// 종가만 모은 벡터를 반환합니다.
    pub fn closes(&self) -> Vec<Decimal> {
        self.observations.iter().map(|obs| obs.close).collect()
    }
}
