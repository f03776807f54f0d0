//! 추세 및 리스크 등급 분류기.
//!
//! 분류 규칙:
//! - 추세: 단기/장기 이동평균 비교 → 5일 변동률 폴백 → 기본 보합.
//! - 리스크 등급: 1일 변동률 크기를 설정된 밴드와 비교하고,
//!   유의미 변동 플래그가 켜져 있으면 한 단계 상향.
//! - 판단 근거: 분류에 기여한 요인을 평가 순서대로 기록
//!   (추세 요인 먼저, 그다음 리스크 요인). 순서는 계약의 일부입니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use kabu_analytics::IndicatorSet;
use kabu_core::RiskConfig;

/// 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// 상승
    Up,
    /// 하락
    Down,
    /// 보합
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Sideways => write!(f, "sideways"),
        }
    }
}

/// 리스크 등급.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// 낮음
    Low,
    /// 중간
    Medium,
    /// 높음
    High,
}

impl RiskTier {
    /// 한 단계 상향된 등급을 반환합니다 (High는 그대로).
    pub fn escalated(self) -> Self {
        match self {
            RiskTier::Low => RiskTier::Medium,
            RiskTier::Medium => RiskTier::High,
            RiskTier::High => RiskTier::High,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// 분류에 기여한 요인 태그.
///
/// 내러티브 작성과 기계 소비(구조화 출력) 양쪽에서 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RationaleTag {
    /// 추세를 이동평균 비교로 판정
    TrendFromMovingAverages,
    /// 추세를 5일 변동률로 판정 (이동평균 부재 폴백)
    TrendFromWeeklyChange,
    /// 기록 부족으로 추세 기본값(보합) 적용
    InsufficientHistory,
    /// 1일 변동률이 High 밴드 이상
    DailyMoveAboveHighBand,
    /// 1일 변동률이 Medium 밴드 이상
    DailyMoveAboveMediumBand,
    /// 1일 변동률이 밴드 내 (낮은 리스크)
    DailyMoveWithinBand,
    /// 1일 변동률 데이터 부재
    NoDailyChangeData,
    /// 유의미한 일일 변동으로 등급 상향
    SignificantDailyMove,
    /// 변동성 경고 임계값 초과
    ElevatedVolatility,
}

impl fmt::Display for RationaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RationaleTag::TrendFromMovingAverages => "trend_from_moving_averages",
            RationaleTag::TrendFromWeeklyChange => "trend_from_weekly_change",
            RationaleTag::InsufficientHistory => "insufficient_history",
            RationaleTag::DailyMoveAboveHighBand => "daily_move_above_high_band",
            RationaleTag::DailyMoveAboveMediumBand => "daily_move_above_medium_band",
            RationaleTag::DailyMoveWithinBand => "daily_move_within_band",
            RationaleTag::NoDailyChangeData => "no_daily_change_data",
            RationaleTag::SignificantDailyMove => "significant_daily_move",
            RationaleTag::ElevatedVolatility => "elevated_volatility",
        };
        write!(f, "{}", tag)
    }
}

/// 리스크 평가 결과.
///
/// 지표 집합만으로 도출되며, 호출 시마다 새로 계산됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 추세 방향
    pub trend: Trend,
    /// 리스크 등급
    pub risk_tier: RiskTier,
    /// 판단 근거 (평가 순서대로)
    pub rationale: Vec<RationaleTag>,
}

/// 추세/리스크 분류기.
///
/// 상태를 유지하지 않는 순수 분류기입니다.
#[derive(Debug, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    /// 새로운 분류기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 지표 집합을 리스크 평가로 분류합니다.
    ///
    /// 전체 함수입니다: 잘 구성된 지표 집합에 대해 항상 성공하며,
    /// 데이터 부재는 에러가 아닌 폴백으로 처리됩니다.
    pub fn classify(&self, indicators: &IndicatorSet, config: &RiskConfig) -> RiskAssessment {
        let mut rationale = Vec::new();

        let trend = self.classify_trend(indicators, config, &mut rationale);
        let risk_tier = self.classify_tier(indicators, config, &mut rationale);

        tracing::debug!(
            date = %indicators.eval_date,
            %trend,
            tier = %risk_tier,
            "리스크 분류 완료"
        );

        RiskAssessment {
            trend,
            risk_tier,
            rationale,
        }
    }

    /// 추세 판정.
    ///
    /// 1. 단기/장기 이동평균이 모두 있으면 괴리율을 epsilon 밴드와 비교.
    /// 2. 하나라도 없으면 5일 변동률의 부호로 폴백 (같은 밴드 적용).
    /// 3. 그것도 없으면 보합을 기본값으로 하고 기록 부족을 근거에 남김.
    fn classify_trend(
        &self,
        indicators: &IndicatorSet,
        config: &RiskConfig,
        rationale: &mut Vec<RationaleTag>,
    ) -> Trend {
        // 장기 이평이 0 이하인 비정상 입력은 폴백으로 처리 (전체성 보장)
        if let (Some(short), Some(long)) = (indicators.sma_short, indicators.sma_long) {
            if long > Decimal::ZERO {
                rationale.push(RationaleTag::TrendFromMovingAverages);
                let gap_pct = (short - long) / long * dec!(100);
                return Self::direction_in_band(gap_pct, config.trend_epsilon);
            }
        }

        if let Some(weekly) = indicators.pct_change_5d {
            rationale.push(RationaleTag::TrendFromWeeklyChange);
            return Self::direction_in_band(weekly, config.trend_epsilon);
        }

        rationale.push(RationaleTag::InsufficientHistory);
        Trend::Sideways
    }

    /// epsilon 밴드 내이면 보합, 아니면 부호에 따라 상승/하락.
    fn direction_in_band(value: Decimal, epsilon: Decimal) -> Trend {
        if value.abs() <= epsilon {
            Trend::Sideways
        } else if value > Decimal::ZERO {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// 리스크 등급 판정.
    ///
    /// 기본 등급은 1일 변동률 크기와 설정 밴드의 비교로 정하고,
    /// 유의미 변동 플래그가 켜져 있으면 한 단계 상향합니다.
    /// 변동성이 경고 임계값을 넘으면 근거 태그만 추가합니다 (등급 불변).
    fn classify_tier(
        &self,
        indicators: &IndicatorSet,
        config: &RiskConfig,
        rationale: &mut Vec<RationaleTag>,
    ) -> RiskTier {
        let mut tier = match indicators.pct_change_1d {
            Some(change) => {
                let magnitude = change.abs();
                if magnitude >= config.high_threshold {
                    rationale.push(RationaleTag::DailyMoveAboveHighBand);
                    RiskTier::High
                } else if magnitude >= config.medium_threshold {
                    rationale.push(RationaleTag::DailyMoveAboveMediumBand);
                    RiskTier::Medium
                } else {
                    rationale.push(RationaleTag::DailyMoveWithinBand);
                    RiskTier::Low
                }
            }
            None => {
                rationale.push(RationaleTag::NoDailyChangeData);
                RiskTier::Low
            }
        };

        if indicators.is_significant_move {
            rationale.push(RationaleTag::SignificantDailyMove);
            tier = tier.escalated();
        }

        if let Some(volatility) = indicators.volatility {
            if volatility >= config.high_volatility_alert {
                rationale.push(RationaleTag::ElevatedVolatility);
            }
        }

        tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn eval_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()
    }

    fn empty_set() -> IndicatorSet {
        IndicatorSet {
            eval_date: eval_date(),
            close: dec!(100),
            sma_short: None,
            sma_long: None,
            pct_change_1d: None,
            pct_change_5d: None,
            rsi: None,
            volatility: None,
            is_significant_move: false,
        }
    }

    #[test]
    fn test_trend_from_moving_averages() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let set = IndicatorSet {
            sma_short: Some(dec!(105)),
            sma_long: Some(dec!(100)),
            ..empty_set()
        };
        let assessment = classifier.classify(&set, &config);

        assert_eq!(assessment.trend, Trend::Up);
        assert_eq!(
            assessment.rationale[0],
            RationaleTag::TrendFromMovingAverages
        );
    }

    #[test]
    fn test_trend_epsilon_band_is_sideways() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        // 괴리율 0.3% < epsilon 0.5% → 보합
        let set = IndicatorSet {
            sma_short: Some(dec!(100.3)),
            sma_long: Some(dec!(100)),
            ..empty_set()
        };
        let assessment = classifier.classify(&set, &config);

        assert_eq!(assessment.trend, Trend::Sideways);
    }

    #[test]
    fn test_trend_fallback_to_weekly_change() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let set = IndicatorSet {
            sma_short: Some(dec!(100)), // 장기 이평 부재 → 폴백
            pct_change_5d: Some(dec!(-4.2)),
            ..empty_set()
        };
        let assessment = classifier.classify(&set, &config);

        assert_eq!(assessment.trend, Trend::Down);
        assert_eq!(assessment.rationale[0], RationaleTag::TrendFromWeeklyChange);
    }

    #[test]
    fn test_trend_default_records_insufficient_history() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let assessment = classifier.classify(&empty_set(), &config);

        assert_eq!(assessment.trend, Trend::Sideways);
        assert!(assessment
            .rationale
            .contains(&RationaleTag::InsufficientHistory));
    }

    #[test]
    fn test_tier_bands() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        // 경계값: 5.0% → High
        let high = IndicatorSet {
            pct_change_1d: Some(dec!(-5.0)),
            ..empty_set()
        };
        assert_eq!(classifier.classify(&high, &config).risk_tier, RiskTier::High);

        // 2.0% → Medium
        let medium = IndicatorSet {
            pct_change_1d: Some(dec!(2.0)),
            ..empty_set()
        };
        assert_eq!(
            classifier.classify(&medium, &config).risk_tier,
            RiskTier::Medium
        );

        // 1.9% → Low
        let low = IndicatorSet {
            pct_change_1d: Some(dec!(1.9)),
            ..empty_set()
        };
        assert_eq!(classifier.classify(&low, &config).risk_tier, RiskTier::Low);
    }

    #[test]
    fn test_significant_move_escalates_tier() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        // 3.5%는 Medium 밴드지만 유의미 변동 플래그로 High 상향
        let set = IndicatorSet {
            pct_change_1d: Some(dec!(3.5)),
            is_significant_move: true,
            ..empty_set()
        };
        let assessment = classifier.classify(&set, &config);

        assert_eq!(assessment.risk_tier, RiskTier::High);
        assert!(assessment
            .rationale
            .contains(&RationaleTag::SignificantDailyMove));
    }

    #[test]
    fn test_missing_daily_change_is_low() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let assessment = classifier.classify(&empty_set(), &config);

        assert_eq!(assessment.risk_tier, RiskTier::Low);
        assert!(assessment
            .rationale
            .contains(&RationaleTag::NoDailyChangeData));
    }

    #[test]
    fn test_elevated_volatility_tag_only() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let set = IndicatorSet {
            pct_change_1d: Some(dec!(1.0)),
            volatility: Some(dec!(9.5)),
            ..empty_set()
        };
        let assessment = classifier.classify(&set, &config);

        // 변동성 태그는 근거에만 기록되고 등급은 그대로
        assert_eq!(assessment.risk_tier, RiskTier::Low);
        assert!(assessment
            .rationale
            .contains(&RationaleTag::ElevatedVolatility));
    }

    #[test]
    fn test_rationale_order_trend_first() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let set = IndicatorSet {
            sma_short: Some(dec!(110)),
            sma_long: Some(dec!(100)),
            pct_change_1d: Some(dec!(6.0)),
            is_significant_move: true,
            ..empty_set()
        };
        let assessment = classifier.classify(&set, &config);

        assert_eq!(
            assessment.rationale,
            vec![
                RationaleTag::TrendFromMovingAverages,
                RationaleTag::DailyMoveAboveHighBand,
                RationaleTag::SignificantDailyMove,
            ]
        );
    }

    #[test]
    fn test_classification_is_stable() {
        let classifier = RiskClassifier::new();
        let config = RiskConfig::default();

        let set = IndicatorSet {
            sma_short: Some(dec!(101)),
            sma_long: Some(dec!(100)),
            pct_change_1d: Some(dec!(2.5)),
            ..empty_set()
        };

        let first = classifier.classify(&set, &config);
        let second = classifier.classify(&set, &config);

        assert_eq!(first.trend, second.trend);
        assert_eq!(first.risk_tier, second.risk_tier);
        assert_eq!(first.rationale, second.rationale);
    }

    fn optional_decimal() -> impl Strategy<Value = Option<Decimal>> {
        prop_oneof![
            Just(None),
            (-10_000i64..10_000).prop_map(|n| Some(Decimal::new(n, 2))),
        ]
    }

    proptest! {
        /// 분류기는 전체 함수: 임의의 지표 집합에 대해 항상 평가를 반환.
        #[test]
        fn prop_classifier_is_total(
            sma_short in optional_decimal(),
            sma_long in optional_decimal(),
            pct_change_1d in optional_decimal(),
            pct_change_5d in optional_decimal(),
            volatility in optional_decimal(),
            is_significant_move in any::<bool>(),
        ) {
            let classifier = RiskClassifier::new();
            let config = RiskConfig::default();

            let set = IndicatorSet {
                eval_date: eval_date(),
                close: dec!(100),
                sma_short,
                sma_long,
                pct_change_1d,
                pct_change_5d,
                rsi: None,
                volatility,
                is_significant_move,
            };

            let assessment = classifier.classify(&set, &config);
            prop_assert!(!assessment.rationale.is_empty());
        }
    }
}
