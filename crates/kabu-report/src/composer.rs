//! 요약 작성기 (SummaryComposer).
//!
//! 지표 집합과 리스크 평가를 받아 단일 종목 요약 또는 시장
//! 다이제스트를 작성합니다. 순수한 텍스트 구성만 수행하며 I/O나
//! 외부 호출이 없습니다. `generated_at`을 제외한 모든 출력은
//! 동일 입력에 대해 바이트 단위로 동일합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use kabu_analytics::IndicatorSet;
use kabu_core::{IndicatorConfig, Stock};
use kabu_risk::{RationaleTag, RiskAssessment, RiskTier, Trend};

use crate::templates::{narrative, NarrativeContext};
use crate::types::{InsightLevel, Summary, SummarySubject};

/// 분석이 끝난 단일 종목 묶음.
#[derive(Debug, Clone)]
pub struct StockAnalysis {
    /// 종목 식별 정보
    pub stock: Stock,
    /// 평가일 지표 집합
    pub indicators: IndicatorSet,
    /// 리스크 평가
    pub assessment: RiskAssessment,
}

/// 요약 작성기.
///
/// 상태를 유지하지 않으며, 호출마다 새 `Summary`를 생성합니다.
#[derive(Debug, Default)]
pub struct SummaryComposer;

impl SummaryComposer {
    /// 새로운 요약 작성기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단일 종목 요약을 작성합니다.
    ///
    /// 내러티브는 (추세, 리스크 등급)에 대한 전수 `match`로 선택되므로
    /// 9가지 조합 전부가 빌드 시점에 보장됩니다.
    pub fn compose_stock(&self, analysis: &StockAnalysis, config: &IndicatorConfig) -> Summary {
        let indicators = &analysis.indicators;
        let assessment = &analysis.assessment;

        let change_text = fmt_opt_pct(indicators.pct_change_1d);
        let ctx = NarrativeContext {
            name: analysis.stock.name.clone(),
            change_text: change_text.clone(),
        };
        let story = narrative(assessment.trend, assessment.risk_tier, &ctx);

        let rationale_text = assessment
            .rationale
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let body = format!(
            "📊 {stock} 일일 분석 ({date})\n\n\
             종가: ¥{close} ({change})\n\
             {story}\n\n\
             추세: {trend} / 리스크 등급: {tier}\n\
             SMA{short_w}: {sma_short} / SMA{long_w}: {sma_long}\n\
             5일 변동률: {weekly} / RSI: {rsi} / 변동성: {volatility}\n\
             판단 근거: {rationale}",
            stock = analysis.stock,
            date = indicators.eval_date,
            close = format!("{:.2}", indicators.close.round_dp(2)),
            change = change_text,
            story = story,
            trend = trend_label(assessment.trend),
            tier = tier_label(assessment.risk_tier),
            short_w = config.sma_short_window,
            sma_short = fmt_opt_plain(indicators.sma_short),
            long_w = config.sma_long_window,
            sma_long = fmt_opt_plain(indicators.sma_long),
            weekly = fmt_opt_pct(indicators.pct_change_5d),
            rsi = fmt_opt_plain(indicators.rsi),
            volatility = fmt_opt_plain(indicators.volatility),
            rationale = rationale_text,
        );

        let mut facts = BTreeMap::new();
        facts.insert("close".to_string(), decimal_fact(Some(indicators.close)));
        facts.insert(
            "eval_date".to_string(),
            Value::String(indicators.eval_date.to_string()),
        );
        facts.insert(
            "sma_short_window".to_string(),
            Value::from(config.sma_short_window as u64),
        );
        facts.insert(
            "sma_long_window".to_string(),
            Value::from(config.sma_long_window as u64),
        );
        facts.insert(
            "pct_change_1d".to_string(),
            decimal_fact(indicators.pct_change_1d),
        );
        facts.insert(
            "pct_change_5d".to_string(),
            decimal_fact(indicators.pct_change_5d),
        );
        facts.insert("sma_short".to_string(), decimal_fact(indicators.sma_short));
        facts.insert("sma_long".to_string(), decimal_fact(indicators.sma_long));
        facts.insert("rsi".to_string(), decimal_fact(indicators.rsi));
        facts.insert(
            "volatility".to_string(),
            decimal_fact(indicators.volatility),
        );
        facts.insert(
            "is_significant_move".to_string(),
            Value::Bool(indicators.is_significant_move),
        );
        facts.insert(
            "trend".to_string(),
            Value::String(assessment.trend.to_string()),
        );
        facts.insert(
            "risk_tier".to_string(),
            Value::String(assessment.risk_tier.to_string()),
        );
        facts.insert(
            "rationale".to_string(),
            Value::Array(
                assessment
                    .rationale
                    .iter()
                    .map(|tag| Value::String(tag.to_string()))
                    .collect(),
            ),
        );

        let subject = SummarySubject::Stock {
            symbol: analysis.stock.symbol.clone(),
            name: analysis.stock.name.clone(),
        };

        let mut summary = Summary::new(subject, body, facts);
        self.add_stock_insights(&mut summary, analysis);
        summary.recommendations = self.stock_recommendations(analysis);

        tracing::info!(symbol = %analysis.stock.symbol, "단일 종목 요약 생성");
        summary
    }

    /// 시장 다이제스트를 작성합니다.
    ///
    /// 하이라이트는 |1일 변동률| 내림차순으로 정렬하고, 동률은 심볼
    /// 오름차순으로 깨며, 변동률 부재 종목은 마지막에 둡니다.
    pub fn compose_digest(&self, analyses: &[StockAnalysis]) -> Summary {
        let total = analyses.len();
        let advancers = count_trend(analyses, Trend::Up);
        let decliners = count_trend(analyses, Trend::Down);
        let sideways = count_trend(analyses, Trend::Sideways);

        let high_risk: Vec<&StockAnalysis> = analyses
            .iter()
            .filter(|a| a.assessment.risk_tier == RiskTier::High)
            .collect();

        let changes: Vec<Decimal> = analyses
            .iter()
            .filter_map(|a| a.indicators.pct_change_1d)
            .collect();
        let average_change = if changes.is_empty() {
            None
        } else {
            Some(changes.iter().sum::<Decimal>() / Decimal::from(changes.len()))
        };

        let digest_date = analyses.iter().map(|a| a.indicators.eval_date).max();

        let mut sorted: Vec<&StockAnalysis> = analyses.iter().collect();
        sorted.sort_by(|a, b| compare_highlights(a, b));

        let highlight_lines = if sorted.is_empty() {
            "해당 없음".to_string()
        } else {
            sorted
                .iter()
                .enumerate()
                .map(|(i, a)| {
                    format!(
                        "{}. {} {} [리스크 {}]",
                        i + 1,
                        a.stock,
                        fmt_opt_pct(a.indicators.pct_change_1d),
                        tier_label(a.assessment.risk_tier),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let high_risk_text = if high_risk.is_empty() {
            "없음".to_string()
        } else {
            format!(
                "{}개 ({})",
                high_risk.len(),
                high_risk
                    .iter()
                    .map(|a| a.stock.symbol.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        let body = format!(
            "📅 시장 일일 다이제스트 ({date})\n\n\
             분석 종목 {total}개: 상승 {advancers} · 하락 {decliners} · 보합 {sideways}\n\
             고위험 종목: {high_risk}\n\
             평균 일일 변동률: {average}\n\n\
             주요 변동:\n{highlights}",
            date = digest_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            total = total,
            advancers = advancers,
            decliners = decliners,
            sideways = sideways,
            high_risk = high_risk_text,
            average = fmt_opt_pct(average_change),
            highlights = highlight_lines,
        );

        let mut facts = BTreeMap::new();
        facts.insert("total".to_string(), Value::from(total as u64));
        facts.insert("advancers".to_string(), Value::from(advancers as u64));
        facts.insert("decliners".to_string(), Value::from(decliners as u64));
        facts.insert("sideways".to_string(), Value::from(sideways as u64));
        facts.insert(
            "high_risk_count".to_string(),
            Value::from(high_risk.len() as u64),
        );
        facts.insert(
            "high_risk_symbols".to_string(),
            Value::Array(
                high_risk
                    .iter()
                    .map(|a| Value::String(a.stock.symbol.clone()))
                    .collect(),
            ),
        );
        facts.insert("average_change".to_string(), decimal_fact(average_change));
        facts.insert(
            "digest_date".to_string(),
            digest_date
                .map(|d| Value::String(d.to_string()))
                .unwrap_or(Value::Null),
        );
        facts.insert(
            "highlights".to_string(),
            Value::Array(
                sorted
                    .iter()
                    .map(|a| {
                        let mut entry = serde_json::Map::new();
                        entry.insert(
                            "symbol".to_string(),
                            Value::String(a.stock.symbol.clone()),
                        );
                        entry.insert(
                            "pct_change_1d".to_string(),
                            decimal_fact(a.indicators.pct_change_1d),
                        );
                        entry.insert(
                            "risk_tier".to_string(),
                            Value::String(a.assessment.risk_tier.to_string()),
                        );
                        Value::Object(entry)
                    })
                    .collect(),
            ),
        );

        let subject = SummarySubject::MarketDigest {
            symbols: analyses.iter().map(|a| a.stock.symbol.clone()).collect(),
        };

        let mut summary = Summary::new(subject, body, facts);
        self.add_digest_insights(&mut summary, analyses, advancers, decliners, total);
        summary.recommendations =
            self.digest_recommendations(analyses, advancers, decliners, high_risk.len(), total);

        tracing::info!(total, advancers, decliners, "시장 다이제스트 생성");
        summary
    }

    fn add_stock_insights(&self, summary: &mut Summary, analysis: &StockAnalysis) {
        let indicators = &analysis.indicators;
        let symbol = analysis.stock.symbol.clone();

        if let Some(rsi) = indicators.rsi {
            if rsi > dec!(80) {
                summary.add_insight(
                    InsightLevel::Warning,
                    "과매수 구간",
                    format!("RSI {:.2}로 과매수 상태입니다.", rsi.round_dp(2)),
                    vec![symbol.clone()],
                );
            } else if rsi < dec!(20) {
                summary.add_insight(
                    InsightLevel::Info,
                    "과매도 구간",
                    format!("RSI {:.2}로 과매도 상태입니다.", rsi.round_dp(2)),
                    vec![symbol.clone()],
                );
            }
        }

        if let Some(change) = indicators.pct_change_1d {
            if change.abs() > dec!(10) {
                summary.add_insight(
                    InsightLevel::Critical,
                    "급격한 가격 변동",
                    format!(
                        "일일 변동 {}는 비정상적으로 큽니다. 원인 확인이 필요합니다.",
                        fmt_signed_pct(change)
                    ),
                    vec![symbol],
                );
            } else if indicators.is_significant_move {
                summary.add_insight(
                    InsightLevel::Warning,
                    "유의미한 가격 변동",
                    format!("일일 변동 {}가 임계값을 넘었습니다.", fmt_signed_pct(change)),
                    vec![symbol],
                );
            }
        }
    }

    fn stock_recommendations(&self, analysis: &StockAnalysis) -> Vec<String> {
        let mut recommendations = Vec::new();
        let indicators = &analysis.indicators;
        let assessment = &analysis.assessment;

        if assessment.risk_tier == RiskTier::High {
            recommendations
                .push("리스크 등급이 높습니다. 포지션 규모와 손절 기준을 점검하세요.".to_string());
        }

        if let Some(rsi) = indicators.rsi {
            if rsi > dec!(80) && assessment.trend == Trend::Up {
                recommendations.push("과매수 구간입니다. 차익 실현을 검토하세요.".to_string());
            } else if rsi < dec!(30) && assessment.trend == Trend::Down {
                recommendations
                    .push("과매도 구간입니다. 분할 매수 기회를 검토할 수 있습니다.".to_string());
            }
        }

        recommendations
    }

    fn add_digest_insights(
        &self,
        summary: &mut Summary,
        analyses: &[StockAnalysis],
        advancers: usize,
        decliners: usize,
        total: usize,
    ) {
        if total == 0 {
            return;
        }

        // 시장 폭(breadth): 70% 이상 상승/하락 시 인사이트
        if advancers * 10 >= total * 7 {
            summary.add_insight(
                InsightLevel::Info,
                "시장 강세",
                "분석 종목의 70% 이상이 상승 추세입니다.",
                symbols_with_trend(analyses, Trend::Up),
            );
        } else if decliners * 10 >= total * 7 {
            summary.add_insight(
                InsightLevel::Warning,
                "시장 약세",
                "분석 종목의 70% 이상이 하락 추세입니다.",
                symbols_with_trend(analyses, Trend::Down),
            );
        }

        let volatile: Vec<String> = analyses
            .iter()
            .filter(|a| {
                a.assessment
                    .rationale
                    .contains(&RationaleTag::ElevatedVolatility)
            })
            .map(|a| a.stock.symbol.clone())
            .collect();
        if !volatile.is_empty() {
            summary.add_insight(
                InsightLevel::Warning,
                "변동성 확대",
                format!("변동성이 확대된 종목: {}", volatile.join(", ")),
                volatile,
            );
        }
    }

    fn digest_recommendations(
        &self,
        _analyses: &[StockAnalysis],
        advancers: usize,
        decliners: usize,
        high_risk_count: usize,
        total: usize,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();
        if total == 0 {
            return recommendations;
        }

        if decliners > advancers {
            recommendations.push("시장이 약세 흐름입니다. 방어적 운용을 검토하세요.".to_string());
        }
        if high_risk_count * 10 > total * 3 {
            recommendations.push(
                "고위험 종목 비중이 30%를 넘습니다. 포트폴리오 리스크 관리를 점검하세요."
                    .to_string(),
            );
        }

        recommendations
    }
}

/// 하이라이트 정렬 비교자.
///
/// |1일 변동률| 내림차순 → 심볼 오름차순. 변동률 부재는 항상 마지막.
fn compare_highlights(a: &StockAnalysis, b: &StockAnalysis) -> Ordering {
    let magnitude_a = a.indicators.pct_change_1d.map(|p| p.abs());
    let magnitude_b = b.indicators.pct_change_1d.map(|p| p.abs());

    match (magnitude_a, magnitude_b) {
        (Some(x), Some(y)) => y
            .cmp(&x)
            .then_with(|| a.stock.symbol.cmp(&b.stock.symbol)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.stock.symbol.cmp(&b.stock.symbol),
    }
}

fn count_trend(analyses: &[StockAnalysis], trend: Trend) -> usize {
    analyses
        .iter()
        .filter(|a| a.assessment.trend == trend)
        .count()
}

fn symbols_with_trend(analyses: &[StockAnalysis], trend: Trend) -> Vec<String> {
    analyses
        .iter()
        .filter(|a| a.assessment.trend == trend)
        .map(|a| a.stock.symbol.clone())
        .collect()
}

/// 추세의 한국어 본문 표기.
///
/// 구조화 출력(`structured_facts`)은 기계 소비용 snake_case 표기를
/// 유지하고, 본문에만 이 표기를 사용합니다.
fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "상승",
        Trend::Down => "하락",
        Trend::Sideways => "보합",
    }
}

/// 리스크 등급의 한국어 본문 표기.
fn tier_label(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => "낮음",
        RiskTier::Medium => "중간",
        RiskTier::High => "높음",
    }
}

/// 부호가 붙은 변동률 서식 (예: "+1.23%", "-5.71%").
fn fmt_signed_pct(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded >= Decimal::ZERO {
        format!("+{:.2}%", rounded)
    } else {
        format!("{:.2}%", rounded)
    }
}

/// 부재 시 "데이터 부족"으로 대체하는 변동률 서식.
fn fmt_opt_pct(value: Option<Decimal>) -> String {
    value
        .map(fmt_signed_pct)
        .unwrap_or_else(|| "데이터 부족".to_string())
}

/// 부재 시 "데이터 부족"으로 대체하는 일반 수치 서식 (소수 둘째 자리).
fn fmt_opt_plain(value: Option<Decimal>) -> String {
    value
        .map(|d| format!("{:.2}", d.round_dp(2)))
        .unwrap_or_else(|| "데이터 부족".to_string())
}

/// 구조화 출력용 수치 변환 (소수 둘째 자리, 부재는 JSON null).
fn decimal_fact(value: Option<Decimal>) -> Value {
    match value {
        Some(d) => Value::String(format!("{:.2}", d.round_dp(2))),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn eval_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()
    }

    fn indicator_set(pct_change_1d: Option<Decimal>) -> IndicatorSet {
        IndicatorSet {
            eval_date: eval_date(),
            close: dec!(2450),
            sma_short: Some(dec!(2430.5)),
            sma_long: None,
            pct_change_1d,
            pct_change_5d: Some(dec!(1.8)),
            rsi: Some(dec!(55)),
            volatility: Some(dec!(2.1)),
            is_significant_move: false,
        }
    }

    fn assessment(trend: Trend, tier: RiskTier) -> RiskAssessment {
        RiskAssessment {
            trend,
            risk_tier: tier,
            rationale: vec![RationaleTag::TrendFromWeeklyChange],
        }
    }

    fn stock_analysis(
        symbol: &str,
        name: &str,
        pct_change_1d: Option<Decimal>,
        trend: Trend,
        tier: RiskTier,
    ) -> StockAnalysis {
        StockAnalysis {
            stock: Stock::new(symbol, name),
            indicators: indicator_set(pct_change_1d),
            assessment: assessment(trend, tier),
        }
    }

    #[test]
    fn test_stock_summary_mirrors_facts() {
        let composer = SummaryComposer::new();
        let analysis = stock_analysis(
            "7203.T",
            "토요타자동차",
            Some(dec!(-5.71)),
            Trend::Sideways,
            RiskTier::High,
        );

        let summary = composer.compose_stock(&analysis, &IndicatorConfig::default());

        // 본문에 쓰인 수치가 구조화 사본에 그대로 존재
        assert!(summary.body.contains("-5.71%"));
        assert_eq!(
            summary.structured_facts["pct_change_1d"],
            Value::String("-5.71".to_string())
        );
        assert_eq!(
            summary.structured_facts["close"],
            Value::String("2450.00".to_string())
        );
        assert_eq!(
            summary.structured_facts["sma_short_window"],
            Value::from(5u64)
        );
        assert_eq!(
            summary.structured_facts["sma_long_window"],
            Value::from(20u64)
        );
        assert_eq!(
            summary.structured_facts["trend"],
            Value::String("sideways".to_string())
        );
        assert_eq!(
            summary.structured_facts["risk_tier"],
            Value::String("high".to_string())
        );
        assert_eq!(summary.structured_facts["sma_long"], Value::Null);
    }

    #[test]
    fn test_body_uses_korean_labels() {
        let composer = SummaryComposer::new();
        let analysis = stock_analysis(
            "7203.T",
            "토요타자동차",
            Some(dec!(1.0)),
            Trend::Up,
            RiskTier::Medium,
        );

        let summary = composer.compose_stock(&analysis, &IndicatorConfig::default());

        assert!(summary.body.contains("추세: 상승"));
        assert!(summary.body.contains("리스크 등급: 중간"));
        // 구조화 출력은 기계 소비용 snake_case 표기 유지
        assert_eq!(
            summary.structured_facts["trend"],
            Value::String("up".to_string())
        );
        assert_eq!(
            summary.structured_facts["risk_tier"],
            Value::String("medium".to_string())
        );
    }

    #[test]
    fn test_numbers_padded_to_two_decimals() {
        let composer = SummaryComposer::new();
        let mut analysis = stock_analysis(
            "6758.T",
            "소니그룹",
            Some(dec!(2.4)),
            Trend::Up,
            RiskTier::Medium,
        );
        analysis.indicators.close = dec!(2450);
        analysis.indicators.volatility = Some(dec!(2));

        let summary = composer.compose_stock(&analysis, &IndicatorConfig::default());

        assert!(summary.body.contains("¥2450.00"));
        assert!(summary.body.contains("+2.40%"));
        assert!(summary.body.contains("변동성: 2.00"));
        assert_eq!(
            summary.structured_facts["pct_change_1d"],
            Value::String("2.40".to_string())
        );
        assert_eq!(
            summary.structured_facts["volatility"],
            Value::String("2.00".to_string())
        );
    }

    #[test]
    fn test_compose_idempotent_excluding_generated_at() {
        let composer = SummaryComposer::new();
        let analysis = stock_analysis(
            "6758.T",
            "소니그룹",
            Some(dec!(2.4)),
            Trend::Up,
            RiskTier::Medium,
        );
        let config = IndicatorConfig::default();

        let first = composer.compose_stock(&analysis, &config);
        let second = composer.compose_stock(&analysis, &config);

        assert_eq!(first.body, second.body);
        assert_eq!(first.structured_facts, second.structured_facts);
    }

    #[test]
    fn test_all_nine_combinations_compose() {
        let composer = SummaryComposer::new();
        let config = IndicatorConfig::default();

        for trend in [Trend::Up, Trend::Down, Trend::Sideways] {
            for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
                let analysis =
                    stock_analysis("7203.T", "토요타자동차", Some(dec!(1.0)), trend, tier);
                let summary = composer.compose_stock(&analysis, &config);
                assert!(!summary.body.is_empty());
            }
        }
    }

    #[test]
    fn test_digest_highlight_ordering() {
        // 스펙 예시: 변동률 [+5.0(A), -7.2(B), +1.0(C)] → 순서 B, A, C
        let composer = SummaryComposer::new();
        let analyses = vec![
            stock_analysis("A", "에이", Some(dec!(5.0)), Trend::Up, RiskTier::High),
            stock_analysis("B", "비", Some(dec!(-7.2)), Trend::Down, RiskTier::High),
            stock_analysis("C", "씨", Some(dec!(1.0)), Trend::Up, RiskTier::Low),
        ];

        let summary = composer.compose_digest(&analyses);

        let highlights = summary.structured_facts["highlights"].as_array().unwrap();
        let order: Vec<&str> = highlights
            .iter()
            .map(|entry| entry["symbol"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_digest_tie_broken_by_symbol() {
        let composer = SummaryComposer::new();
        let analyses = vec![
            stock_analysis("9984.T", "소프트뱅크그룹", Some(dec!(-3.0)), Trend::Down, RiskTier::Medium),
            stock_analysis("6758.T", "소니그룹", Some(dec!(3.0)), Trend::Up, RiskTier::Medium),
        ];

        let summary = composer.compose_digest(&analyses);

        let highlights = summary.structured_facts["highlights"].as_array().unwrap();
        let order: Vec<&str> = highlights
            .iter()
            .map(|entry| entry["symbol"].as_str().unwrap())
            .collect();
        // |±3.0| 동률 → 심볼 오름차순
        assert_eq!(order, vec!["6758.T", "9984.T"]);
    }

    #[test]
    fn test_digest_missing_change_sorts_last() {
        let composer = SummaryComposer::new();
        let analyses = vec![
            stock_analysis("A", "에이", None, Trend::Sideways, RiskTier::Low),
            stock_analysis("B", "비", Some(dec!(0.5)), Trend::Sideways, RiskTier::Low),
        ];

        let summary = composer.compose_digest(&analyses);

        let highlights = summary.structured_facts["highlights"].as_array().unwrap();
        assert_eq!(highlights[0]["symbol"].as_str().unwrap(), "B");
        assert_eq!(highlights[1]["symbol"].as_str().unwrap(), "A");
        assert_eq!(highlights[1]["pct_change_1d"], Value::Null);
    }

    #[test]
    fn test_digest_counts() {
        let composer = SummaryComposer::new();
        let analyses = vec![
            stock_analysis("A", "에이", Some(dec!(5.0)), Trend::Up, RiskTier::High),
            stock_analysis("B", "비", Some(dec!(-7.2)), Trend::Down, RiskTier::High),
            stock_analysis("C", "씨", Some(dec!(1.0)), Trend::Sideways, RiskTier::Low),
        ];

        let summary = composer.compose_digest(&analyses);

        assert_eq!(summary.structured_facts["total"], Value::from(3u64));
        assert_eq!(summary.structured_facts["advancers"], Value::from(1u64));
        assert_eq!(summary.structured_facts["decliners"], Value::from(1u64));
        assert_eq!(summary.structured_facts["sideways"], Value::from(1u64));
        assert_eq!(
            summary.structured_facts["high_risk_count"],
            Value::from(2u64)
        );
    }

    #[test]
    fn test_empty_digest() {
        let composer = SummaryComposer::new();
        let summary = composer.compose_digest(&[]);

        assert_eq!(summary.structured_facts["total"], Value::from(0u64));
        assert!(summary.body.contains("해당 없음"));
        assert!(summary.insights.is_empty());
        assert!(summary.recommendations.is_empty());
    }

    #[test]
    fn test_significant_move_insight() {
        let composer = SummaryComposer::new();
        let mut analysis = stock_analysis(
            "7203.T",
            "토요타자동차",
            Some(dec!(-5.71)),
            Trend::Down,
            RiskTier::High,
        );
        analysis.indicators.is_significant_move = true;

        let summary = composer.compose_stock(&analysis, &IndicatorConfig::default());

        assert!(summary.has_alerts());
        assert!(summary
            .recommendations
            .iter()
            .any(|r| r.contains("리스크 등급이 높습니다")));
    }
}
