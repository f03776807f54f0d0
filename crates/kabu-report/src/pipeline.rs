//! 배치 분석 파이프라인.
//!
//! 시계열 → 지표 → 리스크 → 요약의 단계를 순서대로 잇습니다.
//! 다이제스트 작성 시 개별 종목의 실패는 전체 실행을 중단하지 않고
//! 해당 종목만 제외합니다.

use chrono::NaiveDate;

use kabu_analytics::IndicatorEngine;
use kabu_core::{analysis_span, AnalysisConfig, AnalysisResult, PriceSeries, Stock};
use kabu_risk::RiskClassifier;

use crate::composer::{StockAnalysis, SummaryComposer};
use crate::types::Summary;

/// 분석 파이프라인.
///
/// 설정을 한 번 검증해 보관하고, 이후 호출은 모두 순수 계산입니다.
#[derive(Debug)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    engine: IndicatorEngine,
    classifier: RiskClassifier,
    composer: SummaryComposer,
}

impl AnalysisPipeline {
    /// 설정을 검증하고 파이프라인을 생성합니다.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: IndicatorEngine::new(),
            classifier: RiskClassifier::new(),
            composer: SummaryComposer::new(),
        })
    }

    /// 현재 파이프라인 설정.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 단일 종목을 평가일 기준으로 분석합니다.
    ///
    /// 지표 계산이 실패하면 (평가일 부재, 비정상 가격) 에러를
    /// 그대로 전파합니다.
    pub fn analyze(
        &self,
        stock: &Stock,
        series: &PriceSeries,
        date: NaiveDate,
    ) -> AnalysisResult<StockAnalysis> {
        let span = analysis_span!("analyze", stock.symbol, date);
        let _guard = span.enter();

        let indicators = self.engine.evaluate(series, date, &self.config.indicators)?;
        let assessment = self.classifier.classify(&indicators, &self.config.risk);

        Ok(StockAnalysis {
            stock: stock.clone(),
            indicators,
            assessment,
        })
    }

    /// 단일 종목 요약을 생성합니다.
    pub fn stock_summary(
        &self,
        stock: &Stock,
        series: &PriceSeries,
        date: NaiveDate,
    ) -> AnalysisResult<Summary> {
        let analysis = self.analyze(stock, series, date)?;
        Ok(self
            .composer
            .compose_stock(&analysis, &self.config.indicators))
    }

    /// 종목 묶음에 대한 시장 다이제스트를 생성합니다.
    ///
    /// 각 종목은 자기 시계열의 마지막 관측일 기준으로 평가합니다.
    /// 실패한 종목은 경고 로그를 남기고 다이제스트에서 제외합니다.
    /// 모든 종목이 실패해도 빈 다이제스트를 반환합니다.
    pub fn daily_digest(&self, universe: &[(Stock, PriceSeries)]) -> Summary {
        let mut analyses = Vec::with_capacity(universe.len());

        for (stock, series) in universe {
            let last = match series.last() {
                Some(observation) => observation,
                None => {
                    tracing::warn!(
                        symbol = %stock.symbol,
                        "관측치가 없는 시계열, 다이제스트에서 제외"
                    );
                    continue;
                }
            };

            match self.analyze(stock, series, last.date) {
                Ok(analysis) => analyses.push(analysis),
                Err(error) => {
                    tracing::warn!(
                        symbol = %stock.symbol,
                        date = %last.date,
                        %error,
                        "종목 분석 실패, 다이제스트에서 제외"
                    );
                }
            }
        }

        self.composer.compose_digest(&analyses)
    }
}
