//! 설정 관리.
//!
//! 이 모듈은 분석 파이프라인 설정을 정의하고 관리합니다.
//! 모든 설정은 명시적인 값 객체로 각 컴포넌트 호출에 전달되며,
//! 전역 상태에서 읽지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};

/// 분석 파이프라인 전체 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// 지표 계산 설정
    #[serde(default)]
    pub indicators: IndicatorConfig,
    /// 리스크 분류 설정
    #[serde(default)]
    pub risk: RiskConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 지표 계산 설정.
///
/// 모든 필드에 serde 기본값이 있어 부분 설정(파일 일부 또는
/// 환경 변수 하나)만으로도 로드할 수 있습니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndicatorConfig {
    /// 단기 이동평균 기간 (관측치 개수)
    #[serde(default = "default_sma_short_window")]
    pub sma_short_window: usize,
    /// 장기 이동평균 기간 (관측치 개수)
    #[serde(default = "default_sma_long_window")]
    pub sma_long_window: usize,
    /// 유의미한 일일 변동 임계값 (%)
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: Decimal,
    /// RSI 기간
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    /// 변동성(일일 수익률 표준편차) 계산 기간
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,
}

fn default_sma_short_window() -> usize {
    5
}

fn default_sma_long_window() -> usize {
    20
}

fn default_significance_threshold() -> Decimal {
    Decimal::new(30, 1) // 3.0%
}

fn default_rsi_period() -> usize {
    14
}

fn default_volatility_window() -> usize {
    20
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short_window: default_sma_short_window(),
            sma_long_window: default_sma_long_window(),
            significance_threshold: default_significance_threshold(),
            rsi_period: default_rsi_period(),
            volatility_window: default_volatility_window(),
        }
    }
}

/// 리스크 분류 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskConfig {
    /// High 등급 일일 변동 임계값 (%)
    #[serde(default = "default_high_threshold")]
    pub high_threshold: Decimal,
    /// Medium 등급 일일 변동 임계값 (%)
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: Decimal,
    /// 추세 판정 시 보합(Sideways)으로 간주하는 괴리 밴드 (%)
    #[serde(default = "default_trend_epsilon")]
    pub trend_epsilon: Decimal,
    /// 변동성 경고 태그를 붙이는 임계값 (%)
    #[serde(default = "default_high_volatility_alert")]
    pub high_volatility_alert: Decimal,
}

fn default_high_threshold() -> Decimal {
    Decimal::new(50, 1) // 5.0%
}

fn default_medium_threshold() -> Decimal {
    Decimal::new(20, 1) // 2.0%
}

fn default_trend_epsilon() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}

fn default_high_volatility_alert() -> Decimal {
    Decimal::new(80, 1) // 8.0%
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            medium_threshold: default_medium_threshold(),
            trend_epsilon: default_trend_epsilon(),
            high_volatility_alert: default_high_volatility_alert(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AnalysisConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수는 `KABU` 접두사와 `__` 구분자를 사용합니다.
    /// 예: `KABU__INDICATORS__SMA_SHORT_WINDOW=10`
    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("KABU")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> AnalysisResult<Self> {
        Self::load("config/default.toml")
    }

    /// 설정 값의 일관성을 검증합니다.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.indicators.sma_short_window == 0 || self.indicators.sma_long_window == 0 {
            return Err(AnalysisError::Config(
                "이동평균 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.indicators.sma_short_window >= self.indicators.sma_long_window {
            return Err(AnalysisError::Config(format!(
                "단기 이동평균 기간({})은 장기 기간({})보다 짧아야 합니다",
                self.indicators.sma_short_window, self.indicators.sma_long_window
            )));
        }
        if self.indicators.rsi_period == 0 {
            return Err(AnalysisError::Config(
                "RSI 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.indicators.volatility_window < 2 {
            return Err(AnalysisError::Config(
                "변동성 계산 기간은 2 이상이어야 합니다".to_string(),
            ));
        }
        if self.indicators.significance_threshold <= Decimal::ZERO {
            return Err(AnalysisError::Config(
                "유의미 변동 임계값은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.risk.medium_threshold >= self.risk.high_threshold {
            return Err(AnalysisError::Config(format!(
                "Medium 임계값({})은 High 임계값({})보다 낮아야 합니다",
                self.risk.medium_threshold, self.risk.high_threshold
            )));
        }
        if self.risk.trend_epsilon < Decimal::ZERO {
            return Err(AnalysisError::Config(
                "추세 밴드는 음수일 수 없습니다".to_string(),
            ));
        }
        Ok(())
    }
}
