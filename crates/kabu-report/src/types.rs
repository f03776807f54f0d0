//! 요약 타입 및 인사이트 정의.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use kabu_core::AnalysisResult;

/// 요약 대상.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummarySubject {
    /// 단일 종목 요약
    Stock { symbol: String, name: String },
    /// 시장 전체 다이제스트
    MarketDigest { symbols: Vec<String> },
}

/// 인사이트 중요도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    /// 정보성
    Info,
    /// 주의 필요
    Warning,
    /// 즉시 확인 필요
    Critical,
}

/// 개별 인사이트.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// 중요도
    pub level: InsightLevel,
    /// 짧은 제목
    pub title: String,
    /// 상세 설명
    pub description: String,
    /// 관련 종목 코드
    pub symbols: Vec<String>,
}

/// 렌더링된 요약.
///
/// `SummaryComposer` 호출당 한 번 생성되며 이후 변경되지 않습니다.
/// 저장과 전송은 외부 협력자의 책임입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// 고유 요약 ID
    pub id: String,
    /// 요약 대상
    pub subject: SummarySubject,
    /// 생성 시각 (파이프라인에서 유일하게 벽시계를 쓰는 값)
    pub generated_at: DateTime<Utc>,
    /// 렌더링된 본문
    pub body: String,
    /// 본문에 사용된 모든 수치의 구조화 사본 (지표명 → 값)
    pub structured_facts: BTreeMap<String, Value>,
    /// 생성된 인사이트
    pub insights: Vec<Insight>,
    /// 행동 권고 사항
    pub recommendations: Vec<String>,
}

impl Summary {
    /// 새 요약을 생성합니다.
    pub(crate) fn new(
        subject: SummarySubject,
        body: String,
        structured_facts: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject,
            generated_at: Utc::now(),
            body,
            structured_facts,
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// 인사이트를 추가합니다.
    pub fn add_insight(
        &mut self,
        level: InsightLevel,
        title: impl Into<String>,
        description: impl Into<String>,
        symbols: Vec<String>,
    ) {
        self.insights.push(Insight {
            level,
            title: title.into(),
            description: description.into(),
            symbols,
        });
    }

    /// Warning 이상의 인사이트가 있는지 확인합니다.
    pub fn has_alerts(&self) -> bool {
        self.insights
            .iter()
            .any(|insight| matches!(insight.level, InsightLevel::Warning | InsightLevel::Critical))
    }

    /// 요약 전체를 JSON 문자열로 직렬화합니다.
    ///
    /// 외부 협력자(파일 내보내기, 알림 전송)가 사용합니다.
    pub fn to_json(&self) -> AnalysisResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
