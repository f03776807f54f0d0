//! 내러티브 템플릿.
//!
//! 단일 종목 내러티브는 (추세 × 리스크 등급)의 9가지 조합 전체를
//! `match`로 열거합니다. 컴파일러가 전수성을 검사하므로 누락된
//! 조합은 빌드 시점에 드러나며, 런타임 폴백이 존재하지 않습니다.

use kabu_risk::{RiskTier, Trend};

/// 내러티브에 삽입되는 서식화된 값.
#[derive(Debug, Clone)]
pub struct NarrativeContext {
    /// 회사명
    pub name: String,
    /// 서식화된 1일 변동률 (예: "+1.23%", "-5.71%", "데이터 부족")
    pub change_text: String,
}

/// (추세, 리스크 등급) 조합에 해당하는 내러티브 문장을 생성합니다.
pub fn narrative(trend: Trend, tier: RiskTier, ctx: &NarrativeContext) -> String {
    let name = &ctx.name;
    let change = &ctx.change_text;

    match (trend, tier) {
        (Trend::Up, RiskTier::Low) => format!(
            "{name}은(는) 상승 추세를 유지하고 있으며, 일일 변동({change})이 \
             완만하여 리스크는 낮은 수준입니다."
        ),
        (Trend::Up, RiskTier::Medium) => format!(
            "{name}은(는) 상승 추세이나 일일 변동({change})이 작지 않아 \
             중간 수준의 리스크가 있습니다."
        ),
        (Trend::Up, RiskTier::High) => format!(
            "{name}은(는) 상승 추세지만 급격한 일일 변동({change})이 나타나 \
             리스크가 높습니다. 변동 배경 확인이 필요합니다."
        ),
        (Trend::Down, RiskTier::Low) => format!(
            "{name}은(는) 하락 추세이지만 일일 변동({change})은 완만하여 \
             리스크는 낮은 수준입니다."
        ),
        (Trend::Down, RiskTier::Medium) => format!(
            "{name}은(는) 하락 추세가 이어지는 가운데 일일 변동({change})도 \
             커지고 있어 중간 수준의 리스크가 있습니다."
        ),
        (Trend::Down, RiskTier::High) => format!(
            "{name}은(는) 가파른 하락 변동({change})을 보이고 있어 리스크가 \
             높습니다. 보유 포지션 점검이 필요합니다."
        ),
        (Trend::Sideways, RiskTier::Low) => format!(
            "{name}은(는) 뚜렷한 방향성 없이 보합권에서 움직이고 있으며 \
             일일 변동({change}) 기준 리스크는 낮은 수준입니다."
        ),
        (Trend::Sideways, RiskTier::Medium) => format!(
            "{name}은(는) 보합권이지만 일일 변동({change})이 확대되고 있어 \
             중간 수준의 리스크가 있습니다."
        ),
        (Trend::Sideways, RiskTier::High) => format!(
            "{name}은(는) 방향성이 없는 가운데 급격한 변동({change})이 나타나 \
             리스크가 높습니다."
        ),
    }
}
