//! 종목 식별 정보.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 일본 주식 종목.
///
/// 심볼은 거래소 접미사를 포함한 코드 형식입니다.
/// 예: 도요타의 "7203.T", 소니의 "6758.T".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    /// 종목 코드 (예: "7203.T")
    pub symbol: String,
    /// 회사명
    pub name: String,
}

impl Stock {
    /// 새 종목을 생성합니다.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
