use crate::errors::ChartError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 图表时间范围
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RangeCode {
    #[default]
    OneDay,
    FiveDays,
    OneMonth,
    SixMonths,
    OneYear,
    Max,
}

impl RangeCode {
    pub const ALL: [RangeCode; 6] = [
        RangeCode::OneDay,
        RangeCode::FiveDays,
        RangeCode::OneMonth,
        RangeCode::SixMonths,
        RangeCode::OneYear,
        RangeCode::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeCode::OneDay => "1D",
            RangeCode::FiveDays => "5D",
            RangeCode::OneMonth => "1M",
            RangeCode::SixMonths => "6M",
            RangeCode::OneYear => "1Y",
            RangeCode::Max => "MAX",
        }
    }
}

impl fmt::Display for RangeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeCode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        RangeCode::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == code)
            .ok_or_else(|| ChartError::InvalidRange(s.to_string()))
    }
}

/// 标准化后的单个价格点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub time: String,
    pub price: Option<f64>,
}

/// 按时间升序排列的价格序列
pub type ChartSeries = Vec<PricePoint>;

/// Parse a provider close value into a price.
///
/// Providers send closes as JSON numbers, numeric strings or `null`. Anything that
/// is not a finite number (including the literal "NaN") becomes `None`.
pub fn parse_price(value: Option<&Value>) -> Option<f64> {
    let price = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("nan") {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    price.filter(|p| p.is_finite())
}
