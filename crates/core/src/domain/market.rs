use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalData {
    pub company_name: String,
    pub eps: f64,
    pub per: f64,
    pub pbv: f64,
    /// Percent.
    pub roe: f64,
    pub der: f64,
    /// Percent.
    pub dividend_yield: f64,
}

impl FundamentalData {
    /// Every field as `(name, value)` in declaration order, named the way the wire format names
    /// them.
    pub fn fields(&self) -> [(&'static str, String); 7] {
        [
            ("companyName", self.company_name.clone()),
            ("eps", self.eps.to_string()),
            ("per", self.per.to_string()),
            ("pbv", self.pbv.to_string()),
            ("roe", self.roe.to_string()),
            ("der", self.der.to_string()),
            ("dividendYield", self.dividend_yield.to_string()),
        ]
    }
}

/// Open/high/low/close, serialized as `[open, high, low, close]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

impl From<[f64; 4]> for Ohlc {
    fn from([open, high, low, close]: [f64; 4]) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }
}

impl From<Ohlc> for [f64; 4] {
    fn from(p: Ohlc) -> Self {
        [p.open, p.high, p.low, p.close]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub price: Ohlc,
    pub rsi: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_point_serializes_price_as_tuple() {
        let point = ChartPoint {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            price: Ohlc {
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
            },
            rsi: 55.0,
        };
        let v = serde_json::to_value(&point).unwrap();
        assert_eq!(
            v,
            json!({"date": "2026-10-19", "price": [1.0, 2.0, 0.5, 1.5], "rsi": 55.0})
        );
        let back: ChartPoint = serde_json::from_value(v).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn fundamentals_use_camel_case_keys() {
        let data = FundamentalData {
            company_name: "X".to_string(),
            eps: 1.0,
            per: 2.0,
            pbv: 3.0,
            roe: 4.0,
            der: 5.0,
            dividend_yield: 6.0,
        };
        let v = serde_json::to_value(&data).unwrap();
        assert_eq!(v["companyName"], "X");
        assert_eq!(v["dividendYield"], 6.0);
    }
}
