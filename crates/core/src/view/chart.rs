use crate::domain::market::{ChartPoint, Ohlc};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

const UP_COLOR: &str = "#48BB78";
const DOWN_COLOR: &str = "#F56565";
const RSI_COLOR: &str = "#319795";
const GRID_COLOR: &str = "#4A5568";
const AXIS_TEXT: &str = "#A0AEC0";

/// Candlestick panel over an RSI panel, sharing the date axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPanels {
    pub candles: Vec<Candle>,
    pub price_domain: (f64, f64),
    pub rsi: Vec<f64>,
    pub rsi_domain: (f64, f64),
    pub overbought: f64,
    pub oversold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub price: Ohlc,
    pub up: bool,
}

impl ChartPanels {
    pub fn from_points(points: &[ChartPoint]) -> Self {
        let min_low = points
            .iter()
            .map(|p| p.price.low)
            .fold(f64::INFINITY, f64::min);
        let max_high = points
            .iter()
            .map(|p| p.price.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let price_domain = if points.is_empty() {
            (0.0, 1.0)
        } else {
            (min_low * 0.98, max_high * 1.02)
        };

        Self {
            candles: points
                .iter()
                .map(|p| Candle {
                    date: p.date,
                    price: p.price,
                    up: p.price.is_up(),
                })
                .collect(),
            price_domain,
            rsi: points.iter().map(|p| p.rsi).collect(),
            rsi_domain: (0.0, 100.0),
            overbought: RSI_OVERBOUGHT,
            oversold: RSI_OVERSOLD,
        }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.candles.first().map(|c| c.date)
    }

    pub fn last(&self) -> Option<(&Candle, f64)> {
        Some((self.candles.last()?, *self.rsi.last()?))
    }

    /// Inline SVG: price panel on the top 70%, RSI band below.
    pub fn to_svg(&self, width: f64, height: f64) -> String {
        let pad = 8.0;
        let axis = 56.0;
        let plot_w = (width - pad - axis).max(1.0);
        let price_h = height * 0.7 - pad * 2.0;
        let rsi_top = height * 0.7 + pad;
        let rsi_h = height * 0.3 - pad * 2.0;

        let n = self.candles.len().max(1) as f64;
        let step = plot_w / n;
        let x_at = |i: usize| pad + step * (i as f64) + step / 2.0;
        let y_in = |v: f64, (lo, hi): (f64, f64), top: f64, h: f64| {
            let span = if hi > lo { hi - lo } else { 1.0 };
            top + h * (1.0 - (v - lo) / span)
        };
        let price_y = |v: f64| y_in(v, self.price_domain, pad, price_h);
        let rsi_y = |v: f64| y_in(v, self.rsi_domain, rsi_top, rsi_h);

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="100%" role="img" aria-label="Price and RSI chart">"#
        );

        // Gridlines and axis labels.
        for k in 0..=4 {
            let (lo, hi) = self.price_domain;
            let v = lo + (hi - lo) * (k as f64) / 4.0;
            let y = price_y(v);
            let _ = write!(
                svg,
                r#"<line x1="{pad}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{GRID_COLOR}" stroke-dasharray="3 3"/><text x="{:.1}" y="{:.1}" fill="{AXIS_TEXT}" font-size="11">{v:.0}</text>"#,
                pad + plot_w,
                pad + plot_w + 4.0,
                y + 4.0
            );
        }
        for v in [0.0, self.oversold, self.overbought, 100.0] {
            let y = rsi_y(v);
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" fill="{AXIS_TEXT}" font-size="11">{v:.0}</text>"#,
                pad + plot_w + 4.0,
                y + 4.0
            );
        }

        let body_w = (step * 0.6).max(1.0);
        for (i, c) in self.candles.iter().enumerate() {
            let x = x_at(i);
            let color = if c.up { UP_COLOR } else { DOWN_COLOR };
            let top = price_y(c.price.open.max(c.price.close));
            let bottom = price_y(c.price.open.min(c.price.close));
            let rsi = self.rsi.get(i).copied().unwrap_or_default();
            let _ = write!(
                svg,
                r#"<g><title>Date: {}&#10;Open: {}&#10;High: {}&#10;Low: {}&#10;Close: {}&#10;RSI: {}</title><line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{color}"/><rect x="{:.1}" y="{top:.1}" width="{body_w:.1}" height="{:.1}" fill="{color}"/></g>"#,
                c.date,
                c.price.open,
                c.price.high,
                c.price.low,
                c.price.close,
                rsi,
                price_y(c.price.high),
                price_y(c.price.low),
                x - body_w / 2.0,
                (bottom - top).max(1.0),
            );
        }

        for (level, color) in [(self.overbought, DOWN_COLOR), (self.oversold, UP_COLOR)] {
            let y = rsi_y(level);
            let _ = write!(
                svg,
                r#"<line x1="{pad}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}" stroke-dasharray="5 5"/>"#,
                pad + plot_w
            );
        }

        let points: Vec<String> = self
            .rsi
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.1},{:.1}", x_at(i), rsi_y(*v)))
            .collect();
        let _ = write!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="{RSI_COLOR}" stroke-width="1.5"/>"#,
            points.join(" ")
        );

        svg.push_str("</svg>");
        svg
    }
}
