#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseMetrics {
    pub eps: f64,
    pub per: f64,
    pub pbv: f64,
    pub roe: f64,
    pub der: f64,
    pub dividend_yield: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanyProfile {
    pub ticker: &'static str,
    pub name: &'static str,
    pub base: BaseMetrics,
}

pub const KNOWN_COMPANIES: [CompanyProfile; 3] = [
    CompanyProfile {
        ticker: "BBCA",
        name: "PT Bank Central Asia Tbk",
        base: BaseMetrics {
            eps: 250.0,
            per: 24.5,
            pbv: 4.8,
            roe: 21.5,
            der: 1.2,
            dividend_yield: 2.1,
        },
    },
    CompanyProfile {
        ticker: "BBRI",
        name: "PT Bank Rakyat Indonesia Tbk",
        base: BaseMetrics {
            eps: 450.0,
            per: 15.2,
            pbv: 2.5,
            roe: 18.9,
            der: 1.5,
            dividend_yield: 3.5,
        },
    },
    CompanyProfile {
        ticker: "TLKM",
        name: "PT Telkom Indonesia Tbk",
        base: BaseMetrics {
            eps: 180.0,
            per: 18.1,
            pbv: 2.9,
            roe: 16.2,
            der: 0.8,
            dividend_yield: 4.2,
        },
    },
];

/// Profile used for any ticker not in [`KNOWN_COMPANIES`].
pub const DEFAULT_COMPANY: CompanyProfile = CompanyProfile {
    ticker: "DEFAULT",
    name: "PT Contoh Sejahtera Tbk",
    base: BaseMetrics {
        eps: 150.0,
        per: 20.0,
        pbv: 3.0,
        roe: 15.0,
        der: 1.0,
        dividend_yield: 3.0,
    },
};

pub fn lookup(ticker: &str) -> &'static CompanyProfile {
    let ticker = ticker.trim();
    KNOWN_COMPANIES
        .iter()
        .find(|c| c.ticker.eq_ignore_ascii_case(ticker))
        .unwrap_or(&DEFAULT_COMPANY)
}
