//! Required field catalogs
//!
//! Each catalog is the minimum schema contract for one table. The field
//! order is significant: verification reports missing fields in this order.

/// Named subset of a catalog, used for coverage display
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

/// Versioned list of fields a table is expected to carry
#[derive(Debug, Clone, Copy)]
pub struct FieldCatalog {
    pub name: &'static str,
    pub table: &'static str,
    pub version: u32,
    pub fields: &'static [&'static str],
    pub groups: &'static [FieldGroup],
}

impl FieldCatalog {
    /// Name and version, e.g. `financial indicators v1`
    pub fn label(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }
}

pub const INDICATOR_CATALOG: FieldCatalog = FieldCatalog {
    name: "financial indicators",
    table: "indicator_data",
    version: 1,
    fields: &[
        "code",
        "day",
        "eps",
        "roe",
        "roa",
        "roic",
        "gross_profit_margin",
        "net_profit_margin",
        "operating_profit_margin",
        "current_ratio",
        "quick_ratio",
        "debt_to_assets",
        "debt_to_equity",
        "inventory_turnover",
        "receivable_turnover",
        "total_assets_turnover",
        "inc_revenue_year_on_year",
        "inc_profit_year_on_year",
        "operating_cash_flow_per_share",
        "cash_flow_per_share",
        "book_to_market_ratio",
        "earnings_yield",
        "capitalization_ratio",
        "du_return_on_equity",
        "du_equity_multiplier",
    ],
    groups: &[
        FieldGroup {
            name: "basic",
            fields: &["code", "day"],
        },
        FieldGroup {
            name: "profitability",
            fields: &[
                "eps",
                "roe",
                "roa",
                "roic",
                "gross_profit_margin",
                "net_profit_margin",
                "operating_profit_margin",
            ],
        },
        FieldGroup {
            name: "solvency",
            fields: &["current_ratio", "quick_ratio", "debt_to_assets", "debt_to_equity"],
        },
        FieldGroup {
            name: "efficiency",
            fields: &["inventory_turnover", "receivable_turnover", "total_assets_turnover"],
        },
        FieldGroup {
            name: "growth",
            fields: &["inc_revenue_year_on_year", "inc_profit_year_on_year"],
        },
        FieldGroup {
            name: "cash flow",
            fields: &["operating_cash_flow_per_share", "cash_flow_per_share"],
        },
        FieldGroup {
            name: "valuation",
            fields: &["book_to_market_ratio", "earnings_yield", "capitalization_ratio"],
        },
        FieldGroup {
            name: "dupont",
            fields: &["du_return_on_equity", "du_equity_multiplier"],
        },
    ],
};

pub const PRICE_DATA_CATALOG: FieldCatalog = FieldCatalog {
    name: "daily prices",
    table: "price_data",
    version: 1,
    fields: &[
        "code",
        "day",
        "open",
        "close",
        "high",
        "low",
        "pre_close",
        "volume",
        "money",
        "factor",
        "high_limit",
        "low_limit",
        "avg",
        "paused",
        "adj_close",
        "adj_factor",
    ],
    groups: &[
        FieldGroup {
            name: "basic",
            fields: &["code", "day"],
        },
        FieldGroup {
            name: "price",
            fields: &["open", "close", "high", "low", "pre_close"],
        },
        FieldGroup {
            name: "turnover",
            fields: &["volume", "money"],
        },
        FieldGroup {
            name: "adjustment",
            fields: &["factor", "adj_close", "adj_factor"],
        },
        FieldGroup {
            name: "limits",
            fields: &["high_limit", "low_limit"],
        },
        FieldGroup {
            name: "other",
            fields: &["avg", "paused"],
        },
    ],
};
