//! Profitability metrics derived from one period's inputs.

use super::aggregate::AggregateInput;
use serde::Serialize;

/// Standard VAT rate (21%).
pub const DEFAULT_VAT_RATE: f64 = 0.21;

/// Share of VAT-exclusive revenue attributed to cost of goods.
const PRODUCT_COST_SHARE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsConfig {
    pub vat_rate: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub net_value_ex_vat: f64,
    pub product_cost: f64,
    pub total_fixed_costs: f64,
    /// Negative for a loss; never clamped.
    pub gross_profit: f64,
    pub vat_amount: f64,
    /// Percentage of VAT-exclusive revenue; negative for a loss.
    pub profit_margin: f64,
    pub average_order_value: f64,
}

impl DerivedMetrics {
    pub fn compute(input: &AggregateInput, config: &MetricsConfig) -> Self {
        let net_value_ex_vat = input.net_value_with_vat / (1.0 + config.vat_rate);
        let product_cost = net_value_ex_vat * PRODUCT_COST_SHARE;
        let total_fixed_costs = input.daily_fixed_expenses * input.days_count as f64;
        let gross_profit =
            net_value_ex_vat - input.marketing_cost - product_cost - total_fixed_costs;
        let vat_amount = input.net_value_with_vat - net_value_ex_vat;

        // Guarded on the VAT-inclusive value, divided by the VAT-exclusive one.
        let profit_margin = if input.net_value_with_vat > 0.0 {
            (gross_profit / net_value_ex_vat) * 100.0
        } else {
            0.0
        };

        let average_order_value = if input.orders_count > 0 {
            input.total_value_with_shipping / input.orders_count as f64
        } else {
            0.0
        };

        DerivedMetrics {
            net_value_ex_vat,
            product_cost,
            total_fixed_costs,
            gross_profit,
            vat_amount,
            profit_margin,
            average_order_value,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.gross_profit > 0.0
    }
}

/// Cost distribution of VAT-exclusive revenue, as charted next to the metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub product_cost: f64,
    pub marketing_cost: f64,
    pub fixed_costs: f64,
    /// Clamped at 0 so a loss does not produce a negative slice.
    pub gross_profit: f64,
}

impl CostBreakdown {
    pub fn from_metrics(input: &AggregateInput, metrics: &DerivedMetrics) -> Self {
        Self {
            product_cost: metrics.product_cost,
            marketing_cost: input.marketing_cost,
            fixed_costs: metrics.total_fixed_costs,
            gross_profit: metrics.gross_profit.max(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.product_cost + self.marketing_cost + self.fixed_costs + self.gross_profit
    }
}
