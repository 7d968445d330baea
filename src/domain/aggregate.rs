//! Period inputs and range aggregation over imported daily records.

use crate::domain::daily_record::DailyRecord;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rolled-up figures for one period, the unit the metrics are derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateInput {
    pub orders_count: u64,
    pub net_value_with_vat: f64,
    pub shipping_cost: f64,
    pub total_value_with_shipping: f64,
    pub marketing_cost: f64,
    pub daily_fixed_expenses: f64,
    /// Always >= 1.
    pub days_count: u64,
}

impl Default for AggregateInput {
    fn default() -> Self {
        Self {
            orders_count: 0,
            net_value_with_vat: 0.0,
            shipping_cost: 0.0,
            total_value_with_shipping: 0.0,
            marketing_cost: 0.0,
            daily_fixed_expenses: 0.0,
            days_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    OrdersCount,
    NetValueWithVat,
    ShippingCost,
    TotalValueWithShipping,
    MarketingCost,
    DailyFixedExpenses,
    DaysCount,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::OrdersCount,
        InputField::NetValueWithVat,
        InputField::ShippingCost,
        InputField::TotalValueWithShipping,
        InputField::MarketingCost,
        InputField::DailyFixedExpenses,
        InputField::DaysCount,
    ];

    /// Accepts both `ordersCount` and `orders_count` spellings.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ordersCount" | "orders_count" => Some(Self::OrdersCount),
            "netValueWithVat" | "net_value_with_vat" => Some(Self::NetValueWithVat),
            "shippingCost" | "shipping_cost" => Some(Self::ShippingCost),
            "totalValueWithShipping" | "total_value_with_shipping" => {
                Some(Self::TotalValueWithShipping)
            }
            "marketingCost" | "marketing_cost" => Some(Self::MarketingCost),
            "dailyFixedExpenses" | "daily_fixed_expenses" => Some(Self::DailyFixedExpenses),
            "daysCount" | "days_count" => Some(Self::DaysCount),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::OrdersCount => "orders_count",
            Self::NetValueWithVat => "net_value_with_vat",
            Self::ShippingCost => "shipping_cost",
            Self::TotalValueWithShipping => "total_value_with_shipping",
            Self::MarketingCost => "marketing_cost",
            Self::DailyFixedExpenses => "daily_fixed_expenses",
            Self::DaysCount => "days_count",
        }
    }
}

impl AggregateInput {
    /// Set one field from a raw numeric entry. Negative or non-finite values
    /// become 0, counts are truncated, and `days_count` never drops below 1.
    pub fn set(&mut self, field: InputField, value: f64) {
        let value = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        match field {
            InputField::OrdersCount => self.orders_count = value.trunc() as u64,
            InputField::NetValueWithVat => self.net_value_with_vat = value,
            InputField::ShippingCost => self.shipping_cost = value,
            InputField::TotalValueWithShipping => self.total_value_with_shipping = value,
            InputField::MarketingCost => self.marketing_cost = value,
            InputField::DailyFixedExpenses => self.daily_fixed_expenses = value,
            InputField::DaysCount => self.days_count = (value.trunc() as u64).max(1),
        }
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::OrdersCount => self.orders_count as f64,
            InputField::NetValueWithVat => self.net_value_with_vat,
            InputField::ShippingCost => self.shipping_cost,
            InputField::TotalValueWithShipping => self.total_value_with_shipping,
            InputField::MarketingCost => self.marketing_cost,
            InputField::DailyFixedExpenses => self.daily_fixed_expenses,
            InputField::DaysCount => self.days_count as f64,
        }
    }

    /// Overwrite the imported fields and day count; manual costs are kept.
    pub fn apply_totals(&mut self, totals: &RangeTotals) {
        self.orders_count = totals.orders_count;
        self.net_value_with_vat = totals.net_value_with_vat;
        self.shipping_cost = totals.shipping_cost;
        self.total_value_with_shipping = totals.total_value_with_shipping;
        self.days_count = totals.days_count;
    }
}

/// Sums of the imported fields over a date window.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTotals {
    pub orders_count: u64,
    pub net_value_with_vat: f64,
    pub shipping_cost: f64,
    pub total_value_with_shipping: f64,
    pub days_count: u64,
}

impl RangeTotals {
    pub fn empty() -> Self {
        Self {
            orders_count: 0,
            net_value_with_vat: 0.0,
            shipping_cost: 0.0,
            total_value_with_shipping: 0.0,
            days_count: 1,
        }
    }

    fn add(&mut self, record: &DailyRecord) {
        self.orders_count = self.orders_count.saturating_add(record.orders);
        self.net_value_with_vat += record.net_value;
        self.shipping_cost += record.shipping_cost;
        self.total_value_with_shipping += record.total_value;
    }
}

/// Inclusive calendar-day count between two `YYYY-MM-DD` dates, in either order.
pub fn days_in_range(start: &str, end: &str) -> Option<u64> {
    let start = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).ok()?;
    let end = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT).ok()?;
    Some((end - start).num_days().unsigned_abs() + 1)
}

/// Sum every record dated within `[start, end]` (string comparison, inclusive).
///
/// `records` should be sorted by date. A reversed range or a bound that is not
/// a calendar date yields [`RangeTotals::empty`] rather than an error.
pub fn aggregate(records: &[DailyRecord], start: &str, end: &str) -> RangeTotals {
    if start > end {
        warn!(start, end, "range start is after end, using empty selection");
        return RangeTotals::empty();
    }
    let Some(days_count) = days_in_range(start, end) else {
        warn!(start, end, "range bound is not a calendar date, using empty selection");
        return RangeTotals::empty();
    };

    let mut totals = RangeTotals {
        days_count,
        ..RangeTotals::empty()
    };
    for record in records
        .iter()
        .filter(|r| r.date.as_str() >= start && r.date.as_str() <= end)
    {
        totals.add(record);
    }
    totals
}
