//! One calendar day of imported sales activity.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// `YYYY-MM-DD`, kept as text; canonical form sorts chronologically.
    pub date: String,
    pub orders: u64,
    /// Goods value excluding shipping, VAT included.
    pub net_value: f64,
    pub shipping_cost: f64,
    /// Goods plus shipping, VAT included.
    pub total_value: f64,
}

/// Sort records ascending by date string. Stable, so same-day records keep input order.
pub fn sort_records(records: &mut [DailyRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date));
}

/// First and last date of a sorted record set.
pub fn date_span(records: &[DailyRecord]) -> Option<(String, String)> {
    let first = records.first()?;
    let last = records.last()?;
    Some((first.date.clone(), last.date.clone()))
}
