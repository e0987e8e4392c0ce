use chrono::NaiveDateTime;
use serde::Serialize;

/// Read-time profit aggregation over the stored bills; nothing here is
/// persisted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub bills: Vec<ProfitLine>,
    pub total_sales: f64,
    pub total_tax: f64,
    pub total_cost: f64,
    pub total_profit: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLine {
    pub bill_number: i64,
    pub date: NaiveDateTime,
    pub grand_total: f64,
    pub tax: f64,
    /// Sum of cost snapshot times quantity over the bill's lines.
    pub cost: f64,
    pub profit: f64,
}
