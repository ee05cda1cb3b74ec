use chrono::NaiveDate;
use serde::Serialize;

use super::Visit;

/// Sum of visit subtotals. An empty slice totals zero.
pub fn daily_total(visits: &[Visit]) -> f64 {
    visits.iter().fold(0.0, |total, visit| total + visit.subtotal)
}

/// All visits stamped with one calendar date, plus their total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLedger {
    #[serde(skip)]
    pub date: NaiveDate,
    #[serde(rename = "visitas")]
    pub visits: Vec<Visit>,
    #[serde(rename = "totalDia")]
    pub total: f64,
}

impl DailyLedger {
    pub fn from_visits(date: NaiveDate, visits: Vec<Visit>) -> Self {
        let total = daily_total(&visits);
        Self {
            date,
            visits,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
