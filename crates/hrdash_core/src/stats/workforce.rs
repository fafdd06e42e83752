//! Headcount, payroll total and gender tally for the dashboard cards.

use crate::model::employee::Gender;
use crate::stats::salary::CompensationRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderTally {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkforceSummary {
    pub headcount: usize,
    /// Sum of salaries; a missing or non-finite salary contributes 0.
    pub payroll_total: f64,
    pub gender: GenderTally,
}

impl WorkforceSummary {
    pub fn from_records(records: &[CompensationRecord]) -> Self {
        let mut summary = Self {
            headcount: records.len(),
            ..Self::default()
        };
        for record in records {
            summary.payroll_total += record.salary.filter(|value| value.is_finite()).unwrap_or(0.0);
            match record.gender {
                Gender::Male => summary.gender.male += 1,
                Gender::Female => summary.gender.female += 1,
                Gender::Unspecified => {}
            }
        }
        summary
    }
}
