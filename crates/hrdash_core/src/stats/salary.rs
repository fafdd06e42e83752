//! Per-department salary mean and population standard deviation.
//!
//! # Invariants
//! - Output has exactly one statistic per input department, in input order.
//! - Missing, non-finite and zero amounts are excluded from both the sum
//!   and the count.
//! - Mean is 0 for an empty sample; deviation is 0 for samples of size <= 1.

use crate::model::employee::Gender;
use crate::model::org::DepartmentId;
use serde::{Deserialize, Serialize};

/// One active employee's compensation as seen by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRecord {
    pub department_id: DepartmentId,
    pub department_name: Option<String>,
    pub salary: Option<f64>,
    pub gender: Gender,
}

/// Salary sample for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSalaries {
    pub name: String,
    pub salaries: Vec<Option<f64>>,
}

/// Derived statistic; recomputed on every request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStatistic {
    pub name: String,
    pub average: f64,
    pub standard_deviation: f64,
}

/// Computes one statistic per department.
pub fn aggregate_salaries(departments: &[DepartmentSalaries]) -> Vec<SalaryStatistic> {
    departments
        .iter()
        .map(|department| {
            let sample = qualifying(&department.salaries);
            SalaryStatistic {
                name: department.name.clone(),
                average: mean(&sample),
                standard_deviation: population_std_dev(&sample),
            }
        })
        .collect()
}

/// Groups records by department display name in first-seen order.
///
/// A record without a department name is filed under `Department {id}`.
/// Every record's department is present in the output even when none of
/// its salaries qualify.
pub fn group_by_department(records: &[CompensationRecord]) -> Vec<DepartmentSalaries> {
    let mut grouped: Vec<DepartmentSalaries> = Vec::new();

    for record in records {
        let name = record
            .department_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Department {}", record.department_id));

        match grouped.iter_mut().find(|group| group.name == name) {
            Some(group) => group.salaries.push(record.salary),
            None => grouped.push(DepartmentSalaries {
                name,
                salaries: vec![record.salary],
            }),
        }
    }

    grouped
}

/// Arithmetic mean; 0 for an empty sample.
pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Population standard deviation (divides by N); 0 when N <= 1.
pub fn population_std_dev(sample: &[f64]) -> f64 {
    if sample.len() <= 1 {
        return 0.0;
    }
    let average = mean(sample);
    let squared: f64 = sample.iter().map(|value| (value - average).powi(2)).sum();
    (squared / sample.len() as f64).sqrt()
}

fn qualifying(salaries: &[Option<f64>]) -> Vec<f64> {
    salaries
        .iter()
        .flatten()
        .copied()
        .filter(|value| value.is_finite() && *value != 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department(name: &str, salaries: &[Option<f64>]) -> DepartmentSalaries {
        DepartmentSalaries {
            name: name.to_string(),
            salaries: salaries.to_vec(),
        }
    }

    fn record(department_id: i64, name: Option<&str>, salary: Option<f64>) -> CompensationRecord {
        CompensationRecord {
            department_id,
            department_name: name.map(str::to_string),
            salary,
            gender: Gender::Unspecified,
        }
    }

    #[test]
    fn computes_mean_and_population_deviation() {
        let stats = aggregate_salaries(&[department(
            "Sales",
            &[Some(50_000.0), Some(60_000.0), Some(70_000.0)],
        )]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "Sales");
        assert!((stats[0].average - 60_000.0).abs() < 1e-9);
        assert!((stats[0].standard_deviation - 8_164.965_809).abs() < 1e-3);
    }

    #[test]
    fn single_value_has_zero_deviation() {
        let stats = aggregate_salaries(&[department("Legal", &[Some(42_000.0)])]);
        assert_eq!(stats[0].average, 42_000.0);
        assert_eq!(stats[0].standard_deviation, 0.0);
    }

    #[test]
    fn departments_without_qualifying_values_are_kept_and_zeroed() {
        let stats = aggregate_salaries(&[
            department("Empty", &[]),
            department("Unset", &[None, Some(0.0), Some(f64::NAN)]),
            department("Ops", &[Some(10.0), None, Some(30.0)]),
        ]);
        let names: Vec<&str> = stats.iter().map(|stat| stat.name.as_str()).collect();
        assert_eq!(names, vec!["Empty", "Unset", "Ops"]);
        assert_eq!(stats[0].average, 0.0);
        assert_eq!(stats[1].average, 0.0);
        assert_eq!(stats[1].standard_deviation, 0.0);
        assert_eq!(stats[2].average, 20.0);
        assert_eq!(stats[2].standard_deviation, 10.0);
    }

    #[test]
    fn grouping_keeps_first_seen_order_and_falls_back_to_id() {
        let groups = group_by_department(&[
            record(2, Some("Finance"), Some(10.0)),
            record(9, None, None),
            record(2, Some("Finance"), Some(20.0)),
            record(3, Some("  "), Some(5.0)),
        ]);
        let names: Vec<&str> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, vec!["Finance", "Department 9", "Department 3"]);
        assert_eq!(groups[0].salaries, vec![Some(10.0), Some(20.0)]);
        assert_eq!(groups[1].salaries, vec![None]);
    }
}
