use std::collections::BTreeMap;

use crate::error::{RecordsError, Result};
use crate::filters::NO_ENROLLMENTS_FOUND;
use crate::reports::{is_failing, ProgramGrade, ProgramMetrics};

pub type ProgramMetricsMap = BTreeMap<String, ProgramMetrics>;

#[derive(Debug, Default)]
struct Accumulator {
    name: Option<String>,
    total: usize,
    failures: usize,
    grade_sum: f64,
}

impl Accumulator {
    fn push(&mut self, row: &ProgramGrade) {
        // Codes are not unique in the store; keep the smallest name so the
        // result is independent of row order.
        match &self.name {
            Some(existing) if existing.as_str() <= row.program_name.as_str() => {}
            _ => self.name = Some(row.program_name.clone()),
        }
        self.total += 1;
        self.grade_sum += row.grade;
        if is_failing(row.grade) {
            self.failures += 1;
        }
    }

    fn finish(self) -> ProgramMetrics {
        let total = self.total as f64;
        ProgramMetrics {
            program_name: self.name.unwrap_or_default(),
            average_grade: self.grade_sum / total,
            failure_rate: self.failures as f64 / total,
            total_enrollments: self.total,
        }
    }
}

/// Groups enrollment grades by program code.
///
/// Programs without enrollments never appear in the output. Fails with
/// not-found when there are no rows at all.
pub fn metrics_by_program(rows: &[ProgramGrade]) -> Result<ProgramMetricsMap> {
    if rows.is_empty() {
        return Err(RecordsError::not_found(NO_ENROLLMENTS_FOUND));
    }
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    for row in rows {
        groups.entry(row.program_code.clone()).or_default().push(row);
    }
    Ok(groups
        .into_iter()
        .map(|(code, acc)| (code, acc.finish()))
        .collect())
}
