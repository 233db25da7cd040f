use anyhow::Result;

use crate::reports::{AverageGrade, ProgramMetricsMap};

pub fn average_to_csv(course_code: Option<&str>, average: &AverageGrade) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["course_code", "average_grade"])?;
    writer.write_record([
        course_code.unwrap_or("*").to_string(),
        format!("{:.4}", average.average_grade),
    ])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn metrics_to_csv(metrics: &ProgramMetricsMap) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "program_code",
        "program_name",
        "total_enrollments",
        "average_grade",
        "failure_rate",
    ])?;
    for (code, m) in metrics {
        writer.write_record([
            code.clone(),
            m.program_name.clone(),
            m.total_enrollments.to_string(),
            format!("{:.4}", m.average_grade),
            format!("{:.4}", m.failure_rate),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
