use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::reports::{AverageGrade, ProgramMetricsMap, FAILURE_THRESHOLD};

pub fn render_average_table(course_code: Option<&str>, average: &AverageGrade) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Course", "Average Grade"]);
    table.add_row(Row::from(vec![
        Cell::new(course_code.unwrap_or("all courses")),
        grade_cell(average.average_grade),
    ]));
    table.to_string()
}

pub fn render_metrics_table(metrics: &ProgramMetricsMap) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Program",
        "Name",
        "Enrollments",
        "Average Grade",
        "Failure Rate",
    ]);

    for (code, m) in metrics {
        table.add_row(Row::from(vec![
            Cell::new(code),
            Cell::new(&m.program_name),
            Cell::new(m.total_enrollments),
            grade_cell(m.average_grade),
            Cell::new(format!("{:.1}%", m.failure_rate * 100.0)),
        ]));
    }
    table.to_string()
}

fn grade_cell(grade: f64) -> Cell {
    let cell = Cell::new(format!("{grade:.2}"));
    if grade < FAILURE_THRESHOLD {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}

#[cfg(test)]
mod tests {
    use crate::reports::{ProgramMetrics, ProgramMetricsMap};

    use super::render_metrics_table;

    #[test]
    fn metrics_table_lists_each_program() {
        let mut metrics = ProgramMetricsMap::new();
        metrics.insert(
            "EMC".to_string(),
            ProgramMetrics {
                program_name: "Engenharia Mecânica".to_string(),
                average_grade: 6.0,
                failure_rate: 1.0 / 3.0,
                total_enrollments: 3,
            },
        );
        let rendered = render_metrics_table(&metrics);
        assert!(rendered.contains("EMC"));
        assert!(rendered.contains("33.3%"));
        assert!(rendered.contains("6.00"));
    }
}
