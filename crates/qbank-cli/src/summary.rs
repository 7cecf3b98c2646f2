use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width,
};

use qbank_model::QuestionRecord;
use qbank_validate::{FieldRef, SetReport, ValidationIssue};

/// Print the set overview, per-record table, and issue table.
pub fn print_report(records: &[QuestionRecord], report: &SetReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("ID"),
        header_cell("Kind"),
        header_cell("Prompt"),
        header_cell("Issues"),
    ]);
    apply_record_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (index, record) in records.iter().enumerate() {
        let issues = report
            .records
            .iter()
            .find(|entry| entry.record_id == record.id)
            .map_or(0, |entry| entry.issues.len());
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(record.id.as_str()),
            Cell::new(record.body.kind().as_str()),
            prompt_cell(&record.prompt),
            count_cell(issues),
        ]);
    }
    println!("{table}");
    print_issue_table(report);
}

fn print_issue_table(report: &SetReport) {
    let mut rows: Vec<(String, &ValidationIssue)> = Vec::new();
    for issue in &report.metadata_issues {
        rows.push(("metadata".to_string(), issue));
    }
    for issue in &report.set_issues {
        rows.push(("set".to_string(), issue));
    }
    for record in &report.records {
        for issue in &record.issues {
            rows.push((record.record_id.as_str().to_string(), issue));
        }
    }
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Field"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    for (record, issue) in rows {
        table.add_row(vec![
            Cell::new(record),
            Cell::new(field_label(issue.field)),
            Cell::new(issue.code.clone()).fg(comfy_table::Color::Red),
            Cell::new(issue.message.clone()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn field_label(field: FieldRef) -> String {
    match field {
        FieldRef::Prompt => "prompt".to_string(),
        FieldRef::Options => "options".to_string(),
        FieldRef::Option(index) => format!("option {}", index + 1),
        FieldRef::Answer => "answer".to_string(),
        FieldRef::Rank(index) => format!("rank {}", index + 1),
        FieldRef::Subject => "subject".to_string(),
        FieldRef::Grade => "grade".to_string(),
        FieldRef::Questions => "questions".to_string(),
    }
}

fn apply_record_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(3)),
        ColumnConstraint::UpperBoundary(Width::Fixed(12)),
        ColumnConstraint::UpperBoundary(Width::Fixed(14)),
        ColumnConstraint::UpperBoundary(Width::Percentage(55)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
    ]);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(12)),
        ColumnConstraint::UpperBoundary(Width::Fixed(12)),
        ColumnConstraint::UpperBoundary(Width::Fixed(22)),
        ColumnConstraint::UpperBoundary(Width::Percentage(55)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn prompt_cell(prompt: &str) -> Cell {
    if prompt.trim().is_empty() {
        dim_cell("(empty)")
    } else {
        Cell::new(prompt)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(comfy_table::Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(comfy_table::Color::DarkGrey)
}
