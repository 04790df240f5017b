use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    compatibility::{Matrix, PairRecord, Service, TechnicalRequirements},
    dataset::Metadata,
    estimator::{Bounds, EstimateResult},
    quantity::currency::Pounds,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_metadata_table(metadata: &Metadata) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Dataset", ""]);
    for (label, value) in [
        ("Title", metadata.title()),
        ("Version", metadata.version()),
        ("Source", metadata.source()),
        ("Date", metadata.date()),
    ] {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            value.map_or_else(|| Cell::new("—").add_attribute(Attribute::Dim), Cell::new),
        ]);
    }
    table
}

#[must_use]
pub fn build_services_table(services: &[Service]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Service", "Abbreviation"]);
    for service in services {
        table.add_row(vec![
            Cell::new(service.id).add_attribute(Attribute::Dim).set_alignment(CellAlignment::Right),
            Cell::new(&service.name),
            Cell::new(service.abbreviation.as_deref().unwrap_or_default()),
        ]);
    }
    table
}

/// One row per pair and mode, with the explanation from the dataset.
#[must_use]
pub fn build_records_table(records: &[PairRecord<'_>]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Service A", "Service B", "Mode", "Status", "Explanation"]);
    for record in records {
        let status = record.record.status;
        table.add_row(vec![
            Cell::new(record.first),
            Cell::new(record.second),
            Cell::new(record.mode),
            Cell::new(format!("{} {status}", status.badge())).fg(status.color()),
            Cell::new(record.record.explanation.as_deref().unwrap_or_default())
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[must_use]
pub fn build_matrix_table(matrix: &Matrix<'_>) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new(matrix.mode).add_attribute(Attribute::Bold)];
    header.extend(matrix.services.iter().map(|service| Cell::new(label_of(service))));
    table.set_header(header);
    for (service, row) in matrix.services.iter().zip(&matrix.cells) {
        let mut cells = vec![Cell::new(label_of(service)).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|record| {
            Cell::new(record.status.badge()).set_alignment(CellAlignment::Center)
        }));
        table.add_row(cells);
    }
    table
}

#[must_use]
pub fn build_requirements_table(service: &Service, requirements: &TechnicalRequirements) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(label_of(service)).add_attribute(Attribute::Bold),
        Cell::new("Requirement"),
        Cell::new("Value"),
    ]);
    for field in requirements.iter() {
        table.add_row(vec![
            Cell::new(field.category.as_deref().unwrap_or_default()).add_attribute(Attribute::Dim),
            Cell::new(&field.name),
            Cell::new(&field.value),
        ]);
    }
    table
}

#[must_use]
pub fn build_estimate_table(result: &EstimateResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Low", "High"]);
    add_money_row(&mut table, "Annual cost savings", result.cost_savings);
    if let Some(incentives) = result.incentives {
        add_money_row(&mut table, "Annual incentives", incentives);
        add_money_row(&mut table, "Total value", result.total_value());
    }
    if let Some(co2_savings) = result.co2_savings {
        table.add_row(vec![
            Cell::new("Annual CO₂ savings"),
            Cell::new(format!("{} ({:.1} t)", co2_savings.low, co2_savings.low.to_tonnes()))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{} ({:.1} t)", co2_savings.high, co2_savings.high.to_tonnes()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn add_money_row(table: &mut Table, label: &str, bounds: Bounds<Pounds>) {
    let color_of = |value: Pounds| if value < Pounds::ZERO { Color::Red } else { Color::Green };
    table.add_row(vec![
        Cell::new(label),
        Cell::new(bounds.low).set_alignment(CellAlignment::Right).fg(color_of(bounds.low)),
        Cell::new(bounds.high).set_alignment(CellAlignment::Right).fg(color_of(bounds.high)),
    ]);
}

fn label_of(service: &Service) -> &str {
    service.abbreviation.as_deref().unwrap_or(&service.name)
}
