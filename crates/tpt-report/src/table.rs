//! Terminal rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tpt_core::{DashboardView, FilterOptions};
use tpt_model::{CountTable, MetricsBundle};

/// One decimal place, or `N/A` when the ratio is undefined.
///
/// # Examples
///
/// ```
/// use tpt_report::format_percent;
///
/// assert_eq!(format_percent(Some(50.0)), "50.0%");
/// assert_eq!(format_percent(None), "N/A");
/// ```
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) => format!("{value:.1}%"),
        None => "N/A".to_string(),
    }
}

/// Render a dashboard view; the empty state is a single explicit line.
pub fn render_view(view: &DashboardView) -> String {
    match view {
        DashboardView::Empty => "No records match the current filters.".to_string(),
        DashboardView::Ready(bundle) => render_tables(bundle),
    }
}

/// Headline numbers followed by every grouped table.
pub fn render_tables(metrics: &MetricsBundle) -> String {
    let mut sections = vec![headline_table(metrics).to_string()];

    let grouped: [(&str, &str, &CountTable); 8] = [
        ("Enrollments by year", "Year", &metrics.by_year),
        ("Enrollments by quarter", "Quarter", &metrics.by_quarter),
        ("Enrollments by region", "Region", &metrics.by_region),
        ("Enrollments by sex", "Sex", &metrics.by_sex),
        ("Enrollments by age group", "Age group", &metrics.by_age_group),
        ("Enrollments by detailed age group", "Age group", &metrics.by_age_group_detail),
        ("Enrollments by regimen", "Regimen", &metrics.by_regimen),
        ("HIV status", "HIV", &metrics.by_hiv),
    ];
    for (title, key_header, table) in grouped {
        sections.push(titled(title, &count_table(key_header, table)));
    }
    sections.push(titled("Facility ranking", &facility_table(metrics)));
    sections.push(titled("Sex by region", &region_sex_table(metrics)));
    sections.push(titled(
        "Treatment outcome (outcome cohort)",
        &count_table("Outcome", &metrics.by_outcome),
    ));
    sections.join("\n\n")
}

/// Filter choices available for a snapshot.
pub fn render_options(options: &FilterOptions, facilities: &[String]) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Options")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Region"), Cell::new(options.regions.join(", "))]);
    table.add_row(vec![Cell::new("Facility"), Cell::new(facilities.join(", "))]);
    let years: Vec<String> = options.years.iter().map(i32::to_string).collect();
    table.add_row(vec![Cell::new("Year"), Cell::new(years.join(", "))]);
    let age = options
        .age
        .map_or_else(|| "-".to_string(), |range| format!("{}-{}", range.min, range.max));
    table.add_row(vec![Cell::new("Age"), Cell::new(age)]);
    let sexes: Vec<&str> = options.sexes.iter().map(|sex| sex.label()).collect();
    table.add_row(vec![Cell::new("Sex"), Cell::new(sexes.join(", "))]);
    table.add_row(vec![Cell::new("Regimen"), Cell::new(options.regimens.join(", "))]);
    table.to_string()
}

fn headline_table(metrics: &MetricsBundle) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let coverage = &metrics.hiv_coverage;
    let tsr = &metrics.treatment_success;
    table.add_row(vec![
        Cell::new("Enrolled"),
        Cell::new(metrics.total_cases).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new(format!(
            "HIV testing coverage ({} known / {} unknown)",
            coverage.known, coverage.unknown
        )),
        percent_cell(coverage.percent),
    ]);
    table.add_row(vec![
        Cell::new("Outcome cohort"),
        Cell::new(metrics.outcome_cases),
    ]);
    table.add_row(vec![
        Cell::new(format!(
            "Treatment success rate ({} success / {} not success)",
            tsr.success, tsr.not_success
        )),
        percent_cell(tsr.percent),
    ]);
    table
}

fn count_table(key_header: &str, counts: &CountTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(key_header), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in &counts.rows {
        table.add_row(vec![Cell::new(&row.key), Cell::new(row.count)]);
    }
    if counts.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell(0)]);
    }
    table
}

fn facility_table(metrics: &MetricsBundle) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sr."),
        header_cell("Facility"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &metrics.by_facility.rows {
        table.add_row(vec![
            dim_cell(row.serial),
            Cell::new(&row.key),
            Cell::new(row.count),
        ]);
    }
    table
}

fn region_sex_table(metrics: &MetricsBundle) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Sex"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &metrics.by_region_sex {
        table.add_row(vec![
            Cell::new(&row.group),
            Cell::new(&row.key),
            Cell::new(row.count),
        ]);
    }
    table
}

fn titled(title: &str, table: &Table) -> String {
    format!("{title}\n{table}")
}

fn percent_cell(percent: Option<f64>) -> Cell {
    match percent {
        Some(_) => Cell::new(format_percent(percent))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell(format_percent(percent)),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
