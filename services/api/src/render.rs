use crate::infra::parse_assignment;
use clap::Args;
use spa_forecast::assumptions::{
    AssumptionEditor, AssumptionPatch, AssumptionRecord, FixedExpenseItem, StaffRole,
};
use spa_forecast::catalog::{PackageTier, ServiceCatalog};
use spa_forecast::error::AppError;
use spa_forecast::format::{format_currency, format_number, format_percent};
use spa_forecast::http::ProjectionResponse;
use spa_forecast::projection::{ProjectionEngine, ProjectionResult};
use spa_forecast::reference::{ConsumableLine, ReferenceTables, ReferenceValue};
use spa_forecast::report::{ProjectionSummary, ResultPeriod};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct ProjectArgs {
    /// JSON file with assumptions; missing fields fall back to the defaults
    #[arg(long)]
    pub(crate) assumptions: Option<PathBuf>,
    /// Service catalog CSV (id,name,duration,full,p5,p10,p20)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Headline period for the summary cards
    #[arg(long, default_value = "monthly")]
    pub(crate) period: ResultPeriod,
    /// Manual ticket price for a service, as ID=PRICE (repeatable)
    #[arg(long = "override", value_parser = parse_assignment)]
    pub(crate) overrides: Vec<(String, String)>,
    /// Drop the manual ticket price for a service (repeatable)
    #[arg(long = "clear-override")]
    pub(crate) clear_overrides: Vec<String>,
    /// Service share of volume in percent, as ID=PCT (repeatable)
    #[arg(long = "service-mix", value_parser = parse_assignment)]
    pub(crate) service_mix: Vec<(String, String)>,
    /// Print the assumptions, result and summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TablesArgs {
    /// Service catalog CSV used for the price table
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_project(args: ProjectArgs) -> Result<(), AppError> {
    let engine = ProjectionEngine::new(ServiceCatalog::load(args.catalog.as_deref())?);
    let working = match args.assumptions.as_deref() {
        Some(path) => engine.resolve(read_assumptions(path)?),
        None => engine.baseline(),
    };

    let mut editor =
        AssumptionEditor::with_assumptions(engine.catalog(), engine.baseline(), working);
    apply_edits(&mut editor, &args)?;
    let assumptions = editor.into_assumptions();

    let result = engine.compute(&assumptions);
    let summary = ProjectionSummary::new(&result, args.period);

    if args.json {
        let response = ProjectionResponse {
            period: args.period,
            assumptions,
            result,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let report = render_projection(engine.catalog(), &assumptions, &result, &summary);
        println!("{report}");
    }
    Ok(())
}

pub(crate) fn run_tables(args: TablesArgs) -> Result<(), AppError> {
    let catalog = ServiceCatalog::load(args.catalog.as_deref())?;
    println!("{}", render_tables(&ReferenceTables::for_catalog(&catalog)));
    Ok(())
}

fn read_assumptions(path: &Path) -> Result<AssumptionPatch, AppError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

/// Overrides are committed before clears so a clear always wins for the same service.
fn apply_edits(editor: &mut AssumptionEditor, args: &ProjectArgs) -> Result<(), AppError> {
    for (id, pct) in &args.service_mix {
        editor.commit_service_mix(id, pct)?;
    }
    for (id, price) in &args.overrides {
        editor.commit_ticket_override(id, price)?;
    }
    for id in &args.clear_overrides {
        editor.commit_ticket_override(id, "")?;
    }
    Ok(())
}

fn render_projection(
    catalog: &ServiceCatalog,
    assumptions: &AssumptionRecord,
    result: &ProjectionResult,
    summary: &ProjectionSummary,
) -> String {
    let mut lines = vec!["Spa projection".to_string()];

    for card in summary.cards() {
        lines.push(String::new());
        lines.push(format!("{}: {}", card.title, card.headline));
        for detail in &card.details {
            lines.push(format!("  {}: {}", detail.label, detail.value));
        }
    }

    if !summary.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &summary.warnings {
            lines.push(format!("- {warning}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Sessions: {} gross, {} net",
        format_number(result.gross_sessions),
        format_number(result.net_sessions)
    ));

    lines.push(String::new());
    lines.push("Average ticket by service".to_string());
    for price in &result.avg_price_by_service {
        let name = catalog
            .get(&price.id)
            .map(|entry| entry.display_name())
            .unwrap_or_else(|| price.id.to_string());
        let marker = if price.is_override { " (manual)" } else { "" };
        lines.push(format!(
            "- {}: {}{}",
            name,
            format_currency(price.avg_price),
            marker
        ));
    }

    lines.push(String::new());
    lines.push("Team".to_string());
    for role in StaffRole::ordered() {
        let line = assumptions.staff.get(role);
        lines.push(format!(
            "- {}: {} x {}",
            role.label(),
            format_number(line.qty),
            format_currency(line.salary)
        ));
    }

    lines.push(String::new());
    lines.push("Fixed expenses".to_string());
    for item in FixedExpenseItem::ordered() {
        lines.push(format!(
            "- {}: {}",
            item.label(),
            format_currency(assumptions.fixed_expenses.get(item))
        ));
    }

    lines.push(String::new());
    lines.push("Blended list price by package".to_string());
    for tier in PackageTier::ordered() {
        lines.push(format!(
            "- {}: {}",
            tier.label(),
            format_currency(result.avg_price_by_package.price(tier))
        ));
    }
    lines.push(format!(
        "Overall average ticket: {}",
        format_currency(result.avg_price_overall)
    ));

    lines.join("\n")
}

fn render_tables(tables: &ReferenceTables) -> String {
    let mut lines = vec!["Service prices".to_string()];
    for row in &tables.service_prices {
        lines.push(format!(
            "- {} {}: {} | {} | {} | {}",
            row.service,
            row.duration,
            format_currency(row.prices.full),
            format_currency(row.prices.p5),
            format_currency(row.prices.p10),
            format_currency(row.prices.p20)
        ));
    }

    lines.push(String::new());
    lines.push("Volume and performance".to_string());
    for metric in &tables.volume_performance {
        let value = if metric.is_percent() {
            format_percent(metric.value)
        } else {
            format!("{} {}", format_number(metric.value), metric.unit)
        };
        lines.push(format!("- {}: {}", metric.metric, value));
    }

    lines.push(String::new());
    lines.push("Team and commissions".to_string());
    for term in &tables.team_commissions {
        let value = match term.value {
            ReferenceValue::Number(number) if number < 1.0 => format_percent(number),
            ReferenceValue::Number(number) => format_number(number),
            ReferenceValue::Text(text) => text.to_string(),
        };
        lines.push(format!("- {}: {} ({})", term.item, value, term.note));
    }

    lines.push(String::new());
    lines.push("Cost per session".to_string());
    for item in &tables.cost_per_session {
        lines.push(format!("- {}: {}", item.item, format_number(item.value)));
    }

    push_consumables(&mut lines, "Laundry", &tables.laundry_costs);
    push_consumables(&mut lines, "Other products", &tables.other_products);

    lines.push(String::new());
    lines.push(format!(
        "Total cost per session: {}",
        format_currency(tables.session_cost_total)
    ));

    lines.join("\n")
}

fn push_consumables(lines: &mut Vec<String>, title: &str, items: &[ConsumableLine]) {
    lines.push(String::new());
    lines.push(title.to_string());
    for item in items {
        lines.push(format!(
            "- {}: {} x {} = {}",
            item.item,
            format_number(item.qty),
            format_currency(item.unit_cost),
            format_currency(item.subtotal)
        ));
    }
}
