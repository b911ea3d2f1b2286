use spa_forecast::assumptions::{
    AssumptionRecord, NumericField, ServiceMix, StaffField, StaffRole, TicketOverride,
};
use spa_forecast::catalog::{CatalogEntry, PackageTier, ServiceCatalog, ServiceId, TierPrices};
use spa_forecast::projection::{normalize_mix, ProjectionEngine, MIX_TOLERANCE};
use spa_forecast::report::{ProjectionSummary, ResultPeriod};

fn entry(id: &str, prices: TierPrices) -> CatalogEntry {
    CatalogEntry {
        id: ServiceId::from(id),
        name: id.to_string(),
        duration: "60'".to_string(),
        prices,
    }
}

fn single_service_engine() -> ProjectionEngine {
    ProjectionEngine::new(ServiceCatalog::new(vec![entry(
        "relaxante-60",
        TierPrices::new(520.0, 468.0, 416.0, 390.0),
    )]))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn single_service_projection_matches_hand_calculation() {
    let engine = single_service_engine();
    let assumptions = engine.baseline();
    let result = engine.compute(&assumptions);

    assert!(result.mix_is_valid);
    assert_close(result.gross_sessions, 492.0);
    assert_close(result.net_sessions, 440.832);
    assert_close(result.avg_price_by_service[0].avg_price, 470.6);
    assert!(!result.avg_price_by_service[0].is_override);
    assert_close(result.avg_price_overall, 470.6);
    assert_close(result.revenue, 207_455.5392);

    assert_close(result.variable_costs, 440.832 * 69.73);
    assert_close(result.card_fees, 207_455.5392 * 0.05);
    assert_close(result.commissions, 207_455.5392 * 0.15);
    assert_close(result.staffing_costs, 50_400.0 * 1.8);
    assert_close(result.fixed_costs, 20_000.0);
}

#[test]
fn package_blends_ignore_overrides_but_overall_price_does_not() {
    let engine = single_service_engine();
    let mut assumptions = engine.baseline();
    assumptions
        .ticket_overrides
        .apply(ServiceId::from("relaxante-60"), TicketOverride::Manual(600.0));

    let result = engine.compute(&assumptions);
    assert!(result.avg_price_by_service[0].is_override);
    assert_close(result.avg_price_overall, 600.0);
    assert_close(result.avg_price_by_package.full, 520.0);
    assert_close(result.avg_price_by_package.p20, 390.0);
    assert_close(result.revenue, 440.832 * 600.0);
}

#[test]
fn clearing_an_override_restores_the_blended_price() {
    let engine = single_service_engine();
    let baseline = engine.compute(&engine.baseline());

    let mut editor = engine.editor();
    editor
        .commit_ticket_override("relaxante-60", "650")
        .expect("known service");
    let overridden = engine.compute(editor.assumptions());
    assert_close(overridden.avg_price_by_service[0].avg_price, 650.0);

    editor
        .commit_ticket_override("relaxante-60", "  ")
        .expect("known service");
    assert!(editor.assumptions().ticket_overrides.is_empty());
    assert_eq!(engine.compute(editor.assumptions()), baseline);
}

#[test]
fn invalid_service_mix_is_flagged_and_not_rescaled() {
    let catalog = ServiceCatalog::new(vec![
        entry("a", TierPrices::new(100.0, 100.0, 100.0, 100.0)),
        entry("b", TierPrices::new(200.0, 200.0, 200.0, 200.0)),
    ]);
    let engine = ProjectionEngine::new(catalog);
    let mut assumptions = engine.baseline();
    assumptions.service_mix = ServiceMix::from_iter([
        (ServiceId::from("a"), 60.0),
        (ServiceId::from("b"), 30.0),
    ]);

    let result = engine.compute(&assumptions);
    assert!(!result.mix_is_valid);
    assert_close(result.service_mix_sum, 90.0);
    // 0.6 * 100 + 0.3 * 200, not rescaled to 100%.
    assert_close(result.avg_price_overall, 120.0);

    let summary = ProjectionSummary::new(&result, ResultPeriod::Monthly);
    assert_eq!(summary.warnings.len(), 1);
}

#[test]
fn result_is_revenue_minus_total_expenses() {
    let engine = ProjectionEngine::standard();
    let mut assumptions = engine.baseline();
    assumptions.volume.hot_daily_sessions = 31.0;
    assumptions.rates.extra_variable_per_session = 12.5;
    assumptions.package_mix.set(PackageTier::Pack20, 35.0);

    let result = engine.compute(&assumptions);
    let components = result.variable_costs
        + result.card_fees
        + result.commissions
        + result.staffing_costs
        + result.fixed_costs;
    assert_close(result.total_expenses, components);
    assert_eq!(result.result, result.revenue - result.total_expenses);
}

#[test]
fn repeated_projections_are_identical() {
    let engine = ProjectionEngine::standard();
    let assumptions = engine.baseline();
    assert_eq!(engine.compute(&assumptions), engine.compute(&assumptions));
    assert_eq!(
        spa_forecast::compute(&AssumptionRecord::baseline()),
        engine.compute(&assumptions)
    );
}

#[test]
fn baseline_weights_sum_to_one() {
    let baseline = AssumptionRecord::baseline();
    let packages = normalize_mix(baseline.package_mix.entries());
    let services = normalize_mix(
        baseline
            .service_mix
            .entries()
            .map(|(id, value)| (id.clone(), value)),
    );

    for weights in [packages.total(), services.total()] {
        assert!((weights - 1.0).abs() < 1e-9, "weights sum to {weights}");
    }
    assert!((services.sum - 100.0).abs() < MIX_TOLERANCE);
}

#[test]
fn editor_changes_flow_into_the_projection() {
    let engine = ProjectionEngine::standard();
    let mut editor = engine.editor();

    editor.set_value(NumericField::NoShowRate, "0");
    editor.set_staff(StaffRole::Manager, StaffField::Quantity, "0");
    let edited = engine.compute(editor.assumptions());
    assert_close(edited.net_sessions, 492.0);
    assert_close(edited.staffing_costs, 40_400.0 * 1.8);

    editor.reset();
    assert_eq!(editor.assumptions(), &engine.baseline());
}

#[test]
fn baseline_copies_are_independent() {
    let mut first = AssumptionRecord::baseline();
    first.volume.hot_days = 0.0;
    first
        .ticket_overrides
        .apply(ServiceId::from("drenagem-50"), TicketOverride::Manual(1.0));

    let second = AssumptionRecord::baseline();
    assert_eq!(second.volume.hot_days, 8.0);
    assert!(second.ticket_overrides.is_empty());
}
