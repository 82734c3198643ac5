//! End-to-end portfolio behaviour: hydration, alignment, VaR and DV01.

use approx::assert_relative_eq;
use bondvar_core::{Column, Date, MissingPolicy, TimeSeries};
use bondvar_ext_file::InMemorySeriesSource;
use bondvar_portfolio::prelude::*;
use bondvar_risk::var::{MonteCarloSettings, VarMethod};
use bondvar_risk::RiskError;
use bondvar_traits::{SeriesField, TraitError};
use proptest::prelude::*;

fn day(i: usize) -> Date {
    Date::from_ymd(2024, 1, 2).unwrap().add_days(i as i64)
}

fn series(values: &[f64]) -> TimeSeries {
    values.iter().enumerate().map(|(i, v)| (day(i), *v)).collect()
}

fn basket() -> Vec<BondIndex> {
    ["AAA", "BBB", "BB", "CCC"]
        .iter()
        .map(|name| BondIndex::new(*name, format!("{name}_Y"), format!("{name}_P"), 0.25))
        .collect()
}

fn full_source() -> InMemorySeriesSource {
    let mut source = InMemorySeriesSource::new();
    let yields = [
        [4.50, 4.60, 4.55, 4.52, 4.58, 4.61],
        [5.40, 5.48, 5.45, 5.41, 5.50, 5.52],
        [6.10, 6.25, 6.20, 6.12, 6.30, 6.33],
        [12.0, 12.4, 12.3, 12.1, 12.6, 12.7],
    ];
    let prices = [
        [700.0, 698.6, 699.3, 699.8, 698.9, 698.4],
        [500.0, 499.0, 499.4, 500.0, 498.8, 498.5],
        [900.0, 896.0, 897.1, 899.0, 894.2, 893.5],
        [400.0, 395.0, 396.1, 398.0, 392.0, 391.0],
    ];
    for (i, index) in basket().iter().enumerate() {
        source.insert(index.series_id(SeriesField::Yield).clone(), series(&yields[i]));
        source.insert(index.series_id(SeriesField::Price).clone(), series(&prices[i]));
    }
    source
}

fn portfolio(policy: MissingPolicy) -> Portfolio {
    Portfolio::builder("Equal Weight")
        .start_date(day(0))
        .end_date(day(30))
        .instruments(basket())
        .missing_policy(policy)
        .risk_settings(RiskSettings {
            monte_carlo: MonteCarloSettings::new(10_000, 1),
            dv01_instrument_limit: None,
        })
        .build()
        .unwrap()
}

// =============================================================================
// HYDRATION
// =============================================================================

#[test]
fn one_failed_fetch_leaves_the_rest_hydrated() {
    let mut source = InMemorySeriesSource::new();
    let full = full_source();
    for index in basket() {
        for field in [SeriesField::Yield, SeriesField::Price] {
            let id = index.series_id(field).clone();
            if id.as_str() == "CCC_P" {
                continue;
            }
            let s = bondvar_traits::SeriesSource::get_series(&full, &id, day(0), day(30)).unwrap();
            source.insert(id, s);
        }
    }

    let mut p = portfolio(MissingPolicy::Propagate);
    let report = p.hydrate(&source);

    assert!(!report.is_complete());
    assert_eq!(report.fetched.len(), 7);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failed_instruments(), vec!["CCC"]);
    let failure = &report.failures[0];
    assert_eq!(failure.field, SeriesField::Price);
    assert!(matches!(failure.error, TraitError::NotFound(_)));

    let ccc = &p.instruments()[3];
    assert!(ccc.yield_series().is_some());
    assert!(ccc.price_series().is_none());
    assert!(p.instruments()[..3].iter().all(BondIndex::is_hydrated));

    // a second pass only retries what is missing
    let again = p.hydrate(&source);
    assert_eq!(again.already_present, 7);
    assert!(again.fetched.is_empty());
    assert_eq!(again.failures.len(), 1);
}

#[test]
fn hydration_restricts_to_the_window() {
    let mut p = Portfolio::builder("Window")
        .start_date(day(1))
        .end_date(day(3))
        .instruments(basket())
        .build()
        .unwrap();
    let report = p.hydrate(&full_source());
    assert!(report.is_complete());
    assert!(report.fetched.iter().all(|f| f.observations == 3));
    assert_eq!(p.combined_table().unwrap().len(), 3);
}

#[test]
fn hydration_drops_a_stale_table() {
    let mut source = full_source();
    let mut p = Portfolio::builder("Stale")
        .start_date(day(0))
        .end_date(day(30))
        .instrument(BondIndex::new("AAA", "AAA_Y", "AAA_P", 1.0))
        .instrument(BondIndex::new("NEW", "NEW_Y", "NEW_P", 0.0))
        .build()
        .unwrap();

    p.hydrate(&source);
    p.combined_table().unwrap();
    assert!(p.cached_table().is_some());

    source.insert("NEW_Y", series(&[1.0, 1.1]));
    let report = p.hydrate(&source);
    assert_eq!(report.fetched.len(), 1);
    assert!(p.cached_table().is_none());
}

// =============================================================================
// MISSING POLICY
// =============================================================================

fn degraded_source() -> InMemorySeriesSource {
    let mut source = full_source();
    // CCC loses its price history
    source.insert("CCC_P", TimeSeries::new());
    source
}

#[test]
fn propagate_fails_loudly_on_a_degraded_portfolio() {
    let mut p = portfolio(MissingPolicy::Propagate);
    p.hydrate(&degraded_source());

    let table = p.combined_table().unwrap();
    assert!(table.total_weighted_return().iter().all(Option::is_none));

    let err = p.calc_portfolio_var(95.0, VarMethod::Historical).unwrap_err();
    assert!(matches!(err, RiskError::InsufficientData(_)));
    let err = p.calc_portfolio_var(95.0, VarMethod::MonteCarlo).unwrap_err();
    assert!(matches!(err, RiskError::InsufficientData(_)));
}

#[test]
fn skip_missing_uses_the_surviving_instruments() {
    let mut degraded = portfolio(MissingPolicy::SkipMissing);
    degraded.hydrate(&degraded_source());

    let mut three = Portfolio::builder("Three")
        .start_date(day(0))
        .end_date(day(30))
        .instruments(basket().into_iter().take(3))
        .build()
        .unwrap();
    three.hydrate(&full_source());

    let a = degraded.combined_table().unwrap().complete_total_weighted_returns();
    let b = three.combined_table().unwrap().complete_total_weighted_returns();
    assert_eq!(a.len(), 5);
    for (x, y) in a.iter().zip(&b) {
        assert_relative_eq!(*x, *y, epsilon = 1e-15);
    }
    assert!(degraded.calc_portfolio_var(99.0, VarMethod::Historical).is_ok());
}

// =============================================================================
// CACHE
// =============================================================================

#[test]
fn weight_changes_need_an_explicit_invalidate() {
    let mut p = portfolio(MissingPolicy::Propagate);
    p.hydrate(&full_source());
    let before = p.combined_table().unwrap().total_weighted_return().to_vec();

    p.instruments_mut()[0].set_weight(1.0);
    assert_eq!(p.cached_table().unwrap().total_weighted_return(), &before[..]);

    p.invalidate();
    assert!(p.cached_table().is_none());
    let after = p.combined_table().unwrap().total_weighted_return().to_vec();
    assert_ne!(before, after);
}

// =============================================================================
// VAR
// =============================================================================

fn single(prices: &[f64]) -> Portfolio {
    let yields: Vec<f64> = (0..prices.len()).map(|i| 4.0 + i as f64 / 10.0).collect();
    let index = BondIndex::new("IDX", "Y", "P", 1.0)
        .with_yield_series(series(&yields))
        .with_price_series(series(prices));
    Portfolio::builder("Single")
        .start_date(day(0))
        .end_date(day(30))
        .instrument(index)
        .risk_settings(RiskSettings {
            monte_carlo: MonteCarloSettings::new(10_000, 1),
            dv01_instrument_limit: None,
        })
        .build()
        .unwrap()
}

fn worked_example() -> Portfolio {
    // returns of -2%, -1%, 0%, +1%, +2%
    let mut prices = vec![100.0];
    for r in [-0.02, -0.01, 0.0, 0.01, 0.02] {
        let last = *prices.last().unwrap();
        prices.push(last * (1.0 + r));
    }
    single(&prices)
}

#[test]
fn historical_var_worked_example() {
    let mut p = worked_example();
    let var = p.calc_portfolio_var(80.0, VarMethod::Historical).unwrap();
    assert_relative_eq!(var, -0.01, epsilon = 1e-12);

    let named = p.calc_portfolio_var_named(80.0, "historical").unwrap();
    assert_eq!(var, named);
}

#[test]
fn monte_carlo_var_repeats_exactly() {
    let mut p = worked_example();
    let a = p.calc_portfolio_var(99.0, VarMethod::MonteCarlo).unwrap();
    let b = p.calc_portfolio_var(99.0, VarMethod::MonteCarlo).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());

    let mut copy = p.with_weights("Copy", &[1.0]).unwrap();
    let c = copy.calc_portfolio_var(99.0, VarMethod::MonteCarlo).unwrap();
    assert_eq!(a.to_bits(), c.to_bits());
}

#[test]
fn invalid_confidence_is_rejected_before_building() {
    let mut p = worked_example();
    for cint in [-0.1, 100.1, f64::NAN] {
        let err = p.calc_portfolio_var(cint, VarMethod::Historical).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter(_)));
    }
    assert!(p.cached_table().is_none());

    // the confidence check comes before the selector
    let err = p.calc_portfolio_var_named(150.0, "garch").unwrap_err();
    assert!(matches!(err, RiskError::InvalidParameter(_)));
}

#[test]
fn unknown_method_is_unsupported() {
    let mut p = worked_example();
    let err = p.calc_portfolio_var_named(95.0, "garch").unwrap_err();
    assert_eq!(err, RiskError::UnsupportedMethod("garch".to_string()));
    assert_eq!(
        p.calc_portfolio_var_named(95.0, "Monte-Carlo").unwrap(),
        p.calc_portfolio_var(95.0, VarMethod::MonteCarlo).unwrap()
    );
}

#[test]
fn nan_observation_is_excluded_from_var() {
    let yields: Vec<f64> = (0..6).map(|i| 4.0 + i as f64 / 10.0).collect();
    let source = InMemorySeriesSource::new()
        .with_series("Y", series(&yields))
        .with_series("P", series(&[100.0, 99.0, f64::NAN, 100.0, 101.0, 100.5]));
    let mut p = Portfolio::builder("Gappy")
        .start_date(day(0))
        .end_date(day(30))
        .instrument(BondIndex::new("IDX", "Y", "P", 1.0))
        .risk_settings(RiskSettings {
            monte_carlo: MonteCarloSettings::new(10_000, 1),
            dv01_instrument_limit: None,
        })
        .build()
        .unwrap();
    assert!(p.hydrate(&source).is_complete());

    let ret = p.combined_table().unwrap().column("IDX", Column::DailyReturn).unwrap();
    assert_eq!(ret[2], None);
    assert_eq!(ret[3], None);

    // three returns survive: -1%, +1% and 100.5 / 101 - 1
    let worst = p.calc_portfolio_var(100.0, VarMethod::Historical).unwrap();
    assert_relative_eq!(worst, -0.01, epsilon = 1e-12);
    let best = p.calc_portfolio_var(0.0, VarMethod::Historical).unwrap();
    assert_relative_eq!(best, 0.01, epsilon = 1e-12);

    let mc = p.calc_portfolio_var_result(95.0, VarMethod::MonteCarlo).unwrap();
    assert!(mc.value.is_finite());
    assert_eq!(mc.observations, 3);
}

#[test]
fn var_report_and_distribution() {
    let mut p = portfolio(MissingPolicy::Propagate);
    p.hydrate(&full_source());

    let report = p.var_report(&[99.0, 95.0]).unwrap();
    assert_eq!(report.len(), 4);
    assert!(report.results.iter().all(|r| r.observations == 5));

    let distribution = p.return_distribution().unwrap();
    assert_eq!(distribution.observations, 5);
    assert!(distribution.min <= report.get(VarMethod::Historical, 99.0).unwrap().value);
}

// =============================================================================
// DV01
// =============================================================================

#[test]
fn dv01_matches_the_finite_difference() {
    let index = BondIndex::new("AAA", "Y", "P", 0.3)
        .with_yield_series(series(&[4.50, 4.60, 4.60]))
        .with_price_series(series(&[100.0, 100.5, 100.7]));
    let mut p = Portfolio::builder("DV01")
        .start_date(day(0))
        .end_date(day(30))
        .instrument(index)
        .build()
        .unwrap();

    assert_eq!(p.calc_portfolio_dv01().unwrap(), vec!["AAA"]);
    let dv01 = p.combined_table().unwrap().column("AAA", Column::Dv01).unwrap();
    assert_eq!(dv01[0], None);
    assert_relative_eq!(dv01[1].unwrap(), 0.05, epsilon = 1e-12);
    // a flat yield is a non-finite value, not an error and not zero
    assert!(dv01[2].unwrap().is_infinite());

    let summary = p.dv01_summary().unwrap();
    assert_eq!(summary.rows.len(), 1);
    assert_eq!(summary.rows[0].date, day(1));
}

#[test]
fn dv01_covers_every_instrument_unless_capped() {
    let mut p = portfolio(MissingPolicy::Propagate);
    p.hydrate(&full_source());
    assert_eq!(p.calc_portfolio_dv01().unwrap().len(), 4);

    let mut capped = Portfolio::builder("Capped")
        .start_date(day(0))
        .end_date(day(30))
        .instruments(basket())
        .risk_settings(RiskSettings {
            dv01_instrument_limit: Some(2),
            ..RiskSettings::default()
        })
        .build()
        .unwrap();
    capped.hydrate(&full_source());
    assert_eq!(capped.calc_portfolio_dv01().unwrap(), vec!["AAA", "BBB"]);
    assert_eq!(capped.dv01_summary().unwrap().instruments, vec!["AAA", "BBB"]);
}

// =============================================================================
// REWEIGHTING
// =============================================================================

#[test]
fn with_weights_checks_the_count() {
    let p = portfolio(MissingPolicy::Propagate);
    let err = p.with_weights("Bad", &[0.5, 0.5]).unwrap_err();
    assert_eq!(
        err,
        PortfolioError::WeightCountMismatch {
            expected: 4,
            actual: 2
        }
    );
}

#[test]
fn scenarios_share_the_hydrated_series() {
    let mut base = portfolio(MissingPolicy::Propagate);
    base.hydrate(&full_source());

    let scenarios = [
        WeightingScenario::new("Overweight IG", vec![0.5, 0.25, 0.15, 0.10]),
        WeightingScenario::new("Overweight HY", vec![0.1, 0.15, 0.25, 0.5]),
    ];
    let outcomes = run_scenarios(&base, &scenarios, &[99.0, 95.0]).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].dv01.instruments.len(), 4);
    assert!(outcomes[1].distribution.std_dev > outcomes[0].distribution.std_dev);
}

// =============================================================================
// AGGREGATE PROPERTY
// =============================================================================

proptest! {
    #[test]
    fn total_return_is_the_weighted_sum(
        prices_a in prop::collection::vec(50.0f64..150.0, 2..20),
        prices_b in prop::collection::vec(50.0f64..150.0, 2..20),
        wa in -1.0f64..2.0,
        wb in -1.0f64..2.0,
    ) {
        let n = prices_a.len().min(prices_b.len());
        let flat: Vec<f64> = vec![5.0; n];
        let a = BondIndex::new("A", "AY", "AP", wa)
            .with_yield_series(series(&flat))
            .with_price_series(series(&prices_a[..n]));
        let b = BondIndex::new("B", "BY", "BP", wb)
            .with_yield_series(series(&flat))
            .with_price_series(series(&prices_b[..n]));
        let mut p = Portfolio::builder("Prop")
            .start_date(day(0))
            .end_date(day(30))
            .instruments([a, b])
            .build()
            .unwrap();

        let table = p.combined_table().unwrap();
        let totals = table.total_weighted_return();
        prop_assert_eq!(totals[0], None);
        for i in 1..n {
            let ra = prices_a[i] / prices_a[i - 1] - 1.0;
            let rb = prices_b[i] / prices_b[i - 1] - 1.0;
            let expected = ra * wa + rb * wb;
            let got = totals[i].unwrap();
            prop_assert!((got - expected).abs() <= 1e-12);
        }
    }
}
