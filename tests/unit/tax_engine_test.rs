// Tax engine tests: percentage and fixed contributions, independence of
// rates (no cascading), and the non-negativity guard.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use billforge::{ResolvedTaxRate, TaxEngine, TaxRateType};

#[test]
fn test_percentage_rate() {
    let rates = vec![ResolvedTaxRate::percentage("tr-vat", dec!(8)).unwrap()];

    let result = TaxEngine::compute_tax(dec!(153.00), &rates);

    assert_eq!(result.total_tax, dec!(12.24));
    assert_eq!(result.taxes_applied.len(), 1);
    assert_eq!(result.taxes_applied[0].taxable_amount, dec!(153.00));
}

#[test]
fn test_fixed_rate_is_independent_of_base() {
    let rates = vec![ResolvedTaxRate::fixed("tr-levy", dec!(2.50)).unwrap()];

    // Fixed rates contribute their value verbatim, even on a zero base
    assert_eq!(TaxEngine::compute_tax(dec!(0), &rates).total_tax, dec!(2.50));
    assert_eq!(
        TaxEngine::compute_tax(dec!(1000), &rates).total_tax,
        dec!(2.50)
    );
}

#[test]
fn test_rates_do_not_cascade() {
    // All rates are computed against the same taxable base and summed,
    // unlike discounts
    let rates = vec![
        ResolvedTaxRate::percentage("tr-1", dec!(10)).unwrap(),
        ResolvedTaxRate::fixed("tr-2", dec!(5)).unwrap(),
        ResolvedTaxRate::percentage("tr-3", dec!(20)).unwrap(),
    ];

    let result = TaxEngine::compute_tax(dec!(100), &rates);

    assert_eq!(result.total_tax, dec!(35)); // 10 + 5 + 20
    for applied in &result.taxes_applied {
        assert_eq!(applied.taxable_amount, dec!(100));
    }
}

#[test]
fn test_negative_base_is_floored_to_zero() {
    let rates = vec![ResolvedTaxRate::percentage("tr-1", dec!(10)).unwrap()];

    let result = TaxEngine::compute_tax(dec!(-50), &rates);

    assert_eq!(result.total_tax, Decimal::ZERO);
    assert_eq!(result.taxes_applied[0].taxable_amount, Decimal::ZERO);
}

#[test]
fn test_misconfigured_negative_rate_never_reduces_tax() {
    // The constructors reject negative values, but a rate deserialized from
    // an untrusted snapshot could still carry one; the engine clamps each
    // contribution to zero before summing
    let rogue = ResolvedTaxRate {
        id: "tr-rogue".to_string(),
        rate_type: TaxRateType::Fixed,
        percentage_value: None,
        fixed_value: Some(dec!(-100)),
    };
    let rates = vec![
        ResolvedTaxRate::percentage("tr-ok", dec!(10)).unwrap(),
        rogue,
    ];

    let result = TaxEngine::compute_tax(dec!(100), &rates);

    assert_eq!(result.total_tax, dec!(10));
    assert_eq!(result.taxes_applied[1].tax_amount, Decimal::ZERO);
}

#[test]
fn test_no_rates_means_no_tax() {
    let result = TaxEngine::compute_tax(dec!(100), &[]);
    assert_eq!(result.total_tax, Decimal::ZERO);
    assert!(result.taxes_applied.is_empty());
}

proptest! {
    #[test]
    fn test_total_tax_is_non_negative(
        base_cents in 0u64..1_000_000_000u64,
        percentages in prop::collection::vec(0u8..=100u8, 0..5),
        fixed_cents in prop::collection::vec(0u64..1_000_000u64, 0..5)
    ) {
        let base = Decimal::new(base_cents as i64, 2);

        let mut rates = Vec::new();
        for (i, pct) in percentages.iter().enumerate() {
            rates.push(ResolvedTaxRate::percentage(format!("pct-{}", i), Decimal::from(*pct)).unwrap());
        }
        for (i, cents) in fixed_cents.iter().enumerate() {
            rates.push(ResolvedTaxRate::fixed(format!("fixed-{}", i), Decimal::new(*cents as i64, 2)).unwrap());
        }

        let result = TaxEngine::compute_tax(base, &rates);

        prop_assert!(result.total_tax >= Decimal::ZERO);
        for applied in &result.taxes_applied {
            prop_assert!(applied.tax_amount >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_total_equals_sum_of_contributions(
        base_cents in 0u64..1_000_000_000u64,
        percentages in prop::collection::vec(0u8..=100u8, 1..5)
    ) {
        let base = Decimal::new(base_cents as i64, 2);
        let rates: Vec<ResolvedTaxRate> = percentages
            .iter()
            .enumerate()
            .map(|(i, pct)| {
                ResolvedTaxRate::percentage(format!("pct-{}", i), Decimal::from(*pct)).unwrap()
            })
            .collect();

        let result = TaxEngine::compute_tax(base, &rates);
        let summed: Decimal = result.taxes_applied.iter().map(|a| a.tax_amount).sum();

        prop_assert_eq!(result.total_tax, summed);
    }

    #[test]
    fn test_tax_is_deterministic(
        base_cents in 0u64..1_000_000_000u64,
        pct in 0u8..=100u8
    ) {
        let base = Decimal::new(base_cents as i64, 2);
        let rates = vec![ResolvedTaxRate::percentage("tr-1", Decimal::from(pct)).unwrap()];

        let first = TaxEngine::compute_tax(base, &rates);
        let second = TaxEngine::compute_tax(base, &rates);

        prop_assert_eq!(first.total_tax, second.total_tax);
    }
}
