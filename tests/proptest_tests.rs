//! Property-based tests for the document arithmetic.
//!
//! Run with: `cargo test --test proptest_tests`

mod common;

use common::*;
use en16931::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Build a standard rated invoice whose totals are derived from `lines`
/// the same way a well-behaved producer would.
fn build_consistent(
    lines: &[(Decimal, Decimal)],
    mode: ValidationMode,
) -> Result<Invoice, InvoiceError> {
    let net: Decimal = lines.iter().map(|(qty, price)| qty * price).sum();
    let net = Amount::new(net).rounded_value();
    let vat = Amount::new(net).of_percentage(Percentage::new(dec!(19))).rounded_value();

    let mut builder = header("RE-2024-PROP").validation_mode(mode);
    for (i, (qty, price)) in lines.iter().enumerate() {
        builder = builder.add_line(standard_line(&(i + 1).to_string(), *qty, *price));
    }
    builder
        .add_vat_breakdown(standard_breakdown(net, vat))
        .totals(totals(net, vat))
        .build()
}

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a reasonable price (0.01 to 99999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a price with a third decimal (0.001 to 999.999).
fn arb_fine_price() -> impl Strategy<Value = Decimal> {
    (1u64..1_000_000u64).prop_map(|mils| Decimal::new(mils as i64, 3))
}

/// Generate a quantity (1 to 999).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1u32..1000u32).prop_map(Decimal::from)
}

fn arb_lines(
    price: impl Strategy<Value = Decimal>,
) -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    prop::collection::vec((arb_quantity(), price), 1..20)
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn consistent_invoices_always_build(lines in arb_lines(arb_price())) {
        let inv = build_consistent(&lines, ValidationMode::FailFast);
        prop_assert!(inv.is_ok(), "{:?}", inv.err());
    }

    #[test]
    fn totals_identities_hold(lines in arb_lines(arb_price())) {
        let inv = build_consistent(&lines, ValidationMode::CollectAll).unwrap();
        let t = inv.totals();
        let vat = t.total_vat().unwrap_or(Amount::ZERO);
        prop_assert!(t.total_with_vat().matches(t.total_without_vat() + vat));
        prop_assert!(t.amount_due().matches(t.total_with_vat()));

        let line_sum: Amount = inv.lines().iter().map(|l| l.priced_amount()).sum();
        prop_assert!(line_sum.matches(t.sum_of_line_net_amounts()));

        let breakdown_vat: Amount = inv.vat_breakdowns().iter().map(|b| b.tax_amount()).sum();
        prop_assert!(breakdown_vat.matches(vat));
    }

    #[test]
    fn building_is_idempotent(lines in arb_lines(arb_price())) {
        let first = build_consistent(&lines, ValidationMode::FailFast).unwrap();
        let second = build_consistent(&lines, ValidationMode::FailFast).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn line_sum_is_rounded_once(lines in arb_lines(arb_fine_price())) {
        // The exact sum rounded once is always accepted.
        prop_assert!(build_consistent(&lines, ValidationMode::FailFast).is_ok());

        // Rounding each line first is rejected whenever it disagrees.
        let exact = Amount::new(lines.iter().map(|(q, p)| q * p).sum()).rounded_value();
        let per_line: Decimal = lines.iter().map(|(q, p)| Amount::new(q * p).rounded_value()).sum();
        if per_line != exact {
            let vat = Amount::new(per_line)
                .of_percentage(Percentage::new(dec!(19)))
                .rounded_value();
            let mut builder = header("RE-2024-PROP");
            for (i, (qty, price)) in lines.iter().enumerate() {
                builder = builder.add_line(standard_line(&(i + 1).to_string(), *qty, *price));
            }
            let err = builder
                .add_vat_breakdown(standard_breakdown(per_line, vat))
                .totals(totals(per_line, vat))
                .build()
                .unwrap_err();
            prop_assert_eq!(err.first_rule(), Some("BR-CO-10"));
        }
    }

    #[test]
    fn off_by_a_cent_total_is_rejected(lines in arb_lines(arb_price())) {
        let net: Decimal = lines.iter().map(|(q, p)| q * p).sum::<Decimal>() + dec!(0.01);
        let vat = Amount::new(net).of_percentage(Percentage::new(dec!(19))).rounded_value();

        let mut builder = header("RE-2024-PROP");
        for (i, (qty, price)) in lines.iter().enumerate() {
            builder = builder.add_line(standard_line(&(i + 1).to_string(), *qty, *price));
        }
        let err = builder
            .add_vat_breakdown(standard_breakdown(net, vat))
            .totals(totals(net, vat))
            .build()
            .unwrap_err();
        prop_assert_eq!(err.first_rule(), Some("BR-CO-10"));
        prop_assert_eq!(err.kind(), Some(ViolationKind::AmountMismatch));
    }

    #[test]
    fn rounding_is_half_away_from_zero(mils in -1_000_000i64..1_000_000i64) {
        let value = Decimal::new(mils, 3);
        let rounded = Amount::new(value).rounded_value();
        prop_assert_eq!(rounded.scale(), 2);
        prop_assert!((rounded - value).abs() <= dec!(0.005));
        prop_assert_eq!(Amount::new(-value).rounded_value(), -rounded);
    }

    #[test]
    fn amount_matching_is_symmetric(
        a in -10_000_000i64..10_000_000i64,
        b in -10_000_000i64..10_000_000i64,
    ) {
        let a = Amount::new(Decimal::new(a, 3));
        let b = Amount::new(Decimal::new(b, 3));
        prop_assert_eq!(a.matches(b), b.matches(a));
        prop_assert!(a.matches(a));
    }
}
