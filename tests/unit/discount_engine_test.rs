// Discount engine tests: per-line clamping, independence of line-item
// coupons, and the order-significant cascade of invoice coupons.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use billforge::{
    Coupon, CouponCadence, Currency, DiscountEngine, InvoiceCoupon, LineItem, LineItemCoupon,
    Price,
};

fn usd() -> Currency {
    Currency::new("USD").unwrap()
}

fn flat_line_item(id: &str, amount: Decimal) -> LineItem {
    let price = Price::flat_fee(format!("price-{}", id), amount, usd()).unwrap();
    LineItem::new(id, price, dec!(1)).unwrap()
}

fn fixed_coupon(id: &str, amount_off: Decimal) -> Coupon {
    Coupon::fixed(id, id, amount_off, CouponCadence::Once, None, usd()).unwrap()
}

fn percentage_coupon(id: &str, percentage_off: Decimal) -> Coupon {
    Coupon::percentage(id, id, percentage_off, CouponCadence::Once, None, usd()).unwrap()
}

#[test]
fn test_line_item_discount_clamped_to_line_amount() {
    let line_items = vec![flat_line_item("li-1", dec!(50))];
    let coupons = vec![LineItemCoupon::new(
        fixed_coupon("c-big", dec!(1000)),
        "li-1",
    )];

    let result = DiscountEngine::apply_line_item_discounts(&line_items, &coupons);

    // A discount can never exceed the line's own amount
    assert_eq!(result.total_discount, dec!(50));
    assert_eq!(result.applications.len(), 1);
    assert_eq!(result.applications[0].discount, dec!(50));
    assert_eq!(result.applications[0].original_amount, dec!(50));
    assert_eq!(result.applications[0].final_amount, dec!(0));
}

#[test]
fn test_line_item_coupons_apply_against_original_amount() {
    // Multiple coupons on the same line do not cascade with each other: each
    // is computed and clamped against the line's original amount, then summed
    let line_items = vec![flat_line_item("li-1", dec!(100))];
    let coupons = vec![
        LineItemCoupon::new(fixed_coupon("c-1", dec!(60)), "li-1"),
        LineItemCoupon::new(percentage_coupon("c-2", dec!(50)), "li-1"),
    ];

    let result = DiscountEngine::apply_line_item_discounts(&line_items, &coupons);

    // 60 + 50% of the ORIGINAL 100 = 110, not 60 + 50% of 40
    assert_eq!(result.total_discount, dec!(110));
    assert_eq!(result.applications[1].original_amount, dec!(100));
    assert_eq!(result.applications[1].discount, dec!(50));
}

#[test]
fn test_line_item_coupon_with_unknown_target_is_skipped() {
    let line_items = vec![flat_line_item("li-1", dec!(100))];
    let coupons = vec![
        LineItemCoupon::new(fixed_coupon("c-1", dec!(10)), "li-missing"),
        LineItemCoupon::new(fixed_coupon("c-2", dec!(20)), "li-1"),
    ];

    let result = DiscountEngine::apply_line_item_discounts(&line_items, &coupons);

    assert_eq!(result.total_discount, dec!(20));
    assert_eq!(result.applications.len(), 1);
    assert_eq!(result.applications[0].coupon_id, "c-2");
}

#[test]
fn test_invoice_discounts_cascade_over_running_total() {
    // Each invoice coupon sees the result of the previous one
    let coupons = vec![
        InvoiceCoupon::new(fixed_coupon("c-1", dec!(20))),
        InvoiceCoupon::new(percentage_coupon("c-2", dec!(10))),
    ];

    let result = DiscountEngine::apply_invoice_discounts(dec!(100), &coupons);

    // 20 off 100, then 10% of the remaining 80 = 8
    assert_eq!(result.total_discount, dec!(28));
    assert_eq!(result.applications[0].original_amount, dec!(100));
    assert_eq!(result.applications[0].discount, dec!(20));
    assert_eq!(result.applications[1].original_amount, dec!(80));
    assert_eq!(result.applications[1].discount, dec!(8));
}

#[test]
fn test_invoice_discount_order_is_significant() {
    let fixed_first = vec![
        InvoiceCoupon::new(fixed_coupon("c-fixed", dec!(50))),
        InvoiceCoupon::new(percentage_coupon("c-pct", dec!(50))),
    ];
    let percentage_first = vec![
        InvoiceCoupon::new(percentage_coupon("c-pct", dec!(50))),
        InvoiceCoupon::new(fixed_coupon("c-fixed", dec!(50))),
    ];

    // fixed then 50%: 50 + 25 = 75
    let result = DiscountEngine::apply_invoice_discounts(dec!(100), &fixed_first);
    assert_eq!(result.total_discount, dec!(75));

    // 50% then fixed: 50 + 50 = 100
    let result = DiscountEngine::apply_invoice_discounts(dec!(100), &percentage_first);
    assert_eq!(result.total_discount, dec!(100));
}

#[test]
fn test_invoice_discount_clamped_to_running_total() {
    let coupons = vec![
        InvoiceCoupon::new(fixed_coupon("c-1", dec!(100))),
        InvoiceCoupon::new(fixed_coupon("c-2", dec!(100))),
    ];

    let result = DiscountEngine::apply_invoice_discounts(dec!(30), &coupons);

    // First coupon takes the whole 30, the second sees a zero running total
    assert_eq!(result.total_discount, dec!(30));
    assert_eq!(result.applications[0].discount, dec!(30));
    assert_eq!(result.applications[1].original_amount, dec!(0));
    assert_eq!(result.applications[1].discount, dec!(0));
}

#[test]
fn test_empty_coupon_lists_produce_zero_discount() {
    let line_items = vec![flat_line_item("li-1", dec!(100))];

    let result = DiscountEngine::apply_line_item_discounts(&line_items, &[]);
    assert_eq!(result.total_discount, Decimal::ZERO);
    assert!(result.applications.is_empty());

    let result = DiscountEngine::apply_invoice_discounts(dec!(100), &[]);
    assert_eq!(result.total_discount, Decimal::ZERO);
    assert!(result.applications.is_empty());
}

#[test]
fn test_line_item_application_records_carry_scope() {
    let line_items = vec![flat_line_item("li-1", dec!(100))];
    let coupons = vec![LineItemCoupon::new(fixed_coupon("c-1", dec!(10)), "li-1")
        .with_association_id("assoc-1")];

    let result = DiscountEngine::apply_line_item_discounts(&line_items, &coupons);

    let application = &result.applications[0];
    assert_eq!(application.line_item_id.as_deref(), Some("li-1"));
    assert_eq!(application.association_id.as_deref(), Some("assoc-1"));
    assert!(application.id.starts_with("capp_"));
}

proptest! {
    #[test]
    fn test_invoice_discount_never_exceeds_subtotal(
        subtotal_cents in 0u64..10_000_000u64,
        amounts in prop::collection::vec(1u64..1_000_000u64, 0..8)
    ) {
        let subtotal = Decimal::new(subtotal_cents as i64, 2);
        let coupons: Vec<InvoiceCoupon> = amounts
            .iter()
            .enumerate()
            .map(|(i, cents)| {
                let coupon = if i % 2 == 0 {
                    fixed_coupon(&format!("c-{}", i), Decimal::new(*cents as i64, 2))
                } else {
                    percentage_coupon(&format!("c-{}", i), Decimal::from(1 + (cents % 100)))
                };
                InvoiceCoupon::new(coupon)
            })
            .collect();

        let result = DiscountEngine::apply_invoice_discounts(subtotal, &coupons);

        prop_assert!(result.total_discount >= Decimal::ZERO);
        prop_assert!(
            result.total_discount <= subtotal,
            "cascaded discounts can never exceed the subtotal: {} > {}",
            result.total_discount,
            subtotal
        );
    }

    #[test]
    fn test_line_item_discount_bounded_per_coupon(
        line_cents in 0u64..10_000_000u64,
        coupon_cents in 1u64..10_000_000u64
    ) {
        let line_amount = Decimal::new(line_cents as i64, 2);
        let line_items = vec![flat_line_item("li-1", line_amount)];
        let coupons = vec![LineItemCoupon::new(
            fixed_coupon("c-1", Decimal::new(coupon_cents as i64, 2)),
            "li-1",
        )];

        let result = DiscountEngine::apply_line_item_discounts(&line_items, &coupons);

        prop_assert!(result.total_discount >= Decimal::ZERO);
        prop_assert!(result.total_discount <= line_amount);
    }
}
