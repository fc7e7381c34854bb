use proptest::prelude::*;
use quotation_service::models::{
    AmountInputMode, GroupKey, PricingMode, QuotationFinancialsConfig, SizeRow, WorkItemGroup,
    WorkOrder,
};
use quotation_service::services::{
    calculate_from_subtotal, reconcile, resolve_vat, sort_latest_first, SpecialDiscount,
};
use quotation_service::utils::money::MONEY_TOLERANCE;
use rust_decimal::Decimal;

const TOLERANCE: Decimal = MONEY_TOLERANCE;

fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|bp| Decimal::new(bp, 2))
}

fn input_mode() -> impl Strategy<Value = AmountInputMode> {
    prop_oneof![Just(AmountInputMode::Percentage), Just(AmountInputMode::Amount)]
}

fn pricing_mode() -> impl Strategy<Value = PricingMode> {
    prop_oneof![Just(PricingMode::Net), Just(PricingMode::VatIncluded)]
}

prop_compose! {
    fn financials()(
        pricing_mode in pricing_mode(),
        has_vat in any::<bool>(),
        vat_percentage in (0i64..3_000).prop_map(|bp| Decimal::new(bp, 2)),
        special_discount_type in input_mode(),
        special_discount_value in (-100_000i64..2_000_000_000).prop_map(|c| Decimal::new(c, 2)),
        has_withholding_tax in any::<bool>(),
        withholding_tax_percentage in (-1_000i64..30_000).prop_map(|bp| Decimal::new(bp, 2)),
        deposit_mode in input_mode(),
        deposit_percentage in (-1_000i64..12_000).prop_map(|bp| Decimal::new(bp, 2)),
        deposit_amount_input in (-100_000i64..2_000_000_000).prop_map(|c| Decimal::new(c, 2)),
    ) -> QuotationFinancialsConfig {
        QuotationFinancialsConfig {
            pricing_mode,
            has_vat,
            vat_percentage,
            special_discount_type,
            special_discount_value,
            has_withholding_tax,
            withholding_tax_percentage,
            deposit_mode,
            deposit_percentage,
            deposit_amount_input,
        }
    }
}

proptest! {
    #[test]
    fn totals_are_non_negative_and_bounded(subtotal in cents(), config in financials()) {
        let totals = calculate_from_subtotal(subtotal, &config);

        prop_assert!(totals.discount_amount >= Decimal::ZERO);
        prop_assert!(totals.discount_amount <= totals.subtotal);
        prop_assert!(totals.discount_percentage >= Decimal::ZERO);
        prop_assert!(totals.discount_percentage <= Decimal::ONE_HUNDRED);
        prop_assert!(totals.discounted_subtotal >= Decimal::ZERO);
        prop_assert!(totals.vat_amount >= Decimal::ZERO);
        prop_assert!(totals.withholding_amount >= Decimal::ZERO);
        prop_assert!(totals.final_total >= Decimal::ZERO);
        prop_assert!(totals.deposit_amount >= Decimal::ZERO);
        prop_assert!(totals.deposit_amount <= totals.final_total);
    }

    #[test]
    fn deposit_and_remaining_sum_to_final_total(subtotal in cents(), config in financials()) {
        let totals = calculate_from_subtotal(subtotal, &config);
        prop_assert_eq!(totals.deposit_amount + totals.remaining_amount, totals.final_total);

        // The presented figures add up to the cent.
        let rounded = totals.rounded();
        prop_assert_eq!(rounded.deposit_amount + rounded.remaining_amount, rounded.final_total);
    }

    #[test]
    fn discount_edit_round_trips(subtotal in cents(), pct in percentage()) {
        let mut discount = SpecialDiscount::default();
        discount.edit_percentage(subtotal, pct);
        let amount = discount.amount();

        discount.edit_amount(subtotal, amount);

        if subtotal.is_zero() {
            prop_assert_eq!(discount.percentage(), Decimal::ZERO);
        } else {
            prop_assert!((discount.percentage() - pct).abs() <= TOLERANCE);
        }
    }

    #[test]
    fn vat_survives_net_to_gross_and_back(base in cents(), rate in (0i64..3_000).prop_map(|bp| Decimal::new(bp, 2))) {
        let net = resolve_vat(base, true, rate, PricingMode::Net);
        let gross = resolve_vat(net.total, true, rate, PricingMode::VatIncluded);

        prop_assert!((gross.vat_amount - net.vat_amount).abs() <= TOLERANCE);
        prop_assert!((gross.taxable_base - base).abs() <= TOLERANCE);
        prop_assert_eq!(gross.total, net.total);
    }

    #[test]
    fn reconciliation_flags_exactly_on_mismatch(
        quantities in prop::collection::vec(0u32..500, 0..12),
        declared in 0u32..3_000,
    ) {
        let mut group = WorkItemGroup::new(
            "WO-1",
            GroupKey {
                name: "Shirt".to_string(),
                pattern: "polo".to_string(),
                fabric_type: "cotton".to_string(),
                color: "navy".to_string(),
            },
            "pcs",
        );
        for (i, quantity) in quantities.iter().enumerate() {
            group.add_size_row(SizeRow::new(i.to_string(), *quantity, Decimal::ONE));
        }

        let aggregated: u64 = quantities.iter().map(|q| u64::from(*q)).sum();
        let flag = reconcile(&group, declared);

        let expect_match = declared == 0 || aggregated == u64::from(declared);
        prop_assert_eq!(flag.matches, expect_match);
        prop_assert_eq!(flag.deviation.is_none(), expect_match);
    }

    #[test]
    fn sort_keeps_relative_order_of_equal_records(
        dates in prop::collection::vec(prop::option::of(0usize..3), 0..20),
    ) {
        const DAYS: [&str; 3] = ["2024-01-01", "2024-02-01", "2024-03-01"];

        let mut orders: Vec<WorkOrder> = dates
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let mut wo = WorkOrder::new(i.to_string(), "C-1");
                wo.created_at = day.map(|d| DAYS[d].to_string());
                wo
            })
            .collect();

        sort_latest_first(&mut orders);

        for pair in orders.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.created_at == b.created_at {
                let ia: usize = a.work_order_id.parse().unwrap();
                let ib: usize = b.work_order_id.parse().unwrap();
                prop_assert!(ia < ib);
            } else {
                prop_assert!(a.created_at.is_some());
                if let (Some(x), Some(y)) = (&a.created_at, &b.created_at) {
                    prop_assert!(x > y);
                }
            }
        }
    }
}
