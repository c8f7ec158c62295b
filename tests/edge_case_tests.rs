//! Edge cases around limits, signs, rounding and the less common business terms.

mod common;

use common::*;
use en16931::*;
use rust_decimal_macros::dec;

// ---- 1. Input limits ----

#[test]
fn too_many_lines_is_a_builder_error() {
    let mut builder = header("RE-LIMIT-1");
    for i in 0..10_001 {
        builder = builder.add_line(standard_line(&i.to_string(), dec!(1), dec!(1)));
    }
    let err = builder
        .add_vat_breakdown(standard_breakdown(dec!(10001), dec!(1900.19)))
        .totals(totals(dec!(10001), dec!(1900.19)))
        .build()
        .unwrap_err();
    assert!(matches!(err, InvoiceError::Builder(ref msg) if msg.contains("10000")));
}

#[test]
fn overlong_invoice_number_is_a_builder_error() {
    let number = "R".repeat(201);
    let err = bare_header(number)
        .seller(seller())
        .buyer(buyer())
        .totals(totals(dec!(0), dec!(0)))
        .build()
        .unwrap_err();
    assert!(matches!(err, InvoiceError::Builder(ref msg) if msg.contains("200")));

    let number = "Ä".repeat(200);
    let inv = bare_header(number)
        .seller(seller())
        .buyer(buyer())
        .payment_due_date(date(2024, 7, 15))
        .add_line(standard_line("1", dec!(1), dec!(100)))
        .add_vat_breakdown(standard_breakdown(dec!(100), dec!(19)))
        .totals(totals(dec!(100), dec!(19)))
        .build();
    assert!(inv.is_ok());
}

// ---- 2. Document level fields ----

#[test]
fn blank_invoice_number_fails_br_02() {
    let err = bare_header("   ")
        .seller(seller())
        .buyer(buyer())
        .payment_due_date(date(2024, 7, 15))
        .add_line(standard_line("1", dec!(1), dec!(100)))
        .add_vat_breakdown(standard_breakdown(dec!(100), dec!(19)))
        .totals(totals(dec!(100), dec!(19)))
        .build()
        .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-02"));
    assert_eq!(err.kind(), Some(ViolationKind::MalformedValue));
}

#[test]
fn blank_specification_identifier_fails_br_01() {
    let err = InvoiceBuilder::new(
        "RE-1",
        date(2024, 6, 15),
        CurrencyCode::EUR,
        ProcessControl::new(""),
    )
    .seller(seller())
    .buyer(buyer())
    .payment_due_date(date(2024, 7, 15))
    .add_line(standard_line("1", dec!(1), dec!(100)))
    .add_vat_breakdown(standard_breakdown(dec!(100), dec!(19)))
    .totals(totals(dec!(100), dec!(19)))
    .build()
    .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-01"));
}

#[test]
fn vat_point_date_and_code_are_exclusive() {
    let err = standard_invoice()
        .vat_point_date(date(2024, 6, 15))
        .vat_point_date_code(VatPointDateCode::InvoiceIssueDate)
        .build()
        .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-CO-3"));

    assert!(standard_invoice().vat_point_date(date(2024, 6, 15)).build().is_ok());
    assert!(
        standard_invoice()
            .vat_point_date_code(VatPointDateCode::InvoiceIssueDate)
            .build()
            .is_ok()
    );
}

#[test]
fn vat_accounting_currency_needs_converted_total() {
    let usd = CurrencyCode::parse("USD").unwrap();
    let err = standard_invoice()
        .vat_accounting_currency(usd)
        .build()
        .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-53"));

    let converted = DocumentTotals::builder(
        amount(dec!(9649.90)),
        amount(dec!(9649.90)),
        amount(dec!(11483.38)),
        amount(dec!(11483.38)),
    )
    .total_vat(amount(dec!(1833.48)))
    .total_vat_in_accounting_currency(amount(dec!(1985.11)))
    .build()
    .unwrap();
    let inv = standard_invoice()
        .vat_accounting_currency(usd)
        .totals(converted)
        .build()
        .unwrap();
    assert_eq!(inv.vat_accounting_currency().map(|c| c.to_string()), Some("USD".into()));
    assert_eq!(
        inv.totals().total_vat_in_accounting_currency().map(|a| a.value()),
        Some(dec!(1985.11))
    );
}

#[test]
fn blank_preceding_invoice_reference_fails_br_55() {
    let err = standard_invoice()
        .preceding_invoice(PrecedingInvoiceReference::new(" ", None))
        .build()
        .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-55"));
    assert_eq!(err.violations()[0].field, "preceding_invoices[0].reference");
}

#[test]
fn blank_supporting_document_reference_fails_br_52() {
    let err = standard_invoice()
        .supporting_document(SupportingDocument::new("Lieferschein"))
        .supporting_document(SupportingDocument::new(""))
        .build()
        .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-52"));
    assert_eq!(err.violations()[0].field, "supporting_documents[1].reference");
}

#[test]
fn reversed_invoicing_period_fails_br_29() {
    let err = InvoicingPeriod::new(Some(date(2024, 6, 30)), Some(date(2024, 6, 1))).unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-29"));
}

// ---- 3. Signs and zero ----

#[test]
fn zero_amount_invoice_needs_no_due_date() {
    let inv = bare_header("RE-ZERO")
        .seller(seller())
        .buyer(buyer())
        .add_line(standard_line("1", dec!(1), dec!(0)))
        .add_vat_breakdown(standard_breakdown(dec!(0), dec!(0)))
        .totals(totals(dec!(0), dec!(0)))
        .build()
        .unwrap();
    assert!(inv.totals().amount_due().is_zero());
    assert_eq!(inv.payment_due_date(), None);
}

#[test]
fn credit_note_with_negative_quantity() {
    let inv = bare_header("GS-2024-001")
        .type_code(InvoiceTypeCode::CreditNote)
        .seller(seller())
        .buyer(buyer())
        .preceding_invoice(PrecedingInvoiceReference::new("RE-2024-001", Some(date(2024, 6, 1))))
        .add_line(standard_line("1", dec!(-2), dec!(50)))
        .add_vat_breakdown(standard_breakdown(dec!(-100), dec!(-19)))
        .totals(totals(dec!(-100), dec!(-19)))
        .build()
        .unwrap();

    assert_eq!(inv.type_code().code(), 381);
    assert_eq!(inv.lines()[0].net_amount().value(), dec!(-100));
    assert!(inv.totals().amount_due().is_negative());
}

#[test]
fn negative_item_price_is_rejected() {
    let err = PriceDetails::new(amount(dec!(-0.01))).unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-27"));
}

#[test]
fn line_amount_outside_decimal_range_is_rejected() {
    let err = InvoiceLineBuilder::new(
        "1",
        dec!(10000000000000000000),
        UnitOfMeasure::PIECE,
        PriceDetails::new(amount(dec!(100000000000))).unwrap(),
        ItemInformation::new("Bulk").unwrap(),
    )
    .vat(LineVatInformation::new(VatCategory::Standard, rate(dec!(19))).unwrap())
    .net_amount(amount(dec!(1)))
    .build()
    .unwrap_err();
    assert_eq!(err.first_rule(), Some("BT-131"));
    assert_eq!(err.kind(), Some(ViolationKind::MalformedValue));
}

#[test]
fn line_sum_outside_decimal_range_is_rejected() {
    let huge = dec!(50000000000000000000000000000);
    let builder = header("RE-2024-BIG")
        .add_line(standard_line("1", dec!(1), huge))
        .add_line(standard_line("2", dec!(1), huge))
        .add_vat_breakdown(standard_breakdown(dec!(100), dec!(19)))
        .totals(totals(dec!(100), dec!(19)));

    let err = builder.clone().build().unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-CO-10"));
    assert_eq!(err.kind(), Some(ViolationKind::MalformedValue));

    let err = builder
        .validation_mode(ValidationMode::CollectAll)
        .build()
        .unwrap_err();
    let taxable = err.violations().iter().find(|v| v.rule == "BR-S-8").unwrap();
    assert_eq!(taxable.kind, ViolationKind::MalformedValue);
}

// ---- 4. Rounding ----

#[test]
fn prepaid_and_rounding_amount() {
    // 99.99 × 19 % = 18.9981 → 19.00; 118.99 - 50 + 0.01 = 69.00
    let totals = DocumentTotals::builder(
        amount(dec!(99.99)),
        amount(dec!(99.99)),
        amount(dec!(118.99)),
        amount(dec!(69.00)),
    )
    .total_vat(amount(dec!(19.00)))
    .paid_amount(amount(dec!(50)))
    .rounding_amount(amount(dec!(0.01)))
    .build()
    .unwrap();

    let inv = header("RE-ROUND-1")
        .add_line(standard_line("1", dec!(1), dec!(99.99)))
        .add_vat_breakdown(standard_breakdown(dec!(99.99), dec!(19.00)))
        .totals(totals)
        .build()
        .unwrap();
    assert_eq!(inv.totals().paid_amount().map(|a| a.value()), Some(dec!(50)));
    assert_eq!(inv.totals().rounding_amount().map(|a| a.value()), Some(dec!(0.01)));
}

#[test]
fn amount_due_mismatch_fails_br_co_16() {
    let err = DocumentTotals::builder(
        amount(dec!(100)),
        amount(dec!(100)),
        amount(dec!(119)),
        amount(dec!(119)),
    )
    .total_vat(amount(dec!(19)))
    .paid_amount(amount(dec!(19)))
    .build()
    .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-CO-16"));
}

#[test]
fn fractional_tax_rounds_half_up() {
    // 0.50 × 7 % = 0.035 → 0.04
    let inv = header("RE-ROUND-2")
        .add_line(line("1", dec!(1), dec!(0.50), VatCategory::Standard, rate(dec!(7))))
        .add_vat_breakdown(breakdown(dec!(0.50), dec!(0.04), VatCategory::Standard, rate(dec!(7))))
        .totals(totals(dec!(0.50), dec!(0.04)))
        .build();
    assert!(inv.is_ok(), "{inv:?}");

    let err = header("RE-ROUND-3")
        .add_line(line("1", dec!(1), dec!(0.50), VatCategory::Standard, rate(dec!(7))))
        .add_vat_breakdown(breakdown(dec!(0.50), dec!(0.03), VatCategory::Standard, rate(dec!(7))))
        .totals(totals(dec!(0.50), dec!(0.03)))
        .build()
        .unwrap_err();
    assert_eq!(err.first_rule(), Some("BR-S-9"));
}

#[test]
fn percentage_based_allowance() {
    let allowance = DocumentLevelAllowance::new(
        amount(dec!(20)),
        VatCategory::Standard,
        rate(dec!(19)),
        None,
        Some(AllowanceReasonCode::parse("95").unwrap()),
    )
    .unwrap()
    .with_base(amount(dec!(200)), Percentage::new(dec!(10)));

    let totals = DocumentTotals::builder(
        amount(dec!(200)),
        amount(dec!(180)),
        amount(dec!(214.20)),
        amount(dec!(214.20)),
    )
    .sum_of_allowances(amount(dec!(20)))
    .total_vat(amount(dec!(34.20)))
    .build()
    .unwrap();

    let inv = header("RE-PCT-1")
        .add_line(standard_line("1", dec!(4), dec!(50)))
        .add_allowance(allowance)
        .add_vat_breakdown(standard_breakdown(dec!(180), dec!(34.20)))
        .totals(totals)
        .build()
        .unwrap();
    assert_eq!(inv.allowances()[0].percentage().map(|p| p.value()), Some(dec!(10)));
    assert_eq!(inv.allowances()[0].base_amount().map(|a| a.value()), Some(dec!(200)));
}

// ---- 5. Text ----

#[test]
fn unicode_names_are_preserved() {
    let seller = SellerBuilder::new("Müller & Söhne GmbH, Ŝtraße", address("Köln", "50667", "DE"))
        .vat_id("DE 123 456 789")
        .build()
        .unwrap();
    let line = InvoiceLineBuilder::new(
        "1",
        dec!(1),
        UnitOfMeasure::PIECE,
        PriceDetails::new(amount(dec!(100))).unwrap(),
        ItemInformation::new("日本茶 (Sencha) 🍵").unwrap(),
    )
    .vat(LineVatInformation::new(VatCategory::Standard, rate(dec!(19))).unwrap())
    .build()
    .unwrap();

    let inv = header("RE-ÜTF-8")
        .seller(seller)
        .add_line(line)
        .add_vat_breakdown(standard_breakdown(dec!(100), dec!(19)))
        .totals(totals(dec!(100), dec!(19)))
        .build()
        .unwrap();

    assert_eq!(inv.seller().name(), "Müller & Söhne GmbH, Ŝtraße");
    assert_eq!(inv.seller().vat_identifier().map(|v| v.as_str()), Some("DE123456789"));
    assert_eq!(inv.lines()[0].item().name(), "日本茶 (Sencha) 🍵");
}

#[test]
fn blank_optional_text_is_dropped() {
    let inv = standard_invoice().payment_terms("   ").build().unwrap();
    assert_eq!(inv.payment_terms(), None);
}

// ---- 6. Fully populated invoice ----

#[test]
fn all_optional_groups_populated() {
    let seller = SellerBuilder::new("ACME GmbH", address("Berlin", "10115", "DE"))
        .trading_name("ACME")
        .identifier(Identifier::with_scheme("4000001000005", "0088").unwrap())
        .legal_registration_identifier(LegalRegistrationIdentifier::new("HRB 12345").unwrap())
        .vat_id("DE123456789")
        .tax_registration_id("30/123/45678")
        .additional_legal_information("Geschäftsführer: Max Mustermann")
        .electronic_address(ElectronicAddress::new("rechnung@acme.de", "EM").unwrap())
        .contact(Contact::new(None, None, Some("buchhaltung@acme.de".into())).unwrap())
        .build()
        .unwrap();
    let buyer = BuyerBuilder::new("Kunde AG", address("München", "80331", "DE"))
        .trading_name("Kunde")
        .identifier(Identifier::new("K-100").unwrap())
        .vat_id("DE987654321")
        .electronic_address(ElectronicAddress::new("eingang@kunde.de", "EM").unwrap())
        .contact(Contact::new(Some("Einkauf".into()), Some("+49 89 1234".into()), None).unwrap())
        .build()
        .unwrap();

    let item = ItemInformation::new("Beratung")
        .unwrap()
        .description("Technische Beratung vor Ort")
        .seller_identifier("SVC-01")
        .buyer_identifier("B-77")
        .standard_identifier(Identifier::with_scheme("4012345678901", "0160").unwrap())
        .classification_identifier(Identifier::with_scheme("72224000", "STI").unwrap())
        .origin_country(CountryCode::parse("DE").unwrap())
        .attribute(ItemAttribute::new("Ort", "München").unwrap());
    let price = PriceDetails::new(amount(dec!(150)))
        .unwrap()
        .with_gross_price(amount(dec!(160)), Some(amount(dec!(10))))
        .unwrap();
    let line = InvoiceLineBuilder::new("1", dec!(10), UnitOfMeasure::HOUR, price, item)
        .vat(LineVatInformation::new(VatCategory::Standard, rate(dec!(19))).unwrap())
        .note("Einsatz Juni")
        .object_identifier(Identifier::new("OBJ-1").unwrap())
        .buyer_order_line_reference("10")
        .accounting_reference("4400")
        .period(InvoiceLinePeriod::new(Some(date(2024, 6, 3)), Some(date(2024, 6, 7))).unwrap())
        .add_allowance(
            InvoiceLineAllowance::new(amount(dec!(50)), Some("Rabatt".into()), None)
                .unwrap()
                .with_base(amount(dec!(1500)), Percentage::new(dec!(3.3333))),
        )
        .build()
        .unwrap();

    let process = ProcessControl::new(SPEC_ID)
        .with_business_process_type("urn:fdc:peppol.eu:2017:poacc:billing:01:1.0");
    let inv = InvoiceBuilder::new("RE-FULL-1", date(2024, 6, 15), CurrencyCode::EUR, process)
        .seller(seller)
        .buyer(buyer)
        .payment_due_date(date(2024, 7, 15))
        .payment_terms("30 Tage netto")
        .buyer_reference("LEITWEG-1")
        .project_reference("PRJ-1")
        .contract_reference("V-2024-1")
        .purchase_order_reference("PO-1")
        .sales_order_reference("SO-1")
        .receiving_advice_reference("WE-1")
        .despatch_advice_reference("LS-1")
        .tender_or_lot_reference("LOS-1")
        .invoiced_object_identifier("ZÄHLER-1")
        .buyer_accounting_reference("KST-1")
        .add_note(InvoiceNote::new("Es gelten unsere AGB").with_subject_code("AAI"))
        .payee(Payee::new("Factoring AG", Some(Identifier::new("P-1").unwrap()), None).unwrap())
        .delivery(
            DeliveryInformation::new()
                .party_name("Baustelle")
                .location_identifier(Identifier::new("LOC-1").unwrap())
                .period(InvoicingPeriod::new(Some(date(2024, 6, 3)), None).unwrap())
                .address(address("München", "80333", "DE")),
        )
        .invoicing_period(june_2024())
        .payment_instructions(
            PaymentInstructions::new(PaymentMeansCode::SepaDirectDebit).with_direct_debit(
                DirectDebit {
                    mandate_reference: Some("MANDAT-1".into()),
                    creditor_identifier: Some(Identifier::new("DE98ZZZ09999999999").unwrap()),
                    debited_account: Some("DE02120300000000202051".into()),
                },
            ),
        )
        .supporting_document(
            SupportingDocument::new("Stundenzettel")
                .description("Juni")
                .external_location("https://example.com/hours.pdf"),
        )
        .add_line(line)
        // Document sums reconcile against quantity × net price, not BT-131.
        .add_vat_breakdown(standard_breakdown(dec!(1500), dec!(285)))
        .totals(totals(dec!(1500), dec!(285)))
        .build()
        .unwrap();

    let line = &inv.lines()[0];
    assert_eq!(line.net_amount().value(), dec!(1450.00));
    assert_eq!(line.priced_amount().value(), dec!(1500));
    assert_eq!(line.price().gross_price().map(|a| a.value()), Some(dec!(160)));
    assert_eq!(line.item().attributes()[0].value(), "München");
    assert_eq!(line.item().item_origin_country().map(|c| c.to_string()), Some("DE".into()));
    assert_eq!(line.period().and_then(|p| p.end()), Some(date(2024, 6, 7)));

    let refs = inv.references();
    assert_eq!(refs.contract_reference.as_deref(), Some("V-2024-1"));
    assert_eq!(refs.tender_or_lot_reference.as_deref(), Some("LOS-1"));
    assert_eq!(inv.notes()[0].subject_code.as_deref(), Some("AAI"));
    assert_eq!(
        inv.process_control().business_process_type(),
        Some("urn:fdc:peppol.eu:2017:poacc:billing:01:1.0")
    );
    assert_eq!(
        inv.payment_instructions()
            .and_then(|p| p.direct_debit())
            .and_then(|d| d.mandate_reference.as_deref()),
        Some("MANDAT-1")
    );
    assert_eq!(inv.seller().electronic_address().map(|a| a.scheme.as_str()), Some("EM"));
    assert_eq!(inv.buyer().contact().and_then(|c| c.phone()), Some("+49 89 1234"));
}
