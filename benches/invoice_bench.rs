use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use en16931::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn rate() -> Option<Percentage> {
    Some(Percentage::new(dec!(19)))
}

fn party_address(city: &str, zip: &str) -> PostalAddress {
    PostalAddressBuilder::new(city, zip, "DE")
        .street("Hauptstr. 1")
        .build()
        .unwrap()
}

/// An invoice builder with `count` identical lines and matching totals.
fn builder_with_lines(
    number: &str,
    count: usize,
    quantity: Decimal,
    price: Decimal,
) -> InvoiceBuilder {
    let mut builder = InvoiceBuilder::new(
        number,
        test_date(),
        CurrencyCode::EUR,
        ProcessControl::new("urn:cen.eu:en16931:2017"),
    )
    .payment_due_date(test_date())
    .seller(
        SellerBuilder::new("Benchmark GmbH", party_address("Berlin", "10115"))
            .vat_id("DE123456789")
            .build()
            .unwrap(),
    )
    .buyer(
        BuyerBuilder::new("Kunde AG", party_address("München", "80331"))
            .build()
            .unwrap(),
    );

    for i in 1..=count {
        builder = builder.add_line(
            InvoiceLineBuilder::new(
                i.to_string(),
                quantity,
                UnitOfMeasure::HOUR,
                PriceDetails::new(Amount::new(price)).unwrap(),
                ItemInformation::new(format!("Service item {i}")).unwrap(),
            )
            .vat(LineVatInformation::new(VatCategory::Standard, rate()).unwrap())
            .build()
            .unwrap(),
        );
    }

    let net = Amount::new(quantity * price * Decimal::from(count as u64));
    let vat = Amount::new(net.of_percentage(Percentage::new(dec!(19))).rounded_value());
    let gross = net + vat;
    builder
        .add_vat_breakdown(VatBreakdown::new(net, vat, VatCategory::Standard, rate()).unwrap())
        .totals(
            DocumentTotals::builder(net, net, gross, gross)
                .total_vat(vat)
                .build()
                .unwrap(),
        )
}

fn build_10_line_invoice() -> Invoice {
    builder_with_lines("BENCH-001", 10, dec!(5), dec!(120)).build().unwrap()
}

fn build_1000_line_invoice() -> Invoice {
    builder_with_lines("BENCH-BIG", 1000, dec!(2), dec!(9.99)).build().unwrap()
}

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_10_lines", |b| {
        b.iter(|| black_box(build_10_line_invoice()));
    });
}

fn bench_build_large_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_1000_lines", |b| {
        b.iter(|| black_box(build_1000_line_invoice()));
    });
}

fn bench_validate_only(c: &mut Criterion) {
    let builder = builder_with_lines("BENCH-VAL", 1000, dec!(2), dec!(9.99));
    c.bench_function("validate_1000_lines", |b| {
        b.iter(|| black_box(black_box(builder.clone()).build()));
    });
}

fn bench_collect_all_rejection(c: &mut Criterion) {
    let builder = builder_with_lines("BENCH-BAD", 100, dec!(1), dec!(10))
        .validation_mode(ValidationMode::CollectAll)
        .vat_point_date(test_date())
        .vat_point_date_code(VatPointDateCode::InvoiceIssueDate);
    c.bench_function("collect_all_rejection", |b| {
        b.iter(|| black_box(black_box(builder.clone()).build()));
    });
}

fn bench_serialize_json(c: &mut Criterion) {
    let invoice = build_10_line_invoice();
    c.bench_function("serialize_json", |b| {
        b.iter(|| black_box(serde_json::to_string(black_box(&invoice))));
    });
}

criterion_group!(
    benches,
    bench_build_invoice,
    bench_build_large_invoice,
    bench_validate_only,
    bench_collect_all_rejection,
    bench_serialize_json,
);
criterion_main!(benches);
