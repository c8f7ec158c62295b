use chrono::NaiveDate;
use en16931::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn address(city: &str, zip: &str, country: &str) -> PostalAddress {
    PostalAddressBuilder::new(city, zip, country).build().unwrap()
}

fn line(category: VatCategory, rate: Option<Percentage>) -> InvoiceLine {
    InvoiceLineBuilder::new(
        "1",
        dec!(10),
        UnitOfMeasure::HOUR,
        PriceDetails::new(Amount::new(dec!(150))).unwrap(),
        ItemInformation::new("Consulting").unwrap(),
    )
    .vat(LineVatInformation::new(category, rate).unwrap())
    .build()
    .unwrap()
}

fn totals(net: Amount, vat: Amount) -> DocumentTotals {
    DocumentTotals::builder(net, net, net + vat, net + vat)
        .total_vat(vat)
        .build()
        .unwrap()
}

fn report(title: &str, result: Result<Invoice, InvoiceError>) {
    println!("=== {title} ===");
    match result {
        Ok(inv) => println!("  OK: invoice {} accepted", inv.number()),
        Err(InvoiceError::Builder(msg)) => println!("  Builder error: {msg}"),
        Err(err) => {
            for v in err.violations() {
                println!("  [{}] {:?} at {}: {}", v.rule, v.kind, v.field, v.message);
            }
        }
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "en16931=warn".into()),
        )
        .init();

    let standard = Some(Percentage::new(dec!(19)));
    let zero = Some(Percentage::ZERO);
    let seller = SellerBuilder::new("ACME GmbH", address("Berlin", "10115", "DE"))
        .vat_id("DE123456789")
        .build()
        .unwrap();
    let buyer = BuyerBuilder::new("Kunde AG", address("München", "80331", "DE"))
        .build()
        .unwrap();
    let header = |number: &str| {
        InvoiceBuilder::new(
            number,
            date(2024, 6, 15),
            CurrencyCode::EUR,
            ProcessControl::new("urn:cen.eu:en16931:2017"),
        )
        .seller(seller.clone())
        .buyer(buyer.clone())
    };

    // ── 1. Leaf values reject themselves ──────────────────────────────
    println!("=== Leaf values ===");
    if let Err(e) = Contact::new(Some("Max".into()), None, None) {
        println!("  {e}");
    }
    if let Err(e) = LineVatInformation::new(VatCategory::Standard, zero) {
        println!("  {e}");
    }
    if let Err(e) = PaymentCardInformation::new("4111 1111 1111 1111", None) {
        println!("  {e}");
    }
    println!();

    // ── 2. Builder error: missing mandatory input ─────────────────────
    report("Missing totals", header("RE-2024-001").build());

    // ── 3. Fail-fast: the first violated rule ─────────────────────────
    let net = Amount::new(dec!(1500));
    let vat = Amount::new(dec!(285));
    report(
        "Fail-fast: VAT total mismatch",
        header("RE-2024-002")
            .payment_due_date(date(2024, 7, 15))
            .add_line(line(VatCategory::Standard, standard))
            .add_vat_breakdown(
                VatBreakdown::new(net, Amount::new(dec!(280)), VatCategory::Standard, standard)
                    .unwrap(),
            )
            .totals(totals(net, vat))
            .build(),
    );

    // ── 4. Collect-all: every violated rule in evaluation order ───────
    report(
        "Collect-all: reverse charge without identifiers",
        header("")
            .validation_mode(ValidationMode::CollectAll)
            .add_line(line(VatCategory::ReverseCharge, zero))
            .add_vat_breakdown(
                VatBreakdown::new(net, Amount::ZERO, VatCategory::ReverseCharge, zero).unwrap(),
            )
            .totals(totals(net, Amount::ZERO))
            .build(),
    );

    // ── 5. The corrected invoice passes ───────────────────────────────
    let reverse_charge_buyer = BuyerBuilder::new("Client SARL", address("Paris", "75001", "FR"))
        .vat_id("FR12345678901")
        .build()
        .unwrap();
    report(
        "Corrected reverse charge invoice",
        header("RE-2024-003")
            .buyer(reverse_charge_buyer)
            .payment_due_date(date(2024, 7, 15))
            .add_line(line(VatCategory::ReverseCharge, zero))
            .add_vat_breakdown(
                VatBreakdown::new(net, Amount::ZERO, VatCategory::ReverseCharge, zero)
                    .unwrap()
                    .with_exemption(
                        Some("Reverse charge".into()),
                        Some(VatExemptionReasonCode::parse("VATEX-EU-AE").unwrap()),
                    ),
            )
            .totals(totals(net, Amount::ZERO))
            .build(),
    );
}
