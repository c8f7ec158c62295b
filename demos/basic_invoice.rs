use chrono::NaiveDate;
use en16931::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "en16931=debug".into()),
        )
        .init();

    let standard = Some(Percentage::new(dec!(19)));
    let reduced = Some(Percentage::new(dec!(7)));

    // Create a German domestic invoice with two VAT rates
    let invoice = InvoiceBuilder::new(
        "RE-2024-001",
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        CurrencyCode::EUR,
        ProcessControl::new("urn:cen.eu:en16931:2017"),
    )
    .payment_due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    .payment_terms("Zahlbar innerhalb von 30 Tagen ohne Abzug")
    .buyer_reference("04011000-12345-03")
    .seller(
        SellerBuilder::new(
            "ACME GmbH",
            PostalAddressBuilder::new("Berlin", "10115", "DE")
                .street("Friedrichstraße 123")
                .build()?,
        )
        .vat_id("DE123456789")
        .electronic_address(ElectronicAddress::new("max@acme.de", "EM")?)
        .contact(Contact::new(
            Some("Max Mustermann".into()),
            Some("+49 30 12345".into()),
            Some("max@acme.de".into()),
        )?)
        .build()?,
    )
    .buyer(
        BuyerBuilder::new(
            "Kunde AG",
            PostalAddressBuilder::new("München", "80331", "DE")
                .street("Marienplatz 1")
                .build()?,
        )
        .build()?,
    )
    .add_line(
        InvoiceLineBuilder::new(
            "1",
            dec!(80),
            UnitOfMeasure::HOUR,
            PriceDetails::new(Amount::new(dec!(120)))?,
            ItemInformation::new("Softwareentwicklung")?.description("React Frontend Entwicklung"),
        )
        .vat(LineVatInformation::new(VatCategory::Standard, standard)?)
        .build()?,
    )
    .add_line(
        InvoiceLineBuilder::new(
            "2",
            dec!(3),
            UnitOfMeasure::PIECE,
            PriceDetails::new(Amount::new(dec!(24.90)))?,
            ItemInformation::new("Fachbuch")?,
        )
        .vat(LineVatInformation::new(VatCategory::Standard, reduced)?)
        .build()?,
    )
    .add_vat_breakdown(VatBreakdown::new(
        Amount::new(dec!(74.70)),
        Amount::new(dec!(5.23)),
        VatCategory::Standard,
        reduced,
    )?)
    .add_vat_breakdown(VatBreakdown::new(
        Amount::new(dec!(9600)),
        Amount::new(dec!(1824)),
        VatCategory::Standard,
        standard,
    )?)
    .totals(
        DocumentTotals::builder(
            Amount::new(dec!(9674.70)),
            Amount::new(dec!(9674.70)),
            Amount::new(dec!(11503.93)),
            Amount::new(dec!(11503.93)),
        )
        .total_vat(Amount::new(dec!(1829.23)))
        .build()?,
    )
    .payment_instructions(
        PaymentInstructions::new(PaymentMeansCode::SepaCreditTransfer)
            .with_remittance_information("RE-2024-001")
            .with_credit_transfer(
                CreditTransfer::new("DE89370400440532013000")?
                    .account_name("ACME GmbH")
                    .service_provider("COBADEFFXXX"),
            ),
    )
    .build()?;

    println!("Invoice {} built", invoice.number());
    for row in invoice.vat_breakdowns() {
        println!(
            "  {} {:>6}%  taxable {:>10}  tax {:>8}",
            row.category().code(),
            row.rate().map(|r| r.to_string()).unwrap_or_default(),
            row.taxable_amount(),
            row.tax_amount()
        );
    }
    println!("  Amount due: {} {}", invoice.totals().amount_due(), invoice.currency());

    let json = serde_json::to_string_pretty(&invoice).unwrap_or_default();
    println!("\n{json}");
    Ok(())
}
