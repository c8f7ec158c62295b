#![allow(dead_code)]

use chrono::NaiveDate;
use en16931::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const SPEC_ID: &str = "urn:cen.eu:en16931:2017";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value)
}

pub fn rate(value: Decimal) -> Option<Percentage> {
    Some(Percentage::new(value))
}

pub fn address(city: &str, post_code: &str, country: &str) -> PostalAddress {
    PostalAddressBuilder::new(city, post_code, country)
        .street("Hauptstraße 1")
        .build()
        .unwrap()
}

pub fn seller() -> Seller {
    SellerBuilder::new("ACME GmbH", address("Berlin", "10115", "DE"))
        .vat_id("DE123456789")
        .contact(
            Contact::new(
                Some("Max Mustermann".into()),
                Some("+49 30 12345".into()),
                Some("max@acme.de".into()),
            )
            .unwrap(),
        )
        .build()
        .unwrap()
}

/// Seller identified only by a plain seller identifier (BT-29).
pub fn seller_without_tax_ids() -> Seller {
    SellerBuilder::new("ACME GmbH", address("Berlin", "10115", "DE"))
        .identifier(Identifier::new("SELLER-4711").unwrap())
        .build()
        .unwrap()
}

pub fn buyer() -> Buyer {
    BuyerBuilder::new("Kunde AG", address("München", "80331", "DE"))
        .build()
        .unwrap()
}

pub fn line(
    id: &str,
    quantity: Decimal,
    net_price: Decimal,
    category: VatCategory,
    vat_rate: Option<Percentage>,
) -> InvoiceLine {
    InvoiceLineBuilder::new(
        id,
        quantity,
        UnitOfMeasure::PIECE,
        PriceDetails::new(amount(net_price)).unwrap(),
        ItemInformation::new(format!("Item {id}")).unwrap(),
    )
    .vat(LineVatInformation::new(category, vat_rate).unwrap())
    .build()
    .unwrap()
}

pub fn standard_line(id: &str, quantity: Decimal, net_price: Decimal) -> InvoiceLine {
    line(id, quantity, net_price, VatCategory::Standard, rate(dec!(19)))
}

/// Totals without allowances, charges or prepayment.
pub fn totals(net: Decimal, vat: Decimal) -> DocumentTotals {
    DocumentTotals::builder(amount(net), amount(net), amount(net + vat), amount(net + vat))
        .total_vat(amount(vat))
        .build()
        .unwrap()
}

pub fn standard_breakdown(taxable: Decimal, tax: Decimal) -> VatBreakdown {
    breakdown(taxable, tax, VatCategory::Standard, rate(dec!(19)))
}

pub fn breakdown(
    taxable: Decimal,
    tax: Decimal,
    category: VatCategory,
    vat_rate: Option<Percentage>,
) -> VatBreakdown {
    VatBreakdown::new(amount(taxable), amount(tax), category, vat_rate).unwrap()
}

pub fn exempt_breakdown(taxable: Decimal, category: VatCategory, code: &str) -> VatBreakdown {
    let vat_rate = if category == VatCategory::NotSubjectToVat {
        None
    } else {
        Some(Percentage::ZERO)
    };
    breakdown(taxable, dec!(0), category, vat_rate)
        .with_exemption(None, Some(VatExemptionReasonCode::parse(code).unwrap()))
}

pub fn june_2024() -> InvoicingPeriod {
    InvoicingPeriod::new(Some(date(2024, 6, 1)), Some(date(2024, 6, 30))).unwrap()
}

/// Invoice builder with only the mandatory constructor inputs.
pub fn bare_header(number: impl Into<String>) -> InvoiceBuilder {
    InvoiceBuilder::new(
        number,
        date(2024, 6, 15),
        CurrencyCode::EUR,
        ProcessControl::new(SPEC_ID),
    )
}

/// Invoice header with seller, buyer and a due date, but no lines or totals.
pub fn header(number: &str) -> InvoiceBuilder {
    bare_header(number)
        .seller(seller())
        .buyer(buyer())
        .payment_due_date(date(2024, 7, 15))
}

/// 80 h × 120.00 + 1 × 49.90 at 19 %: net 9649.90, VAT 1833.48.
pub fn standard_invoice() -> InvoiceBuilder {
    header("RE-2024-001")
        .add_line(standard_line("1", dec!(80), dec!(120)))
        .add_line(standard_line("2", dec!(1), dec!(49.90)))
        .add_vat_breakdown(standard_breakdown(dec!(9649.90), dec!(1833.48)))
        .totals(totals(dec!(9649.90), dec!(1833.48)))
}
