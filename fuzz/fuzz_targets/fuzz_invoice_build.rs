#![no_main]

use chrono::NaiveDate;
use en16931::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fn amount(bytes: &[u8]) -> Amount {
    let mut raw = [0u8; 4];
    raw[..bytes.len().min(4)].copy_from_slice(&bytes[..bytes.len().min(4)]);
    Amount::new(Decimal::new(i32::from_le_bytes(raw) as i64, 2))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }
    let category = VatCategory::ALL[data[0] as usize % VatCategory::ALL.len()];
    let rate = match data[1] % 3 {
        0 => None,
        1 => Some(Percentage::ZERO),
        _ => Some(Percentage::new(Decimal::from(data[1] % 30))),
    };
    let mode = if data[2] % 2 == 0 {
        ValidationMode::FailFast
    } else {
        ValidationMode::CollectAll
    };

    let Ok(address) = PostalAddressBuilder::new("Berlin", "10115", "DE").build() else {
        return;
    };
    let Ok(seller) = SellerBuilder::new("Seller", address.clone())
        .vat_id("DE123456789")
        .build()
    else {
        return;
    };
    let Ok(buyer) = BuyerBuilder::new("Buyer", address).build() else {
        return;
    };
    let Ok(price) = PriceDetails::new(amount(&data[4..8])) else {
        return;
    };
    let Ok(item) = ItemInformation::new("Item") else {
        return;
    };
    let Ok(vat) = LineVatInformation::new(category, rate) else {
        return;
    };
    let quantity = Decimal::from(data[3]);
    let Ok(line) = InvoiceLineBuilder::new("1", quantity, UnitOfMeasure::PIECE, price, item)
        .vat(vat)
        .build()
    else {
        return;
    };
    let Ok(row) = VatBreakdown::new(amount(&data[8..12]), amount(&data[12..16]), category, rate)
    else {
        return;
    };
    let net = amount(&data[16..20]);
    let tax = amount(&data[20..24]);
    let Ok(totals) = DocumentTotals::builder(net, net, net + tax, net + tax)
        .total_vat(tax)
        .build()
    else {
        return;
    };

    let Some(issue_date) = NaiveDate::from_ymd_opt(2024, 6, 15) else {
        return;
    };

    // Rule violations are fine, panics are bugs.
    let _ = InvoiceBuilder::new(
        "FUZZ-1",
        issue_date,
        CurrencyCode::EUR,
        ProcessControl::new("urn:cen.eu:en16931:2017"),
    )
    .validation_mode(mode)
    .seller(seller)
    .buyer(buyer)
    .add_line(line)
    .add_vat_breakdown(row)
    .totals(totals)
    .build();
});
