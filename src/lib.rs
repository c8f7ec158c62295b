//! # en16931
//!
//! In-memory model of an EN 16931 electronic invoice together with the
//! business rules (BR-*, BR-CO-* and the per VAT category families) that must
//! hold before an invoice is considered well-formed.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Comparisons between amounts round both sides half away from zero to two
//! decimals; sums are accumulated unrounded and rounded once.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use en16931::*;
//! use rust_decimal_macros::dec;
//!
//! let address = |city: &str, zip: &str| {
//!     PostalAddressBuilder::new(city, zip, "DE").build().unwrap()
//! };
//! let rate = Some(Percentage::new(dec!(19)));
//!
//! let invoice = InvoiceBuilder::new(
//!     "RE-2024-001",
//!     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//!     CurrencyCode::EUR,
//!     ProcessControl::new("urn:cen.eu:en16931:2017"),
//! )
//! .seller(
//!     SellerBuilder::new("ACME GmbH", address("Berlin", "10115"))
//!         .vat_id("DE123456789")
//!         .build()
//!         .unwrap(),
//! )
//! .buyer(BuyerBuilder::new("Kunde AG", address("München", "80331")).build().unwrap())
//! .add_line(
//!     InvoiceLineBuilder::new(
//!         "1",
//!         dec!(10),
//!         UnitOfMeasure::HOUR,
//!         PriceDetails::new(Amount::new(dec!(150))).unwrap(),
//!         ItemInformation::new("Beratung").unwrap(),
//!     )
//!     .vat(LineVatInformation::new(VatCategory::Standard, rate).unwrap())
//!     .build()
//!     .unwrap(),
//! )
//! .add_vat_breakdown(
//!     VatBreakdown::new(
//!         Amount::new(dec!(1500)),
//!         Amount::new(dec!(285)),
//!         VatCategory::Standard,
//!         rate,
//!     )
//!     .unwrap(),
//! )
//! .totals(
//!     DocumentTotals::builder(
//!         Amount::new(dec!(1500)),
//!         Amount::new(dec!(1500)),
//!         Amount::new(dec!(1785)),
//!         Amount::new(dec!(1785)),
//!     )
//!     .total_vat(Amount::new(dec!(285)))
//!     .build()
//!     .unwrap(),
//! )
//! .payment_due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
//! .build()
//! .unwrap();
//!
//! assert_eq!(invoice.totals().amount_due().rounded_value(), dec!(1785.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, code lists, business rule engine |

#[cfg(feature = "core")]
pub mod core;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
