//! Core invoice model and business rule engine.
//!
//! Leaf values validate themselves on construction. Line and document
//! aggregates add their local invariants, and [`InvoiceBuilder::build`] runs
//! the document-wide EN 16931 rules once before handing out an immutable
//! [`Invoice`].

mod builder;
pub mod category_rules;
mod codes;
pub mod countries;
pub mod currencies;
mod decimal;
mod delivery;
mod document;
mod error;
mod identifiers;
mod invoice;
mod line;
mod party;
mod payment;
mod period;
pub mod reason_codes;
pub mod units;
mod validation;

pub use builder::*;
pub use category_rules::CategoryRule;
pub use codes::*;
pub use countries::{CountryCode, is_known_country_code};
pub use currencies::{CurrencyCode, is_known_currency_code};
pub use decimal::*;
pub use delivery::*;
pub use document::*;
pub use error::*;
pub use identifiers::*;
pub use invoice::*;
pub use line::*;
pub use party::*;
pub use payment::*;
pub use period::*;
pub use reason_codes::{AllowanceReasonCode, ChargeReasonCode, VatExemptionReasonCode};
pub use units::{UnitOfMeasure, is_known_unit_code};
pub use validation::ValidationMode;
