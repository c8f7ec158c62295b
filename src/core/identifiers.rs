//! Opaque identifier values held by parties, lines and references.
//!
//! These wrappers only check that a value is present and well-formed enough
//! to be used as an identifier. Cross-entity rules that look at identifiers
//! (VAT category requirements, BR-CO-9) are evaluated by the invoice pass.

use serde::Serialize;

use super::countries::CountryCode;
use super::error::{InvoiceError, RuleViolation, ensure, non_empty, present};

/// Identifier with an optional scheme (ISO 6523 ICD, EAS, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub value: String,
    pub scheme: Option<String>,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Result<Self, InvoiceError> {
        Ok(Self {
            value: non_empty(value, "BR-CL-10", "identifier")?,
            scheme: None,
        })
    }

    pub fn with_scheme(
        value: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Result<Self, InvoiceError> {
        Ok(Self {
            value: non_empty(value, "BR-CL-10", "identifier")?,
            scheme: present(Some(scheme.into())),
        })
    }
}

/// BT-31 / BT-48 / BT-63: VAT identifier, e.g. "DE123456789".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VatIdentifier(String);

impl VatIdentifier {
    /// Accepts ASCII letters, digits and `+*.` with embedded spaces removed.
    pub fn new(value: impl Into<String>) -> Result<Self, InvoiceError> {
        let value: String = value
            .into()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        ensure(value.len() >= 3, || {
            RuleViolation::malformed(
                "BR-CO-9",
                "vat_identifier",
                format!("VAT identifier '{value}' is too short"),
            )
        })?;
        ensure(
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '*' | '.')),
            || {
                RuleViolation::malformed(
                    "BR-CO-9",
                    "vat_identifier",
                    format!("VAT identifier '{value}' contains invalid characters"),
                )
            },
        )?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ISO 3166-1 country the prefix denotes. `EL` is accepted for Greece.
    pub fn country_prefix(&self) -> Option<CountryCode> {
        let prefix = self.0.get(..2)?;
        if prefix == "EL" {
            return CountryCode::parse("GR").ok();
        }
        CountryCode::parse(prefix).ok()
    }

    pub fn has_valid_prefix(&self) -> bool {
        self.country_prefix().is_some()
    }
}

impl std::fmt::Display for VatIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// BT-30 / BT-47 / BT-61: legal registration identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LegalRegistrationIdentifier(pub Identifier);

impl LegalRegistrationIdentifier {
    pub fn new(value: impl Into<String>) -> Result<Self, InvoiceError> {
        Identifier::new(value).map(Self)
    }

    pub fn with_scheme(
        value: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Result<Self, InvoiceError> {
        Identifier::with_scheme(value, scheme).map(Self)
    }
}

/// BT-32: seller tax registration identifier (local tax number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaxRegistrationIdentifier(String);

impl TaxRegistrationIdentifier {
    pub fn new(value: impl Into<String>) -> Result<Self, InvoiceError> {
        non_empty(value, "BR-CL-10", "tax_registration_identifier").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// BT-34 / BT-49: electronic address with mandatory scheme (BR-62 / BR-63).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElectronicAddress {
    pub value: String,
    pub scheme: String,
}

impl ElectronicAddress {
    pub fn new(value: impl Into<String>, scheme: impl Into<String>) -> Result<Self, InvoiceError> {
        Ok(Self {
            value: non_empty(value, "BR-62", "electronic_address")?,
            scheme: non_empty(scheme, "BR-62", "electronic_address.scheme")?,
        })
    }
}
