use serde::Serialize;

use super::countries::CountryCode;
use super::error::{InvoiceError, RuleViolation, ensure, non_empty, present};
use super::identifiers::{
    ElectronicAddress, Identifier, LegalRegistrationIdentifier, TaxRegistrationIdentifier,
    VatIdentifier,
};

/// BG-5 / BG-8 / BG-12 / BG-15: Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostalAddress {
    /// BT-35: Address line 1 (street + house number).
    pub line_one: Option<String>,
    /// BT-36: Address line 2.
    pub line_two: Option<String>,
    /// BT-162: Address line 3.
    pub line_three: Option<String>,
    /// BT-37: City.
    pub city: Option<String>,
    /// BT-38: Post code.
    pub post_code: Option<String>,
    /// BT-39: Country subdivision.
    pub subdivision: Option<String>,
    /// BT-40: Country code (mandatory, BR-9 / BR-11 / BR-20 / BR-57).
    pub country_code: CountryCode,
}

impl PostalAddress {
    pub fn new(country_code: CountryCode) -> Self {
        Self {
            line_one: None,
            line_two: None,
            line_three: None,
            city: None,
            post_code: None,
            subdivision: None,
            country_code,
        }
    }
}

/// BG-6 / BG-9: Contact point. At least a phone number or an email is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    point: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

impl Contact {
    pub fn new(
        point: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<Self, InvoiceError> {
        let phone = present(phone);
        let email = present(email);
        ensure(phone.is_some() || email.is_some(), || {
            RuleViolation::missing_alternative(
                "BG-6",
                "contact",
                "contact requires a telephone number (BT-42/BT-57) or an email address (BT-43/BT-58)",
            )
        })?;
        Ok(Self {
            point: present(point),
            phone,
            email,
        })
    }

    /// BT-41 / BT-56.
    pub fn point(&self) -> Option<&str> {
        self.point.as_deref()
    }

    /// BT-42 / BT-57.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// BT-43 / BT-58.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// BG-4: Seller. Built through [`SellerBuilder`](super::SellerBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seller {
    pub(crate) name: String,
    pub(crate) trading_name: Option<String>,
    pub(crate) identifiers: Vec<Identifier>,
    pub(crate) legal_registration_identifier: Option<LegalRegistrationIdentifier>,
    pub(crate) vat_identifier: Option<VatIdentifier>,
    pub(crate) tax_registration_identifier: Option<TaxRegistrationIdentifier>,
    pub(crate) additional_legal_information: Option<String>,
    pub(crate) electronic_address: Option<ElectronicAddress>,
    pub(crate) address: PostalAddress,
    pub(crate) contact: Option<Contact>,
}

impl Seller {
    /// BT-27.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// BT-28.
    pub fn trading_name(&self) -> Option<&str> {
        self.trading_name.as_deref()
    }

    /// BT-29.
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// BT-30.
    pub fn legal_registration_identifier(&self) -> Option<&LegalRegistrationIdentifier> {
        self.legal_registration_identifier.as_ref()
    }

    /// BT-31.
    pub fn vat_identifier(&self) -> Option<&VatIdentifier> {
        self.vat_identifier.as_ref()
    }

    /// BT-32.
    pub fn tax_registration_identifier(&self) -> Option<&TaxRegistrationIdentifier> {
        self.tax_registration_identifier.as_ref()
    }

    /// BT-33.
    pub fn additional_legal_information(&self) -> Option<&str> {
        self.additional_legal_information.as_deref()
    }

    /// BT-34.
    pub fn electronic_address(&self) -> Option<&ElectronicAddress> {
        self.electronic_address.as_ref()
    }

    /// BG-5.
    pub fn address(&self) -> &PostalAddress {
        &self.address
    }

    /// BG-6.
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub(crate) fn check(&self) -> Result<(), InvoiceError> {
        ensure(!self.name.trim().is_empty(), || {
            RuleViolation::malformed("BR-6", "seller.name", "seller name must not be empty")
        })?;
        ensure(
            !self.identifiers.is_empty()
                || self.legal_registration_identifier.is_some()
                || self.vat_identifier.is_some(),
            || {
                RuleViolation::missing_alternative(
                    "BR-CO-26",
                    "seller",
                    "seller requires a seller identifier (BT-29), a legal registration identifier (BT-30) or a VAT identifier (BT-31)",
                )
            },
        )
    }
}

/// BG-7: Buyer. Built through [`BuyerBuilder`](super::BuyerBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Buyer {
    pub(crate) name: String,
    pub(crate) trading_name: Option<String>,
    pub(crate) identifier: Option<Identifier>,
    pub(crate) legal_registration_identifier: Option<LegalRegistrationIdentifier>,
    pub(crate) vat_identifier: Option<VatIdentifier>,
    pub(crate) electronic_address: Option<ElectronicAddress>,
    pub(crate) address: PostalAddress,
    pub(crate) contact: Option<Contact>,
}

impl Buyer {
    /// BT-44.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// BT-45.
    pub fn trading_name(&self) -> Option<&str> {
        self.trading_name.as_deref()
    }

    /// BT-46.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// BT-47.
    pub fn legal_registration_identifier(&self) -> Option<&LegalRegistrationIdentifier> {
        self.legal_registration_identifier.as_ref()
    }

    /// BT-48.
    pub fn vat_identifier(&self) -> Option<&VatIdentifier> {
        self.vat_identifier.as_ref()
    }

    /// BT-49.
    pub fn electronic_address(&self) -> Option<&ElectronicAddress> {
        self.electronic_address.as_ref()
    }

    /// BG-8.
    pub fn address(&self) -> &PostalAddress {
        &self.address
    }

    /// BG-9.
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub(crate) fn check(&self) -> Result<(), InvoiceError> {
        ensure(!self.name.trim().is_empty(), || {
            RuleViolation::malformed("BR-7", "buyer.name", "buyer name must not be empty")
        })
    }
}

/// BG-11: Seller tax representative party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerTaxRepresentativeParty {
    name: String,
    vat_identifier: VatIdentifier,
    address: PostalAddress,
}

impl SellerTaxRepresentativeParty {
    /// Name (BR-18), VAT identifier (BR-56) and address (BR-19) are all mandatory.
    pub fn new(
        name: impl Into<String>,
        vat_identifier: VatIdentifier,
        address: PostalAddress,
    ) -> Result<Self, InvoiceError> {
        Ok(Self {
            name: non_empty(name, "BR-18", "tax_representative.name")?,
            vat_identifier,
            address,
        })
    }

    /// BT-62.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// BT-63.
    pub fn vat_identifier(&self) -> &VatIdentifier {
        &self.vat_identifier
    }

    /// BG-12.
    pub fn address(&self) -> &PostalAddress {
        &self.address
    }
}

/// BG-10: Payee, when different from the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payee {
    name: String,
    identifier: Option<Identifier>,
    legal_registration_identifier: Option<LegalRegistrationIdentifier>,
}

impl Payee {
    pub fn new(
        name: impl Into<String>,
        identifier: Option<Identifier>,
        legal_registration_identifier: Option<LegalRegistrationIdentifier>,
    ) -> Result<Self, InvoiceError> {
        Ok(Self {
            name: non_empty(name, "BR-17", "payee.name")?,
            identifier,
            legal_registration_identifier,
        })
    }

    /// BT-59.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// BT-60.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// BT-61.
    pub fn legal_registration_identifier(&self) -> Option<&LegalRegistrationIdentifier> {
        self.legal_registration_identifier.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViolationKind;

    fn address() -> PostalAddress {
        PostalAddress::new(CountryCode::parse("DE").unwrap())
    }

    #[test]
    fn contact_needs_phone_or_email() {
        let err = Contact::new(Some("Max".into()), None, None).unwrap_err();
        assert_eq!(err.first_rule(), Some("BG-6"));
        assert_eq!(err.kind(), Some(ViolationKind::MissingRequiredAlternative));

        let err = Contact::new(None, Some("  ".into()), Some(String::new())).unwrap_err();
        assert_eq!(err.kind(), Some(ViolationKind::MissingRequiredAlternative));

        assert!(Contact::new(None, Some("+49 30 12345".into()), None).is_ok());
        let contact = Contact::new(None, None, Some("max@acme.de".into())).unwrap();
        assert_eq!(contact.email(), Some("max@acme.de"));
        assert_eq!(contact.phone(), None);
    }

    #[test]
    fn tax_representative_requires_name() {
        let vat = VatIdentifier::new("DE987654321").unwrap();
        assert!(SellerTaxRepresentativeParty::new("", vat.clone(), address()).is_err());
        let rep = SellerTaxRepresentativeParty::new("Steuerberater GmbH", vat, address()).unwrap();
        assert_eq!(rep.vat_identifier().as_str(), "DE987654321");
    }

    #[test]
    fn payee_requires_name() {
        let err = Payee::new(" ", None, None).unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-17"));
        assert!(Payee::new("Factoring AG", None, None).is_ok());
    }
}
