//! Per-category VAT rules as one table.
//!
//! The EN 16931 rule families BR-S, BR-Z, BR-E, BR-AE, BR-G, BR-IC, BR-O,
//! BR-IG and BR-IP share one shape. Rule numbers within a family are stable:
//!
//! | n  | meaning                                                  |
//! |----|----------------------------------------------------------|
//! | 1  | VAT breakdown row presence / cardinality                 |
//! | 2–4| party identifiers when used on a line / allowance / charge |
//! | 5–7| rate of a line / allowance / charge                      |
//! | 8  | taxable amount reconciliation                            |
//! | 9  | tax amount                                               |
//! | 10 | exemption reason                                         |
//!
//! BR-O-11 (exclusivity) and BR-IC-11/12 (delivery facts) are extras carried
//! by flags.

use serde::Serialize;

use super::codes::VatCategory;
use super::decimal::Percentage;
use super::error::{InvoiceError, RuleViolation};
use super::reason_codes::VatExemptionReasonCode;

/// Allowed shape of the VAT rate for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateRule {
    /// Rate present and greater than zero.
    Positive,
    /// Rate present and zero or greater.
    NonNegative,
    /// Rate present and exactly zero.
    Zero,
    /// No rate at all.
    Absent,
}

/// How the VAT category tax amount relates to the taxable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaxAmountRule {
    /// tax = round(taxable × rate / 100).
    RateApplied,
    /// tax = 0.
    Zero,
}

/// Whether the VAT breakdown row carries an exemption reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExemptionRule {
    /// Reason text and/or a matching reason code is required.
    Required,
    /// Neither reason text nor reason code may be given.
    Forbidden,
}

/// A seller-side identifier that can satisfy a category requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SellerId {
    /// BT-31.
    VatIdentifier,
    /// BT-32.
    TaxRegistration,
    /// BT-63.
    RepresentativeVatIdentifier,
}

/// A buyer-side identifier that can satisfy a category requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuyerId {
    /// BT-48.
    VatIdentifier,
    /// BT-47.
    LegalRegistration,
}

/// Identifier requirement a category puts on the parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdentityRule {
    /// At least one of `seller` and, if non-empty, at least one of `buyer`.
    AnyOf {
        seller: &'static [SellerId],
        buyer: &'static [BuyerId],
    },
    /// Seller VAT id, representative VAT id and buyer VAT id must not all be present.
    NotAllVatIdentifiers,
}

/// Which identifiers the parties of an invoice expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartyIdentifiers {
    pub seller_vat: bool,
    pub seller_tax_registration: bool,
    pub representative_vat: bool,
    pub buyer_vat: bool,
    pub buyer_legal_registration: bool,
}

impl PartyIdentifiers {
    fn has_seller(&self, id: SellerId) -> bool {
        match id {
            SellerId::VatIdentifier => self.seller_vat,
            SellerId::TaxRegistration => self.seller_tax_registration,
            SellerId::RepresentativeVatIdentifier => self.representative_vat,
        }
    }

    fn has_buyer(&self, id: BuyerId) -> bool {
        match id {
            BuyerId::VatIdentifier => self.buyer_vat,
            BuyerId::LegalRegistration => self.buyer_legal_registration,
        }
    }
}

/// The rule set of one VAT category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryRule {
    pub category: VatCategory,
    /// Rule family prefix, e.g. "AE" for BR-AE-n.
    pub family: &'static str,
    pub rate: RateRule,
    pub tax_amount: TaxAmountRule,
    pub exemption: ExemptionRule,
    pub identity: IdentityRule,
    /// Exactly one VAT breakdown row when the category is used.
    pub single_breakdown_row: bool,
    /// No other category may appear anywhere on the invoice.
    pub exclusive: bool,
    /// Actual delivery date or invoicing period, and a deliver-to country, are required.
    pub requires_delivery_facts: bool,
}

const SELLER_ANY: &[SellerId] = &[
    SellerId::VatIdentifier,
    SellerId::TaxRegistration,
    SellerId::RepresentativeVatIdentifier,
];
const SELLER_VAT_ONLY: &[SellerId] = &[
    SellerId::VatIdentifier,
    SellerId::RepresentativeVatIdentifier,
];
const BUYER_NONE: &[BuyerId] = &[];
const BUYER_VAT_OR_LEGAL: &[BuyerId] = &[BuyerId::VatIdentifier, BuyerId::LegalRegistration];
const BUYER_VAT: &[BuyerId] = &[BuyerId::VatIdentifier];

const fn standard_like(
    category: VatCategory,
    family: &'static str,
    rate: RateRule,
) -> CategoryRule {
    CategoryRule {
        category,
        family,
        rate,
        tax_amount: TaxAmountRule::RateApplied,
        exemption: ExemptionRule::Forbidden,
        identity: IdentityRule::AnyOf {
            seller: SELLER_ANY,
            buyer: BUYER_NONE,
        },
        single_breakdown_row: false,
        exclusive: false,
        requires_delivery_facts: false,
    }
}

const fn exempt_like(
    category: VatCategory,
    family: &'static str,
    seller: &'static [SellerId],
    buyer: &'static [BuyerId],
) -> CategoryRule {
    CategoryRule {
        category,
        family,
        rate: RateRule::Zero,
        tax_amount: TaxAmountRule::Zero,
        exemption: ExemptionRule::Required,
        identity: IdentityRule::AnyOf { seller, buyer },
        single_breakdown_row: true,
        exclusive: false,
        requires_delivery_facts: false,
    }
}

/// Indexed in `VatCategory` declaration order.
static RULES: [CategoryRule; 9] = [
    standard_like(VatCategory::Standard, "S", RateRule::Positive),
    CategoryRule {
        tax_amount: TaxAmountRule::Zero,
        single_breakdown_row: true,
        ..standard_like(VatCategory::ZeroRated, "Z", RateRule::Zero)
    },
    exempt_like(VatCategory::Exempt, "E", SELLER_ANY, BUYER_NONE),
    exempt_like(VatCategory::ReverseCharge, "AE", SELLER_ANY, BUYER_VAT_OR_LEGAL),
    exempt_like(VatCategory::ExportOutsideEu, "G", SELLER_ANY, BUYER_NONE),
    CategoryRule {
        requires_delivery_facts: true,
        ..exempt_like(VatCategory::IntraCommunitySupply, "IC", SELLER_VAT_ONLY, BUYER_VAT)
    },
    CategoryRule {
        rate: RateRule::Absent,
        identity: IdentityRule::NotAllVatIdentifiers,
        exclusive: true,
        ..exempt_like(VatCategory::NotSubjectToVat, "O", &[], BUYER_NONE)
    },
    standard_like(VatCategory::CanaryIslandsIgic, "IG", RateRule::NonNegative),
    standard_like(VatCategory::CeutaMelillaIpsi, "IP", RateRule::NonNegative),
];

impl CategoryRule {
    /// The rule set for `category`.
    pub fn of(category: VatCategory) -> &'static CategoryRule {
        &RULES[category as usize]
    }

    /// Rule identifier `BR-{family}-{number}`.
    pub fn rule_id(&self, number: u8) -> String {
        format!("BR-{}-{}", self.family, number)
    }

    /// Check a rate carried by a line (5), allowance (6), charge (7) or
    /// breakdown row (5).
    pub fn check_rate(
        &self,
        rate: Option<Percentage>,
        number: u8,
        field: &str,
    ) -> Result<(), InvoiceError> {
        let ok = match (self.rate, rate) {
            (RateRule::Absent, None) => true,
            (RateRule::Absent, Some(_)) => false,
            (_, None) => false,
            (RateRule::Positive, Some(r)) => r.is_positive(),
            (RateRule::NonNegative, Some(r)) => !r.is_negative(),
            (RateRule::Zero, Some(r)) => r.is_zero(),
        };
        if ok {
            return Ok(());
        }
        let expectation = match self.rate {
            RateRule::Positive => "a VAT rate greater than zero",
            RateRule::NonNegative => "a VAT rate of zero or more",
            RateRule::Zero => "a VAT rate of 0",
            RateRule::Absent => "no VAT rate",
        };
        let actual = rate.map_or_else(|| "none".to_string(), |r| r.to_string());
        Err(RuleViolation::category(
            self.rule_id(number),
            field,
            format!(
                "VAT category {} ({}) requires {expectation}, got {actual}",
                self.category.code(),
                self.category.name()
            ),
        )
        .into())
    }

    /// Whether the parties carry the identifiers this category requires.
    pub fn identity_satisfied(&self, parties: &PartyIdentifiers) -> bool {
        match self.identity {
            IdentityRule::AnyOf { seller, buyer } => {
                let seller_ok =
                    seller.is_empty() || seller.iter().any(|id| parties.has_seller(*id));
                let buyer_ok = buyer.is_empty() || buyer.iter().any(|id| parties.has_buyer(*id));
                seller_ok && buyer_ok
            }
            IdentityRule::NotAllVatIdentifiers => {
                !(parties.seller_vat && parties.representative_vat && parties.buyer_vat)
            }
        }
    }

    /// Human-readable form of the identity requirement.
    pub fn identity_description(&self) -> String {
        match self.identity {
            IdentityRule::AnyOf { seller, buyer } => {
                let seller = seller
                    .iter()
                    .map(|id| match id {
                        SellerId::VatIdentifier => "seller VAT identifier (BT-31)",
                        SellerId::TaxRegistration => "seller tax registration identifier (BT-32)",
                        SellerId::RepresentativeVatIdentifier => {
                            "tax representative VAT identifier (BT-63)"
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" or ");
                if buyer.is_empty() {
                    return format!("requires a {seller}");
                }
                let buyer = buyer
                    .iter()
                    .map(|id| match id {
                        BuyerId::VatIdentifier => "buyer VAT identifier (BT-48)",
                        BuyerId::LegalRegistration => "buyer legal registration identifier (BT-47)",
                    })
                    .collect::<Vec<_>>()
                    .join(" or ");
                format!("requires a {seller}, and a {buyer}")
            }
            IdentityRule::NotAllVatIdentifiers => "must not carry the seller VAT identifier, \
                the tax representative VAT identifier and the buyer VAT identifier together"
                .to_string(),
        }
    }

    /// Check the exemption reason of a VAT breakdown row of this category.
    pub fn check_exemption(
        &self,
        reason: Option<&str>,
        code: Option<VatExemptionReasonCode>,
        field: &str,
    ) -> Result<(), RuleViolation> {
        let rule = self.rule_id(10);
        match self.exemption {
            ExemptionRule::Forbidden => {
                if reason.is_some() || code.is_some() {
                    return Err(RuleViolation::category(
                        rule,
                        field,
                        format!(
                            "VAT category {} must not carry an exemption reason (BT-120/BT-121)",
                            self.category.code()
                        ),
                    ));
                }
            }
            // Reason text alone satisfies the rule; a code only counts if it fits.
            ExemptionRule::Required => match code {
                _ if reason.is_some() => {}
                Some(code) if code.applies_to(self.category) => {}
                Some(code) => {
                    return Err(RuleViolation::category(
                        rule,
                        field,
                        format!(
                            "exemption reason code {code} does not apply to VAT category {}",
                            self.category.code()
                        ),
                    ));
                }
                None => {
                    return Err(RuleViolation::missing_alternative(
                        rule,
                        field,
                        format!(
                            "VAT category {} ({}) requires an exemption reason text (BT-120) or code (BT-121)",
                            self.category.code(),
                            self.category.name()
                        ),
                    ));
                }
            },
        }
        Ok(())
    }
}
