//! Closed code lists for allowance/charge reasons and VAT exemption reasons.
//!
//! UNTDID 5189 defines allowance reason codes (BT-98, BT-140), UNTDID 7161
//! charge reason codes (BT-105, BT-145), and the CEF VATEX list defines VAT
//! exemption reason codes (BT-121).

use serde::{Deserialize, Serialize};

use super::codes::VatCategory;
use super::error::{InvoiceError, RuleViolation};

fn lookup(list: &'static [&'static str], code: &str) -> Option<&'static str> {
    list.binary_search(&code).ok().map(|index| list[index])
}

/// UNTDID 5189 allowance reason code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AllowanceReasonCode(&'static str);

impl AllowanceReasonCode {
    pub fn parse(code: &str) -> Result<Self, InvoiceError> {
        lookup(ALLOWANCE_REASON_CODES, code).map(Self).ok_or_else(|| {
            RuleViolation::malformed(
                "BR-CL-19",
                "allowance.reason_code",
                format!("'{code}' is not a known UNTDID 5189 code"),
            )
            .into()
        })
    }

    pub fn code(&self) -> &'static str {
        self.0
    }
}

impl From<AllowanceReasonCode> for String {
    fn from(code: AllowanceReasonCode) -> Self {
        code.0.to_string()
    }
}

impl TryFrom<String> for AllowanceReasonCode {
    type Error = InvoiceError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

/// UNTDID 7161 charge reason code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ChargeReasonCode(&'static str);

impl ChargeReasonCode {
    pub fn parse(code: &str) -> Result<Self, InvoiceError> {
        lookup(CHARGE_REASON_CODES, code).map(Self).ok_or_else(|| {
            RuleViolation::malformed(
                "BR-CL-20",
                "charge.reason_code",
                format!("'{code}' is not a known UNTDID 7161 code"),
            )
            .into()
        })
    }

    pub fn code(&self) -> &'static str {
        self.0
    }
}

impl From<ChargeReasonCode> for String {
    fn from(code: ChargeReasonCode) -> Self {
        code.0.to_string()
    }
}

impl TryFrom<String> for ChargeReasonCode {
    type Error = InvoiceError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

/// VATEX exemption reason code. Parsing is case-insensitive; the stored
/// form is upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VatExemptionReasonCode(&'static str);

impl VatExemptionReasonCode {
    pub fn parse(code: &str) -> Result<Self, InvoiceError> {
        let upper = code.trim().to_ascii_uppercase();
        lookup(VATEX_CODES, &upper).map(Self).ok_or_else(|| {
            RuleViolation::malformed(
                "BR-CL-22",
                "vat_breakdown.exemption_reason_code",
                format!("'{code}' is not a known VATEX code"),
            )
            .into()
        })
    }

    pub fn code(&self) -> &'static str {
        self.0
    }

    /// The VAT category this code is reserved for, if it is category specific.
    pub fn reserved_for(&self) -> Option<VatCategory> {
        match self.0 {
            "VATEX-EU-AE" => Some(VatCategory::ReverseCharge),
            "VATEX-EU-G" => Some(VatCategory::ExportOutsideEu),
            "VATEX-EU-IC" => Some(VatCategory::IntraCommunitySupply),
            "VATEX-EU-O" => Some(VatCategory::NotSubjectToVat),
            _ => None,
        }
    }

    /// Whether this code may justify an exemption in `category`.
    pub fn applies_to(&self, category: VatCategory) -> bool {
        match self.reserved_for() {
            Some(reserved) => reserved == category,
            None => category == VatCategory::Exempt,
        }
    }
}

impl From<VatExemptionReasonCode> for String {
    fn from(code: VatExemptionReasonCode) -> Self {
        code.0.to_string()
    }
}

impl TryFrom<String> for VatExemptionReasonCode {
    type Error = InvoiceError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

impl std::fmt::Display for VatExemptionReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// UNTDID 5189: Allowance reason codes (sorted for binary search).
static ALLOWANCE_REASON_CODES: &[&str] = &[
    "100", // Special agreement
    "102", // Fixed long term
    "103", // Temporary
    "104", // Standard
    "105", // Yearly turnover
    "41",  // Bonus for works ahead of schedule
    "42",  // Other bonus
    "60",  // Manufacturer's consumer discount
    "62",  // Due to military status
    "63",  // Due to work accident
    "64",  // Special agreement
    "65",  // Production error discount
    "66",  // New outlet discount
    "67",  // Sample discount
    "68",  // End-of-range discount
    "70",  // Incoterm discount
    "71",  // Point of sales threshold allowance
    "88",  // Material surcharge/deduction
    "95",  // Discount
];

/// UNTDID 7161: Charge reason codes (sorted for binary search).
static CHARGE_REASON_CODES: &[&str] = &[
    "AA",  // Advertising
    "AAA", // Telecommunication
    "AAC", // Technical modification
    "AAD", // Job-order production
    "AAE", // Outlays
    "AAF", // Off-premises
    "ABK", // Miscellaneous
    "ABL", // Additional packaging
    "ADR", // Other services
    "ADT", // Pick-up
    "AEW", // Environmental protection service
    "FC",  // Freight service
    "FI",  // Financing
    "FL",  // Flat rate
    "LA",  // Labelling
    "PC",  // Packing
    "TS",  // Testing
];

/// CEF VATEX exemption reason codes (sorted for binary search).
static VATEX_CODES: &[&str] = &[
    "VATEX-EU-132",      // Exempt based on article 132
    "VATEX-EU-132-1A",
    "VATEX-EU-132-1B",
    "VATEX-EU-132-1C",
    "VATEX-EU-132-1D",
    "VATEX-EU-132-1E",
    "VATEX-EU-132-1F",
    "VATEX-EU-132-1G",
    "VATEX-EU-132-1H",
    "VATEX-EU-132-1I",
    "VATEX-EU-132-1J",
    "VATEX-EU-132-1K",
    "VATEX-EU-132-1L",
    "VATEX-EU-132-1M",
    "VATEX-EU-132-1N",
    "VATEX-EU-132-1O",
    "VATEX-EU-132-1P",
    "VATEX-EU-132-1Q",
    "VATEX-EU-143",      // Exempt based on article 143
    "VATEX-EU-143-1A",
    "VATEX-EU-148",      // Exempt based on article 148
    "VATEX-EU-151",      // Exempt based on article 151
    "VATEX-EU-309",      // Exempt based on article 309
    "VATEX-EU-79-C",     // Reimbursement of costs on behalf of the buyer
    "VATEX-EU-AE",       // Reverse charge
    "VATEX-EU-D",        // Travel agents margin scheme
    "VATEX-EU-F",        // Second hand goods margin scheme
    "VATEX-EU-G",        // Export outside the EU
    "VATEX-EU-I",        // Works of art margin scheme
    "VATEX-EU-IC",       // Intra-community supply
    "VATEX-EU-J",        // Collectors items and antiques margin scheme
    "VATEX-EU-O",        // Not subject to VAT
    "VATEX-FR-CNWVAT",   // France domestic credit notes without VAT
    "VATEX-FR-FRANCHISE", // France domestic VAT franchise in base
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_allowance_codes() {
        for code in ["95", "41", "100", "42"] {
            assert_eq!(AllowanceReasonCode::parse(code).unwrap().code(), code);
        }
    }

    #[test]
    fn unknown_allowance_codes() {
        for code in ["99", "", "DISCOUNT"] {
            assert!(AllowanceReasonCode::parse(code).is_err());
        }
    }

    #[test]
    fn known_and_unknown_charge_codes() {
        assert_eq!(ChargeReasonCode::parse("FC").unwrap().code(), "FC");
        assert!(ChargeReasonCode::parse("ZZ").is_err());
        assert!(ChargeReasonCode::parse("FREIGHT").is_err());
    }

    #[test]
    fn codes_deserialize_through_parse() {
        let code: VatExemptionReasonCode = serde_json::from_str("\"vatex-eu-ic\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"VATEX-EU-IC\"");
        let code: ChargeReasonCode = serde_json::from_str("\"FC\"").unwrap();
        assert_eq!(code.code(), "FC");
        assert!(serde_json::from_str::<AllowanceReasonCode>("\"DISCOUNT\"").is_err());
    }

    #[test]
    fn vatex_codes_are_case_insensitive() {
        let code = VatExemptionReasonCode::parse("vatex-eu-ae").unwrap();
        assert_eq!(code.code(), "VATEX-EU-AE");
        assert!(VatExemptionReasonCode::parse("VATEX-EU-XYZ").is_err());
    }

    #[test]
    fn vatex_category_matching() {
        let ae = VatExemptionReasonCode::parse("VATEX-EU-AE").unwrap();
        assert!(ae.applies_to(VatCategory::ReverseCharge));
        assert!(!ae.applies_to(VatCategory::Exempt));

        let article = VatExemptionReasonCode::parse("VATEX-EU-132-1A").unwrap();
        assert_eq!(article.reserved_for(), None);
        assert!(article.applies_to(VatCategory::Exempt));
        assert!(!article.applies_to(VatCategory::NotSubjectToVat));
    }

    #[test]
    fn lists_are_sorted() {
        for list in [ALLOWANCE_REASON_CODES, CHARGE_REASON_CODES, VATEX_CODES] {
            for window in list.windows(2) {
                assert!(
                    window[0] < window[1],
                    "codes not sorted: {} >= {}",
                    window[0],
                    window[1]
                );
            }
        }
    }
}
