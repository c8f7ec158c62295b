//! UN/ECE Recommendation 20 unit of measure codes (BT-130, BT-150).
//!
//! The full list has ~2000 codes; this covers the subset seen in European
//! e-invoicing.

use serde::{Deserialize, Serialize};

use super::error::{InvoiceError, RuleViolation};

/// Unit of measure code, always one of the entries of the known list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct UnitOfMeasure(&'static str);

impl UnitOfMeasure {
    /// C62: one (piece).
    pub const PIECE: UnitOfMeasure = UnitOfMeasure("C62");
    /// HUR: hour.
    pub const HOUR: UnitOfMeasure = UnitOfMeasure("HUR");

    pub fn parse(code: &str) -> Result<Self, InvoiceError> {
        match COMMON_UNIT_CODES.binary_search(&code) {
            Ok(index) => Ok(Self(COMMON_UNIT_CODES[index])),
            Err(_) => Err(RuleViolation::malformed(
                "BR-CL-23",
                "unit_code",
                format!("'{code}' is not a known UN/ECE Rec 20 unit code"),
            )
            .into()),
        }
    }

    pub fn code(&self) -> &'static str {
        self.0
    }
}

impl From<UnitOfMeasure> for String {
    fn from(code: UnitOfMeasure) -> Self {
        code.0.to_string()
    }
}

impl TryFrom<String> for UnitOfMeasure {
    type Error = InvoiceError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Check whether `code` is a known UN/ECE Rec 20 unit code.
pub fn is_known_unit_code(code: &str) -> bool {
    COMMON_UNIT_CODES.binary_search(&code).is_ok()
}

/// Sorted for binary search.
static COMMON_UNIT_CODES: &[&str] = &[
    "2N",  // Decibel
    "4K",  // Kilovolt-ampere (reactive)
    "ANN", // Year
    "BAR", // Bar (pressure)
    "BLL", // Barrel (US)
    "BX",  // Box
    "C62", // One (piece/unit)
    "CCM", // Cubic centimetre
    "CLT", // Centilitre
    "CMK", // Square centimetre
    "CMT", // Centimetre
    "CS",  // Case
    "CT",  // Carton
    "DAY", // Day
    "DMQ", // Cubic decimetre (litre)
    "DMT", // Decimetre
    "DZN", // Dozen
    "EA",  // Each
    "FOT", // Foot
    "GLL", // Gallon (US)
    "GM",  // Gram per square metre
    "GRM", // Gram
    "GRO", // Gross
    "GWH", // Gigawatt-hour
    "HAR", // Hectare
    "HLT", // Hectolitre
    "HUR", // Hour
    "INH", // Inch
    "JOU", // Joule
    "KGM", // Kilogram
    "KGS", // Kilogram per second
    "KHZ", // Kilohertz
    "KMH", // Kilometre per hour
    "KMT", // Kilometre
    "KTM", // Kilometre
    "KVA", // Kilovolt-ampere
    "KVT", // Kilovolt
    "KWH", // Kilowatt-hour
    "KWT", // Kilowatt
    "LBR", // Pound
    "LE",  // Lite
    "LM",  // Linear metre
    "LPA", // Litre of pure alcohol
    "LS",  // Lump sum
    "LTR", // Litre
    "MAW", // Megawatt
    "MBR", // Millibar
    "MGM", // Milligram
    "MHZ", // Megahertz
    "MIN", // Minute
    "MLT", // Millilitre
    "MMK", // Square millimetre
    "MMT", // Millimetre
    "MON", // Month
    "MQH", // Cubic metre per hour
    "MTK", // Square metre
    "MTQ", // Cubic metre
    "MTR", // Metre
    "MTS", // Metre per second
    "MWH", // Megawatt-hour
    "NAR", // Number of articles
    "NPR", // Number of pairs
    "P1",  // Percent
    "PA",  // Packet
    "PK",  // Pack
    "PR",  // Pair
    "QTI", // Quantity (imperial)
    "RO",  // Roll
    "SA",  // Sack
    "SEC", // Second
    "SET", // Set
    "SMI", // Mile (statute)
    "ST",  // Sheet
    "STN", // Short ton (US)
    "TNE", // Tonne (metric ton)
    "WEE", // Week
    "XBD", // Bundle
    "XBG", // Bag
    "XBX", // Box
    "XCT", // Carton
    "XPA", // Packet
    "XPK", // Package
    "XPX", // Pallet
    "XRO", // Roll
    "XSA", // Sack
    "XST", // Sheet
    "YRD", // Yard
];
