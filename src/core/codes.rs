use serde::{Deserialize, Serialize};

/// UNTDID 5305: VAT category codes.
///
/// The declaration order is the order in which the per-category rules are
/// evaluated, so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VatCategory {
    /// S: Standard rate.
    Standard,
    /// Z: Zero rated goods.
    ZeroRated,
    /// E: Exempt from VAT.
    Exempt,
    /// AE: VAT reverse charge.
    ReverseCharge,
    /// G: Free export item, VAT not charged.
    ExportOutsideEu,
    /// K: VAT exempt for EEA intra-community supply of goods and services.
    IntraCommunitySupply,
    /// O: Services outside scope of tax.
    NotSubjectToVat,
    /// L: Canary Islands general indirect tax (IGIC).
    CanaryIslandsIgic,
    /// M: Tax for production, services and importation in Ceuta and Melilla (IPSI).
    CeutaMelillaIpsi,
}

impl VatCategory {
    pub const ALL: [VatCategory; 9] = [
        Self::Standard,
        Self::ZeroRated,
        Self::Exempt,
        Self::ReverseCharge,
        Self::ExportOutsideEu,
        Self::IntraCommunitySupply,
        Self::NotSubjectToVat,
        Self::CanaryIslandsIgic,
        Self::CeutaMelillaIpsi,
    ];

    /// UNTDID 5305 code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Standard => "S",
            Self::ZeroRated => "Z",
            Self::Exempt => "E",
            Self::ReverseCharge => "AE",
            Self::ExportOutsideEu => "G",
            Self::IntraCommunitySupply => "K",
            Self::NotSubjectToVat => "O",
            Self::CanaryIslandsIgic => "L",
            Self::CeutaMelillaIpsi => "M",
        }
    }

    /// Parse from UNTDID 5305 code string.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard rate",
            Self::ZeroRated => "Zero rated",
            Self::Exempt => "Exempt from VAT",
            Self::ReverseCharge => "Reverse charge",
            Self::ExportOutsideEu => "Export outside the EU",
            Self::IntraCommunitySupply => "Intra-community supply",
            Self::NotSubjectToVat => "Not subject to VAT",
            Self::CanaryIslandsIgic => "Canary Islands IGIC",
            Self::CeutaMelillaIpsi => "Ceuta and Melilla IPSI",
        }
    }
}

impl std::fmt::Display for VatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// UNTDID 1001: Invoice type codes (subset used in EN 16931 invoicing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceTypeCode {
    /// 380: Commercial invoice.
    #[default]
    Invoice,
    /// 381: Credit note.
    CreditNote,
    /// 384: Corrected invoice.
    Corrected,
    /// 386: Prepayment invoice.
    Prepayment,
    /// 389: Self-billed invoice.
    SelfBilled,
    /// 326: Partial invoice.
    Partial,
    /// 751: Invoice information for accounting purposes.
    AccountingInformation,
}

impl InvoiceTypeCode {
    /// UNTDID 1001 numeric code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Invoice => 380,
            Self::CreditNote => 381,
            Self::Corrected => 384,
            Self::Prepayment => 386,
            Self::SelfBilled => 389,
            Self::Partial => 326,
            Self::AccountingInformation => 751,
        }
    }

    /// Parse from UNTDID 1001 numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            380 => Some(Self::Invoice),
            381 => Some(Self::CreditNote),
            384 => Some(Self::Corrected),
            386 => Some(Self::Prepayment),
            389 => Some(Self::SelfBilled),
            326 => Some(Self::Partial),
            751 => Some(Self::AccountingInformation),
            _ => None,
        }
    }
}

/// UNTDID 4461: Payment means codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMeansCode {
    /// 1: Instrument not defined.
    NotDefined,
    /// 10: Cash.
    Cash,
    /// 30: Credit transfer.
    CreditTransfer,
    /// 42: Payment to bank account.
    PaymentToBankAccount,
    /// 48: Bank card.
    BankCard,
    /// 49: Direct debit.
    DirectDebit,
    /// 57: Standing agreement.
    StandingAgreement,
    /// 58: SEPA credit transfer.
    SepaCreditTransfer,
    /// 59: SEPA direct debit.
    SepaDirectDebit,
    /// Other code value.
    Other(u16),
}

impl PaymentMeansCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::NotDefined => 1,
            Self::Cash => 10,
            Self::CreditTransfer => 30,
            Self::PaymentToBankAccount => 42,
            Self::BankCard => 48,
            Self::DirectDebit => 49,
            Self::StandingAgreement => 57,
            Self::SepaCreditTransfer => 58,
            Self::SepaDirectDebit => 59,
            Self::Other(c) => *c,
        }
    }

    /// Parse from UNTDID 4461 numeric code.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::NotDefined,
            10 => Self::Cash,
            30 => Self::CreditTransfer,
            42 => Self::PaymentToBankAccount,
            48 => Self::BankCard,
            49 => Self::DirectDebit,
            57 => Self::StandingAgreement,
            58 => Self::SepaCreditTransfer,
            59 => Self::SepaDirectDebit,
            c => Self::Other(c),
        }
    }

    /// Means that settle through a credit transfer account (BG-17).
    pub fn is_credit_transfer(&self) -> bool {
        matches!(self, Self::CreditTransfer | Self::SepaCreditTransfer)
    }
}

/// UNTDID 2005 subset: VAT point date code (BT-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatPointDateCode {
    /// 3: Invoice document issue date time.
    InvoiceIssueDate,
    /// 35: Delivery date/time, actual.
    DeliveryDate,
    /// 432: Paid to date.
    PaidToDate,
}

impl VatPointDateCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::InvoiceIssueDate => 3,
            Self::DeliveryDate => 35,
            Self::PaidToDate => 432,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            3 => Some(Self::InvoiceIssueDate),
            35 => Some(Self::DeliveryDate),
            432 => Some(Self::PaidToDate),
            _ => None,
        }
    }
}
