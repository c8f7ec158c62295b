use serde::Serialize;

use super::codes::PaymentMeansCode;
use super::error::{InvoiceError, RuleViolation, ensure, non_empty, present};
use super::identifiers::Identifier;

/// BG-16: Payment instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInstructions {
    means_code: PaymentMeansCode,
    means_text: Option<String>,
    remittance_information: Option<String>,
    credit_transfers: Vec<CreditTransfer>,
    card: Option<PaymentCardInformation>,
    direct_debit: Option<DirectDebit>,
}

impl PaymentInstructions {
    pub fn new(means_code: PaymentMeansCode) -> Self {
        Self {
            means_code,
            means_text: None,
            remittance_information: None,
            credit_transfers: Vec::new(),
            card: None,
            direct_debit: None,
        }
    }

    pub fn with_means_text(mut self, text: impl Into<String>) -> Self {
        self.means_text = present(Some(text.into()));
        self
    }

    pub fn with_remittance_information(mut self, info: impl Into<String>) -> Self {
        self.remittance_information = present(Some(info.into()));
        self
    }

    pub fn with_credit_transfer(mut self, transfer: CreditTransfer) -> Self {
        self.credit_transfers.push(transfer);
        self
    }

    pub fn with_card(mut self, card: PaymentCardInformation) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_direct_debit(mut self, debit: DirectDebit) -> Self {
        self.direct_debit = Some(debit);
        self
    }

    /// Check the group's own invariants.
    ///
    /// BR-50: every credit transfer names its account.
    /// BR-61: credit transfer means (30, 58) need at least one payment account.
    pub fn finish(self) -> Result<Self, InvoiceError> {
        for (i, transfer) in self.credit_transfers.iter().enumerate() {
            ensure(!transfer.account_identifier.trim().is_empty(), || {
                RuleViolation::malformed(
                    "BR-50",
                    format!("payment.credit_transfers[{i}].account_identifier"),
                    "payment account identifier (BT-84) must not be empty",
                )
            })?;
        }
        if self.means_code.is_credit_transfer() {
            ensure(!self.credit_transfers.is_empty(), || {
                RuleViolation::missing_alternative(
                    "BR-61",
                    "payment.credit_transfers",
                    format!(
                        "payment means {} requires a payment account identifier (BT-84)",
                        self.means_code.code()
                    ),
                )
            })?;
        }
        Ok(self)
    }

    /// BT-81.
    pub fn means_code(&self) -> PaymentMeansCode {
        self.means_code
    }

    /// BT-82.
    pub fn means_text(&self) -> Option<&str> {
        self.means_text.as_deref()
    }

    /// BT-83.
    pub fn remittance_information(&self) -> Option<&str> {
        self.remittance_information.as_deref()
    }

    /// BG-17.
    pub fn credit_transfers(&self) -> &[CreditTransfer] {
        &self.credit_transfers
    }

    /// BG-18.
    pub fn card(&self) -> Option<&PaymentCardInformation> {
        self.card.as_ref()
    }

    /// BG-19.
    pub fn direct_debit(&self) -> Option<&DirectDebit> {
        self.direct_debit.as_ref()
    }
}

/// BG-17: Credit transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditTransfer {
    /// BT-84: Payment account identifier (IBAN or proprietary), BR-50.
    pub account_identifier: String,
    /// BT-85: Payment account name.
    pub account_name: Option<String>,
    /// BT-86: Payment service provider identifier (BIC).
    pub service_provider: Option<String>,
}

impl CreditTransfer {
    pub fn new(account_identifier: impl Into<String>) -> Result<Self, InvoiceError> {
        Ok(Self {
            account_identifier: non_empty(
                account_identifier,
                "BR-50",
                "payment.credit_transfer.account_identifier",
            )?,
            account_name: None,
            service_provider: None,
        })
    }

    pub fn account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = present(Some(name.into()));
        self
    }

    pub fn service_provider(mut self, bic: impl Into<String>) -> Self {
        self.service_provider = present(Some(bic.into()));
        self
    }
}

/// BG-18: Payment card information. Only the last 4–6 digits of the PAN
/// may be transmitted; anything before them must be non-digit masking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentCardInformation {
    primary_account_number: String,
    holder_name: Option<String>,
}

impl PaymentCardInformation {
    pub fn new(
        primary_account_number: impl Into<String>,
        holder_name: Option<String>,
    ) -> Result<Self, InvoiceError> {
        let pan = primary_account_number.into();
        ensure(is_masked_pan(&pan), || {
            RuleViolation::malformed(
                "BR-51",
                "payment.card.primary_account_number",
                "card number (BT-87) must show only its last 4 to 6 digits",
            )
        })?;
        Ok(Self {
            primary_account_number: pan,
            holder_name: present(holder_name),
        })
    }

    /// BT-87.
    pub fn primary_account_number(&self) -> &str {
        &self.primary_account_number
    }

    /// BT-88.
    pub fn holder_name(&self) -> Option<&str> {
        self.holder_name.as_deref()
    }
}

/// Non-digit characters followed by 4 to 6 trailing digits.
fn is_masked_pan(pan: &str) -> bool {
    let digits = pan.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    let prefix = &pan[..pan.len() - digits];
    (4..=6).contains(&digits) && !prefix.chars().any(|c| c.is_ascii_digit())
}

/// BG-19: Direct debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectDebit {
    /// BT-89: Mandate reference identifier.
    pub mandate_reference: Option<String>,
    /// BT-90: Bank assigned creditor identifier.
    pub creditor_identifier: Option<Identifier>,
    /// BT-91: Debited account identifier.
    pub debited_account: Option<String>,
}
