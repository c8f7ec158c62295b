use serde::Serialize;

use super::category_rules::CategoryRule;
use super::codes::VatCategory;
use super::decimal::{Amount, Percentage};
use super::error::{InvoiceError, RuleViolation, ensure, present};
use super::line::require_reason;
use super::reason_codes::{AllowanceReasonCode, ChargeReasonCode, VatExemptionReasonCode};

/// BG-20: Document level allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLevelAllowance {
    amount: Amount,
    base_amount: Option<Amount>,
    percentage: Option<Percentage>,
    vat_category: VatCategory,
    vat_rate: Option<Percentage>,
    reason: Option<String>,
    reason_code: Option<AllowanceReasonCode>,
}

impl DocumentLevelAllowance {
    /// Reason (BT-97) or reason code (BT-98) is required (BR-33); the rate
    /// must fit the category (BR-x-6).
    pub fn new(
        amount: Amount,
        vat_category: VatCategory,
        vat_rate: Option<Percentage>,
        reason: Option<String>,
        reason_code: Option<AllowanceReasonCode>,
    ) -> Result<Self, InvoiceError> {
        let reason = present(reason);
        require_reason(&reason, reason_code.is_some(), "BR-33", "allowance")?;
        CategoryRule::of(vat_category).check_rate(vat_rate, 6, "allowance.vat_rate")?;
        Ok(Self {
            amount,
            base_amount: None,
            percentage: None,
            vat_category,
            vat_rate,
            reason,
            reason_code,
        })
    }

    /// Base amount (BT-93) and percentage (BT-94).
    pub fn with_base(mut self, base_amount: Amount, percentage: Percentage) -> Self {
        self.base_amount = Some(base_amount);
        self.percentage = Some(percentage);
        self
    }

    /// BT-92.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn base_amount(&self) -> Option<Amount> {
        self.base_amount
    }

    pub fn percentage(&self) -> Option<Percentage> {
        self.percentage
    }

    /// BT-95.
    pub fn vat_category(&self) -> VatCategory {
        self.vat_category
    }

    /// BT-96.
    pub fn vat_rate(&self) -> Option<Percentage> {
        self.vat_rate
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn reason_code(&self) -> Option<AllowanceReasonCode> {
        self.reason_code
    }
}

/// BG-21: Document level charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLevelCharge {
    amount: Amount,
    base_amount: Option<Amount>,
    percentage: Option<Percentage>,
    vat_category: VatCategory,
    vat_rate: Option<Percentage>,
    reason: Option<String>,
    reason_code: Option<ChargeReasonCode>,
}

impl DocumentLevelCharge {
    /// Reason (BT-104) or reason code (BT-105) is required (BR-38); the rate
    /// must fit the category (BR-x-7).
    pub fn new(
        amount: Amount,
        vat_category: VatCategory,
        vat_rate: Option<Percentage>,
        reason: Option<String>,
        reason_code: Option<ChargeReasonCode>,
    ) -> Result<Self, InvoiceError> {
        let reason = present(reason);
        require_reason(&reason, reason_code.is_some(), "BR-38", "charge")?;
        CategoryRule::of(vat_category).check_rate(vat_rate, 7, "charge.vat_rate")?;
        Ok(Self {
            amount,
            base_amount: None,
            percentage: None,
            vat_category,
            vat_rate,
            reason,
            reason_code,
        })
    }

    /// Base amount (BT-100) and percentage (BT-101).
    pub fn with_base(mut self, base_amount: Amount, percentage: Percentage) -> Self {
        self.base_amount = Some(base_amount);
        self.percentage = Some(percentage);
        self
    }

    /// BT-99.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn base_amount(&self) -> Option<Amount> {
        self.base_amount
    }

    pub fn percentage(&self) -> Option<Percentage> {
        self.percentage
    }

    /// BT-102.
    pub fn vat_category(&self) -> VatCategory {
        self.vat_category
    }

    /// BT-103.
    pub fn vat_rate(&self) -> Option<Percentage> {
        self.vat_rate
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn reason_code(&self) -> Option<ChargeReasonCode> {
        self.reason_code
    }
}

/// BG-23: VAT breakdown row for one (category, rate) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatBreakdown {
    taxable_amount: Amount,
    tax_amount: Amount,
    category: VatCategory,
    rate: Option<Percentage>,
    exemption_reason: Option<String>,
    exemption_reason_code: Option<VatExemptionReasonCode>,
}

impl VatBreakdown {
    /// Every category except "not subject to VAT" needs a rate (BR-48), and
    /// a given rate must fit the category.
    pub fn new(
        taxable_amount: Amount,
        tax_amount: Amount,
        category: VatCategory,
        rate: Option<Percentage>,
    ) -> Result<Self, InvoiceError> {
        ensure(rate.is_some() || category == VatCategory::NotSubjectToVat, || {
            RuleViolation::category(
                "BR-48",
                "vat_breakdown.rate",
                format!(
                    "VAT breakdown for category {} requires a VAT category rate (BT-119)",
                    category.code()
                ),
            )
        })?;
        CategoryRule::of(category).check_rate(rate, 5, "vat_breakdown.rate")?;
        Ok(Self {
            taxable_amount,
            tax_amount,
            category,
            rate,
            exemption_reason: None,
            exemption_reason_code: None,
        })
    }

    /// Exemption reason text (BT-120) and/or code (BT-121).
    pub fn with_exemption(
        mut self,
        reason: Option<String>,
        code: Option<VatExemptionReasonCode>,
    ) -> Self {
        self.exemption_reason = present(reason);
        self.exemption_reason_code = code;
        self
    }

    /// BT-116.
    pub fn taxable_amount(&self) -> Amount {
        self.taxable_amount
    }

    /// BT-117.
    pub fn tax_amount(&self) -> Amount {
        self.tax_amount
    }

    /// BT-118.
    pub fn category(&self) -> VatCategory {
        self.category
    }

    /// BT-119.
    pub fn rate(&self) -> Option<Percentage> {
        self.rate
    }

    /// BT-120.
    pub fn exemption_reason(&self) -> Option<&str> {
        self.exemption_reason.as_deref()
    }

    /// BT-121.
    pub fn exemption_reason_code(&self) -> Option<VatExemptionReasonCode> {
        self.exemption_reason_code
    }
}

/// BG-22: Document totals.
///
/// Construction checks the two identities that only involve these fields:
///
/// - BR-CO-15: total with VAT = total without VAT + total VAT
/// - BR-CO-16: amount due = total with VAT − paid amount + rounding amount
///
/// Both sides are rounded to two decimals before comparing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTotals {
    sum_of_line_net_amounts: Amount,
    sum_of_allowances: Option<Amount>,
    sum_of_charges: Option<Amount>,
    total_without_vat: Amount,
    total_vat: Option<Amount>,
    total_vat_in_accounting_currency: Option<Amount>,
    total_with_vat: Amount,
    paid_amount: Option<Amount>,
    rounding_amount: Option<Amount>,
    amount_due: Amount,
}

impl DocumentTotals {
    pub fn builder(
        sum_of_line_net_amounts: Amount,
        total_without_vat: Amount,
        total_with_vat: Amount,
        amount_due: Amount,
    ) -> DocumentTotalsBuilder {
        DocumentTotalsBuilder {
            totals: Self {
                sum_of_line_net_amounts,
                sum_of_allowances: None,
                sum_of_charges: None,
                total_without_vat,
                total_vat: None,
                total_vat_in_accounting_currency: None,
                total_with_vat,
                paid_amount: None,
                rounding_amount: None,
                amount_due,
            },
        }
    }

    fn check(&self) -> Result<(), InvoiceError> {
        let expected_with_vat = self
            .total_without_vat
            .checked_add(self.total_vat.unwrap_or(Amount::ZERO))
            .ok_or_else(|| {
                RuleViolation::malformed(
                    "BR-CO-15",
                    "totals.total_with_vat",
                    "total without VAT plus total VAT is outside the representable amount range",
                )
            })?;
        ensure(self.total_with_vat.matches(expected_with_vat), || {
            RuleViolation::amount_mismatch(
                "BR-CO-15",
                "totals.total_with_vat",
                format!(
                    "invoice total with VAT {} must equal total without VAT {} plus total VAT {}",
                    self.total_with_vat.rounded_value(),
                    self.total_without_vat.rounded_value(),
                    self.total_vat.unwrap_or(Amount::ZERO).rounded_value()
                ),
            )
        })?;

        let expected_due = self
            .total_with_vat
            .checked_sub(self.paid_amount.unwrap_or(Amount::ZERO))
            .and_then(|due| due.checked_add(self.rounding_amount.unwrap_or(Amount::ZERO)))
            .ok_or_else(|| {
                RuleViolation::malformed(
                    "BR-CO-16",
                    "totals.amount_due",
                    "total with VAT minus paid amount plus rounding amount is outside the representable amount range",
                )
            })?;
        ensure(self.amount_due.matches(expected_due), || {
            RuleViolation::amount_mismatch(
                "BR-CO-16",
                "totals.amount_due",
                format!(
                    "amount due {} must equal total with VAT minus paid amount plus rounding amount ({})",
                    self.amount_due.rounded_value(),
                    expected_due.rounded_value()
                ),
            )
        })
    }

    /// BT-106.
    pub fn sum_of_line_net_amounts(&self) -> Amount {
        self.sum_of_line_net_amounts
    }

    /// BT-107.
    pub fn sum_of_allowances(&self) -> Option<Amount> {
        self.sum_of_allowances
    }

    /// BT-108.
    pub fn sum_of_charges(&self) -> Option<Amount> {
        self.sum_of_charges
    }

    /// BT-109.
    pub fn total_without_vat(&self) -> Amount {
        self.total_without_vat
    }

    /// BT-110.
    pub fn total_vat(&self) -> Option<Amount> {
        self.total_vat
    }

    /// BT-111.
    pub fn total_vat_in_accounting_currency(&self) -> Option<Amount> {
        self.total_vat_in_accounting_currency
    }

    /// BT-112.
    pub fn total_with_vat(&self) -> Amount {
        self.total_with_vat
    }

    /// BT-113.
    pub fn paid_amount(&self) -> Option<Amount> {
        self.paid_amount
    }

    /// BT-114.
    pub fn rounding_amount(&self) -> Option<Amount> {
        self.rounding_amount
    }

    /// BT-115.
    pub fn amount_due(&self) -> Amount {
        self.amount_due
    }
}

/// Builder for [`DocumentTotals`].
pub struct DocumentTotalsBuilder {
    totals: DocumentTotals,
}

impl DocumentTotalsBuilder {
    pub fn sum_of_allowances(mut self, amount: Amount) -> Self {
        self.totals.sum_of_allowances = Some(amount);
        self
    }

    pub fn sum_of_charges(mut self, amount: Amount) -> Self {
        self.totals.sum_of_charges = Some(amount);
        self
    }

    pub fn total_vat(mut self, amount: Amount) -> Self {
        self.totals.total_vat = Some(amount);
        self
    }

    pub fn total_vat_in_accounting_currency(mut self, amount: Amount) -> Self {
        self.totals.total_vat_in_accounting_currency = Some(amount);
        self
    }

    pub fn paid_amount(mut self, amount: Amount) -> Self {
        self.totals.paid_amount = Some(amount);
        self
    }

    pub fn rounding_amount(mut self, amount: Amount) -> Self {
        self.totals.rounding_amount = Some(amount);
        self
    }

    /// Check BR-CO-15 and BR-CO-16.
    pub fn build(self) -> Result<DocumentTotals, InvoiceError> {
        self.totals.check()?;
        Ok(self.totals)
    }
}
