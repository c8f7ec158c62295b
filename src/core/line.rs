use rust_decimal::Decimal;
use serde::Serialize;

use super::category_rules::CategoryRule;
use super::codes::VatCategory;
use super::countries::CountryCode;
use super::decimal::{AMOUNT_SCALE, Amount, Percentage, Quantity, round_half_up};
use super::error::{InvoiceError, RuleViolation, ensure, non_empty, present};
use super::identifiers::Identifier;
use super::period::InvoiceLinePeriod;
use super::reason_codes::{AllowanceReasonCode, ChargeReasonCode};
use super::units::UnitOfMeasure;

/// Reason text or reason code must be given; blank text counts as absent.
pub(crate) fn require_reason(
    reason: &Option<String>,
    has_code: bool,
    rule: &str,
    field: &str,
) -> Result<(), InvoiceError> {
    ensure(reason.is_some() || has_code, || {
        RuleViolation::missing_alternative(
            rule,
            field,
            "requires a reason text or a reason code",
        )
    })
}

/// BG-29: Price details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceDetails {
    net_price: Amount,
    discount: Option<Amount>,
    gross_price: Option<Amount>,
    base_quantity: Option<Quantity>,
    base_quantity_unit: Option<UnitOfMeasure>,
}

impl PriceDetails {
    /// Item net price (BT-146), must not be negative (BR-27).
    pub fn new(net_price: Amount) -> Result<Self, InvoiceError> {
        ensure(!net_price.is_negative(), || {
            RuleViolation::malformed(
                "BR-27",
                "line.price.net_price",
                format!("item net price {net_price} must not be negative"),
            )
        })?;
        Ok(Self {
            net_price,
            discount: None,
            gross_price: None,
            base_quantity: None,
            base_quantity_unit: None,
        })
    }

    /// Item gross price (BT-148, BR-28) and optional price discount (BT-147).
    pub fn with_gross_price(
        mut self,
        gross_price: Amount,
        discount: Option<Amount>,
    ) -> Result<Self, InvoiceError> {
        ensure(!gross_price.is_negative(), || {
            RuleViolation::malformed(
                "BR-28",
                "line.price.gross_price",
                format!("item gross price {gross_price} must not be negative"),
            )
        })?;
        self.gross_price = Some(gross_price);
        self.discount = discount;
        Ok(self)
    }

    /// Item price base quantity (BT-149) and its unit (BT-150).
    pub fn with_base_quantity(
        mut self,
        quantity: Quantity,
        unit: Option<UnitOfMeasure>,
    ) -> Result<Self, InvoiceError> {
        ensure(quantity.value() > Decimal::ZERO, || {
            RuleViolation::malformed(
                "BT-149",
                "line.price.base_quantity",
                format!("item price base quantity {quantity} must be greater than zero"),
            )
        })?;
        self.base_quantity = Some(quantity);
        self.base_quantity_unit = unit;
        Ok(self)
    }

    /// BT-146.
    pub fn net_price(&self) -> Amount {
        self.net_price
    }

    /// BT-147.
    pub fn discount(&self) -> Option<Amount> {
        self.discount
    }

    /// BT-148.
    pub fn gross_price(&self) -> Option<Amount> {
        self.gross_price
    }

    /// BT-149.
    pub fn base_quantity(&self) -> Option<Quantity> {
        self.base_quantity
    }

    /// BT-150.
    pub fn base_quantity_unit(&self) -> Option<UnitOfMeasure> {
        self.base_quantity_unit
    }

    /// Base quantity the net price refers to, 1 when unspecified.
    pub fn effective_base_quantity(&self) -> Quantity {
        self.base_quantity.unwrap_or(Quantity::ONE)
    }
}

/// BG-32: Item attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAttribute {
    name: String,
    value: String,
}

impl ItemAttribute {
    /// Name (BT-160) and value (BT-161) are both mandatory (BR-54).
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, InvoiceError> {
        Ok(Self {
            name: non_empty(name, "BR-54", "line.item.attribute.name")?,
            value: non_empty(value, "BR-54", "line.item.attribute.value")?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// BG-31: Item information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemInformation {
    name: String,
    description: Option<String>,
    seller_identifier: Option<String>,
    buyer_identifier: Option<String>,
    standard_identifier: Option<Identifier>,
    classification_identifiers: Vec<Identifier>,
    origin_country: Option<CountryCode>,
    attributes: Vec<ItemAttribute>,
}

impl ItemInformation {
    /// Item name (BT-153) is mandatory (BR-25).
    pub fn new(name: impl Into<String>) -> Result<Self, InvoiceError> {
        Ok(Self {
            name: non_empty(name, "BR-25", "line.item.name")?,
            description: None,
            seller_identifier: None,
            buyer_identifier: None,
            standard_identifier: None,
            classification_identifiers: Vec::new(),
            origin_country: None,
            attributes: Vec::new(),
        })
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(Some(description.into()));
        self
    }

    pub fn seller_identifier(mut self, id: impl Into<String>) -> Self {
        self.seller_identifier = present(Some(id.into()));
        self
    }

    pub fn buyer_identifier(mut self, id: impl Into<String>) -> Self {
        self.buyer_identifier = present(Some(id.into()));
        self
    }

    pub fn standard_identifier(mut self, id: Identifier) -> Self {
        self.standard_identifier = Some(id);
        self
    }

    pub fn classification_identifier(mut self, id: Identifier) -> Self {
        self.classification_identifiers.push(id);
        self
    }

    pub fn origin_country(mut self, country: CountryCode) -> Self {
        self.origin_country = Some(country);
        self
    }

    pub fn attribute(mut self, attribute: ItemAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// BT-153.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// BT-154.
    pub fn item_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// BT-155.
    pub fn item_seller_identifier(&self) -> Option<&str> {
        self.seller_identifier.as_deref()
    }

    /// BT-156.
    pub fn item_buyer_identifier(&self) -> Option<&str> {
        self.buyer_identifier.as_deref()
    }

    /// BT-157.
    pub fn item_standard_identifier(&self) -> Option<&Identifier> {
        self.standard_identifier.as_ref()
    }

    /// BT-158.
    pub fn classification_identifiers(&self) -> &[Identifier] {
        &self.classification_identifiers
    }

    /// BT-159.
    pub fn item_origin_country(&self) -> Option<CountryCode> {
        self.origin_country
    }

    /// BG-32.
    pub fn attributes(&self) -> &[ItemAttribute] {
        &self.attributes
    }
}

/// BG-30: Line VAT information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineVatInformation {
    category: VatCategory,
    rate: Option<Percentage>,
}

impl LineVatInformation {
    /// The rate must fit the category (BR-S-5, BR-Z-5, BR-E-5, BR-AE-5, ...).
    pub fn new(category: VatCategory, rate: Option<Percentage>) -> Result<Self, InvoiceError> {
        CategoryRule::of(category).check_rate(rate, 5, "line.vat.rate")?;
        Ok(Self { category, rate })
    }

    /// BT-151.
    pub fn category(&self) -> VatCategory {
        self.category
    }

    /// BT-152.
    pub fn rate(&self) -> Option<Percentage> {
        self.rate
    }
}

/// BG-27: Invoice line allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLineAllowance {
    amount: Amount,
    base_amount: Option<Amount>,
    percentage: Option<Percentage>,
    reason: Option<String>,
    reason_code: Option<AllowanceReasonCode>,
}

impl InvoiceLineAllowance {
    /// Reason (BT-139) or reason code (BT-140) is required (BR-42).
    pub fn new(
        amount: Amount,
        reason: Option<String>,
        reason_code: Option<AllowanceReasonCode>,
    ) -> Result<Self, InvoiceError> {
        let reason = present(reason);
        require_reason(&reason, reason_code.is_some(), "BR-42", "line.allowance")?;
        Ok(Self {
            amount,
            base_amount: None,
            percentage: None,
            reason,
            reason_code,
        })
    }

    /// Base amount (BT-137) and percentage (BT-138).
    pub fn with_base(mut self, base_amount: Amount, percentage: Percentage) -> Self {
        self.base_amount = Some(base_amount);
        self.percentage = Some(percentage);
        self
    }

    /// BT-136.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn base_amount(&self) -> Option<Amount> {
        self.base_amount
    }

    pub fn percentage(&self) -> Option<Percentage> {
        self.percentage
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn reason_code(&self) -> Option<AllowanceReasonCode> {
        self.reason_code
    }
}

/// BG-28: Invoice line charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLineCharge {
    amount: Amount,
    base_amount: Option<Amount>,
    percentage: Option<Percentage>,
    reason: Option<String>,
    reason_code: Option<ChargeReasonCode>,
}

impl InvoiceLineCharge {
    /// Reason (BT-144) or reason code (BT-145) is required (BR-44).
    pub fn new(
        amount: Amount,
        reason: Option<String>,
        reason_code: Option<ChargeReasonCode>,
    ) -> Result<Self, InvoiceError> {
        let reason = present(reason);
        require_reason(&reason, reason_code.is_some(), "BR-44", "line.charge")?;
        Ok(Self {
            amount,
            base_amount: None,
            percentage: None,
            reason,
            reason_code,
        })
    }

    /// Base amount (BT-142) and percentage (BT-143).
    pub fn with_base(mut self, base_amount: Amount, percentage: Percentage) -> Self {
        self.base_amount = Some(base_amount);
        self.percentage = Some(percentage);
        self
    }

    /// BT-141.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn base_amount(&self) -> Option<Amount> {
        self.base_amount
    }

    pub fn percentage(&self) -> Option<Percentage> {
        self.percentage
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn reason_code(&self) -> Option<ChargeReasonCode> {
        self.reason_code
    }
}

/// BG-25: Invoice line. Built through [`InvoiceLineBuilder`](super::InvoiceLineBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub(crate) identifier: String,
    pub(crate) note: Option<String>,
    pub(crate) object_identifier: Option<Identifier>,
    pub(crate) quantity: Quantity,
    pub(crate) unit: UnitOfMeasure,
    pub(crate) net_amount: Amount,
    #[serde(skip)]
    pub(crate) priced_amount: Amount,
    pub(crate) buyer_order_line_reference: Option<String>,
    pub(crate) accounting_reference: Option<String>,
    pub(crate) period: Option<InvoiceLinePeriod>,
    pub(crate) allowances: Vec<InvoiceLineAllowance>,
    pub(crate) charges: Vec<InvoiceLineCharge>,
    pub(crate) price: PriceDetails,
    pub(crate) vat: LineVatInformation,
    pub(crate) item: ItemInformation,
}

impl InvoiceLine {
    /// Quantity × item net price ÷ price base quantity, unrounded.
    ///
    /// This is the figure the document totals and the VAT breakdown
    /// taxable amounts are reconciled against.
    pub fn priced_amount(&self) -> Amount {
        self.priced_amount
    }

    /// Computes the priced amount, failing with BT-131 when it leaves the
    /// decimal range.
    pub(crate) fn checked_priced_amount(
        quantity: Quantity,
        price: &PriceDetails,
    ) -> Result<Amount, RuleViolation> {
        price
            .net_price
            .value()
            .checked_mul(quantity.value())
            .and_then(|v| v.checked_div(price.effective_base_quantity().value()))
            .map(Amount::new)
            .ok_or_else(|| {
                RuleViolation::malformed(
                    "BT-131",
                    "line.net_amount",
                    format!(
                        "quantity {} at net price {} is outside the representable amount range",
                        quantity.value(),
                        price.net_price
                    ),
                )
            })
    }

    /// Priced amount minus line allowances plus line charges, rounded.
    pub(crate) fn derived_net_amount(
        priced: Amount,
        allowances: &[InvoiceLineAllowance],
        charges: &[InvoiceLineCharge],
    ) -> Result<Amount, RuleViolation> {
        let net = Amount::checked_sum(allowances.iter().map(|a| a.amount))
            .and_then(|allowances| priced.checked_sub(allowances))
            .zip(Amount::checked_sum(charges.iter().map(|c| c.amount)))
            .and_then(|(net, charges)| net.checked_add(charges))
            .ok_or_else(|| {
                RuleViolation::malformed(
                    "BT-131",
                    "line.net_amount",
                    "line allowances and charges are outside the representable amount range",
                )
            })?;
        Ok(Amount::new(round_half_up(net.value(), AMOUNT_SCALE)))
    }

    pub(crate) fn check(&self) -> Result<(), InvoiceError> {
        ensure(!self.identifier.trim().is_empty(), || {
            RuleViolation::malformed(
                "BR-21",
                "line.identifier",
                "line identifier must not be empty",
            )
        })
    }

    /// BT-126.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// BT-127.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// BT-128.
    pub fn object_identifier(&self) -> Option<&Identifier> {
        self.object_identifier.as_ref()
    }

    /// BT-129.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// BT-130.
    pub fn unit(&self) -> UnitOfMeasure {
        self.unit
    }

    /// BT-131.
    pub fn net_amount(&self) -> Amount {
        self.net_amount
    }

    /// BT-132.
    pub fn buyer_order_line_reference(&self) -> Option<&str> {
        self.buyer_order_line_reference.as_deref()
    }

    /// BT-133.
    pub fn accounting_reference(&self) -> Option<&str> {
        self.accounting_reference.as_deref()
    }

    /// BG-26.
    pub fn period(&self) -> Option<&InvoiceLinePeriod> {
        self.period.as_ref()
    }

    /// BG-27.
    pub fn allowances(&self) -> &[InvoiceLineAllowance] {
        &self.allowances
    }

    /// BG-28.
    pub fn charges(&self) -> &[InvoiceLineCharge] {
        &self.charges
    }

    /// BG-29.
    pub fn price(&self) -> &PriceDetails {
        &self.price
    }

    /// BG-30.
    pub fn vat(&self) -> &LineVatInformation {
        &self.vat
    }

    /// BG-31.
    pub fn item(&self) -> &ItemInformation {
        &self.item
    }
}
