use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category_rules::{CategoryRule, PartyIdentifiers, TaxAmountRule};
use super::codes::VatCategory;
use super::decimal::{Amount, Percentage};
use super::document::VatBreakdown;
use super::error::{InvoiceError, RuleViolation};
use super::identifiers::VatIdentifier;
use super::invoice::Invoice;
use super::line::InvoiceLine;

/// How the business rule pass reports failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Stop at the first violated rule and return it as [`InvoiceError::Rule`].
    #[default]
    FailFast,
    /// Evaluate every rule and return all violations as [`InvoiceError::Rules`].
    CollectAll,
}

/// Violations gathered during one pass.
struct Findings {
    mode: ValidationMode,
    violations: Vec<RuleViolation>,
}

impl Findings {
    fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            violations: Vec::new(),
        }
    }

    fn push(&mut self, violation: RuleViolation) -> Result<(), InvoiceError> {
        match self.mode {
            ValidationMode::FailFast => Err(InvoiceError::Rule(violation)),
            ValidationMode::CollectAll => {
                self.violations.push(violation);
                Ok(())
            }
        }
    }

    fn check(
        &mut self,
        condition: bool,
        violation: impl FnOnce() -> RuleViolation,
    ) -> Result<(), InvoiceError> {
        if condition {
            Ok(())
        } else {
            self.push(violation())
        }
    }

    fn record(&mut self, outcome: Result<(), RuleViolation>) -> Result<(), InvoiceError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(violation) => self.push(violation),
        }
    }

    fn finish(self) -> Result<(), InvoiceError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(InvoiceError::Rules(self.violations))
        }
    }
}

/// Run the document-wide business rules over an assembled invoice.
///
/// The evaluation order is fixed, so the reported rule for a given invalid
/// input is reproducible.
pub(crate) fn validate_invoice(
    invoice: &Invoice,
    mode: ValidationMode,
) -> Result<(), InvoiceError> {
    let mut findings = Findings::new(mode);

    // BR-CO-18: at least one VAT breakdown
    findings.check(!invoice.vat_breakdowns.is_empty(), || {
        RuleViolation::structural(
            "BR-CO-18",
            "vat_breakdowns",
            "invoice must have at least one VAT breakdown (BG-23)",
        )
    })?;

    check_document_sums(invoice, &mut findings)?;
    check_vat_categories(invoice, &mut findings)?;

    // BR-CO-25: a positive amount due needs a due date or payment terms
    let amount_due = invoice.totals.amount_due();
    findings.check(
        !amount_due.is_positive()
            || amount_due.rounded_value().is_zero()
            || invoice.payment_due_date.is_some()
            || invoice.payment_terms.is_some(),
        || {
            RuleViolation::missing_alternative(
                "BR-CO-25",
                "payment_due_date",
                format!(
                    "amount due {} requires a payment due date (BT-9) or payment terms (BT-20)",
                    amount_due.rounded_value()
                ),
            )
        },
    )?;

    // BR-CO-9: VAT identifiers carry an ISO 3166-1 prefix (EL for Greece)
    let vat_identifiers = [
        ("seller.vat_identifier", invoice.seller.vat_identifier.as_ref()),
        (
            "tax_representative.vat_identifier",
            invoice.tax_representative.as_ref().map(|r| r.vat_identifier()),
        ),
        ("buyer.vat_identifier", invoice.buyer.vat_identifier.as_ref()),
    ];
    for (field, vat_id) in vat_identifiers {
        if let Some(vat_id) = vat_id {
            check_vat_prefix(vat_id, field, &mut findings)?;
        }
    }

    // BR-16: at least one invoice line
    findings.check(!invoice.lines.is_empty(), || {
        RuleViolation::structural("BR-16", "lines", "invoice must have at least one line (BG-25)")
    })?;

    check_document_fields(invoice, &mut findings)?;

    findings.finish()
}

fn check_vat_prefix(
    vat_id: &VatIdentifier,
    field: &str,
    findings: &mut Findings,
) -> Result<(), InvoiceError> {
    findings.check(vat_id.has_valid_prefix(), || {
        RuleViolation::malformed(
            "BR-CO-9",
            field,
            format!("VAT identifier '{vat_id}' must start with an ISO 3166-1 alpha-2 country code"),
        )
    })
}

fn out_of_range(rule: impl Into<String>, field: impl Into<String>, what: &str) -> RuleViolation {
    RuleViolation::malformed(
        rule,
        field,
        format!("{what} is outside the representable amount range"),
    )
}

/// Passes a checked sum through, recording `rule` when it overflowed.
fn in_range(
    sum: Option<Amount>,
    rule: &str,
    field: &str,
    what: &str,
    findings: &mut Findings,
) -> Result<Option<Amount>, InvoiceError> {
    if sum.is_none() {
        findings.push(out_of_range(rule, field, what))?;
    }
    Ok(sum)
}

/// BR-CO-10 to BR-CO-14. Sums are accumulated unrounded and rounded once.
fn check_document_sums(invoice: &Invoice, findings: &mut Findings) -> Result<(), InvoiceError> {
    let totals = &invoice.totals;

    // BR-CO-10: sum of line net amounts
    let line_sum = in_range(
        Amount::checked_sum(invoice.lines.iter().map(InvoiceLine::priced_amount)),
        "BR-CO-10",
        "totals.sum_of_line_net_amounts",
        "sum of invoice line net amounts",
        findings,
    )?;
    if let Some(line_sum) = line_sum {
        findings.check(line_sum.matches(totals.sum_of_line_net_amounts()), || {
            RuleViolation::amount_mismatch(
                "BR-CO-10",
                "totals.sum_of_line_net_amounts",
                format!(
                    "sum of invoice line net amounts is {}, document total (BT-106) is {}",
                    line_sum.rounded_value(),
                    totals.sum_of_line_net_amounts().rounded_value()
                ),
            )
        })?;
    }

    // BR-CO-11: sum of document level allowances
    let allowance_sum = in_range(
        Amount::checked_sum(invoice.allowances.iter().map(|a| a.amount())),
        "BR-CO-11",
        "totals.sum_of_allowances",
        "sum of document level allowances",
        findings,
    )?;
    let stated_allowances = totals.sum_of_allowances().unwrap_or(Amount::ZERO);
    if let Some(allowance_sum) = allowance_sum {
        findings.check(allowance_sum.matches(stated_allowances), || {
            RuleViolation::amount_mismatch(
                "BR-CO-11",
                "totals.sum_of_allowances",
                format!(
                    "sum of document level allowances is {}, document total (BT-107) is {}",
                    allowance_sum.rounded_value(),
                    stated_allowances.rounded_value()
                ),
            )
        })?;
    }

    // BR-CO-12: sum of document level charges
    let charge_sum = in_range(
        Amount::checked_sum(invoice.charges.iter().map(|c| c.amount())),
        "BR-CO-12",
        "totals.sum_of_charges",
        "sum of document level charges",
        findings,
    )?;
    let stated_charges = totals.sum_of_charges().unwrap_or(Amount::ZERO);
    if let Some(charge_sum) = charge_sum {
        findings.check(charge_sum.matches(stated_charges), || {
            RuleViolation::amount_mismatch(
                "BR-CO-12",
                "totals.sum_of_charges",
                format!(
                    "sum of document level charges is {}, document total (BT-108) is {}",
                    charge_sum.rounded_value(),
                    stated_charges.rounded_value()
                ),
            )
        })?;
    }

    // BR-CO-13: total without VAT = lines - allowances + charges
    if let (Some(line_sum), Some(allowance_sum), Some(charge_sum)) =
        (line_sum, allowance_sum, charge_sum)
    {
        let expected_without_vat = in_range(
            line_sum
                .checked_sub(allowance_sum)
                .and_then(|net| net.checked_add(charge_sum)),
            "BR-CO-13",
            "totals.total_without_vat",
            "lines minus allowances plus charges",
            findings,
        )?;
        if let Some(expected_without_vat) = expected_without_vat {
            findings.check(totals.total_without_vat().matches(expected_without_vat), || {
                RuleViolation::amount_mismatch(
                    "BR-CO-13",
                    "totals.total_without_vat",
                    format!(
                        "total without VAT (BT-109) is {}, expected {}",
                        totals.total_without_vat().rounded_value(),
                        expected_without_vat.rounded_value()
                    ),
                )
            })?;
        }
    }

    // BR-CO-14: total VAT = sum of VAT breakdown tax amounts
    let breakdown_vat = in_range(
        Amount::checked_sum(invoice.vat_breakdowns.iter().map(|b| b.tax_amount())),
        "BR-CO-14",
        "totals.total_vat",
        "sum of VAT breakdown tax amounts",
        findings,
    )?;
    let Some(breakdown_vat) = breakdown_vat else {
        return Ok(());
    };
    let stated_vat = totals.total_vat().unwrap_or(Amount::ZERO);
    findings.check(stated_vat.matches(breakdown_vat), || {
        RuleViolation::amount_mismatch(
            "BR-CO-14",
            "totals.total_vat",
            format!(
                "total VAT (BT-110) is {}, VAT breakdowns sum to {}",
                stated_vat.rounded_value(),
                breakdown_vat.rounded_value()
            ),
        )
    })
}

/// Lines, allowances, charges and breakdown rows sharing one VAT rate.
#[derive(Default)]
struct RateGroup<'a> {
    taxable_base: Amount,
    /// The taxable base left the decimal range.
    overflowed: bool,
    rows: Vec<(usize, &'a VatBreakdown)>,
}

impl RateGroup<'_> {
    fn accumulate(&mut self, amount: Amount) {
        match self.taxable_base.checked_add(amount) {
            Some(base) => self.taxable_base = base,
            None => self.overflowed = true,
        }
    }
}

/// Everything on the invoice that carries one VAT category.
#[derive(Default)]
struct CategoryUsage<'a> {
    /// Rule number (2 line, 3 allowance, 4 charge) and field of the first use.
    first_use: Option<(u8, String)>,
    rows: usize,
    rates: BTreeMap<Option<Percentage>, RateGroup<'a>>,
}

impl<'a> CategoryUsage<'a> {
    fn used_by(&mut self, number: u8, field: impl FnOnce() -> String) {
        if self.first_use.is_none() {
            self.first_use = Some((number, field()));
        }
    }

    fn rate(&mut self, rate: Option<Percentage>) -> &mut RateGroup<'a> {
        self.rates.entry(rate.map(|r| r.normalized())).or_default()
    }
}

fn collect_categories(invoice: &Invoice) -> BTreeMap<VatCategory, CategoryUsage<'_>> {
    let mut categories: BTreeMap<VatCategory, CategoryUsage<'_>> = BTreeMap::new();

    for (i, line) in invoice.lines.iter().enumerate() {
        let usage = categories.entry(line.vat.category()).or_default();
        usage.used_by(2, || format!("lines[{i}].vat.category"));
        let group = usage.rate(line.vat.rate());
        group.accumulate(line.priced_amount());
    }
    for (i, allowance) in invoice.allowances.iter().enumerate() {
        let usage = categories.entry(allowance.vat_category()).or_default();
        usage.used_by(3, || format!("allowances[{i}].vat_category"));
        let group = usage.rate(allowance.vat_rate());
        group.accumulate(-allowance.amount());
    }
    for (i, charge) in invoice.charges.iter().enumerate() {
        let usage = categories.entry(charge.vat_category()).or_default();
        usage.used_by(4, || format!("charges[{i}].vat_category"));
        let group = usage.rate(charge.vat_rate());
        group.accumulate(charge.amount());
    }
    for (i, row) in invoice.vat_breakdowns.iter().enumerate() {
        let usage = categories.entry(row.category()).or_default();
        usage.rows += 1;
        usage.rate(row.rate()).rows.push((i, row));
    }

    categories
}

fn party_identifiers(invoice: &Invoice) -> PartyIdentifiers {
    PartyIdentifiers {
        seller_vat: invoice.seller.vat_identifier.is_some(),
        seller_tax_registration: invoice.seller.tax_registration_identifier.is_some(),
        representative_vat: invoice.tax_representative.is_some(),
        buyer_vat: invoice.buyer.vat_identifier.is_some(),
        buyer_legal_registration: invoice.buyer.legal_registration_identifier.is_some(),
    }
}

/// Per VAT category rules, driven by [`CategoryRule`].
///
/// Categories are visited in [`VatCategory`] order and rates in ascending
/// order within a category. Exclusivity is checked before anything else.
fn check_vat_categories(invoice: &Invoice, findings: &mut Findings) -> Result<(), InvoiceError> {
    let categories = collect_categories(invoice);
    let parties = party_identifiers(invoice);

    // BR-O-11 and friends: an exclusive category admits no other category
    for category in categories.keys() {
        let rule = CategoryRule::of(*category);
        if rule.exclusive && categories.len() > 1 {
            let others: Vec<&str> = categories
                .keys()
                .filter(|c| *c != category)
                .map(|c| c.code())
                .collect();
            findings.push(RuleViolation::category(
                rule.rule_id(11),
                "vat_breakdowns",
                format!(
                    "VAT category {} ({}) cannot be combined with other categories, found {}",
                    category.code(),
                    category.name(),
                    others.join(", ")
                ),
            ))?;
        }
    }

    for (category, usage) in &categories {
        let rule = CategoryRule::of(*category);

        // BR-x-1: a used category needs its VAT breakdown row(s)
        if usage.first_use.is_some() && usage.rows == 0 {
            findings.push(RuleViolation::structural(
                rule.rule_id(1),
                "vat_breakdowns",
                format!(
                    "VAT category {} is used but has no VAT breakdown row",
                    category.code()
                ),
            ))?;
            continue;
        }
        if rule.single_breakdown_row {
            findings.check(usage.rows <= 1, || {
                RuleViolation::structural(
                    rule.rule_id(1),
                    "vat_breakdowns",
                    format!(
                        "VAT category {} must have exactly one VAT breakdown row, found {}",
                        category.code(),
                        usage.rows
                    ),
                )
            })?;
        }

        // BR-x-2/3/4: identifiers the category requires from the parties
        if let Some((number, field)) = &usage.first_use {
            findings.check(rule.identity_satisfied(&parties), || {
                RuleViolation::category(
                    rule.rule_id(*number),
                    field.as_str(),
                    format!(
                        "VAT category {} ({}) {}",
                        category.code(),
                        category.name(),
                        rule.identity_description()
                    ),
                )
            })?;
        }

        for (rate, group) in &usage.rates {
            check_rate_group(rule, *rate, group, findings)?;
        }

        // BR-IC-11 / BR-IC-12: intra-community supply delivery facts
        if rule.requires_delivery_facts {
            check_delivery_facts(invoice, rule, findings)?;
        }
    }

    Ok(())
}

fn check_rate_group(
    rule: &CategoryRule,
    rate: Option<Percentage>,
    group: &RateGroup<'_>,
    findings: &mut Findings,
) -> Result<(), InvoiceError> {
    let rate_label = rate.map_or_else(|| "no rate".to_string(), |r| format!("rate {r}"));

    let Some(&(index, row)) = group.rows.first() else {
        // BR-x-8: nothing to reconcile the taxable base against
        return findings.push(RuleViolation::amount_mismatch(
            rule.rule_id(8),
            "vat_breakdowns",
            format!(
                "VAT category {} with {rate_label} has a taxable base of {} but no VAT breakdown row",
                rule.category.code(),
                group.taxable_base.rounded_value()
            ),
        ));
    };

    if !rule.single_breakdown_row {
        findings.check(group.rows.len() == 1, || {
            RuleViolation::structural(
                rule.rule_id(1),
                "vat_breakdowns",
                format!(
                    "VAT category {} with {rate_label} has {} VAT breakdown rows, expected one",
                    rule.category.code(),
                    group.rows.len()
                ),
            )
        })?;
    }

    // BR-x-8: taxable amount = lines - allowances + charges for this category and rate
    if group.overflowed {
        findings.push(out_of_range(
            rule.rule_id(8),
            format!("vat_breakdowns[{index}].taxable_amount"),
            "taxable base of lines minus allowances plus charges",
        ))?;
    } else {
        findings.check(row.taxable_amount().matches(group.taxable_base), || {
            RuleViolation::amount_mismatch(
                rule.rule_id(8),
                format!("vat_breakdowns[{index}].taxable_amount"),
                format!(
                    "VAT category {} with {rate_label}: taxable amount {} does not match lines minus allowances plus charges {}",
                    rule.category.code(),
                    row.taxable_amount().rounded_value(),
                    group.taxable_base.rounded_value()
                ),
            )
        })?;
    }

    // BR-x-9: tax amount
    let expected_tax = match rule.tax_amount {
        TaxAmountRule::RateApplied => row
            .taxable_amount()
            .checked_of_percentage(row.rate().unwrap_or(Percentage::ZERO)),
        TaxAmountRule::Zero => Some(Amount::ZERO),
    };
    match expected_tax {
        Some(expected_tax) => findings.check(row.tax_amount().matches(expected_tax), || {
            RuleViolation::amount_mismatch(
                rule.rule_id(9),
                format!("vat_breakdowns[{index}].tax_amount"),
                format!(
                    "VAT category {} with {rate_label}: tax amount {} must be {}",
                    rule.category.code(),
                    row.tax_amount().rounded_value(),
                    expected_tax.rounded_value()
                ),
            )
        })?,
        None => findings.push(out_of_range(
            rule.rule_id(9),
            format!("vat_breakdowns[{index}].tax_amount"),
            "taxable amount times rate",
        ))?,
    }

    // BR-x-10: exemption reason required or forbidden
    findings.record(rule.check_exemption(
        row.exemption_reason(),
        row.exemption_reason_code(),
        &format!("vat_breakdowns[{index}].exemption_reason"),
    ))
}

fn check_delivery_facts(
    invoice: &Invoice,
    rule: &CategoryRule,
    findings: &mut Findings,
) -> Result<(), InvoiceError> {
    let delivery = invoice.delivery.as_ref();

    let has_date = delivery.is_some_and(|d| d.actual_delivery_date.is_some() || d.period.is_some())
        || invoice.invoicing_period.is_some();
    findings.check(has_date, || {
        RuleViolation::missing_alternative(
            rule.rule_id(11),
            "delivery.actual_delivery_date",
            "intra-community supply requires an actual delivery date (BT-72) or an invoicing period (BG-14)",
        )
    })?;

    findings.check(delivery.is_some_and(|d| d.address.is_some()), || {
        RuleViolation::category(
            rule.rule_id(12),
            "delivery.address.country_code",
            "intra-community supply requires a deliver to country code (BT-80)",
        )
    })
}

/// Document level rules outside the monetary and VAT category checks.
fn check_document_fields(invoice: &Invoice, findings: &mut Findings) -> Result<(), InvoiceError> {
    // BR-01: specification identifier
    findings.check(
        !invoice.process_control.specification_identifier().trim().is_empty(),
        || {
            RuleViolation::structural(
                "BR-01",
                "process_control.specification_identifier",
                "invoice must have a specification identifier (BT-24)",
            )
        },
    )?;

    // BR-02: invoice number
    findings.check(!invoice.number.trim().is_empty(), || {
        RuleViolation::malformed("BR-02", "number", "invoice number must not be empty")
    })?;

    // BR-CO-3: VAT point date and VAT point date code are mutually exclusive
    findings.check(
        invoice.vat_point_date.is_none() || invoice.vat_point_date_code.is_none(),
        || {
            RuleViolation::structural(
                "BR-CO-3",
                "vat_point_date",
                "VAT point date (BT-7) and VAT point date code (BT-8) must not both be given",
            )
        },
    )?;

    // BR-53: VAT accounting currency needs the VAT total in that currency
    findings.check(
        invoice.vat_accounting_currency.is_none()
            || invoice.totals.total_vat_in_accounting_currency().is_some(),
        || {
            RuleViolation::structural(
                "BR-53",
                "totals.total_vat_in_accounting_currency",
                "a VAT accounting currency (BT-6) requires the total VAT amount in accounting currency (BT-111)",
            )
        },
    )?;

    // BR-55: preceding invoice references
    for (i, preceding) in invoice.preceding_invoices.iter().enumerate() {
        findings.check(!preceding.reference.trim().is_empty(), || {
            RuleViolation::malformed(
                "BR-55",
                format!("preceding_invoices[{i}].reference"),
                "preceding invoice reference (BT-25) must not be empty",
            )
        })?;
    }

    // BR-52: supporting document references
    for (i, document) in invoice.supporting_documents.iter().enumerate() {
        findings.check(!document.reference.trim().is_empty(), || {
            RuleViolation::malformed(
                "BR-52",
                format!("supporting_documents[{i}].reference"),
                "supporting document reference (BT-122) must not be empty",
            )
        })?;
    }

    Ok(())
}
