use chrono::NaiveDate;
use serde::Serialize;

use super::codes::{InvoiceTypeCode, VatPointDateCode};
use super::currencies::CurrencyCode;
use super::delivery::DeliveryInformation;
use super::document::{DocumentLevelAllowance, DocumentLevelCharge, DocumentTotals, VatBreakdown};
use super::line::InvoiceLine;
use super::party::{Buyer, Payee, Seller, SellerTaxRepresentativeParty};
use super::payment::PaymentInstructions;
use super::period::InvoicingPeriod;

/// BG-2: Process control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessControl {
    business_process_type: Option<String>,
    specification_identifier: String,
}

impl ProcessControl {
    /// Specification identifier (BT-24), e.g. `urn:cen.eu:en16931:2017`.
    pub fn new(specification_identifier: impl Into<String>) -> Self {
        Self {
            business_process_type: None,
            specification_identifier: specification_identifier.into(),
        }
    }

    /// BT-23.
    pub fn with_business_process_type(mut self, process: impl Into<String>) -> Self {
        self.business_process_type = Some(process.into());
        self
    }

    pub fn business_process_type(&self) -> Option<&str> {
        self.business_process_type.as_deref()
    }

    pub fn specification_identifier(&self) -> &str {
        &self.specification_identifier
    }
}

/// BG-1: Invoice note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceNote {
    /// BT-21.
    pub subject_code: Option<String>,
    /// BT-22.
    pub text: String,
}

impl InvoiceNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            subject_code: None,
            text: text.into(),
        }
    }

    pub fn with_subject_code(mut self, code: impl Into<String>) -> Self {
        self.subject_code = Some(code.into());
        self
    }
}

/// BG-3: Preceding invoice reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecedingInvoiceReference {
    /// BT-25, mandatory (BR-55).
    pub reference: String,
    /// BT-26.
    pub issue_date: Option<NaiveDate>,
}

impl PrecedingInvoiceReference {
    pub fn new(reference: impl Into<String>, issue_date: Option<NaiveDate>) -> Self {
        Self {
            reference: reference.into(),
            issue_date,
        }
    }
}

/// BG-24: Additional supporting document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportingDocument {
    /// BT-122, mandatory (BR-52).
    pub reference: String,
    /// BT-123.
    pub description: Option<String>,
    /// BT-124.
    pub external_location: Option<String>,
}

impl SupportingDocument {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            description: None,
            external_location: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn external_location(mut self, uri: impl Into<String>) -> Self {
        self.external_location = Some(uri.into());
        self
    }
}

/// Document-level references to other business objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentReferences {
    /// BT-10.
    pub buyer_reference: Option<String>,
    /// BT-11.
    pub project_reference: Option<String>,
    /// BT-12.
    pub contract_reference: Option<String>,
    /// BT-13.
    pub purchase_order_reference: Option<String>,
    /// BT-14.
    pub sales_order_reference: Option<String>,
    /// BT-15.
    pub receiving_advice_reference: Option<String>,
    /// BT-16.
    pub despatch_advice_reference: Option<String>,
    /// BT-17.
    pub tender_or_lot_reference: Option<String>,
    /// BT-18.
    pub invoiced_object_identifier: Option<String>,
    /// BT-19.
    pub buyer_accounting_reference: Option<String>,
}

/// A validated EN 16931 invoice.
///
/// Only obtainable through [`InvoiceBuilder::build`](super::InvoiceBuilder::build),
/// which runs the full business rule pass. There are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub(crate) number: String,
    pub(crate) issue_date: NaiveDate,
    pub(crate) type_code: InvoiceTypeCode,
    pub(crate) currency: CurrencyCode,
    pub(crate) vat_accounting_currency: Option<CurrencyCode>,
    pub(crate) vat_point_date: Option<NaiveDate>,
    pub(crate) vat_point_date_code: Option<VatPointDateCode>,
    pub(crate) payment_due_date: Option<NaiveDate>,
    pub(crate) payment_terms: Option<String>,
    pub(crate) references: DocumentReferences,
    pub(crate) notes: Vec<InvoiceNote>,
    pub(crate) process_control: ProcessControl,
    pub(crate) preceding_invoices: Vec<PrecedingInvoiceReference>,
    pub(crate) seller: Seller,
    pub(crate) buyer: Buyer,
    pub(crate) payee: Option<Payee>,
    pub(crate) tax_representative: Option<SellerTaxRepresentativeParty>,
    pub(crate) delivery: Option<DeliveryInformation>,
    pub(crate) invoicing_period: Option<InvoicingPeriod>,
    pub(crate) payment_instructions: Option<PaymentInstructions>,
    pub(crate) allowances: Vec<DocumentLevelAllowance>,
    pub(crate) charges: Vec<DocumentLevelCharge>,
    pub(crate) totals: DocumentTotals,
    pub(crate) vat_breakdowns: Vec<VatBreakdown>,
    pub(crate) supporting_documents: Vec<SupportingDocument>,
    pub(crate) lines: Vec<InvoiceLine>,
}

impl Invoice {
    /// Start building an invoice. Same as [`InvoiceBuilder::new`](super::InvoiceBuilder::new).
    pub fn builder(
        number: impl Into<String>,
        issue_date: NaiveDate,
        currency: CurrencyCode,
        process_control: ProcessControl,
    ) -> super::InvoiceBuilder {
        super::InvoiceBuilder::new(number, issue_date, currency, process_control)
    }

    /// BT-1.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// BT-2.
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// BT-3.
    pub fn type_code(&self) -> InvoiceTypeCode {
        self.type_code
    }

    /// BT-5.
    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// BT-6.
    pub fn vat_accounting_currency(&self) -> Option<CurrencyCode> {
        self.vat_accounting_currency
    }

    /// BT-7.
    pub fn vat_point_date(&self) -> Option<NaiveDate> {
        self.vat_point_date
    }

    /// BT-8.
    pub fn vat_point_date_code(&self) -> Option<VatPointDateCode> {
        self.vat_point_date_code
    }

    /// BT-9.
    pub fn payment_due_date(&self) -> Option<NaiveDate> {
        self.payment_due_date
    }

    /// BT-20.
    pub fn payment_terms(&self) -> Option<&str> {
        self.payment_terms.as_deref()
    }

    pub fn references(&self) -> &DocumentReferences {
        &self.references
    }

    /// BG-1.
    pub fn notes(&self) -> &[InvoiceNote] {
        &self.notes
    }

    /// BG-2.
    pub fn process_control(&self) -> &ProcessControl {
        &self.process_control
    }

    /// BG-3.
    pub fn preceding_invoices(&self) -> &[PrecedingInvoiceReference] {
        &self.preceding_invoices
    }

    /// BG-4.
    pub fn seller(&self) -> &Seller {
        &self.seller
    }

    /// BG-7.
    pub fn buyer(&self) -> &Buyer {
        &self.buyer
    }

    /// BG-10.
    pub fn payee(&self) -> Option<&Payee> {
        self.payee.as_ref()
    }

    /// BG-11.
    pub fn tax_representative(&self) -> Option<&SellerTaxRepresentativeParty> {
        self.tax_representative.as_ref()
    }

    /// BG-13.
    pub fn delivery(&self) -> Option<&DeliveryInformation> {
        self.delivery.as_ref()
    }

    /// BG-14.
    pub fn invoicing_period(&self) -> Option<&InvoicingPeriod> {
        self.invoicing_period.as_ref()
    }

    /// BG-16.
    pub fn payment_instructions(&self) -> Option<&PaymentInstructions> {
        self.payment_instructions.as_ref()
    }

    /// BG-20.
    pub fn allowances(&self) -> &[DocumentLevelAllowance] {
        &self.allowances
    }

    /// BG-21.
    pub fn charges(&self) -> &[DocumentLevelCharge] {
        &self.charges
    }

    /// BG-22.
    pub fn totals(&self) -> &DocumentTotals {
        &self.totals
    }

    /// BG-23.
    pub fn vat_breakdowns(&self) -> &[VatBreakdown] {
        &self.vat_breakdowns
    }

    /// BG-24.
    pub fn supporting_documents(&self) -> &[SupportingDocument] {
        &self.supporting_documents
    }

    /// BG-25.
    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }
}
