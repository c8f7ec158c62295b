use chrono::NaiveDate;
use tracing::{debug, warn};

use super::codes::{InvoiceTypeCode, VatPointDateCode};
use super::countries::CountryCode;
use super::currencies::CurrencyCode;
use super::decimal::{Amount, Quantity};
use super::delivery::DeliveryInformation;
use super::document::{DocumentLevelAllowance, DocumentLevelCharge, DocumentTotals, VatBreakdown};
use super::error::{InvoiceError, present};
use super::identifiers::{
    ElectronicAddress, Identifier, LegalRegistrationIdentifier, TaxRegistrationIdentifier,
    VatIdentifier,
};
use super::invoice::{
    DocumentReferences, Invoice, InvoiceNote, PrecedingInvoiceReference, ProcessControl,
    SupportingDocument,
};
use super::line::{
    InvoiceLine, InvoiceLineAllowance, InvoiceLineCharge, ItemInformation, LineVatInformation,
    PriceDetails,
};
use super::party::{Buyer, Contact, Payee, PostalAddress, Seller, SellerTaxRepresentativeParty};
use super::payment::PaymentInstructions;
use super::period::{InvoiceLinePeriod, InvoicingPeriod};
use super::units::UnitOfMeasure;
use super::validation::{self, ValidationMode};

/// Maximum number of invoice lines accepted by [`InvoiceBuilder::build`].
pub const MAX_LINES: usize = 10_000;
/// Maximum length of the invoice number (BT-1).
pub const MAX_NUMBER_LEN: usize = 200;

/// Builder for constructing valid invoices.
///
/// Setters only collect inputs. [`build`](Self::build) runs the complete
/// business rule pass once and either returns an immutable [`Invoice`] or
/// the violated rule(s).
///
/// ```
/// use en16931::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let seller = SellerBuilder::new(
///     "ACME GmbH",
///     PostalAddressBuilder::new("Berlin", "10115", "DE").build().unwrap(),
/// )
/// .vat_id("DE123456789")
/// .build()
/// .unwrap();
/// let buyer = BuyerBuilder::new(
///     "Kunde AG",
///     PostalAddressBuilder::new("München", "80331", "DE").build().unwrap(),
/// )
/// .build()
/// .unwrap();
/// let line = InvoiceLineBuilder::new(
///     "1",
///     dec!(10),
///     UnitOfMeasure::HOUR,
///     PriceDetails::new(Amount::new(dec!(150))).unwrap(),
///     ItemInformation::new("Beratung").unwrap(),
/// )
/// .vat(LineVatInformation::new(VatCategory::Standard, Some(Percentage::new(dec!(19)))).unwrap())
/// .build()
/// .unwrap();
/// let totals = DocumentTotals::builder(
///     Amount::new(dec!(1500)),
///     Amount::new(dec!(1500)),
///     Amount::new(dec!(1785)),
///     Amount::new(dec!(1785)),
/// )
/// .total_vat(Amount::new(dec!(285)))
/// .build()
/// .unwrap();
///
/// let invoice = InvoiceBuilder::new(
///     "RE-2024-001",
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     CurrencyCode::EUR,
///     ProcessControl::new("urn:cen.eu:en16931:2017"),
/// )
/// .seller(seller)
/// .buyer(buyer)
/// .totals(totals)
/// .add_vat_breakdown(
///     VatBreakdown::new(
///         Amount::new(dec!(1500)),
///         Amount::new(dec!(285)),
///         VatCategory::Standard,
///         Some(Percentage::new(dec!(19))),
///     )
///     .unwrap(),
/// )
/// .add_line(line)
/// .payment_terms("Zahlbar innerhalb von 14 Tagen")
/// .build();
///
/// assert!(invoice.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    number: String,
    issue_date: NaiveDate,
    type_code: InvoiceTypeCode,
    currency: CurrencyCode,
    vat_accounting_currency: Option<CurrencyCode>,
    vat_point_date: Option<NaiveDate>,
    vat_point_date_code: Option<VatPointDateCode>,
    payment_due_date: Option<NaiveDate>,
    payment_terms: Option<String>,
    references: DocumentReferences,
    notes: Vec<InvoiceNote>,
    process_control: ProcessControl,
    preceding_invoices: Vec<PrecedingInvoiceReference>,
    seller: Option<Seller>,
    buyer: Option<Buyer>,
    payee: Option<Payee>,
    tax_representative: Option<SellerTaxRepresentativeParty>,
    delivery: Option<DeliveryInformation>,
    invoicing_period: Option<InvoicingPeriod>,
    payment_instructions: Option<PaymentInstructions>,
    allowances: Vec<DocumentLevelAllowance>,
    charges: Vec<DocumentLevelCharge>,
    totals: Option<DocumentTotals>,
    vat_breakdowns: Vec<VatBreakdown>,
    supporting_documents: Vec<SupportingDocument>,
    lines: Vec<InvoiceLine>,
    mode: ValidationMode,
}

impl InvoiceBuilder {
    pub fn new(
        number: impl Into<String>,
        issue_date: NaiveDate,
        currency: CurrencyCode,
        process_control: ProcessControl,
    ) -> Self {
        Self {
            number: number.into(),
            issue_date,
            type_code: InvoiceTypeCode::default(),
            currency,
            vat_accounting_currency: None,
            vat_point_date: None,
            vat_point_date_code: None,
            payment_due_date: None,
            payment_terms: None,
            references: DocumentReferences::default(),
            notes: Vec::new(),
            process_control,
            preceding_invoices: Vec::new(),
            seller: None,
            buyer: None,
            payee: None,
            tax_representative: None,
            delivery: None,
            invoicing_period: None,
            payment_instructions: None,
            allowances: Vec::new(),
            charges: Vec::new(),
            totals: None,
            vat_breakdowns: Vec::new(),
            supporting_documents: Vec::new(),
            lines: Vec::new(),
            mode: ValidationMode::default(),
        }
    }

    /// Report the first violated rule (default) or all of them.
    pub fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn type_code(mut self, code: InvoiceTypeCode) -> Self {
        self.type_code = code;
        self
    }

    pub fn vat_accounting_currency(mut self, currency: CurrencyCode) -> Self {
        self.vat_accounting_currency = Some(currency);
        self
    }

    pub fn vat_point_date(mut self, date: NaiveDate) -> Self {
        self.vat_point_date = Some(date);
        self
    }

    pub fn vat_point_date_code(mut self, code: VatPointDateCode) -> Self {
        self.vat_point_date_code = Some(code);
        self
    }

    pub fn payment_due_date(mut self, date: NaiveDate) -> Self {
        self.payment_due_date = Some(date);
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = present(Some(terms.into()));
        self
    }

    pub fn buyer_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.buyer_reference = present(Some(reference.into()));
        self
    }

    pub fn project_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.project_reference = present(Some(reference.into()));
        self
    }

    pub fn contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.contract_reference = present(Some(reference.into()));
        self
    }

    pub fn purchase_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.purchase_order_reference = present(Some(reference.into()));
        self
    }

    pub fn sales_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.sales_order_reference = present(Some(reference.into()));
        self
    }

    pub fn receiving_advice_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.receiving_advice_reference = present(Some(reference.into()));
        self
    }

    pub fn despatch_advice_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.despatch_advice_reference = present(Some(reference.into()));
        self
    }

    pub fn tender_or_lot_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.tender_or_lot_reference = present(Some(reference.into()));
        self
    }

    pub fn invoiced_object_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.references.invoiced_object_identifier = present(Some(identifier.into()));
        self
    }

    pub fn buyer_accounting_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.buyer_accounting_reference = present(Some(reference.into()));
        self
    }

    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.notes.push(InvoiceNote::new(text));
        self
    }

    pub fn add_note(mut self, note: InvoiceNote) -> Self {
        self.notes.push(note);
        self
    }

    pub fn preceding_invoice(mut self, reference: PrecedingInvoiceReference) -> Self {
        self.preceding_invoices.push(reference);
        self
    }

    pub fn seller(mut self, seller: Seller) -> Self {
        self.seller = Some(seller);
        self
    }

    pub fn buyer(mut self, buyer: Buyer) -> Self {
        self.buyer = Some(buyer);
        self
    }

    pub fn payee(mut self, payee: Payee) -> Self {
        self.payee = Some(payee);
        self
    }

    pub fn tax_representative(mut self, representative: SellerTaxRepresentativeParty) -> Self {
        self.tax_representative = Some(representative);
        self
    }

    pub fn delivery(mut self, delivery: DeliveryInformation) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn invoicing_period(mut self, period: InvoicingPeriod) -> Self {
        self.invoicing_period = Some(period);
        self
    }

    pub fn payment_instructions(mut self, payment: PaymentInstructions) -> Self {
        self.payment_instructions = Some(payment);
        self
    }

    pub fn add_allowance(mut self, allowance: DocumentLevelAllowance) -> Self {
        self.allowances.push(allowance);
        self
    }

    pub fn add_charge(mut self, charge: DocumentLevelCharge) -> Self {
        self.charges.push(charge);
        self
    }

    pub fn totals(mut self, totals: DocumentTotals) -> Self {
        self.totals = Some(totals);
        self
    }

    pub fn add_vat_breakdown(mut self, breakdown: VatBreakdown) -> Self {
        self.vat_breakdowns.push(breakdown);
        self
    }

    pub fn supporting_document(mut self, document: SupportingDocument) -> Self {
        self.supporting_documents.push(document);
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the invoice and run the business rule pass.
    ///
    /// Missing seller, buyer or totals are builder errors. Everything else,
    /// including an empty line list or an empty VAT breakdown, is reported as
    /// a rule violation.
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        debug!(
            number = %self.number,
            lines = self.lines.len(),
            mode = ?self.mode,
            "building invoice"
        );

        let seller = self
            .seller
            .ok_or_else(|| InvoiceError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| InvoiceError::Builder("buyer is required".into()))?;
        let totals = self
            .totals
            .ok_or_else(|| InvoiceError::Builder("document totals are required".into()))?;

        // Input limits to prevent abuse
        if self.lines.len() > MAX_LINES {
            return Err(InvoiceError::Builder(format!(
                "invoice cannot have more than {MAX_LINES} lines"
            )));
        }
        if self.number.chars().count() > MAX_NUMBER_LEN {
            return Err(InvoiceError::Builder(format!(
                "invoice number cannot exceed {MAX_NUMBER_LEN} characters"
            )));
        }

        let payment_instructions = self
            .payment_instructions
            .map(PaymentInstructions::finish)
            .transpose()?;

        let invoice = Invoice {
            number: self.number,
            issue_date: self.issue_date,
            type_code: self.type_code,
            currency: self.currency,
            vat_accounting_currency: self.vat_accounting_currency,
            vat_point_date: self.vat_point_date,
            vat_point_date_code: self.vat_point_date_code,
            payment_due_date: self.payment_due_date,
            payment_terms: self.payment_terms,
            references: self.references,
            notes: self.notes,
            process_control: self.process_control,
            preceding_invoices: self.preceding_invoices,
            seller,
            buyer,
            payee: self.payee,
            tax_representative: self.tax_representative,
            delivery: self.delivery,
            invoicing_period: self.invoicing_period,
            payment_instructions,
            allowances: self.allowances,
            charges: self.charges,
            totals,
            vat_breakdowns: self.vat_breakdowns,
            supporting_documents: self.supporting_documents,
            lines: self.lines,
        };

        match validation::validate_invoice(&invoice, self.mode) {
            Ok(()) => {
                debug!(number = %invoice.number, "invoice passed business rules");
                Ok(invoice)
            }
            Err(err) => {
                let rules: Vec<&str> = err.violations().iter().map(|v| v.rule.as_str()).collect();
                warn!(number = %invoice.number, rules = ?rules, "invoice rejected");
                Err(err)
            }
        }
    }
}

/// Builder for [`PostalAddress`].
pub struct PostalAddressBuilder {
    line_one: Option<String>,
    line_two: Option<String>,
    line_three: Option<String>,
    city: String,
    post_code: String,
    subdivision: Option<String>,
    country_code: String,
}

impl PostalAddressBuilder {
    pub fn new(
        city: impl Into<String>,
        post_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            line_one: None,
            line_two: None,
            line_three: None,
            city: city.into(),
            post_code: post_code.into(),
            subdivision: None,
            country_code: country_code.into(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.line_one = Some(street.into());
        self
    }

    pub fn additional(mut self, additional: impl Into<String>) -> Self {
        self.line_two = Some(additional.into());
        self
    }

    pub fn line_three(mut self, line: impl Into<String>) -> Self {
        self.line_three = Some(line.into());
        self
    }

    pub fn subdivision(mut self, subdivision: impl Into<String>) -> Self {
        self.subdivision = Some(subdivision.into());
        self
    }

    /// Fails if the country code is not ISO 3166-1 alpha-2.
    pub fn build(self) -> Result<PostalAddress, InvoiceError> {
        Ok(PostalAddress {
            line_one: present(self.line_one),
            line_two: present(self.line_two),
            line_three: present(self.line_three),
            city: present(Some(self.city)),
            post_code: present(Some(self.post_code)),
            subdivision: present(self.subdivision),
            country_code: CountryCode::parse(&self.country_code)?,
        })
    }
}

/// Builder for [`Seller`].
pub struct SellerBuilder {
    name: String,
    trading_name: Option<String>,
    identifiers: Vec<Identifier>,
    legal_registration_identifier: Option<LegalRegistrationIdentifier>,
    vat_id: Option<String>,
    tax_registration_id: Option<String>,
    additional_legal_information: Option<String>,
    electronic_address: Option<ElectronicAddress>,
    address: PostalAddress,
    contact: Option<Contact>,
}

impl SellerBuilder {
    pub fn new(name: impl Into<String>, address: PostalAddress) -> Self {
        Self {
            name: name.into(),
            trading_name: None,
            identifiers: Vec::new(),
            legal_registration_identifier: None,
            vat_id: None,
            tax_registration_id: None,
            additional_legal_information: None,
            electronic_address: None,
            address,
            contact: None,
        }
    }

    pub fn trading_name(mut self, name: impl Into<String>) -> Self {
        self.trading_name = Some(name.into());
        self
    }

    pub fn identifier(mut self, id: Identifier) -> Self {
        self.identifiers.push(id);
        self
    }

    pub fn legal_registration_identifier(mut self, id: LegalRegistrationIdentifier) -> Self {
        self.legal_registration_identifier = Some(id);
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.vat_id = Some(id.into());
        self
    }

    pub fn tax_registration_id(mut self, id: impl Into<String>) -> Self {
        self.tax_registration_id = Some(id.into());
        self
    }

    pub fn additional_legal_information(mut self, info: impl Into<String>) -> Self {
        self.additional_legal_information = Some(info.into());
        self
    }

    pub fn electronic_address(mut self, address: ElectronicAddress) -> Self {
        self.electronic_address = Some(address);
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Checks the seller name (BR-6) and that the seller can be identified (BR-CO-26).
    pub fn build(self) -> Result<Seller, InvoiceError> {
        let seller = Seller {
            name: self.name,
            trading_name: present(self.trading_name),
            identifiers: self.identifiers,
            legal_registration_identifier: self.legal_registration_identifier,
            vat_identifier: self.vat_id.map(VatIdentifier::new).transpose()?,
            tax_registration_identifier: self
                .tax_registration_id
                .map(TaxRegistrationIdentifier::new)
                .transpose()?,
            additional_legal_information: present(self.additional_legal_information),
            electronic_address: self.electronic_address,
            address: self.address,
            contact: self.contact,
        };
        seller.check()?;
        Ok(seller)
    }
}

/// Builder for [`Buyer`].
pub struct BuyerBuilder {
    name: String,
    trading_name: Option<String>,
    identifier: Option<Identifier>,
    legal_registration_identifier: Option<LegalRegistrationIdentifier>,
    vat_id: Option<String>,
    electronic_address: Option<ElectronicAddress>,
    address: PostalAddress,
    contact: Option<Contact>,
}

impl BuyerBuilder {
    pub fn new(name: impl Into<String>, address: PostalAddress) -> Self {
        Self {
            name: name.into(),
            trading_name: None,
            identifier: None,
            legal_registration_identifier: None,
            vat_id: None,
            electronic_address: None,
            address,
            contact: None,
        }
    }

    pub fn trading_name(mut self, name: impl Into<String>) -> Self {
        self.trading_name = Some(name.into());
        self
    }

    pub fn identifier(mut self, id: Identifier) -> Self {
        self.identifier = Some(id);
        self
    }

    pub fn legal_registration_identifier(mut self, id: LegalRegistrationIdentifier) -> Self {
        self.legal_registration_identifier = Some(id);
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.vat_id = Some(id.into());
        self
    }

    pub fn electronic_address(mut self, address: ElectronicAddress) -> Self {
        self.electronic_address = Some(address);
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Checks the buyer name (BR-7).
    pub fn build(self) -> Result<Buyer, InvoiceError> {
        let buyer = Buyer {
            name: self.name,
            trading_name: present(self.trading_name),
            identifier: self.identifier,
            legal_registration_identifier: self.legal_registration_identifier,
            vat_identifier: self.vat_id.map(VatIdentifier::new).transpose()?,
            electronic_address: self.electronic_address,
            address: self.address,
            contact: self.contact,
        };
        buyer.check()?;
        Ok(buyer)
    }
}

/// Builder for [`InvoiceLine`].
pub struct InvoiceLineBuilder {
    identifier: String,
    note: Option<String>,
    object_identifier: Option<Identifier>,
    quantity: Quantity,
    unit: UnitOfMeasure,
    net_amount: Option<Amount>,
    buyer_order_line_reference: Option<String>,
    accounting_reference: Option<String>,
    period: Option<InvoiceLinePeriod>,
    allowances: Vec<InvoiceLineAllowance>,
    charges: Vec<InvoiceLineCharge>,
    price: PriceDetails,
    vat: Option<LineVatInformation>,
    item: ItemInformation,
}

impl InvoiceLineBuilder {
    pub fn new(
        identifier: impl Into<String>,
        quantity: impl Into<Quantity>,
        unit: UnitOfMeasure,
        price: PriceDetails,
        item: ItemInformation,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            note: None,
            object_identifier: None,
            quantity: quantity.into(),
            unit,
            net_amount: None,
            buyer_order_line_reference: None,
            accounting_reference: None,
            period: None,
            allowances: Vec::new(),
            charges: Vec::new(),
            price,
            vat: None,
            item,
        }
    }

    pub fn vat(mut self, vat: LineVatInformation) -> Self {
        self.vat = Some(vat);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn object_identifier(mut self, id: Identifier) -> Self {
        self.object_identifier = Some(id);
        self
    }

    /// Explicit line net amount (BT-131). Derived from price, quantity,
    /// allowances and charges when not given.
    pub fn net_amount(mut self, amount: impl Into<Amount>) -> Self {
        self.net_amount = Some(amount.into());
        self
    }

    pub fn buyer_order_line_reference(mut self, reference: impl Into<String>) -> Self {
        self.buyer_order_line_reference = Some(reference.into());
        self
    }

    pub fn accounting_reference(mut self, reference: impl Into<String>) -> Self {
        self.accounting_reference = Some(reference.into());
        self
    }

    pub fn period(mut self, period: InvoiceLinePeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn add_allowance(mut self, allowance: InvoiceLineAllowance) -> Self {
        self.allowances.push(allowance);
        self
    }

    pub fn add_charge(mut self, charge: InvoiceLineCharge) -> Self {
        self.charges.push(charge);
        self
    }

    /// Checks the line identifier (BR-21) and that the line amount stays in
    /// range (BT-131); VAT information is required.
    pub fn build(self) -> Result<InvoiceLine, InvoiceError> {
        let vat = self.vat.ok_or_else(|| {
            InvoiceError::Builder(format!(
                "line '{}' requires VAT information",
                self.identifier
            ))
        })?;
        let priced_amount = InvoiceLine::checked_priced_amount(self.quantity, &self.price)?;
        let net_amount = match self.net_amount {
            Some(amount) => amount,
            None => {
                InvoiceLine::derived_net_amount(priced_amount, &self.allowances, &self.charges)?
            }
        };
        let line = InvoiceLine {
            identifier: self.identifier,
            note: present(self.note),
            object_identifier: self.object_identifier,
            quantity: self.quantity,
            unit: self.unit,
            net_amount,
            priced_amount,
            buyer_order_line_reference: present(self.buyer_order_line_reference),
            accounting_reference: present(self.accounting_reference),
            period: self.period,
            allowances: self.allowances,
            charges: self.charges,
            price: self.price,
            vat,
            item: self.item,
        };
        line.check()?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Percentage, VatCategory, ViolationKind};
    use rust_decimal_macros::dec;

    fn address() -> PostalAddress {
        PostalAddressBuilder::new("Berlin", "10115", "DE")
            .street("Hauptstraße 1")
            .build()
            .unwrap()
    }

    #[test]
    fn address_rejects_unknown_country() {
        let err = PostalAddressBuilder::new("Atlantis", "00000", "XX")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), Some(ViolationKind::MalformedValue));
        assert_eq!(address().line_one.as_deref(), Some("Hauptstraße 1"));
    }

    #[test]
    fn seller_requires_some_identification() {
        let err = SellerBuilder::new("ACME GmbH", address()).build().unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-CO-26"));
        assert_eq!(err.kind(), Some(ViolationKind::MissingRequiredAlternative));

        let seller = SellerBuilder::new("ACME GmbH", address())
            .legal_registration_identifier(LegalRegistrationIdentifier::new("HRB 12345").unwrap())
            .build()
            .unwrap();
        assert!(seller.vat_identifier().is_none());

        let seller = SellerBuilder::new("ACME GmbH", address())
            .vat_id("DE 123 456 789")
            .build()
            .unwrap();
        assert_eq!(seller.vat_identifier().map(|v| v.as_str()), Some("DE123456789"));
    }

    #[test]
    fn seller_and_buyer_require_names() {
        let err = SellerBuilder::new("", address()).vat_id("DE123456789").build().unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-6"));
        let err = BuyerBuilder::new(" ", address()).build().unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-7"));
    }

    #[test]
    fn line_requires_vat_and_identifier() {
        let price = PriceDetails::new(Amount::new(dec!(10))).unwrap();
        let item = ItemInformation::new("Widget").unwrap();

        let err = InvoiceLineBuilder::new(
            "1",
            dec!(1),
            UnitOfMeasure::PIECE,
            price.clone(),
            item.clone(),
        )
        .build()
        .unwrap_err();
        assert!(matches!(err, InvoiceError::Builder(_)));

        let vat = LineVatInformation::new(VatCategory::Standard, Some(Percentage::new(dec!(19))))
            .unwrap();
        let err = InvoiceLineBuilder::new("", dec!(1), UnitOfMeasure::PIECE, price, item)
            .vat(vat)
            .build()
            .unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-21"));
    }

    #[test]
    fn line_net_amount_defaults_to_derived_value() {
        let vat = LineVatInformation::new(VatCategory::Standard, Some(Percentage::new(dec!(19))))
            .unwrap();
        let line = InvoiceLineBuilder::new(
            "1",
            dec!(3),
            UnitOfMeasure::PIECE,
            PriceDetails::new(Amount::new(dec!(33.335))).unwrap(),
            ItemInformation::new("Widget").unwrap(),
        )
        .vat(vat)
        .build()
        .unwrap();
        assert_eq!(line.net_amount().value(), dec!(100.01));
        assert_eq!(line.priced_amount().value(), dec!(100.005));
    }

    #[test]
    fn builder_errors_for_missing_parties() {
        let err = InvoiceBuilder::new(
            "RE-1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            CurrencyCode::EUR,
            ProcessControl::new("urn:cen.eu:en16931:2017"),
        )
        .build()
        .unwrap_err();
        assert!(matches!(err, InvoiceError::Builder(ref msg) if msg.contains("seller")));
    }
}
