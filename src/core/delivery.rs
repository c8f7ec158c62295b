use chrono::NaiveDate;
use serde::Serialize;

use super::identifiers::Identifier;
use super::party::PostalAddress;
use super::period::InvoicingPeriod;

/// BG-13: Delivery information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryInformation {
    /// BT-70: Deliver to party name.
    pub party_name: Option<String>,
    /// BT-71: Deliver to location identifier.
    pub location_identifier: Option<Identifier>,
    /// BT-72: Actual delivery date.
    pub actual_delivery_date: Option<NaiveDate>,
    /// BG-14 within delivery: delivery period.
    pub period: Option<InvoicingPeriod>,
    /// BG-15: Deliver to address.
    pub address: Option<PostalAddress>,
}

impl DeliveryInformation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn party_name(mut self, name: impl Into<String>) -> Self {
        self.party_name = Some(name.into());
        self
    }

    pub fn location_identifier(mut self, id: Identifier) -> Self {
        self.location_identifier = Some(id);
        self
    }

    pub fn actual_delivery_date(mut self, date: NaiveDate) -> Self {
        self.actual_delivery_date = Some(date);
        self
    }

    pub fn period(mut self, period: InvoicingPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn address(mut self, address: PostalAddress) -> Self {
        self.address = Some(address);
        self
    }
}
