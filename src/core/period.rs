use chrono::NaiveDate;
use serde::Serialize;

use super::error::{InvoiceError, RuleViolation, ensure};

/// A date range where at least one bound is known and start ≤ end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        presence_rule: &str,
        order_rule: &str,
        field: &str,
    ) -> Result<Self, InvoiceError> {
        ensure(start.is_some() || end.is_some(), || {
            RuleViolation::missing_alternative(
                presence_rule,
                field,
                "period requires a start date or an end date",
            )
        })?;
        if let (Some(start), Some(end)) = (start, end) {
            ensure(start <= end, || {
                RuleViolation::malformed(
                    order_rule,
                    field,
                    format!("period end date {end} is before start date {start}"),
                )
            })?;
        }
        Ok(Self { start, end })
    }
}

/// BG-14: Invoicing period (BT-73 / BT-74).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvoicingPeriod(DateRange);

impl InvoicingPeriod {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, InvoiceError> {
        DateRange::new(start, end, "BR-CO-19", "BR-29", "invoicing_period").map(Self)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.0.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.0.end
    }
}

/// BG-26: Invoice line period (BT-134 / BT-135).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvoiceLinePeriod(DateRange);

impl InvoiceLinePeriod {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, InvoiceError> {
        DateRange::new(start, end, "BR-CO-20", "BR-30", "line.period").map(Self)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.0.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.0.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViolationKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_ended_periods_are_allowed() {
        let period = InvoicingPeriod::new(Some(date(2024, 6, 1)), None).unwrap();
        assert_eq!(period.start(), Some(date(2024, 6, 1)));
        assert_eq!(period.end(), None);
        assert!(InvoiceLinePeriod::new(None, Some(date(2024, 6, 30))).is_ok());
    }

    #[test]
    fn empty_period_is_rejected() {
        let err = InvoicingPeriod::new(None, None).unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-CO-19"));
        assert_eq!(err.kind(), Some(ViolationKind::MissingRequiredAlternative));

        let err = InvoiceLinePeriod::new(None, None).unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-CO-20"));
    }

    #[test]
    fn reversed_period_is_rejected() {
        let err = InvoicingPeriod::new(Some(date(2024, 7, 1)), Some(date(2024, 6, 1))).unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-29"));
        assert_eq!(err.kind(), Some(ViolationKind::MalformedValue));

        let err =
            InvoiceLinePeriod::new(Some(date(2024, 7, 1)), Some(date(2024, 6, 1))).unwrap_err();
        assert_eq!(err.first_rule(), Some("BR-30"));
    }

    #[test]
    fn single_day_period() {
        let day = date(2024, 6, 15);
        assert!(InvoicingPeriod::new(Some(day), Some(day)).is_ok());
    }
}
