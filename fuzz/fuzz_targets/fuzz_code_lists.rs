#![no_main]

use en16931::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        let _ = VatIdentifier::new(s).map(|id| id.has_valid_prefix());
        let _ = CountryCode::parse(s);
        let _ = CurrencyCode::parse(s);
        let _ = UnitOfMeasure::parse(s);
        let _ = VatExemptionReasonCode::parse(s);
        let _ = AllowanceReasonCode::parse(s);
        let _ = ChargeReasonCode::parse(s);
        let _ = PaymentCardInformation::new(s, None);
        let _ = VatCategory::from_code(s);
    }
});
