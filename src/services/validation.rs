//! Payment-method field validation.
//!
//! Readiness is a pure function of the current field values. There is no
//! stored validity flag: callers re-run `check_ready` on every field change
//! and submission is permitted only while it holds. Validation failures are
//! data (`ValidationErrors` keyed by field), not errors.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::payment::PaymentMethod;

/// Fixed app set offered on the UPI tab.
pub const UPI_APPS: [&str; 4] = ["GPay", "PhonePe", "Paytm", "BHIM"];

/// Fixed bank set offered on the net-banking tab.
pub const NETBANKING_BANKS: [&str; 4] = ["SBI", "HDFC", "ICICI", "Axis"];

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CardDetails {
    #[validate(custom(function = card_number))]
    pub number: String,
    #[serde(rename = "holderName")]
    #[validate(custom(function = non_blank))]
    pub holder_name: String,
    #[validate(custom(function = expiry_shape))]
    pub expiry: String,
    #[validate(custom(function = cvv_digits))]
    pub cvv: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpiDetails {
    #[serde(rename = "upiId")]
    #[validate(custom(function = upi_handle))]
    pub upi_id: String,
    #[validate(custom(function = known_upi_app))]
    pub app: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NetbankingDetails {
    #[validate(custom(function = known_bank))]
    pub bank: String,
}

/// Raw field input for the currently chosen payment method.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    Card(CardDetails),
    Upi(UpiDetails),
    Netbanking(NetbankingDetails),
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Card(_) => PaymentMethod::Card,
            PaymentDetails::Upi(_) => PaymentMethod::Upi,
            PaymentDetails::Netbanking(_) => PaymentMethod::Netbanking,
        }
    }

    /// Readiness rule for the chosen method, per-field failures on Err.
    pub fn check_ready(&self) -> Result<(), ValidationErrors> {
        match self {
            PaymentDetails::Card(details) => details.validate(),
            PaymentDetails::Upi(details) => details.validate(),
            PaymentDetails::Netbanking(details) => details.validate(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.check_ready().is_ok()
    }
}

/// Drops every formatting separator, leaving digits only. All readiness
/// rules operate on this normalized form.
pub fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn card_number(number: &str) -> Result<(), ValidationError> {
    if strip_separators(number).len() == 16 {
        Ok(())
    } else {
        Err(ValidationError::new("card_number_must_be_16_digits"))
    }
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("must_not_be_blank"))
    } else {
        Ok(())
    }
}

// MM/YY shape: two digits, a slash, two digits.
fn expiry_shape(expiry: &str) -> Result<(), ValidationError> {
    let bytes = expiry.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'/'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("expiry_must_match_mm_yy"))
    }
}

fn cvv_digits(cvv: &str) -> Result<(), ValidationError> {
    let digits = cvv.len() == 3 || cvv.len() == 4;
    if digits && cvv.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cvv_must_be_3_or_4_digits"))
    }
}

fn upi_handle(upi_id: &str) -> Result<(), ValidationError> {
    if upi_id.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::new("upi_id_must_contain_at"))
    }
}

fn known_upi_app(app: &str) -> Result<(), ValidationError> {
    if UPI_APPS.iter().any(|known| *known == app) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_upi_app"))
    }
}

fn known_bank(bank: &str) -> Result<(), ValidationError> {
    if NETBANKING_BANKS.iter().any(|known| *known == bank) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_bank"))
    }
}

// --- Presentation helpers ---
// Input formatters mirrored from the payment form. They never affect the
// readiness rules, which always run on separator-stripped values.

/// Groups card digits in blocks of four: "4242424242424242" -> "4242 4242 4242 4242".
pub fn format_card_number(raw: &str) -> String {
    let digits: String = strip_separators(raw).chars().take(16).collect();
    let mut formatted = String::with_capacity(19);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && index % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }
    formatted
}

/// Inserts the slash into a typed expiry: "1228" -> "12/28".
pub fn format_expiry(raw: &str) -> String {
    let digits: String = strip_separators(raw).chars().take(4).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}
