//! Client-side booking payment simulation.
//!
//! Nothing here talks to a payment processor. [`PaymentStore::submit`]
//! validates the form, fabricates a transaction id locally, and produces a
//! [`Receipt`] that lives only as long as the store. The receipt view is
//! unreachable without a submit in the same session.

use campusnest_core::Property;
use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("no property selected")]
    NoPropertySelected,

    #[error("no payment method selected")]
    NoMethodSelected,

    #[error("card details are required for card payments")]
    MissingCardDetails,

    #[error("invalid card details: {0}")]
    InvalidCard(String),

    #[error("lease duration must be at least one month, got {0}")]
    InvalidDuration(u32),

    #[error("unknown payment method \"{0}\"")]
    UnknownMethod(String),
}

/// Rental term in whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseDuration {
    months: u32,
}

impl LeaseDuration {
    /// Durations offered in the booking form.
    pub const PRESETS: [u32; 4] = [1, 3, 6, 12];

    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidDuration`] for zero months.
    pub fn new(months: u32) -> Result<Self, PaymentError> {
        if months == 0 {
            return Err(PaymentError::InvalidDuration(months));
        }
        Ok(Self { months })
    }

    #[must_use]
    pub fn months(self) -> u32 {
        self.months
    }

    /// e.g. `"1 month"`, `"6 months"`.
    #[must_use]
    pub fn label(self) -> String {
        if self.months == 1 {
            "1 month".to_owned()
        } else {
            format!("{} months", self.months)
        }
    }
}

impl Default for LeaseDuration {
    fn default() -> Self {
        Self { months: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    MobileMoney,
    BankTransfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::MobileMoney => write!(f, "mobile-money"),
            PaymentMethod::BankTransfer => write!(f, "bank-transfer"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "mobile-money" | "mobile_money" | "momo" => Ok(PaymentMethod::MobileMoney),
            "bank-transfer" | "bank_transfer" | "transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(PaymentError::UnknownMethod(other.to_owned())),
        }
    }
}

/// Card form fields. Only shape checks are performed.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub holder_name: String,
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    fn digits(&self) -> String {
        self.number.chars().filter(char::is_ascii_digit).collect()
    }

    #[must_use]
    pub fn last4(&self) -> String {
        let digits = self.digits();
        digits[digits.len().saturating_sub(4)..].to_owned()
    }

    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidCard`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.holder_name.trim().is_empty() {
            return Err(PaymentError::InvalidCard("cardholder name is required".into()));
        }
        let only_digits_and_spaces = self
            .number
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
        let len = self.digits().len();
        if !only_digits_and_spaces || !(12..=19).contains(&len) {
            return Err(PaymentError::InvalidCard("card number must be 12-19 digits".into()));
        }
        if !valid_expiry(&self.expiry) {
            return Err(PaymentError::InvalidCard("expiry must be MM/YY".into()));
        }
        let cvv_ok = (3..=4).contains(&self.cvv.len()) && self.cvv.chars().all(|c| c.is_ascii_digit());
        if !cvv_ok {
            return Err(PaymentError::InvalidCard("CVV must be 3 or 4 digits".into()));
        }
        Ok(())
    }
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((mm, yy)) = expiry.trim().split_once('/') else {
        return false;
    };
    let month_ok = mm.len() == 2 && mm.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m));
    let year_ok = yy.len() == 2 && yy.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("holder_name", &self.holder_name)
            .field("number", &format!("**** {}", self.last4()))
            .field("expiry", &self.expiry)
            .field("cvv", &"[redacted]")
            .finish()
    }
}

/// Price breakdown for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub monthly_price: Decimal,
    pub months: u32,
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

fn service_fee_rate() -> Decimal {
    Decimal::new(5, 2)
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal is `monthly_price × months`, kept exact.
///
/// `total` is `subtotal × 1.05` and `service_fee` is `subtotal × 0.05`, each
/// rounded to 2 decimal places with halves rounded away from zero. When the
/// subtotal has at most 2 decimal places, `subtotal + service_fee == total`.
#[must_use]
pub fn quote(monthly_price: Decimal, duration: LeaseDuration) -> Quote {
    let subtotal = monthly_price * Decimal::from(duration.months());
    let rate = service_fee_rate();
    Quote {
        monthly_price,
        months: duration.months(),
        subtotal,
        service_fee: to_cents(subtotal * rate),
        total: to_cents(subtotal * (Decimal::ONE + rate)),
    }
}

/// The fabricated record shown on the receipt page.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub transaction_id: String,
    pub property_id: String,
    pub property_title: String,
    pub duration_label: String,
    pub quote: Quote,
    pub method: PaymentMethod,
    pub card_last4: Option<String>,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptView {
    Show(Receipt),
    /// No transaction in this session; send the user home.
    RedirectHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStage {
    Configuring,
    Completed,
}

/// Ephemeral payment form state. Editing any field after a submit starts a
/// new flow and drops the previous receipt.
#[derive(Debug, Clone, Default)]
pub struct PaymentStore {
    property: Option<Property>,
    duration: LeaseDuration,
    method: Option<PaymentMethod>,
    card: Option<CardDetails>,
    receipt: Option<Receipt>,
}

impl PaymentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> PaymentStage {
        if self.receipt.is_some() {
            PaymentStage::Completed
        } else {
            PaymentStage::Configuring
        }
    }

    #[must_use]
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    #[must_use]
    pub fn duration(&self) -> LeaseDuration {
        self.duration
    }

    #[must_use]
    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.receipt.as_ref().map(|r| r.transaction_id.as_str())
    }

    pub fn select_property(&mut self, property: Property) {
        self.receipt = None;
        self.property = Some(property);
    }

    pub fn set_duration(&mut self, duration: LeaseDuration) {
        self.receipt = None;
        self.duration = duration;
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        self.receipt = None;
        self.method = Some(method);
    }

    pub fn set_card(&mut self, card: CardDetails) {
        self.receipt = None;
        self.card = Some(card);
    }

    /// Current breakdown, once a property is selected.
    #[must_use]
    pub fn amount(&self) -> Option<Quote> {
        self.property
            .as_ref()
            .map(|p| quote(p.price, self.duration))
    }

    /// Validates the form and fabricates a transaction.
    ///
    /// # Errors
    ///
    /// Returns the first [`PaymentError`] found; the store is left unchanged.
    pub fn submit(&mut self) -> Result<Receipt, PaymentError> {
        let property = self
            .property
            .as_ref()
            .ok_or(PaymentError::NoPropertySelected)?;
        let method = self.method.ok_or(PaymentError::NoMethodSelected)?;

        let card_last4 = if method == PaymentMethod::Card {
            let card = self.card.as_ref().ok_or(PaymentError::MissingCardDetails)?;
            card.validate()?;
            Some(card.last4())
        } else {
            None
        };

        let paid_at = Utc::now();
        let receipt = Receipt {
            transaction_id: fabricate_transaction_id(paid_at),
            property_id: property.id.clone(),
            property_title: property.title.clone(),
            duration_label: self.duration.label(),
            quote: quote(property.price, self.duration),
            method,
            card_last4,
            paid_at,
        };
        tracing::info!(
            transaction_id = %receipt.transaction_id,
            property_id = %receipt.property_id,
            total = %receipt.quote.total,
            "mock payment recorded"
        );
        self.receipt = Some(receipt.clone());
        Ok(receipt)
    }

    #[must_use]
    pub fn receipt_view(&self) -> ReceiptView {
        match &self.receipt {
            Some(receipt) => ReceiptView::Show(receipt.clone()),
            None => ReceiptView::RedirectHome,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `TXN-<yyyymmddHHMMSS>-<6 random alphanumerics>`.
fn fabricate_transaction_id(at: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("TXN-{}-{suffix}", at.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
#[path = "payment_test.rs"]
mod tests;
