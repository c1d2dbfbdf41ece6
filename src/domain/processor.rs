//! Decision procedure that applies a payment to an invoice.
//!
//! The invoice is classified by its current fields into a [`Standing`], then a
//! single match over the standing and the invoice type decides the
//! [`Outcome`] and the mutation. Nothing is remembered between calls.

use super::invoice::{Invoice, InvoiceType};
use super::payment::Payment;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;

/// The result of applying a payment. Rejections are outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoPaymentNeeded,
    AlreadyFullyPaid,
    ExceedsRemaining,
    ExceedsTotal,
    FinalPartialPayment,
    AnotherPartialPayment,
    FullyPaid,
    PartiallyPaid,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::NoPaymentNeeded => "no payment needed",
            Outcome::AlreadyFullyPaid => "invoice was already fully paid",
            Outcome::ExceedsRemaining => "the payment is greater than the partial amount remaining",
            Outcome::ExceedsTotal => "the payment is greater than the invoice amount",
            Outcome::FinalPartialPayment => {
                "final partial payment received, invoice is now fully paid"
            }
            Outcome::AnotherPartialPayment => {
                "another partial payment received, still not fully paid"
            }
            Outcome::FullyPaid => "invoice is now fully paid",
            Outcome::PartiallyPaid => "invoice is now partially paid",
        }
    }

    /// Whether the invoice was left untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Outcome::NoPaymentNeeded
                | Outcome::AlreadyFullyPaid
                | Outcome::ExceedsRemaining
                | Outcome::ExceedsTotal
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Where an invoice stands relative to an incoming payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Standing {
    /// Zero amount, no history.
    NothingDue,
    /// Zero amount but payments recorded.
    Contradictory,
    AlreadySettled,
    ExceedsRemaining,
    /// History exists; `settles` when the payment equals the remaining balance.
    FollowUp { settles: bool },
    ExceedsTotal,
    /// No history yet; `settles` when the payment equals the invoice amount.
    First { settles: bool },
}

fn classify(invoice: &Invoice, payment: &Payment) -> Standing {
    if invoice.amount == Decimal::ZERO {
        return if invoice.has_payments() {
            Standing::Contradictory
        } else {
            Standing::NothingDue
        };
    }

    if invoice.has_payments() {
        let remaining = invoice.remaining();
        if invoice.payments_total() == invoice.amount {
            Standing::AlreadySettled
        } else if payment.amount > remaining {
            Standing::ExceedsRemaining
        } else {
            Standing::FollowUp {
                settles: payment.amount == remaining,
            }
        }
    } else if payment.amount > invoice.amount {
        Standing::ExceedsTotal
    } else {
        Standing::First {
            settles: payment.amount == invoice.amount,
        }
    }
}

/// Applies `payment` to `invoice`, mutating it in place.
///
/// # Errors
///
/// * [`PaymentError::InvalidState`] when a zero-amount invoice already has payments.
/// * [`PaymentError::UnsupportedType`] when the payment would be recorded against
///   an invoice type other than standard or commercial.
pub fn process(payment: &Payment, invoice: &mut Invoice) -> Result<Outcome> {
    let standing = classify(invoice, payment);
    let invoice_type = invoice.invoice_type.clone();

    let outcome = match (standing, &invoice_type) {
        (Standing::NothingDue, _) => Outcome::NoPaymentNeeded,
        (Standing::Contradictory, _) => {
            return Err(PaymentError::InvalidState(
                "The invoice is in an invalid state, it has an amount of 0 and it has payments."
                    .to_string(),
            ));
        }
        (Standing::AlreadySettled, _) => Outcome::AlreadyFullyPaid,
        (Standing::ExceedsRemaining, _) => Outcome::ExceedsRemaining,
        (Standing::ExceedsTotal, _) => Outcome::ExceedsTotal,
        (_, InvoiceType::Unsupported(name)) => {
            return Err(PaymentError::UnsupportedType(name.clone()));
        }
        (Standing::FollowUp { settles: true }, InvoiceType::Standard) => {
            invoice.add_payment(payment);
            Outcome::FinalPartialPayment
        }
        // Commercial invoices report the settling payment as another partial one.
        (Standing::FollowUp { .. }, _) => {
            invoice.add_payment(payment);
            Outcome::AnotherPartialPayment
        }
        (Standing::First { settles }, _) => {
            invoice.set_first_payment(payment);
            if settles {
                Outcome::FullyPaid
            } else {
                Outcome::PartiallyPaid
            }
        }
    };

    Ok(outcome)
}
