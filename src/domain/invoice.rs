use super::payment::Payment;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tax accrued on every payment applied to a commercial invoice.
pub const COMMERCIAL_TAX_RATE: Decimal = dec!(0.14);

/// The kind of invoice, which decides how tax is handled.
///
/// Type names that are neither `standard` nor `commercial` are kept as
/// `Unsupported` so that stored records still load; processing a payment
/// against one of them fails.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(from = "String", into = "String")]
pub enum InvoiceType {
    Standard,
    Commercial,
    Unsupported(String),
}

impl InvoiceType {
    /// Tax owed on `amount` for this invoice type, if the type accrues any.
    pub fn tax_on(&self, amount: Decimal) -> Option<Decimal> {
        match self {
            InvoiceType::Commercial => Some(amount * COMMERCIAL_TAX_RATE),
            _ => None,
        }
    }
}

impl From<String> for InvoiceType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "standard" => InvoiceType::Standard,
            "commercial" => InvoiceType::Commercial,
            _ => InvoiceType::Unsupported(value),
        }
    }
}

impl From<InvoiceType> for String {
    fn from(value: InvoiceType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceType::Standard => f.write_str("standard"),
            InvoiceType::Commercial => f.write_str("commercial"),
            InvoiceType::Unsupported(name) => f.write_str(name),
        }
    }
}

/// A billable record and the payments received against it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Invoice {
    /// Key under which the invoice is stored; payments carry the same value.
    pub reference: String,
    /// Total value of the invoice.
    pub amount: Decimal,
    /// Running total of accepted payments.
    #[serde(default)]
    pub amount_paid: Decimal,
    /// Tax accrued so far (commercial invoices only).
    #[serde(default)]
    pub tax_amount: Decimal,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    /// Accepted payments, oldest first.
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Invoice {
    pub fn new(reference: impl Into<String>, amount: Decimal, invoice_type: InvoiceType) -> Self {
        Self {
            reference: reference.into(),
            amount,
            amount_paid: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            invoice_type,
            payments: Vec::new(),
        }
    }

    pub fn has_payments(&self) -> bool {
        !self.payments.is_empty()
    }

    /// Sum of the amounts in the payment history.
    pub fn payments_total(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Balance still owed according to `amount_paid`.
    pub fn remaining(&self) -> Decimal {
        self.amount - self.amount_paid
    }

    /// Records a follow-up payment: paid amount and tax accumulate.
    pub fn add_payment(&mut self, payment: &Payment) {
        self.amount_paid += payment.amount;
        if let Some(tax) = self.invoice_type.tax_on(payment.amount) {
            self.tax_amount += tax;
        }
        self.payments.push(payment.clone());
    }

    /// Records the first payment: paid amount and tax are overwritten.
    pub fn set_first_payment(&mut self, payment: &Payment) {
        self.amount_paid = payment.amount;
        if let Some(tax) = self.invoice_type.tax_on(payment.amount) {
            self.tax_amount = tax;
        }
        self.payments.push(payment.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_type_names() {
        assert_eq!(InvoiceType::from("Standard".to_string()), InvoiceType::Standard);
        assert_eq!(InvoiceType::from("commercial".to_string()), InvoiceType::Commercial);
        assert_eq!(
            InvoiceType::from("government".to_string()),
            InvoiceType::Unsupported("government".to_string())
        );
    }

    #[test]
    fn test_tax_only_for_commercial() {
        assert_eq!(InvoiceType::Commercial.tax_on(dec!(100)), Some(dec!(14)));
        assert_eq!(InvoiceType::Standard.tax_on(dec!(100)), None);
        assert_eq!(InvoiceType::Unsupported("x".into()).tax_on(dec!(100)), None);
    }

    #[test]
    fn test_add_payment_accumulates_tax() {
        let mut invoice = Invoice::new("INV-1", dec!(100), InvoiceType::Commercial);
        invoice.tax_amount = dec!(7);
        invoice.amount_paid = dec!(50);

        invoice.add_payment(&Payment::new("INV-1", dec!(10)));

        assert_eq!(invoice.amount_paid, dec!(60));
        assert_eq!(invoice.tax_amount, dec!(8.4));
        assert_eq!(invoice.payments.len(), 1);
    }

    #[test]
    fn test_set_first_payment_overwrites() {
        let mut invoice = Invoice::new("INV-1", dec!(100), InvoiceType::Commercial);
        invoice.amount_paid = dec!(3);
        invoice.tax_amount = dec!(99);

        invoice.set_first_payment(&Payment::new("INV-1", dec!(20)));

        assert_eq!(invoice.amount_paid, dec!(20));
        assert_eq!(invoice.tax_amount, dec!(2.8));
        assert_eq!(invoice.payments_total(), dec!(20));
    }

    #[test]
    fn test_invoice_json_defaults() {
        let json = r#"{"reference":"INV-9","amount":"25.00","type":"standard"}"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();

        assert_eq!(invoice.amount, dec!(25));
        assert_eq!(invoice.amount_paid, Decimal::ZERO);
        assert!(!invoice.has_payments());
        assert_eq!(invoice.invoice_type, InvoiceType::Standard);
    }

    #[test]
    fn test_invoice_type_serializes_lowercase() {
        let invoice = Invoice::new("INV-2", dec!(1), InvoiceType::Commercial);
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["type"], "commercial");
    }
}
