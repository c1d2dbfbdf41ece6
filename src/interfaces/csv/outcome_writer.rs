use crate::domain::payment::Payment;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    reference: &'a str,
    amount: rust_decimal::Decimal,
    outcome: &'a str,
}

/// Writes one `reference,amount,outcome` CSV row per processed payment.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcome(&mut self, payment: &Payment, outcome: &str) -> Result<()> {
        self.writer.serialize(OutcomeRecord {
            reference: &payment.reference,
            amount: payment.amount,
            outcome,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
