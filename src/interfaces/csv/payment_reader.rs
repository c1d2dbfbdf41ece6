use crate::domain::payment::Payment;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Columns every payments file must carry, in any order.
pub const REQUIRED_COLUMNS: [&str; 2] = ["reference", "amount"];

/// Reads payments from a CSV source with a `reference, amount` header.
///
/// The header is checked up front, so a file with the wrong columns fails once
/// instead of producing an error per row. Rows are trimmed and may carry extra
/// trailing fields.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    ///
    /// # Errors
    ///
    /// [`PaymentError::MissingColumn`] when the header lacks `reference` or
    /// `amount`; [`PaymentError::CsvError`] when the header cannot be read.
    pub fn new(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?;
        if let Some(missing) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|h| h == *column))
        {
            return Err(PaymentError::MissingColumn(missing));
        }

        Ok(Self { reader })
    }

    /// Returns an iterator that lazily reads and deserializes payments.
    pub fn payments(self) -> impl Iterator<Item = Result<Payment>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
