use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub fn write_invoices(path: &Path, invoices: &str) -> Result<(), Error> {
    let mut file = File::create(path)?;
    file.write_all(invoices.as_bytes())?;
    Ok(())
}

pub fn write_payments(path: &Path, rows: &[(&str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["reference", "amount"])?;
    for (reference, amount) in rows {
        wtr.write_record([reference, amount])?;
    }

    wtr.flush()?;
    Ok(())
}
