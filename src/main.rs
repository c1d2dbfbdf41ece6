use clap::Parser;
use invoicepay::application::service::InvoiceService;
use invoicepay::domain::ports::{InvoiceRepository, InvoiceRepositoryBox};
use invoicepay::infrastructure::in_memory::InMemoryInvoiceRepository;
use invoicepay::interfaces::csv::outcome_writer::OutcomeWriter;
use invoicepay::interfaces::csv::payment_reader::PaymentReader;
use invoicepay::interfaces::json;
use invoicepay::logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payments CSV file (`reference, amount`)
    payments: PathBuf,

    /// JSON array of invoices to load before processing
    #[arg(long)]
    invoices: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Write the final state of every invoice to this JSON file
    #[arg(long)]
    invoices_out: Option<PathBuf>,
}

#[cfg(feature = "storage-rocksdb")]
fn open_repository(db_path: Option<PathBuf>) -> Result<InvoiceRepositoryBox> {
    use invoicepay::infrastructure::rocksdb::RocksDbInvoiceRepository;

    match db_path {
        Some(path) => {
            info!(path = %path.display(), "using RocksDB invoice storage");
            Ok(Box::new(RocksDbInvoiceRepository::open(path).into_diagnostic()?))
        }
        None => Ok(Box::new(InMemoryInvoiceRepository::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_repository(db_path: Option<PathBuf>) -> Result<InvoiceRepositoryBox> {
    use tracing::warn;

    if db_path.is_some() {
        warn!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryInvoiceRepository::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let repository = open_repository(cli.db_path)?;
    if let Some(path) = cli.invoices {
        let file = File::open(path).into_diagnostic()?;
        let invoices = json::read_invoices(BufReader::new(file)).into_diagnostic()?;
        info!(count = invoices.len(), "loaded invoices");
        for invoice in invoices {
            repository.save(invoice).await.into_diagnostic()?;
        }
    }
    let service = InvoiceService::new(repository);

    let file = File::open(cli.payments).into_diagnostic()?;
    let reader = PaymentReader::new(file).into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());

    for payment_result in reader.payments() {
        match payment_result {
            Ok(payment) => match service.process_payment(payment.clone()).await {
                Ok(outcome) => writer.write_outcome(&payment, &outcome).into_diagnostic()?,
                Err(e) => error!(reference = %payment.reference, "Error processing payment: {}", e),
            },
            Err(e) => error!("Error reading payment: {}", e),
        }
    }
    writer.flush().into_diagnostic()?;

    if let Some(path) = cli.invoices_out {
        let invoices = service.into_invoices().await.into_diagnostic()?;
        let file = File::create(path).into_diagnostic()?;
        json::write_invoices(BufWriter::new(file), &invoices).into_diagnostic()?;
    }

    Ok(())
}
