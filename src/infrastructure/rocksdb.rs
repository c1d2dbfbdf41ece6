use crate::domain::invoice::Invoice;
use crate::domain::ports::InvoiceRepository;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing invoice records.
pub const CF_INVOICES: &str = "invoices";

/// A persistent invoice repository backed by RocksDB.
///
/// Invoices are stored as JSON under their reference in the `invoices`
/// column family. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbInvoiceRepository {
    db: Arc<DB>,
}

impl RocksDbInvoiceRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `invoices` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_invoices = ColumnFamilyDescriptor::new(CF_INVOICES, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_invoices])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn invoices_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_INVOICES).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Invoices column family not found",
            )))
        })
    }
}

#[async_trait]
impl InvoiceRepository for RocksDbInvoiceRepository {
    async fn get(&self, reference: &str) -> Result<Option<Invoice>> {
        let cf = self.invoices_cf()?;
        match self.db.get_cf(cf, reference.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, invoice: Invoice) -> Result<()> {
        let cf = self.invoices_cf()?;
        let value = serde_json::to_vec(&invoice)?;
        self.db.put_cf(cf, invoice.reference.as_bytes(), value)?;
        Ok(())
    }

    async fn all_invoices(&self) -> Result<Vec<Invoice>> {
        let cf = self.invoices_cf()?;
        let mut invoices = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            invoices.push(serde_json::from_slice(&value)?);
        }
        Ok(invoices)
    }
}
