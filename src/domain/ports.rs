use super::invoice::Invoice;
use crate::error::Result;
use async_trait::async_trait;

/// Lookup-and-save access to invoice records, keyed by payment reference.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn get(&self, reference: &str) -> Result<Option<Invoice>>;
    async fn save(&self, invoice: Invoice) -> Result<()>;
    async fn all_invoices(&self) -> Result<Vec<Invoice>>;
}

pub type InvoiceRepositoryBox = Box<dyn InvoiceRepository>;
