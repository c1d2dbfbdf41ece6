use crate::domain::invoice::Invoice;
use crate::domain::ports::InvoiceRepository;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory invoice repository.
///
/// Uses `Arc<RwLock<HashMap<String, Invoice>>>` so clones share the same records.
/// Ideal for testing or runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryInvoiceRepository {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl InMemoryInvoiceRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `invoices`, keyed by their reference.
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        let invoices = invoices
            .into_iter()
            .map(|invoice| (invoice.reference.clone(), invoice))
            .collect();
        Self {
            invoices: Arc::new(RwLock::new(invoices)),
        }
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn get(&self, reference: &str) -> Result<Option<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.get(reference).cloned())
    }

    async fn save(&self, invoice: Invoice) -> Result<()> {
        let mut invoices = self.invoices.write().await;
        invoices.insert(invoice.reference.clone(), invoice);
        Ok(())
    }

    async fn all_invoices(&self) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.read().await;
        let mut all: Vec<Invoice> = invoices.values().cloned().collect();
        all.sort_by(|a, b| a.reference.cmp(&b.reference));
        Ok(all)
    }
}
