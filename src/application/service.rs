use crate::domain::invoice::Invoice;
use crate::domain::payment::Payment;
use crate::domain::ports::InvoiceRepositoryBox;
use crate::domain::processor;
use crate::error::{PaymentError, Result};
use tracing::{debug, info, instrument};

/// The main entry point for applying payments to invoices.
///
/// `InvoiceService` owns the repository backend. Each payment is processed to
/// completion, including the save, before the call returns, so payments are
/// applied strictly in the order they are submitted.
pub struct InvoiceService {
    repository: InvoiceRepositoryBox,
}

impl InvoiceService {
    /// Creates a new `InvoiceService` over the given repository.
    pub fn new(repository: InvoiceRepositoryBox) -> Self {
        Self { repository }
    }

    /// Applies a payment to the invoice matching its reference and returns the
    /// outcome message.
    ///
    /// The invoice is saved whenever processing completes, including when the
    /// payment was rejected or not needed. Nothing is saved on error.
    #[instrument(skip(self), fields(reference = %payment.reference, amount = %payment.amount))]
    pub async fn process_payment(&self, payment: Payment) -> Result<String> {
        let mut invoice = self
            .repository
            .get(&payment.reference)
            .await?
            .ok_or_else(|| {
                PaymentError::InvalidState("There is no invoice matching this payment".to_string())
            })?;

        let outcome = processor::process(&payment, &mut invoice)?;
        if outcome.is_rejection() {
            info!(%outcome, "payment not applied");
        } else {
            debug!(
                %outcome,
                amount_paid = %invoice.amount_paid,
                tax_amount = %invoice.tax_amount,
                "payment applied"
            );
        }

        self.repository.save(invoice).await?;
        Ok(outcome.message().to_string())
    }

    /// Consumes the service and returns the final state of all invoices.
    pub async fn into_invoices(self) -> Result<Vec<Invoice>> {
        self.repository.all_invoices().await
    }
}
