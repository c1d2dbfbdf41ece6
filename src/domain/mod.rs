//! Domain layer: invoices, payments, the payment decision procedure and the
//! storage port it is driven through.

pub mod invoice;
pub mod payment;
pub mod ports;
pub mod processor;
