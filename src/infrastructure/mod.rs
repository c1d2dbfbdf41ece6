//! Repository implementations for the `InvoiceRepository` port.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
