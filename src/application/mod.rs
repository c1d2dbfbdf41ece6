//! Application layer orchestrating payment processing.
//!
//! This module defines the `InvoiceService`, the public entry point that looks an
//! invoice up by payment reference, runs the decision procedure against it and
//! saves the result through the repository port.

pub mod service;
