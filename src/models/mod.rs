mod client;
mod invoice;
mod invoice_item;

pub use client::{Client, NewClient};
pub use invoice::{Invoice, InvoiceStatus, NewInvoice, ParseStatusError};
pub use invoice_item::{InvoiceItem, NewInvoiceItem};
