//! Data module - CSV loading, cleaning and persistence

mod loader;
mod processor;
mod record;
mod writer;

pub use loader::{DataLoader, LoaderError, RawExtract, RawRow, RAW_COLUMNS};
pub use processor::{ProcessorError, SalesProcessor, CURRENCY_SYMBOL};
pub use record::{parse_date, Region, SalesRecord, SalesTable, UnknownRegion};
pub use writer::{RunSummary, SalesWriter, WriterError, PREVIEW_ROWS};
