//! Catalog Index: course lookup by ticket number

pub mod index;

pub use index::CatalogIndex;
