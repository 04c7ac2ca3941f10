//! Infrastructure layer - catalog loaders, file persistence, device drivers

pub mod catalog_csv;
pub mod catalog_loader;
pub mod devices;
pub mod frontend;
pub mod persistence;
