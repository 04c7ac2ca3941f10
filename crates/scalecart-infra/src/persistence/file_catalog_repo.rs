//! File-based implementation of PriceCatalogRepository

use std::path::{Path, PathBuf};

use scalecart_domain::model::PriceCatalog;
use scalecart_domain::repository::PriceCatalogRepository;
use scalecart_types::{CatalogError, Error};
use tracing::info;

use crate::catalog_csv::load_catalog_csv;
use crate::catalog_loader::CatalogLoader;

/// Catalog read from a `.toml` or `.csv` file
///
/// The file is re-read on every [`PriceCatalogRepository::load`], so edits
/// take effect at the next customer session.
pub struct FileCatalogRepository {
    path: PathBuf,
}

impl FileCatalogRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceCatalogRepository for FileCatalogRepository {
    fn load(&self) -> Result<PriceCatalog, Error> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.display().to_string()));
        }

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let catalog = match extension.as_str() {
            "toml" => CatalogLoader::load_from_file(&self.path)?.into_catalog(),
            "csv" => load_catalog_csv(&self.path)?,
            other => {
                return Err(CatalogError::UnsupportedFormat(format!(
                    "'{}' ({})",
                    other,
                    self.path.display()
                ))
                .into())
            }
        };

        info!(
            path = %self.path.display(),
            tiers = catalog.len(),
            items = catalog.item_names().len(),
            "price catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dispatches_on_extension() {
        let dir = tempdir().unwrap();
        let toml_path = dir.path().join("items.toml");
        std::fs::write(&toml_path, "[[items]]\nname = \"milk\"\nweight = 500\nprice = 27\n").unwrap();
        let csv_path = dir.path().join("items.csv");
        std::fs::write(&csv_path, "name,weight,price\nmilk,500,27\nbread,400,35\n").unwrap();

        assert_eq!(FileCatalogRepository::new(toml_path).load().unwrap().len(), 1);
        assert_eq!(FileCatalogRepository::new(csv_path).load().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let dir = tempdir().unwrap();
        let missing = FileCatalogRepository::new(dir.path().join("nope.toml"));
        assert!(matches!(missing.load(), Err(Error::FileNotFound(_))));

        let xml_path = dir.path().join("items.xml");
        std::fs::write(&xml_path, "<items/>").unwrap();
        assert!(matches!(
            FileCatalogRepository::new(xml_path).load(),
            Err(Error::Catalog(CatalogError::UnsupportedFormat(_)))
        ));
    }
}
