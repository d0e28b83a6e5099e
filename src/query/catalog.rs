// src/query/catalog.rs

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use crate::error::ApiError;

/// Filesystem-backed store of named SQL templates, keyed by
/// `(category, name)` and resolved to `<base>/<category>/<name>.sql`.
///
/// Template text is cached for the life of the process after first load.
/// This is the only cache in the service and it holds immutable text,
/// never query results.
pub struct QueryCatalog {
    base_dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<str>>>,
}

impl QueryCatalog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self, category: &str, name: &str) -> Result<Arc<str>, ApiError> {
        let key = format!("{category}/{name}");

        if let Some(sql) = self.cache.read().expect("catalog cache poisoned").get(&key) {
            return Ok(Arc::clone(sql));
        }

        // Keys come from handler code, but refuse path escapes anyway.
        if !is_plain_segment(category) || !is_plain_segment(name) {
            return Err(not_found(category, name));
        }

        let path = self.base_dir.join(category).join(format!("{name}.sql"));
        let text = std::fs::read_to_string(&path).map_err(|_| not_found(category, name))?;
        tracing::debug!(%key, bytes = text.len(), "loaded query template");

        let sql: Arc<str> = Arc::from(text.as_str());
        self.cache
            .write()
            .expect("catalog cache poisoned")
            .insert(key, Arc::clone(&sql));
        Ok(sql)
    }

    /// Loads every registered template, surfacing the first missing one.
    pub fn preload(&self, queries: &[(&str, &str)]) -> Result<(), ApiError> {
        for (category, name) in queries {
            self.load(category, name)?;
        }
        Ok(())
    }
}

fn is_plain_segment(s: &str) -> bool {
    !s.is_empty()
        && s != ".."
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn not_found(category: &str, name: &str) -> ApiError {
    ApiError::TemplateNotFound {
        category: category.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn catalog_with(category: &str, name: &str, sql: &str) -> (tempfile::TempDir, QueryCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let cat_dir = dir.path().join(category);
        fs::create_dir_all(&cat_dir).unwrap();
        fs::write(cat_dir.join(format!("{name}.sql")), sql).unwrap();
        let catalog = QueryCatalog::new(dir.path());
        (dir, catalog)
    }

    #[test]
    fn loads_template_verbatim() {
        let sql = "SELECT 1\n  -- keep formatting\nFROM sales\n";
        let (_dir, catalog) = catalog_with("vendas_e_desempenho", "total_sales_period", sql);
        let loaded = catalog
            .load("vendas_e_desempenho", "total_sales_period")
            .unwrap();
        assert_eq!(&*loaded, sql);
    }

    #[test]
    fn missing_template_is_template_not_found() {
        let (_dir, catalog) = catalog_with("produtos", "top_products", "SELECT 1");
        let err = catalog.load("produtos", "nope").unwrap_err();
        assert!(matches!(err, ApiError::TemplateNotFound { .. }));
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let (dir, catalog) = catalog_with("clientes", "total_customers", "SELECT COUNT(*)");
        catalog.load("clientes", "total_customers").unwrap();

        // Remove the file; the cached text must still answer.
        fs::remove_file(
            dir.path()
                .join("clientes")
                .join("total_customers.sql"),
        )
        .unwrap();
        let loaded = catalog.load("clientes", "total_customers").unwrap();
        assert_eq!(&*loaded, "SELECT COUNT(*)");
    }

    #[test]
    fn path_escapes_are_rejected() {
        let (_dir, catalog) = catalog_with("produtos", "top_products", "SELECT 1");
        for bad in ["../produtos", "a/b", "..", ""] {
            assert!(matches!(
                catalog.load(bad, "top_products"),
                Err(ApiError::TemplateNotFound { .. })
            ));
            assert!(matches!(
                catalog.load("produtos", bad),
                Err(ApiError::TemplateNotFound { .. })
            ));
        }
    }

    #[test]
    fn preload_surfaces_missing_entries() {
        let (_dir, catalog) = catalog_with("entregas", "delivery_status", "SELECT 1");
        assert!(catalog.preload(&[("entregas", "delivery_status")]).is_ok());
        assert!(catalog
            .preload(&[("entregas", "delivery_status"), ("entregas", "missing")])
            .is_err());
    }
}
