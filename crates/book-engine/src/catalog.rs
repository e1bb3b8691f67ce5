//! # Tour Catalog Loading
//!
//! Loads the tour catalog from `config/tours.toml`. The catalog doubles as
//! the read-only `TourRepository` for embedders that do not bring their own
//! store.

use book_core::tour::TourCatalog;

/// Load the tour catalog from the config file.
///
/// Looks in a few locations relative to the working directory so the loader
/// works from the workspace root and from inside a crate during tests.
pub fn load_tour_catalog() -> anyhow::Result<TourCatalog> {
    let config_paths = [
        "config/tours.toml",
        "../config/tours.toml",
        "../../config/tours.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog: TourCatalog = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} tours from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    // Return empty catalog if no config found
    tracing::warn!("No tour catalog found, using empty catalog");
    Ok(TourCatalog::new())
}
