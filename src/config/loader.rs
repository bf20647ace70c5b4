//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a contract
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::pay_table::{PayTable, PayTableRegistry};

use super::types::{ContractConfig, ContractTerms, DeductionsConfig, RegionConfig};

/// Loads and provides access to the contract configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// builds the pay-table registry once, and exposes the result read-only.
///
/// # Directory Structure
///
/// ```text
/// config/contract/
/// ├── contract.yaml        # Calendar rules, projection, anchoring, plans
/// ├── deductions.yaml      # Tax brackets, pension and insurance rates, regions
/// └── pay_tables/
///     ├── 2023.yaml        # One published table per contract year
///     └── 2024.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use pilot_pay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/contract").unwrap();
/// println!("Loaded agreement: {}", loader.terms().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ContractConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/contract")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The configuration violates a structural rule
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let terms = Self::load_yaml::<ContractTerms>(&path.join("contract.yaml"))?;
        let deductions = Self::load_yaml::<DeductionsConfig>(&path.join("deductions.yaml"))?;
        let tables = Self::load_pay_tables(&path.join("pay_tables"))?;

        debug!(
            agreement = %terms.code,
            published_tables = tables.len(),
            regions = deductions.regions.len(),
            "Loaded contract configuration"
        );

        let config = ContractConfig::new(terms, deductions, tables)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ContractConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all published tables from the pay_tables directory.
    fn load_pay_tables(tables_dir: &Path) -> EngineResult<Vec<PayTable>> {
        let tables_dir_str = tables_dir.display().to_string();

        let entries = fs::read_dir(tables_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                tables.push(Self::load_yaml::<PayTable>(&path)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no pay table files found)", tables_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying contract configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Returns the contract terms.
    pub fn terms(&self) -> &ContractTerms {
        self.config.terms()
    }

    /// Returns the pay-table registry.
    pub fn registry(&self) -> &PayTableRegistry {
        self.config.registry()
    }

    /// Gets a region by its code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pilot_pay_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/contract")?;
    /// let region = loader.get_region("QC")?;
    /// println!("Region: {}", region.name);
    /// # Ok::<(), pilot_pay_engine::error::EngineError>(())
    /// ```
    pub fn get_region(&self, code: &str) -> EngineResult<&RegionConfig> {
        self.config.deductions().region(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContributionScheme;
    use crate::models::{Aircraft, Seat, Step};
    use crate::pay_table::TableSource;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/contract"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.terms().code, "PCA-2024");
        assert_eq!(loader.terms().base_year, 2024);
    }

    #[test]
    fn test_registry_covers_published_and_forecast_years() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let registry = loader.registry();

        let years: Vec<i32> = registry.years().collect();
        assert_eq!(years.first(), Some(&2023));
        assert_eq!(years.last(), Some(&2035));
        assert_eq!(registry.last_published_year(), 2026);
        assert_eq!(
            registry.table(2026).unwrap().source,
            TableSource::Published
        );
        assert_eq!(
            registry.table(2027).unwrap().source,
            TableSource::Projected
        );
    }

    #[test]
    fn test_published_rate_is_verbatim() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rate = loader
            .registry()
            .lookup(2026, Seat::Captain, Aircraft::B777, Step::MAX)
            .unwrap();
        assert_eq!(rate, dec("462.09"));
    }

    #[test]
    fn test_get_region() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let quebec = loader.get_region("QC").unwrap();
        assert_eq!(quebec.name, "Quebec");
        assert_eq!(quebec.scheme, ContributionScheme::Quebec);

        let ontario = loader.get_region("ON").unwrap();
        assert_eq!(ontario.health_premium, dec("900"));
    }

    #[test]
    fn test_get_region_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_region("XX") {
            Err(EngineError::RegionNotFound { code }) => assert_eq!(code, "XX"),
            other => panic!("Expected RegionNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("contract.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_deductions_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let deductions = loader.config().deductions();

        assert_eq!(deductions.tax_year, 2025);
        assert_eq!(deductions.federal.brackets.len(), 5);
        assert_eq!(
            deductions.scheme(ContributionScheme::Quebec).pension.tier1_rate,
            dec("0.064")
        );
        assert_eq!(
            deductions
                .scheme(ContributionScheme::Standard)
                .insurance
                .max_annual_premium,
            dec("1077.48")
        );
    }
}
