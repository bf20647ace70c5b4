//! Configuration loading and management for the pilot compensation engine.
//!
//! This module provides functionality to load a collective agreement from YAML
//! files: calendar rules, projection and anchoring parameters, published pay
//! tables, and the statutory deduction rules.
//!
//! # Example
//!
//! ```no_run
//! use pilot_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/contract").unwrap();
//! println!("Loaded agreement: {}", config.terms().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccrualTier, AnchoringConfig, BasicPersonalAmount, ContractConfig, ContractTerms,
    ContributionScheme, DeductionsConfig, FederalTaxConfig, InsuranceConfig, MonthDay,
    PensionPlanConfig, ProfitShareConfig, ProjectionConfig, RegionConfig, SchemeConfig,
    SchemesConfig, SpecialRateConfig, TaxBracket,
};
