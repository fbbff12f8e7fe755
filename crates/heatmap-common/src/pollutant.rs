//! Pollutant registry and derived layer configuration.
//!
//! The registry is the single source of truth mapping a pollutant code
//! (e.g. "NO2") to the remote layer names serving its measurements, the
//! feature attributes holding concentration values, and the physical
//! constants used to scale them. A built-in table covers the Sentinel-5P
//! products; deployments can override it from a YAML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::Domain;
use crate::error::{HeatmapError, HeatmapResult};

/// Static configuration for one pollutant code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantSpec {
    /// Selection code (e.g. "SO2", "PM2.5")
    pub code: String,

    /// Remote data layers providing measurements
    pub layers: Vec<String>,

    /// Feature attributes holding the measured concentration,
    /// in lookup order
    pub value_fields: Vec<String>,

    /// Molecular weight in g/mol (aerosols carry an effective weight)
    pub molecular_weight: f64,

    /// Upper bound of the color domain before unit conversion
    pub domain_ceiling: f64,
}

impl PollutantSpec {
    fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("pollutant code must not be empty".to_string());
        }
        if self.molecular_weight <= 0.0 {
            return Err(format!(
                "{}: molecular weight must be positive",
                self.code
            ));
        }
        if self.domain_ceiling < 0.0 {
            return Err(format!(
                "{}: domain ceiling must be non-negative",
                self.code
            ));
        }
        Ok(())
    }
}

/// Configuration derived from a pollutant selection.
///
/// Produced by [`PollutantRegistry::derive`]; every field is recomputed
/// from the registry on each selection, so re-selecting a code always
/// reproduces the same configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConfig {
    /// The selected code, verbatim (possibly unknown)
    pub code: String,

    /// Remote layers to query
    pub layers: Vec<String>,

    /// Value fields to consult per feature, in order
    pub value_fields: Vec<String>,

    /// Molecular weight in g/mol
    pub molecular_weight: f64,

    /// microg/m^3 to mol/m^2 conversion factor (approximate):
    /// molecular_weight / 1000
    pub factor: f64,

    /// Normalization domain: [0, ceiling * factor]
    pub domain: Domain,
}

impl DerivedConfig {
    /// The empty configuration: no layers, no fields, zero weight and
    /// domain. Selected for any code the registry does not know.
    pub fn empty(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            layers: Vec::new(),
            value_fields: Vec::new(),
            molecular_weight: 0.0,
            factor: 0.0,
            domain: Domain::empty(),
        }
    }

    /// True when this selection cannot drive a heatmap.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Registry of pollutant specifications.
#[derive(Debug, Clone)]
pub struct PollutantRegistry {
    specs: Vec<PollutantSpec>,
}

impl PollutantRegistry {
    /// The built-in Sentinel-5P product table.
    ///
    /// PM2.5 and PM10 share the aerosol layers, value fields, and
    /// effective weight; only the domain ceiling differs.
    pub fn builtin() -> Self {
        let spec = |code: &str, layers: &[&str], fields: &[&str], weight: f64, ceiling: f64| {
            PollutantSpec {
                code: code.to_string(),
                layers: layers.iter().map(|s| s.to_string()).collect(),
                value_fields: fields.iter().map(|s| s.to_string()).collect(),
                molecular_weight: weight,
                domain_ceiling: ceiling,
            }
        };

        let aerosol_fields = [
            "aerosol_index_340_380_precision",
            "aerosol_index_354_388_precision",
        ];

        Self {
            specs: vec![
                spec(
                    "SO2",
                    &["sulfurdioxide"],
                    &["sulfurdioxide_total_vertical_column"],
                    64.066,
                    120.0,
                ),
                spec(
                    "NO2",
                    &["nitrogendioxide"],
                    &["nitrogendioxide_tropospheric_column"],
                    46.0055,
                    100.0,
                ),
                spec(
                    "HCHO",
                    &["formaldehyde"],
                    &["formaldehyde_tropospheric_vertical_column"],
                    30.031,
                    120.0,
                ),
                spec(
                    "CO",
                    &["carbonmonoxide"],
                    &["carbonmonoxide_total_column_corrected"],
                    28.01,
                    120.0,
                ),
                spec("CH4", &["methane"], &["methane_mixing_ratio"], 16.04, 120.0),
                spec("PM2.5", &["aerosol"], &aerosol_fields, 1449.1274, 120.0),
                spec("PM10", &["aerosol"], &aerosol_fields, 1449.1274, 150.0),
            ],
        }
    }

    /// Build a registry from explicit specs, validating each entry and
    /// rejecting duplicate codes.
    pub fn from_specs(specs: Vec<PollutantSpec>) -> HeatmapResult<Self> {
        for spec in &specs {
            spec.validate().map_err(HeatmapError::InvalidRegistry)?;
        }

        for (i, spec) in specs.iter().enumerate() {
            if specs[..i].iter().any(|other| other.code == spec.code) {
                return Err(HeatmapError::InvalidRegistry(format!(
                    "duplicate pollutant code: {}",
                    spec.code
                )));
            }
        }

        Ok(Self { specs })
    }

    /// Load a registry from a YAML document (a sequence of specs).
    pub fn from_yaml(yaml: &str) -> HeatmapResult<Self> {
        let specs: Vec<PollutantSpec> = serde_yaml::from_str(yaml)
            .map_err(|e| HeatmapError::InvalidRegistry(format!("YAML parse error: {}", e)))?;
        let registry = Self::from_specs(specs)?;
        info!(
            pollutants = registry.specs.len(),
            "Pollutant registry loaded"
        );
        Ok(registry)
    }

    /// Load a registry from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> HeatmapResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Look up the spec for an exact pollutant code.
    pub fn get(&self, code: &str) -> Option<&PollutantSpec> {
        self.specs.iter().find(|s| s.code == code)
    }

    /// All registered codes, in table order.
    pub fn codes(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.code.as_str()).collect()
    }

    /// Derive the full selection configuration for a code.
    ///
    /// Pure: no state is read besides the registry table. Unknown codes
    /// (including the empty string) derive the empty configuration
    /// rather than an error; callers that want diagnostics can check
    /// [`DerivedConfig::is_empty`].
    pub fn derive(&self, code: &str) -> DerivedConfig {
        match self.get(code) {
            Some(spec) => {
                let factor = spec.molecular_weight / 1000.0;
                DerivedConfig {
                    code: spec.code.clone(),
                    layers: spec.layers.clone(),
                    value_fields: spec.value_fields.clone(),
                    molecular_weight: spec.molecular_weight,
                    factor,
                    domain: Domain::new(0.0, spec.domain_ceiling * factor),
                }
            }
            None => {
                debug!(code = %code, "Unknown pollutant code, deriving empty configuration");
                DerivedConfig::empty(code)
            }
        }
    }
}

impl Default for PollutantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
