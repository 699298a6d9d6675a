//! Static tour and destination catalog.
//!
//! The catalog is loaded once at startup, from the embedded default or from
//! a YAML file, and never mutated afterwards.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog shipped with the binary.
const DEFAULT_CATALOG: &str = include_str!("../../catalog/default.yaml");

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog is not valid YAML for this schema.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The catalog parsed but breaks an invariant.
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// One stop of a guided tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourStop {
    /// Stop name.
    pub name: String,
    /// Query resolved when the stop is selected.
    pub query: String,
    /// What happened here.
    pub description: String,
}

/// A static multi-location itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    /// Tour identifier, used in `tour:<id>` queries.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Emoji icon.
    pub icon: String,
    /// One-line description.
    pub description: String,
    /// Human-readable duration.
    pub duration: String,
    /// Category label.
    pub category: String,
    /// Ordered stops; never empty.
    pub stops: Vec<TourStop>,
}

/// Grouping of quick-pick destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationCategory {
    /// Sacred paths.
    Sacred,
    /// Architecture.
    Architecture,
    /// Geographic landmarks.
    Landmarks,
}

impl DestinationCategory {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sacred => "Sacred Paths",
            Self::Architecture => "Architecture",
            Self::Landmarks => "Geographic Landmarks",
        }
    }
}

/// A popular destination offered on the search screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Display name.
    pub name: String,
    /// Emoji icon.
    pub icon: String,
    /// Query submitted when picked.
    pub query: String,
    /// Category.
    pub category: DestinationCategory,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tours: Vec<Tour>,
    #[serde(default)]
    destinations: Vec<Destination>,
}

/// The loaded catalog.
#[derive(Debug, Clone)]
pub struct TourCatalog {
    tours: Vec<Arc<Tour>>,
    destinations: Vec<Destination>,
}

impl TourCatalog {
    /// Loads the catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded catalog is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(DEFAULT_CATALOG)
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, parsed, or
    /// validated.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Parses and validates a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML and
    /// `CatalogError::Invalid` for duplicate ids or tours without stops.
    pub fn from_yaml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(raw)?;

        for (i, tour) in file.tours.iter().enumerate() {
            if tour.stops.is_empty() {
                return Err(CatalogError::Invalid(format!("tour '{}' has no stops", tour.id)));
            }
            if file.tours[..i].iter().any(|other| other.id == tour.id) {
                return Err(CatalogError::Invalid(format!("duplicate tour id '{}'", tour.id)));
            }
        }

        Ok(Self {
            tours: file.tours.into_iter().map(Arc::new).collect(),
            destinations: file.destinations,
        })
    }

    /// Looks up a tour by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<Arc<Tour>> {
        self.tours.iter().find(|tour| tour.id == id).cloned()
    }

    /// All tours, in catalog order.
    #[must_use]
    pub fn tours(&self) -> &[Arc<Tour>] {
        &self.tours
    }

    /// All destinations, in catalog order.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }
}
