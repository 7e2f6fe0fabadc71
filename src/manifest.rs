//! Route manifests
//!
//! A manifest is a TOML file listing the route declarations to generate
//! parameter parsers for, plus generation settings shared by all of them.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::emitter::{UnitSpec, DEFAULT_RUNTIME_PACKAGE};
use crate::model::is_identifier;
use crate::sanitizer::{PlaceholderStyle, QueryMode, SanitizeOptions};

/// Errors that can occur when loading a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid route #{index}: {reason}")]
    InvalidRoute { index: usize, reason: String },
    #[error("Invalid package name '{0}'")]
    InvalidPackage(String),
    #[error("Routes #{first} and #{index} both generate class {class}")]
    DuplicateRoute {
        index: usize,
        first: usize,
        class: String,
    },
}

/// One annotated route declaration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteDecl {
    /// Simple name of the enclosing type
    pub class: String,
    /// Handler method name
    pub method: String,
    /// The typed path template
    pub path: String,
}

impl RouteDecl {
    /// `Class.method`, used to label diagnostics
    pub fn label(&self) -> String {
        format!("{}.{}", self.class, self.method)
    }
}

/// A set of routes sharing one package and generation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Package of the generated classes, empty for the default package
    #[serde(default)]
    pub package: String,

    /// Package of the request-parsing runtime
    #[serde(default = "default_runtime_package")]
    pub runtime_package: String,

    /// Placeholder style of the registration paths
    #[serde(default)]
    pub placeholder_style: PlaceholderStyle,

    /// Query section handling in the registration paths
    #[serde(default)]
    pub query: QueryMode,

    #[serde(default, rename = "route")]
    pub routes: Vec<RouteDecl>,
}

fn default_runtime_package() -> String {
    DEFAULT_RUNTIME_PACKAGE.to_string()
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a manifest from a TOML string
    ///
    /// Package and route names are checked here; templates are not, since
    /// each route compiles (and fails) on its own.
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        for package in [&self.package, &self.runtime_package] {
            if !package.is_empty() && !package.split('.').all(is_identifier) {
                return Err(ManifestError::InvalidPackage(package.clone()));
            }
        }
        if self.runtime_package.is_empty() {
            return Err(ManifestError::InvalidPackage(String::new()));
        }

        let mut classes: HashMap<String, usize> = HashMap::new();
        for (index, route) in self.routes.iter().enumerate() {
            if !is_identifier(&route.class) {
                return Err(ManifestError::InvalidRoute {
                    index,
                    reason: format!("'{}' is not a valid class name", route.class),
                });
            }
            if !is_identifier(&route.method) {
                return Err(ManifestError::InvalidRoute {
                    index,
                    reason: format!("'{}' is not a valid method name", route.method),
                });
            }

            let class = UnitSpec::new(&self.package, &route.class, &route.method)
                .parser_class_name();
            if let Some(&first) = classes.get(&class) {
                return Err(ManifestError::DuplicateRoute {
                    index,
                    first,
                    class,
                });
            }
            classes.insert(class, index);
        }
        Ok(())
    }

    /// Registration path options implied by the manifest settings
    pub fn sanitize_options(&self) -> SanitizeOptions {
        SanitizeOptions::new()
            .with_style(self.placeholder_style)
            .with_query(self.query)
    }
}
