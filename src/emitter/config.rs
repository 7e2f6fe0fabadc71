//! Configuration for code emission

/// Options for extraction statements and the holder declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Name of the request-parameter source variable
    pub accessor: String,

    /// Name of the generated holder record
    pub holder_name: String,

    /// Extra names parameters may not use, besides language keywords
    pub reserved: Vec<String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            accessor: "rp".to_string(),
            holder_name: "Params".to_string(),
            reserved: vec![],
        }
    }
}

impl EmitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accessor variable name
    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = accessor.into();
        self
    }

    /// Set the holder record name
    pub fn with_holder_name(mut self, name: impl Into<String>) -> Self {
        self.holder_name = name.into();
        self
    }

    /// Reserve an additional name
    pub fn with_reserved(mut self, name: impl Into<String>) -> Self {
        self.reserved.push(name.into());
        self
    }
}

/// Options for a complete generated compilation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConfig {
    /// Package holding `RequestParser` and the per-type parsers
    pub runtime_package: String,

    /// One level of indentation
    pub indent: String,

    /// Value of the `@Generated` annotation
    pub generator: String,
}

/// Default package of the request-parsing runtime
pub const DEFAULT_RUNTIME_PACKAGE: &str = "routetemplate.web";

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            indent: "\t".to_string(),
            generator: "route-template".to_string(),
        }
    }
}

impl UnitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime package
    pub fn with_runtime_package(mut self, package: impl Into<String>) -> Self {
        self.runtime_package = package.into();
        self
    }

    /// Set the indentation unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmitConfig::default();
        assert_eq!(config.accessor, "rp");
        assert_eq!(config.holder_name, "Params");
        assert!(config.reserved.is_empty());

        let unit = UnitConfig::default();
        assert_eq!(unit.runtime_package, "routetemplate.web");
        assert_eq!(unit.indent, "\t");
    }

    #[test]
    fn test_builder_pattern() {
        let config = EmitConfig::new()
            .with_accessor("params")
            .with_holder_name("Users_Get_Params")
            .with_reserved("ctx");

        assert_eq!(config.accessor, "params");
        assert_eq!(config.holder_name, "Users_Get_Params");
        assert_eq!(config.reserved, vec!["ctx".to_string()]);
    }
}
