//! Document format detection from row keys

/// How a row's value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML document, flattened into dotted keys
    Yaml,
    /// Java properties text
    Properties,
    /// Plain key/value row
    Plain,
}

impl DocumentFormat {
    /// Detect the format from a row key.
    ///
    /// Only `.yml` marks a YAML document unless `yaml_extension` is set, in
    /// which case `.yaml` does too.
    pub fn detect(key: &str, yaml_extension: bool) -> Self {
        if key.ends_with(".yml") || (yaml_extension && key.ends_with(".yaml")) {
            DocumentFormat::Yaml
        } else if key.ends_with(".properties") {
            DocumentFormat::Properties
        } else {
            DocumentFormat::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Properties => "properties",
            DocumentFormat::Plain => "plain",
        }
    }

    /// Whether values of this format are parsed rather than used verbatim
    pub fn is_structured(&self) -> bool {
        !matches!(self, DocumentFormat::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(DocumentFormat::detect("app.yml", false), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::detect("app.properties", false), DocumentFormat::Properties);
        assert_eq!(DocumentFormat::detect("server.port", false), DocumentFormat::Plain);
        assert!(!DocumentFormat::Plain.is_structured());
    }

    #[test]
    fn test_yaml_extension_is_opt_in() {
        assert_eq!(DocumentFormat::detect("app.yaml", false), DocumentFormat::Plain);
        assert_eq!(DocumentFormat::detect("app.yaml", true), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::detect("app.yml", true), DocumentFormat::Yaml);
    }
}
