use config::{Config, Environment, File, FileFormat};

use crate::error::Result;
use crate::settings::Settings;
use crate::validation::validate;

/// Environment prefix, e.g. `HOSPITAL__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "HOSPITAL";

enum Source {
    File(String),
    Yaml(String),
}

/// Layered configuration loader.
///
/// Precedence, lowest first: built-in defaults, files/inline YAML in the
/// order added, then environment variables.
pub struct ConfigEngine {
    sources: Vec<Source>,
    env_prefix: Option<String>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Add an optional configuration file; a missing file is skipped
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    pub fn with_yaml_str(mut self, yaml: impl Into<String>) -> Self {
        self.sources.push(Source::Yaml(yaml.into()));
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    pub fn load(self) -> Result<Settings> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        for source in &self.sources {
            builder = match source {
                Source::File(path) => {
                    tracing::debug!(path = %path, "Adding configuration file");
                    builder.add_source(File::with_name(path).required(false))
                }
                Source::Yaml(yaml) => builder.add_source(File::from_str(yaml, FileFormat::Yaml)),
            };
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}
