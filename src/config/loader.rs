//! Policy document loading.
//!
//! This module provides the [`ConfigLoader`] type for loading a policy
//! document from disk or from an in-memory string, and for falling back to
//! the compiled-in default when no usable document is available.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::PolicyConfig;

/// The serialization format of a policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (`.yaml` / `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl DocumentFormat {
    /// Infers the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Where the active policy came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOrigin {
    /// Loaded from a document at this path (or label, for in-memory documents).
    Document(PathBuf),
    /// The compiled-in default policy.
    CompiledDefault,
}

/// Loads and provides access to the active policy.
///
/// A document either loads completely and passes validation, or it is
/// rejected as a whole. There is no partial merge with the default.
///
/// # Example
///
/// ```no_run
/// use entitlement_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/policy.yaml")?;
/// println!("Policy version: {}", loader.policy().version);
/// # Ok::<(), entitlement_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PolicyConfig,
    origin: PolicyOrigin,
}

impl ConfigLoader {
    /// Loads a policy document from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The document is malformed, incomplete or has unknown fields (`ConfigParseError`)
    /// - The document fails validation (`InvalidPolicy`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy = Self::parse(&content, DocumentFormat::from_path(path), &path_str)?;

        info!(path = %path_str, version = %policy.version, "Loaded policy document");

        Ok(Self {
            policy,
            origin: PolicyOrigin::Document(path.to_path_buf()),
        })
    }

    /// Loads a policy from an in-memory document, such as one fetched remotely.
    ///
    /// `label` identifies the document in errors and in [`ConfigLoader::origin`].
    pub fn from_document(content: &str, format: DocumentFormat, label: &str) -> EngineResult<Self> {
        let policy = Self::parse(content, format, label)?;
        Ok(Self {
            policy,
            origin: PolicyOrigin::Document(PathBuf::from(label)),
        })
    }

    /// Loads the policy at `path`, falling back to the compiled-in default.
    ///
    /// An absent path, a missing file, a parse failure or a validation
    /// failure all resolve to the default. The failure is logged, never
    /// returned.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Self {
        let Some(path) = path else {
            info!("No policy document configured, using compiled-in default");
            return Self::compiled_default();
        };

        match Self::load(path.as_ref()) {
            Ok(loader) => loader,
            Err(err) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %err,
                    "Policy document unavailable, falling back to compiled-in default"
                );
                Self::compiled_default()
            }
        }
    }

    /// Returns a loader holding the compiled-in default policy.
    pub fn compiled_default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            origin: PolicyOrigin::CompiledDefault,
        }
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns where the active policy came from.
    pub fn origin(&self) -> &PolicyOrigin {
        &self.origin
    }

    fn parse(content: &str, format: DocumentFormat, label: &str) -> EngineResult<PolicyConfig> {
        let parsed = match format {
            DocumentFormat::Yaml => {
                serde_yaml::from_str::<PolicyConfig>(content).map_err(|e| e.to_string())
            }
            DocumentFormat::Json => {
                serde_json::from_str::<PolicyConfig>(content).map_err(|e| e.to_string())
            }
        };

        let policy = parsed.map_err(|message| EngineError::ConfigParseError {
            path: label.to_string(),
            message,
        })?;

        policy.validate()?;
        Ok(policy)
    }
}
