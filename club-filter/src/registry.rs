//! FieldSpecs of every portal resource, wired once at startup.
//!
//! The registry is built in code with [`Registry::register`] or loaded from
//! TOML, one table per resource:
//!
//! ```toml
//! [events]
//! equality_only = ["organizer_id", "status"]
//! any_operator = ["title", "start_date", "capacity"]
//! reserved = ["sort"]
//! default_limit = 10
//! max_limit = 100
//! ```
//!
//! All configuration errors surface at load time, tagged with the resource.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{QueryError, RegistryError};
use crate::validate::FieldSpec;
use crate::{CompiledQuery, RawQuery};

/// Built-in configuration of the portal's list endpoints.
const PORTAL_CONFIG: &str = include_str!("../config/portal.toml");

/// A portal resource with a list/search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Resource {
    /// Members.
    Users,
    /// News posts.
    Posts,
    /// Club events.
    Events,
    /// Document library items.
    Libraries,
    /// Files attached to posts and library items.
    Attachments,
    /// In-app notifications.
    Notifications,
}

impl Resource {
    /// Every resource.
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::Posts,
        Self::Events,
        Self::Libraries,
        Self::Attachments,
        Self::Notifications,
    ];

    /// Configuration name of the resource.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Events => "events",
            Self::Libraries => "libraries",
            Self::Attachments => "attachments",
            Self::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownResource(s.to_string()))
    }
}

/// One resource table of the TOML configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EndpointConfig {
    equality_only: Vec<String>,
    any_operator: Vec<String>,
    reserved: Vec<String>,
    default_limit: Option<u32>,
    max_limit: Option<u32>,
}

impl EndpointConfig {
    fn into_spec(self) -> Result<FieldSpec, crate::FieldSpecError> {
        let mut builder = FieldSpec::builder()
            .equality_only(self.equality_only.as_slice())
            .any_operator(self.any_operator.as_slice())
            .reserved(self.reserved.as_slice());
        if let Some(limit) = self.default_limit {
            builder = builder.default_limit(limit);
        }
        if let Some(limit) = self.max_limit {
            builder = builder.max_limit(limit);
        }
        builder.build()
    }
}

/// Immutable map from resource to FieldSpec.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: BTreeMap<Resource, FieldSpec>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the FieldSpec of a resource.
    #[must_use]
    pub fn register(mut self, resource: Resource, spec: FieldSpec) -> Self {
        self.specs.insert(resource, spec);
        self
    }

    /// Load a registry from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, RegistryError> {
        let tables: BTreeMap<Resource, EndpointConfig> = toml::from_str(text)?;

        let mut registry = Self::new();
        for (resource, config) in tables {
            let spec = config.into_spec().map_err(|source| RegistryError::Spec {
                resource: resource.to_string(),
                source,
            })?;
            registry.specs.insert(resource, spec);
        }

        tracing::info!(resources = registry.specs.len(), "loaded filter configuration");
        Ok(registry)
    }

    /// Load a registry from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// The built-in configuration of every portal resource.
    pub fn portal() -> Result<Self, RegistryError> {
        Self::from_toml(PORTAL_CONFIG)
    }

    /// FieldSpec of a resource.
    pub fn spec(&self, resource: Resource) -> Result<&FieldSpec, RegistryError> {
        self.specs
            .get(&resource)
            .ok_or_else(|| RegistryError::UnknownResource(resource.to_string()))
    }

    /// Configured resources, in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = Resource> + '_ {
        self.specs.keys().copied()
    }

    /// Compile a request against a resource's FieldSpec.
    ///
    /// The outer error is a server-side wiring problem (resource not
    /// configured); the inner one is the client's invalid query.
    pub fn compile(
        &self,
        resource: Resource,
        raw: &RawQuery,
    ) -> Result<Result<CompiledQuery, QueryError>, RegistryError> {
        Ok(self.spec(resource)?.compile(raw))
    }
}
