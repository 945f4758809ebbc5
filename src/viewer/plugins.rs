//! Viewer plugin registry with dependency checks.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ScrollError;

/// Plugin identity, independent of its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluginKind {
    /// Asset loading.
    AssetManager,
    /// Geometry buffer (depth + normals) for screen-space effects.
    GBuffer,
    /// Progressive frame accumulation.
    Progressive,
    /// Tone mapping.
    Tonemap,
    /// Screen-space reflections.
    Ssr,
    /// Screen-space ambient occlusion.
    Ssao,
    /// Bloom.
    Bloom,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AssetManager => "AssetManager",
            Self::GBuffer => "GBuffer",
            Self::Progressive => "Progressive",
            Self::Tonemap => "Tonemap",
            Self::Ssr => "SSR",
            Self::Ssao => "SSAO",
            Self::Bloom => "Bloom",
        };
        f.write_str(name)
    }
}

/// A plugin to register, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Plugin {
    /// Asset loading; required before any asset is added.
    AssetManager,
    /// Geometry buffer.
    #[serde(rename = "gbuffer")]
    GBuffer,
    /// Accumulate this many frames after every invalidation.
    Progressive {
        /// Frames to accumulate (at least 1).
        frames: u32,
    },
    /// Tone mapping.
    Tonemap {
        /// Whether tone mapping is applied.
        enabled: bool,
    },
    /// Screen-space reflections.
    Ssr,
    /// Screen-space ambient occlusion.
    Ssao,
    /// Bloom.
    Bloom,
}

impl Plugin {
    /// Identity of this plugin.
    #[must_use]
    pub fn kind(&self) -> PluginKind {
        match self {
            Self::AssetManager => PluginKind::AssetManager,
            Self::GBuffer => PluginKind::GBuffer,
            Self::Progressive { .. } => PluginKind::Progressive,
            Self::Tonemap { .. } => PluginKind::Tonemap,
            Self::Ssr => PluginKind::Ssr,
            Self::Ssao => PluginKind::Ssao,
            Self::Bloom => PluginKind::Bloom,
        }
    }

    /// Plugins that must be registered first.
    #[must_use]
    pub fn dependencies(&self) -> &'static [PluginKind] {
        match self {
            Self::Ssr => &[PluginKind::GBuffer, PluginKind::Progressive],
            Self::Ssao => &[PluginKind::GBuffer],
            _ => &[],
        }
    }
}

/// Handle returned by a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginHandle {
    /// Registered plugin.
    pub kind: PluginKind,
    /// Registration order.
    pub index: usize,
}

/// Plugins registered on a viewer, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Register a plugin.
    ///
    /// Fails if the plugin is already registered, if its parameters are
    /// invalid, or if any dependency is missing.
    pub fn add(&mut self, plugin: Plugin) -> Result<PluginHandle, ScrollError> {
        let kind = plugin.kind();
        if self.contains(kind) {
            return Err(ScrollError::Plugin(format!("{kind} is already registered")));
        }
        if let Plugin::Progressive { frames: 0 } = plugin {
            return Err(ScrollError::Plugin(
                "Progressive needs at least one frame".to_owned(),
            ));
        }
        let missing: Vec<String> = plugin
            .dependencies()
            .iter()
            .filter(|dep| !self.contains(**dep))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ScrollError::Plugin(format!(
                "{kind} requires {}",
                missing.join(", ")
            )));
        }
        let index = self.plugins.len();
        self.plugins.push(plugin);
        log::debug!("registered plugin {kind} (#{index})");
        Ok(PluginHandle { kind, index })
    }

    /// Whether a plugin of this kind is registered.
    #[must_use]
    pub fn contains(&self, kind: PluginKind) -> bool {
        self.get(kind).is_some()
    }

    /// The registered plugin of this kind.
    #[must_use]
    pub fn get(&self, kind: PluginKind) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.kind() == kind)
    }

    /// Registered plugins in order.
    pub fn iter(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.iter()
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
