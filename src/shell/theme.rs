//! Theme handed to the rendering engine.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::ThemeConfig;

/// Closed set of named color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Error,
    Warning,
    Info,
    Success,
    Background,
}

impl ColorRole {
    pub const ALL: [ColorRole; 8] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Error,
        ColorRole::Warning,
        ColorRole::Info,
        ColorRole::Success,
        ColorRole::Background,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Error => "error",
            ColorRole::Warning => "warning",
            ColorRole::Info => "info",
            ColorRole::Success => "success",
            ColorRole::Background => "background",
        }
    }
}

/// Theme configuration as the rendering engine receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    colors: BTreeMap<&'static str, String>,
}

impl Theme {
    pub fn color(&self, role: ColorRole) -> &str {
        self.colors
            .get(role.as_str())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// `--color-<role>: <value>;` declarations for every role.
    pub fn css_variables(&self) -> String {
        ColorRole::ALL
            .iter()
            .map(|role| format!("--color-{}: {};", role.as_str(), self.color(*role)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        let colors = ColorRole::ALL
            .iter()
            .map(|role| {
                let value = match role {
                    ColorRole::Primary => &config.primary,
                    ColorRole::Secondary => &config.secondary,
                    ColorRole::Accent => &config.accent,
                    ColorRole::Error => &config.error,
                    ColorRole::Warning => &config.warning,
                    ColorRole::Info => &config.info,
                    ColorRole::Success => &config.success,
                    ColorRole::Background => &config.background,
                };
                (role.as_str(), value.clone())
            })
            .collect();

        Self {
            name: config.name.clone(),
            dark: config.dark,
            colors,
        }
    }
}

/// Opaque handle returned by a rendering engine once the theme is mounted.
pub struct EngineHandle(#[allow(dead_code)] Box<dyn Any + Send + Sync>);

impl EngineHandle {
    pub fn new<T: Any + Send + Sync>(inner: T) -> Self {
        Self(Box::new(inner))
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineHandle(..)")
    }
}

/// UI component library the shell mounts its theme on.
pub trait RenderingEngine: Send + Sync {
    fn mount(&self, theme: &Theme) -> EngineHandle;
}

/// Engine for server-rendered shells: records the theme's CSS variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEngine;

impl RenderingEngine for HeadlessEngine {
    fn mount(&self, theme: &Theme) -> EngineHandle {
        tracing::debug!(theme = %theme.name, dark = theme.dark, "Theme mounted");
        EngineHandle::new(theme.css_variables())
    }
}
