//! Core types for project management

use serde::{Deserialize, Serialize};

/// Project descriptor file name
pub const DESCRIPTOR_FILE: &str = "serpent.conf";

/// Package manifest file name
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Virtual environment directory, relative to the project root
pub const VENV_DIR: &str = "venv";

/// Output root for generated sources, relative to the project root
pub const GENERATED_DIR: &str = "generated";

/// Rewritten source tree, relative to the project root
pub const GENERATED_RUN_DIR: &str = "generated/run";

/// Shared fragment prepended by global-code injection
pub const GLOBAL_CODE_FILE: &str = "generated/global_code.py";

/// Names of the templates compiled into the tool
pub const BUILTIN_TEMPLATES: [&str; 3] = ["console", "lib", "template"];

/// Whether `name` is one of the builtin templates
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TEMPLATES.contains(&name)
}

/// Optional development feature selected at `serpent new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevFeature {
    /// Prepend `generated/global_code.py` to every source file before running
    GlobalCode,
}

impl DevFeature {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GlobalCode => "globalcode",
        }
    }
}

impl std::fmt::Display for DevFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DevFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "globalcode" => Ok(Self::GlobalCode),
            other => Err(format!(
                "Unknown development feature: {}. Valid features: globalcode",
                other
            )),
        }
    }
}

/// Where an installed template comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Compiled into the tool, never persisted
    Builtin,
    /// Installed as the `stempl-<name>` package
    Package,
    /// Installed from a project on local disk
    Local,
}

impl TemplateKind {
    /// Registry tag, `None` for builtins
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Builtin => None,
            Self::Package => Some("pkg"),
            Self::Local => Some("lcl"),
        }
    }

    /// Label used in `serpent template list`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Package => "installed",
            Self::Local => "local",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "pkg" => Some(Self::Package),
            "lcl" => Some(Self::Local),
            _ => None,
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Python module name for a template project or package name.
///
/// Distribution names may contain hyphens; module names may not.
pub fn module_name(name: &str) -> String {
    name.replace(['-', '.'], "_")
}
