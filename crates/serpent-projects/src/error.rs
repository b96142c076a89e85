//! Error types for serpent-projects

use thiserror::Error;

/// Result type alias using serpent-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project management error types
#[derive(Error, Debug)]
pub enum Error {
    /// No project descriptor in the working location
    #[error("project file serpent.conf not found in {path}")]
    ProjectNotFound { path: String },

    /// A project descriptor already exists
    #[error(
        "cannot create new project: an existing project (connected to serpent.conf) was found in {path}"
    )]
    ProjectExists { path: String },

    /// Target directory has content that a new project could overwrite
    #[error(
        "cannot create new project: files already exist in {path}; creating a new project may overwrite them"
    )]
    DirectoryNotEmpty { path: String },

    /// Template not builtin, bundled or registered
    #[error(
        "the template '{template}' could not be found. Make sure it is installed and shows up in `serpent template list`"
    )]
    TemplateNotFound { template: String },

    /// Template was registered when the project was created but is gone now
    #[error("template {template} is no longer installed, so the project cannot be run")]
    TemplateNotInstalled { template: String },

    /// Library and template projects have no run hook
    #[error("unable to run {template} projects{}", built_note(.built_into))]
    TemplateNotRunnable {
        template: String,
        built_into: Option<String>,
    },

    /// Builtin names are never stored in the registry
    #[error("'{name}' is a builtin template and cannot be installed or removed")]
    BuiltinTemplate { name: String },

    /// No Python interpreter could be located
    #[error("no Python interpreter found (tried {tried}); set SERPENT_PYTHON to choose one")]
    InterpreterNotFound { tried: String },

    /// Home directory could not be determined
    #[error("could not determine home directory; set SERPENT_HOME")]
    HomeNotFound,

    /// Path is not valid UTF-8
    #[error("invalid path: {path} (paths must be valid UTF-8)")]
    InvalidPath { path: String },

    /// Descriptor, manifest or registry failed to parse or lacks fields
    #[error("{path} is malformed: {message}")]
    ConfigMalformed { path: String, message: String },

    /// Installer or environment tool exited non-zero
    #[error("{command} failed ({status})")]
    InstallationFailed { command: String, status: String },

    /// A subprocess could not be spawned at all
    #[error("process execution failed: {0}")]
    ProcessExecution(String),

    /// Template handler failure
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn built_note(built_into: &Option<String>) -> String {
    match built_into {
        Some(dir) => format!(" (files built in {})", dir),
        None => String::new(),
    }
}

/// Failure raised by a template handler hook.
///
/// `Load` means the handler could not be brought up at all (for module
/// templates: the Python module does not import). `Hook` means it loaded but
/// its `create` or `run` hook failed.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("could not load template '{template}': {reason}")]
    Load { template: String, reason: String },

    #[error("template '{template}' failed in its {hook} hook: {reason}")]
    Hook {
        template: String,
        hook: &'static str,
        reason: String,
    },
}

impl HandlerError {
    pub fn load(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            template: template.into(),
            reason: reason.into(),
        }
    }

    pub fn hook(template: impl Into<String>, hook: &'static str, reason: impl ToString) -> Self {
        Self::Hook {
            template: template.into(),
            hook,
            reason: reason.to_string(),
        }
    }
}

impl Error {
    /// Create a project not found error
    pub fn project_not_found(path: impl Into<String>) -> Self {
        Self::ProjectNotFound { path: path.into() }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a directory not empty error
    pub fn directory_not_empty(path: impl Into<String>) -> Self {
        Self::DirectoryNotEmpty { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(template: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
        }
    }

    /// Create a template not installed error
    pub fn template_not_installed(template: impl Into<String>) -> Self {
        Self::TemplateNotInstalled {
            template: template.into(),
        }
    }

    /// Create a builtin template error
    pub fn builtin_template(name: impl Into<String>) -> Self {
        Self::BuiltinTemplate { name: name.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a malformed configuration error
    pub fn config_malformed(path: impl Into<String>, message: impl ToString) -> Self {
        Self::ConfigMalformed {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an installation failed error
    pub fn installation_failed(command: impl Into<String>, status: impl ToString) -> Self {
        Self::InstallationFailed {
            command: command.into(),
            status: status.to_string(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// True for errors caused by what the user asked for rather than the
    /// state on disk or an external tool.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound { .. }
                | Self::ProjectExists { .. }
                | Self::DirectoryNotEmpty { .. }
                | Self::TemplateNotFound { .. }
                | Self::TemplateNotInstalled { .. }
                | Self::TemplateNotRunnable { .. }
                | Self::BuiltinTemplate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_runnable_message_mentions_build_dir() {
        let err = Error::TemplateNotRunnable {
            template: "lib".to_string(),
            built_into: Some("generated/run".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unable to run lib projects (files built in generated/run)"
        );

        let err = Error::TemplateNotRunnable {
            template: "template".to_string(),
            built_into: None,
        };
        assert_eq!(err.to_string(), "unable to run template projects");
    }

    #[test]
    fn test_handler_error_is_transparent() {
        let err: Error = HandlerError::load("flask", "No module named 'stempl_flask'").into();
        assert!(err.to_string().starts_with("could not load template 'flask'"));
        assert!(!err.is_user_input());
    }

    #[test]
    fn test_user_input_classification() {
        assert!(Error::template_not_found("nope").is_user_input());
        assert!(Error::project_not_found(".").is_user_input());
        assert!(!Error::config_malformed("serpent.conf", "missing field `type`").is_user_input());
        assert!(!Error::installation_failed("pip install x", "exit status: 1").is_user_input());
    }
}
