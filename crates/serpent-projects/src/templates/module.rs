//! Templates backed by an installed Python module
//!
//! A template pack is a module exposing two functions:
//!
//! ```python
//! def serpent_create(): ...
//! def serpent_run(python: str): ...
//! ```
//!
//! `serpent_create` runs with the new project as its working directory.
//! `serpent_run` receives the path of the project's venv interpreter.
//! A hook that exits non-zero is a `HandlerError::Hook` carrying the last
//! line it wrote to stderr.
//! Both are invoked through the tool's own interpreter, which is where
//! `serpent template install` put the module.

use super::{CreateContext, RunContext, TemplateHandler};
use crate::error::HandlerError;
use crate::toolchain::{exit_code, Interpreter};
use crate::types::module_name;
use camino::Utf8Path;
use std::process::Stdio;
use tracing::debug;

const CREATE: &str = "create";
const RUN: &str = "run";

/// A template pack loaded by importing its module
#[derive(Debug, Clone)]
pub struct ModuleTemplate {
    name: String,
    module: String,
    python: Option<Interpreter>,
}

impl ModuleTemplate {
    /// A published pack: `pkg:<name>` imports `stempl_<name>`
    pub fn package(name: &str, python: Option<Interpreter>) -> Self {
        Self {
            name: name.to_string(),
            module: format!("stempl_{}", module_name(name)),
            python,
        }
    }

    /// A pack installed from disk: `lcl:<name>` imports `<name>`
    pub fn local(name: &str, python: Option<Interpreter>) -> Self {
        Self {
            name: name.to_string(),
            module: module_name(name),
            python,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    fn interpreter(&self) -> Result<&Interpreter, HandlerError> {
        self.python
            .as_ref()
            .ok_or_else(|| HandlerError::load(&self.name, "no Python interpreter available"))
    }

    /// Import the module without calling anything
    fn import_module(&self, cwd: &Utf8Path) -> Result<&Interpreter, HandlerError> {
        let python = self.interpreter()?;
        let script = format!("import {}", self.module);
        let output = python
            .command()
            .args(["-c", script.as_str()])
            .current_dir(cwd)
            .output()
            .map_err(|e| HandlerError::load(&self.name, format!("{}: {}", python.path(), e)))?;

        if !output.status.success() {
            let reason = last_line(&output.stderr).unwrap_or_else(|| "import failed".to_string());
            return Err(HandlerError::load(&self.name, reason));
        }
        debug!("Imported template module {}", self.module);
        Ok(python)
    }

    /// Call `serpent_<hook>` in the module
    ///
    /// Stdin and stdout stay attached to the terminal. Stderr is captured so
    /// a failing hook can be reported by its last line, and is passed through
    /// when the hook succeeds.
    fn call_hook(
        &self,
        python: &Interpreter,
        hook: &'static str,
        call: &str,
        args: &[&str],
        cwd: &Utf8Path,
    ) -> Result<(), HandlerError> {
        let script = format!("import sys, {m}; {m}.{call}", m = self.module, call = call);
        debug!("Calling serpent_{} in {}", hook, self.module);
        let output = python
            .command()
            .arg("-c")
            .arg(&script)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                HandlerError::hook(&self.name, hook, format!("{}: {}", python.path(), e))
            })?;

        if !output.status.success() {
            let code = exit_code(output.status);
            let reason = last_line(&output.stderr)
                .unwrap_or_else(|| format!("serpent_{} exited with code {}", hook, code));
            return Err(HandlerError::hook(&self.name, hook, reason));
        }
        eprint!("{}", String::from_utf8_lossy(&output.stderr));
        Ok(())
    }
}

/// Last non-blank line of captured stderr
fn last_line(stderr: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().to_string())
}

impl TemplateHandler for ModuleTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<(), HandlerError> {
        let python = self.import_module(ctx.root())?;
        self.call_hook(python, CREATE, "serpent_create()", &[], ctx.root())
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<i32, HandlerError> {
        let python = self.import_module(ctx.root())?;
        self.call_hook(
            python,
            RUN,
            "serpent_run(sys.argv[1])",
            &[ctx.python.path().as_str()],
            ctx.root(),
        )?;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::manifest::Manifest;
    use crate::project::Project;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn demo_project(root: impl Into<Utf8PathBuf>) -> Project {
        Project::new(root, Descriptor::new("django", None), Manifest::new("demo"))
    }

    #[test]
    fn test_module_names() {
        assert_eq!(ModuleTemplate::package("django", None).module(), "stempl_django");
        assert_eq!(ModuleTemplate::package("my-site", None).module(), "stempl_my_site");
        assert_eq!(ModuleTemplate::local("my.templ", None).module(), "my_templ");
    }

    #[test]
    fn test_last_line_skips_trailing_blanks() {
        let stderr = b"Traceback (most recent call last):\n  File \"x\"\nValueError: bad\n\n";
        assert_eq!(last_line(stderr).as_deref(), Some("ValueError: bad"));
        assert_eq!(last_line(b"  \n"), None);
    }

    #[test]
    fn test_no_interpreter_is_load_error() {
        let project = demo_project("/work/demo");
        let ctx = RunContext::for_project(&project, &[]);
        let err = ModuleTemplate::package("django", None).run(&ctx).unwrap_err();
        assert!(matches!(err, HandlerError::Load { .. }));
    }

    #[test]
    fn test_missing_interpreter_binary_is_load_error() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let project = demo_project(&root);
        let ctx = RunContext::for_project(&project, &[]);
        let python = Interpreter::new("/nonexistent/python-for-tests");
        let err = ModuleTemplate::package("django", Some(python))
            .run(&ctx)
            .unwrap_err();
        assert!(matches!(err, HandlerError::Load { .. }));
    }

    #[cfg(unix)]
    mod hooks {
        use super::*;
        use crate::error::Result;
        use crate::templates::CreateContext;
        use crate::toolchain::PackageInstaller;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        // Stands in for python: every import succeeds, every hook call fails
        const FAILING_HOOKS: &str = r#"#!/bin/sh
case "$2" in
    *serpent_*)
        echo "Traceback (most recent call last):" >&2
        echo "RuntimeError: hook failed" >&2
        exit 1
        ;;
esac
exit 0
"#;

        const PASSING_HOOKS: &str = "#!/bin/sh\nexit 0\n";

        struct NoInstall;

        impl PackageInstaller for NoInstall {
            fn install(&self, _spec: &str) -> Result<()> {
                Ok(())
            }
            fn install_editable(&self, _path: &camino::Utf8Path) -> Result<()> {
                Ok(())
            }
            fn upgrade(&self, _spec: &str) -> Result<()> {
                Ok(())
            }
            fn uninstall(&self, _spec: &str) -> Result<()> {
                Ok(())
            }
        }

        fn fake_python(dir: &Utf8PathBuf, script: &str) -> Interpreter {
            let path = dir.join("fake-python");
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            Interpreter::new(path)
        }

        fn sandbox() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
            let temp = TempDir::new().unwrap();
            let base = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
            let bin = base.join("bin");
            let root = base.join("demo");
            fs::create_dir_all(&bin).unwrap();
            fs::create_dir_all(&root).unwrap();
            (temp, bin, root)
        }

        #[test]
        fn test_failing_run_hook_is_hook_error() {
            let (_temp, bin, root) = sandbox();
            let python = fake_python(&bin, FAILING_HOOKS);
            let project = demo_project(&root);
            let ctx = RunContext::for_project(&project, &[]);

            let err = ModuleTemplate::package("django", Some(python))
                .run(&ctx)
                .unwrap_err();
            match err {
                HandlerError::Hook { template, hook, reason } => {
                    assert_eq!(template, "django");
                    assert_eq!(hook, RUN);
                    assert_eq!(reason, "RuntimeError: hook failed");
                }
                other => panic!("Expected Hook, got: {:?}", other),
            }
        }

        #[test]
        fn test_failing_create_hook_is_hook_error() {
            let (_temp, bin, root) = sandbox();
            let python = fake_python(&bin, FAILING_HOOKS);
            let mut project = demo_project(&root);
            let mut ctx = CreateContext::new(&mut project, &NoInstall);

            let err = ModuleTemplate::local("house-style", Some(python))
                .create(&mut ctx)
                .unwrap_err();
            match err {
                HandlerError::Hook { template, hook, reason } => {
                    assert_eq!(template, "house-style");
                    assert_eq!(hook, CREATE);
                    assert_eq!(reason, "RuntimeError: hook failed");
                }
                other => panic!("Expected Hook, got: {:?}", other),
            }
        }

        #[test]
        fn test_silent_failure_reports_exit_code() {
            let (_temp, bin, root) = sandbox();
            let script = "#!/bin/sh\ncase \"$2\" in *serpent_*) exit 4 ;; esac\nexit 0\n";
            let python = fake_python(&bin, script);
            let project = demo_project(&root);
            let ctx = RunContext::for_project(&project, &[]);

            let err = ModuleTemplate::package("django", Some(python))
                .run(&ctx)
                .unwrap_err();
            assert!(err.to_string().contains("serpent_run exited with code 4"));
        }

        #[test]
        fn test_successful_hooks() {
            let (_temp, bin, root) = sandbox();
            let python = fake_python(&bin, PASSING_HOOKS);
            let template = ModuleTemplate::package("django", Some(python));

            let mut project = demo_project(&root);
            let mut ctx = CreateContext::new(&mut project, &NoInstall);
            template.create(&mut ctx).unwrap();

            let ctx = RunContext::for_project(&project, &[]);
            assert_eq!(template.run(&ctx).unwrap(), 0);
        }
    }
}
