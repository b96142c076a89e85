//! Builtin templates: `console`, `lib` and `template`

use super::{CreateContext, RunContext, TemplateHandler};
use crate::error::HandlerError;
use crate::types::module_name;

const CREATE: &str = "create";
const RUN: &str = "run";

/// Console entry point
pub const CONSOLE_MAIN: &str = "main.py";

/// A single-script console application
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTemplate;

impl TemplateHandler for ConsoleTemplate {
    fn name(&self) -> &str {
        "console"
    }

    fn description(&self) -> &str {
        "Console application with a main.py entry point"
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<(), HandlerError> {
        ctx.write_file(CONSOLE_MAIN, "print(\"Hello, World!\")")
            .map_err(|e| HandlerError::hook(self.name(), CREATE, e))
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<i32, HandlerError> {
        let script = ctx.source_root().join(CONSOLE_MAIN);
        let mut args = vec![script.to_string()];
        args.extend(ctx.args.iter().cloned());

        ctx.python
            .run(&args, ctx.root())
            .map_err(|e| HandlerError::hook(self.name(), RUN, e))
    }
}

/// An importable library with a test directory
#[derive(Debug, Clone, Copy, Default)]
pub struct LibTemplate;

impl LibTemplate {
    /// Test directory name; a project called `tests` gets `test`
    pub fn test_dir(project_name: &str) -> &'static str {
        if project_name == "tests" {
            "test"
        } else {
            "tests"
        }
    }
}

impl TemplateHandler for LibTemplate {
    fn name(&self) -> &str {
        "lib"
    }

    fn description(&self) -> &str {
        "Library package with a tests directory"
    }

    fn runnable(&self) -> bool {
        false
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<(), HandlerError> {
        let package = module_name(ctx.project_name());
        let test_dir = Self::test_dir(ctx.project_name());

        ctx.write_file(&format!("{}/__init__.py", package), "")
            .and_then(|_| {
                ctx.write_file(
                    &format!("{}/test1.py", test_dir),
                    &format!("import {}\n", package),
                )
            })
            .map_err(|e| HandlerError::hook(self.name(), CREATE, e))
    }

    fn run(&self, _ctx: &RunContext<'_>) -> Result<i32, HandlerError> {
        Err(HandlerError::hook(self.name(), RUN, "library projects cannot be run"))
    }
}

/// A new template pack: a `stempl_<name>` module with both hooks stubbed
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplatePackTemplate;

/// Hook stubs written into a new template pack
pub const TEMPLATE_PACK_STUB: &str = "\
def serpent_create():
    pass


def serpent_run(python: str):
    pass
";

impl TemplatePackTemplate {
    /// Distribution name of a template pack project
    pub fn package_name(project_name: &str) -> String {
        super::manage::package_name(project_name)
    }
}

impl TemplateHandler for TemplatePackTemplate {
    fn name(&self) -> &str {
        "template"
    }

    fn description(&self) -> &str {
        "Template pack installable with `serpent template install`"
    }

    fn runnable(&self) -> bool {
        false
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<(), HandlerError> {
        let module = format!("stempl_{}", module_name(ctx.project_name()));
        ctx.write_file(&format!("{}/__init__.py", module), TEMPLATE_PACK_STUB)
            .map_err(|e| HandlerError::hook(self.name(), CREATE, e))
    }

    fn run(&self, _ctx: &RunContext<'_>) -> Result<i32, HandlerError> {
        Err(HandlerError::hook(self.name(), RUN, "template projects cannot be run"))
    }
}
