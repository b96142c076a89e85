//! Template packs compiled into the tool
//!
//! These serve `pkg:<name>` registry entries without a Python package behind
//! them, so `serpent template install flask` only needs to record the entry.

use super::{CreateContext, RunContext, TemplateHandler};
use crate::error::HandlerError;
use std::fs;
use std::process::Command;
use tracing::debug;

const CREATE: &str = "create";
const RUN: &str = "run";

const FLASK_INDEX_HTML: &str = r#"<!DOCTYPE html>

<html>
    <head>
        <script src="../static/js/index.js" defer></script>
        <link rel="stylesheet" href="../static/css/index.css">
        <title>{{site_title}}</title>
    </head>

    <body>

    </body>
</html>
"#;

const FLASK_APP_PY: &str = r#"from flask import Flask, render_template

app = Flask(__name__)


@app.route('/')
def index():
    return render_template("index.html")
"#;

/// Flask web application
///
/// ```text
/// app.py
/// templates/index.html
/// static/css/index.css
/// static/js/index.js
/// static/images/
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlaskTemplate;

impl TemplateHandler for FlaskTemplate {
    fn name(&self) -> &str {
        "flask"
    }

    fn description(&self) -> &str {
        "Flask web application"
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<(), HandlerError> {
        let layout = || -> std::io::Result<()> {
            ctx.write_file("templates/index.html", FLASK_INDEX_HTML)?;
            ctx.write_file("static/js/index.js", "")?;
            ctx.write_file("static/css/index.css", "")?;
            ctx.create_dir("static/images")?;
            ctx.write_file("app.py", FLASK_APP_PY)
        };
        layout().map_err(|e| HandlerError::hook(self.name(), CREATE, e))?;

        ctx.add_dependencies(&["flask"])
            .map_err(|e| HandlerError::hook(self.name(), CREATE, e))?;
        Ok(())
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<i32, HandlerError> {
        let mut args = vec!["-m".to_string(), "flask".to_string(), "run".to_string()];
        args.extend(ctx.args.iter().cloned());
        ctx.python
            .run(&args, ctx.root())
            .map_err(|e| HandlerError::hook(self.name(), RUN, e))
    }
}

/// web.py application scaffolded by the `webpy` tool
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPyTemplate;

/// Scratch directory `webpy new` writes into before its content is moved up
const WEBPY_SCRATCH: &str = "tempdir";

impl TemplateHandler for WebPyTemplate {
    fn name(&self) -> &str {
        "webpy"
    }

    fn description(&self) -> &str {
        "web.py application"
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<(), HandlerError> {
        ctx.add_dependencies(&["webpy"])
            .map_err(|e| HandlerError::hook(self.name(), CREATE, e))?;

        let tool = ctx.venv_tool("webpy");
        debug!("Running: {} new {}", tool, WEBPY_SCRATCH);
        let status = Command::new(tool.as_std_path())
            .args(["new", WEBPY_SCRATCH])
            .current_dir(ctx.root())
            .status()
            .map_err(|e| HandlerError::load(self.name(), format!("{}: {}", tool, e)))?;
        if !status.success() {
            return Err(HandlerError::hook(
                self.name(),
                CREATE,
                format!("webpy new exited with {}", status),
            ));
        }

        let scratch = ctx.root().join(WEBPY_SCRATCH);
        let hoist = || -> std::io::Result<()> {
            for entry in fs::read_dir(&scratch)? {
                let entry = entry?;
                fs::rename(entry.path(), ctx.root().as_std_path().join(entry.file_name()))?;
            }
            fs::remove_dir(&scratch)
        };
        hoist().map_err(|e| HandlerError::hook(self.name(), CREATE, e))
    }

    fn run(&self, ctx: &RunContext<'_>) -> Result<i32, HandlerError> {
        let mut args = vec!["-m".to_string(), "webpy".to_string(), "run".to_string()];
        args.extend(ctx.args.iter().cloned());
        ctx.python
            .run(&args, ctx.root())
            .map_err(|e| HandlerError::hook(self.name(), RUN, e))
    }
}
