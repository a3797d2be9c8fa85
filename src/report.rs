//! HTML report rendering.

use crate::constants::{TEMPLATE_FILE, TEMPLATE_VARIABLE};
use anyhow::Context;
use minijinja::{AutoEscape, Environment};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

const EMBEDDED_TEMPLATE: &str = include_str!("../templates/page.tmpl");

/// Template environment holding the report page.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Renderer using the page template compiled into the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        let mut env = html_environment();
        env.add_template(TEMPLATE_FILE, EMBEDDED_TEMPLATE)
            .context("Embedded report template is invalid")?;
        Ok(Self { env })
    }

    /// Renderer loading `page.tmpl` from `dir`.
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Template directory not found: {}", dir.display());
        }
        let mut env = html_environment();
        env.set_loader(minijinja::path_loader(dir));
        Ok(Self { env })
    }

    pub fn for_dir(dir: Option<&Path>) -> anyhow::Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Renders the page with `records` bound to the list variable.
    pub fn render(&self, records: &[Value]) -> anyhow::Result<String> {
        let template = self
            .env
            .get_template(TEMPLATE_FILE)
            .with_context(|| format!("Failed to load template {}", TEMPLATE_FILE))?;
        let context = BTreeMap::from([(TEMPLATE_VARIABLE, records)]);
        template
            .render(context)
            .with_context(|| format!("Failed to render template {}", TEMPLATE_FILE))
    }
}

fn html_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
}
