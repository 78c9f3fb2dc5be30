//! Scene files
//!
//! A scene is a TOML description of a document:
//!
//! ```toml
//! width = 320
//!
//! [[nodes]]
//! id = "list"
//!
//! [[nodes.children]]
//! class = ["item"]
//! style = { height = "24px" }
//! ```

use anyhow::{Context, Result};
use glide_dom::{Document, ElementSpec, InlineStyle, NodeId, Tree};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scene used when no file is given
pub const BUILTIN: &str = r##"# Two lists side by side. Try:
#   glide run --source "#apple" --target "#basket"
width = 480

[[nodes]]
id = "shelf"
style = { width = "200px" }

[[nodes.children]]
id = "apple"
class = ["fruit"]
style = { height = "32px" }

[[nodes.children]]
id = "pear"
class = ["fruit"]
style = { height = "32px" }

[[nodes.children]]
id = "plum"
class = ["fruit"]
style = { height = "32px" }

[[nodes]]
id = "basket"
style = { width = "200px", margin-top = "24px" }

[[nodes.children]]
id = "fig"
class = ["fruit"]
style = { height = "48px" }
"##;

#[derive(Debug, Deserialize, Serialize)]
pub struct Scene {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
}

fn default_width() -> f32 {
    800.0
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SceneNode {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub class: Vec<String>,
    #[serde(default)]
    pub style: InlineStyle,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl SceneNode {
    fn spec(&self) -> ElementSpec {
        let mut spec = ElementSpec::new(self.tag.as_str());
        if let Some(id) = &self.id {
            spec = spec.id(id.as_str());
        }
        for class in &self.class {
            spec = spec.class(class.as_str());
        }
        for (property, value) in &self.style {
            spec = spec.style(property.as_str(), value.as_str());
        }
        spec
    }

    fn build_into(&self, tree: &mut Tree, parent: NodeId) -> Result<()> {
        let node = tree.build(parent, self.spec())?;
        for child in &self.children {
            child.build_into(tree, node)?;
        }
        Ok(())
    }
}

impl Scene {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN).context("Built-in scene is malformed")
    }

    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Failed to parse scene {}", path.display()))
    }

    /// Build the document described by this scene
    pub fn build(&self) -> Result<Tree> {
        let mut tree = Tree::new(self.width)?;
        let body = tree.container();
        for node in &self.nodes {
            node.build_into(&mut tree, body)?;
        }
        tree.clear_journal();
        Ok(tree)
    }
}
