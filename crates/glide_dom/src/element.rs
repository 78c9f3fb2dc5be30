//! Element builder

use smallvec::SmallVec;

use crate::style::InlineStyle;

/// Description of an element to create in a [`Tree`](crate::Tree)
///
/// ```rust
/// use glide_dom::div;
///
/// let card = div().id("card").class("item").size(120.0, 40.0);
/// assert_eq!(card.style.get("width").map(String::as_str), Some("120px"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub style: InlineStyle,
}

/// Start building a `div` element
pub fn div() -> ElementSpec {
    ElementSpec::new("div")
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an inline style property
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn width(self, px: f32) -> Self {
        self.style("width", format!("{px}px"))
    }

    pub fn height(self, px: f32) -> Self {
        self.style("height", format!("{px}px"))
    }

    pub fn size(self, width: f32, height: f32) -> Self {
        self.width(width).height(height)
    }

    /// Lay children out left to right instead of top to bottom
    pub fn row(self) -> Self {
        self.style("flex-direction", "row")
    }
}
