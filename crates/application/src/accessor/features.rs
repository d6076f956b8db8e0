//! Feature-gated value selection
//!
//! Variable sets gate optional data behind a `features` list. A caller
//! hands the accessor an ordered mapping from feature name to value -
//! literal or lazily produced - and gets back only the values whose
//! features are enabled, wrapped in a [`FeatureSelection`] that knows how
//! to render itself.

use std::fmt;

/// A value associated with a feature: either a literal or a zero-argument
/// producer evaluated only when the feature is enabled.
pub enum FeatureValue {
    /// A literal value.
    Literal(String),
    /// A producer invoked lazily, only for enabled features.
    Producer(Box<dyn Fn() -> String>),
}

impl FeatureValue {
    /// Wraps a producer closure.
    pub fn producer(f: impl Fn() -> String + 'static) -> Self {
        Self::Producer(Box::new(f))
    }

    /// Evaluates the value.
    #[must_use]
    pub fn evaluate(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(f) => f(),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Debug for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.debug_tuple("Producer").field(&"<closure>").finish(),
        }
    }
}

/// The values selected for the enabled features, in declaration order.
///
/// Rendering is a display-time convenience: one element renders as that
/// element alone; several render joined by the separator when one was
/// given, and in debug-list form otherwise. The underlying sequence
/// stays accessible unwrapped through [`FeatureSelection::items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSelection {
    items: Vec<String>,
    separator: Option<String>,
}

impl FeatureSelection {
    pub(super) fn new(items: Vec<String>, separator: Option<&str>) -> Self {
        Self {
            items,
            separator: separator.map(ToString::to_string),
        }
    }

    /// The selected values.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Consumes the selection, returning the raw values.
    #[must_use]
    pub fn into_items(self) -> Vec<String> {
        self.items
    }

    /// Number of selected values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no feature matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the selection using the one-element/join policy.
    #[must_use]
    pub fn render(&self) -> String {
        if self.items.len() == 1 {
            return self.items[0].clone();
        }
        match &self.separator {
            Some(sep) => self.items.join(sep),
            None => format!("{:?}", self.items),
        }
    }
}

impl fmt::Display for FeatureSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn single_element_renders_bare_even_with_separator() {
        let selection = FeatureSelection::new(vec!["Y".to_string()], Some(", "));
        assert_eq!(selection.render(), "Y");
    }

    #[test]
    fn several_elements_join_on_the_separator() {
        let selection =
            FeatureSelection::new(vec!["a".to_string(), "b".to_string()], Some(" -- "));
        assert_eq!(selection.render(), "a -- b");
        assert_eq!(selection.items(), ["a", "b"]);
    }

    #[test]
    fn several_elements_without_separator_render_as_a_list() {
        let selection = FeatureSelection::new(vec!["a".to_string(), "b".to_string()], None);
        assert_eq!(selection.render(), r#"["a", "b"]"#);
    }

    #[test]
    fn producers_evaluate_lazily() {
        let value = FeatureValue::producer(|| "computed".to_string());
        assert_eq!(value.evaluate(), "computed");
        assert_eq!(FeatureValue::from("literal").evaluate(), "literal");
    }
}
