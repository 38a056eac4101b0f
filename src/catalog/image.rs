use crate::config::DEFAULT_IMAGE;

/// The image currently displayed for a product card.
///
/// Starts from the product's own image (or the placeholder when it has
/// none). A load failure swaps in the placeholder once; a failure of the
/// placeholder itself is ignored so the swap cannot loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    src: String,
    placeholder: String,
}

impl ImageSource {
    pub fn new(src: Option<&str>) -> Self {
        Self::with_placeholder(src, DEFAULT_IMAGE)
    }

    pub fn with_placeholder(src: Option<&str>, placeholder: &str) -> Self {
        let src = src
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(placeholder);
        Self {
            src: src.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn is_placeholder(&self) -> bool {
        self.src.contains(&self.placeholder)
    }

    /// Handle a failed load. Returns `true` if the source was switched.
    pub fn on_load_error(&mut self) -> bool {
        if self.is_placeholder() {
            return false;
        }
        self.src = self.placeholder.clone();
        true
    }
}
