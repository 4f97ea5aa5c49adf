//! Configuration for OpenURL parsing.

/// Title used when a context object carries no title at all.
pub const DEFAULT_TITLE_PLACEHOLDER: &str = "Unknown";
/// End page used when only a start page is known ("end of article").
pub const DEFAULT_END_OF_ARTICLE: &str = "EOA";
/// Start page used when only an end page is known.
pub const DEFAULT_MISSING_START_PAGE: &str = "?";

/// Configuration for OpenURL parsing.
///
/// Controls the placeholder values written into a citation when the context
/// object leaves a required or implied field empty.
///
/// # Examples
///
/// ```
/// use bibkev::OpenUrlConfig;
///
/// let mut config = OpenUrlConfig::new();
/// config.set_title_placeholder("[untitled]").set_end_of_article("ff.");
/// assert_eq!(config.title_placeholder(), "[untitled]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenUrlConfig {
    /// Title written when none could be resolved
    title_placeholder: String,
    /// End page written when only a start page is known
    end_of_article: String,
    /// Start page written when only an end page is known
    missing_start_page: String,
}

impl Default for OpenUrlConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenUrlConfig {
    /// Creates a configuration with the default placeholders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title_placeholder: DEFAULT_TITLE_PLACEHOLDER.to_string(),
            end_of_article: DEFAULT_END_OF_ARTICLE.to_string(),
            missing_start_page: DEFAULT_MISSING_START_PAGE.to_string(),
        }
    }

    /// Sets the title used when no title is found
    pub fn set_title_placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        self.title_placeholder = placeholder.into();
        self
    }

    /// Sets the end-of-article sentinel
    pub fn set_end_of_article(&mut self, sentinel: impl Into<String>) -> &mut Self {
        self.end_of_article = sentinel.into();
        self
    }

    /// Sets the missing start page sentinel
    pub fn set_missing_start_page(&mut self, sentinel: impl Into<String>) -> &mut Self {
        self.missing_start_page = sentinel.into();
        self
    }

    pub fn title_placeholder(&self) -> &str {
        &self.title_placeholder
    }

    pub fn end_of_article(&self) -> &str {
        &self.end_of_article
    }

    pub fn missing_start_page(&self) -> &str {
        &self.missing_start_page
    }
}
