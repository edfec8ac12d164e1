//! Query types shared by the spell store ports.

use grimoire_domain::{SpellLevel, SpellSchool};

/// Optional filters for listing catalog spells. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub level: Option<SpellLevel>,
    pub school: Option<SpellSchool>,
    /// Case-insensitive substring of the name or alternate name
    pub text: Option<String>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: SpellLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_school(mut self, school: SpellSchool) -> Self {
        self.school = Some(school);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_filter_is_dropped() {
        assert_eq!(CatalogFilter::new().with_text("   ").text, None);
        assert_eq!(
            CatalogFilter::new().with_text(" fire ").text.as_deref(),
            Some("fire")
        );
    }
}
