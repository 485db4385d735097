use crate::error::GetconfError;
use crate::resolver::Resolver;

/// Read-only view of one section of a [`Resolver`].
///
/// Not a cache: every read walks the full precedence chain again.
#[derive(Debug, Clone)]
pub struct SectionView<'a> {
    resolver: &'a Resolver,
    section: String,
}

impl<'a> SectionView<'a> {
    pub(crate) fn new(resolver: &'a Resolver, section: &str) -> Self {
        Self {
            resolver,
            section: section.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.section
    }

    /// Value of `{section}.{entry}` as text; empty when not configured.
    pub fn get(&self, entry: &str) -> Result<String, GetconfError> {
        let key = format!("{}.{entry}", self.section);
        Ok(self
            .resolver
            .getstr(&key, Some(""), "")?
            .unwrap_or_default())
    }
}
