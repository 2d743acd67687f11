//! # Cleaner Catalog
//!
//! The texture → cleaner-product mapping used to derive complementary
//! cleaner lines.
//!
//! The mapping is an explicit immutable structure handed to the transformer
//! at construction, not a hidden global, so tests can substitute their own
//! table. Textures without an entry contribute nothing; that is expected
//! behavior for textures we do not stock a cleaner for, not an error.

use std::collections::HashMap;

// =============================================================================
// Cleaner Catalog
// =============================================================================

/// Immutable lookup table from texture id to cleaner product code.
///
/// ## Example
/// ```rust
/// use shield_core::catalog::CleanerCatalog;
///
/// let catalog = CleanerCatalog::standard();
/// assert_eq!(catalog.cleaner_for("CLEAR"), Some("CLEAR-CLEANNER"));
/// assert_eq!(catalog.cleaner_for("GLOSSY"), None);
/// ```
#[derive(Debug, Clone)]
pub struct CleanerCatalog {
    cleaners: HashMap<String, String>,
}

impl CleanerCatalog {
    /// Builds a catalog from explicit (texture, cleaner code) pairs.
    pub fn new<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        CleanerCatalog {
            cleaners: entries
                .into_iter()
                .map(|(texture, cleaner)| (texture.into(), cleaner.into()))
                .collect(),
        }
    }

    /// The stocked texture lineup: CLEAR, MATTE and PRIVACY, each paired
    /// with its cleaner product.
    pub fn standard() -> Self {
        CleanerCatalog::new([
            ("CLEAR", "CLEAR-CLEANNER"),
            ("MATTE", "MATTE-CLEANNER"),
            ("PRIVACY", "PRIVACY-CLEANNER"),
        ])
    }

    /// Looks up the cleaner product code for a texture id.
    #[inline]
    pub fn cleaner_for(&self, texture_id: &str) -> Option<&str> {
        self.cleaners.get(texture_id).map(String::as_str)
    }

    /// Number of textures with a cleaner configured.
    #[inline]
    pub fn len(&self) -> usize {
        self.cleaners.len()
    }

    /// True when no texture has a cleaner configured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cleaners.is_empty()
    }
}

impl Default for CleanerCatalog {
    fn default() -> Self {
        CleanerCatalog::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
