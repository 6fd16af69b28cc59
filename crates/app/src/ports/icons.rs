//! Icon port — source of the SVG documents drawn for each device kind.

use zabdash_domain::icon::IconKind;

/// Lookup of the raw SVG markup for an icon kind.
pub trait IconLibrary: Send + Sync {
    /// The SVG document for `kind`, or `None` if the asset is missing.
    fn svg(&self, kind: IconKind) -> Option<&str>;
}
