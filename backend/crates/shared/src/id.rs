//! Request-scoped Identifier Types
//!
//! Type-safe wrappers for the opaque strings a player sends with every
//! ad request.

use std::fmt;
use std::marker::PhantomData;

/// Behaviour shared by every identifier kind
pub trait IdentKind {
    /// Sentinel used when the request omits the identifier
    const FALLBACK: &'static str;
}

/// Generic typed identifier wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Ident, markers};
/// type ContentId = Ident<markers::Content>;
///
/// assert_eq!(ContentId::from_param(None).as_str(), "default");
/// assert_eq!(ContentId::from_param(Some("film-42")).as_str(), "film-42");
/// ```
pub struct Ident<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T: IdentKind> Ident<T> {
    /// Wrap an existing value as-is
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Build from an optional query parameter; absent or blank values
    /// resolve to the kind's sentinel.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(v) if !v.is_empty() => Self::new(v),
            _ => Self::new(T::FALLBACK),
        }
    }

    /// True when this is the sentinel rather than a caller-supplied value
    pub fn is_fallback(&self) -> bool {
        self.value == T::FALLBACK
    }
}

impl<T> Ident<T> {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T: IdentKind> Default for Ident<T> {
    fn default() -> Self {
        Self::new(T::FALLBACK)
    }
}

// Manual impls so the marker type needs no bounds.
impl<T> Clone for Ident<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Ident<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Ident<T> {}

impl<T> std::hash::Hash for Ident<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Ident<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", self.value)
    }
}

impl<T> fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Ident<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Marker types for the identifier kinds
pub mod markers {
    use super::IdentKind;

    /// Title being played
    pub struct Content;

    /// Opaque per-device / per-session identifier (`rida`)
    pub struct Viewer;

    impl IdentKind for Content {
        const FALLBACK: &'static str = "default";
    }

    impl IdentKind for Viewer {
        const FALLBACK: &'static str = "anon";
    }
}

pub type ContentId = Ident<markers::Content>;
pub type ViewerId = Ident<markers::Viewer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        assert_eq!(ContentId::from_param(None).as_str(), "default");
        assert_eq!(ViewerId::from_param(None).as_str(), "anon");
        assert!(ViewerId::default().is_fallback());
    }

    #[test]
    fn test_blank_param_uses_fallback() {
        assert_eq!(ContentId::from_param(Some("")).as_str(), "default");
        assert_eq!(ViewerId::from_param(Some("   ")).as_str(), "anon");
    }

    #[test]
    fn test_supplied_value_is_kept() {
        let id = ViewerId::from_param(Some("roku-1234"));
        assert_eq!(id.as_str(), "roku-1234");
        assert!(!id.is_fallback());
        assert_eq!(id.to_string(), "roku-1234");
    }
}
