use std::fmt;
use std::sync::Arc;

/// An opaque classification token attachable to recorded events.
///
/// Tags compare by identity, not by label: two tags created with the
/// same label are distinct, while clones of one tag are equal. The label
/// is carried for display purposes only.
#[derive(Clone)]
pub struct Tag {
    label: Arc<str>,
}

impl Tag {
    /// Allocates a tag with a fresh identity.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            label: Arc::from(label.as_ref()),
        }
    }

    /// The display label this tag was created with.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.label, &other.label)
    }
}

impl Eq for Tag {}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.label)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.label, f)
    }
}
