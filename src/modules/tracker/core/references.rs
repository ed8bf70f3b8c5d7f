use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Event,
    DataElement,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Event => f.write_str("event"),
            ReferenceKind::DataElement => f.write_str("data element"),
        }
    }
}

/// Answers whether an identifier in an import payload points at something the platform knows.
pub trait ReferenceResolver: Send + Sync {
    fn resolves(&self, kind: ReferenceKind, uid: &str) -> bool;
}
