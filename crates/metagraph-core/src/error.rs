//! Error taxonomy for the metagraph core.
//!
//! Every checked failure is a [`MetagraphError`] wrapped in an
//! [`error_stack::Report`], carrying the offending argument name and a
//! [`MessageKey`] that resolves to a stable, human-readable message. The key
//! (rather than a raw `String`) is what the external "error message table"
//! of the distilled spec becomes in a typed language: callers can match on
//! it exhaustively instead of comparing strings.

use std::fmt;

/// A stable key into the message table, one per row of the original
/// string-keyed resource table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MessageKey {
    ValueNull,
    FileEmpty,
    FolderEmpty,
    FormatInvalid,
    NotInGeneratingSet,
    ValueNotFound,
    NoOverlap,
    NotIdentical,
    NotASubset,
    ArgumentsInvalid,
    StructuresIncompatible,
    ValueOutOfBounds,
    ValueInvalid,
    RangeInvalid,
    PartitionInvalid,
}

impl MessageKey {
    /// The stable string key, as it would appear in an external resource table.
    pub const fn key(self) -> &'static str {
        match self {
            Self::ValueNull => "value_null",
            Self::FileEmpty => "file_empty",
            Self::FolderEmpty => "folder_empty",
            Self::FormatInvalid => "format_invalid",
            Self::NotInGeneratingSet => "not_in_generating_set",
            Self::ValueNotFound => "value_not_found",
            Self::NoOverlap => "no_overlap",
            Self::NotIdentical => "not_identical",
            Self::NotASubset => "not_a_subset",
            Self::ArgumentsInvalid => "arguments_invalid",
            Self::StructuresIncompatible => "structures_incompatible",
            Self::ValueOutOfBounds => "value_out_of_bounds",
            Self::ValueInvalid => "value_invalid",
            Self::RangeInvalid => "range_invalid",
            Self::PartitionInvalid => "partition_invalid",
        }
    }

    /// The resolved, human-readable message.
    pub const fn message(self) -> &'static str {
        match self {
            Self::ValueNull => "value must not be null or empty",
            Self::FileEmpty => "file must not be empty",
            Self::FolderEmpty => "folder must not be empty",
            Self::FormatInvalid => "value has an invalid format",
            Self::NotInGeneratingSet => "value is not in the generating set",
            Self::ValueNotFound => "value was not found",
            Self::NoOverlap => "generating sets do not overlap",
            Self::NotIdentical => "generating sets are not identical",
            Self::NotASubset => "value is not a subset of the generating set",
            Self::ArgumentsInvalid => "arguments are invalid",
            Self::StructuresIncompatible => "structures are incompatible",
            Self::ValueOutOfBounds => "value is out of bounds",
            Self::ValueInvalid => "value is invalid",
            Self::RangeInvalid => "value is out of range",
            Self::PartitionInvalid => "partition is invalid: parts must be disjoint",
        }
    }
}

/// The checked-failure taxonomy of the metagraph core (see `ERROR HANDLING DESIGN`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MetagraphError {
    /// Null/empty where not allowed, wrong-shape input, an outvertex that mixes a
    /// proposition with other elements, incompatible matrix shapes, or a
    /// variables/propositions partition that overlaps.
    InvalidArgument { argument: String, key: MessageKey },
    /// Removing a node or edge that is not present in the metagraph.
    NotFound { argument: String, key: MessageKey },
    /// An element outside the generating set, or an expression token outside
    /// the propositions set.
    RangeViolation { argument: String, key: MessageKey },
    /// Generating sets required to be identical (multiplication) or to
    /// overlap (addition) that are not.
    Inconsistency { argument: String, key: MessageKey },
}

impl MetagraphError {
    pub fn invalid_argument(argument: impl Into<String>, key: MessageKey) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            key,
        }
    }

    pub fn not_found(argument: impl Into<String>, key: MessageKey) -> Self {
        Self::NotFound {
            argument: argument.into(),
            key,
        }
    }

    pub fn range_violation(argument: impl Into<String>, key: MessageKey) -> Self {
        Self::RangeViolation {
            argument: argument.into(),
            key,
        }
    }

    pub fn inconsistency(argument: impl Into<String>, key: MessageKey) -> Self {
        Self::Inconsistency {
            argument: argument.into(),
            key,
        }
    }

    fn parts(&self) -> (&str, &str, MessageKey) {
        match self {
            Self::InvalidArgument { argument, key } => ("invalid argument", argument, *key),
            Self::NotFound { argument, key } => ("not found", argument, *key),
            Self::RangeViolation { argument, key } => ("range violation", argument, *key),
            Self::Inconsistency { argument, key } => ("inconsistency", argument, *key),
        }
    }
}

impl fmt::Display for MetagraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, argument, key) = self.parts();
        write!(f, "{kind} on `{argument}`: {} ({})", key.message(), key.key())
    }
}

impl std::error::Error for MetagraphError {}

/// Convenience alias: every fallible core operation returns this.
pub type Result<T> = error_stack::Result<T, MetagraphError>;

/// Shorthand for constructing an `Err(Report::new(...))` at a call site.
pub fn fail<T>(error: MetagraphError) -> Result<T> {
    Err(error_stack::Report::new(error))
}
