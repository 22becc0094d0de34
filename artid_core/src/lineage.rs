//! Lineage edges between identifiers.
//!
//! Pure data: an edge references its endpoints by value (their canonical
//! string form) and owns no graph. Storage of the resulting edges belongs
//! to the caller's provenance layer.

use crate::error::{Error, Result};
use crate::identifier::Codec;
use serde::{Deserialize, Serialize};

/// Well-known relation types. The set is open: any non-empty string is a
/// valid relation.
pub mod relations {
    /// The source artifact was derived from the target.
    pub const DERIVED_FROM: &str = "derived_from";
    /// The source artifact was created by the target (e.g. training code).
    pub const CREATED_BY: &str = "created_by";
    /// The source artifact was trained with the target dataset.
    pub const TRAINED_WITH: &str = "trained_with";
    /// The source model was fine-tuned from the target model.
    pub const FINE_TUNED_FROM: &str = "fine_tuned_from";
}

/// A directed provenance edge between two identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageEdge {
    /// Identifier string of the source artifact.
    pub from: String,
    /// Identifier string of the target artifact.
    pub to: String,
    /// Relation type, e.g. [`relations::DERIVED_FROM`].
    pub relation: String,
}

/// Record a lineage edge between two identifier strings.
///
/// Both endpoints must parse under the given codec; beyond that the edge
/// is constructed as-is, with no normalization of the input strings.
pub fn record_edge(codec: &Codec, from: &str, to: &str, relation: &str) -> Result<LineageEdge> {
    codec.parse(from)?;
    codec.parse(to)?;
    if relation.is_empty() {
        return Err(Error::invalid_entry("Relation type cannot be empty"));
    }

    Ok(LineageEdge {
        from: from.to_string(),
        to: to.to_string(),
        relation: relation.to_string(),
    })
}

/// Record the standard lineage of a derived model: `derived_from` its base
/// model and `created_by` its training code.
pub fn model_lineage(
    codec: &Codec,
    derived: &str,
    base: &str,
    training_code: &str,
) -> Result<Vec<LineageEdge>> {
    Ok(vec![
        record_edge(codec, derived, base, relations::DERIVED_FROM)?,
        record_edge(codec, derived, training_code, relations::CREATED_BY)?,
    ])
}
