//! Training snapshot identifiers.

use crate::error::Result;
use crate::hash::Digest;
use crate::identifier::Identifier;
use crate::object::ObjectType;
use serde::{Deserialize, Serialize};

/// The state of a training run, addressed as a snapshot.
///
/// Field order is the canonical payload order; hyperparameter keys are
/// serialized sorted, so two descriptions of the same run always address
/// identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    /// Identifier string of the model source code.
    pub model_code: String,
    /// Identifier string or name of the training dataset.
    pub training_data: String,
    /// Hyperparameters of the run.
    pub hyperparameters: serde_json::Value,
    /// Wall-clock timestamp of the snapshot (RFC 3339).
    pub timestamp: String,
    /// Git commit of the training code, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
}

/// Address a training snapshot.
///
/// The digest covers the canonical JSON rendering of the snapshot with no
/// object framing (unlike content and tree addressing), wrapped as an
/// `ObjectType::Snapshot` identifier.
pub fn address_snapshot(snapshot: &TrainingSnapshot) -> Result<Identifier> {
    let payload = serde_json::to_vec(snapshot)?;
    Ok(Identifier::new(
        ObjectType::Snapshot,
        Digest::hash_bytes(&payload),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> TrainingSnapshot {
        TrainingSnapshot {
            model_code: "swh:1:dir:94a9ed024d3859793618152ea559a168bbcbb5e2".to_string(),
            training_data: "swh:1:dir:4b825dc642cb6eb9a060e54bf8d69288fbee4904".to_string(),
            hyperparameters: json!({"learning_rate": 0.0003, "epochs": 3}),
            timestamp: "2026-01-15T12:00:00Z".to_string(),
            git_commit: Some("83baae61804e65cc73a7201a7252750c76066a30".to_string()),
        }
    }

    #[test]
    fn test_snapshot_addressing_deterministic() {
        let id1 = address_snapshot(&snapshot()).unwrap();
        let id2 = address_snapshot(&snapshot()).unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_object_type_is_snapshot() {
        let id = address_snapshot(&snapshot()).unwrap();
        assert_eq!(id.object_type, ObjectType::Snapshot);
    }

    #[test]
    fn test_hyperparameters_change_identifier() {
        let base = snapshot();
        let mut tweaked = snapshot();
        tweaked.hyperparameters = json!({"learning_rate": 0.0004, "epochs": 3});

        assert_ne!(
            address_snapshot(&base).unwrap(),
            address_snapshot(&tweaked).unwrap()
        );
    }

    #[test]
    fn test_hyperparameter_key_order_is_canonical() {
        // serde_json maps sort keys, so construction order cannot matter
        let mut first = snapshot();
        first.hyperparameters = json!({"a": 1, "b": 2});
        let mut second = snapshot();
        second.hyperparameters = json!({"b": 2, "a": 1});

        assert_eq!(
            address_snapshot(&first).unwrap(),
            address_snapshot(&second).unwrap()
        );
    }

    #[test]
    fn test_missing_git_commit_changes_identifier() {
        let with_commit = snapshot();
        let mut without = snapshot();
        without.git_commit = None;

        assert_ne!(
            address_snapshot(&with_commit).unwrap(),
            address_snapshot(&without).unwrap()
        );
    }

    #[test]
    fn test_payload_omits_absent_commit() {
        let mut without = snapshot();
        without.git_commit = None;
        let payload = serde_json::to_string(&without).unwrap();
        assert!(!payload.contains("git_commit"));
    }
}
