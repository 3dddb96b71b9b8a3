//! # Asset Record
//!
//! The single entity the registry stores. The record is a fixed-field struct
//! rather than an open map: decoding a stored value keeps only these fields,
//! and an update writes exactly these fields, so anything else a previous
//! write carried is dropped.

use serde::{Deserialize, Serialize};

/// Document type tag carried by records written during ledger initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// Serialized as `"asset"`.
    #[serde(rename = "asset")]
    Asset,
}

/// A registry asset as stored in world state.
///
/// Stored under the key `id`. `doc_type` is serialized as `docType` and is
/// omitted entirely when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique key in world state.
    pub id: String,
    pub game_name: String,
    pub owner_name: String,
    pub owner_type: String,
    pub game_value: i64,
    /// Present only on records written by `init_ledger`.
    #[serde(rename = "docType", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
}

impl Asset {
    /// Build an untagged asset, as `create_asset` and `update_asset` write it.
    pub fn new(
        id: impl Into<String>,
        game_name: impl Into<String>,
        owner_name: impl Into<String>,
        owner_type: impl Into<String>,
        game_value: i64,
    ) -> Self {
        Self {
            id: id.into(),
            game_name: game_name.into(),
            owner_name: owner_name.into(),
            owner_type: owner_type.into(),
            game_value,
            doc_type: None,
        }
    }

    /// Tag the asset with `docType = "asset"`.
    pub fn tagged(mut self) -> Self {
        self.doc_type = Some(DocType::Asset);
        self
    }
}

/// Result of a transfer: the owner the asset had before the transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub old_owner_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetreg_core::CanonicalBytes;

    #[test]
    fn untagged_asset_omits_doc_type() {
        let asset = Asset::new("asset1", "Chess", "Robert", "player", 100);
        let cb = CanonicalBytes::new(&asset).unwrap();
        assert_eq!(
            cb.as_str(),
            r#"{"game_name":"Chess","game_value":100,"id":"asset1","owner_name":"Robert","owner_type":"player"}"#
        );
    }

    #[test]
    fn tagged_asset_serializes_doc_type() {
        let asset = Asset::new("asset1", "Chess", "Tomoko", "player", 300).tagged();
        let cb = CanonicalBytes::new(&asset).unwrap();
        assert!(cb.as_str().starts_with(r#"{"docType":"asset","#));
    }

    #[test]
    fn decode_drops_unknown_fields() {
        let raw = r#"{"id":"a","game_name":"Go","owner_name":"x","owner_type":"y","game_value":1,"color":"red"}"#;
        let asset: Asset = serde_json::from_str(raw).unwrap();
        let cb = CanonicalBytes::new(&asset).unwrap();
        assert!(!cb.as_str().contains("color"));
    }

    #[test]
    fn decode_rejects_unknown_doc_type() {
        let raw = r#"{"id":"a","game_name":"Go","owner_name":"x","owner_type":"y","game_value":1,"docType":"other"}"#;
        assert!(serde_json::from_str::<Asset>(raw).is_err());
    }

    #[test]
    fn transfer_outcome_shape() {
        let outcome = TransferOutcome {
            old_owner_name: "Robert".to_string(),
        };
        let cb = CanonicalBytes::new(&outcome).unwrap();
        assert_eq!(cb.as_str(), r#"{"old_owner_name":"Robert"}"#);
    }
}
