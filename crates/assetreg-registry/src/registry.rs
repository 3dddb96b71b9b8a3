//! # Asset Registry Transaction Handlers
//!
//! `AssetRegistry` exposes one async method per transaction handler. The host
//! invokes a handler once per transaction; conflicting writes are ordered by
//! the host, not here.
//!
//! ## Per-key lifecycle
//!
//! ```text
//! absent ──create / init_ledger──▶ present ──delete──▶ absent
//!                                   │   ▲
//!                                   └───┘ update / transfer
//! ```
//!
//! `create_asset` never moves a key from present to present; `update_asset`
//! and `transfer_asset` never move a key from absent to present.
//!
//! A key is present iff the store holds a non-empty value under it.

use std::collections::BTreeMap;

use assetreg_core::{canonical, sha256_digest, CanonicalBytes, ContentDigest};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::asset::{Asset, TransferOutcome};
use crate::error::RegistryError;
use crate::seed::seed_assets;
use crate::world_state::WorldState;

/// Transaction handlers over an injected world state.
///
/// Holds no cached records: every call reads the store afresh.
#[derive(Debug, Clone)]
pub struct AssetRegistry<S> {
    state: S,
}

impl<S: WorldState> AssetRegistry<S> {
    /// Create a registry over `state`.
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// The injected world state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Write the seed set, each record tagged `docType = "asset"`.
    ///
    /// Records are written in seed order. A failed write aborts the call, and
    /// records written before it stay in the store; there is no rollback.
    /// Returns the number of records written.
    pub async fn init_ledger(&self) -> Result<usize, RegistryError> {
        let seeds = seed_assets();
        for asset in &seeds {
            self.write_record(&asset.id, asset).await?;
            tracing::debug!(asset_id = %asset.id, "seed asset written");
        }
        tracing::info!(count = seeds.len(), "ledger initialized");
        Ok(seeds.len())
    }

    /// Create a new untagged asset.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if `id` already holds a record.
    pub async fn create_asset(
        &self,
        id: &str,
        game_name: &str,
        owner_name: &str,
        owner_type: &str,
        game_value: i64,
    ) -> Result<CanonicalBytes, RegistryError> {
        if self.asset_exists(id).await? {
            return Err(RegistryError::AlreadyExists(id.to_string()));
        }
        let asset = Asset::new(id, game_name, owner_name, owner_type, game_value);
        let encoded = self.write_record(id, &asset).await?;
        tracing::info!(asset_id = %id, "asset created");
        Ok(encoded)
    }

    /// Return the stored record for `id` exactly as stored.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record is present, `CorruptRecord` if the stored bytes
    /// are not UTF-8.
    pub async fn read_asset(&self, id: &str) -> Result<String, RegistryError> {
        let bytes = self.read_present(id).await?;
        tracing::debug!(asset_id = %id, "asset read");
        String::from_utf8(bytes).map_err(|e| RegistryError::CorruptRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Replace the record for `id` with a new untagged record.
    ///
    /// This is a full overwrite: fields of the previous record that are not
    /// supplied here, including `docType`, are gone afterwards.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record is present.
    pub async fn update_asset(
        &self,
        id: &str,
        game_name: &str,
        owner_name: &str,
        owner_type: &str,
        game_value: i64,
    ) -> Result<CanonicalBytes, RegistryError> {
        if !self.asset_exists(id).await? {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        let asset = Asset::new(id, game_name, owner_name, owner_type, game_value);
        let encoded = self.write_record(id, &asset).await?;
        tracing::info!(asset_id = %id, "asset updated");
        Ok(encoded)
    }

    /// Remove the record for `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record is present.
    pub async fn delete_asset(&self, id: &str) -> Result<(), RegistryError> {
        if !self.asset_exists(id).await? {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.state.delete(id).await?;
        tracing::info!(asset_id = %id, "asset deleted");
        Ok(())
    }

    /// Whether a non-empty value is stored under `id`.
    ///
    /// A missing key is `Ok(false)`; only store failures are errors.
    pub async fn asset_exists(&self, id: &str) -> Result<bool, RegistryError> {
        let exists = matches!(self.state.get(id).await?, Some(bytes) if !bytes.is_empty());
        tracing::debug!(asset_id = %id, exists, "existence check");
        Ok(exists)
    }

    /// Change the owner of `id` to `new_owner_name`, keeping every other field.
    ///
    /// The record is edited as a JSON object, so fields outside the `Asset`
    /// shape survive. The result is written back under `id`, whatever the
    /// record's own `id` field says.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record is present, `CorruptRecord` if the stored value
    /// is not a JSON object with a string `owner_name`.
    pub async fn transfer_asset(
        &self,
        id: &str,
        new_owner_name: &str,
    ) -> Result<TransferOutcome, RegistryError> {
        let bytes = self.read_present(id).await?;
        let corrupt = |reason: String| RegistryError::CorruptRecord {
            id: id.to_string(),
            reason,
        };
        let mut record: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;

        let old_owner_name = match record.get_mut("owner_name") {
            Some(Value::String(owner)) => std::mem::replace(owner, new_owner_name.to_string()),
            _ => return Err(corrupt("owner_name is missing or not a string".to_string())),
        };
        self.write_record(id, &record).await?;
        tracing::info!(
            asset_id = %id,
            from = %old_owner_name,
            to = %new_owner_name,
            "asset transferred"
        );
        Ok(TransferOutcome { old_owner_name })
    }

    /// Every value in the namespace, in scan order.
    ///
    /// Empty values are absent records and are skipped. Values that do not
    /// parse as JSON are returned as a JSON string holding the raw text
    /// instead of failing the call.
    pub async fn get_all_assets(&self) -> Result<Vec<Value>, RegistryError> {
        let entries = self.state.scan("", "").await?;
        let mut out = Vec::with_capacity(entries.len());
        for entry in entries.into_iter().filter(|e| !e.value.is_empty()) {
            let value = match canonical::decode(&entry.value) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key = %entry.key, error = %e, "returning raw value for undecodable entry");
                    Value::String(String::from_utf8_lossy(&entry.value).into_owned())
                }
            };
            out.push(value);
        }
        tracing::debug!(count = out.len(), "scanned all assets");
        Ok(out)
    }

    /// SHA-256 over the canonical encoding of the whole namespace as a
    /// `{key: stored_text}` object.
    ///
    /// Two world states holding the same keys and bytes produce the same
    /// digest. Empty values are part of the input.
    ///
    /// # Errors
    ///
    /// `CorruptRecord` if any stored value is not UTF-8.
    pub async fn state_digest(&self) -> Result<ContentDigest, RegistryError> {
        let entries = self.state.scan("", "").await?;
        let mut texts = BTreeMap::new();
        for entry in entries {
            let text = String::from_utf8(entry.value).map_err(|e| RegistryError::CorruptRecord {
                id: entry.key.clone(),
                reason: e.to_string(),
            })?;
            texts.insert(entry.key, text);
        }
        let canonical = CanonicalBytes::new(&texts)?;
        Ok(sha256_digest(&canonical))
    }

    /// Whether the world state hashes to `expected`, given as bare hex or in
    /// the `sha256:<hex>` display form.
    ///
    /// # Errors
    ///
    /// `InvalidDigest` if `expected` is not a SHA-256 digest; otherwise as for
    /// [`state_digest`](Self::state_digest).
    pub async fn verify_state_digest(&self, expected: &str) -> Result<bool, RegistryError> {
        let expected = ContentDigest::from_hex(expected)?;
        let actual = self.state_digest().await?;
        let matches = actual == expected;
        tracing::debug!(%expected, %actual, matches, "state digest verified");
        Ok(matches)
    }

    /// Stored bytes for a present key, or `NotFound`.
    async fn read_present(&self, id: &str) -> Result<Vec<u8>, RegistryError> {
        match self.state.get(id).await? {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    /// Canonically encode `record` and store it under `key`.
    async fn write_record<T: Serialize>(
        &self,
        key: &str,
        record: &T,
    ) -> Result<CanonicalBytes, RegistryError> {
        let encoded = CanonicalBytes::new(record)?;
        self.state.put(key, encoded.as_bytes().to_vec()).await?;
        Ok(encoded)
    }
}
