//! # assetreg-registry — Asset Registry Transaction Handlers
//!
//! Implements the asset registry as a set of transaction handlers that read
//! and write single records through an injected key-value world state.
//!
//! ## Modules
//!
//! - **World state** (`world_state.rs`): the `WorldState` port the host ledger
//!   supplies (`get`, `put`, `delete`, `scan`) and its `StoreError`.
//!
//! - **Memory** (`memory.rs`): an in-memory `WorldState` adapter ordered by
//!   key, used by the CLI host and by tests.
//!
//! - **Snapshot** (`snapshot.rs`): loads and saves a `MemoryWorldState` as a
//!   canonical JSON file.
//!
//! - **Asset** (`asset.rs`): the fixed-field `Asset` record and the
//!   `TransferOutcome` returned by transfers.
//!
//! - **Seed** (`seed.rs`): the fixed record set written by `init_ledger`.
//!
//! - **Registry** (`registry.rs`): `AssetRegistry`, one method per
//!   transaction handler.
//!
//! ## Design
//!
//! The registry holds nothing but its store handle. Every handler re-reads
//! from the store, and every write goes through `CanonicalBytes`, so two
//! nodes running the same transactions end with byte-identical state.

pub mod asset;
pub mod error;
pub mod memory;
pub mod registry;
pub mod seed;
pub mod snapshot;
pub mod world_state;

pub use asset::{Asset, DocType, TransferOutcome};
pub use error::RegistryError;
pub use memory::MemoryWorldState;
pub use registry::AssetRegistry;
pub use seed::seed_assets;
pub use snapshot::{Snapshot, SnapshotError};
pub use world_state::{StateEntry, StoreError, StoreOperation, WorldState};
