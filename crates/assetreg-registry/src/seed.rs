//! Seed records written by `AssetRegistry::init_ledger`.

use crate::asset::Asset;

/// The fixed seed set, in write order. Every record carries `docType = "asset"`.
pub fn seed_assets() -> Vec<Asset> {
    vec![
        Asset::new("asset1", "Chess", "Tomoko", "player", 300).tagged(),
        Asset::new("asset2", "Go", "Brad", "player", 400).tagged(),
        Asset::new("asset3", "Poker", "Jin Soo", "dealer", 500).tagged(),
        Asset::new("asset4", "Bridge", "Max", "player", 600).tagged(),
        Asset::new("asset5", "Checkers", "Adriana", "club", 700).tagged(),
        Asset::new("asset6", "Backgammon", "Michel", "club", 800).tagged(),
    ]
}
