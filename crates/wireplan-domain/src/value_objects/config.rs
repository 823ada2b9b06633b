//! Resolver configuration value objects

use crate::constants::{
    DEFAULT_COLLECTION_TYPE, DEFAULT_LIST_TYPE, DEFAULT_SET_TYPE, DEFAULT_TOP_TYPE,
};
use serde::{Deserialize, Serialize};

/// Nominal names the type matcher treats specially
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnownTypes {
    /// Ordered container; a socket of this erased type is a list multi-socket
    pub list: String,
    /// Unordered unique container; a socket of this erased type is a set multi-socket
    pub set: String,
    /// Generic container; a socket of this erased type is a collection multi-socket
    pub collection: String,
    /// Type every declared type is assignable to
    pub top_type: String,
}

impl Default for KnownTypes {
    fn default() -> Self {
        Self {
            list: DEFAULT_LIST_TYPE.to_string(),
            set: DEFAULT_SET_TYPE.to_string(),
            collection: DEFAULT_COLLECTION_TYPE.to_string(),
            top_type: DEFAULT_TOP_TYPE.to_string(),
        }
    }
}

/// Resolver behaviour switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Well-known container and top types
    pub known_types: KnownTypes,
    /// Resolve modules of one import level, and sockets of one module, on the rayon pool
    pub parallel: bool,
    /// Skip re-exploring beans already reached from the same predecessor during cycle search
    pub memoize_cycle_search: bool,
    /// Warn about socket beans and override sockets of modules nobody imports
    pub warn_on_unresolved_root_sockets: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            known_types: KnownTypes::default(),
            parallel: true,
            memoize_cycle_search: false,
            warn_on_unresolved_root_sockets: false,
        }
    }
}
