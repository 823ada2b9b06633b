//! Domain layer constants
//!
//! Naming and type constants shared by the domain model and the resolver.
//! Infrastructure-specific constants remain in the infrastructure crate.

// ============================================================================
// QUALIFIED NAME CONSTANTS
// ============================================================================

/// Separator between the module, bean and socket segments of a qualified name
pub const NAME_SEPARATOR: char = ':';

/// Separator between the parts of a dotted segment (module packages, nested beans)
pub const PATH_SEPARATOR: char = '.';

/// Maximum number of segments in a qualified name (module, bean, socket)
pub const MAX_NAME_SEGMENTS: usize = 3;

/// Socket name given to the optional socket paired with an overridable bean
pub const OVERRIDE_SOCKET_NAME: &str = "override";

// ============================================================================
// WELL-KNOWN TYPE DEFAULTS
// ============================================================================

/// Default nominal name of the list container type
pub const DEFAULT_LIST_TYPE: &str = "java.util.List";

/// Default nominal name of the set container type
pub const DEFAULT_SET_TYPE: &str = "java.util.Set";

/// Default nominal name of the generic collection container type
pub const DEFAULT_COLLECTION_TYPE: &str = "java.util.Collection";

/// Default nominal name of the type every declared type is assignable to
pub const DEFAULT_TOP_TYPE: &str = "java.lang.Object";
