//! Diagnostic Definition Macro
//!
//! Provides a declarative macro for defining diagnostic enums with
//! automatic trait implementations.
//!
//! # Example
//!
//! ```ignore
//! define_diagnostics! {
//!     pub enum WiringDiagnostic {
//!         #[diagnostic(
//!             id = "WIRE001",
//!             category = Resolution,
//!             severity = Error,
//!             message = "Missing required dependency {element}: no bean of type {required_type}"
//!         )]
//!         MissingRequiredDependency {
//!             element: QualifiedName,
//!             required_type: String,
//!         },
//!     }
//! }
//! ```

/// Macro to define diagnostic enums with automatic trait implementations
///
/// This macro generates:
/// - The enum with all variants
/// - `Display` implementation with formatted messages
/// - `Diagnostic` trait implementation
///
/// # Parameters
///
/// - `$vis`: Visibility modifier (pub, pub(crate), etc.)
/// - `$name`: Name of the enum
/// - For each variant:
///   - `id`: Unique diagnostic identifier (e.g., "WIRE001")
///   - `category`: A `DiagnosticCategory` variant
///   - `severity`: Error or Warning
///   - `message`: Display message; every field must appear as a `{field}` placeholder
///   - `suggestion` (optional): Suggested fix, plain text
///   - Fields must include `element: QualifiedName`, the element the diagnostic concerns
#[macro_export]
macro_rules! define_diagnostics {
    (
        $vis:vis enum $name:ident {
            $(
                #[diagnostic(
                    id = $id:literal,
                    category = $category:ident,
                    severity = $severity:ident,
                    message = $msg:literal
                    $(, suggestion = $suggestion:literal)?
                )]
                $variant:ident {
                    $( $field:ident : $field_ty:ty ),* $(,)?
                }
            ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $variant { $( $field: $field_ty ),* } ),*
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant { $( $field ),* } => {
                            write!(f, $msg, $( $field = $field ),*)
                        }
                    ),*
                }
            }
        }

        impl $crate::diagnostic::Diagnostic for $name {
            fn id(&self) -> &str {
                match self {
                    $( Self::$variant { .. } => $id ),*
                }
            }

            fn category(&self) -> $crate::diagnostic::DiagnosticCategory {
                match self {
                    $( Self::$variant { .. } => $crate::diagnostic::DiagnosticCategory::$category ),*
                }
            }

            fn severity(&self) -> $crate::diagnostic::Severity {
                match self {
                    $( Self::$variant { .. } => $crate::diagnostic::Severity::$severity ),*
                }
            }

            fn element(&self) -> &wireplan_domain::QualifiedName {
                match self {
                    $( Self::$variant { element, .. } => element ),*
                }
            }

            fn suggestion(&self) -> Option<String> {
                match self {
                    $(
                        Self::$variant { .. } => {
                            $crate::define_diagnostics!(@suggestion $($suggestion)?)
                        }
                    ),*
                }
            }
        }
    };

    // Suggestion helper - with suggestion text
    (@suggestion $suggestion:literal) => {
        Some($suggestion.to_string())
    };

    // Suggestion helper - no suggestion
    (@suggestion) => {
        None
    };
}
