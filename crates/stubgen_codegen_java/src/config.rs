// stubgen_codegen_java/config - Options driving stub rendering
use serde::{Deserialize, Serialize};

/// Configuration options that drive stub source rendering behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubGenConfig {
    /// Indentation string used when pretty-printing rendered Java.
    pub indent: String,
    /// License header comment emitted at the top of every unit, verbatim.
    pub license_header: Option<String>,
    /// Package the `@NonNull`/`@Nullable` marker annotations are rendered
    /// from. Rendered fully qualified so stubs never depend on an import.
    pub nullability_package: String,
    /// Whether Javadoc blocks are carried into the rendered stubs. Disabling
    /// this yields signature-only stubs for compile-classpath use.
    pub emit_doc_comments: bool,
}

impl Default for StubGenConfig {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            license_header: None,
            nullability_package: "androidx.annotation".to_string(),
            emit_doc_comments: true,
        }
    }
}
