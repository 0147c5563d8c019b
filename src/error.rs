use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "tools.search.input_schema", "extra_denied_keywords[2]")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "canonicalizer", "mcp_bridge")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for tool adaptation.
///
/// Schema problems surface at adaptation time; execution problems surface at
/// call time exactly as the underlying tool reported them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Schema canonicalization error: {message}{}", format_context(.context))]
    Canonicalization {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Tool execution error: {message}{}", format_context(.context))]
    Execution {
        message: String,
        context: ErrorContext,
    },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool has no execution function: {0}")]
    NotExecutable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a canonicalization error without context.
    pub fn canonicalization(msg: impl Into<String>) -> Self {
        Self::canonicalization_with_context(msg, ErrorContext::new())
    }

    /// Create a canonicalization error with structured context
    pub fn canonicalization_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Canonicalization {
            message: msg.into(),
            context,
        }
    }

    /// Create a configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create an execution error without context.
    ///
    /// Tool implementations return this to signal a failed call.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::execution_with_context(msg, ErrorContext::new())
    }

    /// Create an execution error with structured context
    pub fn execution_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Execution {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Canonicalization { context, .. }
            | Error::Configuration { context, .. }
            | Error::Execution { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Attach a field path to a context-carrying error; other variants are returned as is.
    pub(crate) fn at_field(mut self, path: impl Into<String>) -> Self {
        match &mut self {
            Error::Canonicalization { context, .. }
            | Error::Configuration { context, .. }
            | Error::Execution { context, .. } => {
                if context.field_path.is_none() {
                    context.field_path = Some(path.into());
                }
            }
            _ => {}
        }
        self
    }
}
