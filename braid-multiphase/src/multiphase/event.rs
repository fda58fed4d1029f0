use braid_core::schema::Role;

/// Diagnostic event emitted while composing phases.
///
/// Events are informational: none of them aborts or alters the
/// composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Model names were not unique across phases, so every phase's name was
    /// suffixed with its zero-based index.
    ModelsRenamed {
        original: Vec<String>,
        renamed: Vec<String>,
    },
    /// A phase carries non-default fields outside its position's role.
    /// The fields stay in place but the solver hand-off ignores them.
    IgnoredFields {
        phase: usize,
        role: Role,
        fields: Vec<&'static str>,
    },
    /// A phase's view passed single-phase normalization.
    PhaseNormalized { phase: usize },
}

/// Non-default fields found outside their phase's position, per phase and
/// role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredFields {
    pub phase: usize,
    pub role: Role,
    pub fields: Vec<&'static str>,
}

/// Original and rewritten model names after deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedModels {
    pub original: Vec<String>,
    pub renamed: Vec<String>,
}

/// Diagnostics gathered by a successful composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Present only if model names had to be deduplicated.
    pub renamed_models: Option<RenamedModels>,
    /// One entry per phase and role where out-of-position fields were found.
    pub ignored_fields: Vec<IgnoredFields>,
}
