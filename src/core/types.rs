use serde::{Deserialize, Serialize};

/// Deterministic key identifying a submitted genomic location
///
/// Rendered as `chromosome,start,end,reference,variant`, which is also the
/// form Genome Nexus echoes back in `originalVariantQuery`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorrelationKey(pub String);

impl CorrelationKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a record could not be annotated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The service returned a result for this location but flagged it as not annotatable
    Unsuccessful { key: CorrelationKey },
    /// No returned result could be correlated with this location
    Unmatched { key: CorrelationKey },
}

impl FailureReason {
    /// The genomic-location key of the failed record
    #[must_use]
    pub fn key(&self) -> &CorrelationKey {
        match self {
            Self::Unsuccessful { key } | Self::Unmatched { key } => key,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsuccessful { key } => {
                write!(f, "Unsuccessful annotation for genomic location {key}")
            }
            Self::Unmatched { key } => {
                write!(f, "No annotation returned for genomic location {key}")
            }
        }
    }
}

/// Terminal annotation state of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationStatus {
    Success,
    Failed { reason: FailureReason },
}

impl AnnotationStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// True when no returned result was assigned to the record
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        match self {
            Self::Failed { reason } => matches!(reason, FailureReason::Unmatched { .. }),
            Self::Success => false,
        }
    }

    /// Label written to the `Annotation_Status` column
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed { .. } => "FAILED",
        }
    }
}

impl std::fmt::Display for AnnotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failed { reason } => write!(f, "FAILED ({reason})"),
        }
    }
}

/// How reference and tumor alleles are reconciled with the annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StripMode {
    /// Use the normalized alleles echoed by the annotation service
    #[default]
    All,
    /// Strip a single leading matching base (legacy MAF convention)
    First,
    /// Keep the input alleles unstripped
    None,
}

impl std::fmt::Display for StripMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::First => write!(f, "first"),
            Self::None => write!(f, "none"),
        }
    }
}
