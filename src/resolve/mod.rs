//! Resolution of annotation responses into record fields.
//!
//! - [`allele`]: tumor allele resolution and reference/alt reconciliation
//! - [`transcript`]: canonical transcript selection
//! - [`fields`]: one fallback cascade per output field
//! - [`patterns`]: compiled patterns shared by the resolvers
//!
//! Everything here is pure: the same annotation, query and record always
//! resolve to the same values.

pub mod allele;
pub mod fields;
pub mod patterns;
pub mod transcript;

pub use allele::{is_ambiguous_indel, resolve_alt_allele, resolve_reference_and_alt};
pub use fields::{format_score, resolve_fields, ResolvedFields};
pub use patterns::ResolverPatterns;
pub use transcript::select_canonical;
