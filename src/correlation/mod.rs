//! Correlation of annotation responses with submitted records.
//!
//! - [`CorrelationStrategy`]: policy that assigns response elements to query indices
//! - [`KeyedCorrelation`]: match on the echoed genomic-location key (default)
//! - [`PositionalCorrelation`]: pair by position (legacy protocol)
//! - [`mutator`]: write resolved fields or a failure status onto a record
//!
//! ## Keyed correlation
//!
//! Each submitted query derives a key `chromosome,start,end,reference,variant`.
//! The key index is built for all queries before any result is examined; each
//! result echoing a known key is then assigned to every record submitted under
//! that key. Records without a result end the cycle marked as unmatched.

pub mod engine;
pub mod mutator;

pub use engine::{
    Correlation, CorrelationPolicy, CorrelationStrategy, CountMismatch, KeyedCorrelation,
    PositionalCorrelation, Uncorrelated,
};
