//! Entity extraction for clinical notes.
//!
//! Two independent taggers (a clinical-domain one and a general-purpose one)
//! plus a regex age detector feed an [`EntityReconciler`], which resolves
//! their overlapping spans into one deduplicated [`EntitySet`] per note.

mod age;
mod classifier;
pub mod config;
pub mod overlap;
mod pipeline;
mod reconciler;
mod types;

pub use age::*;
pub use classifier::*;
pub use config::*;
pub use overlap::spans_overlap;
pub use pipeline::*;
pub use reconciler::*;
pub use types::*;
