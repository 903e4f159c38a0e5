// Application layer - use cases on top of the in-memory ledger.
// Mutating and persisting are separate calls.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
