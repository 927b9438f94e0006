pub mod use_cases;

pub use use_cases::converter::{Converter, ParseOutcome};
pub use use_cases::store::{CanonicalStore, LoadOutcome};
