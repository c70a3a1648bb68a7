//! Domain model (IDs, choices, decision records, the log, summaries, errors).

pub mod choice;
pub mod errors;
pub mod ids;
pub mod log;
pub mod record;
pub mod summary;

pub use choice::{Choice, ChoiceSet};
pub use errors::{ChaispasError, ErrorKind};
pub use ids::{ChoiceId, DecisionId};
pub use log::{DEFAULT_RETENTION, DecisionLog};
pub use record::{DecisionRecord, MIN_CHOICES};
pub use summary::{AnalyticsSummary, ChoiceCount};
