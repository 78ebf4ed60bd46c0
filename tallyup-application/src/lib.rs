#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_processor;
pub mod model;
pub mod ports;
pub mod validation;

pub use error::{ProcessingError, SnapshotError, SnapshotLoadError, UnknownPolicyError};
pub use ledger_processor::LedgerProcessor;
pub use model::{EmptyBeneficiaryPolicy, LedgerSnapshot, SettlementResult};
pub use ports::{ParticipantDirectory, SnapshotReader};
pub use validation::SnapshotValidator;
