use tallyup_domain::{ExpenseId, Money, ParticipantId};
use thiserror::Error;

/// A snapshot that cannot be handed to the balance engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("participant `{id}` is declared more than once")]
    DuplicateParticipant { id: ParticipantId },
    #[error("expense `{id}` is declared more than once")]
    DuplicateExpense { id: ExpenseId },
    #[error("expense `{expense}` is paid by unknown participant `{participant}`")]
    UnknownPayer {
        expense: ExpenseId,
        participant: ParticipantId,
    },
    #[error("expense `{expense}` lists unknown beneficiary `{participant}`")]
    UnknownBeneficiary {
        expense: ExpenseId,
        participant: ParticipantId,
    },
    #[error("expense `{expense}` lists beneficiary `{participant}` more than once")]
    DuplicateBeneficiary {
        expense: ExpenseId,
        participant: ParticipantId,
    },
    #[error("expense `{expense}` has a negative amount ({amount})")]
    NegativeAmount { expense: ExpenseId, amount: Money },
    #[error("expense `{expense}` has no beneficiaries")]
    EmptyBeneficiaries { expense: ExpenseId },
    #[error("expense `{expense}` pushes the snapshot total out of range")]
    AmountOutOfRange { expense: ExpenseId },
}

#[derive(Debug, Error)]
pub enum SnapshotLoadError {
    #[error("failed to read snapshot from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot at line {line}, column {column}: {detail}")]
    Parse {
        line: usize,
        column: usize,
        detail: String,
    },
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Load(#[from] SnapshotLoadError),
    #[error(transparent)]
    Invalid(#[from] SnapshotError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown empty-beneficiary policy `{0}` (expected credit-payer, split-among-all or reject)")]
pub struct UnknownPolicyError(pub String);
