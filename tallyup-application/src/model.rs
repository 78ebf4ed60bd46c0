use crate::error::UnknownPolicyError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tallyup_domain::{ExpenseEntry, Participant, ParticipantSummary, Transfer};

/// The caller-owned pair of lists the balance engine runs on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
}

impl LedgerSnapshot {
    pub fn new(participants: Vec<Participant>, expenses: Vec<ExpenseEntry>) -> Self {
        Self {
            participants,
            expenses,
        }
    }
}

/// What to do with an expense entry that lists no beneficiaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyBeneficiaryPolicy {
    /// Nobody is charged; the payer keeps the full credit.
    #[default]
    CreditPayer,
    /// The entry is split across every participant in the snapshot.
    SplitAmongAll,
    /// The snapshot is rejected.
    Reject,
}

impl EmptyBeneficiaryPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreditPayer => "credit-payer",
            Self::SplitAmongAll => "split-among-all",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for EmptyBeneficiaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptyBeneficiaryPolicy {
    type Err = UnknownPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "credit-payer" => Ok(Self::CreditPayer),
            "split-among-all" => Ok(Self::SplitAmongAll),
            "reject" => Ok(Self::Reject),
            _ => Err(UnknownPolicyError(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    pub balances: Vec<ParticipantSummary>,
    pub transfers: Vec<Transfer>,
}

impl SettlementResult {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}
