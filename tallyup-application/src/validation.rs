use crate::{
    error::SnapshotError,
    model::{EmptyBeneficiaryPolicy, LedgerSnapshot},
};
use fxhash::FxHashSet;
use std::borrow::Cow;
use tallyup_domain::{ExpenseEntry, Money, ParticipantId};

/// Boundary checks run once before a snapshot reaches the balance engine.
///
/// Rejects duplicate ids, negative amounts and any payer or beneficiary that
/// is not a participant, then applies the empty-beneficiary policy. Entries
/// are only rewritten under [`EmptyBeneficiaryPolicy::SplitAmongAll`].
///
/// The sum of all amounts must be representable. Every paid total, owed total
/// and balance the engine derives is bounded by it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotValidator {
    policy: EmptyBeneficiaryPolicy,
}

impl SnapshotValidator {
    pub fn new(policy: EmptyBeneficiaryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> EmptyBeneficiaryPolicy {
        self.policy
    }

    pub fn validate<'s>(
        &self,
        snapshot: &'s LedgerSnapshot,
    ) -> Result<Cow<'s, [ExpenseEntry]>, SnapshotError> {
        let mut participant_ids: FxHashSet<&ParticipantId> = FxHashSet::default();
        for participant in &snapshot.participants {
            if !participant_ids.insert(&participant.id) {
                return Err(SnapshotError::DuplicateParticipant {
                    id: participant.id.clone(),
                });
            }
        }

        let mut expense_ids = FxHashSet::default();
        let mut degenerate = 0usize;
        let mut total = Money::ZERO;
        for entry in &snapshot.expenses {
            if !expense_ids.insert(&entry.id) {
                return Err(SnapshotError::DuplicateExpense {
                    id: entry.id.clone(),
                });
            }
            if entry.amount.is_negative() {
                return Err(SnapshotError::NegativeAmount {
                    expense: entry.id.clone(),
                    amount: entry.amount,
                });
            }
            total = total.checked_add(entry.amount).ok_or_else(|| {
                SnapshotError::AmountOutOfRange {
                    expense: entry.id.clone(),
                }
            })?;
            if !participant_ids.contains(&entry.paid_by) {
                return Err(SnapshotError::UnknownPayer {
                    expense: entry.id.clone(),
                    participant: entry.paid_by.clone(),
                });
            }

            let mut seen = FxHashSet::default();
            for beneficiary in &entry.beneficiaries {
                if !participant_ids.contains(beneficiary) {
                    return Err(SnapshotError::UnknownBeneficiary {
                        expense: entry.id.clone(),
                        participant: beneficiary.clone(),
                    });
                }
                if !seen.insert(beneficiary) {
                    return Err(SnapshotError::DuplicateBeneficiary {
                        expense: entry.id.clone(),
                        participant: beneficiary.clone(),
                    });
                }
            }

            if entry.beneficiaries.is_empty() {
                if self.policy == EmptyBeneficiaryPolicy::Reject {
                    return Err(SnapshotError::EmptyBeneficiaries {
                        expense: entry.id.clone(),
                    });
                }
                degenerate += 1;
            }
        }

        if degenerate == 0 || self.policy != EmptyBeneficiaryPolicy::SplitAmongAll {
            return Ok(Cow::Borrowed(&snapshot.expenses));
        }

        tracing::debug!(
            degenerate_count = degenerate,
            participant_count = snapshot.participants.len(),
            "Splitting beneficiary-less expenses among all participants"
        );

        let everyone: Vec<ParticipantId> = snapshot
            .participants
            .iter()
            .map(|participant| participant.id.clone())
            .collect();
        let expenses = snapshot
            .expenses
            .iter()
            .map(|entry| {
                if entry.beneficiaries.is_empty() {
                    ExpenseEntry {
                        beneficiaries: everyone.clone(),
                        ..entry.clone()
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();

        Ok(Cow::Owned(expenses))
    }
}
