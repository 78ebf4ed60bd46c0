use crate::{
    error::{ProcessingError, SnapshotError},
    model::{EmptyBeneficiaryPolicy, LedgerSnapshot, SettlementResult},
    ports::SnapshotReader,
    validation::SnapshotValidator,
};
use std::borrow::Cow;
use tallyup_domain::{BalanceEngine, BalanceMap, ExpenseEntry, SettlementPlanner};

/// Runs a snapshot through validation, balance computation and settlement
/// planning.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerProcessor {
    validator: SnapshotValidator,
    engine: BalanceEngine,
    planner: SettlementPlanner,
}

impl LedgerProcessor {
    pub fn new(policy: EmptyBeneficiaryPolicy) -> Self {
        Self {
            validator: SnapshotValidator::new(policy),
            engine: BalanceEngine,
            planner: SettlementPlanner,
        }
    }

    pub fn policy(&self) -> EmptyBeneficiaryPolicy {
        self.validator.policy()
    }

    pub fn calculate_balances(&self, snapshot: &LedgerSnapshot) -> Result<BalanceMap, SnapshotError> {
        let expenses = self.validate(snapshot)?;
        Ok(self
            .engine
            .compute_balances(&snapshot.participants, &expenses))
    }

    pub fn build_settlement_result(
        &self,
        snapshot: &LedgerSnapshot,
    ) -> Result<SettlementResult, SnapshotError> {
        let expenses = self.validate(snapshot)?;

        let balances = self
            .engine
            .compute_summaries(&snapshot.participants, &expenses);
        let balance_map: BalanceMap = balances
            .iter()
            .map(|summary| (summary.id.clone(), summary.balance))
            .collect();
        let transfers = self.planner.compute_transfers(&balance_map);

        tracing::info!(
            participant_count = snapshot.participants.len(),
            expense_count = snapshot.expenses.len(),
            transfer_count = transfers.len(),
            policy = %self.policy(),
            "Settlement computed"
        );

        Ok(SettlementResult {
            balances,
            transfers,
        })
    }

    pub fn load_and_settle(
        &self,
        reader: &dyn SnapshotReader,
    ) -> Result<(LedgerSnapshot, SettlementResult), ProcessingError> {
        let snapshot = reader.read()?;
        let result = self.build_settlement_result(&snapshot)?;
        Ok((snapshot, result))
    }

    fn validate<'s>(
        &self,
        snapshot: &'s LedgerSnapshot,
    ) -> Result<Cow<'s, [ExpenseEntry]>, SnapshotError> {
        self.validator.validate(snapshot).inspect_err(|err| {
            tracing::warn!(
                reject_reason = "invalid_snapshot",
                participant_count = snapshot.participants.len(),
                expense_count = snapshot.expenses.len(),
                error = %err,
                "Snapshot rejected before balance computation"
            );
        })
    }
}
