#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    BalanceAccumulator, BalanceMap, ExpenseEntry, ExpenseId, Money, Participant, ParticipantId,
    ParticipantSummary, SETTLEMENT_EPSILON, Settlement, Transfer, apply_transfers,
};
pub use services::{BalanceEngine, SettlementPlanner};

/// Net balance per participant (positive = owed money), keyed in participant
/// order.
pub fn compute_balances(participants: &[Participant], expenses: &[ExpenseEntry]) -> BalanceMap {
    BalanceEngine.compute_balances(participants, expenses)
}

/// Debtor-to-creditor transfers that settle `balances`.
pub fn compute_transfers(balances: &BalanceMap) -> Vec<Transfer> {
    SettlementPlanner.compute_transfers(balances)
}
