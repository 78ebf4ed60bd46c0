//! Greedy settlement of net balances.
//!
//! Debtors are matched against creditors with two cursors:
//! 1. Debtors are ordered most negative first, creditors largest first. Both
//!    sorts are stable, so equal balances keep balance-map order.
//! 2. Each step moves `min(owed, credit)` from the current debtor to the
//!    current creditor and advances every cursor whose remainder reached zero.
//! 3. Steps whose amount does not exceed [`SETTLEMENT_EPSILON`] are consumed
//!    without emitting a transfer.
//!
//! Each step retires at least one side and the final step retires both, so the
//! plan never has more than `debtors + creditors - 1` transfers.

use crate::model::{
    BalanceMap, Money, ParticipantId, SETTLEMENT_EPSILON, Settlement, Transfer, apply_transfers,
};
use std::cmp::Reverse;

/// Settlement planning service
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementPlanner;

struct Position<'a> {
    id: &'a ParticipantId,
    remaining: Money,
}

impl SettlementPlanner {
    /// Plans the transfers that bring every balance to zero.
    ///
    /// The balances are expected to sum to zero. Otherwise the plan stops as
    /// soon as either side runs out and the remainder stays unsettled.
    pub fn compute_transfers(&self, balances: &BalanceMap) -> Vec<Transfer> {
        let total: Money = balances.values().sum();
        if !total.is_negligible() {
            tracing::warn!(
                reject_reason = "input_imbalance",
                member_count = balances.len(),
                total = %total,
                epsilon = %SETTLEMENT_EPSILON,
                "Settlement input does not sum to zero; residual balances will remain"
            );
        }

        let mut debtors: Vec<(&ParticipantId, Money)> = Vec::new();
        let mut creditors: Vec<(&ParticipantId, Money)> = Vec::new();
        for (id, &balance) in balances {
            if balance.is_negative() {
                debtors.push((id, balance));
            } else if balance.is_positive() {
                creditors.push((id, balance));
            }
        }

        // `sort_by_key` is stable: ties keep balance-map order.
        debtors.sort_by_key(|&(_, balance)| balance);
        creditors.sort_by_key(|&(_, balance)| Reverse(balance));

        let mut debtors: Vec<Position<'_>> = debtors
            .into_iter()
            .map(|(id, balance)| Position {
                id,
                remaining: balance.abs(),
            })
            .collect();
        let mut creditors: Vec<Position<'_>> = creditors
            .into_iter()
            .map(|(id, remaining)| Position { id, remaining })
            .collect();

        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
        let mut suppressed = 0usize;
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];

            let amount = debtor.remaining.min(creditor.remaining);
            if amount > SETTLEMENT_EPSILON {
                transfers.push(Transfer {
                    from: debtor.id.clone(),
                    to: creditor.id.clone(),
                    amount,
                });
            } else {
                suppressed += 1;
            }

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if debtor.remaining.is_zero() {
                i += 1;
            }
            if creditor.remaining.is_zero() {
                j += 1;
            }
        }

        tracing::debug!(
            debtor_count = debtors.len(),
            creditor_count = creditors.len(),
            transfer_count = transfers.len(),
            suppressed_count = suppressed,
            "Settlement planned"
        );

        transfers
    }

    /// Plans transfers and replays them, returning the residual balances.
    ///
    /// Suppressed steps stay on the books, so one participant can be left with
    /// several sub-epsilon amounts that together exceed [`SETTLEMENT_EPSILON`].
    /// A warning is logged when that happens.
    pub fn settle(&self, balances: BalanceMap) -> Settlement {
        let transfers = self.compute_transfers(&balances);

        let mut new_balances = balances;
        apply_transfers(&mut new_balances, &transfers);

        let unsettled = new_balances
            .values()
            .filter(|balance| !balance.is_negligible())
            .count();
        if unsettled > 0 {
            tracing::warn!(
                unsettled_count = unsettled,
                member_count = new_balances.len(),
                epsilon = %SETTLEMENT_EPSILON,
                "Residual balances exceed epsilon after settlement"
            );
        }

        Settlement {
            new_balances,
            transfers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn planner() -> SettlementPlanner {
        SettlementPlanner
    }

    fn balances(entries: &[(&str, Money)]) -> BalanceMap {
        entries
            .iter()
            .map(|(id, balance)| (ParticipantId::new(*id), *balance))
            .collect()
    }

    fn whole(entries: &[(&str, i64)]) -> BalanceMap {
        entries
            .iter()
            .map(|(id, balance)| (ParticipantId::new(*id), Money::from_i64(*balance)))
            .collect()
    }

    fn transfers(expected: Vec<(&str, &str, i64)>) -> Vec<Transfer> {
        expected
            .into_iter()
            .map(|(from, to, amount)| Transfer {
                from: ParticipantId::new(from),
                to: ParticipantId::new(to),
                amount: Money::from_i64(amount),
            })
            .collect()
    }

    #[rstest]
    #[case::empty(whole(&[]), vec![])]
    #[case::all_zero(whole(&[("A", 0), ("B", 0)]), vec![])]
    #[case::single_payer(
        whole(&[("A", 20), ("B", -10), ("C", -10)]),
        vec![("B", "A", 10), ("C", "A", 10)]
    )]
    #[case::largest_debtor_first(
        whole(&[("A", -10), ("B", -30), ("C", 40)]),
        vec![("B", "C", 30), ("A", "C", 10)]
    )]
    #[case::largest_creditor_first(
        whole(&[("A", 10), ("B", 30), ("C", -40)]),
        vec![("C", "B", 30), ("C", "A", 10)]
    )]
    #[case::debtor_spans_creditors(
        whole(&[("A", 25), ("B", -100), ("C", 75)]),
        vec![("B", "C", 75), ("B", "A", 25)]
    )]
    #[case::simultaneous_exhaustion(
        whole(&[("A", 50), ("B", -50), ("C", 20), ("D", -20)]),
        vec![("B", "A", 50), ("D", "C", 20)]
    )]
    #[case::ties_keep_map_order(
        whole(&[("D", -5), ("A", 5), ("C", -5), ("B", 5)]),
        vec![("D", "A", 5), ("C", "B", 5)]
    )]
    fn compute_transfers_cases(
        planner: SettlementPlanner,
        #[case] input: BalanceMap,
        #[case] expected: Vec<(&str, &str, i64)>,
    ) {
        assert_eq!(planner.compute_transfers(&input), transfers(expected));
    }

    #[rstest]
    fn below_threshold_noise_is_not_emitted(planner: SettlementPlanner) {
        let input = balances(&[("A", Money::new(-5, 3)), ("B", Money::new(5, 3))]);

        assert!(planner.compute_transfers(&input).is_empty());
    }

    #[rstest]
    fn amount_at_threshold_is_not_emitted(planner: SettlementPlanner) {
        let input = balances(&[("A", SETTLEMENT_EPSILON), ("B", -SETTLEMENT_EPSILON)]);

        assert!(planner.compute_transfers(&input).is_empty());
    }

    #[rstest]
    fn fractional_balances_settle(planner: SettlementPlanner) {
        let input = balances(&[
            ("A", Money::from_decimal(dec!(66.67))),
            ("B", Money::from_decimal(dec!(-33.33))),
            ("C", Money::from_decimal(dec!(-33.34))),
        ]);

        let planned = planner.compute_transfers(&input);

        assert_eq!(
            planned,
            vec![
                Transfer {
                    from: ParticipantId::new("C"),
                    to: ParticipantId::new("A"),
                    amount: Money::from_decimal(dec!(33.34)),
                },
                Transfer {
                    from: ParticipantId::new("B"),
                    to: ParticipantId::new("A"),
                    amount: Money::from_decimal(dec!(33.33)),
                },
            ]
        );
    }

    #[rstest]
    fn settle_leaves_only_negligible_residuals(planner: SettlementPlanner) {
        let third = Money::from_i64(100).split(3);
        let input = balances(&[("A", third + third), ("B", -third), ("C", -third)]);

        let settlement = planner.settle(input);

        assert_eq!(settlement.transfers.len(), 2);
        assert!(
            settlement
                .new_balances
                .values()
                .all(|balance| balance.is_negligible())
        );
    }

    #[rstest]
    fn suppressed_steps_can_accumulate_on_one_creditor(planner: SettlementPlanner) {
        let cent = SETTLEMENT_EPSILON;
        let input = balances(&[
            ("A", Money::new(3, 2)),
            ("B", -cent),
            ("C", -cent),
            ("D", -cent),
        ]);

        let settlement = planner.settle(input.clone());

        assert!(settlement.transfers.is_empty());
        assert_eq!(settlement.new_balances, input);
        assert!(!settlement.new_balances[&ParticipantId::new("A")].is_negligible());
    }

    #[rstest]
    fn imbalanced_input_stops_when_one_side_runs_out(planner: SettlementPlanner) {
        let input = whole(&[("A", 30), ("B", -50)]);

        let settlement = planner.settle(input);

        assert_eq!(settlement.transfers, transfers(vec![("B", "A", 30)]));
        assert_eq!(
            settlement.new_balances.get(&ParticipantId::new("B")),
            Some(&Money::from_i64(-20))
        );
    }
}
