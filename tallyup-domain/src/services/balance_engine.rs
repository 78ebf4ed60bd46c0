use crate::model::{
    BalanceAccumulator, BalanceMap, ExpenseEntry, Money, Participant, ParticipantId,
    ParticipantSummary,
};

/// Balance computation service
///
/// Balances are `paid - owed`: positive means the participant is owed money.
/// An entry without beneficiaries charges nobody and still credits its payer.
///
/// Every payer and beneficiary is expected to name a participant in the
/// snapshot. Unknown ids are appended to the result rather than dropped so the
/// totals stay zero-sum, but callers should reject such snapshots up front.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceEngine;

impl BalanceEngine {
    /// Sum of `amount / |beneficiaries|` over every entry the participant
    /// benefits from, counted once per listing.
    pub fn compute_share(&self, participant_id: &ParticipantId, expenses: &[ExpenseEntry]) -> Money {
        expenses
            .iter()
            .map(|entry| {
                let listings = entry
                    .beneficiaries
                    .iter()
                    .filter(|beneficiary| *beneficiary == participant_id)
                    .count();
                entry.share_per_beneficiary().times(listings)
            })
            .sum()
    }

    /// Sum of the amounts the participant paid.
    pub fn compute_paid(&self, participant_id: &ParticipantId, expenses: &[ExpenseEntry]) -> Money {
        expenses
            .iter()
            .filter(|entry| entry.paid_by == *participant_id)
            .map(|entry| entry.amount)
            .sum()
    }

    /// Net balance per participant, keyed in participant order.
    pub fn compute_balances(
        &self,
        participants: &[Participant],
        expenses: &[ExpenseEntry],
    ) -> BalanceMap {
        self.accumulate(participants, expenses).into_balances()
    }

    /// Paid / owed / balance breakdown per participant, in participant order.
    pub fn compute_summaries(
        &self,
        participants: &[Participant],
        expenses: &[ExpenseEntry],
    ) -> Vec<ParticipantSummary> {
        self.accumulate(participants, expenses).into_summaries()
    }

    fn accumulate(&self, participants: &[Participant], expenses: &[ExpenseEntry]) -> BalanceAccumulator {
        let mut accumulator =
            BalanceAccumulator::new_with_members(participants.iter().map(|participant| &participant.id));
        for entry in expenses {
            accumulator.apply(entry);
        }

        tracing::debug!(
            participant_count = participants.len(),
            expense_count = expenses.len(),
            "Balances computed"
        );

        accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn engine() -> BalanceEngine {
        BalanceEngine
    }

    #[fixture]
    fn trio() -> Vec<Participant> {
        vec![
            Participant::new("A", "Alice"),
            Participant::new("B", "Bob"),
            Participant::new("C", "Carol"),
        ]
    }

    fn balances_of(balances: &BalanceMap) -> Vec<(&str, Money)> {
        balances
            .iter()
            .map(|(id, balance)| (id.as_str(), *balance))
            .collect()
    }

    #[rstest]
    #[case::single_payer(
        vec![ExpenseEntry::new("e1", Money::from_i64(30), "A", ["A", "B", "C"])],
        vec![("A", 20), ("B", -10), ("C", -10)]
    )]
    #[case::degenerate_expense(
        vec![ExpenseEntry::new("e1", Money::from_i64(50), "A", Vec::<&str>::new())],
        vec![("A", 50), ("B", 0), ("C", 0)]
    )]
    #[case::payer_not_beneficiary(
        vec![ExpenseEntry::new("e1", Money::from_i64(40), "B", ["A", "C"])],
        vec![("A", -20), ("B", 40), ("C", -20)]
    )]
    #[case::offsetting_expenses(
        vec![
            ExpenseEntry::new("e1", Money::from_i64(60), "A", ["A", "B"]),
            ExpenseEntry::new("e2", Money::from_i64(60), "B", ["A", "B"]),
        ],
        vec![("A", 0), ("B", 0), ("C", 0)]
    )]
    #[case::no_expenses(vec![], vec![("A", 0), ("B", 0), ("C", 0)])]
    fn compute_balances_cases(
        engine: BalanceEngine,
        trio: Vec<Participant>,
        #[case] expenses: Vec<ExpenseEntry>,
        #[case] expected: Vec<(&str, i64)>,
    ) {
        let balances = engine.compute_balances(&trio, &expenses);

        let expected: Vec<(&str, Money)> = expected
            .into_iter()
            .map(|(id, amount)| (id, Money::from_i64(amount)))
            .collect();
        assert_eq!(balances_of(&balances), expected);
    }

    #[rstest]
    fn compute_share_divides_by_beneficiary_count(engine: BalanceEngine) {
        let expenses = [
            ExpenseEntry::new("e1", Money::from_i64(30), "A", ["A", "B", "C"]),
            ExpenseEntry::new("e2", Money::from_i64(10), "C", ["B", "C"]),
            ExpenseEntry::new("e3", Money::from_i64(99), "C", Vec::<&str>::new()),
        ];

        assert_eq!(
            engine.compute_share(&ParticipantId::new("B"), &expenses),
            Money::from_i64(15)
        );
        assert_eq!(
            engine.compute_share(&ParticipantId::new("A"), &expenses),
            Money::from_i64(10)
        );
        assert_eq!(
            engine.compute_paid(&ParticipantId::new("C"), &expenses),
            Money::from_i64(109)
        );
    }

    #[rstest]
    fn summaries_agree_with_per_participant_queries(engine: BalanceEngine, trio: Vec<Participant>) {
        let expenses = [
            ExpenseEntry::new("e1", Money::from_i64(100), "A", ["A", "B", "C"]),
            ExpenseEntry::new("e2", Money::new(1250, 2), "B", ["C"]),
        ];

        let summaries = engine.compute_summaries(&trio, &expenses);

        for summary in &summaries {
            assert_eq!(summary.paid, engine.compute_paid(&summary.id, &expenses));
            assert_eq!(summary.owed, engine.compute_share(&summary.id, &expenses));
            assert_eq!(summary.balance, summary.paid - summary.owed);
        }
        assert_eq!(summaries[1].paid.as_decimal(), dec!(12.50));
    }

    #[rstest]
    fn thirds_stay_within_epsilon_of_zero(engine: BalanceEngine, trio: Vec<Participant>) {
        let expenses = [ExpenseEntry::new("e1", Money::from_i64(100), "A", ["A", "B", "C"])];

        let total: Money = engine.compute_balances(&trio, &expenses).values().sum();

        assert!(total.is_negligible());
    }

    #[rstest]
    fn unknown_participants_are_appended(engine: BalanceEngine) {
        let participants = [Participant::new("A", "Alice")];
        let expenses = [ExpenseEntry::new("e1", Money::from_i64(20), "A", ["A", "Z"])];

        let balances = engine.compute_balances(&participants, &expenses);

        assert_eq!(
            balances_of(&balances),
            vec![("A", Money::from_i64(10)), ("Z", Money::from_i64(-10))]
        );
    }
}
