use tallyup_application::SnapshotError;

pub fn format_snapshot_error(error: &SnapshotError) -> String {
    let detail = match error {
        SnapshotError::DuplicateParticipant { id } => tallyup_i18n::duplicate_participant(id),
        SnapshotError::DuplicateExpense { id } => tallyup_i18n::duplicate_expense(id),
        SnapshotError::UnknownPayer {
            expense,
            participant,
        } => tallyup_i18n::unknown_payer(expense, participant),
        SnapshotError::UnknownBeneficiary {
            expense,
            participant,
        } => tallyup_i18n::unknown_beneficiary(expense, participant),
        SnapshotError::DuplicateBeneficiary {
            expense,
            participant,
        } => tallyup_i18n::duplicate_beneficiary(expense, participant),
        SnapshotError::NegativeAmount { expense, amount } => {
            tallyup_i18n::negative_amount(expense, amount)
        }
        SnapshotError::EmptyBeneficiaries { expense } => {
            tallyup_i18n::empty_beneficiaries(expense)
        }
        SnapshotError::AmountOutOfRange { expense } => tallyup_i18n::amount_out_of_range(expense),
    };
    format!("{}: {detail}", tallyup_i18n::SNAPSHOT_REJECTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tallyup_domain::{ExpenseId, Money, ParticipantId};

    #[rstest]
    #[case::duplicate_participant(
        SnapshotError::DuplicateParticipant { id: ParticipantId::new("A") },
        &["A"]
    )]
    #[case::duplicate_expense(
        SnapshotError::DuplicateExpense { id: ExpenseId::new("dinner") },
        &["dinner"]
    )]
    #[case::unknown_payer(
        SnapshotError::UnknownPayer {
            expense: ExpenseId::new("e1"),
            participant: ParticipantId::new("Z"),
        },
        &["e1", "Z"]
    )]
    #[case::unknown_beneficiary(
        SnapshotError::UnknownBeneficiary {
            expense: ExpenseId::new("e2"),
            participant: ParticipantId::new("Y"),
        },
        &["e2", "Y"]
    )]
    #[case::duplicate_beneficiary(
        SnapshotError::DuplicateBeneficiary {
            expense: ExpenseId::new("e3"),
            participant: ParticipantId::new("B"),
        },
        &["e3", "B"]
    )]
    #[case::negative_amount(
        SnapshotError::NegativeAmount {
            expense: ExpenseId::new("refund"),
            amount: Money::new(-500, 2),
        },
        &["refund", "-5.00"]
    )]
    #[case::empty_beneficiaries(
        SnapshotError::EmptyBeneficiaries { expense: ExpenseId::new("gift") },
        &["gift"]
    )]
    #[case::amount_out_of_range(
        SnapshotError::AmountOutOfRange { expense: ExpenseId::new("yacht") },
        &["yacht"]
    )]
    fn formats_all_snapshot_errors(#[case] error: SnapshotError, #[case] fragments: &[&str]) {
        let message = format_snapshot_error(&error);

        assert!(message.starts_with(tallyup_i18n::SNAPSHOT_REJECTED));
        for fragment in fragments {
            assert!(
                message.contains(fragment),
                "`{message}` should mention `{fragment}`"
            );
        }
    }
}
