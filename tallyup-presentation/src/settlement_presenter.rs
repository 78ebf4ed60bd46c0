use crate::text_table::{Alignment, TextTableBuilder};
use std::borrow::Cow;
use tallyup_application::{ParticipantDirectory, SettlementResult};
use tallyup_domain::{Money, ParticipantId, ParticipantSummary, Transfer};
use tallyup_i18n as i18n;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub balance_table: String,
    pub transfer_table: Option<String>,
    pub summary: String,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let mut out = self.balance_table.clone();
        out.push('\n');
        if let Some(transfer_table) = &self.transfer_table {
            out.push_str(transfer_table);
            out.push('\n');
        }
        out.push_str(&self.summary);
        out.push('\n');
        out
    }
}

impl SettlementPresenter {
    pub fn render(result: &SettlementResult) -> SettlementView {
        Self::render_with_participants(result, &EmptyDirectory)
    }

    pub fn render_with_participants(
        result: &SettlementResult,
        directory: &dyn ParticipantDirectory,
    ) -> SettlementView {
        let balance_table = Self::build_balance_table(&result.balances, directory);

        if result.transfers.is_empty() {
            return SettlementView {
                balance_table,
                transfer_table: None,
                summary: i18n::ALL_SETTLED.to_string(),
            };
        }

        // Transfers keep planner order; it is the settlement sequence.
        SettlementView {
            balance_table,
            transfer_table: Some(Self::build_transfer_table(&result.transfers, directory)),
            summary: i18n::transfer_count(result.transfers.len()).to_string(),
        }
    }

    pub fn build_balance_table(
        balances: &[ParticipantSummary],
        directory: &dyn ParticipantDirectory,
    ) -> String {
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::OWED),
                Cow::Borrowed(i18n::BALANCE),
            ])
            .rows(balances.iter().map(|summary| {
                [
                    format_participant_label(&summary.id, directory),
                    Cow::Owned(summary.paid.to_string()),
                    Cow::Owned(summary.owed.to_string()),
                    Cow::Owned(format_signed(summary.balance)),
                ]
            }))
            .build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        directory: &dyn ParticipantDirectory,
    ) -> String {
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ])
            .rows(transfers.iter().map(|transfer| {
                [
                    format_participant_label(&transfer.from, directory),
                    format_participant_label(&transfer.to, directory),
                    Cow::Owned(transfer.amount.to_string()),
                ]
            }))
            .build()
    }
}

struct EmptyDirectory;

impl ParticipantDirectory for EmptyDirectory {
    fn display_name(&self, _participant_id: &ParticipantId) -> Option<&str> {
        None
    }
}

fn format_participant_label<'a>(
    participant_id: &'a ParticipantId,
    directory: &'a dyn ParticipantDirectory,
) -> Cow<'a, str> {
    match directory.display_name(participant_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Borrowed(participant_id.as_str()),
    }
}

fn format_signed(amount: Money) -> String {
    // Negative amounts that display as zero would otherwise print as "-0.00".
    if amount.round_to_cents().is_negative() {
        amount.to_string()
    } else {
        format!("+{}", amount.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_result() -> SettlementResult {
        SettlementResult {
            balances: vec![
                ParticipantSummary {
                    id: ParticipantId::new("p1"),
                    paid: Money::from_i64(30),
                    owed: Money::from_i64(10),
                    balance: Money::from_i64(20),
                },
                ParticipantSummary {
                    id: ParticipantId::new("p2"),
                    paid: Money::ZERO,
                    owed: Money::from_i64(20),
                    balance: Money::from_i64(-20),
                },
            ],
            transfers: vec![Transfer {
                from: ParticipantId::new("p2"),
                to: ParticipantId::new("p1"),
                amount: Money::from_i64(20),
            }],
        }
    }

    #[test]
    fn render_uses_display_name_when_available() {
        let mut directory = HashMap::new();
        directory.insert(ParticipantId::new("p1"), "Alice".to_string());

        let view = SettlementPresenter::render_with_participants(&sample_result(), &directory);

        assert!(view.balance_table.contains("Alice"));
        assert!(!view.balance_table.contains("p1"));
        assert!(
            view.transfer_table
                .as_ref()
                .expect("transfer table")
                .contains("Alice")
        );
    }

    #[test]
    fn render_falls_back_to_ids_when_missing() {
        let view = SettlementPresenter::render(&sample_result());

        assert!(view.balance_table.contains("p1"));
        assert!(view.balance_table.contains("+20.00"));
        assert!(view.balance_table.contains("-20.00"));
        assert!(
            view.transfer_table
                .as_ref()
                .expect("transfer table")
                .contains("p2")
        );
        assert_eq!(view.summary, i18n::transfer_count(1).to_string());
    }

    #[test]
    fn settled_result_has_no_transfer_table() {
        let result = SettlementResult {
            balances: vec![],
            transfers: vec![],
        };

        let view = SettlementPresenter::render(&result);

        assert!(view.transfer_table.is_none());
        assert_eq!(view.summary, i18n::ALL_SETTLED);
        assert!(view.to_text().ends_with(&format!("{}\n", i18n::ALL_SETTLED)));
    }

    #[test]
    fn negligible_negative_balance_prints_unsigned_zero() {
        assert_eq!(format_signed(Money::new(-1, 4)), "+0.00");
        assert_eq!(format_signed(Money::new(-1250, 2)), "-12.50");
    }
}
