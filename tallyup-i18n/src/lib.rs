#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

use std::fmt::Display;

#[cfg(feature = "ja")]
pub mod strings {
    pub const PARTICIPANT: &str = "参加者";
    pub const PAID: &str = "支払額";
    pub const OWED: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const ALL_SETTLED: &str = "精算は不要です。";
    pub const SNAPSHOT_REJECTED: &str = "スナップショットを処理できません";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const PAID: &str = "Paid";
    pub const OWED: &str = "Owed";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const ALL_SETTLED: &str = "Everyone is settled up.";
    pub const SNAPSHOT_REJECTED: &str = "Snapshot rejected";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn duplicate_participant(id: impl Display) -> String {
    format!("参加者 '{id}' が重複しています")
}

#[cfg(feature = "ja")]
pub fn duplicate_expense(id: impl Display) -> String {
    format!("支出 '{id}' が重複しています")
}

#[cfg(feature = "ja")]
pub fn unknown_payer(expense: impl Display, participant: impl Display) -> String {
    format!("支出 '{expense}' の支払者 '{participant}' は参加者ではありません")
}

#[cfg(feature = "ja")]
pub fn unknown_beneficiary(expense: impl Display, participant: impl Display) -> String {
    format!("支出 '{expense}' の対象者 '{participant}' は参加者ではありません")
}

#[cfg(feature = "ja")]
pub fn duplicate_beneficiary(expense: impl Display, participant: impl Display) -> String {
    format!("支出 '{expense}' の対象者 '{participant}' が重複しています")
}

#[cfg(feature = "ja")]
pub fn negative_amount(expense: impl Display, amount: impl Display) -> String {
    format!("支出 '{expense}' の金額が負です ({amount})")
}

#[cfg(feature = "ja")]
pub fn empty_beneficiaries(expense: impl Display) -> String {
    format!("支出 '{expense}' に対象者がいません")
}

#[cfg(feature = "ja")]
pub fn amount_out_of_range(expense: impl Display) -> String {
    format!("支出 '{expense}' で合計金額が扱える範囲を超えました")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_participant(id: impl Display) -> String {
    format!("Participant '{id}' is declared more than once")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_expense(id: impl Display) -> String {
    format!("Expense '{id}' is declared more than once")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_payer(expense: impl Display, participant: impl Display) -> String {
    format!("Expense '{expense}' is paid by '{participant}', who is not a participant")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_beneficiary(expense: impl Display, participant: impl Display) -> String {
    format!("Expense '{expense}' lists '{participant}', who is not a participant")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_beneficiary(expense: impl Display, participant: impl Display) -> String {
    format!("Expense '{expense}' lists '{participant}' more than once")
}

#[cfg(not(feature = "ja"))]
pub fn negative_amount(expense: impl Display, amount: impl Display) -> String {
    format!("Expense '{expense}' has a negative amount ({amount})")
}

#[cfg(not(feature = "ja"))]
pub fn empty_beneficiaries(expense: impl Display) -> String {
    format!("Expense '{expense}' has no beneficiaries")
}

#[cfg(not(feature = "ja"))]
pub fn amount_out_of_range(expense: impl Display) -> String {
    format!("Expense '{expense}' pushes the total beyond the supported range")
}

pub struct TransferCountMessage {
    count: usize,
}

pub fn transfer_count(count: usize) -> TransferCountMessage {
    TransferCountMessage { count }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for TransferCountMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "送金 {} 件で精算できます", self.count)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for TransferCountMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.count {
            1 => write!(f, "1 transfer settles the group"),
            n => write!(f, "{n} transfers settle the group"),
        }
    }
}
