use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Tolerance below which a balance or transfer amount counts as settled.
pub const SETTLEMENT_EPSILON: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed monetary amount.
///
/// Arithmetic is decimal; at the serialization boundary the value is a plain
/// JSON number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Sum that reports overflow instead of panicking.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true when the amount is within [`SETTLEMENT_EPSILON`] of zero.
    pub fn is_negligible(self) -> bool {
        self.abs() <= SETTLEMENT_EPSILON
    }

    /// Divides the amount into `parts` equal shares. Zero parts yields zero.
    pub fn split(self, parts: usize) -> Self {
        if parts == 0 {
            return Self::ZERO;
        }
        Self(self.0 / Decimal::from(parts))
    }

    pub fn times(self, count: usize) -> Self {
        Self(self.0 * Decimal::from(count))
    }

    pub fn round_to_cents(self) -> Self {
        Self(self.0.round_dp(2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_address: Option<String>,
    /// Display-only flag owned by the caller; balances ignore it.
    #[serde(default)]
    pub settled: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
            payment_address: None,
            settled: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub id: ExpenseId,
    pub amount: Money,
    pub paid_by: ParticipantId,
    #[serde(default)]
    pub beneficiaries: Vec<ParticipantId>,
}

impl ExpenseEntry {
    pub fn new<I, P>(id: impl Into<String>, amount: Money, paid_by: &str, beneficiaries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            id: ExpenseId::new(id),
            amount,
            paid_by: ParticipantId::new(paid_by),
            beneficiaries: beneficiaries.into_iter().map(ParticipantId::new).collect(),
        }
    }

    /// Amount charged to each listed beneficiary, zero when nobody is listed.
    pub fn share_per_beneficiary(&self) -> Money {
        self.amount.split(self.beneficiaries.len())
    }
}

/// Net balance per participant, in the order participants were supplied.
pub type BalanceMap = IndexMap<ParticipantId, Money>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub id: ParticipantId,
    pub paid: Money,
    pub owed: Money,
    pub balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

#[derive(Debug, PartialEq)]
pub struct Settlement {
    pub new_balances: BalanceMap,
    pub transfers: Vec<Transfer>,
}

/// Paid/owed accumulator over a stream of expense entries.
pub struct BalanceAccumulator {
    ledger: IndexMap<ParticipantId, (Money, Money)>,
}

impl BalanceAccumulator {
    pub fn new_with_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a ParticipantId>,
    {
        let ledger = members
            .into_iter()
            .map(|member| (member.clone(), (Money::ZERO, Money::ZERO)))
            .collect();
        Self { ledger }
    }

    pub fn apply(&mut self, entry: &ExpenseEntry) {
        self.ledger
            .entry(entry.paid_by.clone())
            .or_insert((Money::ZERO, Money::ZERO))
            .0 += entry.amount;

        if entry.beneficiaries.is_empty() {
            tracing::debug!(
                expense = %entry.id,
                payer = %entry.paid_by,
                amount = %entry.amount,
                "Expense has no beneficiaries; crediting payer only"
            );
            return;
        }

        let share = entry.share_per_beneficiary();
        for beneficiary in &entry.beneficiaries {
            self.ledger
                .entry(beneficiary.clone())
                .or_insert((Money::ZERO, Money::ZERO))
                .1 += share;
        }
    }

    pub fn into_balances(self) -> BalanceMap {
        self.ledger
            .into_iter()
            .map(|(id, (paid, owed))| (id, paid - owed))
            .collect()
    }

    pub fn into_summaries(self) -> Vec<ParticipantSummary> {
        self.ledger
            .into_iter()
            .map(|(id, (paid, owed))| ParticipantSummary {
                id,
                paid,
                owed,
                balance: paid - owed,
            })
            .collect()
    }
}

/// Replays transfers against balances: the payer's balance rises, the
/// receiver's falls.
pub fn apply_transfers(balances: &mut BalanceMap, transfers: &[Transfer]) {
    for transfer in transfers {
        *balances.entry(transfer.from.clone()).or_insert(Money::ZERO) += transfer.amount;
        *balances.entry(transfer.to.clone()).or_insert(Money::ZERO) -= transfer.amount;
    }
}
