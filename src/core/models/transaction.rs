use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// How the total was meant to be split. Informational only: balances are
/// always computed from the materialized `amount_owed` of each participant.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    #[default]
    Even,
    Amount,
    Percentage,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionType::Even => "EVEN",
            TransactionType::Amount => "AMOUNT",
            TransactionType::Percentage => "PERCENTAGE",
        };
        write!(f, "{}", s)
    }
}

/// One debt line of a transaction. Owned by its transaction.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub debtor_id: Uuid,
    /// Amount owed in the smallest currency unit.
    pub amount_owed: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    /// Total amount in the smallest currency unit (e.g. cents).
    pub amount: i64,
    pub title: String,
    pub purchased_on: DateTime<Utc>,
    pub transaction_type: TransactionType,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Sum of all participants' `amount_owed`; `None` on overflow.
    pub fn participant_total(&self) -> Option<i64> {
        self.participants
            .iter()
            .try_fold(0i64, |acc, p| acc.checked_add(p.amount_owed))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NewParticipant {
    pub debtor_id: Uuid,
    pub amount_owed: i64,
}

/// A transaction together with its full participant list, created as a unit.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewTransaction {
    pub amount: i64,
    pub title: String,
    pub purchased_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transaction_type: TransactionType,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    pub participants: Vec<NewParticipant>,
}

/// Partial update. When `participants` is present it replaces the whole list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct TransactionUpdate {
    pub amount: Option<i64>,
    pub title: Option<String>,
    pub purchased_on: Option<DateTime<Utc>>,
    pub transaction_type: Option<TransactionType>,
    pub payer_id: Option<Uuid>,
    pub participants: Option<Vec<NewParticipant>>,
}
