use super::user::User;
use uuid::Uuid;

/// A (transaction, participant) pair with both parties resolved, as handed
/// to the balance engine by a `LedgerQuery`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebtLine {
    pub transaction_id: Uuid,
    pub group_id: Uuid,
    pub payer: User,
    pub debtor: User,
    pub amount_owed: i64,
}

impl DebtLine {
    pub fn is_self_debt(&self) -> bool {
        self.payer.id == self.debtor.id
    }

    /// Whether this line contributes to `user_id`'s balance, optionally
    /// restricted to one group. Self-debt lines never contribute.
    pub fn counts_toward(&self, user_id: Uuid, group_id: Option<Uuid>) -> bool {
        if self.is_self_debt() {
            return false;
        }
        if group_id.is_some_and(|g| g != self.group_id) {
            return false;
        }
        self.payer.id == user_id || self.debtor.id == user_id
    }
}
