//! Balance computation over ledger debt lines.
//!
//! The engine never touches storage itself: it asks a [`LedgerQuery`] for the
//! debt lines in scope and folds them with [`aggregate`], which is pure and
//! can be exercised without any store.

use crate::core::errors::LedgerError;
use crate::core::models::{Balance, DebtLine, User, UserBalance};
use crate::infrastructure::storage::LedgerQuery;
use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

pub struct BalanceEngine<Q: LedgerQuery> {
    query: Q,
}

impl<Q: LedgerQuery> BalanceEngine<Q> {
    pub fn new(query: Q) -> Self {
        BalanceEngine { query }
    }

    /// Balance of `user_id`, across all groups or restricted to `group_id`.
    ///
    /// Unknown users and groups are not errors: no lines match, so the
    /// result is a zero balance.
    pub async fn compute_balance(&self, user_id: Uuid, group_id: Option<Uuid>) -> Result<Balance, LedgerError> {
        let lines = self.query.debt_lines(user_id, group_id).await?;
        debug!(
            "Computing balance for user {} (group {:?}) over {} debt lines",
            user_id,
            group_id,
            lines.len()
        );
        aggregate(user_id, group_id, &lines)
    }
}

struct Counterparty {
    user: User,
    balance: i64,
}

fn overflow(user_id: Uuid) -> LedgerError {
    LedgerError::AmountOverflow(user_id.to_string())
}

/// Folds debt lines into the balance of `user_id`.
///
/// Lines that do not count toward the user (self-debt, other groups, lines
/// not involving the user) are skipped. Counterparties whose debts cancel
/// out exactly are left out of `user_balances`, whose order is unspecified.
pub fn aggregate(user_id: Uuid, group_id: Option<Uuid>, lines: &[DebtLine]) -> Result<Balance, LedgerError> {
    let mut total_owed_by_others: i64 = 0;
    let mut total_owed_to_others: i64 = 0;
    let mut counterparties: HashMap<Uuid, Counterparty> = HashMap::new();

    for line in lines.iter().filter(|l| l.counts_toward(user_id, group_id)) {
        let (other, signed) = if line.payer.id == user_id {
            total_owed_by_others = total_owed_by_others
                .checked_add(line.amount_owed)
                .ok_or_else(|| overflow(user_id))?;
            (&line.debtor, line.amount_owed)
        } else {
            total_owed_to_others = total_owed_to_others
                .checked_add(line.amount_owed)
                .ok_or_else(|| overflow(user_id))?;
            let negated = line.amount_owed.checked_neg().ok_or_else(|| overflow(user_id))?;
            (&line.payer, negated)
        };

        let entry = counterparties.entry(other.id).or_insert_with(|| Counterparty {
            user: other.clone(),
            balance: 0,
        });
        entry.balance = entry.balance.checked_add(signed).ok_or_else(|| overflow(user_id))?;
    }

    let total_balance = total_owed_by_others
        .checked_sub(total_owed_to_others)
        .ok_or_else(|| overflow(user_id))?;

    let user_balances: Vec<UserBalance> = counterparties
        .into_values()
        .filter(|c| c.balance != 0)
        .map(|c| UserBalance {
            user: c.user,
            balance: c.balance,
        })
        .collect();

    Ok(Balance {
        user_id,
        group_id,
        total_balance,
        total_owed_to_others,
        total_owed_by_others,
        user_balances,
    })
}
