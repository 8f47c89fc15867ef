use crate::core::errors::LedgerError;
use crate::core::models::{DebtLine, Group, Transaction, User};
use crate::infrastructure::storage::{LedgerQuery, Storage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    groups: Arc<RwLock<HashMap<Uuid, Group>>>,
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
            transactions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // Users and groups are owned by the account/membership services; these
    // let an embedding application mirror them into the ledger.

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn insert_group(&self, group: Group) {
        self.groups.write().await.insert(group.id, group);
    }
}

fn resolve(users: &HashMap<Uuid, User>, user_id: Uuid, transaction_id: Uuid) -> Result<User, LedgerError> {
    users.get(&user_id).cloned().ok_or_else(|| {
        LedgerError::StorageError(format!(
            "transaction {} references unknown user {}",
            transaction_id, user_id
        ))
    })
}

#[async_trait]
impl LedgerQuery for InMemoryStorage {
    async fn debt_lines(&self, user_id: Uuid, group_id: Option<Uuid>) -> Result<Vec<DebtLine>, LedgerError> {
        // Both guards held together so one call reads a consistent snapshot.
        let users = self.users.read().await;
        let transactions = self.transactions.read().await;

        let mut lines = Vec::new();
        for tx in transactions
            .values()
            .filter(|tx| group_id.is_none_or(|g| tx.group_id == g))
        {
            for participant in tx
                .participants
                .iter()
                .filter(|p| tx.payer_id == user_id || p.debtor_id == user_id)
            {
                lines.push(DebtLine {
                    transaction_id: tx.id,
                    group_id: tx.group_id,
                    payer: resolve(&users, tx.payer_id, tx.id)?,
                    debtor: resolve(&users, participant.debtor_id, tx.id)?,
                    amount_owed: participant.amount_owed,
                });
            }
        }
        Ok(lines)
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(&group_id).cloned())
    }

    async fn is_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(&group_id).is_some_and(|g| g.is_member(user_id)))
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction);
        Ok(())
    }

    async fn update_transaction(&self, transaction: Transaction) -> Result<bool, LedgerError> {
        let mut transactions = self.transactions.write().await;
        match transactions.get_mut(&transaction.id) {
            Some(stored) => {
                *stored = transaction;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&transaction_id).cloned())
    }

    async fn get_group_transactions(&self, group_id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        let mut result: Vec<Transaction> = transactions
            .values()
            .filter(|tx| tx.group_id == group_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.purchased_on.cmp(&a.purchased_on));
        Ok(result)
    }

    async fn delete_transaction(&self, transaction_id: Uuid) -> Result<bool, LedgerError> {
        let mut transactions = self.transactions.write().await;
        Ok(transactions.remove(&transaction_id).is_some())
    }
}
