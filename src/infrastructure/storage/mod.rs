use crate::core::errors::LedgerError;
use crate::core::models::{DebtLine, Group, Transaction, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Data access consumed by the balance engine.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Debt lines of transactions in scope (all groups, or only `group_id`)
    /// where `user_id` is the payer or a debtor, with both parties resolved.
    async fn debt_lines(&self, user_id: Uuid, group_id: Option<Uuid>) -> Result<Vec<DebtLine>, LedgerError>;
}

#[async_trait]
pub trait Storage: LedgerQuery {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError>;
    async fn is_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, LedgerError>;
    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError>;
    /// Replaces a stored transaction. Returns false, storing nothing, when it
    /// no longer exists.
    async fn update_transaction(&self, transaction: Transaction) -> Result<bool, LedgerError>;
    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError>;
    async fn get_group_transactions(&self, group_id: Uuid) -> Result<Vec<Transaction>, LedgerError>;
    /// Removes the transaction and its participants. Returns whether it existed.
    async fn delete_transaction(&self, transaction_id: Uuid) -> Result<bool, LedgerError>;
}

pub mod in_memory;
