use crate::core::balance::BalanceEngine;
use crate::core::errors::LedgerError;
use crate::core::models::{
    Balance, Group, NewParticipant, NewTransaction, Participant, Transaction, TransactionUpdate,
};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use uuid::Uuid;

const MAX_TITLE_LENGTH: usize = 255;

pub struct LedgerService<S: Storage + Clone> {
    storage: S,
    balances: BalanceEngine<S>,
}

impl<S: Storage + Clone> LedgerService<S> {
    pub fn new(storage: S) -> Self {
        info!("Initializing LedgerService");
        LedgerService {
            balances: BalanceEngine::new(storage.clone()),
            storage,
        }
    }

    async fn validate_group_membership(&self, group_id: Uuid, user_id: Uuid) -> Result<Group, LedgerError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        if !group.is_member(user_id) {
            warn!("User {} is not a member of group {}", user_id, group_id);
            return Err(LedgerError::NotGroupMember(user_id.to_string()));
        }
        Ok(group)
    }

    async fn validate_user_exists(&self, user_id: Uuid) -> Result<(), LedgerError> {
        if self.storage.get_user(user_id).await?.is_none() {
            warn!("User {} has no profile", user_id);
            return Err(LedgerError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }

    async fn validate_payer(&self, group: &Group, payer_id: Uuid) -> Result<(), LedgerError> {
        if !group.is_member(payer_id) {
            warn!("Payer {} is not a member of group {}", payer_id, group.id);
            return Err(LedgerError::NotGroupMember(payer_id.to_string()));
        }
        self.validate_user_exists(payer_id).await
    }

    async fn validate_participants(&self, group: &Group, participants: &[NewParticipant]) -> Result<(), LedgerError> {
        let checks = participants
            .iter()
            .map(|p| async move {
                if p.amount_owed < 0 {
                    return Err(LedgerError::invalid_input(
                        "amount_owed",
                        "Invalid Amount",
                        format!("Amount owed by {} cannot be negative", p.debtor_id),
                    ));
                }
                if !self.storage.is_group_member(group.id, p.debtor_id).await? {
                    warn!("Debtor {} is not a member of group {}", p.debtor_id, group.id);
                    return Err(LedgerError::InvalidParticipant(p.debtor_id.to_string()));
                }
                self.validate_user_exists(p.debtor_id).await
            })
            .collect::<Vec<_>>();
        futures::future::try_join_all(checks).await?;
        Ok(())
    }

    fn validate_title(&self, title: &str) -> Result<(), LedgerError> {
        if title.trim().is_empty() {
            return Err(LedgerError::invalid_input("title", "Invalid title", "title cannot be empty"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(LedgerError::invalid_input(
                "title",
                "title Too Long",
                format!("title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        if title.chars().any(|c| c.is_control()) {
            return Err(LedgerError::invalid_input(
                "title",
                "Invalid title",
                "title contains invalid characters",
            ));
        }
        Ok(())
    }

    fn validate_amount(&self, amount: i64) -> Result<(), LedgerError> {
        if amount < 0 {
            return Err(LedgerError::invalid_input(
                "amount",
                "Invalid Amount",
                "Amount cannot be negative",
            ));
        }
        Ok(())
    }

    fn materialize_participants(transaction_id: Uuid, participants: Vec<NewParticipant>) -> Vec<Participant> {
        participants
            .into_iter()
            .map(|p| Participant {
                id: Uuid::new_v4(),
                transaction_id,
                debtor_id: p.debtor_id,
                amount_owed: p.amount_owed,
            })
            .collect()
    }

    fn note_inconsistent_split(transaction: &Transaction) {
        if transaction.participant_total() != Some(transaction.amount) {
            debug!(
                "Transaction {} amount {} differs from participant total {:?}",
                transaction.id,
                transaction.amount,
                transaction.participant_total()
            );
        }
    }

    pub async fn create_transaction(&self, caller: Uuid, new: NewTransaction) -> Result<Transaction, LedgerError> {
        info!(
            "Creating transaction in group {} by user {} for amount {}",
            new.group_id, caller, new.amount
        );
        let group = self.validate_group_membership(new.group_id, caller).await?;
        self.validate_title(&new.title)?;
        self.validate_amount(new.amount)?;
        self.validate_payer(&group, new.payer_id).await?;
        self.validate_participants(&group, &new.participants).await?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let transaction = Transaction {
            id,
            amount: new.amount,
            title: new.title,
            purchased_on: new.purchased_on.unwrap_or(now),
            transaction_type: new.transaction_type,
            group_id: group.id,
            payer_id: new.payer_id,
            participants: Self::materialize_participants(id, new.participants),
            created_at: now,
            updated_at: now,
        };
        Self::note_inconsistent_split(&transaction);

        self.storage.save_transaction(transaction.clone()).await?;
        debug!(
            "Transaction created with ID: {} ({} participants)",
            transaction.id,
            transaction.participants.len()
        );
        Ok(transaction)
    }

    async fn load_transaction(&self, caller: Uuid, transaction_id: Uuid) -> Result<(Group, Transaction), LedgerError> {
        let transaction = self
            .storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))?;
        let group = self.validate_group_membership(transaction.group_id, caller).await?;
        Ok((group, transaction))
    }

    pub async fn get_transaction(&self, caller: Uuid, transaction_id: Uuid) -> Result<Transaction, LedgerError> {
        let (_group, transaction) = self.load_transaction(caller, transaction_id).await?;
        Ok(transaction)
    }

    pub async fn list_group_transactions(&self, caller: Uuid, group_id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        let _group = self.validate_group_membership(group_id, caller).await?;
        let transactions = self.storage.get_group_transactions(group_id).await?;
        debug!("Listed {} transactions for group {}", transactions.len(), group_id);
        Ok(transactions)
    }

    pub async fn update_transaction(
        &self,
        caller: Uuid,
        transaction_id: Uuid,
        update: TransactionUpdate,
    ) -> Result<Transaction, LedgerError> {
        info!("Updating transaction {} by user {}", transaction_id, caller);
        let (group, mut transaction) = self.load_transaction(caller, transaction_id).await?;

        if let Some(amount) = update.amount {
            self.validate_amount(amount)?;
            transaction.amount = amount;
        }
        if let Some(title) = update.title {
            self.validate_title(&title)?;
            transaction.title = title;
        }
        if let Some(purchased_on) = update.purchased_on {
            transaction.purchased_on = purchased_on;
        }
        if let Some(transaction_type) = update.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(payer_id) = update.payer_id {
            self.validate_payer(&group, payer_id).await?;
            transaction.payer_id = payer_id;
        }
        if let Some(participants) = update.participants {
            self.validate_participants(&group, &participants).await?;
            transaction.participants = Self::materialize_participants(transaction.id, participants);
        }
        transaction.updated_at = Utc::now();
        Self::note_inconsistent_split(&transaction);

        if !self.storage.update_transaction(transaction.clone()).await? {
            warn!("Transaction {} was deleted during update", transaction.id);
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()));
        }
        debug!("Transaction updated: {}", transaction.id);
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, caller: Uuid, transaction_id: Uuid) -> Result<(), LedgerError> {
        info!("Deleting transaction {} by user {}", transaction_id, caller);
        let (_group, transaction) = self.load_transaction(caller, transaction_id).await?;
        if !self.storage.delete_transaction(transaction.id).await? {
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()));
        }
        debug!(
            "Transaction {} deleted with {} participants",
            transaction.id,
            transaction.participants.len()
        );
        Ok(())
    }

    /// Caller's balance with no existence checks: an unknown group yields a
    /// zero balance.
    pub async fn get_balance(&self, caller: Uuid, group_id: Option<Uuid>) -> Result<Balance, LedgerError> {
        self.balances.compute_balance(caller, group_id).await
    }

    pub async fn get_group_balance(&self, caller: Uuid, group_id: Uuid) -> Result<Balance, LedgerError> {
        let _group = self.validate_group_membership(group_id, caller).await?;
        self.balances.compute_balance(caller, Some(group_id)).await
    }
}
