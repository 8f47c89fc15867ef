use super::user::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Net position of one counterparty relative to the queried user.
/// Positive: the counterparty owes the user. Negative: the user owes them.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserBalance {
    pub user: User,
    pub balance: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Balance {
    pub user_id: Uuid,
    pub group_id: Option<Uuid>,
    pub total_balance: i64,
    pub total_owed_to_others: i64,
    pub total_owed_by_others: i64,
    pub user_balances: Vec<UserBalance>,
}

impl Balance {
    pub fn zero(user_id: Uuid, group_id: Option<Uuid>) -> Self {
        Balance {
            user_id,
            group_id,
            total_balance: 0,
            total_owed_to_others: 0,
            total_owed_by_others: 0,
            user_balances: Vec::new(),
        }
    }

    pub fn balance_with(&self, counterparty_id: Uuid) -> Option<i64> {
        self.user_balances
            .iter()
            .find(|ub| ub.user.id == counterparty_id)
            .map(|ub| ub.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_wire_shape() {
        let user_id = Uuid::new_v4();
        let bob = User {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        };
        let balance = Balance {
            total_balance: 1000,
            total_owed_by_others: 1000,
            user_balances: vec![UserBalance {
                user: bob.clone(),
                balance: 1000,
            }],
            ..Balance::zero(user_id, None)
        };

        let value = serde_json::to_value(&balance).unwrap();
        assert_eq!(
            value,
            json!({
                "user_id": user_id,
                "group_id": null,
                "total_balance": 1000,
                "total_owed_to_others": 0,
                "total_owed_by_others": 1000,
                "user_balances": [{
                    "user": { "id": bob.id, "name": "Bob", "email": "bob@example.com" },
                    "balance": 1000
                }]
            })
        );
    }
}
