mod balance_tests;

use crate::core::models::{Group, NewParticipant, NewTransaction, TransactionType, User};
use crate::core::services::LedgerService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use uuid::Uuid;

pub struct Fixture {
    pub storage: InMemoryStorage,
    pub service: LedgerService<InMemoryStorage>,
    pub alice: User,
    pub bob: User,
    pub carol: User,
    pub group: Group,
}

pub fn create_test_service() -> (InMemoryStorage, LedgerService<InMemoryStorage>) {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let service = LedgerService::new(storage.clone());
    (storage, service)
}

pub fn test_user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub async fn add_group(storage: &InMemoryStorage, name: &str, members: &[&User]) -> Group {
    let group = Group {
        id: Uuid::new_v4(),
        name: name.to_string(),
        member_ids: members.iter().map(|u| u.id).collect(),
    };
    storage.insert_group(group.clone()).await;
    group
}

/// Alice, Bob and Carol share one group; Carol is not in any other group.
pub async fn fixture() -> Fixture {
    let (storage, service) = create_test_service();
    let alice = test_user("Alice");
    let bob = test_user("Bob");
    let carol = test_user("Carol");
    for user in [&alice, &bob, &carol] {
        storage.insert_user(user.clone()).await;
    }
    let group = add_group(&storage, "Flat", &[&alice, &bob, &carol]).await;
    Fixture {
        storage,
        service,
        alice,
        bob,
        carol,
        group,
    }
}

pub fn expense(group: &Group, payer: &User, amount: i64, debts: &[(&User, i64)]) -> NewTransaction {
    NewTransaction {
        amount,
        title: "Groceries".to_string(),
        purchased_on: None,
        transaction_type: TransactionType::Amount,
        group_id: group.id,
        payer_id: payer.id,
        participants: debts
            .iter()
            .map(|(debtor, amount_owed)| NewParticipant {
                debtor_id: debtor.id,
                amount_owed: *amount_owed,
            })
            .collect(),
    }
}
