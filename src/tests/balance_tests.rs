use crate::core::errors::LedgerError;
use crate::core::models::Balance;
use crate::tests::{add_group, create_test_service, expense, fixture, test_user};
use uuid::Uuid;

#[tokio::test]
async fn test_balance_without_transactions_is_zero() {
    let f = fixture().await;

    let balance = f.service.get_balance(f.alice.id, None).await.unwrap();

    assert_eq!(balance.user_id, f.alice.id);
    assert_eq!(balance.group_id, None);
    assert_eq!(balance, Balance::zero(f.alice.id, None));
}

#[tokio::test]
async fn test_payer_and_debtor_see_mirrored_balances() {
    let f = fixture().await;
    f.service
        .create_transaction(f.alice.id, expense(&f.group, &f.alice, 2000, &[(&f.bob, 1000)]))
        .await
        .unwrap();

    let alice = f.service.get_balance(f.alice.id, None).await.unwrap();
    assert_eq!(alice.total_balance, 1000);
    assert_eq!(alice.total_owed_by_others, 1000);
    assert_eq!(alice.total_owed_to_others, 0);
    assert_eq!(alice.user_balances.len(), 1);
    assert_eq!(alice.user_balances[0].user, f.bob);
    assert_eq!(alice.user_balances[0].balance, 1000);

    let bob = f.service.get_balance(f.bob.id, None).await.unwrap();
    assert_eq!(bob.total_balance, -1000);
    assert_eq!(bob.total_owed_by_others, 0);
    assert_eq!(bob.total_owed_to_others, 1000);
    assert_eq!(bob.balance_with(f.alice.id), Some(-1000));
}

#[tokio::test]
async fn test_debts_in_both_directions_are_netted() {
    let f = fixture().await;
    f.service
        .create_transaction(f.alice.id, expense(&f.group, &f.alice, 4000, &[(&f.bob, 2000)]))
        .await
        .unwrap();
    f.service
        .create_transaction(f.bob.id, expense(&f.group, &f.bob, 3000, &[(&f.alice, 1500)]))
        .await
        .unwrap();

    let balance = f.service.get_balance(f.alice.id, None).await.unwrap();

    assert_eq!(balance.total_balance, 500);
    assert_eq!(balance.total_owed_by_others, 2000);
    assert_eq!(balance.total_owed_to_others, 1500);
    assert_eq!(balance.user_balances.len(), 1);
    assert_eq!(balance.balance_with(f.bob.id), Some(500));
}

#[tokio::test]
async fn test_payer_listed_as_own_debtor_is_excluded() {
    let f = fixture().await;
    f.service
        .create_transaction(f.alice.id, expense(&f.group, &f.alice, 1000, &[(&f.alice, 1000)]))
        .await
        .unwrap();

    let balance = f.service.get_balance(f.alice.id, None).await.unwrap();

    assert_eq!(balance, Balance::zero(f.alice.id, None));
}

#[tokio::test]
async fn test_even_split_including_payer_counts_only_others() {
    let f = fixture().await;
    f.service
        .create_transaction(
            f.alice.id,
            expense(&f.group, &f.alice, 3000, &[(&f.alice, 1000), (&f.bob, 1000), (&f.carol, 1000)]),
        )
        .await
        .unwrap();

    let balance = f.service.get_balance(f.alice.id, None).await.unwrap();

    assert_eq!(balance.total_owed_by_others, 2000);
    assert_eq!(balance.user_balances.len(), 2);
    assert_eq!(balance.balance_with(f.bob.id), Some(1000));
    assert_eq!(balance.balance_with(f.carol.id), Some(1000));
    assert_eq!(balance.balance_with(f.alice.id), None);
}

#[tokio::test]
async fn test_settled_counterparty_is_omitted() {
    let f = fixture().await;
    f.service
        .create_transaction(f.alice.id, expense(&f.group, &f.alice, 1200, &[(&f.bob, 600)]))
        .await
        .unwrap();
    f.service
        .create_transaction(f.bob.id, expense(&f.group, &f.bob, 1200, &[(&f.alice, 600)]))
        .await
        .unwrap();
    f.service
        .create_transaction(f.carol.id, expense(&f.group, &f.carol, 300, &[(&f.alice, 300)]))
        .await
        .unwrap();

    let balance = f.service.get_balance(f.alice.id, None).await.unwrap();

    assert_eq!(balance.total_owed_by_others, 600);
    assert_eq!(balance.total_owed_to_others, 900);
    assert_eq!(balance.total_balance, -300);
    assert_eq!(balance.user_balances.len(), 1);
    assert_eq!(balance.balance_with(f.bob.id), None);
    assert_eq!(balance.balance_with(f.carol.id), Some(-300));
}

#[tokio::test]
async fn test_balances_across_groups_add_up() {
    let f = fixture().await;
    let trip = add_group(&f.storage, "Trip", &[&f.alice, &f.bob]).await;
    f.service
        .create_transaction(f.alice.id, expense(&f.group, &f.alice, 2000, &[(&f.bob, 1000)]))
        .await
        .unwrap();
    f.service
        .create_transaction(f.alice.id, expense(&trip, &f.alice, 1000, &[(&f.bob, 500)]))
        .await
        .unwrap();

    let overall = f.service.get_balance(f.alice.id, None).await.unwrap();
    assert_eq!(overall.group_id, None);
    assert_eq!(overall.total_owed_by_others, 1500);
    assert_eq!(overall.total_owed_to_others, 0);
    assert_eq!(overall.total_balance, 1500);
    assert_eq!(overall.balance_with(f.bob.id), Some(1500));

    let flat = f.service.get_balance(f.alice.id, Some(f.group.id)).await.unwrap();
    let in_trip = f.service.get_group_balance(f.alice.id, trip.id).await.unwrap();
    assert_eq!(flat.group_id, Some(f.group.id));
    assert_eq!(flat.total_balance, 1000);
    assert_eq!(in_trip.total_balance, 500);
    assert_eq!(flat.total_balance + in_trip.total_balance, overall.total_balance);
}

#[tokio::test]
async fn test_unknown_group_and_user_give_zero_balance() {
    let f = fixture().await;
    f.service
        .create_transaction(f.alice.id, expense(&f.group, &f.alice, 2000, &[(&f.bob, 1000)]))
        .await
        .unwrap();

    let missing_group = Uuid::new_v4();
    let balance = f.service.get_balance(f.alice.id, Some(missing_group)).await.unwrap();
    assert_eq!(balance, Balance::zero(f.alice.id, Some(missing_group)));

    let stranger = Uuid::new_v4();
    let balance = f.service.get_balance(stranger, None).await.unwrap();
    assert_eq!(balance, Balance::zero(stranger, None));
}

#[tokio::test]
async fn test_group_balance_requires_membership() {
    let f = fixture().await;
    let outsider = test_user("Dave");
    f.storage.insert_user(outsider.clone()).await;

    let result = f.service.get_group_balance(outsider.id, f.group.id).await;
    assert!(matches!(result, Err(LedgerError::NotGroupMember(_))));

    let result = f.service.get_group_balance(f.alice.id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(LedgerError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_concurrent_balance_queries() {
    let (storage, service) = create_test_service();
    let alice = test_user("Alice");
    let bob = test_user("Bob");
    storage.insert_user(alice.clone()).await;
    storage.insert_user(bob.clone()).await;
    let group = add_group(&storage, "Flat", &[&alice, &bob]).await;
    for _ in 0..10 {
        service
            .create_transaction(alice.id, expense(&group, &alice, 200, &[(&bob, 100)]))
            .await
            .unwrap();
    }

    let service = std::sync::Arc::new(service);
    let handles = (0..8)
        .map(|i| {
            let service = service.clone();
            let who = if i % 2 == 0 { alice.id } else { bob.id };
            tokio::spawn(async move { service.get_balance(who, None).await })
        })
        .collect::<Vec<_>>();

    for (i, handle) in handles.into_iter().enumerate() {
        let balance = handle.await.unwrap().unwrap();
        let expected = if i % 2 == 0 { 1000 } else { -1000 };
        assert_eq!(balance.total_balance, expected);
    }
}
