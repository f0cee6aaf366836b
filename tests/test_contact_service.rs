//! Contact service behavior against a mock document store.

mod mocks;

use contactos_service::error::ContactError;
use contactos_service::models::NewContact;
use contactos_service::services::{
    ContactService, ContactServiceImpl, CONTACTS_COLLECTION, REQUIRED_FIELDS_MESSAGE,
    UNAVAILABLE_MESSAGE,
};
use mocks::MockDocumentStore;
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;

fn setup() -> (MockDocumentStore, ContactServiceImpl) {
    let store = MockDocumentStore::new();
    let service = ContactServiceImpl::new(Arc::new(store.clone()));
    (store, service)
}

fn assert_unavailable<T: std::fmt::Debug>(result: Result<T, ContactError>) {
    match result {
        Err(ContactError::ServiceUnavailable(msg)) => assert_eq!(msg, UNAVAILABLE_MESSAGE),
        other => panic!("Expected ServiceUnavailable, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_then_list_includes_contact() {
    let (store, service) = setup();

    let created = service
        .create_contact(NewContact::new("Ana", "555", "ana@x.com"))
        .await
        .unwrap();
    assert_eq!(created.name, "Ana");
    assert_eq!(store.get_call_count("insert_many"), 1);

    let contacts = service.list_contacts().await.unwrap();
    assert!(contacts.contains(&created));
    assert_eq!(store.get_call_count("find"), 1);
}

#[tokio::test]
async fn test_create_with_missing_fields_writes_nothing() {
    let (store, service) = setup();
    let inputs = vec![
        NewContact::default(),
        NewContact {
            name: Some("Ana".to_string()),
            phone: Some("555".to_string()),
            email: None,
        },
        NewContact::new("", "555", "ana@x.com"),
        NewContact::new("Ana", "555", ""),
    ];

    for input in inputs {
        match service.create_contact(input).await {
            Err(ContactError::BadRequest(msg)) => assert_eq!(msg, REQUIRED_FIELDS_MESSAGE),
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    assert_eq!(store.total_calls(), 0);
    assert_eq!(store.count(CONTACTS_COLLECTION), 0);
}

#[tokio::test]
async fn test_create_accepts_whitespace_values() {
    let (_, service) = setup();

    let created = service
        .create_contact(NewContact::new("Ana", " ", "ana@x.com"))
        .await
        .unwrap();
    assert_eq!(created.phone, " ");

    let contacts = service.list_contacts().await.unwrap();
    assert!(contacts.contains(&created));
}

#[tokio::test]
async fn test_create_accepts_spanish_field_names() {
    let (_, service) = setup();
    let input: NewContact =
        serde_json::from_str(r#"{"nombre":"Luis","telefono":"777","email":"luis@x.com"}"#)
            .unwrap();

    let created = service.create_contact(input).await.unwrap();
    assert_eq!(created.name, "Luis");
    assert_eq!(created.phone, "777");
}

#[tokio::test]
async fn test_list_empty_collection_is_not_found() {
    let (store, service) = setup();
    let result = service.list_contacts().await;
    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(store.get_call_count("find"), 1);
}

#[tokio::test]
async fn test_find_returns_first_match_unchanged() {
    let (store, service) = setup();
    let first = ObjectId::new();
    store.add_document(
        CONTACTS_COLLECTION,
        doc! { "_id": first, "name": "Ana", "phone": "555", "email": "ana@x.com" },
    );
    store.add_document(
        CONTACTS_COLLECTION,
        doc! { "_id": ObjectId::new(), "name": "Ana", "phone": "556", "email": "ana2@x.com" },
    );

    let found = service.find_by_name("Ana").await.unwrap();
    assert_eq!(found.id.object_id(), first);
    assert_eq!(found.phone, "555");
    assert_eq!(store.get_call_count("find_one"), 1);

    let by_phone = service.find_by_phone("556").await.unwrap();
    assert_eq!(by_phone.email, "ana2@x.com");
}

#[tokio::test]
async fn test_list_reads_legacy_documents() {
    let (store, service) = setup();
    let created = service
        .create_contact(NewContact::new("Ana", "555", "ana@x.com"))
        .await
        .unwrap();
    store.add_document(
        CONTACTS_COLLECTION,
        doc! { "_id": ObjectId::new(), "nombre": "Luis", "telefono": "7", "email": "l@x" },
    );

    let contacts = service.list_contacts().await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert!(contacts.contains(&created));
    assert!(contacts.iter().any(|c| c.name == "Luis" && c.phone == "7"));
}

#[tokio::test]
async fn test_find_without_match_is_not_found() {
    let (_, service) = setup();
    match service.find_by_phone("000").await {
        Err(ContactError::NotFound(msg)) => assert_eq!(msg, "No contact found with phone: 000"),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_nonexistent_id_leaves_collection_unchanged() {
    let (store, service) = setup();
    service
        .create_contact(NewContact::new("Ana", "555", "ana@x.com"))
        .await
        .unwrap();

    let result = service.delete_by_id(&ObjectId::new().to_hex()).await;
    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(store.count(CONTACTS_COLLECTION), 1);
}

#[tokio::test]
async fn test_delete_existing_contact() {
    let (store, service) = setup();
    let created = service
        .create_contact(NewContact::new("Ana", "555", "ana@x.com"))
        .await
        .unwrap();

    let ack = service.delete_by_id(&created.id.to_string()).await.unwrap();
    assert!(!ack.message.is_empty());
    assert_eq!(store.count(CONTACTS_COLLECTION), 0);

    let again = service.find_by_name("Ana").await;
    assert!(matches!(again, Err(ContactError::NotFound(_))));
}

#[tokio::test]
async fn test_malformed_id_never_reaches_store() {
    let (store, service) = setup();
    assert_unavailable(service.delete_by_id("xyz").await);
    assert_eq!(store.get_call_count("delete_one"), 0);
}

#[tokio::test]
async fn test_store_failures_are_masked() {
    let (store, service) = setup();
    store.fail_with("connection refused");

    assert_unavailable(service.list_contacts().await);
    assert_unavailable(
        service
            .create_contact(NewContact::new("Ana", "555", "ana@x.com"))
            .await,
    );
    assert_unavailable(service.find_by_name("Ana").await);
    assert_unavailable(service.find_by_phone("555").await);
    assert_unavailable(service.find_by_email("ana@x.com").await);
    assert_unavailable(service.delete_by_id(&ObjectId::new().to_hex()).await);
}

#[tokio::test]
async fn test_custom_collection() {
    let store = MockDocumentStore::new();
    let service = ContactServiceImpl::new(Arc::new(store.clone())).with_collection("agenda");

    service
        .create_contact(NewContact::new("Ana", "555", "ana@x.com"))
        .await
        .unwrap();

    assert_eq!(store.count("agenda"), 1);
    assert_eq!(store.count(CONTACTS_COLLECTION), 0);
}
