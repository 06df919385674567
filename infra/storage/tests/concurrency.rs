mod common;

use common::*;
use hbnb_domain::models::{EntityKind, Model, State};
use hbnb_storage::Storage;
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_register_and_save_lose_nothing() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let storage = storage.clone();
        tasks.push(tokio::spawn(async move {
            let state = state(&storage, &format!("State {i}"));
            storage.save().await.map(|()| state)
        }));
    }

    let mut created = Vec::new();
    for task in tasks {
        created.push(task.await.unwrap().unwrap());
    }

    let reopened = Storage::builder().root(temp.path()).connect().await.unwrap();
    assert_eq!(reopened.count(Some(EntityKind::State)), 16);
    for state in &created {
        assert_eq!(reopened.get::<State>(state.id()).as_ref(), Some(state));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_see_torn_updates() {
    let storage = memory().await;
    let ca = state(&storage, "0");

    let writer = {
        let storage = storage.clone();
        let id = ca.id().to_owned();
        tokio::spawn(async move {
            for i in 1..=200 {
                storage.update::<State>(&id, |s| s.name = i.to_string());
                tokio::task::yield_now().await;
            }
        })
    };

    let mut last = 0;
    for _ in 0..200 {
        let name: u32 = storage.get::<State>(ca.id()).unwrap().name.parse().unwrap();
        assert!(name >= last, "updates are observed in order");
        last = name;
        tokio::task::yield_now().await;
    }
    writer.await.unwrap();
    assert_eq!(storage.get::<State>(ca.id()).unwrap().name, "200");
}
