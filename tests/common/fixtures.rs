//! Test fixtures: handlers with deliberately inconsistent callback arities
//! and seeded record stores.

use super::store::RecordStore;
use handler_enforcer::{Handler, handler};
use serde_json::{Value, json};

/// Handler that completes immediately with `values`.
pub fn replying(values: Vec<Value>) -> Handler {
    handler(move |_table, _request, _args, callback| {
        callback(values.clone());
        Ok(())
    })
}

/// Store with three articles: ids "1".."3", two tagged "rust".
pub fn seeded_articles() -> RecordStore {
    seed(RecordStore::new())
}

/// Seed an existing store (e.g. one with spawned completions).
pub fn seed(store: RecordStore) -> RecordStore {
    let articles = [
        json!({"id": "1", "title": "Ownership", "tag": "rust"}),
        json!({"id": "2", "title": "Goroutines", "tag": "go"}),
        json!({"id": "3", "title": "Lifetimes", "tag": "rust"}),
    ];
    for article in articles {
        if let Value::Object(body) = article {
            store.insert("articles", body);
        }
    }
    store
}
