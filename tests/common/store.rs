//! Loose-arity handler set over an in-memory record map.
//!
//! Completions are shaped the way hand-written handlers tend to be, so the
//! enforcer has something to normalize:
//!
//! * search: `(null, records, total, page)`
//! * find: `(null, record)` on a hit, `(error)` on a miss
//! * create, update: `(null, record)` or `(error)`
//! * delete: `()` on a hit, `(error)` on a miss
//!
//! Update reads the existing record through the table's own `find`.

use handler_enforcer::{
    Callback, EnforcerError, EnforcerResult, HandlerTable, Operation, Request, handler,
};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;
use uuid::Uuid;

type Collections = HashMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    data: Arc<RwLock<Collections>>,
    // Completions run on this runtime when set, after the handler returns
    spawn_on: Option<Handle>,
}

pub fn not_found(resource_type: &str, id: &str) -> Value {
    json!({
        "status": "404",
        "code": "ENOTFOUND",
        "detail": format!("{} '{}' not found", resource_type, id),
    })
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawned(handle: Handle) -> Self {
        Self {
            spawn_on: Some(handle),
            ..Self::default()
        }
    }

    pub fn insert(&self, resource_type: &str, mut body: Map<String, Value>) -> Value {
        let id = match body.get("id") {
            Some(Value::String(s)) => s.clone(),
            _ => Uuid::new_v4().to_string(),
        };
        body.insert("id".to_string(), json!(id));
        let record = Value::Object(body);
        self.data
            .write()
            .unwrap()
            .entry(resource_type.to_string())
            .or_default()
            .insert(id, record.clone());
        record
    }

    pub fn count(&self, resource_type: &str) -> usize {
        self.data
            .read()
            .unwrap()
            .get(resource_type)
            .map_or(0, BTreeMap::len)
    }

    fn get(&self, resource_type: &str, id: &str) -> Option<Value> {
        self.data
            .read()
            .unwrap()
            .get(resource_type)
            .and_then(|c| c.get(id))
            .cloned()
    }

    fn remove(&self, resource_type: &str, id: &str) -> bool {
        self.data
            .write()
            .unwrap()
            .get_mut(resource_type)
            .and_then(|c| c.remove(id))
            .is_some()
    }

    /// Filter on `params.filter` equality, then page with
    /// `params.page.offset` and `params.page.limit`.
    fn search(&self, resource_type: &str, params: Option<&Value>) -> (Vec<Value>, usize) {
        let filter = params.and_then(|p| p.get("filter")).and_then(Value::as_object);
        let page = params.and_then(|p| p.get("page"));
        let offset = page_value(page, "offset").unwrap_or(0);
        let limit = page_value(page, "limit").unwrap_or(usize::MAX);

        let data = self.data.read().unwrap();
        let matches: Vec<&Value> = data
            .get(resource_type)
            .map(|c| {
                c.values()
                    .filter(|r| filter.is_none_or(|f| f.iter().all(|(k, v)| r.get(k) == Some(v))))
                    .collect()
            })
            .unwrap_or_default();

        let total = matches.len();
        let records = matches.into_iter().skip(offset).take(limit).cloned().collect();
        (records, total)
    }

    fn complete<F>(&self, callback: Callback, work: F)
    where
        F: FnOnce() -> Vec<Value> + Send + 'static,
    {
        match &self.spawn_on {
            Some(handle) => {
                handle.spawn(async move { callback(work()) });
            }
            None => callback(work()),
        }
    }

    pub fn handler_table(&self) -> HandlerTable {
        let store = self.clone();
        let search = handler(move |_table, request, _args, callback| {
            let worker = store.clone();
            let request = request.clone();
            store.complete(callback, move || {
                let (records, total) = worker.search(&request.resource_type, request.params());
                vec![Value::Null, json!(records), json!(total), json!({"more": false})]
            });
            Ok(())
        });

        let store = self.clone();
        let find = handler(move |_table, request, _args, callback| {
            let id = require_id(request, Operation::Find)?;
            let worker = store.clone();
            let resource_type = request.resource_type.clone();
            store.complete(callback, move || match worker.get(&resource_type, &id) {
                Some(record) => vec![Value::Null, record],
                None => vec![not_found(&resource_type, &id)],
            });
            Ok(())
        });

        let store = self.clone();
        let create = handler(move |_table, request, _args, callback| {
            let body = require_body(request, Operation::Create)?;
            let worker = store.clone();
            let resource_type = request.resource_type.clone();
            store.complete(callback, move || {
                vec![Value::Null, worker.insert(&resource_type, body)]
            });
            Ok(())
        });

        let store = self.clone();
        let update = handler(move |table, request, _args, callback| {
            let id = require_id(request, Operation::Update)?;
            let body = require_body(request, Operation::Update)?;
            let worker = store.clone();
            let resource_type = request.resource_type.clone();
            table.find(request, move |[err, existing]| {
                let Value::Object(mut record) = existing else {
                    callback(vec![err]);
                    return;
                };
                record.extend(body.clone());
                record.insert("id".to_string(), json!(id));
                callback(vec![Value::Null, worker.insert(&resource_type, record)]);
            })
        });

        let store = self.clone();
        let delete = handler(move |_table, request, _args, callback| {
            let id = require_id(request, Operation::Delete)?;
            let worker = store.clone();
            let resource_type = request.resource_type.clone();
            store.complete(callback, move || {
                if worker.remove(&resource_type, &id) {
                    Vec::new()
                } else {
                    vec![not_found(&resource_type, &id)]
                }
            });
            Ok(())
        });

        HandlerTable::new()
            .with(Operation::Search, search)
            .with(Operation::Find, find)
            .with(Operation::Create, create)
            .with(Operation::Update, update)
            .with(Operation::Delete, delete)
    }
}

fn page_value(page: Option<&Value>, key: &str) -> Option<usize> {
    page.and_then(|p| p.get(key))
        .and_then(Value::as_u64)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
}

fn require_id(request: &Request, operation: Operation) -> EnforcerResult<String> {
    request
        .id()
        .ok_or_else(|| EnforcerError::invalid_request(format!("{} requires params.id", operation)))
}

fn require_body(request: &Request, operation: Operation) -> EnforcerResult<Map<String, Value>> {
    match &request.body {
        Some(Value::Object(body)) => Ok(body.clone()),
        _ => Err(EnforcerError::invalid_request(format!(
            "{} requires an object body",
            operation
        ))),
    }
}
