// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.
//!
//! `MockService` backs a real `kube::Client`. Requests matching a canned
//! response get that response; every other GET, PATCH or DELETE is served
//! from a small in-memory object store that mimics server-side apply
//! (per-field ownership, conflicts, resourceVersion bumps).

use http::{header, Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// One request as seen by the mock API server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

struct StoredObject {
    object: Value,
    owners: HashMap<String, String>,
}

#[derive(Default)]
struct State {
    canned: HashMap<(String, String), VecDeque<(u16, String)>>,
    objects: HashMap<String, StoredObject>,
    requests: Vec<RecordedRequest>,
    revision: u64,
}

/// A mock HTTP service that plays the Kubernetes API server.
#[derive(Clone, Default)]
pub struct MockService {
    state: Arc<Mutex<State>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method` on the exact `path`; the last one repeats
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .canned
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Seed the store with an object whose spec fields are owned by `manager`
    pub fn with_object(self, path: &str, object: Value, manager: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let owners = spec_keys(&object)
                .into_iter()
                .map(|k| (k, manager.to_string()))
                .collect();
            state
                .objects
                .insert(path.to_string(), StoredObject { object, owners });
        }
        self
    }

    /// Build a kube Client talking to this mock
    pub fn client(&self) -> Client {
        Client::new(self.clone(), "default")
    }

    pub fn into_client(self) -> Client {
        self.client()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    pub fn object(&self, path: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(path)
            .map(|o| o.object.clone())
    }

    fn respond(&self, request: RecordedRequest) -> (u16, String) {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.requests.push(request.clone());

        let key = (request.method.clone(), request.path.clone());
        if let Some(queue) = state.canned.get_mut(&key) {
            let next = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(response) = next {
                return response;
            }
        }

        let (namespace, name) = split_path(&request.path);
        match request.method.as_str() {
            "GET" => match state.objects.get(&request.path) {
                Some(stored) => (200, stored.object.to_string()),
                None => (404, not_found_json("object", &name)),
            },
            "DELETE" => match state.objects.remove(&request.path) {
                Some(stored) => (200, stored.object.to_string()),
                None => (404, not_found_json("object", &name)),
            },
            "PATCH" => {
                let body = request.body.clone().unwrap_or(Value::Null);
                let manager = request.query_param("fieldManager").unwrap_or_default().to_string();
                let force = request.query_param("force") == Some("true");

                match state.objects.get_mut(&request.path) {
                    Some(stored) => {
                        for key in spec_keys(&body) {
                            let owner = stored.owners.get(&key);
                            let changed = stored.object["spec"].get(&key) != body["spec"].get(&key);
                            if let Some(owner) = owner {
                                if owner != &manager && changed && !force {
                                    return (409, conflict_json(&key, owner));
                                }
                            }
                        }

                        let before = stored.object.clone();
                        merge_apply(&mut stored.object, &body);
                        for key in spec_keys(&body) {
                            stored.owners.insert(key, manager.clone());
                        }
                        if stored.object != before {
                            state.revision += 1;
                            stored.object["metadata"]["resourceVersion"] =
                                json!(state.revision.to_string());
                        }
                        (200, stored.object.to_string())
                    }
                    None => {
                        state.revision += 1;
                        let mut object = json!({"metadata": {}});
                        merge_apply(&mut object, &body);
                        let metadata = &mut object["metadata"];
                        metadata["name"] = json!(name);
                        if let Some(ns) = namespace {
                            metadata["namespace"] = json!(ns);
                        }
                        metadata["uid"] = json!(format!("uid-{}", name));
                        metadata["resourceVersion"] = json!(state.revision.to_string());
                        metadata["creationTimestamp"] = json!("2026-01-01T00:00:00Z");

                        let owners = spec_keys(&body)
                            .into_iter()
                            .map(|k| (k, manager.clone()))
                            .collect();
                        let text = object.to_string();
                        state
                            .objects
                            .insert(request.path.clone(), StoredObject { object, owners });
                        (201, text)
                    }
                }
            }
            _ => (405, status_json(405, "MethodNotAllowed", "method not allowed")),
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let this = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let bytes = body.collect().await?.to_bytes();
            let recorded = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().unwrap_or_default().to_string(),
                content_type: parts
                    .headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&bytes).ok(),
            };

            let (status, text) = this.respond(recorded);
            let response = Response::builder()
                .status(status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(text.into_bytes()))?;
            Ok(response)
        })
    }
}

/// `(namespace, name)` from `/apis/{group}/{version}/[namespaces/{ns}/]{plural}/{name}`
fn split_path(path: &str) -> (Option<String>, String) {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let name = segments.last().copied().unwrap_or_default().to_string();
    let namespace = segments
        .iter()
        .position(|s| *s == "namespaces")
        .filter(|pos| segments.len() > pos + 3)
        .map(|pos| segments[pos + 1].to_string());
    (namespace, name)
}

fn spec_keys(object: &Value) -> Vec<String> {
    object
        .get("spec")
        .and_then(Value::as_object)
        .map(|spec| spec.keys().cloned().collect())
        .unwrap_or_default()
}

fn merge_maps(target: &mut Value, patch: Option<&Value>) {
    let Some(Value::Object(patch)) = patch else {
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Some(target) = target.as_object_mut() {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

fn merge_apply(target: &mut Value, body: &Value) {
    for key in ["apiVersion", "kind"] {
        if let Some(v) = body.get(key) {
            target[key] = v.clone();
        }
    }
    for key in ["labels", "annotations"] {
        if let Some(patch) = body["metadata"].get(key) {
            merge_maps(&mut target["metadata"][key], Some(patch));
        }
    }
    merge_maps(&mut target["spec"], body.get("spec"));
}

pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(
        404,
        "NotFound",
        &format!("{} \"{}\" not found", resource, name),
    )
}

/// Create a 409 field ownership conflict response
pub fn conflict_json(field: &str, manager: &str) -> String {
    status_json(
        409,
        "Conflict",
        &format!(
            "Apply failed with 1 conflict: conflict with \"{}\": .spec.{}",
            manager, field
        ),
    )
}
