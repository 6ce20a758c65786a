//! 테스트용 기록 게이트웨이.

use crate::error::RemoteError;
use crate::gateway::{Gateway, Query};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Mutex;

/// 기록된 호출.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// 호출을 기록하고 고정 응답을 반환하는 게이트웨이.
pub struct RecordingGateway {
    response: Result<Value, RemoteError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingGateway {
    pub fn responding(response: Value) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: RemoteError) -> Self {
        Self {
            response: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no gateway call recorded")
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Value, RemoteError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            query: query.to_vec(),
            body: body.cloned(),
        });
        self.response.clone()
    }
}
