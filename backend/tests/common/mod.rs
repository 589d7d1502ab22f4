//! Test doubles for the hosted model

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use ingres_backend::external::{GenerateRequest, LlmClient};
use ingres_backend::{AppError, AppResult};

/// Replays queued replies in order and records every request
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedLlm {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_replies<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let llm = Self::default();
        for reply in replies {
            llm.push_reply(reply);
        }
        Arc::new(llm)
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_failure(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(AppError::ModelService(message.to_string())));
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(&self, request: GenerateRequest) -> AppResult<String> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::ModelService("no scripted reply left".into())))
    }
}

/// Holds calls open until released, to observe in-flight turns.
///
/// Calls before `hold_from` answer at once; later calls wait on `release`.
/// Replies are served in order, the last one repeating.
pub struct GatedLlm {
    replies: Vec<String>,
    hold_from: usize,
    calls: Mutex<usize>,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedLlm {
    pub fn new(reply: &str) -> Arc<Self> {
        Self::build(vec![reply.to_string()], 0)
    }

    /// Answers the first call with `first`, then holds the second
    pub fn holding_second(first: &str, second: &str) -> Arc<Self> {
        Self::build(vec![first.to_string(), second.to_string()], 1)
    }

    fn build(replies: Vec<String>, hold_from: usize) -> Arc<Self> {
        Arc::new(Self {
            replies,
            hold_from,
            calls: Mutex::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LlmClient for GatedLlm {
    async fn generate(&self, _request: GenerateRequest) -> AppResult<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls - 1
        };
        if index >= self.hold_from {
            self.entered.notify_one();
            self.release.notified().await;
        }
        let reply = self.replies.get(index).or(self.replies.last());
        Ok(reply.cloned().unwrap_or_default())
    }
}

pub const CHENNAI_FORECAST: &str = r#"{"Recharge_MCM":10,"WaterLevel_m":5,"Rainfall_mm":900,"confidence":"Medium","rationale":"r"}"#;
