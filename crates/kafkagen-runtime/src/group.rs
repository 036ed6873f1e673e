//! Request/response pairing
//!
//! A group has two slots. Each may be filled once; the fill that supplies the
//! second message completes the group and is the only one handed the pair.

use crate::error::{GenerateError, GenerateResult};
use kafkagen_core::{MessageData, MessageKind};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Which half of a group a message fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Request,
    Response,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Request => f.write_str("request"),
            Slot::Response => f.write_str("response"),
        }
    }
}

/// Both halves of a completed group.
#[derive(Debug, Clone)]
pub struct CompletedPair {
    pub request: Arc<MessageData>,
    pub response: Arc<MessageData>,
}

#[derive(Debug, Default)]
struct Slots {
    request: Option<Arc<MessageData>>,
    response: Option<Arc<MessageData>>,
}

/// Two slots under one lock.
#[derive(Debug)]
struct PairSlots {
    label: String,
    slots: Mutex<Slots>,
}

impl PairSlots {
    fn new(label: String) -> Self {
        Self {
            label,
            slots: Mutex::new(Slots::default()),
        }
    }

    fn fill(&self, slot: Slot, msg: MessageData) -> GenerateResult<Option<CompletedPair>> {
        let mut slots = self.slots.lock();
        let target = match slot {
            Slot::Request => &mut slots.request,
            Slot::Response => &mut slots.response,
        };
        if let Some(existing) = target {
            return Err(GenerateError::Conflict {
                group: self.label.clone(),
                slot,
                existing: existing.name.clone(),
                incoming: msg.name,
            });
        }
        *target = Some(Arc::new(msg));

        match (&slots.request, &slots.response) {
            (Some(request), Some(response)) => Ok(Some(CompletedPair {
                request: Arc::clone(request),
                response: Arc::clone(response),
            })),
            _ => Ok(None),
        }
    }

    /// The slot still waiting for a message, if exactly one is.
    fn missing(&self) -> Option<Slot> {
        let slots = self.slots.lock();
        match (&slots.request, &slots.response) {
            (Some(_), None) => Some(Slot::Response),
            (None, Some(_)) => Some(Slot::Request),
            _ => None,
        }
    }
}

/// The request/response pair sharing one api key.
#[derive(Debug)]
pub struct ApiGroup {
    api_key: i16,
    pair: PairSlots,
}

impl ApiGroup {
    pub fn new(api_key: i16) -> Self {
        Self {
            api_key,
            pair: PairSlots::new(format!("api key {api_key}")),
        }
    }

    pub fn api_key(&self) -> i16 {
        self.api_key
    }

    /// Fill the slot matching the message kind.
    ///
    /// Returns the pair when this call completed the group.
    pub fn fill(&self, msg: MessageData) -> GenerateResult<Option<CompletedPair>> {
        let slot = match msg.kind {
            MessageKind::Request => Slot::Request,
            MessageKind::Response => Slot::Response,
            MessageKind::Header => {
                return Err(GenerateError::Fault(format!(
                    "header {} routed to api key {}",
                    msg.name, self.api_key
                )));
            }
        };
        self.pair.fill(slot, msg)
    }

    pub fn missing(&self) -> Option<Slot> {
        self.pair.missing()
    }
}

/// The request and response header pair.
#[derive(Debug)]
pub struct HeaderGroup {
    request_name: String,
    response_name: String,
    pair: PairSlots,
}

impl HeaderGroup {
    pub fn new(request_name: impl Into<String>, response_name: impl Into<String>) -> Self {
        Self {
            request_name: request_name.into(),
            response_name: response_name.into(),
            pair: PairSlots::new("headers".to_string()),
        }
    }

    /// Fill the slot whose configured name matches exactly.
    pub fn fill(&self, msg: MessageData) -> GenerateResult<Option<CompletedPair>> {
        let slot = if msg.name == self.request_name {
            Slot::Request
        } else if msg.name == self.response_name {
            Slot::Response
        } else {
            return Err(GenerateError::Fault(format!(
                "unexpected header {} (expected {} or {})",
                msg.name, self.request_name, self.response_name
            )));
        };
        self.pair.fill(slot, msg)
    }

    pub fn missing(&self) -> Option<Slot> {
        self.pair.missing()
    }
}

#[cfg(test)]
#[path = "group/group_tests.rs"]
mod group_tests;
