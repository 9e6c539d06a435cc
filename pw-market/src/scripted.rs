//! In-memory backend answering from a script. Used by tests and the tester's
//! logic mode.
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::MarketApi;
use crate::error::TransportError;
use crate::land::{Land, LandId};
use crate::outcome::PurchaseResponse;
use crate::request::PurchaseRequest;

#[derive(Default)]
struct Script {
    lands: BTreeMap<LandId, Land>,
    replies: VecDeque<Result<PurchaseResponse, TransportError>>,
    purchases: Vec<PurchaseRequest>,
    detail_fetches: usize,
}

/// Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct ScriptedMarketApi {
    script: Rc<RefCell<Script>>,
}

impl ScriptedMarketApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_land(self, land: Land) -> Self {
        self.script.borrow_mut().lands.insert(land.id, land);
        self
    }

    /// Queue the reply for the next purchase call.
    #[must_use]
    pub fn reply(self, reply: Result<PurchaseResponse, TransportError>) -> Self {
        self.script.borrow_mut().replies.push_back(reply);
        self
    }

    #[must_use]
    pub fn purchase_calls(&self) -> usize {
        self.script.borrow().purchases.len()
    }

    #[must_use]
    pub fn purchases(&self) -> Vec<PurchaseRequest> {
        self.script.borrow().purchases.clone()
    }

    #[must_use]
    pub fn detail_fetches(&self) -> usize {
        self.script.borrow().detail_fetches
    }
}

#[async_trait::async_trait(?Send)]
impl MarketApi for ScriptedMarketApi {
    async fn fetch_land(&self, id: LandId) -> Result<Land, TransportError> {
        let mut script = self.script.borrow_mut();
        script.detail_fetches += 1;
        script
            .lands
            .get(&id)
            .cloned()
            .ok_or(TransportError::Status(404))
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, TransportError> {
        let mut script = self.script.borrow_mut();
        script.purchases.push(request.clone());
        script.replies.pop_front().unwrap_or_else(|| {
            Err(TransportError::Network(
                "no scripted reply for purchase".to_string(),
            ))
        })
    }
}
