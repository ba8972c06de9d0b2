//! Asynchronous source of survivor decisions
//!
//! The engine plugs in a [`DecisionOracle`] so a colony can run against a
//! language model, the built-in heuristic, or a scripted fixture.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::SurvivorId;
use crate::ecs::snapshot::WorldSnapshot;
use crate::entity::action::ActionKind;
use crate::entity::item::Item;
use crate::entity::survivor::Survivor;

/// Everything an oracle sees: a frozen world and the survivor to decide for
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRequest {
    pub snapshot: WorldSnapshot,
    pub survivor: SurvivorId,
}

impl DecisionRequest {
    pub fn new(snapshot: WorldSnapshot, survivor: SurvivorId) -> Self {
        Self { snapshot, survivor }
    }

    /// The survivor as captured in the snapshot
    pub fn subject(&self) -> Result<&Survivor> {
        self.snapshot
            .survivor(self.survivor)
            .ok_or_else(|| ColonyError::EntityNotFound(self.survivor.to_string()))
    }
}

/// Structured answer from an oracle
///
/// Field names follow the JSON contract (`craftingRecipeName`, `itemToPlace`, ...).
/// Item fields that do not name a known item are treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub action: ActionKind,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub crafting_recipe_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_item")]
    pub item_to_place: Option<Item>,
    #[serde(default, deserialize_with = "lenient_item")]
    pub deposit_item: Option<Item>,
    #[serde(default, deserialize_with = "lenient_item")]
    pub withdraw_item: Option<Item>,
    #[serde(default, deserialize_with = "lenient_item")]
    pub give_item: Option<Item>,
    #[serde(default)]
    pub target_survivor_name: Option<String>,
}

fn lenient_item<'de, D>(deserializer: D) -> std::result::Result<Option<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

impl DecisionResponse {
    pub fn new(action: ActionKind, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            reasoning: reasoning.into(),
            message: None,
            crafting_recipe_name: None,
            item_to_place: None,
            deposit_item: None,
            withdraw_item: None,
            give_item: None,
            target_survivor_name: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn craft(recipe: impl Into<String>, reasoning: impl Into<String>) -> Self {
        let mut response = Self::new(ActionKind::Crafting, reasoning);
        response.crafting_recipe_name = Some(recipe.into());
        response
    }

    pub fn place(item: Item, reasoning: impl Into<String>) -> Self {
        let mut response = Self::new(ActionKind::PlacingItem, reasoning);
        response.item_to_place = Some(item);
        response
    }

    pub fn deposit(item: Item, reasoning: impl Into<String>) -> Self {
        let mut response = Self::new(ActionKind::DepositingItem, reasoning);
        response.deposit_item = Some(item);
        response
    }

    pub fn withdraw(item: Item, reasoning: impl Into<String>) -> Self {
        let mut response = Self::new(ActionKind::WithdrawingItem, reasoning);
        response.withdraw_item = Some(item);
        response
    }

    pub fn give(item: Item, recipient: impl Into<String>, reasoning: impl Into<String>) -> Self {
        let mut response = Self::new(ActionKind::GivingItem, reasoning);
        response.give_item = Some(item);
        response.target_survivor_name = Some(recipient.into());
        response
    }

    /// The item parameter for the chosen action, falling back through the
    /// other item fields when the oracle filled the wrong one
    pub fn target_item(&self) -> Option<Item> {
        let preferred = match self.action {
            ActionKind::PlacingItem => self.item_to_place,
            ActionKind::DepositingItem => self.deposit_item,
            ActionKind::WithdrawingItem => self.withdraw_item,
            ActionKind::GivingItem => self.give_item,
            _ => None,
        };
        preferred
            .or(self.item_to_place)
            .or(self.deposit_item)
            .or(self.withdraw_item)
            .or(self.give_item)
    }
}

/// Trait for choosing a survivor's next action
///
/// Implementations must be cheap to share across tasks; the dispatcher holds
/// them behind an `Arc` and calls `decide` from a spawned task.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn decide(&self, request: DecisionRequest) -> Result<DecisionResponse>;
}

/// Replays queued answers in order. Used by tests and demos.
///
/// An empty queue answers IDLE. Failures are queued as messages and surface
/// as `OracleFailure`.
#[derive(Default)]
pub struct ScriptedOracle {
    script: Mutex<VecDeque<std::result::Result<DecisionResponse, String>>>,
    requests: Mutex<Vec<SurvivorId>>,
    delay: Option<Duration>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, response: DecisionResponse) {
        self.lock_script().push_back(Ok(response));
    }

    pub fn push_failure(&self, reason: impl Into<String>) {
        self.lock_script().push_back(Err(reason.into()));
    }

    /// Survivors asked about so far, in call order
    pub fn requests(&self) -> Vec<SurvivorId> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Highest number of calls ever in progress at once
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn lock_script(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<std::result::Result<DecisionResponse, String>>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Decrements the active-call counter even when the call is aborted
struct ActiveCall<'a>(&'a AtomicUsize);

impl Drop for ActiveCall<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn decide(&self, request: DecisionRequest) -> Result<DecisionResponse> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let _call = ActiveCall(&self.active);
        self.max_active.fetch_max(now, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.survivor);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.lock_script().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(ColonyError::OracleFailure(reason)),
            None => Ok(DecisionResponse::new(ActionKind::Idle, "nothing scripted")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Position;
    use crate::ecs::world::World;
    use crate::world::grid::{Grid, Tile};

    fn request() -> DecisionRequest {
        let mut world = World::new(SimulationConfig::default(), Grid::new(4, Tile::Grass));
        let id = world.spawn_survivor("Alice", Position::new(0, 0));
        DecisionRequest::new(WorldSnapshot::capture(&world, Some(id)), id)
    }

    #[test]
    fn test_response_parses_contract_fields() {
        let json = r#"{
            "action": "GIVING_ITEM",
            "reasoning": "Bob needs a weapon",
            "message": "Catch!",
            "giveItem": "WOODEN_SWORD",
            "targetSurvivorName": "Bob"
        }"#;
        let response: DecisionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.action, ActionKind::GivingItem);
        assert_eq!(response.give_item, Some(Item::WoodenSword));
        assert_eq!(response.target_survivor_name.as_deref(), Some("Bob"));
        assert_eq!(response.message.as_deref(), Some("Catch!"));
        assert_eq!(response.target_item(), Some(Item::WoodenSword));
    }

    #[test]
    fn test_unknown_item_is_absent() {
        let json = r#"{"action": "PLACING_ITEM", "reasoning": "", "itemToPlace": "THRONE"}"#;
        let response: DecisionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.item_to_place, None);

        let json = r#"{"action": "DEPOSITING_ITEM", "depositItem": null}"#;
        let response: DecisionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.deposit_item, None);
        assert_eq!(response.reasoning, "");
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"{"action": "DANCING", "reasoning": "fun"}"#;
        assert!(serde_json::from_str::<DecisionResponse>(json).is_err());
    }

    #[test]
    fn test_request_subject() {
        let req = request();
        assert_eq!(req.subject().unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_scripted_oracle_replays_in_order() {
        let oracle = ScriptedOracle::new();
        oracle.push(DecisionResponse::new(ActionKind::GatheringWood, "wood"));
        oracle.push_failure("network down");

        let first = oracle.decide(request()).await.unwrap();
        assert_eq!(first.action, ActionKind::GatheringWood);

        let second = oracle.decide(request()).await;
        assert!(matches!(second, Err(ColonyError::OracleFailure(_))));

        let third = oracle.decide(request()).await.unwrap();
        assert_eq!(third.action, ActionKind::Idle);

        assert_eq!(oracle.requests().len(), 3);
        assert_eq!(oracle.max_concurrent(), 1);
    }
}
