//! Single-flight decision dispatcher
//!
//! At most one oracle request is outstanding at any time. The request runs
//! on a spawned tokio task; its answer waits in a oneshot channel until the
//! engine collects it at the next tick boundary.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::core::error::{ColonyError, Result};
use crate::core::types::{SurvivorId, Tick};
use crate::decision::apply::apply_decision;
use crate::decision::oracle::{DecisionOracle, DecisionRequest, DecisionResponse};
use crate::ecs::snapshot::WorldSnapshot;
use crate::ecs::world::World;
use crate::entity::action::Action;
use crate::entity::survivor::Survivor;
use crate::simulation::tick::SimulationEvent;
use crate::ui::state::LogCategory;

/// Outcome of the per-tick survivor scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nobody needs attention this tick
    None,
    /// Threatened at night; switch to FIGHTING without asking the oracle
    Forced(SurvivorId),
    /// Ask the oracle about this survivor
    Candidate(SurvivorId),
}

/// True when some mob is within the threat radius (Chebyshev)
pub fn is_threatened(world: &World, survivor: &Survivor) -> bool {
    let radius = world.config.threat_radius;
    world
        .mobs
        .iter()
        .any(|m| m.is_alive() && m.position.chebyshev(&survivor.position) < radius)
}

/// Whether a survivor may be handed to the oracle, ignoring the in-flight slot
pub fn is_eligible(world: &World, survivor: &Survivor) -> bool {
    let config = &world.config;
    let waited = world
        .current_tick()
        .saturating_sub(survivor.last_decision_tick);

    (survivor.action.is_idle() || waited > config.decision_cooldown_ticks)
        && survivor.stats.energy > config.min_decision_energy
        && survivor.stats.health > config.min_decision_health
}

/// Scan survivors in list order.
///
/// The first threatened survivor at night wins outright and ends the scan,
/// so no oracle candidate is chosen on that tick.
pub fn select_candidate(world: &World, in_flight: bool) -> Selection {
    let night = world.is_night();
    let mut candidate = None;

    for survivor in &world.survivors {
        if night && survivor.action != Action::Fighting && is_threatened(world, survivor) {
            return Selection::Forced(survivor.id);
        }
        if candidate.is_none() && !in_flight && is_eligible(world, survivor) {
            candidate = Some(survivor.id);
        }
    }

    candidate.map_or(Selection::None, Selection::Candidate)
}

/// The one outstanding request
struct PendingDecision {
    survivor: SurvivorId,
    issued_at: Tick,
    reply: oneshot::Receiver<Result<DecisionResponse>>,
    task: JoinHandle<()>,
}

/// Owns the single-flight slot and the oracle
pub struct Dispatcher {
    oracle: Arc<dyn DecisionOracle>,
    pending: Option<PendingDecision>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(oracle: Arc<dyn DecisionOracle>, timeout: Option<Duration>) -> Self {
        Self {
            oracle,
            pending: None,
            timeout,
        }
    }

    /// Survivor whose request is outstanding
    pub fn in_flight(&self) -> Option<SurvivorId> {
        self.pending.as_ref().map(|p| p.survivor)
    }

    /// Tick the outstanding request was issued on
    pub fn issued_at(&self) -> Option<Tick> {
        self.pending.as_ref().map(|p| p.issued_at)
    }

    /// Decisions pass: force a threatened survivor to fight, or issue one
    /// oracle request if the slot is free.
    ///
    /// Must run inside a tokio runtime.
    pub fn dispatch(&mut self, world: &mut World, events: &mut Vec<SimulationEvent>) {
        match select_candidate(world, self.pending.is_some()) {
            Selection::None => {}
            Selection::Forced(id) => {
                let tick = world.current_tick();
                let Some(survivor) = world.survivor_mut(id) else {
                    return;
                };
                survivor.action = Action::Fighting;
                survivor.last_decision_tick = tick;
                let name = survivor.name.clone();

                info!(survivor = %name, "Threat nearby, forced to fight");
                world.log_event(
                    LogCategory::Combat,
                    format!("{name} spots a threat and prepares to fight!"),
                );
                events.push(SimulationEvent::ForcedToFight { survivor: id });
            }
            Selection::Candidate(id) => {
                self.spawn_request(world, id);
                events.push(SimulationEvent::DecisionRequested { survivor: id });
            }
        }
    }

    fn spawn_request(&mut self, world: &World, survivor: SurvivorId) {
        let request = DecisionRequest::new(WorldSnapshot::capture(world, Some(survivor)), survivor);
        let oracle = Arc::clone(&self.oracle);
        let timeout = self.timeout;
        let (tx, rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let outcome = match timeout {
                Some(limit) => match tokio::time::timeout(limit, oracle.decide(request)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ColonyError::OracleFailure(format!(
                        "no answer within {}ms",
                        limit.as_millis()
                    ))),
                },
                None => oracle.decide(request).await,
            };
            // receiver gone means the request was cancelled
            let _ = tx.send(outcome);
        });

        info!(%survivor, tick = world.current_tick(), "Decision requested");
        self.pending = Some(PendingDecision {
            survivor,
            issued_at: world.current_tick(),
            reply: rx,
            task,
        });
    }

    /// Apply a finished response, if any, and free the slot.
    ///
    /// Called between ticks only. A request whose survivor has died is
    /// cancelled instead of applied.
    pub fn collect(&mut self, world: &mut World, events: &mut Vec<SimulationEvent>) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        if world.survivor(pending.survivor).is_none() {
            pending.task.abort();
            info!(survivor = %pending.survivor, "Survivor gone, decision cancelled");
            self.pending = None;
            return;
        }

        let outcome = match pending.reply.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                warn!(survivor = %pending.survivor, "Oracle task ended without an answer");
                Err(ColonyError::OracleFailure("oracle task ended without an answer".into()))
            }
        };

        let survivor = pending.survivor;
        self.pending = None;
        apply_decision(world, survivor, outcome, events);
    }

    /// Wait for the outstanding request to finish, then apply it.
    /// Useful for tests and for draining at shutdown.
    pub async fn settle(&mut self, world: &mut World, events: &mut Vec<SimulationEvent>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let outcome = pending.reply.await.unwrap_or_else(|_| {
            Err(ColonyError::OracleFailure(
                "oracle task ended without an answer".into(),
            ))
        });
        apply_decision(world, pending.survivor, outcome, events);
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Position;
    use crate::decision::oracle::ScriptedOracle;
    use crate::entity::action::ActionKind;
    use crate::world::grid::{Grid, Tile};

    fn world() -> World {
        let mut world = World::new(SimulationConfig::default(), Grid::new(12, Tile::Grass));
        world.spawn_survivor("Alice", Position::new(0, 0));
        world.spawn_survivor("Bob", Position::new(10, 10));
        world
    }

    fn to_night(world: &mut World) {
        while !world.is_night() {
            world.tick();
        }
    }

    #[test]
    fn test_first_eligible_survivor_selected() {
        let w = world();
        assert_eq!(select_candidate(&w, false), Selection::Candidate(SurvivorId(0)));
        assert_eq!(select_candidate(&w, true), Selection::None);
    }

    #[test]
    fn test_eligibility_thresholds() {
        let mut w = world();
        w.survivors[0].stats.energy = 10.0;
        w.survivors[1].stats.health = 20.0;
        assert_eq!(select_candidate(&w, false), Selection::None);

        w.survivors[1].stats.health = 20.5;
        assert_eq!(select_candidate(&w, false), Selection::Candidate(SurvivorId(1)));
    }

    #[test]
    fn test_cooldown_for_busy_survivors() {
        let mut w = world();
        for s in w.survivors.iter_mut() {
            s.action = Action::Exploring;
        }
        for _ in 0..40 {
            w.tick();
        }
        assert_eq!(select_candidate(&w, false), Selection::None);
        w.tick();
        assert_eq!(select_candidate(&w, false), Selection::Candidate(SurvivorId(0)));
    }

    #[test]
    fn test_night_threat_overrides() {
        let mut w = world();
        to_night(&mut w);
        w.spawn_mob(Position::new(7, 7));
        // Bob is within 4 on both axes; Alice is not
        assert_eq!(select_candidate(&w, false), Selection::Forced(SurvivorId(1)));

        w.survivors[1].action = Action::Fighting;
        assert_eq!(select_candidate(&w, false), Selection::Candidate(SurvivorId(0)));
    }

    #[test]
    fn test_threat_ignored_by_day() {
        let mut w = world();
        w.spawn_mob(Position::new(1, 1));
        assert_eq!(select_candidate(&w, false), Selection::Candidate(SurvivorId(0)));
    }

    #[tokio::test]
    async fn test_forced_fight_skips_oracle() {
        let mut w = world();
        to_night(&mut w);
        w.spawn_mob(Position::new(2, 2));
        let oracle = Arc::new(ScriptedOracle::new());
        let mut dispatcher = Dispatcher::new(oracle.clone(), None);

        let mut events = Vec::new();
        dispatcher.dispatch(&mut w, &mut events);
        assert_eq!(w.survivors[0].action, Action::Fighting);
        assert_eq!(w.survivors[0].last_decision_tick, w.current_tick());
        assert_eq!(events, vec![SimulationEvent::ForcedToFight { survivor: SurvivorId(0) }]);
        assert!(dispatcher.in_flight().is_none());
        assert!(oracle.requests().is_empty());
    }

    #[tokio::test]
    async fn test_single_flight_until_collected() {
        let mut w = world();
        let oracle = Arc::new(ScriptedOracle::new());
        oracle.push(DecisionResponse::new(ActionKind::Exploring, "see the island"));
        let mut dispatcher = Dispatcher::new(oracle.clone(), None);

        let mut events = Vec::new();
        dispatcher.dispatch(&mut w, &mut events);
        dispatcher.dispatch(&mut w, &mut events);
        assert_eq!(dispatcher.in_flight(), Some(SurvivorId(0)));
        assert_eq!(events.len(), 1);

        dispatcher.settle(&mut w, &mut events).await;
        assert!(dispatcher.in_flight().is_none());
        assert_eq!(w.survivors[0].action, Action::Exploring);
        assert_eq!(oracle.requests(), vec![SurvivorId(0)]);
    }

    #[tokio::test]
    async fn test_collect_applies_finished_answer() {
        let mut w = world();
        let oracle = Arc::new(ScriptedOracle::new());
        oracle.push(DecisionResponse::new(ActionKind::Resting, "nap"));
        let mut dispatcher = Dispatcher::new(oracle, None);

        dispatcher.dispatch(&mut w, &mut Vec::new());
        let mut events = Vec::new();
        for _ in 0..100 {
            tokio::task::yield_now().await;
            dispatcher.collect(&mut w, &mut events);
            if dispatcher.in_flight().is_none() {
                break;
            }
        }
        assert!(dispatcher.in_flight().is_none());
        assert_eq!(w.survivors[0].action, Action::Resting);
    }

    #[tokio::test]
    async fn test_dead_candidate_cancels_request() {
        let mut w = world();
        let oracle = Arc::new(ScriptedOracle::new().with_delay(Duration::from_secs(60)));
        let mut dispatcher = Dispatcher::new(oracle, None);

        dispatcher.dispatch(&mut w, &mut Vec::new());
        w.survivors.remove(0);

        let mut events = Vec::new();
        dispatcher.collect(&mut w, &mut events);
        assert!(dispatcher.in_flight().is_none());
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure() {
        let mut w = world();
        w.survivors[0].action = Action::Idle;
        let oracle = Arc::new(ScriptedOracle::new().with_delay(Duration::from_secs(60)));
        let mut dispatcher = Dispatcher::new(oracle, Some(Duration::from_millis(100)));

        dispatcher.dispatch(&mut w, &mut Vec::new());
        let mut events = Vec::new();
        dispatcher.settle(&mut w, &mut events).await;
        assert!(matches!(events[0], SimulationEvent::DecisionFailed { .. }));
        assert!(w.log.contains("Failed to get a new action for Alice."));
    }
}
