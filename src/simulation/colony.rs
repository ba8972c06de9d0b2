//! Colony engine - world, dispatcher and render sinks driven tick by tick

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{SurvivorId, Tick};
use crate::decision::dispatcher::Dispatcher;
use crate::decision::oracle::DecisionOracle;
use crate::ecs::snapshot::WorldSnapshot;
use crate::ecs::world::World;
use crate::render::RenderSink;
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};

/// What happened during one `Colony::step`
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: Tick,
    /// Decision outcomes applied at the start of the step, then the tick's events
    pub events: Vec<SimulationEvent>,
    /// Survivor whose oracle request is outstanding after the step
    pub in_flight: Option<SurvivorId>,
}

pub struct Colony {
    world: World,
    dispatcher: Dispatcher,
    sinks: Vec<Box<dyn RenderSink>>,
}

impl Colony {
    pub fn new(world: World, oracle: Arc<dyn DecisionOracle>) -> Self {
        let timeout = world.config.oracle_timeout_ms.map(Duration::from_millis);
        Self {
            world,
            dispatcher: Dispatcher::new(oracle, timeout),
            sinks: Vec::new(),
        }
    }

    /// Generate a fresh island from `config`
    pub fn generate(config: SimulationConfig, oracle: Arc<dyn DecisionOracle>) -> Result<Self> {
        Ok(Self::new(World::generate(config)?, oracle))
    }

    pub fn with_sink(mut self, sink: impl RenderSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world, self.dispatcher.in_flight())
    }

    /// One full step: apply a finished decision at the boundary, run the
    /// tick pipeline, then hand the result to every sink.
    pub async fn step(&mut self) -> Result<TickReport> {
        let mut events = Vec::new();
        self.dispatcher.collect(&mut self.world, &mut events);
        events.extend(run_simulation_tick(&mut self.world, &mut self.dispatcher)?);

        if !self.sinks.is_empty() {
            let snapshot = self.snapshot();
            for sink in self.sinks.iter_mut() {
                if let Err(err) = sink.render(&snapshot) {
                    warn!(error = %err, "Render sink failed");
                }
            }
        }

        // let the oracle task make progress between ticks
        tokio::task::yield_now().await;

        Ok(TickReport {
            tick: self.world.current_tick(),
            events,
            in_flight: self.dispatcher.in_flight(),
        })
    }

    /// Run `ticks` steps, one per `period`. Stops early once nobody is left.
    pub async fn run(&mut self, ticks: u64, period: Duration) -> Result<()> {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for _ in 0..ticks {
            timer.tick().await;
            self.step().await?;
            if self.world.survivors.is_empty() {
                info!(tick = self.world.current_tick(), "No survivors remain");
                break;
            }
        }

        info!(
            tick = self.world.current_tick(),
            survivors = self.world.survivors.len(),
            mobs = self.world.mobs.len(),
            "Run finished"
        );
        Ok(())
    }

    /// Wait for an outstanding decision and apply it
    pub async fn settle(&mut self) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        self.dispatcher.settle(&mut self.world, &mut events).await;
        events
    }
}
