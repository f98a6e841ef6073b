//! Record synthesizer.
//!
//! The Synthesizer fabricates the activity of the simulated MAS:
//! - Picks the emitting agent for each topic of each round
//! - Places the event somewhere inside the lookback window
//! - Expands communication events into correlated send/receive pairs
//!
//! Draw order per event is fixed (agent, interval, then receiver for
//! `msg`), so a seeded or scripted context fully determines the output.

use crate::config::GeneratorConfig;
use crate::record::{LogEvent, LogRecord};
use crate::topics::Topic;
use chrono::{Duration, NaiveDateTime};
use maslog_env::{format_timestamp, is_representable, AgentId, GenContext, GenError, GenResult};
use tracing::debug;

/// Synthesizes one generation pass against a context.
pub struct Synthesizer<'a, C: GenContext + ?Sized> {
    /// Validated configuration
    config: &'a GeneratorConfig,

    /// Clock and entropy source
    ctx: &'a mut C,

    /// Generation time, read once per pass
    now: NaiveDateTime,
}

impl<'a, C: GenContext + ?Sized> Synthesizer<'a, C> {
    /// Creates a synthesizer after validating the configuration.
    ///
    /// The whole lookback window must fall within years 0000 to 9999, so
    /// every timestamp renders as `YYYY-MM-DDTHH:MM:SS`.
    pub fn new(config: &'a GeneratorConfig, ctx: &'a mut C) -> GenResult<Self> {
        config.validate()?;
        let now = ctx.now();

        let oldest = now.checked_sub_signed(Duration::seconds(config.lookback_secs as i64));
        if !is_representable(&now) || !oldest.as_ref().is_some_and(is_representable) {
            return Err(GenError::invalid_config(format!(
                "lookback window of {}s before {} leaves years 0000-9999",
                config.lookback_secs,
                format_timestamp(&now)
            )));
        }

        Ok(Self { config, ctx, now })
    }

    /// Returns the generation time.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Draws an agent uniformly from the population.
    pub fn draw_agent(&mut self) -> AgentId {
        let max = u64::from(self.config.agent_count) - 1;
        AgentId::from_index(self.ctx.draw(0, max))
    }

    /// Draws a receiver uniformly from the population minus `sender`.
    ///
    /// Samples an index over the `agent_count - 1` remaining agents and
    /// steps over the sender's slot. Needs a population of at least two,
    /// which `validate` guarantees whenever `msg` is configured.
    pub fn draw_receiver(&mut self, sender: AgentId) -> AgentId {
        let max = u64::from(self.config.agent_count) - 2;
        let index = self.ctx.draw(0, max);
        if index >= sender.index() {
            AgentId::from_index(index + 1)
        } else {
            AgentId::from_index(index)
        }
    }

    /// Draws a timestamp between 1 and `lookback_secs` seconds before now.
    pub fn draw_timestamp(&mut self) -> NaiveDateTime {
        let interval = self.ctx.draw(1, self.config.lookback_secs);
        self.now - Duration::seconds(interval as i64)
    }

    /// Synthesizes the event for one topic, appending its records to `out`.
    pub fn synthesize_event(&mut self, topic: Topic, out: &mut Vec<LogEvent>) {
        let agent = self.draw_agent();
        let timestamp = self.draw_timestamp();
        let mas_id = self.config.mas_id;

        if topic.is_communication() {
            let receiver = self.draw_receiver(agent);
            out.extend(LogEvent::acl_pair(mas_id, agent, receiver, timestamp));
        } else {
            out.push(LogEvent::plain(mas_id, agent, timestamp, topic));
        }
    }

    /// Runs every round and returns the events, most recent first.
    pub fn synthesize(mut self) -> Vec<LogEvent> {
        let mut events = Vec::with_capacity(self.config.expected_record_count());

        for _ in 0..self.config.iterations {
            for &topic in &self.config.topics {
                self.synthesize_event(topic, &mut events);
            }
        }

        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!(
            "Synthesized {} records ({} rounds x {} topics, seed={})",
            events.len(),
            self.config.iterations,
            self.config.topics.len(),
            self.ctx.seed()
        );

        events
    }
}

/// Generates the full, sorted and rendered record stream.
pub fn generate<C: GenContext + ?Sized>(
    config: &GeneratorConfig,
    ctx: &mut C,
) -> GenResult<Vec<LogRecord>> {
    let events = Synthesizer::new(config, ctx)?.synthesize();
    Ok(events.into_iter().map(LogEvent::render).collect())
}
