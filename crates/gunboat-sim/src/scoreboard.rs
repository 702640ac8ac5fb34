//! Per-kind statistics accumulated over a session.

use std::collections::BTreeMap;

use gunboat_ai::controllers::registry;
use gunboat_core::enums::AgentKind;
use gunboat_core::state::ScoreRow;
use gunboat_core::stats::AgentStats;

/// Statistics keyed by agent kind. Every boat of a kind feeds the same row.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    rows: BTreeMap<AgentKind, AgentStats>,
}

impl Scoreboard {
    /// Mutable stats for `kind`, created on first use.
    pub fn entry(&mut self, kind: AgentKind) -> &mut AgentStats {
        self.rows.entry(kind).or_default()
    }

    pub fn get(&self, kind: AgentKind) -> Option<&AgentStats> {
        self.rows.get(&kind)
    }

    /// Scoreboard lines in agent-kind order.
    pub fn rows(&self) -> Vec<ScoreRow> {
        self.rows
            .iter()
            .map(|(kind, stats)| ScoreRow::new(*kind, registry::display_name(*kind), stats))
            .collect()
    }
}
