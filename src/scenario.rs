//! Booking scenario files
//!
//! A scenario is a service year plus an ordered list of user actions, stored
//! as JSON:
//!
//! ```json
//! {
//!   "year": 2021,
//!   "actions": [
//!     { "kind": "Select", "service": "VideoRecording" },
//!     { "kind": "Select", "service": "BlurayPackage" }
//!   ]
//! }
//! ```
//!
//! Replaying a scenario folds the actions from the empty selection, exactly
//! as a UI would call the selection manager.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::BookingError;
use crate::pricing::Quote;
use crate::selection::{evaluate_action, ActionEffect, SelectedServices, SelectionAction, SelectionOutcome};
use crate::types::ServiceYear;

/// Scenario that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingScenario {
    pub year: ServiceYear,
    #[serde(default)]
    pub actions: Vec<SelectionAction>,
}

/// One replayed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// 1-based position in the scenario
    pub step: usize,
    pub action: SelectionAction,
    pub outcome: SelectionOutcome,
}

/// Result of replaying every action of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReplay {
    pub year: ServiceYear,
    pub steps: Vec<ScenarioStep>,
    pub selection: SelectedServices,
}

impl ScenarioReplay {
    /// Steps whose action was rejected
    pub fn rejected(&self) -> impl Iterator<Item = &ScenarioStep> {
        self.steps.iter().filter(|s| s.outcome.effect.is_rejected())
    }

    /// Price the final selection
    pub fn quote(&self) -> Quote {
        Quote::new(&self.selection, self.year)
    }
}

impl BookingScenario {
    /// Create an empty scenario for a year
    pub fn new(year: ServiceYear) -> Self {
        Self {
            year,
            actions: Vec::new(),
        }
    }

    /// Append an action (builder style)
    pub fn with_action(mut self, action: SelectionAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Parse a scenario from JSON text
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save scenario to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize scenario to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write scenario to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load scenario from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario from {:?}", path.as_ref()))?;

        let scenario = Self::from_json(&content).context("Failed to parse scenario JSON")?;
        debug!(
            path = ?path.as_ref(),
            year = %scenario.year,
            actions = scenario.actions.len(),
            "scenario loaded"
        );

        Ok(scenario)
    }

    /// Replay all actions from the empty selection
    pub fn replay(&self) -> ScenarioReplay {
        let mut selection = SelectedServices::new();
        let mut steps = Vec::with_capacity(self.actions.len());

        for (i, action) in self.actions.iter().enumerate() {
            let outcome = evaluate_action(&selection, *action);
            selection = outcome.selection.clone();
            steps.push(ScenarioStep {
                step: i + 1,
                action: *action,
                outcome,
            });
        }

        ScenarioReplay {
            year: self.year,
            steps,
            selection,
        }
    }

    /// Price the selection the scenario ends with
    pub fn quote(&self) -> Quote {
        self.replay().quote()
    }

    /// Validate the scenario.
    ///
    /// A scenario is valid when it has at least one action and none of its
    /// actions is rejected by the selection manager.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.actions.is_empty() {
            return Err(BookingError::scenario("scenario contains no actions"));
        }

        let replay = self.replay();
        let first_rejected = replay.steps.iter().find_map(|step| match &step.outcome.effect {
            ActionEffect::Rejected(reason) => Some((step, reason)),
            _ => None,
        });
        if let Some((step, reason)) = first_rejected {
            return Err(BookingError::validation(format!(
                "step {}: {} rejected: {}",
                step.step, step.action, reason
            )));
        }

        Ok(())
    }
}
