//! Step-by-step cooking mode.
//!
//! A [`CookingSession`] walks through one recipe's method, tracking which
//! steps are done. Sessions are not persisted; the CLI rebuilds one on
//! each invocation from the completed step numbers it is given.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    error::{CookbookError, Result},
    models::{RecipeDetails, Step},
};

/// Progress through a recipe's steps.
#[derive(Debug, Clone, Serialize)]
pub struct CookingSession {
    recipe: RecipeDetails,
    completed: BTreeSet<u32>,
}

impl CookingSession {
    pub fn new(recipe: RecipeDetails) -> Self {
        Self {
            recipe,
            completed: BTreeSet::new(),
        }
    }

    /// Starts a session with the given step numbers already done.
    pub fn with_completed(recipe: RecipeDetails, step_numbers: &[u32]) -> Result<Self> {
        let mut session = Self::new(recipe);
        for &number in step_numbers {
            session.complete(number)?;
        }
        Ok(session)
    }

    pub fn recipe(&self) -> &RecipeDetails {
        &self.recipe
    }

    fn check_step(&self, step_number: u32) -> Result<()> {
        if self.recipe.steps.iter().any(|s| s.step_number == step_number) {
            Ok(())
        } else {
            Err(CookbookError::invalid_input("step").with_reason(format!(
                "'{}' has no step {step_number}",
                self.recipe.recipe.name
            )))
        }
    }

    pub fn is_completed(&self, step_number: u32) -> bool {
        self.completed.contains(&step_number)
    }

    /// Flips a step between done and pending, returning the new state.
    pub fn toggle(&mut self, step_number: u32) -> Result<bool> {
        self.check_step(step_number)?;
        if self.completed.remove(&step_number) {
            Ok(false)
        } else {
            self.completed.insert(step_number);
            Ok(true)
        }
    }

    pub fn complete(&mut self, step_number: u32) -> Result<()> {
        self.check_step(step_number)?;
        self.completed.insert(step_number);
        Ok(())
    }

    /// Returns `(completed, total)` step counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.recipe.steps.len())
    }

    /// True once every step is done. A recipe without steps is never finished.
    pub fn is_finished(&self) -> bool {
        let (done, total) = self.progress();
        total > 0 && done == total
    }

    /// The first step not yet done.
    pub fn next_step(&self) -> Option<&Step> {
        self.recipe
            .steps
            .iter()
            .find(|s| !self.completed.contains(&s.step_number))
    }
}
