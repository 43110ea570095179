//! The seam between the engine and whatever renders the wizard.

use crate::definition::WizardView;
use anyhow::Result;
use wizard_error::WizardResult;

/// Step trigger handed to a presenter for the duration of a session.
pub trait StepControl {
    fn step_count(&self) -> usize;

    /// Run one step. Callers are expected to go through `0..step_count()` in
    /// order and to stop at the first error.
    fn run_step(&mut self, index: usize) -> WizardResult<()>;

    fn is_completed(&self) -> bool;

    /// Index of the step most recently triggered, if any.
    fn current_index(&self) -> Option<usize>;
}

/// Renders a wizard session and drives its steps.
///
/// `present` blocks until the session ends (the user closed the window or the
/// run finished). An `Err` means the presenter itself broke; a user leaving
/// early is reported by returning `Ok` with the run left incomplete.
pub trait Presenter {
    fn present(
        &mut self,
        window_title: &str,
        view: &WizardView<'_>,
        steps: &mut dyn StepControl,
    ) -> Result<()>;
}
