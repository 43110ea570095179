use crate::definition::WizardDefinition;
use crate::presenter::{Presenter, StepControl};
use crate::step::FinalizeAction;
use wizard_error::{WizardError, WizardResult};

#[derive(Debug, Default)]
struct RunState {
    /// Step most recently triggered, whatever its outcome.
    current: Option<usize>,
    completed: bool,
}

fn run_step(
    definition: &WizardDefinition,
    state: &mut RunState,
    index: usize,
) -> WizardResult<()> {
    let len = definition.steps.len();
    let step = definition.steps.get(index).ok_or_else(|| {
        log::error!("Step index {} requested but only {} steps exist", index, len);
        WizardError::StepIndexOutOfRange { index, len }
    })?;

    state.current = Some(index);
    log::info!("Step {}/{}: {}", index + 1, len, step.description);
    if let Err(source) = step.run(definition.pacing) {
        log::error!("Step {}/{} failed: {:#}", index + 1, len, source);
        return Err(WizardError::StepFailed { index, source });
    }

    if index + 1 == len && !state.completed {
        state.completed = true;
        log::info!("All {} steps completed", len);
    }
    Ok(())
}

/// Holds a frozen [`WizardDefinition`] and the mutable state of one run.
pub struct WizardRunner {
    definition: WizardDefinition,
    state: RunState,
    finalizers: Vec<FinalizeAction>,
}

impl WizardRunner {
    pub(crate) fn new(definition: WizardDefinition, finalizers: Vec<FinalizeAction>) -> Self {
        Self {
            definition,
            state: RunState::default(),
            finalizers,
        }
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current
    }

    /// Run step `index`. The last step succeeding marks the run completed.
    pub fn run_step(&mut self, index: usize) -> WizardResult<()> {
        run_step(&self.definition, &mut self.state, index)
    }

    /// Hand the session to `presenter` and block until it returns.
    ///
    /// Finalize actions always run afterwards; their failures are logged and
    /// never change the result. A presenter that returns without the last step
    /// having succeeded yields [`WizardError::Incomplete`].
    pub fn open(mut self, presenter: &mut dyn Presenter, window_title: &str) -> WizardResult<()> {
        log::info!(
            "Opening wizard '{}' ({} conditions, {} steps)",
            window_title,
            self.definition.conditions.len(),
            self.definition.steps.len()
        );
        let outcome = {
            let view = self.definition.view();
            let mut session = StepSession {
                definition: &self.definition,
                state: &mut self.state,
            };
            presenter.present(window_title, &view, &mut session)
        };

        self.finalize();

        if let Err(err) = outcome {
            log::error!("Presenter failed: {:#}", err);
            return Err(WizardError::Presentation(err));
        }
        if !self.state.completed {
            log::warn!("Wizard closed before all steps completed");
            return Err(WizardError::Incomplete);
        }
        Ok(())
    }

    fn finalize(&mut self) {
        for (i, action) in self.finalizers.drain(..).enumerate() {
            if let Err(err) = action() {
                log::error!("Finalize action {} failed: {:#}", i + 1, err);
            }
        }
    }
}

/// [`StepControl`] view of a runner, lent to the presenter by [`WizardRunner::open`].
pub struct StepSession<'a> {
    definition: &'a WizardDefinition,
    state: &'a mut RunState,
}

impl StepControl for StepSession<'_> {
    fn step_count(&self) -> usize {
        self.definition.steps.len()
    }

    fn run_step(&mut self, index: usize) -> WizardResult<()> {
        run_step(self.definition, self.state, index)
    }

    fn is_completed(&self) -> bool {
        self.state.completed
    }

    fn current_index(&self) -> Option<usize> {
        self.state.current
    }
}

impl StepControl for WizardRunner {
    fn step_count(&self) -> usize {
        self.definition.steps.len()
    }

    fn run_step(&mut self, index: usize) -> WizardResult<()> {
        WizardRunner::run_step(self, index)
    }

    fn is_completed(&self) -> bool {
        self.state.completed
    }

    fn current_index(&self) -> Option<usize> {
        self.state.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{WizardBuilder, WizardView};
    use crate::step::Pacing;
    use anyhow::Result;
    use std::sync::{Arc, Mutex};

    fn recording_builder(
        n: usize,
        fail_at: Option<usize>,
    ) -> (WizardBuilder, Arc<Mutex<Vec<usize>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut builder = WizardBuilder::new("test").pacing(Pacing::Disabled);
        for i in 0..n {
            let calls = Arc::clone(&calls);
            builder.add_step(format!("step {i}"), move || {
                calls.lock().unwrap().push(i);
                if Some(i) == fail_at {
                    anyhow::bail!("step {i} broke");
                }
                Ok(())
            });
        }
        (builder, calls)
    }

    struct RunAll;

    impl Presenter for RunAll {
        fn present(
            &mut self,
            _window_title: &str,
            _view: &WizardView<'_>,
            steps: &mut dyn StepControl,
        ) -> Result<()> {
            for i in 0..steps.step_count() {
                if steps.run_step(i).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn completed_only_after_last_step() {
        let (builder, _) = recording_builder(3, None);
        let mut runner = builder.build();
        runner.run_step(0).unwrap();
        assert!(!runner.is_completed());
        runner.run_step(1).unwrap();
        assert!(!runner.is_completed());
        runner.run_step(2).unwrap();
        assert!(runner.is_completed());
    }

    #[test]
    fn failing_step_leaves_run_incomplete() {
        let (builder, calls) = recording_builder(4, Some(1));
        let mut runner = builder.build();
        runner.run_step(0).unwrap();
        let err = runner.run_step(1).unwrap_err();
        match err {
            WizardError::StepFailed { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.to_string(), "step 1 broke");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!runner.is_completed());
        assert_eq!(*calls.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let (builder, calls) = recording_builder(2, None);
        let mut runner = builder.build();
        let err = runner.run_step(2).unwrap_err();
        assert!(matches!(
            err,
            WizardError::StepIndexOutOfRange { index: 2, len: 2 }
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn current_index_tracks_last_triggered_step() {
        let (builder, _) = recording_builder(3, Some(1));
        let mut runner = builder.build();
        assert_eq!(runner.current_index(), None);
        runner.run_step(0).unwrap();
        assert_eq!(runner.current_index(), Some(0));
        runner.run_step(1).unwrap_err();
        assert_eq!(runner.current_index(), Some(1));
        runner.run_step(7).unwrap_err();
        assert_eq!(runner.current_index(), Some(1));
    }

    #[test]
    fn steps_may_be_repeated_or_run_out_of_order() {
        let (builder, calls) = recording_builder(3, None);
        let mut runner = builder.build();
        runner.run_step(2).unwrap();
        assert!(runner.is_completed());
        runner.run_step(0).unwrap();
        runner.run_step(0).unwrap();
        assert!(runner.is_completed());
        assert_eq!(*calls.lock().unwrap(), vec![2, 0, 0]);
    }

    #[test]
    fn open_succeeds_when_presenter_completes_run() {
        let (builder, calls) = recording_builder(3, None);
        builder.build().open(&mut RunAll, "Setup").unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn open_reports_incomplete_after_step_failure() {
        let (builder, calls) = recording_builder(3, Some(0));
        let err = builder.build().open(&mut RunAll, "Setup").unwrap_err();
        assert!(matches!(err, WizardError::Incomplete));
        assert_eq!(*calls.lock().unwrap(), vec![0]);
    }

    #[test]
    fn finalizers_run_in_order_even_when_incomplete() {
        let (mut builder, _) = recording_builder(1, Some(0));
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["first", "second"] {
            let order = Arc::clone(&order);
            builder.add_finalizer(move || {
                order.lock().unwrap().push(name);
                Ok(())
            });
        }

        let err = builder.build().open(&mut RunAll, "Setup").unwrap_err();
        assert!(matches!(err, WizardError::Incomplete));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn finalizer_failure_does_not_change_result() {
        let (mut builder, _) = recording_builder(1, None);
        let ran = Arc::new(Mutex::new(false));
        builder.add_finalizer(|| anyhow::bail!("cleanup failed"));
        let ran_second = Arc::clone(&ran);
        builder.add_finalizer(move || {
            *ran_second.lock().unwrap() = true;
            Ok(())
        });

        builder.build().open(&mut RunAll, "Setup").unwrap();
        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn presenter_error_is_surfaced_after_finalizers() {
        struct Broken;
        impl Presenter for Broken {
            fn present(
                &mut self,
                _window_title: &str,
                _view: &WizardView<'_>,
                _steps: &mut dyn StepControl,
            ) -> Result<()> {
                anyhow::bail!("window system unavailable")
            }
        }

        let (mut builder, _) = recording_builder(1, None);
        let finalized = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&finalized);
        builder.add_finalizer(move || {
            *flag.lock().unwrap() = true;
            Ok(())
        });

        let err = builder.build().open(&mut Broken, "Setup").unwrap_err();
        assert!(matches!(err, WizardError::Presentation(_)));
        assert!(*finalized.lock().unwrap());
    }

    #[test]
    fn empty_wizard_never_completes() {
        let err = WizardBuilder::new("empty")
            .build()
            .open(&mut RunAll, "Setup")
            .unwrap_err();
        assert!(matches!(err, WizardError::Incomplete));
    }
}
