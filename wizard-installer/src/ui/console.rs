use super::confirm;
use super::style::{emoji, with};
use anyhow::Result;
use std::io::{self, Write};
use wizard_core::markup::to_plain_text;
use wizard_workflow::{Presenter, StepControl, WizardView};

type ConfirmFn = Box<dyn FnMut(&str) -> Result<bool>>;

/// Text-mode presenter: prints the conditions, asks for acceptance, then
/// runs the steps in order and stops at the first failure.
pub struct ConsolePresenter<W: Write> {
    out: W,
    confirm: ConfirmFn,
}

impl ConsolePresenter<io::Stdout> {
    /// Prompt on the terminal before running anything.
    pub fn interactive() -> Self {
        Self::new(io::stdout(), confirm::confirm_prompt)
    }

    /// Accept the conditions without asking.
    pub fn auto_accept() -> Self {
        Self::new(io::stdout(), |_| Ok(true))
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, confirm: impl FnMut(&str) -> Result<bool> + 'static) -> Self {
        Self {
            out,
            confirm: Box::new(confirm),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn print_conditions(out: &mut impl Write, view: &WizardView<'_>) -> io::Result<()> {
    for condition in view.conditions {
        writeln!(out)?;
        writeln!(out, "{}", with(emoji::CONDITION, &to_plain_text(&condition.title)))?;
        writeln!(out, "{}", to_plain_text(&condition.body))?;
    }
    if view.must_read_all_conditions && !view.conditions.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", view.texts.read_all_conditions_tooltip)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Run every step in order. Returns the descriptions of the steps that
/// succeeded, or stops at the first failure after printing it.
fn run_steps(
    out: &mut impl Write,
    view: &WizardView<'_>,
    steps: &mut dyn StepControl,
) -> Result<Vec<String>> {
    let total = steps.step_count();
    let mut done = Vec::with_capacity(total);
    for (i, step) in view.steps.iter().enumerate().take(total) {
        writeln!(
            out,
            "{}",
            with(emoji::STEP, &format!("[{}/{}] {}", i + 1, total, step.description))
        )?;
        out.flush()?;
        if let Err(err) = steps.run_step(i) {
            log::warn!(
                "Stopping after failed step {:?} of {}",
                steps.current_index().map(|index| index + 1),
                total
            );
            writeln!(out, "{}", with(emoji::ERROR, &view.texts.fail))?;
            writeln!(out, "    {:#}", anyhow::Error::from(err))?;
            return Ok(done);
        }
        done.push(step.description.to_string());
    }
    Ok(done)
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(
        &mut self,
        window_title: &str,
        view: &WizardView<'_>,
        steps: &mut dyn StepControl,
    ) -> Result<()> {
        let Self { out, confirm: ask } = self;

        writeln!(out, "{}", with(emoji::WIZARD, window_title))?;
        print_conditions(out, view)?;

        let mut completed = Vec::new();
        let accepted = confirm::confirm_and_run_with(
            &view.texts.accept_button,
            |prompt| (ask)(prompt),
            || {
                completed = run_steps(&mut *out, view, &mut *steps)?;
                Ok(())
            },
        )?;

        if !accepted {
            log::info!("Conditions declined; no step was run");
            writeln!(out, "{}", with(emoji::CANCEL, "Cancelled."))?;
            return Ok(());
        }

        if steps.is_completed() {
            writeln!(out)?;
            writeln!(out, "{}", with(emoji::PARTY, &to_plain_text(&view.texts.success)))?;
            writeln!(out)?;
            writeln!(out, "{}", view.texts.completed_steps)?;
            for description in &completed {
                writeln!(out, "  {} {}", emoji::SUCCESS, description)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wizard_workflow::{Pacing, WizardBuilder, WizardError};

    fn builder(fail_at: Option<usize>, ran: &Arc<Mutex<Vec<usize>>>) -> WizardBuilder {
        let mut builder = WizardBuilder::new("<b>My App</b>")
            .pacing(Pacing::Disabled)
            .condition("EULA", "<p>Be nice.</p>");
        builder.texts_mut().accept_button = "I accept".to_string();
        builder.texts_mut().fail = "It broke.".to_string();
        builder.texts_mut().success = "<p>All done.</p>".to_string();
        builder.texts_mut().completed_steps = "Steps completed".to_string();
        for i in 0..3 {
            let ran = Arc::clone(ran);
            builder.add_step(format!("step {i}"), move || {
                ran.lock().unwrap().push(i);
                if Some(i) == fail_at {
                    anyhow::bail!("disk full");
                }
                Ok(())
            });
        }
        builder
    }

    #[test]
    fn accepted_run_prints_success_and_history() {
        let ran = Arc::new(Mutex::new(Vec::new()));
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&prompts);
        let mut presenter = ConsolePresenter::new(Vec::new(), move |prompt: &str| {
            seen.lock().unwrap().push(prompt.to_string());
            Ok(true)
        });

        builder(None, &ran)
            .build()
            .open(&mut presenter, "My App")
            .unwrap();

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(*prompts.lock().unwrap(), ["I accept"]);
        assert_eq!(*ran.lock().unwrap(), [0, 1, 2]);
        assert!(text.contains("Be nice."));
        assert!(text.contains("[3/3] step 2"));
        assert!(text.contains("All done."));
        assert!(text.contains("Steps completed"));
        assert!(!text.contains("It broke."));
    }

    #[test]
    fn declined_conditions_run_nothing() {
        let ran = Arc::new(Mutex::new(Vec::new()));
        let mut presenter = ConsolePresenter::new(Vec::new(), |_: &str| Ok(false));

        let err = builder(None, &ran)
            .build()
            .open(&mut presenter, "My App")
            .unwrap_err();

        assert!(matches!(err, WizardError::Incomplete));
        assert!(ran.lock().unwrap().is_empty());
    }

    #[test]
    fn failure_stops_and_prints_fail_text() {
        let ran = Arc::new(Mutex::new(Vec::new()));
        let mut presenter = ConsolePresenter::new(Vec::new(), |_: &str| Ok(true));

        let err = builder(Some(1), &ran)
            .build()
            .open(&mut presenter, "My App")
            .unwrap_err();

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(matches!(err, WizardError::Incomplete));
        assert_eq!(*ran.lock().unwrap(), [0, 1]);
        assert!(text.contains("It broke."));
        assert!(text.contains("disk full"));
        assert!(!text.contains("[3/3]"));
        assert!(!text.contains("All done."));
    }

    #[test]
    fn prompt_error_is_a_presenter_failure() {
        let ran = Arc::new(Mutex::new(Vec::new()));
        let mut presenter =
            ConsolePresenter::new(Vec::new(), |_: &str| anyhow::bail!("stdin closed"));

        let err = builder(None, &ran)
            .build()
            .open(&mut presenter, "My App")
            .unwrap_err();

        assert!(matches!(err, WizardError::Presentation(_)));
        assert!(ran.lock().unwrap().is_empty());
    }
}
