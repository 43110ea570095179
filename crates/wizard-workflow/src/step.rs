use anyhow::Result;
use std::fmt;
use std::time::Duration;

pub type StepAction = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// Run once when the session ends, whatever its outcome.
pub type FinalizeAction = Box<dyn FnOnce() -> Result<()> + Send>;

/// Artificial delay applied before each step so progress stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Disabled,
    Fixed(Duration),
}

impl Pacing {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn pause(&self) {
        if let Pacing::Fixed(delay) = self {
            if !delay.is_zero() {
                std::thread::sleep(*delay);
            }
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Fixed(Self::DEFAULT_DELAY)
    }
}

pub struct Step {
    pub description: String,
    action: StepAction,
}

impl Step {
    pub fn new(
        description: impl Into<String>,
        action: impl Fn() -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            action: Box::new(action),
        }
    }

    /// Pause according to `pacing`, then run the action.
    pub fn run(&self, pacing: Pacing) -> Result<()> {
        pacing.pause();
        (self.action)()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn default_pacing_is_two_seconds() {
        assert_eq!(Pacing::default(), Pacing::Fixed(Duration::from_secs(2)));
    }

    #[test]
    fn run_waits_before_calling_action() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let step = Step::new("count", move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let started = Instant::now();
        step.run(Pacing::Fixed(Duration::from_millis(30))).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_returns_action_error() {
        let step = Step::new("fail", || anyhow::bail!("nope"));
        let err = step.run(Pacing::Disabled).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
