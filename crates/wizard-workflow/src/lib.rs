//! Wizard workflow orchestration.
//!
//! A [`WizardBuilder`] collects conditions, steps and finalize actions and
//! produces a [`WizardRunner`]. The runner owns an immutable [`WizardDefinition`]
//! plus the only mutable run state (the completion flag), and hands a
//! [`Presenter`] the serialized view and a step trigger.

pub mod definition;
pub mod presenter;
pub mod runner;
pub mod step;

pub use definition::{Condition, Texts, WizardBuilder, WizardDefinition, WizardView};
pub use presenter::{Presenter, StepControl};
pub use runner::{StepSession, WizardRunner};
pub use step::{FinalizeAction, Pacing, Step, StepAction};
pub use wizard_error::{WizardError, WizardResult};
