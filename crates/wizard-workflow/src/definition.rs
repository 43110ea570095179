use crate::runner::WizardRunner;
use crate::step::{FinalizeAction, Pacing, Step};
use anyhow::Result;
use serde::Serialize;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 540;

/// A license or agreement block shown before any step runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub title: String,
    /// May contain HTML markup.
    pub body: String,
}

/// User-facing strings handed to the presenter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Texts {
    pub accept_button: String,
    pub fail: String,
    pub success: String,
    pub completed_steps: String,
    pub read_all_conditions_tooltip: String,
}

/// Immutable description of one installation run.
#[derive(Debug)]
pub struct WizardDefinition {
    pub title: String,
    pub conditions: Vec<Condition>,
    pub steps: Vec<Step>,
    pub texts: Texts,
    pub must_read_all_conditions: bool,
    pub width: u32,
    pub height: u32,
    pub pacing: Pacing,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView<'a> {
    pub description: &'a str,
}

/// What the presenter renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView<'a> {
    pub title: &'a str,
    pub conditions: &'a [Condition],
    pub steps: Vec<StepView<'a>>,
    pub texts: &'a Texts,
    pub must_read_all_conditions: bool,
    pub width: u32,
    pub height: u32,
}

impl WizardView<'_> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl WizardDefinition {
    pub fn view(&self) -> WizardView<'_> {
        WizardView {
            title: &self.title,
            conditions: &self.conditions,
            steps: self
                .steps
                .iter()
                .map(|step| StepView {
                    description: &step.description,
                })
                .collect(),
            texts: &self.texts,
            must_read_all_conditions: self.must_read_all_conditions,
            width: self.width,
            height: self.height,
        }
    }
}

/// Collects everything a run needs, then freezes it with [`WizardBuilder::build`].
pub struct WizardBuilder {
    definition: WizardDefinition,
    finalizers: Vec<FinalizeAction>,
}

impl WizardBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            definition: WizardDefinition {
                title: title.into(),
                conditions: Vec::new(),
                steps: Vec::new(),
                texts: Texts::default(),
                must_read_all_conditions: true,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                pacing: Pacing::default(),
            },
            finalizers: Vec::new(),
        }
    }

    pub fn condition(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_condition(title, body);
        self
    }

    pub fn add_condition(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.definition.conditions.push(Condition {
            title: title.into(),
            body: body.into(),
        });
    }

    pub fn step(
        mut self,
        description: impl Into<String>,
        action: impl Fn() -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.add_step(description, action);
        self
    }

    pub fn add_step(
        &mut self,
        description: impl Into<String>,
        action: impl Fn() -> Result<()> + Send + Sync + 'static,
    ) {
        self.definition.steps.push(Step::new(description, action));
    }

    /// Append an action run when the session ends. Actions run in the order
    /// they were added; none replaces another.
    pub fn add_finalizer(&mut self, action: impl FnOnce() -> Result<()> + Send + 'static) {
        self.finalizers.push(Box::new(action));
    }

    pub fn set_texts(&mut self, texts: Texts) {
        self.definition.texts = texts;
    }

    pub fn texts_mut(&mut self) -> &mut Texts {
        &mut self.definition.texts
    }

    pub fn set_must_read_all_conditions(&mut self, must_read: bool) {
        self.definition.must_read_all_conditions = must_read;
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.definition.width = width;
        self.definition.height = height;
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.definition.pacing = pacing;
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.set_pacing(pacing);
        self
    }

    pub fn step_count(&self) -> usize {
        self.definition.steps.len()
    }

    pub fn build(self) -> WizardRunner {
        WizardRunner::new(self.definition, self.finalizers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let runner = WizardBuilder::new("My App").build();
        let definition = runner.definition();
        assert_eq!(definition.title, "My App");
        assert!(definition.must_read_all_conditions);
        assert_eq!((definition.width, definition.height), (640, 540));
        assert_eq!(definition.pacing, Pacing::default());
    }

    #[test]
    fn conditions_and_steps_keep_insertion_order() {
        let runner = WizardBuilder::new("t")
            .condition("C1", "first")
            .condition("C2", "second")
            .step("S1", || Ok(()))
            .step("S2", || Ok(()))
            .build();

        let view = runner.definition().view();
        let titles: Vec<_> = view.conditions.iter().map(|c| c.title.as_str()).collect();
        let steps: Vec<_> = view.steps.iter().map(|s| s.description).collect();
        assert_eq!(titles, ["C1", "C2"]);
        assert_eq!(steps, ["S1", "S2"]);
    }

    #[test]
    fn view_serializes_with_camel_case_fields() {
        let mut builder = WizardBuilder::new("<b>My App</b>").condition("EULA", "<p>terms</p>");
        builder.add_step("Copy files", || Ok(()));
        builder.set_must_read_all_conditions(false);
        builder.texts_mut().accept_button = "I accept".to_string();
        let runner = builder.build();

        let json: serde_json::Value =
            serde_json::from_str(&runner.definition().view().to_json().unwrap()).unwrap();
        assert_eq!(json["title"], "<b>My App</b>");
        assert_eq!(json["mustReadAllConditions"], false);
        assert_eq!(json["conditions"][0]["body"], "<p>terms</p>");
        assert_eq!(json["steps"][0]["description"], "Copy files");
        assert_eq!(json["texts"]["acceptButton"], "I accept");
        assert_eq!(json["width"], 640);
    }
}
