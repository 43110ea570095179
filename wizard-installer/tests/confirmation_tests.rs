use std::sync::{Arc, Mutex};
use wizard_core::{Installer, Lang};
use wizard_hal::{FakeHal, LinuxPlatform};
use wizard_installer::ui::ConsolePresenter;
use wizard_workflow::{Pacing, WizardError};

type Prompts = Arc<Mutex<Vec<String>>>;

fn installer(lang: Lang, ran: &Arc<Mutex<Vec<usize>>>) -> Installer {
    let platform = Arc::new(LinuxPlatform::with_process(FakeHal::new()));
    let mut installer = Installer::with_platform("<b>My App</b>", lang, platform);
    installer.set_pacing(Pacing::Disabled);
    installer.add_condition("EULA", "<p>Be nice.</p>");
    for i in 0..2 {
        let ran = Arc::clone(ran);
        installer.add_step(format!("step {i}"), move || {
            ran.lock().unwrap().push(i);
            Ok(())
        });
    }
    installer
}

fn recording_prompt(answer: bool) -> (Prompts, impl FnMut(&str) -> anyhow::Result<bool>) {
    let prompts = Prompts::default();
    let seen = Arc::clone(&prompts);
    let confirm = move |prompt: &str| {
        seen.lock().unwrap().push(prompt.to_string());
        Ok(answer)
    };
    (prompts, confirm)
}

#[test]
fn declined_conditions_skip_the_run() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let (prompts, confirm) = recording_prompt(false);
    let mut presenter = ConsolePresenter::new(Vec::new(), confirm);

    let err = installer(Lang::En, &ran)
        .open(&mut presenter, "My App")
        .unwrap_err();

    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert!(matches!(err, WizardError::Incomplete));
    assert_eq!(prompts.lock().unwrap().len(), 1);
    assert!(ran.lock().unwrap().is_empty());
    assert!(text.contains("Be nice."));
    assert!(text.contains("Cancelled."));
}

#[test]
fn accepted_conditions_start_the_run() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let (_, confirm) = recording_prompt(true);
    let mut presenter = ConsolePresenter::new(Vec::new(), confirm);

    installer(Lang::En, &ran)
        .open(&mut presenter, "My App")
        .unwrap();

    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert_eq!(*ran.lock().unwrap(), [0, 1]);
    assert!(text.contains("[2/2] step 1"));
    assert!(text.contains("Steps completed"));
}

#[test]
fn prompt_error_aborts_before_the_run() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let mut presenter =
        ConsolePresenter::new(Vec::new(), |_: &str| anyhow::bail!("prompt cancelled"));

    let err = installer(Lang::En, &ran)
        .open(&mut presenter, "My App")
        .unwrap_err();

    assert!(err.to_string().contains("prompt cancelled"));
    assert!(matches!(err, WizardError::Presentation(_)));
    assert!(ran.lock().unwrap().is_empty());
}

#[test]
fn prompt_receives_localized_accept_text() {
    let ran = Arc::new(Mutex::new(Vec::new()));
    let (prompts, confirm) = recording_prompt(true);
    let mut presenter = ConsolePresenter::new(Vec::new(), confirm);

    installer(Lang::Fr, &ran)
        .open(&mut presenter, "My App")
        .unwrap();

    assert_eq!(*prompts.lock().unwrap(), ["J'ai lu et j'accepte"]);
    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert!(text.contains("Étapes réalisées"));
}
