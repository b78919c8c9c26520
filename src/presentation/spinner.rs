//! Loading indicator bound to the workflow state

use super::theme;
use crate::core::workflow::{Stage, WorkflowSnapshot};
use indicatif::ProgressBar;
use std::borrow::Cow;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_millis(80);

/// A spinner on stderr, cleared when dropped
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<Cow<'static, str>>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(theme::current().spinner.clone());
        bar.set_message(message);
        bar.enable_steady_tick(TICK);
        Self { bar }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Spinner text for a loading snapshot
pub fn loading_message(snapshot: &WorkflowSnapshot) -> String {
    let collection = snapshot
        .collection_name
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default();
    match snapshot.stage {
        Stage::Exporting => format!("Exporting \"{collection}\"…"),
        _ => format!("Checking \"{collection}\"…"),
    }
}

/// Show a spinner whenever the workflow is loading
///
/// The task ends when the workflow is dropped.
pub fn follow(mut rx: watch::Receiver<WorkflowSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut active: Option<Spinner> = None;
        loop {
            let snapshot = rx.borrow_and_update().clone();
            match (snapshot.loading, active.is_some()) {
                (true, false) => active = Some(Spinner::start(loading_message(&snapshot))),
                (false, true) => active = None,
                _ => {}
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
}
