//! Terminal styling registered once per process

use indicatif::ProgressStyle;
use std::sync::OnceLock;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} [{elapsed}]";
const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"];

/// Styles shared by every widget of the form
#[derive(Clone)]
pub struct Theme {
    pub spinner: ProgressStyle,
    pub rule_width: usize,
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Register the theme; later calls return the same instance
pub fn register() -> &'static Theme {
    THEME.get_or_init(|| {
        let spinner = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_TICKS);
        tracing::trace!("Terminal theme registered");
        Theme {
            spinner,
            rule_width: 40,
        }
    })
}

/// The registered theme, registering it on first use
pub fn current() -> &'static Theme {
    register()
}
