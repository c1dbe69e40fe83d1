use std::fmt::Display;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Logging handle given to each component when it is built.
///
/// Events carry the component name as a `component` field instead of a text prefix.
#[derive(Clone, Debug)]
pub struct Logger {
    component: &'static str,
}

impl Logger {
    pub fn new(component: &'static str) -> Self {
        Logger { component }
    }

    pub fn info(&self, message: impl Display) {
        tracing::info!(component = self.component, "{}", message);
    }

    pub fn error(&self, message: impl Display) {
        tracing::error!(component = self.component, "{}", message);
    }
}
