//! Binding a level switch to a raw value source.

use std::sync::Arc;

use super::switch::{Level, LevelSwitch};
use crate::error::{Error, ResolutionError};
use crate::expand::expand_env_vars;
use crate::source::RawSource;

/// Binds a [`LevelSwitch`] to `source`.
///
/// The source's current value (after `%VAR%` expansion) must parse as a
/// severity level; an invalid value is a hard failure at bind time,
/// propagated like any other resolution failure. When the source supports
/// change notification the switch enters the Bound state and follows the
/// source until the subscription is released by the scope owner.
///
/// # Errors
///
/// Returns [`ResolutionError::InvalidLevel`] when the current value is not
/// a severity level name.
pub fn bind(source: &Arc<dyn RawSource>) -> Result<Arc<LevelSwitch>, Error> {
    let expanded = expand_env_vars(&source.produce());
    bind_expanded(source, &expanded)
}

/// Binder entry for callers that already expanded the raw value.
pub(crate) fn bind_expanded(
    source: &Arc<dyn RawSource>,
    expanded: &str,
) -> Result<Arc<LevelSwitch>, Error> {
    let initial = parse_level(expanded)?;
    let switch = Arc::new(LevelSwitch::new(initial));

    let weak = Arc::downgrade(&switch);
    let reader = Arc::clone(source);
    let subscription = source.subscribe(Arc::new(move || {
        let Some(switch) = weak.upgrade() else {
            return;
        };
        reparse(&*reader, &switch);
    }));

    if let Some(subscription) = subscription {
        switch.attach_subscription(subscription);
    }

    Ok(switch)
}

/// One notification-driven reparse step.
///
/// Runs outside any caller's control flow: a failure keeps the prior
/// minimum and is reported only through the diagnostic channel. Must never
/// panic or block the notification source.
fn reparse(source: &dyn RawSource, switch: &LevelSwitch) {
    let raw = expand_env_vars(&source.produce());

    match raw.trim().parse::<Level>() {
        Ok(level) => switch.set_minimum(level),

        Err(err) => {
            tracing::warn!(
                value = %raw,
                error = %err,
                "level switch reparse failed; previous minimum level retained"
            );
        }
    }
}

fn parse_level(expanded: &str) -> Result<Level, Error> {
    expanded.trim().parse::<Level>().map_err(|err| {
        Error::from(ResolutionError::InvalidLevel { value: err.value })
    })
}
