/// Diagnostic output for IR construction.
///
/// Lowering emits `tracing` events under the `luapp_ir` target: `error` for
/// every reported diagnostic, `debug` per program and for extended constant
/// loads, `trace` per closed function. Nothing is printed until a host installs
/// a subscriber, either its own or the one built here from [`IrConfig`].
///
/// [`IrConfig`]: crate::IrConfig
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Filter used when neither the config nor `RUST_LOG` names one.
pub const DEFAULT_FILTER: &str = "luapp_ir=info";

static INIT: Once = Once::new();

/// Resolve the filter: the configured directive, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. An unparsable directive is skipped with a warning.
pub fn filter_for(directive: Option<&str>) -> EnvFilter {
    if let Some(directive) = directive.map(str::trim).filter(|d| !d.is_empty()) {
        match EnvFilter::try_new(directive) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("luapp-ir: ignoring log_level '{directive}': {e}"),
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a compact subscriber for IR events, once per process.
///
/// Leaves an already installed global subscriber alone.
pub(crate) fn install(directive: Option<&str>) {
    INIT.call_once(|| {
        if tracing::dispatcher::has_been_set() {
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_for(directive))
            .with_target(true)
            .without_time()
            .compact()
            .try_init();
    });
}
