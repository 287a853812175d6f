use env_filter::Builder as EnvFilterBuilder;
use log::LevelFilter;

/// Console logger: `RUST_LOG` when it parses, otherwise info level.
/// `debug` forces debug level regardless of the environment.
pub fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    let mut rejected_spec = None;

    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        match std::env::var("RUST_LOG") {
            Ok(spec) if !spec.trim().is_empty() => {
                if let Err(err) = EnvFilterBuilder::new().try_parse(&spec) {
                    rejected_spec = Some((spec, err.to_string()));
                    builder.filter_level(LevelFilter::Info);
                } else {
                    builder.parse_filters(&spec);
                }
            }
            _ => {
                builder.filter_level(LevelFilter::Info);
            }
        }
    }

    // A logger may already be installed (tests, embedding applications).
    if builder.try_init().is_err() {
        return;
    }

    if let Some((spec, err)) = rejected_spec {
        log::warn!(
            "Ignoring invalid RUST_LOG value '{}': {}. Falling back to info-level console logging",
            spec,
            err
        );
    }
}
