use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The `provision` binary is its own crate, so both targets need a directive.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "masterchef_provisioner=debug,provision=debug,info"
    } else {
        "masterchef_provisioner=info,provision=info"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(false)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // CI 收集部署記錄用
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_binary_target() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(directives.contains("masterchef_provisioner="));
            assert!(directives.contains("provision="));
            assert!(directives.parse::<EnvFilter>().is_ok());
        }
    }
}
