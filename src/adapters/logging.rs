use crate::core::ProvisionLogger;

/// Forwards provisioning log lines to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ProvisionLogger for TracingLogger {
    fn log(&self, label: &str, value: &str) {
        tracing::info!("📍 {}{}", label, value);
    }
}
