/// User-visible notifications. The UI plugs its toast layer in here; the
/// default just logs.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// The owner's NFT-list query cache. The orchestrator never writes to it,
/// it only signals that cached data went stale.
pub trait NftCache: Send + Sync {
    fn invalidate(&self);
}

/// No-op cache for callers without a query layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl NftCache for NoCache {
    fn invalidate(&self) {}
}
