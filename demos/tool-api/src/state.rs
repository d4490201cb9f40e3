/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async supply-risk SDK. Dispatches the blocking pipeline to a
    /// thread pool and serializes runs behind a mutex.
    pub risk: supply_risk::AsyncSupplyRisk,
}
