use crate::generation::Generator;
use crate::store::Repositories;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    /// Every AI call goes through here; holds the provider and fallback policy.
    pub generator: Generator,
}

#[cfg(test)]
pub mod testing {
    use std::sync::Arc;

    use super::AppState;
    use crate::generation::testing::ScriptedProvider;
    use crate::generation::{FallbackPolicy, Generator};
    use crate::store::memory::MemoryStore;
    use crate::store::Repositories;

    /// State backed by the in-memory store and a scripted provider.
    pub struct TestApp {
        pub state: AppState,
        pub store: Arc<MemoryStore>,
        pub provider: Arc<ScriptedProvider>,
    }

    impl TestApp {
        pub fn new() -> Self {
            Self::with_policy(FallbackPolicy::Fail)
        }

        pub fn with_policy(policy: FallbackPolicy) -> Self {
            let store = Arc::new(MemoryStore::new());
            let provider = Arc::new(ScriptedProvider::new());
            let state = AppState {
                repos: Repositories::memory(store.clone()),
                generator: Generator::new(provider.clone(), policy),
            };
            Self {
                state,
                store,
                provider,
            }
        }
    }
}
