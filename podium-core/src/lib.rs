use podium_database::PlayerStore;

pub use podium_database::PodiumError;

/// Shared application state handed to every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: PlayerStore,
}

impl AppState {
    pub fn new(store: PlayerStore) -> Self {
        Self { store }
    }
}
