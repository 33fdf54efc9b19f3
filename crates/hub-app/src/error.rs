use hub_core::CoreError;
use hub_remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A remote call failed. `message` is the fixed text also recorded as
    /// the store's error.
    #[error("{message}")]
    Remote {
        message: &'static str,
        #[source]
        source: RemoteError,
    },

    /// Rejected locally (form validation, unknown id).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A guarded operation was attempted without a signed-in identity.
    #[error("sign in to manage ideas")]
    NotAuthenticated,
}

impl StoreError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::Core(CoreError::NotFound {
            entity_type: "idea".into(),
            id: id.to_string(),
        })
    }
}
