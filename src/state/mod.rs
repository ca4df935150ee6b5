pub mod form_state;
pub mod mutation_registry;

pub use form_state::FormStateStore;
pub use mutation_registry::{MutationHandle, MutationRegistry, RESUME_CHECK_KEY};
