//! The data-context family: the public facade, the backend seam, and the
//! three concrete backends (ephemeral, file, cloud).

pub mod backend;
pub mod cloud;
pub mod data_context;
pub mod ephemeral;
pub mod file;
pub mod ops;

pub use backend::{ContextBackend, ContextVariant};
pub use cloud::CloudBackend;
pub use data_context::{CloudDataContext, DataContext, EphemeralDataContext, FileDataContext};
pub use ephemeral::EphemeralBackend;
pub use file::FileBackend;
pub use ops::{ContextMethod, DATA_CONTEXT_OWNER};
