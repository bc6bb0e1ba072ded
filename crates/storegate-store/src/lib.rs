mod error;
mod http;
mod memory;
mod traits;

pub use error::{StoreError, StoreStage};
pub use http::HttpDocumentStore;
pub use memory::MemoryStore;
pub use traits::{DocumentKey, DocumentStore};
