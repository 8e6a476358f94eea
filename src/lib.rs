// Public library surface for the binaries and integration tests.

pub mod api;
pub mod collect;
pub mod format;
pub mod model;
pub mod notify;
pub mod scene;
pub mod sources;
pub mod translate;

pub use api::{router, AppState};
pub use model::{Digest, NewsItem};
pub use notify::Delivery;
