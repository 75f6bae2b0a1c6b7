// Resume sessions: the editable resume plus its user-chosen section order.
// The store is the single owner of both; renderers work on cloned snapshots.
pub mod handlers;
pub mod store;

pub use store::{ResumeSession, ResumeStore};
