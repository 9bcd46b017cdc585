//! Campaign dashboard management: the campaign → ad set → ad hierarchy store,
//! its command model, id generation and cosmetic preferences.
//!
//! The store keeps the tree in memory only; every mutation publishes a new
//! immutable snapshot with all derived metrics recomputed.

pub mod ids;
pub mod models;
pub mod preferences;
pub mod session;
pub mod store;

pub use ids::{IdGenerator, IdKind, SequentialIds, UuidIds};
pub use models::{DashboardCommand, DashboardData, ItemPath};
pub use preferences::{Preferences, PreferencesStore, ThemeColors};
pub use session::DashboardSession;
pub use store::DashboardStore;
