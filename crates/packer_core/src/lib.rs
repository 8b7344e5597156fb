//! State container for the plugin packer: the application state, the actions
//! that drive it, the pure reducer, and a store that threads state between
//! dispatches.

pub mod action;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::{Action, PackagedPlugin};
pub use reducer::reduce;
pub use state::AppState;
pub use store::Store;
