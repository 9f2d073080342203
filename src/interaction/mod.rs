mod application;
mod interaction_store;
mod store;
mod throttle;

pub use application::{
    ApplicationController, ApplicationNode, AriaAttributes, FocusHost, FocusOptions, FocusTarget,
    NullFocusHost,
};
pub use interaction_store::{InteractionState, InteractionStore};
pub use store::{Store, Subscription, SyncedSelector};
pub use throttle::Throttle;
