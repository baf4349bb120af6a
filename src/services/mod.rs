//! Panel slot assignment engine.
//!
//! The resolver derives layout descriptors, the store owns the slot array,
//! the reconciler resets it on configuration changes and the gesture mapper
//! turns drag events into store operations. `BuilderSession` ties them
//! together into a single owned state object.

pub mod gestures;
pub mod reconciler;
pub mod resolver;
pub mod script;
pub mod session;
pub mod store;

// Re-export commonly used types and functions
pub use gestures::{DragSource, DropTarget, GestureEvent, GestureMapper, GesturePhase, Operation};
pub use reconciler::{ConfigSignature, ReconcilePolicy, Reconciler, ReconcilerState, Reconciliation};
pub use resolver::resolve;
pub use script::{ReplayReport, ScriptStep, SessionScript};
pub use session::{BuilderSession, GestureOutcome, SessionError};
pub use store::{AssignmentError, Placement, SlotAssignmentStore};
