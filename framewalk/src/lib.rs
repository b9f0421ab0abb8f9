//! Framewalk
//!
//! Stack introspection and frame equivalence for runtimes with suspendable
//! computations. A continuation can be paused mid-stack and resumed later,
//! possibly on a different physical stack; this crate answers whether two
//! captured views of such a stack — one taken before suspension, one after
//! resumption, one symbolic, one live — denote the same logical execution
//! state.
//!
//! The crate does not capture stacks itself. The host runtime's
//! enumeration capability is consumed through [`StackSource`]; the
//! [`StackWalker`] adapter turns its raw output into validated [`Frame`]
//! sequences, and the equivalence engine ([`sequences_equal`],
//! [`frames_equal`]) compares them. All types are immutable once captured
//! and every comparison is pure and synchronous.
//!
//! ```no_run
//! # use framewalk::{StackSource, StackWalker, WalkTarget, sequences_equal};
//! # fn demo<S: StackSource>(runtime: S) -> anyhow::Result<()> {
//! let walker = StackWalker::new(runtime);
//! let before = walker.capture_symbolic(WalkTarget::Scope("worker"))?;
//! // ... suspend and resume the computation ...
//! let after = walker.capture_symbolic(WalkTarget::Scope("worker"))?;
//! assert!(sequences_equal(&before, &after));
//! # Ok(())
//! # }
//! ```

mod equivalence;
mod frame;
mod slot;
mod walker;

pub use equivalence::{Divergence, frame_divergence, frames_equal, sequences_equal, slots_equal};
pub use frame::{DisplayRecord, FieldValue, Frame, FrameSequence, LiveDetail, TypeRef, display_trace};
pub use slot::{ObjectId, PrimitiveSlot, Slot};
pub use walker::{
    ContinuationId, RawFrame, RawLiveDetail, RawSlot, StackSource, StackWalker, WalkRequest,
    WalkTarget,
};
