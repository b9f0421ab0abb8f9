//! Captured stack frame model.
//!
//! A frame is one call-stack entry taken from an atomic stack snapshot.
//! Symbolic fields (type name, method name, suspension scope, source
//! position) are always present; live detail (local slots, operand-stack
//! slots, held monitors) is present only when the capture requested it.
//! Frames are immutable once produced and two sequences captured at
//! different times never alias.

use crate::slot::{ObjectId, Slot};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;

/// Identity handle for a declaring type, as reported by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef(pub u64);

/// A symbolic frame field that the runtime may be unable to report.
///
/// Certain frame kinds (native frames, runtime-internal trampolines)
/// never expose their declaring-type identity or method signature. That
/// is a property of the frame kind, not an error, and is distinct from a
/// field that is merely absent: comparisons skip `Unsupported` fields
/// instead of treating them as mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<T> {
    Known(T),
    /// The runtime cannot report this field for this frame kind.
    Unsupported,
}

impl<T> FieldValue<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            FieldValue::Known(value) => Some(value),
            FieldValue::Unsupported => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, FieldValue::Unsupported)
    }
}

/// Live detail of a frame: the values it holds, not just what it is.
#[derive(Debug, Clone)]
pub struct LiveDetail {
    /// Local variable slots, in slot order.
    pub locals: SmallVec<[Slot; 8]>,
    /// Operand stack slots, bottom first.
    pub operand_stack: SmallVec<[Slot; 8]>,
    /// Identities of objects whose monitors this frame holds.
    pub monitors: BTreeSet<ObjectId>,
}

/// One captured call-stack entry.
///
/// `type_name` is the declaring-type-derived name and is always present,
/// even when the declaring type identity itself is [`FieldValue::Unsupported`].
/// Frame equality is defined by [`crate::frames_equal`], so
/// `Frame` does not implement `PartialEq`.
#[derive(Debug, Clone)]
pub struct Frame {
    pub type_name: String,
    pub method_name: String,
    /// Name of the enclosing suspension scope, or `None` for frames that
    /// are not suspension-scoped.
    pub scope_name: Option<String>,
    /// Declaring type identity; unsupported for some frame kinds.
    pub declaring_type: FieldValue<TypeRef>,
    /// Method signature descriptor; unsupported for some frame kinds.
    pub method_signature: FieldValue<String>,
    pub source_file: Option<String>,
    pub line: Option<u32>,
    // TODO: bytecode_index is captured but excluded from equivalence;
    // frames relocated by a suspend/resume cycle currently report
    // differing positions and the discrepancy is unresolved.
    pub bytecode_index: Option<u32>,
    /// Present only for live captures.
    pub live: Option<LiveDetail>,
}

impl Frame {
    /// Whether this frame carries live detail (locals, operand stack,
    /// monitors) in addition to its symbolic identity.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Derives the user-facing descriptor for this frame.
    ///
    /// Total over every frame variant: unsupported or absent fields fall
    /// back to a best-effort string form instead of failing.
    pub fn display_record(&self) -> DisplayRecord {
        DisplayRecord {
            type_name: self.type_name.clone(),
            method_name: self.method_name.clone(),
            source_file: self.source_file.clone(),
            line: self.line,
        }
    }
}

/// Ordered sequence of frames from a single atomic stack snapshot.
///
/// Whether the walk produced it outermost-first or innermost-first is a
/// contract of the walker; both sequences being compared must use the
/// same convention.
pub type FrameSequence = Vec<Frame>;

/// User-facing frame descriptor for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub type_name: String,
    pub method_name: String,
    pub source_file: Option<String>,
    pub line: Option<u32>,
}

impl fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.method_name)?;
        match (&self.source_file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({file}:{line})"),
            (Some(file), None) => write!(f, " ({file})"),
            (None, _) => write!(f, " (unknown source)"),
        }
    }
}

/// Derives display records for a whole captured sequence, in order.
pub fn display_trace(frames: &[Frame]) -> Vec<DisplayRecord> {
    frames.iter().map(Frame::display_record).collect()
}
