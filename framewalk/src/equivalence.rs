//! Frame and sequence equivalence.
//!
//! Decides whether two captured stack views denote the same logical
//! execution state. Frame comparison runs in ordered stages — symbolic
//! gate, strict identity, display cross-check, then live detail — so a
//! mismatch can be attributed to the stage that detected it while the
//! public contract stays a single boolean. Everything here is pure;
//! shape mismatches (lengths, monitor sets) are ordinary negative
//! results, never errors.

use crate::frame::Frame;
use crate::slot::Slot;
use tracing::debug;

/// Where two frames were found to diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    /// Type name, method name, or scope name differ.
    Symbolic,
    /// Declaring-type identity or method signature differ (both known on
    /// both sides).
    Identity,
    /// Derived display records differ despite the raw fields matching.
    Display,
    /// Held monitor sets differ.
    Monitors,
    /// Local slot counts differ.
    LocalsLen { left: usize, right: usize },
    /// Local slots differ at this index.
    Locals { index: usize },
    /// Operand stack depths differ.
    OperandStackLen { left: usize, right: usize },
    /// Operand stack slots differ at this index.
    OperandStack { index: usize },
}

/// Whether two frame sequences denote the same logical stack.
///
/// False on length mismatch, otherwise position-wise [`frames_equal`],
/// short-circuiting on the first mismatching pair.
pub fn sequences_equal(a: &[Frame], b: &[Frame]) -> bool {
    if a.len() != b.len() {
        debug!("sequence lengths differ: {} vs {}", a.len(), b.len());
        return false;
    }
    a.iter().zip(b).all(|(fa, fb)| frames_equal(fa, fb))
}

/// Whether two frames denote the same logical execution state.
///
/// A live frame and a symbolic frame with matching symbolic identity
/// compare equal; live detail only participates when both sides carry it.
pub fn frames_equal(a: &Frame, b: &Frame) -> bool {
    match frame_divergence(a, b) {
        None => true,
        Some(divergence) => {
            debug!(
                "frames diverge at {:?}: {} vs {}",
                divergence,
                a.display_record(),
                b.display_record()
            );
            false
        }
    }
}

/// Staged frame comparison, reporting the first stage that found a
/// mismatch.
///
/// The bytecode index deliberately participates in no stage; see the TODO
/// on [`Frame::bytecode_index`].
pub fn frame_divergence(a: &Frame, b: &Frame) -> Option<Divergence> {
    // Stage 1: symbolic gate. Absent scope names compare equal to each
    // other and unequal to present ones.
    if a.type_name != b.type_name
        || a.method_name != b.method_name
        || a.scope_name != b.scope_name
    {
        return Some(Divergence::Symbolic);
    }

    // Stage 2: strict identity fields. Skipped entirely when any of the
    // four fields is unsupported for its frame kind.
    if let (Some(ta), Some(tb), Some(sa), Some(sb)) = (
        a.declaring_type.known(),
        b.declaring_type.known(),
        a.method_signature.known(),
        b.method_signature.known(),
    ) && (ta != tb || sa != sb)
    {
        return Some(Divergence::Identity);
    }

    // Stage 3: display cross-check, independent of the raw fields.
    if a.display_record() != b.display_record() {
        return Some(Divergence::Display);
    }

    // Stage 4: live-detail gate. Missing detail on either side is not a
    // mismatch; slot comparison needs both.
    let (Some(la), Some(lb)) = (&a.live, &b.live) else {
        return None;
    };

    // Stage 5: live comparison.
    if la.monitors != lb.monitors {
        return Some(Divergence::Monitors);
    }
    if la.locals.len() != lb.locals.len() {
        return Some(Divergence::LocalsLen {
            left: la.locals.len(),
            right: lb.locals.len(),
        });
    }
    if let Some(index) = first_slot_mismatch(&la.locals, &lb.locals) {
        return Some(Divergence::Locals { index });
    }
    if la.operand_stack.len() != lb.operand_stack.len() {
        return Some(Divergence::OperandStackLen {
            left: la.operand_stack.len(),
            right: lb.operand_stack.len(),
        });
    }
    if let Some(index) = first_slot_mismatch(&la.operand_stack, &lb.operand_stack) {
        return Some(Divergence::OperandStack { index });
    }

    None
}

/// Whether two slots hold the same value.
///
/// A primitive never equals a reference, and primitives of different
/// widths never compare equal even when their low bits agree. Widths
/// other than 4 and 8 are unrepresentable; corrupted captures are
/// rejected by the walker before a [`Slot`] exists.
pub fn slots_equal(a: &Slot, b: &Slot) -> bool {
    match (a, b) {
        (Slot::Reference(ia), Slot::Reference(ib)) => ia == ib,
        (Slot::Primitive(pa), Slot::Primitive(pb)) => pa == pb,
        _ => false,
    }
}

fn first_slot_mismatch(a: &[Slot], b: &[Slot]) -> Option<usize> {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .position(|(sa, sb)| !slots_equal(sa, sb))
}
