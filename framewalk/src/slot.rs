//! Slot values captured from live stack frames.
//!
//! A slot is one stored value inside a live frame: either an opaque object
//! reference or a fixed-width primitive payload. The host runtime reports
//! primitives as raw bits with a declared width; here the width tag and the
//! payload live in a single enum variant, so a slot can never claim one
//! width while carrying another.

/// Identity handle for an object reference reported by the host runtime.
///
/// Two handles are equal exactly when they name the same object. The
/// numeric value is opaque and only meaningful to the runtime that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

/// Primitive slot payload, tagged by width.
///
/// Stack slots on the runtimes we target are either one machine word
/// (4 bytes) or two (8 bytes). A sub-word value such as a boolean still
/// occupies a full 4-byte slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveSlot {
    /// 4-byte slot.
    Word(u32),
    /// 8-byte slot.
    DoubleWord(u64),
}

impl PrimitiveSlot {
    /// Width of the slot in bytes: 4 or 8.
    pub fn width_bytes(&self) -> usize {
        match self {
            PrimitiveSlot::Word(_) => 4,
            PrimitiveSlot::DoubleWord(_) => 8,
        }
    }

    /// Raw payload, zero-extended to 64 bits. For diagnostics only; the
    /// equivalence engine compares payloads at their declared width.
    pub fn bits(&self) -> u64 {
        match self {
            PrimitiveSlot::Word(bits) => u64::from(*bits),
            PrimitiveSlot::DoubleWord(bits) => *bits,
        }
    }
}

/// One stored value within a live frame.
///
/// Equality between slots is a policy of the equivalence engine
/// ([`crate::slots_equal`]), not a property of the type, so
/// `Slot` deliberately does not implement `PartialEq`.
#[derive(Debug, Clone, Copy)]
pub enum Slot {
    /// An object reference, compared by identity.
    Reference(ObjectId),
    /// A primitive payload with an explicit width.
    Primitive(PrimitiveSlot),
}

impl Slot {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Slot::Primitive(_))
    }
}
