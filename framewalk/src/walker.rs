//! Walker adapter over the host runtime's stack enumeration capability.
//!
//! The host runtime knows how to enumerate the call frames reachable from
//! a suspension scope or a continuation instance; this module adapts that
//! capability into validated [`Frame`] sequences. The adapter owns two
//! policies: internal trampoline frames are always requested (so a
//! comparison cannot silently skip mismatched bridge-frame counts), and
//! raw primitive slot payloads are width-checked on the way in — a width
//! other than 4 or 8 bytes means the capture itself is corrupted and the
//! walk fails with a diagnostic naming the offending slot.

use crate::frame::{FieldValue, Frame, FrameSequence, LiveDetail, TypeRef};
use crate::slot::{ObjectId, PrimitiveSlot, Slot};
use anyhow::{Context, Result, anyhow, bail};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use tracing::debug;
use zerocopy::FromBytes;

/// Handle for a continuation instance registered with the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContinuationId(pub u64);

/// Options forwarded to the host runtime for a single walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkRequest {
    /// Request locals, operand stack, and monitor detail per frame.
    pub live_detail: bool,
    /// Include runtime-internal trampoline/bridge frames.
    pub show_hidden: bool,
}

/// What to walk: a named suspension scope or a continuation instance.
#[derive(Debug, Clone, Copy)]
pub enum WalkTarget<'a> {
    Scope(&'a str),
    Continuation(ContinuationId),
}

/// Host runtime capability to enumerate call frames.
///
/// Each walk is a point-in-time snapshot of the target stack; nothing
/// guarantees it reflects any later state of the same logical stack.
pub trait StackSource {
    fn walk_scope(&self, scope: &str, request: WalkRequest) -> Result<Vec<RawFrame>>;

    fn walk_continuation(
        &self,
        continuation: ContinuationId,
        request: WalkRequest,
    ) -> Result<Vec<RawFrame>>;
}

/// Frame data exactly as the host runtime reports it, before validation.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub type_name: String,
    pub method_name: String,
    pub scope_name: Option<String>,
    pub declaring_type: FieldValue<TypeRef>,
    pub method_signature: FieldValue<String>,
    pub source_file: Option<String>,
    pub line: Option<u32>,
    pub bytecode_index: Option<u32>,
    pub live: Option<RawLiveDetail>,
}

/// Unvalidated live detail of a raw frame.
#[derive(Debug, Clone, Default)]
pub struct RawLiveDetail {
    pub locals: Vec<RawSlot>,
    pub operand_stack: Vec<RawSlot>,
    pub monitors: Vec<ObjectId>,
}

/// One slot as reported by the runtime: an object identity, or primitive
/// payload bytes whose length is the declared slot width.
#[derive(Debug, Clone)]
pub enum RawSlot {
    Reference(ObjectId),
    /// Payload in native byte order; the length is the declared width.
    Primitive(SmallVec<[u8; 8]>),
}

/// Adapter producing validated frame sequences from a [`StackSource`].
#[derive(Debug)]
pub struct StackWalker<S> {
    source: S,
}

impl<S: StackSource> StackWalker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Captures the target stack with symbolic fields only.
    pub fn capture_symbolic(&self, target: WalkTarget<'_>) -> Result<FrameSequence> {
        self.capture(target, false)
    }

    /// Captures the target stack with live detail (locals, operand stack,
    /// monitors) in every frame the runtime can report it for.
    pub fn capture_live(&self, target: WalkTarget<'_>) -> Result<FrameSequence> {
        self.capture(target, true)
    }

    fn capture(&self, target: WalkTarget<'_>, live_detail: bool) -> Result<FrameSequence> {
        // Hidden frames stay visible unconditionally; see module docs.
        let request = WalkRequest {
            live_detail,
            show_hidden: true,
        };
        let raw = match target {
            WalkTarget::Scope(scope) => self
                .source
                .walk_scope(scope, request)
                .with_context(|| format!("walking scope {scope:?}"))?,
            WalkTarget::Continuation(id) => self
                .source
                .walk_continuation(id, request)
                .with_context(|| format!("walking continuation {}", id.0))?,
        };
        debug!(
            "captured {} frames from {:?} (live_detail: {})",
            raw.len(),
            target,
            live_detail
        );
        raw.into_iter()
            .enumerate()
            .map(|(index, frame)| convert_frame(index, frame))
            .collect()
    }
}

fn convert_frame(index: usize, raw: RawFrame) -> Result<Frame> {
    let live = match raw.live {
        Some(detail) => Some(
            convert_live(detail)
                .with_context(|| format!("frame {index} ({}::{})", raw.type_name, raw.method_name))?,
        ),
        None => None,
    };
    Ok(Frame {
        type_name: raw.type_name,
        method_name: raw.method_name,
        scope_name: raw.scope_name,
        declaring_type: raw.declaring_type,
        method_signature: raw.method_signature,
        source_file: raw.source_file,
        line: raw.line,
        bytecode_index: raw.bytecode_index,
        live,
    })
}

fn convert_live(detail: RawLiveDetail) -> Result<LiveDetail> {
    let locals = convert_slots(&detail.locals, "local")?;
    let operand_stack = convert_slots(&detail.operand_stack, "operand stack")?;
    let monitors: BTreeSet<ObjectId> = detail.monitors.into_iter().collect();
    Ok(LiveDetail {
        locals,
        operand_stack,
        monitors,
    })
}

fn convert_slots(raw: &[RawSlot], kind: &str) -> Result<SmallVec<[Slot; 8]>> {
    raw.iter()
        .enumerate()
        .map(|(slot_index, slot)| {
            convert_slot(slot).with_context(|| format!("{kind} slot {slot_index}"))
        })
        .collect()
}

fn convert_slot(raw: &RawSlot) -> Result<Slot> {
    match raw {
        RawSlot::Reference(id) => Ok(Slot::Reference(*id)),
        RawSlot::Primitive(bytes) => match bytes.len() {
            4 => {
                let bits = u32::read_from_bytes(&bytes[..])
                    .map_err(|_| anyhow!("primitive slot payload length mismatch"))?;
                Ok(Slot::Primitive(PrimitiveSlot::Word(bits)))
            }
            8 => {
                let bits = u64::read_from_bytes(&bytes[..])
                    .map_err(|_| anyhow!("primitive slot payload length mismatch"))?;
                Ok(Slot::Primitive(PrimitiveSlot::DoubleWord(bits)))
            }
            width => bail!("invalid primitive slot width {width} (expected 4 or 8)"),
        },
    }
}
