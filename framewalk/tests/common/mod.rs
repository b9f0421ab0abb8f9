//! Common test utilities: a mock continuation runtime and frame builders.
//!
//! `MockRuntime` stands in for the host runtime's frame enumeration
//! capability. It holds prebuilt stacks per suspension scope and per
//! continuation instance, honors the `live_detail` flag by stripping live
//! detail, and honors `show_hidden` by filtering frames marked internal —
//! which lets tests verify the walker's always-show-hidden policy.

use anyhow::{Context, Result};
use framewalk::{
    ContinuationId, FieldValue, ObjectId, RawFrame, RawLiveDetail, RawSlot, StackSource, TypeRef,
    WalkRequest,
};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Initializes test logging. Set `FRAMEWALK_LOG=debug` to see divergence
/// reports from the equivalence engine.
pub fn init_logging() {
    let filter = std::env::var("FRAMEWALK_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// One frame as the mock runtime holds it.
pub struct MockFrame {
    pub raw: RawFrame,
    /// Runtime-internal trampoline/bridge frame, hidden unless the walk
    /// requests hidden frames.
    pub internal: bool,
}

#[derive(Default)]
pub struct MockRuntime {
    scopes: HashMap<String, Vec<MockFrame>>,
    continuations: HashMap<ContinuationId, Vec<MockFrame>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scope(&mut self, scope: &str, frames: Vec<MockFrame>) {
        self.scopes.insert(scope.to_string(), frames);
    }

    pub fn set_continuation(&mut self, continuation: ContinuationId, frames: Vec<MockFrame>) {
        self.continuations.insert(continuation, frames);
    }
}

impl StackSource for MockRuntime {
    fn walk_scope(&self, scope: &str, request: WalkRequest) -> Result<Vec<RawFrame>> {
        let frames = self
            .scopes
            .get(scope)
            .with_context(|| format!("no stack mounted for scope {scope:?}"))?;
        Ok(project(frames, request))
    }

    fn walk_continuation(
        &self,
        continuation: ContinuationId,
        request: WalkRequest,
    ) -> Result<Vec<RawFrame>> {
        let frames = self
            .continuations
            .get(&continuation)
            .with_context(|| format!("no stack mounted for continuation {}", continuation.0))?;
        Ok(project(frames, request))
    }
}

fn project(frames: &[MockFrame], request: WalkRequest) -> Vec<RawFrame> {
    frames
        .iter()
        .filter(|frame| request.show_hidden || !frame.internal)
        .map(|frame| {
            let mut raw = frame.raw.clone();
            if !request.live_detail {
                raw.live = None;
            }
            raw
        })
        .collect()
}

/// An ordinary application frame with full symbolic identity.
pub fn app_frame(type_id: u64, type_name: &str, method: &str, scope: &str, line: u32) -> MockFrame {
    MockFrame {
        raw: RawFrame {
            type_name: type_name.to_string(),
            method_name: method.to_string(),
            scope_name: Some(scope.to_string()),
            declaring_type: FieldValue::Known(TypeRef(type_id)),
            method_signature: FieldValue::Known(format!("{type_name}::{method}()")),
            source_file: Some(format!("{}.rs", method)),
            line: Some(line),
            bytecode_index: Some(line * 3),
            live: None,
        },
        internal: false,
    }
}

/// A runtime-internal trampoline frame inserted by the suspend/resume
/// machinery. It cannot report declaring-type identity or a signature.
pub fn trampoline_frame(scope: &str) -> MockFrame {
    MockFrame {
        raw: RawFrame {
            type_name: "runtime::Trampoline".to_string(),
            method_name: "enter".to_string(),
            scope_name: Some(scope.to_string()),
            declaring_type: FieldValue::Unsupported,
            method_signature: FieldValue::Unsupported,
            source_file: None,
            line: None,
            bytecode_index: None,
            live: None,
        },
        internal: true,
    }
}

/// Attaches live detail to a frame.
pub fn with_live(
    mut frame: MockFrame,
    locals: Vec<RawSlot>,
    operand_stack: Vec<RawSlot>,
    monitors: &[u64],
) -> MockFrame {
    frame.raw.live = Some(RawLiveDetail {
        locals,
        operand_stack,
        monitors: monitors.iter().copied().map(ObjectId).collect(),
    });
    frame
}

pub fn word(value: u32) -> RawSlot {
    RawSlot::Primitive(SmallVec::from_slice(&value.to_ne_bytes()))
}

pub fn double_word(value: u64) -> RawSlot {
    RawSlot::Primitive(SmallVec::from_slice(&value.to_ne_bytes()))
}

pub fn reference(id: u64) -> RawSlot {
    RawSlot::Reference(ObjectId(id))
}

/// A primitive slot with a deliberately invalid width, as a corrupted
/// capture layer would report it.
pub fn corrupt_slot(width: usize) -> RawSlot {
    RawSlot::Primitive(SmallVec::from_slice(&vec![0u8; width]))
}
