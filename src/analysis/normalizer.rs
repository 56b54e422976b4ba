//! Single-pass normalization of raw trace events.
//!
//! Walks the raw events in file order with an explicit stack of open frame
//! ids, emits the canonical event stream and drives lifetime analysis.

use super::lifetime::{LifetimeAnalyzer, LifetimeRow};
use crate::model::{FrameId, LifetimeEnd, ModuleInfo, Pc, TraceEffect, TraceEvent, TraceLocation};
use crate::parser::location::resolve_location;
use crate::parser::schema::{RawEffect, RawEvent, RawFrame, RawLocation, RawTraceValue};
use crate::parser::value::{decode_trace_value, render_local_type, render_type, scalar_text};
use crate::utils::error::TraceError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Knobs for a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Re-emit resolved `Read` effects into the canonical stream
    pub emit_reads: bool,
}

impl NormalizeOptions {
    pub fn with_reads(mut self, emit_reads: bool) -> Self {
        self.emit_reads = emit_reads;
        self
    }
}

/// Counters gathered during one pass, including recoverable conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub raw_events: usize,
    pub frames_opened: usize,
    pub instructions: usize,
    pub writes: usize,
    pub reads: usize,
    pub execution_errors: usize,

    /// Push/Pop/DataLoad effects, which carry no lifetime information
    pub skipped_effects: usize,

    /// Reads and writes whose location could not be tied to a declared local
    /// of an open frame
    pub unresolved_effects: usize,

    /// Instructions seen while no frame was open
    pub orphan_instructions: usize,

    /// Frames never closed by the end of the trace, outermost first
    pub unclosed_frames: Vec<FrameId>,
}

impl IngestStats {
    /// Human-readable lines for every recoverable condition
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.unresolved_effects > 0 {
            warnings.push(format!(
                "{} effect(s) were not resolved to a local of an open frame",
                self.unresolved_effects
            ));
        }
        if self.orphan_instructions > 0 {
            warnings.push(format!(
                "{} instruction(s) were recorded outside of any frame",
                self.orphan_instructions
            ));
        }
        if !self.unclosed_frames.is_empty() {
            warnings.push(format!(
                "{} frame(s) were still open at the end of the trace: {:?}",
                self.unclosed_frames.len(),
                self.unclosed_frames
            ));
        }
        warnings
    }

    pub fn has_warnings(&self) -> bool {
        self.unresolved_effects > 0 || self.orphan_instructions > 0 || !self.unclosed_frames.is_empty()
    }
}

/// Result of ingesting one trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTrace {
    pub events: Vec<TraceEvent>,

    /// Frame id -> end-of-life per local slot
    pub local_lifetime_ends: BTreeMap<FrameId, LifetimeRow>,

    pub stats: IngestStats,
}

impl NormalizedTrace {
    pub fn lifetime_end(&self, frame_id: FrameId, local_index: usize) -> Option<LifetimeEnd> {
        self.local_lifetime_ends
            .get(&frame_id)?
            .get(local_index)
            .copied()
            .flatten()
    }

    /// Whether local `local_index` of `frame_id` is live at `pc`
    ///
    /// Slots never observed live report `false`.
    pub fn is_local_live(&self, frame_id: FrameId, local_index: usize, pc: Pc) -> bool {
        self.lifetime_end(frame_id, local_index)
            .is_some_and(|end| end.is_live_at(pc))
    }
}

/// Streaming normalizer; feed it raw events in order, then `finish`
#[derive(Debug, Clone, Default)]
pub struct EventNormalizer {
    options: NormalizeOptions,
    events: Vec<TraceEvent>,
    call_stack: Vec<FrameId>,
    lifetimes: LifetimeAnalyzer,
    stats: IngestStats,
}

impl EventNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Topmost open frame
    pub fn current_frame(&self) -> Option<FrameId> {
        self.call_stack.last().copied()
    }

    /// Lifetime state as of the last pushed event
    pub fn lifetimes(&self) -> &LifetimeAnalyzer {
        &self.lifetimes
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Process one raw event
    ///
    /// # Errors
    /// * `TraceError::DuplicateFrame` - OpenFrame with an id that is already open
    /// * `TraceError::StackMismatch` - CloseFrame that is not for the topmost frame
    pub fn push(&mut self, index: usize, raw: RawEvent) -> Result<(), TraceError> {
        self.stats.raw_events += 1;
        match raw {
            RawEvent::OpenFrame { frame, .. } => self.open_frame(index, frame),
            RawEvent::CloseFrame {
                frame_id, return_, ..
            } => self.close_frame(index, frame_id, &return_),
            RawEvent::Instruction {
                pc,
                instruction,
                gas_left,
                ..
            } => {
                self.instruction(pc, instruction, gas_left);
                Ok(())
            }
            RawEvent::Effect(effect) => {
                self.effect(index, *effect);
                Ok(())
            }
        }
    }

    /// **Private** - OpenFrame handling
    fn open_frame(&mut self, index: usize, frame: RawFrame) -> Result<(), TraceError> {
        let id = frame.frame_id;
        if self.call_stack.contains(&id) {
            return Err(TraceError::DuplicateFrame { index, frame_id: id });
        }

        let param_values = frame.parameters.iter().map(decode_trace_value).collect::<Vec<_>>();
        self.lifetimes
            .open_frame(id, param_values.len(), frame.locals_types.len());
        self.call_stack.push(id);
        self.stats.frames_opened += 1;

        debug!(
            "Event {}: open frame {} ({}::{}), depth {}",
            index,
            id,
            frame.module.name,
            frame.function_name,
            self.call_stack.len()
        );

        self.events.push(TraceEvent::OpenFrame {
            id,
            name: frame.function_name,
            module: ModuleInfo {
                address: scalar_text(&frame.module.address),
                name: frame.module.name,
            },
            is_native: frame.is_native,
            local_types: frame.locals_types.iter().map(render_local_type).collect(),
            type_instantiation: frame.type_instantiation.iter().map(render_type).collect(),
            param_values,
        });
        Ok(())
    }

    /// **Private** - CloseFrame handling, enforces stack discipline
    fn close_frame(
        &mut self,
        index: usize,
        frame_id: FrameId,
        return_values: &[RawTraceValue],
    ) -> Result<(), TraceError> {
        match self.call_stack.last() {
            Some(&top) if top == frame_id => {}
            expected => {
                return Err(TraceError::StackMismatch {
                    index,
                    expected: expected.copied(),
                    found: frame_id,
                })
            }
        }

        self.call_stack.pop();
        self.lifetimes.close_frame(frame_id);
        self.events.push(TraceEvent::CloseFrame {
            id: frame_id,
            return_values: return_values.iter().map(decode_trace_value).collect(),
        });
        Ok(())
    }

    /// **Private** - Instruction handling
    fn instruction(&mut self, pc: Pc, instruction: String, gas_left: u64) {
        self.stats.instructions += 1;
        match self.current_frame() {
            Some(frame_id) => self.lifetimes.observe_instruction(frame_id, pc),
            None => self.stats.orphan_instructions += 1,
        }
        self.events.push(TraceEvent::Instruction {
            pc,
            instruction,
            gas_left,
        });
    }

    /// **Private** - Effect handling; unresolved reads and writes are dropped
    fn effect(&mut self, index: usize, effect: RawEffect) {
        match effect {
            RawEffect::Write {
                location,
                root_value_after_write,
            } => {
                let Some(location) = self.resolve(index, &location) else {
                    return;
                };
                self.stats.writes += 1;
                self.events.push(TraceEvent::Effect(TraceEffect::Write {
                    location,
                    value: decode_trace_value(&root_value_after_write),
                }));
            }
            RawEffect::Read {
                location,
                root_value_read,
                ..
            } => {
                let Some(location) = self.resolve(index, &location) else {
                    return;
                };
                self.stats.reads += 1;
                if self.options.emit_reads {
                    self.events.push(TraceEvent::Effect(TraceEffect::Read {
                        location,
                        value: decode_trace_value(&root_value_read),
                    }));
                }
            }
            RawEffect::ExecutionError(message) => {
                self.stats.execution_errors += 1;
                self.events
                    .push(TraceEvent::Effect(TraceEffect::ExecutionError(message)));
            }
            RawEffect::Push(_) | RawEffect::Pop(_) | RawEffect::DataLoad(_) => {
                self.stats.skipped_effects += 1;
            }
        }
    }

    /// **Private** - resolve a location and mark the slot alive
    fn resolve(&mut self, index: usize, raw: &RawLocation) -> Option<TraceLocation> {
        let resolved = resolve_location(raw, self.current_frame())
            .filter(|slot| self.lifetimes.record_access(slot.frame_id, slot.local_index));

        if resolved.is_none() {
            self.stats.unresolved_effects += 1;
            debug!("Event {}: dropping effect on unresolved location {:?}", index, raw);
        }
        resolved.map(TraceLocation::from)
    }

    /// Close out the pass
    ///
    /// Frames still open keep their rows as they stand; this is reported as
    /// a warning, not an error.
    pub fn finish(mut self) -> NormalizedTrace {
        self.stats.unclosed_frames = std::mem::take(&mut self.call_stack);

        for warning in self.stats.warnings() {
            warn!("{}", warning);
        }
        debug!(
            "Normalized {} raw events into {} canonical events ({} frames)",
            self.stats.raw_events,
            self.events.len(),
            self.stats.frames_opened
        );

        NormalizedTrace {
            events: self.events,
            local_lifetime_ends: self.lifetimes.finish(),
            stats: self.stats,
        }
    }
}

/// Normalize a complete sequence of raw events
///
/// **Public** - main entry point for already-parsed events
pub fn normalize(
    raw_events: impl IntoIterator<Item = RawEvent>,
    options: &NormalizeOptions,
) -> Result<NormalizedTrace, TraceError> {
    let mut normalizer = EventNormalizer::new(options.clone());
    for (index, raw) in raw_events.into_iter().enumerate() {
        normalizer.push(index, raw)?;
    }
    Ok(normalizer.finish())
}
