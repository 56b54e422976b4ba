//! Local variable lifetime tracking.
//!
//! For every open frame we keep, per local slot, the current end-of-life and
//! the highest pc observed so far. A slot that was just read or written is
//! marked alive (`FRAME_LIFETIME`); the next instruction that moves past the
//! frame's pc ceiling becomes its end-of-life.
//!
//! The ceiling matters for loops. When control jumps back to the top of a loop
//! body, later pcs are numerically smaller than ones already executed, so
//! "end at the next instruction" would end a loop variable in the middle of
//! the body. Requiring a strictly higher pc keeps it live until control
//! leaves the loop.

use crate::model::{FrameId, LifetimeEnd, Pc};
use crate::utils::config::FRAME_LIFETIME;
use log::debug;
use std::collections::BTreeMap;

/// Finalized lifetime row of one frame, indexed by local slot
pub type LifetimeRow = Vec<Option<LifetimeEnd>>;

/// Lifetime state of one open frame
#[derive(Debug, Clone, Default)]
struct FrameLifetimes {
    end_of_life: LifetimeRow,
    max_pc_seen: Vec<Option<Pc>>,
    /// Highest pc executed in this frame, seeds slots first touched late
    high_water: Option<Pc>,
    /// Number of local slots the frame declares; accesses beyond it are rejected
    declared_slots: usize,
}

impl FrameLifetimes {
    fn with_params(param_count: usize, declared_slots: usize) -> Self {
        Self {
            end_of_life: vec![Some(FRAME_LIFETIME); param_count],
            max_pc_seen: vec![None; param_count],
            high_water: None,
            declared_slots: declared_slots.max(param_count),
        }
    }

    fn ensure_slot(&mut self, slot: usize) {
        if slot >= self.end_of_life.len() {
            self.end_of_life.resize(slot + 1, None);
            self.max_pc_seen.resize(slot + 1, self.high_water);
        }
    }

    /// Returns `false` for a slot outside the declared locals
    fn mark_alive(&mut self, slot: usize) -> bool {
        if slot >= self.declared_slots {
            return false;
        }
        self.ensure_slot(slot);
        self.end_of_life[slot] = Some(FRAME_LIFETIME);
        true
    }

    fn observe_instruction(&mut self, pc: Pc) {
        for (end, ceiling) in self.end_of_life.iter_mut().zip(self.max_pc_seen.iter_mut()) {
            let tracking = matches!(end, None | Some(LifetimeEnd::Frame));
            let above_ceiling = ceiling.map_or(true, |max| pc > max);
            if tracking && above_ceiling {
                *end = Some(LifetimeEnd::Pc(pc));
            }
            if above_ceiling {
                *ceiling = Some(pc);
            }
        }
        if self.high_water.map_or(true, |max| pc > max) {
            self.high_water = Some(pc);
        }
    }
}

/// Incremental lifetime analysis over a stream of frame events
///
/// **Public** - driven by the normalizer, usable on its own for step-wise inspection
#[derive(Debug, Clone, Default)]
pub struct LifetimeAnalyzer {
    open: BTreeMap<FrameId, FrameLifetimes>,
    finalized: BTreeMap<FrameId, LifetimeRow>,
}

impl LifetimeAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a frame; parameters are live from entry
    ///
    /// `declared_slots` is the frame's local count, raised to `param_count`
    /// if smaller.
    pub fn open_frame(&mut self, frame_id: FrameId, param_count: usize, declared_slots: usize) {
        self.open
            .insert(frame_id, FrameLifetimes::with_params(param_count, declared_slots));
    }

    /// Account for an instruction executed in `frame_id`
    pub fn observe_instruction(&mut self, frame_id: FrameId, pc: Pc) {
        if let Some(frame) = self.open.get_mut(&frame_id) {
            frame.observe_instruction(pc);
        }
    }

    /// A local was read or written; it is live again
    ///
    /// Returns `false` when `frame_id` is not an open frame or `slot` is not
    /// one of its declared locals, in which case nothing is recorded.
    pub fn record_access(&mut self, frame_id: FrameId, slot: usize) -> bool {
        self.open
            .get_mut(&frame_id)
            .is_some_and(|frame| frame.mark_alive(slot))
    }

    /// Freeze a frame's row
    pub fn close_frame(&mut self, frame_id: FrameId) {
        let Some(frame) = self.open.remove(&frame_id) else {
            return;
        };
        if self.finalized.contains_key(&frame_id) {
            debug!("Frame id {} reused, replacing its earlier lifetime row", frame_id);
        }
        self.finalized.insert(frame_id, frame.end_of_life);
    }

    pub fn is_open(&self, frame_id: FrameId) -> bool {
        self.open.contains_key(&frame_id)
    }

    /// Current row for a frame, open or closed
    pub fn row(&self, frame_id: FrameId) -> Option<&[Option<LifetimeEnd>]> {
        self.open
            .get(&frame_id)
            .map(|frame| frame.end_of_life.as_slice())
            .or_else(|| self.finalized.get(&frame_id).map(Vec::as_slice))
    }

    /// Current end-of-life of one slot
    pub fn end_of_life(&self, frame_id: FrameId, slot: usize) -> Option<LifetimeEnd> {
        self.row(frame_id)?.get(slot).copied().flatten()
    }

    /// Finalize every frame, including ones still open, and hand out the table
    pub fn finish(mut self) -> BTreeMap<FrameId, LifetimeRow> {
        let open: Vec<FrameId> = self.open.keys().copied().collect();
        for frame_id in open {
            self.close_frame(frame_id);
        }
        self.finalized
    }
}
