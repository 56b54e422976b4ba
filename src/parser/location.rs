//! Resolution of effect locations to local slots.

use super::schema::RawLocation;
use crate::model::{FrameId, TraceLocation};

/// Local slot an effect location denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub frame_id: FrameId,
    pub local_index: usize,
}

impl From<ResolvedSlot> for TraceLocation {
    fn from(slot: ResolvedSlot) -> Self {
        TraceLocation::Local {
            frame_id: slot.frame_id,
            local_index: slot.local_index,
        }
    }
}

/// Resolve a raw location against the topmost open frame
///
/// **Public** - called by the normalizer for every read and write
///
/// # Returns
/// * `Local` locations resolve to themselves, whichever frame they name
/// * `Indexed` locations resolve to their root local, but only when that
///   local belongs to `current_frame`
/// * everything else resolves to `None`, meaning "no lifetime update"
pub fn resolve_location(raw: &RawLocation, current_frame: Option<FrameId>) -> Option<ResolvedSlot> {
    match raw {
        RawLocation::Local(frame_id, local_index) => Some(ResolvedSlot {
            frame_id: *frame_id,
            local_index: *local_index,
        }),
        RawLocation::Indexed(base, _) => {
            let root = root_local(base)?;
            (Some(root.frame_id) == current_frame).then_some(root)
        }
        RawLocation::Global(_) | RawLocation::Unknown(_) => None,
    }
}

/// **Private** - walk nested indexing down to the local it starts from
fn root_local(location: &RawLocation) -> Option<ResolvedSlot> {
    let mut cursor = location;
    loop {
        match cursor {
            RawLocation::Local(frame_id, local_index) => {
                return Some(ResolvedSlot {
                    frame_id: *frame_id,
                    local_index: *local_index,
                })
            }
            RawLocation::Indexed(base, _) => cursor = base.as_ref(),
            RawLocation::Global(_) | RawLocation::Unknown(_) => return None,
        }
    }
}
