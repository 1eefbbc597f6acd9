use bytes::Bytes;

use crate::config::SettingsUpdate;

/// Transition direction recorded on every navigation step; the rendering layer
/// uses it to pick an animation and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Commands accepted by the session loop. Autoplay ticks and user navigation
/// enter through the same serialized channel.
#[derive(Debug)]
pub enum Command {
    /// Autoplay timer fired.
    Tick,
    /// User asked for the next image.
    Next,
    /// User asked for the previous image.
    Prev,
    /// Fill the rest of the window after the first image is on screen.
    Backfill,
    /// Settings surface submitted a configuration change.
    Configure(SettingsUpdate),
}

/// Events published to the rendering layer.
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// First-run setup has not completed; show the setup surface instead.
    NeedsSetup,
    /// Cold start in progress, nothing to draw yet.
    Loading,
    /// The currently selected slot changed.
    Frame(FrameUpdate),
}

/// Snapshot of the slot the cursor names. A `None` payload with a `Some` slot
/// id is a placeholder: render "no image available", not an error.
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    pub slot_id: Option<u64>,
    pub payload: Option<Bytes>,
    pub content_type: Option<String>,
    pub direction: Direction,
}
