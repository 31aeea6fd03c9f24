use thiserror::Error;

/// Failures surfaced to the user when finishing a drawing session.
///
/// `NothingDrawn` and `SinkUnavailable` carry distinct messages on purpose:
/// the first asks the user to draw, the second reports a wiring problem. The
/// editor scene is preserved on every variant so the user can retry.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("nothing was drawn; draw something before saving")]
    NothingDrawn,
    #[error("could not save the drawing: no export sink is available")]
    SinkUnavailable,
    #[error("could not save the drawing: {0}")]
    Sink(String),
}
