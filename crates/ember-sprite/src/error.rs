/// Usage errors surfaced by the submission API.
///
/// These are fatal to the call, never to the process. Resource exhaustion
/// (pool or staging growth) is not represented here: allocation failure
/// aborts through the standard fatal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteBatchError {
    /// `begin` was called while a session was already active.
    BeginAlreadyCalled,

    /// A submission was made with no active session.
    DrawWithoutBegin,

    /// `end` was called with no active session.
    EndWithoutBegin,

    /// The operation assumes deferred batching and cannot run under the
    /// immediate sort mode.
    ImmediateNotSupported,

    /// A character has no glyph and the font has no default glyph.
    MissingGlyph(char),
}

impl std::fmt::Display for SpriteBatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteBatchError::BeginAlreadyCalled => {
                write!(f, "begin was called while a batch session was already active")
            }
            SpriteBatchError::DrawWithoutBegin => {
                write!(
                    f,
                    "draw was called with no active batch session; call begin first"
                )
            }
            SpriteBatchError::EndWithoutBegin => {
                write!(f, "end was called with no active batch session")
            }
            SpriteBatchError::ImmediateNotSupported => {
                write!(f, "this operation is not supported in immediate sort mode")
            }
            SpriteBatchError::MissingGlyph(c) => {
                write!(
                    f,
                    "character {c:?} has no glyph and the font has no default glyph"
                )
            }
        }
    }
}

impl std::error::Error for SpriteBatchError {}

/// Result type for submission operations.
pub type SpriteResult<T> = Result<T, SpriteBatchError>;
