pub type GraydriftResult<T> = Result<T, GraydriftError>;

#[derive(thiserror::Error, Debug)]
pub enum GraydriftError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("insufficient frames: got {got}, a playlist needs at least 2")]
    InsufficientFrames { got: usize },

    #[error("frame decode error: {0}")]
    FrameDecode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraydriftError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn frame_decode(msg: impl Into<String>) -> Self {
        Self::FrameDecode(msg.into())
    }
}
