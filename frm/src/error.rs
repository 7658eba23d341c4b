#[derive(Debug, thiserror::Error)]
pub enum FrmError {
    #[error("Truncated header. Expect ({need}) bytes. Have ({have})")]
    TruncatedHeader { need: usize, have: usize },
    #[error("Short pixel payload. Expect ({need}) bytes. Have ({have})")]
    ShortPixelPayload { need: usize, have: usize },
    #[error("Frame has zero width or height")]
    ZeroDimension,
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
