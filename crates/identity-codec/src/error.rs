//! Codec errors.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("marker contains unsupported character U+{0:04X}")]
    UnsupportedCharacter(u32),

    #[error("digit run of length {0} cannot represent a single decimal digit")]
    DigitRunTooLong(usize),

    #[error("marker is empty")]
    Empty,

    #[error("decoded id does not fit in 64 bits")]
    Overflow,

    #[error("text carries no identity marker")]
    MissingMarker,
}
