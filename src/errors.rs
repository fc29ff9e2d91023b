use std::num::ParseFloatError;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{}", _0)]
    Json(::serde_json::Error),
    #[fail(display = "{}", _0)]
    Bincode(::bincode::Error),
    #[fail(display = "Pose component '{}' is not a decimal number: {}", _0, _1)]
    MalformedPose(String, ParseFloatError),
    #[fail(display = "Pose has {} components, expected 16.", _0)]
    PoseLength(usize),
    #[fail(display = "MAGIC number not match.")]
    MagicMismatch,
    #[fail(display = "{} bytes left after the document.", _0)]
    TrailingBytes(usize),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<::serde_json::Error> for Error {
    fn from(err: ::serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<::bincode::Error> for Error {
    fn from(err: ::bincode::Error) -> Self {
        Error::Bincode(err)
    }
}
