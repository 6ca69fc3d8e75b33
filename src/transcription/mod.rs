//! Pluggable recognition backends.

mod backend;
mod pocketsphinx_cli;
mod remote_api;
mod transcriber;

pub use backend::{Recognition, SpeechBackend};
pub use pocketsphinx_cli::PocketsphinxCliBackend;
pub use remote_api::{RemoteRecognizer, RemoteRecognizerConfig};
pub use transcriber::Transcriber;
