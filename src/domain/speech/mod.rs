pub mod dto;
pub mod error;
pub mod service;

pub use dto::{SpeechSynthesisRequest, SpeechSynthesisResponse};
pub use error::SpeechServiceError;
pub use service::{SpeechSynthesisService, SpeechSynthesisServiceApi};
