pub mod health;
pub mod speech_synthesis;
