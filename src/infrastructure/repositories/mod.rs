pub mod elevenlabs_speech_repository;
pub mod speech_repository;
pub mod storage_repository;
pub mod supabase_storage_repository;

pub use elevenlabs_speech_repository::ElevenLabsSpeechRepository;
pub use speech_repository::{AudioStream, SpeechRepository, SpeechRepositoryError};
pub use storage_repository::{StorageRepository, StorageRepositoryError, StoredObject};
pub use supabase_storage_repository::SupabaseStorageRepository;
