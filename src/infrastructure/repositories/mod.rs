pub mod command_tts_repository;
pub mod document_repository;
pub mod google_translate_repository;
pub mod libretranslate_repository;
pub mod mymemory_repository;
pub mod pg_document_repository;
pub mod translation_repository;
pub mod tts_repository;

pub use command_tts_repository::CommandTtsRepository;
pub use document_repository::{DocumentRepository, StoreError, StoreStatus};
pub use google_translate_repository::GoogleTranslateRepository;
pub use libretranslate_repository::LibreTranslateRepository;
pub use mymemory_repository::MyMemoryRepository;
pub use pg_document_repository::PgDocumentRepository;
pub use translation_repository::TranslationRepository;
pub use tts_repository::{TtsEngineError, TtsRepository};
