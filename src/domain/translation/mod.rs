pub mod service;

pub use service::{TranslationOutcome, TranslationService, TranslationServiceApi, MAX_NOTES};
