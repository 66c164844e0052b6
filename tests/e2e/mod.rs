// End-to-end tests for the Dubbing Backend API
//
// Each test starts the full router on an ephemeral port with fake
// translation providers, a fake speech engine and an in-memory document
// store, plus a temporary output directory for audio files. Tests that talk
// to a real Postgres run against a testcontainers instance and are ignored
// unless Docker is available.

mod test_document_store;
mod test_tts;
