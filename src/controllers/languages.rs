use axum::Json;
use std::collections::BTreeMap;

use crate::domain::shared::supported_languages as language_table;

/// GET /supported-languages - Map of language code to display name
pub async fn supported_languages() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(language_table())
}
