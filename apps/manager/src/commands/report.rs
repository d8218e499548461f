//! # Report Commands
//!
//! Print-preview for the shown menu item: fetch the record through the
//! store, render the fixed template into the reports directory and hand
//! back an open viewer.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ApiError;
use crate::state::FormState;
use cantina_db::MenuStore;
use cantina_report::{ReportGenerator, ReportViewer};

/// Renders the shown item's report and opens it for preview.
///
/// ## Returns
/// The open [`ReportViewer`] (pages, zoom, save-copy, print submission).
///
/// ## Failures
/// * No record shown in the form → validation message
/// * Record vanished from the store → NotFound
/// * Rendering failed → report error (an undecodable image is NOT a
///   failure; the generator degrades and renders without it)
pub async fn preview_item<S: MenuStore>(
    store: &S,
    form: &FormState,
    reports_dir: &Path,
) -> Result<ReportViewer, ApiError> {
    let Some(id) = form.with_session(|s| s.fields().id.clone()) else {
        return Err(ApiError::validation("No item selected to print"));
    };

    let item = store.read(&id).await?;

    std::fs::create_dir_all(reports_dir)
        .map_err(|e| ApiError::internal(format!("cannot create reports directory: {e}")))?;
    let output: PathBuf = reports_dir.join(format!("menu-item-{id}.pdf"));

    ReportGenerator::new().render_to_file(&item, &output)?;
    info!(path = %output.display(), "Report rendered for preview");

    Ok(ReportViewer::open(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::menu_item::{insert_item, refresh};
    use crate::state::FormState;
    use cantina_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_preview_renders_shown_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let form = FormState::new();
        refresh(&db, &form).await.unwrap();

        form.with_session_mut(|s| {
            let category_id = s.category_id_by_name("Desserts");
            let fields = s.fields_mut();
            fields.name = "Cheesecake".to_string();
            fields.description = "Baked New York style".to_string();
            fields.price_input = "4.50".to_string();
            fields.category_id = category_id;
        });
        insert_item(&db, &form).await.unwrap();

        let reports_dir =
            std::env::temp_dir().join(format!("cantina-reports-{}", uuid::Uuid::new_v4()));
        let viewer = preview_item(&db, &form, &reports_dir).await.unwrap();

        assert!(viewer.page_count() >= 1);
        assert!(viewer.path().exists());

        let _ = std::fs::remove_dir_all(&reports_dir);
    }

    #[tokio::test]
    async fn test_preview_without_selection_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let form = FormState::new();
        refresh(&db, &form).await.unwrap();

        let reports_dir = std::env::temp_dir();
        let err = preview_item(&db, &form, &reports_dir).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }
}
