//! Create-or-update workflow for a single catalog record.

use shelfwise_client::{ClientError, MediaGateway, MediaItem};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Which submit path the editor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Editing a blank template; submit creates a new record.
    Create,
    /// Editing an existing record; submit replaces it.
    Edit,
}

/// What happened to a submit once its response came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response was adopted into editor state.
    Applied,
    /// A later submit started before this one resolved; the stale
    /// response was discarded and editor state is untouched by it.
    Superseded,
}

struct EditorState {
    mode: EditorMode,
    item: MediaItem,
    message: Option<String>,
    /// Monotonic ticket per submit; only the latest may apply its response.
    submit_seq: u64,
}

/// Editor for one catalog record.
///
/// Drives the create-or-update workflow against a [`MediaGateway`]
/// collaborator. Each instance owns its record and message state
/// exclusively; the gateway is the only shared collaborator.
///
/// # Example
///
/// ```ignore
/// let media = client.media().await?;
/// let editor = MediaEditor::initialize(media, "new").await?;
///
/// editor.update_item(|item| {
///     item.title = Some("Dune".into());
///     item.author = Some("Herbert".into());
/// }).await;
///
/// if editor.validate_required().await {
///     editor.submit().await;
/// }
/// println!("{:?}", editor.message().await);
/// ```
pub struct MediaEditor<G> {
    gateway: G,
    state: Mutex<EditorState>,
}

impl<G: MediaGateway> MediaEditor<G> {
    /// Build an editor for the given route id.
    ///
    /// The literal route `"new"` yields a blank template and makes no
    /// network call; any other id is fetched from the gateway exactly once
    /// and adopted verbatim as the editable record. Fetch failures
    /// propagate; there is no re-fetch path on an existing instance.
    pub async fn initialize(gateway: G, route_id: &str) -> Result<Self, ClientError> {
        let (mode, item) = if route_id == "new" {
            debug!("Starting editor with blank template");
            (EditorMode::Create, MediaItem::default())
        } else {
            debug!(mid = %route_id, "Starting editor for existing record");
            let item = gateway.get_info(route_id).await?;
            (EditorMode::Edit, item)
        };

        Ok(Self {
            gateway,
            state: Mutex::new(EditorState {
                mode,
                item,
                message: None,
                submit_seq: 0,
            }),
        })
    }

    /// Snapshot of the record being edited.
    pub async fn item(&self) -> MediaItem {
        self.state.lock().await.item.clone()
    }

    /// Apply form edits to the record.
    pub async fn update_item(&self, apply: impl FnOnce(&mut MediaItem)) {
        apply(&mut self.state.lock().await.item);
    }

    /// The last submit's outcome message, if any.
    pub async fn message(&self) -> Option<String> {
        self.state.lock().await.message.clone()
    }

    /// Current submit path.
    pub async fn mode(&self) -> EditorMode {
        self.state.lock().await.mode
    }

    /// Advisory required-field check; submit does not enforce it.
    pub async fn validate_required(&self) -> bool {
        required_fields_present(&self.state.lock().await.item)
    }

    /// Submit the record.
    ///
    /// In create mode the server-assigned `mid` and `image` are adopted on
    /// success and the editor switches to the edit path; in edit mode the
    /// record is replaced as-is. Failures never surface as errors here:
    /// the outcome message becomes the server's `error` string, or the
    /// generic `"Error."` when there is none.
    ///
    /// Each submit takes a monotonic ticket; if another submit starts
    /// before this one's response arrives, the stale response is discarded
    /// rather than clobbering newer state.
    pub async fn submit(&self) -> SubmitOutcome {
        let (seq, mode, item) = {
            let mut state = self.state.lock().await;
            state.submit_seq += 1;
            (state.submit_seq, state.mode, state.item.clone())
        };

        enum Response {
            Created(shelfwise_client::MediaCreated),
            Edited,
            Failed(ClientError),
        }

        let response = match mode {
            EditorMode::Create => match self.gateway.create_item(&item).await {
                Ok(created) => Response::Created(created),
                Err(err) => Response::Failed(err),
            },
            EditorMode::Edit => match self.gateway.edit_item(&item).await {
                Ok(()) => Response::Edited,
                Err(err) => Response::Failed(err),
            },
        };

        let mut state = self.state.lock().await;
        if state.submit_seq != seq {
            debug!(seq, latest = state.submit_seq, "Discarding superseded submit response");
            return SubmitOutcome::Superseded;
        }

        match response {
            Response::Created(created) => {
                state.item.mid = Some(created.mid);
                state.item.image = created.image;
                state.mode = EditorMode::Edit;
                state.message = Some("Successfully created.".to_string());
            }
            Response::Edited => {
                state.message = Some("Successfully edited.".to_string());
            }
            Response::Failed(err) => {
                warn!(error = %err, "Submit failed");
                state.message = Some(err.user_message());
            }
        }

        SubmitOutcome::Applied
    }
}

/// True iff every field required for submission is filled in.
///
/// Title, author, type, and ISBN must be present and non-empty; price and
/// length must be present and non-zero. The backend treats an unpriced or
/// zero-length record as incomplete, so zero counts as missing.
pub fn required_fields_present(item: &MediaItem) -> bool {
    fn filled(field: &Option<String>) -> bool {
        field.as_deref().is_some_and(|s| !s.is_empty())
    }

    filled(&item.title)
        && filled(&item.author)
        && filled(&item.media_type)
        && filled(&item.isbn)
        && item.price.is_some_and(|price| price != 0.0)
        && item.length.is_some_and(|length| length != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_item() -> MediaItem {
        MediaItem {
            title: Some("Dune".to_string()),
            author: Some("Herbert".to_string()),
            media_type: Some("book".to_string()),
            isbn: Some("123".to_string()),
            price: Some(9.0),
            length: Some(400),
            ..MediaItem::default()
        }
    }

    #[test]
    fn all_required_fields_present() {
        assert!(required_fields_present(&complete_item()));
    }

    #[test]
    fn missing_or_empty_text_fields_fail() {
        let strips: [fn(&mut MediaItem); 6] = [
            |i| i.title = None,
            |i| i.author = None,
            |i| i.media_type = None,
            |i| i.isbn = None,
            |i| i.title = Some(String::new()),
            |i| i.isbn = Some(String::new()),
        ];
        for strip in strips {
            let mut item = complete_item();
            strip(&mut item);
            assert!(!required_fields_present(&item));
        }
    }

    #[test]
    fn zero_price_or_length_counts_as_missing() {
        let mut item = complete_item();
        item.price = Some(0.0);
        assert!(!required_fields_present(&item));

        let mut item = complete_item();
        item.length = Some(0);
        assert!(!required_fields_present(&item));

        let mut item = complete_item();
        item.price = None;
        assert!(!required_fields_present(&item));

        let mut item = complete_item();
        item.length = None;
        assert!(!required_fields_present(&item));
    }

    #[test]
    fn optional_fields_do_not_gate_submission() {
        let item = complete_item();
        assert!(item.published.is_none());
        assert!(item.genre.is_none());
        assert!(item.available.is_none());
        assert!(required_fields_present(&item));
    }
}
