//! Shelfwise Admin Components
//!
//! Component logic for the Shelfwise administrative surface. Currently one
//! component: the catalog record editor, which drives the create-or-update
//! workflow against a [`shelfwise_client::MediaGateway`].
//!
//! The components hold no HTTP code of their own; everything network-shaped
//! goes through gateway traits so the workflow can be tested with doubles.

mod editor;

pub use editor::{required_fields_present, EditorMode, MediaEditor, SubmitOutcome};
