//! Event handling independent of the chat transport
//!
//! Each handler takes the decoded event, runs one catalog operation under the
//! catalog lock and returns the texts to send. Storage failures come back as
//! [`crate::Error::Common`] so the transport can log them and apologise.

use songbox_common::{Identity, RejectReason, RemoveOutcome, SubmitOutcome};
use tracing::debug;

use crate::{replies, AppState, Result};

/// Callback data carried by the "show songs" button
pub const SHOW_SONGS: &str = "show_songs";

/// What to send after a plain-text suggestion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionReply {
    /// Reply to the sender's chat
    pub reply: Option<String>,
    /// Notice for the administrator's private chat
    pub admin_notice: Option<String>,
}

impl AppState {
    /// Handle a plain-text message as a song suggestion
    pub async fn suggest(
        &self,
        text: &str,
        sender: &Identity,
    ) -> Result<SuggestionReply> {
        let outcome = self.catalog.lock().await.submit(text, sender)?;

        let reply = match outcome {
            SubmitOutcome::Accepted { title, submitter } => SuggestionReply {
                reply: Some(replies::ACCEPTED.to_string()),
                admin_notice: Some(replies::new_song_notice(&submitter.display_name(), &title)),
            },
            SubmitOutcome::Duplicate => SuggestionReply {
                reply: Some(replies::DUPLICATE.to_string()),
                admin_notice: None,
            },
            SubmitOutcome::Rejected(RejectReason::Hyphen) => SuggestionReply {
                reply: Some(replies::NO_HYPHENS.to_string()),
                admin_notice: None,
            },
            SubmitOutcome::Rejected(RejectReason::LineBreak) => SuggestionReply {
                reply: Some(replies::ONE_LINE.to_string()),
                admin_notice: None,
            },
            SubmitOutcome::Rejected(RejectReason::Empty) => {
                debug!("Ignoring blank message from {}", sender.user_id);
                SuggestionReply::default()
            }
        };
        Ok(reply)
    }

    /// Render the numbered song list
    pub async fn song_list(&self) -> String {
        let catalog = self.catalog.lock().await;
        replies::song_list(catalog.list())
    }

    /// Handle `/delete <number>`
    ///
    /// `arg` is the first argument after the command, `None` when absent.
    pub async fn delete(
        &self,
        arg: Option<&str>,
        requester: &Identity,
    ) -> Result<String> {
        if !self.admin.is(requester) {
            return Ok(replies::ADMIN_ONLY.to_string());
        }
        let Some(arg) = arg else {
            return Ok(replies::MISSING_NUMBER.to_string());
        };

        let outcome = self.catalog.lock().await.remove(arg, requester)?;

        let reply = match outcome {
            RemoveOutcome::Removed(title) => replies::removed(&title),
            RemoveOutcome::NotAuthorized => replies::ADMIN_ONLY.to_string(),
            RemoveOutcome::NotANumber => replies::DELETE_USAGE.to_string(),
            RemoveOutcome::OutOfRange => replies::NOT_FOUND.to_string(),
        };
        Ok(reply)
    }
}
