//! songbox-bot library - Telegram front end for the song catalog
//!
//! [`dispatch`] turns incoming events into catalog calls and reply texts
//! without touching the network; [`telegram`] binds it to the Bot API.

use std::sync::Arc;

use songbox_common::{AdminId, Catalog};
use tokio::sync::Mutex;

pub mod dispatch;
pub mod error;
pub mod logging;
pub mod replies;
pub mod telegram;

pub use error::{Error, Result};

/// Application state shared across update handlers
///
/// Telegram updates from different chats are handled concurrently; the
/// catalog mutex makes each catalog operation run alone.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Mutex<Catalog>>,
    admin: AdminId,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let admin = catalog.admin();
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            admin,
        }
    }

    /// The user who receives new-song notices and may delete songs
    pub fn admin(&self) -> AdminId {
        self.admin
    }
}
