//! Song catalog
//!
//! The ordered list of accepted titles plus the set of their normalized keys.
//! The two are kept in 1:1 correspondence: every entry's key is in the set and
//! no two entries share a key. Keys are never persisted; they are rebuilt from
//! the titles on load.
//!
//! Every mutation writes the new list to the [`SongStore`] before touching
//! memory. A failed write returns an error and leaves the catalog as it was.

use crate::identity::{AdminId, Identity};
use crate::normalize::normalize_title;
use crate::store::SongStore;
use crate::Result;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Result of a song suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Title stored; `submitter` is echoed back for the administrator notice
    Accepted { title: String, submitter: Identity },
    /// A title with the same normalized key is already in the catalog
    Duplicate,
    /// Title fails a formatting rule; nothing stored
    Rejected(RejectReason),
}

/// Why a suggestion was refused before duplicate checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing left after trimming
    Empty,
    /// Contains `-`, which the one-line listing format reserves
    Hyphen,
    /// Spans several lines; the song file holds one title per line
    LineBreak,
}

/// Result of an administrator delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(String),
    NotAuthorized,
    NotANumber,
    OutOfRange,
}

/// In-memory song list backed by a flat file
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<String>,
    keys: HashSet<String>,
    store: SongStore,
    admin: AdminId,
}

impl Catalog {
    /// Load the catalog from `store`
    ///
    /// A missing file gives an empty catalog. A line whose key collides with
    /// an earlier line is skipped with a warning.
    pub fn load(store: SongStore, admin: AdminId) -> Result<Self> {
        let mut catalog = Self {
            entries: Vec::new(),
            keys: HashSet::new(),
            store,
            admin,
        };

        for title in catalog.store.load()? {
            let key = normalize_title(&title);
            if catalog.keys.insert(key) {
                catalog.entries.push(title);
            } else {
                warn!("Skipping duplicate line in song list: {}", title);
            }
        }

        info!(
            "Loaded {} songs from {}",
            catalog.entries.len(),
            catalog.store.path().display()
        );
        Ok(catalog)
    }

    /// Suggest a song
    ///
    /// The title is trimmed, checked against the formatting rules, then
    /// against existing keys. Only `Accepted` writes to storage.
    pub fn submit(&mut self, raw_title: &str, submitter: &Identity) -> Result<SubmitOutcome> {
        let title = raw_title.trim();

        if title.is_empty() {
            return Ok(SubmitOutcome::Rejected(RejectReason::Empty));
        }
        if title.contains('-') {
            debug!("Rejected hyphenated title from {}: {}", submitter.user_id, title);
            return Ok(SubmitOutcome::Rejected(RejectReason::Hyphen));
        }
        if title.contains(['\n', '\r']) {
            debug!("Rejected multi-line title from {}", submitter.user_id);
            return Ok(SubmitOutcome::Rejected(RejectReason::LineBreak));
        }

        let key = normalize_title(title);
        if self.keys.contains(&key) {
            debug!("Duplicate suggestion from {}: {}", submitter.user_id, title);
            return Ok(SubmitOutcome::Duplicate);
        }

        self.store.save(
            self.entries
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(title)),
        )?;

        self.entries.push(title.to_string());
        self.keys.insert(key);
        info!("Accepted song from {}: {}", submitter.display_name(), title);

        Ok(SubmitOutcome::Accepted {
            title: title.to_string(),
            submitter: submitter.clone(),
        })
    }

    /// 1-based view of the titles in insertion order
    pub fn list(&self) -> Vec<(usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, title)| (i + 1, title.as_str()))
            .collect()
    }

    /// Whether a title with the same normalized key is present
    pub fn contains(&self, title: &str) -> bool {
        self.keys.contains(&normalize_title(title))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn admin(&self) -> AdminId {
        self.admin
    }

    /// Delete the entry at a 1-based index given as text
    ///
    /// Later entries shift down by one, so indices are not stable across
    /// removals.
    pub fn remove(&mut self, index_arg: &str, requester: &Identity) -> Result<RemoveOutcome> {
        if !self.admin.is(requester) {
            warn!("User {} attempted to delete a song", requester.user_id);
            return Ok(RemoveOutcome::NotAuthorized);
        }

        let index_arg = index_arg.trim();
        let number: i64 = match index_arg.parse() {
            Ok(number) => number,
            // Too large for i64 is still a number, just not a valid position
            Err(_) if is_integer(index_arg) => return Ok(RemoveOutcome::OutOfRange),
            Err(_) => return Ok(RemoveOutcome::NotANumber),
        };

        let index = match usize::try_from(number).ok().and_then(|n| n.checked_sub(1)) {
            Some(index) if index < self.entries.len() => index,
            _ => return Ok(RemoveOutcome::OutOfRange),
        };

        self.store.save(
            self.entries
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, title)| title.as_str()),
        )?;

        let title = self.entries.remove(index);
        self.keys.remove(&normalize_title(&title));
        info!("Removed song #{}: {}", number, title);

        Ok(RemoveOutcome::Removed(title))
    }
}

/// Optional sign followed by one or more ASCII digits
fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ADMIN: AdminId = AdminId(1);

    fn admin() -> Identity {
        Identity::new(1, Some("admin".to_string()), "Admin")
    }

    fn user() -> Identity {
        Identity::new(2, None, "Paul")
    }

    fn empty_catalog(temp_dir: &TempDir) -> Catalog {
        Catalog::load(SongStore::new(temp_dir.path().join("songs.txt")), ADMIN).unwrap()
    }

    fn titles(catalog: &Catalog) -> Vec<String> {
        catalog.list().into_iter().map(|(_, t)| t.to_string()).collect()
    }

    #[test]
    fn test_submit_twice_is_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);

        let first = catalog.submit("Hey Jude", &user()).unwrap();
        assert!(matches!(first, SubmitOutcome::Accepted { .. }));

        let second = catalog.submit("jude, HEY!", &user()).unwrap();
        assert_eq!(second, SubmitOutcome::Duplicate);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_submit_trims_and_keeps_original_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);

        let outcome = catalog.submit("   Don't Stop Me Now!  ", &user()).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                title: "Don't Stop Me Now!".to_string(),
                submitter: user(),
            }
        );
        assert_eq!(titles(&catalog), vec!["Don't Stop Me Now!"]);
    }

    #[test]
    fn test_hyphen_is_rejected_without_state_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);

        let outcome = catalog.submit("Don't - Stop", &user()).unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::Hyphen));
        assert!(catalog.is_empty());
        assert!(!temp_dir.path().join("songs.txt").exists());
    }

    #[test]
    fn test_blank_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);

        let outcome = catalog.submit("  \t ", &user()).unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::Empty));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_punctuation_only_titles_share_empty_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);

        assert!(matches!(
            catalog.submit("???", &user()).unwrap(),
            SubmitOutcome::Accepted { .. }
        ));
        assert_eq!(catalog.submit("!!!", &user()).unwrap(), SubmitOutcome::Duplicate);
    }

    #[test]
    fn test_list_is_one_based() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);
        assert!(catalog.list().is_empty());

        catalog.submit("Let It Be", &user()).unwrap();
        catalog.submit("Imagine", &user()).unwrap();

        assert_eq!(catalog.list(), vec![(1, "Let It Be"), (2, "Imagine")]);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);
        for title in ["Yesterday", "Help!", "Something"] {
            catalog.submit(title, &user()).unwrap();
        }

        let outcome = catalog.remove("2", &admin()).unwrap();
        assert_eq!(outcome, RemoveOutcome::Removed("Help!".to_string()));

        assert_eq!(catalog.list(), vec![(1, "Yesterday"), (2, "Something")]);
        assert!(!catalog.contains("help"));

        // The key is free again
        assert!(matches!(
            catalog.submit("HELP", &user()).unwrap(),
            SubmitOutcome::Accepted { .. }
        ));
    }

    #[test]
    fn test_remove_requires_admin() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);
        catalog.submit("Imagine", &user()).unwrap();

        assert_eq!(catalog.remove("1", &user()).unwrap(), RemoveOutcome::NotAuthorized);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_remove_rejects_bad_indices() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);
        catalog.submit("Imagine", &user()).unwrap();

        assert_eq!(catalog.remove("one", &admin()).unwrap(), RemoveOutcome::NotANumber);
        assert_eq!(catalog.remove("1.5", &admin()).unwrap(), RemoveOutcome::NotANumber);
        assert_eq!(catalog.remove("0", &admin()).unwrap(), RemoveOutcome::OutOfRange);
        assert_eq!(catalog.remove("-3", &admin()).unwrap(), RemoveOutcome::OutOfRange);
        assert_eq!(catalog.remove("2", &admin()).unwrap(), RemoveOutcome::OutOfRange);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_remove_huge_number_is_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);
        catalog.submit("Imagine", &user()).unwrap();

        assert_eq!(
            catalog.remove("99999999999999999999", &admin()).unwrap(),
            RemoveOutcome::OutOfRange
        );
        assert_eq!(
            catalog.remove("-99999999999999999999", &admin()).unwrap(),
            RemoveOutcome::OutOfRange
        );
        assert_eq!(catalog.remove("+", &admin()).unwrap(), RemoveOutcome::NotANumber);
        assert_eq!(catalog.remove("12ab", &admin()).unwrap(), RemoveOutcome::NotANumber);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_multi_line_title_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = empty_catalog(&temp_dir);

        for title in ["Yesterday\nImagine", "Yesterday\r\nImagine", "Yesterday\rImagine"] {
            assert_eq!(
                catalog.submit(title, &user()).unwrap(),
                SubmitOutcome::Rejected(RejectReason::LineBreak)
            );
        }
        assert!(catalog.is_empty());
        assert!(!temp_dir.path().join("songs.txt").exists());
    }

    #[test]
    fn test_load_skips_colliding_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("songs.txt");
        fs::write(&path, "Let It Be\nlet it be!\nImagine\n").unwrap();

        let catalog = Catalog::load(SongStore::new(&path), ADMIN).unwrap();
        assert_eq!(titles(&catalog), vec!["Let It Be", "Imagine"]);
    }

    #[test]
    fn test_failed_write_leaves_catalog_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the song file should be makes every save fail
        let store = SongStore::new(temp_dir.path());
        let mut catalog = Catalog {
            entries: vec!["Imagine".to_string()],
            keys: HashSet::from([normalize_title("Imagine")]),
            store,
            admin: ADMIN,
        };

        assert!(catalog.submit("Let It Be", &user()).is_err());
        assert_eq!(titles(&catalog), vec!["Imagine"]);
        assert!(!catalog.contains("Let It Be"));

        assert!(catalog.remove("1", &admin()).is_err());
        assert_eq!(titles(&catalog), vec!["Imagine"]);
        assert!(catalog.contains("imagine"));
    }
}
