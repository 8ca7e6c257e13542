//! User-facing reply texts

pub const GREETING: &str = "Hi! Send me a song title and I'll check whether it has already been \
suggested. Or tap the button to see the songs suggested so far.";

pub const SHOW_SONGS_BUTTON: &str = "📃 Show all songs";

pub const ACCEPTED: &str = "Thanks! Song accepted.";
pub const DUPLICATE: &str = "This song has already been suggested. Try another one.";
pub const NO_HYPHENS: &str = "Please don't use hyphens (-) in the song title.";
pub const ONE_LINE: &str = "Please send the song title on a single line.";

pub const LIST_HEADER: &str = "🎶 Songs suggested so far:";
pub const EMPTY_LIST: &str = "No songs have been suggested yet.";

pub const ADMIN_ONLY: &str = "Only the administrator can delete songs.";
pub const MISSING_NUMBER: &str = "Please specify the number of the song to delete.";
pub const NOT_FOUND: &str = "There is no song with that number.";
pub const DELETE_USAGE: &str = "Specify the song number (for example: /delete 3)";

pub const STORAGE_FAILURE: &str = "Sorry, the song list could not be saved. Please try again later.";

pub fn removed(title: &str) -> String {
    format!("Song '{}' deleted.", title)
}

pub fn new_song_notice(sender_display: &str, title: &str) -> String {
    format!("New song from {}: {}", sender_display, title)
}

/// Numbered listing, one song per line
pub fn song_list<'a, I>(songs: I) -> String
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let lines: Vec<String> = songs
        .into_iter()
        .map(|(number, title)| format!("{}. {}", number, title))
        .collect();

    if lines.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        format!("{}\n\n{}", LIST_HEADER, lines.join("\n"))
    }
}
