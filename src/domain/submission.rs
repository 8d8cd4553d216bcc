use std::fmt;
use std::fmt::Write;

/// One form submission, rebuilt from scratch for every request.
///
/// `captions` stays empty until the composition stage reads them, after
/// which it always holds exactly `photo_count` entries.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub passphrase: String,
    /// Free-text label, never parsed as a calendar date.
    pub date: String,
    pub photo_count: usize,
    pub captions: Vec<String>,
}

impl Submission {
    /// Renders the message body: the date line, the title line, then one
    /// `photo<i>: <caption>` line per caption in index order.
    pub fn body(&self) -> String {
        let mut body = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(body, "Date: {}", self.date);
        let _ = writeln!(body, "Title: {}", self.title);
        for (index, caption) in self.captions.iter().enumerate() {
            let _ = writeln!(body, "photo{index}: {caption}");
        }
        body
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("title", &self.title)
            .field("passphrase", &"<redacted>")
            .field("date", &self.date)
            .field("photo_count", &self.photo_count)
            .field("captions", &self.captions)
            .finish()
    }
}
