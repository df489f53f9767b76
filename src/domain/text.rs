//! Terminal-safe text handling and title helpers

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::domain::DomainError;

/// Character set the terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEncoding {
    Utf8,
    Ascii,
}

impl TerminalEncoding {
    /// Detect from `LC_ALL`, `LC_CTYPE`, `LANG` (first non-empty wins).
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty());
        Self::from_locale(locale.as_deref())
    }

    pub fn from_locale(locale: Option<&str>) -> Self {
        let Some(locale) = locale else {
            return TerminalEncoding::Utf8;
        };
        let upper = locale.to_ascii_uppercase();
        if upper.contains("UTF-8") || upper.contains("UTF8") {
            TerminalEncoding::Utf8
        } else if upper == "C" || upper == "POSIX" || upper.contains("ASCII") || upper.contains("ANSI_X3.4")
        {
            TerminalEncoding::Ascii
        } else {
            TerminalEncoding::Utf8
        }
    }
}

impl fmt::Display for TerminalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalEncoding::Utf8 => f.write_str("utf-8"),
            TerminalEncoding::Ascii => f.write_str("ascii"),
        }
    }
}

/// What to do with characters the target encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeErrors {
    /// Fail with `DomainError::Encode`
    Strict,
    /// Replace with `\xNN`, `\uNNNN` or `\UNNNNNNNN` escapes
    #[default]
    BackslashReplace,
}

/// Make text printable on a terminal with the given encoding.
pub fn safe_encode(
    text: &str,
    encoding: TerminalEncoding,
    errors: EncodeErrors,
) -> Result<Cow<'_, str>, DomainError> {
    if encoding == TerminalEncoding::Utf8 || text.is_ascii() {
        return Ok(Cow::Borrowed(text));
    }
    match errors {
        EncodeErrors::Strict => Err(DomainError::Encode {
            encoding: encoding.to_string(),
            text: text.to_string(),
        }),
        EncodeErrors::BackslashReplace => {
            let mut out = String::with_capacity(text.len());
            for c in text.chars() {
                let code = c as u32;
                if c.is_ascii() {
                    out.push(c);
                } else if code <= 0xff {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code <= 0xffff {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
            Ok(Cow::Owned(out))
        }
    }
}

/// Decode bytes read from a file or the network as UTF-8.
pub fn safe_decode(bytes: Vec<u8>) -> Result<String, DomainError> {
    String::from_utf8(bytes).map_err(|e| DomainError::Decode {
        encoding: "utf-8".to_string(),
        detail: format!(
            "{} bytes (invalid sequence at byte {})",
            e.as_bytes().len(),
            e.utf8_error().valid_up_to()
        ),
    })
}

/// Titles a task should act on: leftover args are extra titles, with the
/// `--title` value first. Without args the single (possibly absent) title.
pub fn build_titles_list(title: Option<&str>, args: &[String]) -> Vec<Option<String>> {
    if args.is_empty() {
        return vec![title.map(String::from)];
    }
    let mut titles: Vec<Option<String>> = Vec::with_capacity(args.len() + 1);
    if let Some(t) = title {
        titles.push(Some(t.to_string()));
    }
    titles.extend(args.iter().cloned().map(Some));
    titles
}

/// Extension of a file name with at least two alphanumeric characters.
pub fn extension_of(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if ext.len() >= 2 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_string())
    } else {
        None
    }
}
