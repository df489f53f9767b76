//! Options record: the named parameters of one command invocation
//!
//! The schema is closed: every option a task may require is an `OptionField`.
//! `OptionField::ALL` is sorted by name so that prompt order is reproducible.

use std::fmt;

use crate::domain::DomainError;

/// One field of the options schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionField {
    Blog,
    Cal,
    Category,
    Convert,
    Date,
    Delimiter,
    Devtags,
    Editor,
    Folder,
    Format,
    Password,
    Query,
    Summary,
    Tags,
    Title,
    User,
}

impl OptionField {
    /// All fields, in lexicographic order of their names.
    pub const ALL: [OptionField; 16] = [
        OptionField::Blog,
        OptionField::Cal,
        OptionField::Category,
        OptionField::Convert,
        OptionField::Date,
        OptionField::Delimiter,
        OptionField::Devtags,
        OptionField::Editor,
        OptionField::Folder,
        OptionField::Format,
        OptionField::Password,
        OptionField::Query,
        OptionField::Summary,
        OptionField::Tags,
        OptionField::Title,
        OptionField::User,
    ];

    /// Name used for config keys and prompts.
    pub fn name(self) -> &'static str {
        match self {
            OptionField::Blog => "blog",
            OptionField::Cal => "cal",
            OptionField::Category => "category",
            OptionField::Convert => "convert",
            OptionField::Date => "date",
            OptionField::Delimiter => "delimiter",
            OptionField::Devtags => "devtags",
            OptionField::Editor => "editor",
            OptionField::Folder => "folder",
            OptionField::Format => "format",
            OptionField::Password => "password",
            OptionField::Query => "query",
            OptionField::Summary => "summary",
            OptionField::Tags => "tags",
            OptionField::Title => "title",
            OptionField::User => "user",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Interactive prompt shown when the field is required but missing.
    pub fn prompt(self) -> String {
        format!("Please specify {}: ", self.name())
    }
}

impl fmt::Display for OptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved set of named parameters for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub blog: Option<String>,
    pub cal: Option<String>,
    pub category: Option<String>,
    /// Convert uploaded documents to the native format (`--no-convert` clears it)
    pub convert: bool,
    pub date: Option<String>,
    pub delimiter: Option<String>,
    pub devtags: Option<String>,
    pub editor: Option<String>,
    pub folder: Option<String>,
    pub format: Option<String>,
    pub password: Option<String>,
    pub query: Option<String>,
    /// Literal text, or a path to a file holding the text
    pub summary: Option<String>,
    pub tags: Option<String>,
    pub title: Option<String>,
    pub user: Option<String>,
    /// Derived from `query` by the resolver; never read from the command line
    pub encoded_query: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            blog: None,
            cal: None,
            category: None,
            convert: true,
            date: None,
            delimiter: None,
            devtags: None,
            editor: None,
            folder: None,
            format: None,
            password: None,
            query: None,
            summary: None,
            tags: None,
            title: None,
            user: None,
            encoded_query: None,
        }
    }
}

impl Options {
    fn text_slot(&mut self, field: OptionField) -> Option<&mut Option<String>> {
        let slot = match field {
            OptionField::Blog => &mut self.blog,
            OptionField::Cal => &mut self.cal,
            OptionField::Category => &mut self.category,
            OptionField::Convert => return None,
            OptionField::Date => &mut self.date,
            OptionField::Delimiter => &mut self.delimiter,
            OptionField::Devtags => &mut self.devtags,
            OptionField::Editor => &mut self.editor,
            OptionField::Folder => &mut self.folder,
            OptionField::Format => &mut self.format,
            OptionField::Password => &mut self.password,
            OptionField::Query => &mut self.query,
            OptionField::Summary => &mut self.summary,
            OptionField::Tags => &mut self.tags,
            OptionField::Title => &mut self.title,
            OptionField::User => &mut self.user,
        };
        Some(slot)
    }

    /// Current value of a field rendered as text (`None` when unset).
    pub fn get(&self, field: OptionField) -> Option<String> {
        let value = match field {
            OptionField::Blog => &self.blog,
            OptionField::Cal => &self.cal,
            OptionField::Category => &self.category,
            OptionField::Convert => return Some(self.convert.to_string()),
            OptionField::Date => &self.date,
            OptionField::Delimiter => &self.delimiter,
            OptionField::Devtags => &self.devtags,
            OptionField::Editor => &self.editor,
            OptionField::Folder => &self.folder,
            OptionField::Format => &self.format,
            OptionField::Password => &self.password,
            OptionField::Query => &self.query,
            OptionField::Summary => &self.summary,
            OptionField::Tags => &self.tags,
            OptionField::Title => &self.title,
            OptionField::User => &self.user,
        };
        value.clone()
    }

    /// Set a field from text. Boolean fields accept true/false, yes/no, on/off, 1/0.
    pub fn set(&mut self, field: OptionField, value: impl Into<String>) -> Result<(), DomainError> {
        let value = value.into();
        match self.text_slot(field) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => {
                self.convert = parse_flag(field, &value)?;
                Ok(())
            }
        }
    }

    /// A field is missing when it is unset, empty, or false.
    pub fn is_missing(&self, field: OptionField) -> bool {
        match field {
            OptionField::Convert => !self.convert,
            _ => self.get(field).map(|v| v.is_empty()).unwrap_or(true),
        }
    }

    /// True when the field holds a non-empty value.
    pub fn has(&self, field: OptionField) -> bool {
        !self.is_missing(field)
    }

    /// Fields that are currently missing, in lexicographic order.
    pub fn missing_fields(&self) -> Vec<OptionField> {
        OptionField::ALL
            .into_iter()
            .filter(|f| self.is_missing(*f))
            .collect()
    }
}

fn parse_flag(field: OptionField, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DomainError::InvalidFlag {
            field: field.name().to_string(),
            value: value.to_string(),
        }),
    }
}
