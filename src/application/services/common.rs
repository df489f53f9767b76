//! Task logic shared by several services: listing, selection, deletion,
//! tagging and file uploads.

use std::path::PathBuf;

use itertools::Itertools;
use tracing::{debug, info};

use crate::application::services::TaskContext;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{expand_env_vars, extension_of, Entry, Feed, NewItem, TagEdit, TitleMatcher};

pub const DEFAULT_DELIMITER: &str = ",";

/// `--delimiter`, or a comma.
pub fn delimiter(ctx: &TaskContext<'_>) -> String {
    ctx.options
        .delimiter
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DELIMITER.to_string())
}

/// Fetch `feed` and keep the entries `matcher` accepts.
pub fn select(
    ctx: &TaskContext<'_>,
    feed: &Feed,
    matcher: &TitleMatcher,
) -> ApplicationResult<Vec<Entry>> {
    let entries = ctx.client.fetch(feed)?;
    let total = entries.len();
    let selected: Vec<Entry> = entries
        .into_iter()
        .filter(|e| matcher.matches(&e.title))
        .collect();
    debug!("selected {} of {} entries", selected.len(), total);
    Ok(selected)
}

/// The query-narrowed feed most tasks operate on.
pub fn queried(ctx: &TaskContext<'_>, feed: Feed) -> Feed {
    feed.matching(ctx.options.encoded_query.clone())
}

/// One output line per entry: the title followed by the non-empty
/// `columns`, joined with the delimiter.
pub fn print_entries(
    ctx: &mut TaskContext<'_>,
    entries: &[Entry],
    columns: fn(&Entry) -> Vec<Option<String>>,
) -> ApplicationResult<()> {
    let delimiter = delimiter(ctx);
    for entry in entries {
        let line = std::iter::once(entry.title.clone())
            .chain(columns(entry).into_iter().flatten())
            .join(&delimiter);
        ctx.say(&line)?;
    }
    Ok(())
}

pub fn url_column(entry: &Entry) -> Vec<Option<String>> {
    vec![entry.url.clone()]
}

/// Fetch, filter by `--title` and extra words, print.
pub fn list(
    ctx: &mut TaskContext<'_>,
    feed: Feed,
    columns: fn(&Entry) -> Vec<Option<String>>,
) -> ApplicationResult<()> {
    let feed = queried(ctx, feed);
    let matcher = ctx.titles_matcher()?;
    let entries = select(ctx, &feed, &matcher)?;
    print_entries(ctx, &entries, columns)
}

/// Delete every entry of `feed` matching the titles, asking first when
/// `delete_prompt` is on.
pub fn delete(ctx: &mut TaskContext<'_>, feed: Feed) -> ApplicationResult<()> {
    let feed = queried(ctx, feed);
    let kind = feed.collection.item_kind();
    let matcher = ctx.titles_matcher()?;
    let entries = select(ctx, &feed, &matcher)?;
    if entries.is_empty() {
        return ctx.say(&format!("No {kind} matched"));
    }

    let prompt_first = ctx.flags().delete_prompt;
    for entry in &entries {
        if prompt_first {
            let question = format!(
                "Are you SURE you want to delete {} \"{}\"? (y/N): ",
                kind, entry.title
            );
            if !ctx.prompter.confirm(&question).with_prompt_context("delete confirmation")? {
                debug!("keeping {} {}", kind, entry.title);
                continue;
            }
        }
        ctx.client.delete(entry)?;
        info!("deleted {} \"{}\"", kind, entry.title);
    }
    Ok(())
}

/// Apply the `--tags` edit to every matching entry of `feed`.
pub fn tag(ctx: &mut TaskContext<'_>, feed: Feed) -> ApplicationResult<()> {
    let feed = queried(ctx, feed);
    let matcher = ctx.titles_matcher()?;
    let entries = select(ctx, &feed, &matcher)?;
    tag_entries(ctx, feed.collection.item_kind(), entries)
}

pub fn tag_entries(
    ctx: &mut TaskContext<'_>,
    kind: &str,
    entries: Vec<Entry>,
) -> ApplicationResult<()> {
    let edit = TagEdit::parse(ctx.options.tags.as_deref().unwrap_or_default());
    if entries.is_empty() {
        return ctx.say(&format!("No {kind} matched"));
    }

    let prompt_first = ctx.flags().tags_prompt;
    for mut entry in entries {
        let tags = edit.apply(&entry.tags);
        if tags == entry.tags {
            continue;
        }
        if prompt_first {
            let question = format!(
                "Change tags of {} \"{}\" to \"{}\"? (y/N): ",
                kind,
                entry.title,
                tags.join(", ")
            );
            if !ctx.prompter.confirm(&question).with_prompt_context("tag confirmation")? {
                continue;
            }
        }
        entry.tags = tags;
        ctx.client.update(&entry)?;
        info!("retagged {} \"{}\"", kind, entry.title);
    }
    Ok(())
}

/// Expanded paths of the extra words; words that are not files are reported
/// and skipped.
pub fn existing_files(ctx: &mut TaskContext<'_>) -> ApplicationResult<Vec<PathBuf>> {
    let args = ctx.args;
    let mut files = Vec::with_capacity(args.len());
    for word in args {
        let path = PathBuf::from(expand_env_vars(word));
        if ctx.fs.is_file(&path) {
            files.push(path);
        } else {
            let message = format!("{} is not a file, skipping", path.display());
            ctx.say(&message)?;
        }
    }
    Ok(files)
}

/// Upload each file as a new item built from `template` into `feed`.
///
/// With several files the file name is the title of each item; a single
/// file takes the template's title when one is set.
pub fn upload(ctx: &mut TaskContext<'_>, feed: &Feed, template: &NewItem) -> ApplicationResult<()> {
    let files = existing_files(ctx)?;
    let several = files.len() > 1;
    for path in files {
        let title = match (&template.title, several) {
            (Some(title), false) => Some(title.clone()),
            _ => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned()),
        };
        let item = NewItem {
            title,
            path: Some(path.clone()),
            format: extension_of(&path),
            ..template.clone()
        };
        let entry = ctx.client.publish(feed, &item)?;
        let message = format!("Uploaded {} as \"{}\"", path.display(), entry.title);
        ctx.say(&message)?;
    }
    Ok(())
}
