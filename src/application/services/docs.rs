//! Google Docs: documents of a folder

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::application::services::common::{self, url_column};
use crate::application::services::{google_client, ServiceDefinition, TaskContext, TaskDescriptor};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{expand_env_vars, Collection, Feed, NewItem, OptionField, Requirements};

const SERVICE: &str = "docs";
const DEFAULT_FORMAT: &str = "txt";

pub(super) fn definition() -> ServiceDefinition {
    use OptionField::*;

    ServiceDefinition {
        name: SERVICE,
        section: SERVICE,
        needs_devkey: false,
        new_client: |flags, api| google_client(SERVICE, flags, api),
        tasks: vec![
            TaskDescriptor {
                name: "upload",
                description: "Upload documents",
                usage: "docs upload [--folder FOLDER] [--title TITLE] [--no-convert] PATH...",
                requirements: Requirements::none(),
                login_required: true,
                handler: upload,
            },
            TaskDescriptor {
                name: "get",
                description: "Download documents",
                usage: "docs get --title TITLE [--folder FOLDER] [--format FORMAT] [DEST_DIR]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: get,
            },
            TaskDescriptor {
                name: "list",
                description: "List documents",
                usage: "docs list [--folder FOLDER] [--title TITLE] [--query QUERY] [--delimiter DELIM]",
                requirements: Requirements::none(),
                login_required: true,
                handler: list,
            },
            TaskDescriptor {
                name: "edit",
                description: "Edit a document",
                usage: "docs edit --title TITLE [--format FORMAT] [--editor EDITOR]",
                requirements: Requirements::none().field(Title),
                login_required: true,
                handler: edit,
            },
            TaskDescriptor {
                name: "delete",
                description: "Delete documents",
                usage: "docs delete --title TITLE [TITLE...]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: delete,
            },
        ],
    }
}

fn documents(ctx: &TaskContext<'_>) -> Feed {
    Feed::new(Collection::Documents {
        folder: ctx.options.folder.clone(),
    })
}

fn doc_format(ctx: &TaskContext<'_>) -> String {
    ctx.options
        .format
        .clone()
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string())
}

fn upload(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let template = NewItem {
        title: ctx.options.title.clone(),
        parent: ctx.options.folder.clone(),
        convert: ctx.options.convert,
        ..Default::default()
    };
    let feed = documents(ctx);
    common::upload(ctx, &feed, &template)
}

fn get(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let dest = ctx
        .args
        .first()
        .map(|d| PathBuf::from(expand_env_vars(d)))
        .unwrap_or_else(|| PathBuf::from("."));
    let extension = doc_format(ctx);
    let feed = documents(ctx);
    let feed = common::queried(ctx, feed);
    let matcher = ctx.title_matcher()?;
    let entries = common::select(ctx, &feed, &matcher)?;
    if entries.is_empty() {
        return ctx.say("No document matched");
    }

    ctx.fs
        .create_dir_all(&dest)
        .with_path_context("create destination", &dest)?;
    for entry in entries {
        let target = dest.join(format!("{}.{}", entry.title.replace(['/', '\\'], "_"), extension));
        ctx.client.download(&entry, &target)?;
        ctx.say(&format!("Downloaded {}", target.display()))?;
    }
    Ok(())
}

fn list(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = documents(ctx);
    common::list(ctx, feed, url_column)
}

/// Download to a temporary file, open the editor, upload only when the
/// content changed.
fn edit(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = documents(ctx);
    let matcher = ctx.title_matcher()?;
    let Some(entry) = common::select(ctx, &feed, &matcher)?.into_iter().next() else {
        let title = ctx.options.title.clone().unwrap_or_default();
        return ctx.say(&format!("No document found matching \"{}\"", title));
    };

    let temp = tempfile::Builder::new()
        .prefix("googlecl-")
        .suffix(&format!(".{}", doc_format(ctx)))
        .tempfile()
        .with_path_context("create temporary file in", &std::env::temp_dir())?;
    let path = temp.path().to_path_buf();

    ctx.client.download(&entry, &path)?;
    let before = digest(ctx, &path)?;

    ctx.editor
        .open(ctx.options.editor.as_deref(), &path)
        .with_path_context("edit", &path)?;

    let after = digest(ctx, &path)?;
    if before == after {
        debug!("{} unchanged ({})", entry.title, after);
        return ctx.say(&format!("No changes made to \"{}\"", entry.title));
    }
    let updated = ctx.client.replace_media(&entry, &path)?;
    ctx.say(&format!("Updated \"{}\"", updated.title))
}

fn digest(ctx: &TaskContext<'_>, path: &Path) -> ApplicationResult<String> {
    let bytes = ctx.fs.read(path).with_path_context("read document", path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn delete(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = documents(ctx);
    common::delete(ctx, feed)
}
