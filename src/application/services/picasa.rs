//! Picasa Web Albums: albums and photos

use std::path::PathBuf;

use crate::application::services::common::{self, url_column};
use crate::application::services::{google_client, ServiceDefinition, TaskContext, TaskDescriptor};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    expand_env_vars, split_list, Collection, Entry, Feed, NewItem, OptionField, Requirements,
    TagEdit,
};

const SERVICE: &str = "picasa";

pub(super) fn definition() -> ServiceDefinition {
    use OptionField::*;

    ServiceDefinition {
        name: SERVICE,
        section: SERVICE,
        needs_devkey: false,
        new_client: |flags, api| google_client(SERVICE, flags, api),
        tasks: vec![
            TaskDescriptor {
                name: "create",
                description: "Create an album",
                usage: "picasa create --title TITLE [--summary TEXT] [--date DATE] [--tags TAGS] [PATH...]",
                requirements: Requirements::none().field(Title),
                login_required: true,
                handler: create,
            },
            TaskDescriptor {
                name: "post",
                description: "Post photos to an album",
                usage: "picasa post --title ALBUM [--tags TAGS] PATH...",
                requirements: Requirements::none().field(Title),
                login_required: true,
                handler: post,
            },
            TaskDescriptor {
                name: "get",
                description: "Download albums",
                usage: "picasa get [--user USER] [--title ALBUM] [--query QUERY] [DEST_DIR]",
                requirements: Requirements::none().field(User),
                login_required: false,
                handler: get,
            },
            TaskDescriptor {
                name: "list",
                description: "List photos",
                usage: "picasa list [--user USER] [--title ALBUM] [--query QUERY] [--delimiter DELIM]",
                requirements: Requirements::none().field(User),
                login_required: false,
                handler: list,
            },
            TaskDescriptor {
                name: "list-albums",
                description: "List albums",
                usage: "picasa list-albums [--user USER] [--title ALBUM] [--delimiter DELIM]",
                requirements: Requirements::none().field(User),
                login_required: false,
                handler: list_albums,
            },
            TaskDescriptor {
                name: "delete",
                description: "Delete albums",
                usage: "picasa delete --title ALBUM [ALBUM...]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: delete,
            },
            TaskDescriptor {
                name: "tag",
                description: "Tag photos",
                usage: "picasa tag --title ALBUM [--query QUERY] --tags TAGS",
                requirements: Requirements::none().one_of(&[Title, Query]).field(Tags),
                login_required: true,
                handler: tag,
            },
        ],
    }
}

fn photos_of(album: &Entry, user: Option<String>) -> Feed {
    Feed::new(Collection::Photos {
        album: Some(album.id.clone()),
    })
    .owned_by(user)
}

fn photo_template(ctx: &TaskContext<'_>) -> NewItem {
    NewItem {
        summary: ctx.options.summary.clone(),
        tags: TagEdit::parse(ctx.options.tags.as_deref().unwrap_or_default()).initial_tags(),
        ..Default::default()
    }
}

fn create(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let album = NewItem {
        title: ctx.options.title.clone(),
        summary: ctx.options.summary.clone(),
        date: ctx.options.date.clone(),
        tags: split_list(ctx.options.tags.as_deref()),
        ..Default::default()
    };
    let created = ctx.client.publish(&Feed::new(Collection::Albums), &album)?;
    ctx.say(&format!("Created album \"{}\"", created.title))?;

    if !ctx.args.is_empty() {
        let template = photo_template(ctx);
        common::upload(ctx, &photos_of(&created, None), &template)?;
    }
    Ok(())
}

fn post(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let matcher = ctx.title_matcher()?;
    let albums = common::select(ctx, &Feed::new(Collection::Albums), &matcher)?;
    let Some(album) = albums.into_iter().next() else {
        let title = ctx.options.title.clone().unwrap_or_default();
        return ctx.say(&format!("No album found matching \"{}\"", title));
    };
    let template = photo_template(ctx);
    common::upload(ctx, &photos_of(&album, None), &template)
}

fn get(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let dest = ctx
        .args
        .first()
        .map(|d| PathBuf::from(expand_env_vars(d)))
        .unwrap_or_else(|| PathBuf::from("."));
    let user = ctx.options.user.clone();
    let matcher = ctx.title_matcher()?;
    let albums = common::select(ctx, &Feed::new(Collection::Albums).owned_by(user.clone()), &matcher)?;
    if albums.is_empty() {
        return ctx.say("No album matched");
    }

    for album in albums {
        let album_dir = dest.join(sanitize(&album.title));
        ctx.fs
            .create_dir_all(&album_dir)
            .with_path_context("create album directory", &album_dir)?;
        let feed = common::queried(ctx, photos_of(&album, user.clone()));
        for photo in ctx.client.fetch(&feed)? {
            let target = album_dir.join(sanitize(&photo.title));
            ctx.client.download(&photo, &target)?;
            ctx.say(&format!("Downloaded {}", target.display()))?;
        }
    }
    Ok(())
}

fn list(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let user = ctx.options.user.clone();
    let matcher = ctx.title_matcher()?;
    let albums = common::select(ctx, &Feed::new(Collection::Albums).owned_by(user.clone()), &matcher)?;
    for album in albums {
        let feed = common::queried(ctx, photos_of(&album, user.clone()));
        let photos = ctx.client.fetch(&feed)?;
        common::print_entries(ctx, &photos, url_column)?;
    }
    Ok(())
}

fn list_albums(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = Feed::new(Collection::Albums).owned_by(ctx.options.user.clone());
    common::list(ctx, feed, url_column)
}

fn delete(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    common::delete(ctx, Feed::new(Collection::Albums))
}

fn tag(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let matcher = ctx.titles_matcher()?;
    let albums = common::select(ctx, &Feed::new(Collection::Albums), &matcher)?;
    let mut photos = Vec::new();
    for album in &albums {
        let feed = common::queried(ctx, photos_of(album, None));
        photos.extend(ctx.client.fetch(&feed)?);
    }
    common::tag_entries(ctx, "photo", photos)
}

/// Titles become file names; keep them inside the destination directory.
fn sanitize(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    match name.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => name,
    }
}
