//! Blogger: posts of a blog

use std::path::Path;

use crate::application::services::common::{self, url_column};
use crate::application::services::{google_client, ServiceDefinition, TaskContext, TaskDescriptor};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    expand_env_vars, safe_decode, Collection, Feed, NewItem, OptionField, Requirements, TagEdit,
};

const SERVICE: &str = "blogger";

pub(super) fn definition() -> ServiceDefinition {
    use OptionField::*;

    ServiceDefinition {
        name: SERVICE,
        section: SERVICE,
        needs_devkey: false,
        new_client: |flags, api| google_client(SERVICE, flags, api),
        tasks: vec![
            TaskDescriptor {
                name: "post",
                description: "Post content",
                usage: "blogger post [--blog BLOG] [--title TITLE] [--tags TAGS] CONTENT_OR_PATH...",
                requirements: Requirements::none(),
                login_required: true,
                handler: post,
            },
            TaskDescriptor {
                name: "list",
                description: "List posts",
                usage: "blogger list [--user USER] [--blog BLOG] [--title TITLE] [--delimiter DELIM]",
                requirements: Requirements::none().field(User),
                login_required: false,
                handler: list,
            },
            TaskDescriptor {
                name: "delete",
                description: "Delete posts",
                usage: "blogger delete [--blog BLOG] --title TITLE [TITLE...]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: delete,
            },
            TaskDescriptor {
                name: "tag",
                description: "Label posts",
                usage: "blogger tag [--blog BLOG] --title TITLE --tags TAGS",
                requirements: Requirements::none().one_of(&[Title, Query]).field(Tags),
                login_required: true,
                handler: tag,
            },
        ],
    }
}

fn posts(ctx: &TaskContext<'_>) -> Feed {
    Feed::new(Collection::Posts {
        blog: ctx.options.blog.clone(),
    })
}

/// Each word is a file whose text is posted, or the post text itself.
fn post(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = posts(ctx);
    let tags = TagEdit::parse(ctx.options.tags.as_deref().unwrap_or_default()).initial_tags();
    let args = ctx.args;
    if args.is_empty() {
        return ctx.say("Nothing to post");
    }

    for word in args {
        let expanded = expand_env_vars(word);
        let path = Path::new(&expanded);
        let (body, file_title) = if ctx.fs.is_file(path) {
            let bytes = ctx.fs.read(path).with_path_context("read post", path)?;
            let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
            (safe_decode(bytes)?, stem)
        } else {
            (word.clone(), None)
        };
        let title = ctx
            .options
            .title
            .clone()
            .or(file_title)
            .unwrap_or_else(|| "New post".to_string());
        let item = NewItem {
            title: Some(title),
            summary: Some(body),
            tags: tags.clone(),
            parent: ctx.options.blog.clone(),
            ..Default::default()
        };
        let entry = ctx.client.publish(&feed, &item)?;
        let line = match &entry.url {
            Some(url) => format!("Posted \"{}\": {}", entry.title, url),
            None => format!("Posted \"{}\"", entry.title),
        };
        ctx.say(&line)?;
    }
    Ok(())
}

fn list(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = posts(ctx).owned_by(ctx.options.user.clone());
    common::list(ctx, feed, url_column)
}

fn delete(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = posts(ctx);
    common::delete(ctx, feed)
}

fn tag(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = posts(ctx);
    common::tag(ctx, feed)
}
