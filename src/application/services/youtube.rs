//! YouTube: videos of a user

use crate::application::services::common::{self, url_column};
use crate::application::services::{google_client, ServiceDefinition, TaskContext, TaskDescriptor};
use crate::application::ApplicationResult;
use crate::domain::{split_list, Collection, Feed, NewItem, OptionField, Requirements, TagEdit};

const SERVICE: &str = "youtube";

pub(super) fn definition() -> ServiceDefinition {
    use OptionField::*;

    ServiceDefinition {
        name: SERVICE,
        section: SERVICE,
        needs_devkey: true,
        new_client: |flags, api| google_client(SERVICE, flags, api),
        tasks: vec![
            TaskDescriptor {
                name: "post",
                description: "Post videos",
                usage: "youtube post --category CATEGORY [--title TITLE] [--summary TEXT] [--tags TAGS] [--devtags TAGS] PATH...",
                requirements: Requirements::none().field(Category),
                login_required: true,
                handler: post,
            },
            TaskDescriptor {
                name: "list",
                description: "List videos",
                usage: "youtube list [--user USER] [--title TITLE] [--query QUERY] [--delimiter DELIM]",
                requirements: Requirements::none().field(User),
                login_required: false,
                handler: list,
            },
            TaskDescriptor {
                name: "delete",
                description: "Delete videos",
                usage: "youtube delete --title TITLE [TITLE...]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: delete,
            },
            TaskDescriptor {
                name: "tag",
                description: "Tag videos",
                usage: "youtube tag --title TITLE --tags TAGS",
                requirements: Requirements::none().one_of(&[Title, Query]).field(Tags),
                login_required: true,
                handler: tag,
            },
        ],
    }
}

fn post(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let template = NewItem {
        title: ctx.options.title.clone(),
        summary: ctx.options.summary.clone(),
        tags: TagEdit::parse(ctx.options.tags.as_deref().unwrap_or_default()).initial_tags(),
        category: ctx.options.category.clone(),
        devtags: split_list(ctx.options.devtags.as_deref()),
        ..Default::default()
    };
    common::upload(ctx, &Feed::new(Collection::Videos), &template)
}

fn list(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = Feed::new(Collection::Videos).owned_by(ctx.options.user.clone());
    common::list(ctx, feed, url_column)
}

fn delete(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    common::delete(ctx, Feed::new(Collection::Videos))
}

fn tag(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    common::tag(ctx, Feed::new(Collection::Videos))
}
