//! Contacts

use crate::application::services::common;
use crate::application::services::{google_client, ServiceDefinition, TaskContext, TaskDescriptor};
use crate::application::ApplicationResult;
use crate::domain::{Collection, Entry, Feed, NewItem, OptionField, Requirements};

const SERVICE: &str = "contacts";

pub(super) fn definition() -> ServiceDefinition {
    use OptionField::*;

    ServiceDefinition {
        name: SERVICE,
        section: SERVICE,
        needs_devkey: false,
        new_client: |flags, api| google_client(SERVICE, flags, api),
        tasks: vec![
            TaskDescriptor {
                name: "list",
                description: "List contacts",
                usage: "contacts list [--title NAME] [--query QUERY] [--delimiter DELIM]",
                requirements: Requirements::none(),
                login_required: true,
                handler: list,
            },
            TaskDescriptor {
                name: "add",
                description: "Add contacts",
                usage: "contacts add \"NAME,EMAIL\"...",
                requirements: Requirements::none(),
                login_required: true,
                handler: add,
            },
            TaskDescriptor {
                name: "delete",
                description: "Delete contacts",
                usage: "contacts delete --title NAME [NAME...]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: delete,
            },
        ],
    }
}

fn email_column(entry: &Entry) -> Vec<Option<String>> {
    vec![entry.summary.clone()]
}

fn list(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    common::list(ctx, Feed::new(Collection::Contacts), email_column)
}

/// `"Jane Doe,jane@example.com"` into name and email.
fn parse_contact(text: &str) -> Option<(String, String)> {
    let (name, email) = text.rsplit_once(',')?;
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || !email.contains('@') {
        return None;
    }
    Some((name.to_string(), email.to_string()))
}

fn add(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = Feed::new(Collection::Contacts);
    let args = ctx.args;
    for text in args {
        let Some((name, email)) = parse_contact(text) else {
            ctx.say(&format!("Cannot add \"{}\": expected \"name,email\"", text))?;
            continue;
        };
        let item = NewItem {
            title: Some(name),
            email: Some(email),
            ..Default::default()
        };
        let entry = ctx.client.publish(&feed, &item)?;
        ctx.say(&format!("Added contact \"{}\"", entry.title))?;
    }
    Ok(())
}

fn delete(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    common::delete(ctx, Feed::new(Collection::Contacts))
}
