//! Google Calendar: events of a calendar

use chrono::Local;

use crate::application::services::common;
use crate::application::services::{google_client, ServiceDefinition, TaskContext, TaskDescriptor};
use crate::application::ApplicationResult;
use crate::domain::{Collection, DateRange, Entry, Feed, NewItem, OptionField, Requirements};

const SERVICE: &str = "calendar";

pub(super) fn definition() -> ServiceDefinition {
    use OptionField::*;

    ServiceDefinition {
        name: SERVICE,
        section: SERVICE,
        needs_devkey: false,
        new_client: |flags, api| google_client(SERVICE, flags, api),
        tasks: vec![
            TaskDescriptor {
                name: "add",
                description: "Add events (quick-add text)",
                usage: "calendar add [--cal CALENDAR] [--date DATE] \"EVENT TEXT\"...",
                requirements: Requirements::none(),
                login_required: true,
                handler: add,
            },
            TaskDescriptor {
                name: "list",
                description: "List events",
                usage: "calendar list [--cal CALENDAR] [--date DATE[,DATE]] [--title TITLE] [--query QUERY] [--delimiter DELIM]",
                requirements: Requirements::none(),
                login_required: true,
                handler: list,
            },
            TaskDescriptor {
                name: "today",
                description: "List today's events",
                usage: "calendar today [--cal CALENDAR] [--title TITLE] [--delimiter DELIM]",
                requirements: Requirements::none(),
                login_required: true,
                handler: today,
            },
            TaskDescriptor {
                name: "delete",
                description: "Delete events",
                usage: "calendar delete [--cal CALENDAR] [--date DATE[,DATE]] --title TITLE [TITLE...]",
                requirements: Requirements::none().one_of(&[Title, Query]),
                login_required: true,
                handler: delete,
            },
        ],
    }
}

fn events(ctx: &TaskContext<'_>, range: Option<DateRange>) -> Feed {
    Feed::new(Collection::Events {
        calendar: ctx.options.cal.clone(),
        range,
    })
}

/// `--date` as a range, if given.
fn date_range(ctx: &TaskContext<'_>) -> ApplicationResult<Option<DateRange>> {
    match ctx.options.date.as_deref().filter(|d| !d.is_empty()) {
        Some(date) => Ok(Some(DateRange::parse(date)?)),
        None => Ok(None),
    }
}

fn when_column(entry: &Entry) -> Vec<Option<String>> {
    vec![entry.when.clone()]
}

fn add(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    // validate before anything is created
    date_range(ctx)?;
    let feed = events(ctx, None);
    let args = ctx.args;
    for text in args {
        let item = NewItem {
            title: Some(text.clone()),
            date: ctx.options.date.clone(),
            parent: ctx.options.cal.clone(),
            ..Default::default()
        };
        let entry = ctx.client.publish(&feed, &item)?;
        let line = match &entry.when {
            Some(when) => format!("Added \"{}\" ({})", entry.title, when),
            None => format!("Added \"{}\"", entry.title),
        };
        ctx.say(&line)?;
    }
    Ok(())
}

fn list(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let range = date_range(ctx)?;
    let feed = events(ctx, range);
    common::list(ctx, feed, when_column)
}

fn today(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let feed = events(ctx, Some(DateRange::day(Local::now().date_naive())));
    common::list(ctx, feed, when_column)
}

fn delete(ctx: &mut TaskContext<'_>) -> ApplicationResult<()> {
    let range = date_range(ctx)?;
    let feed = events(ctx, range);
    common::delete(ctx, feed)
}
