//! Help texts

use itertools::Itertools;

use crate::application::services::{ServiceDefinition, ServiceRegistry};

/// Names as a quoted, comma separated list: `'picasa', 'blogger'`.
fn quoted(names: &[&str]) -> String {
    names.iter().map(|n| format!("'{n}'")).join(", ")
}

pub fn general_help(registry: &ServiceRegistry) -> String {
    let lines = [
        "Welcome to the Google CL tool!".to_string(),
        "  Commands are broken into several parts: service, task, options, and arguments."
            .to_string(),
        "  For example, in the command".to_string(),
        "      \"> picasa post --title \"My Cat Photos\" photos/cats/*\"".to_string(),
        "  the service is \"picasa\", the task is \"post\", the single option is a name of \"My Cat Photos\", and the argument is the path to the photos.".to_string(),
        format!("  The available services are {}", quoted(&registry.names())),
        "  Enter \"> help <service>\" for more information on a service.".to_string(),
        "  Or, just \"quit\" to quit.".to_string(),
    ];
    lines.join("\n")
}

pub fn service_help(service: &ServiceDefinition) -> String {
    let mut text = format!(
        "Available tasks for service {}: {}",
        service.name,
        quoted(&service.task_names())
    );
    for task in &service.tasks {
        text.push_str(&format!("\n  {}: {}\n\t{}", task.name, task.description, task.usage));
        let required = task.requirements.describe();
        if !required.is_empty() {
            text.push_str(&format!("\n\trequires: {required}"));
        }
    }
    text
}

/// Message for a task the service does not have.
pub fn unknown_task(service: &ServiceDefinition) -> String {
    format!(
        "Did not recognize task, please use one of [{}]",
        quoted(&service.task_names())
    )
}
