//! Declarative required-field predicates for tasks

use crate::domain::{OptionField, Options};

/// One requirement of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// The field must always be present.
    Field(OptionField),
    /// At least one field of the group must be present.
    /// While none is set, only the first member is reported as required.
    OneOf(Vec<OptionField>),
}

/// The full set of requirements of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements(Vec<Requirement>);

impl Requirements {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Builder: add an always-required field.
    pub fn field(mut self, field: OptionField) -> Self {
        self.0.push(Requirement::Field(field));
        self
    }

    /// Builder: add a group where one member suffices.
    pub fn one_of(mut self, fields: &[OptionField]) -> Self {
        self.0.push(Requirement::OneOf(fields.to_vec()));
        self
    }

    /// Whether `field` is required given the current option values.
    pub fn requires(&self, field: OptionField, options: &Options) -> bool {
        self.0.iter().any(|req| match req {
            Requirement::Field(f) => *f == field,
            Requirement::OneOf(group) => {
                group.first() == Some(&field) && group.iter().all(|f| options.is_missing(*f))
            }
        })
    }

    /// Whether `field` appears in any requirement at all.
    pub fn mentions(&self, field: OptionField) -> bool {
        self.0.iter().any(|req| match req {
            Requirement::Field(f) => *f == field,
            Requirement::OneOf(group) => group.contains(&field),
        })
    }

    /// Human-readable listing, e.g. `title, tags` or `title|query`.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|req| match req {
                Requirement::Field(f) => f.name().to_string(),
                Requirement::OneOf(group) => group
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join("|"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_field_when_checking_then_always_required() {
        let reqs = Requirements::none().field(OptionField::Title);
        let mut options = Options::default();
        assert!(reqs.requires(OptionField::Title, &options));
        options.title = Some("x".into());
        assert!(reqs.requires(OptionField::Title, &options));
        assert!(!reqs.requires(OptionField::Tags, &options));
    }

    #[test]
    fn given_group_when_none_set_then_only_first_member_required() {
        let reqs = Requirements::none().one_of(&[OptionField::Title, OptionField::Query]);
        let options = Options::default();
        assert!(reqs.requires(OptionField::Title, &options));
        assert!(!reqs.requires(OptionField::Query, &options));
    }

    #[test]
    fn given_group_when_other_member_set_then_nothing_required() {
        let reqs = Requirements::none().one_of(&[OptionField::Title, OptionField::Query]);
        let options = Options {
            query: Some("cats".into()),
            ..Default::default()
        };
        assert!(!reqs.requires(OptionField::Title, &options));
        assert!(reqs.mentions(OptionField::Query));
    }

    #[test]
    fn given_requirements_when_describing_then_lists_groups() {
        let reqs = Requirements::none()
            .one_of(&[OptionField::Title, OptionField::Query])
            .field(OptionField::Tags);
        assert_eq!(reqs.describe(), "title|query, tags");
    }
}
