//! Membership rules: is the entity's key in a named set

use std::sync::Arc;

use super::{Relation, TextSelector, humanize, relation_enum};
use crate::source::MembershipSource;
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    MembershipRelation {
        IsMemberOf => "isMemberOf",
        IsNotMemberOf => "isNotMemberOf",
    }
}

/// Checks the entity's key against a set looked up on every evaluation.
///
/// The set is not cached, so changes to the source show up without rebuilding the
/// rule. A set that has disappeared matches nothing, for either relation.
#[derive(Debug, Clone)]
pub struct MembershipRule<E> {
    pub(crate) field: String,
    pub(crate) relation: MembershipRelation,
    category: String,
    identifier: String,
    source: Arc<dyn MembershipSource>,
    selector: TextSelector<E>,
}

impl<E> MembershipRule<E> {
    pub(crate) fn new(
        field: &str,
        relation: MembershipRelation,
        category: &str,
        identifier: String,
        source: Arc<dyn MembershipSource>,
        selector: TextSelector<E>,
    ) -> Self {
        Self {
            field: field.to_string(),
            relation,
            category: category.to_string(),
            identifier,
            source,
            selector,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let key = (self.selector)(entity);
        match self.source.is_member(&self.category, &self.identifier, key) {
            Some(member) => match self.relation {
                MembershipRelation::IsMemberOf => member,
                MembershipRelation::IsNotMemberOf => !member,
            },
            None => false,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} {} {}",
            self.field,
            humanize(self.relation.as_str()),
            self.category,
            self.identifier
        )
    }

    pub fn to_record(&self) -> SerializedRule {
        SerializedRule::new(
            &self.field,
            self.relation.as_str(),
            Some(FilterValue::Text(self.identifier.clone())),
        )
    }
}
