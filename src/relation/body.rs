//! Relation method bodies

use crate::emitter::dumper;
use crate::relation::RelationSide;

impl RelationSide {
    /// Body of the relation method, referencing the target class as `class_ref`
    ///
    /// Key arguments are only written when they differ from the conventions;
    /// composite keys add one `where` clause per extra column pair.
    pub fn body(&self, class_ref: &str) -> String {
        let mut body = format!("return $this->{}({}::class", self.kind.method(), class_ref);

        if let Some(foreign_key) = &self.foreign_key {
            body.push_str(", ");
            body.push_str(&dumper::export_str(foreign_key));
        }
        if let Some(other_key) = &self.other_key {
            body.push_str(", ");
            body.push_str(&dumper::export_str(other_key));
        }
        body.push(')');

        for clause in &self.conditions {
            body.push_str(&format!(
                "\n\t\t\t\t\t->where({}, '=', {})",
                dumper::export_str(&clause.related),
                dumper::export_str(&clause.local)
            ));
        }

        body.push(';');
        body
    }

    /// Body of the typed getter returning the loaded relation
    ///
    /// Goes through `getRelationValue` so a snake case relation named after
    /// its own column still yields the related model, not the column value.
    pub fn getter_body(&self) -> String {
        format!(
            "return $this->getRelationValue({});",
            dumper::export_str(&self.name)
        )
    }
}
