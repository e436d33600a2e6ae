//! Project record and its schema.

use crate::record::{FieldReader, Record};
use crate::schema::Schema;
use scholar_codec::{CodecResult, FieldSpec, Value};
use serde::{Deserialize, Serialize};

/// A deposited student project and its partners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    /// Owner's student ID.
    #[serde(rename = "StudentID")]
    pub student_id: String,
    /// Project ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Supervising teacher.
    pub advisor: String,
    /// Course the project belongs to.
    pub course: String,
    /// Kind of project, e.g. "Memoire".
    #[serde(rename = "Type")]
    pub project_type: String,
    /// Deposit date.
    pub depose_date: String,
    /// Hash of the repository snapshot.
    pub repo_hash: String,
    /// Location of the published project.
    pub url_path: String,
    /// Partner slot 1. Empty when unused.
    pub partner1: String,
    /// Partner slot 2.
    pub partner2: String,
    /// Partner slot 3.
    pub partner3: String,
    /// Partner slot 4.
    pub partner4: String,
    /// Partner slot 5.
    pub partner5: String,
    /// Partner slot 6.
    pub partner6: String,
    /// Final grade.
    pub grade: i64,
    /// Free-form description.
    pub description: String,
}

impl Project {
    /// Non-empty partner names in slot order.
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        [
            &self.partner1,
            &self.partner2,
            &self.partner3,
            &self.partner4,
            &self.partner5,
            &self.partner6,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
    }
}

impl Record for Project {
    const SCHEMA: &'static Schema = &Schema {
        name: "project",
        key_prefix: "PROJECT",
        fields: &[
            FieldSpec::text("StudentID"),
            FieldSpec::text("ID"),
            FieldSpec::text("Title"),
            FieldSpec::text("Advisor"),
            FieldSpec::text("Course"),
            FieldSpec::text("Type"),
            FieldSpec::text("DeposeDate"),
            FieldSpec::text("RepoHash"),
            FieldSpec::text("UrlPath"),
            FieldSpec::text("Partner1"),
            FieldSpec::text("Partner2"),
            FieldSpec::text("Partner3"),
            FieldSpec::text("Partner4"),
            FieldSpec::text("Partner5"),
            FieldSpec::text("Partner6"),
            FieldSpec::integer("Grade"),
            FieldSpec::text("Description"),
        ],
        key_field: 1,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(&self.student_id),
            Value::from(&self.id),
            Value::from(&self.title),
            Value::from(&self.advisor),
            Value::from(&self.course),
            Value::from(&self.project_type),
            Value::from(&self.depose_date),
            Value::from(&self.repo_hash),
            Value::from(&self.url_path),
            Value::from(&self.partner1),
            Value::from(&self.partner2),
            Value::from(&self.partner3),
            Value::from(&self.partner4),
            Value::from(&self.partner5),
            Value::from(&self.partner6),
            Value::from(self.grade),
            Value::from(&self.description),
        ]
    }

    fn from_values(values: Vec<Value>) -> CodecResult<Self> {
        let mut fields = FieldReader::new(Self::SCHEMA, values);
        let project = Self {
            student_id: fields.text()?,
            id: fields.text()?,
            title: fields.text()?,
            advisor: fields.text()?,
            course: fields.text()?,
            project_type: fields.text()?,
            depose_date: fields.text()?,
            repo_hash: fields.text()?,
            url_path: fields.text()?,
            partner1: fields.text()?,
            partner2: fields.text()?,
            partner3: fields.text()?,
            partner4: fields.text()?,
            partner5: fields.text()?,
            partner6: fields.text()?,
            grade: fields.integer()?,
            description: fields.text()?,
        };
        fields.finish()?;
        Ok(project)
    }
}
