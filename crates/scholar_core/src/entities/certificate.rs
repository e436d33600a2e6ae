//! Certificate record with its six semester averages.

use crate::record::{FieldReader, Record};
use crate::schema::Schema;
use scholar_codec::{CodecResult, FieldSpec, Value};
use serde::{Deserialize, Serialize};

/// A certificate issued to a student, with per-semester averages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Certificate {
    /// Holder's student ID. Not checked against the student records.
    #[serde(rename = "StudentID")]
    pub student_id: String,
    /// Certificate ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Where the certificate was issued.
    pub issue_place: String,
    /// Issue date as written on the document.
    pub issue_date: String,
    /// Hash of the signed document.
    pub doc_hash: String,
    /// First semester average.
    pub semester1_average: i64,
    /// Second semester average.
    pub semester2_average: i64,
    /// Third semester average.
    pub semester3_average: i64,
    /// Fourth semester average.
    pub semester4_average: i64,
    /// Fifth semester average.
    pub semester5_average: i64,
    /// Sixth semester average.
    pub semester6_average: i64,
    /// Average over all years.
    pub years_average: i64,
    /// Free-form description.
    pub description: String,
}

impl Record for Certificate {
    const SCHEMA: &'static Schema = &Schema {
        name: "certificate",
        key_prefix: "CERTIFICATE",
        fields: &[
            FieldSpec::text("StudentID"),
            FieldSpec::text("ID"),
            FieldSpec::text("Title"),
            FieldSpec::text("IssuePlace"),
            FieldSpec::text("IssueDate"),
            FieldSpec::text("DocHash"),
            FieldSpec::integer("Semester1Average"),
            FieldSpec::integer("Semester2Average"),
            FieldSpec::integer("Semester3Average"),
            FieldSpec::integer("Semester4Average"),
            FieldSpec::integer("Semester5Average"),
            FieldSpec::integer("Semester6Average"),
            FieldSpec::integer("YearsAverage"),
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
            Value::from(&self.issue_place),
            Value::from(&self.issue_date),
            Value::from(&self.doc_hash),
            Value::from(self.semester1_average),
            Value::from(self.semester2_average),
            Value::from(self.semester3_average),
            Value::from(self.semester4_average),
            Value::from(self.semester5_average),
            Value::from(self.semester6_average),
            Value::from(self.years_average),
            Value::from(&self.description),
        ]
    }

    fn from_values(values: Vec<Value>) -> CodecResult<Self> {
        let mut fields = FieldReader::new(Self::SCHEMA, values);
        let certificate = Self {
            student_id: fields.text()?,
            id: fields.text()?,
            title: fields.text()?,
            issue_place: fields.text()?,
            issue_date: fields.text()?,
            doc_hash: fields.text()?,
            semester1_average: fields.integer()?,
            semester2_average: fields.integer()?,
            semester3_average: fields.integer()?,
            semester4_average: fields.integer()?,
            semester5_average: fields.integer()?,
            semester6_average: fields.integer()?,
            years_average: fields.integer()?,
            description: fields.text()?,
        };
        fields.finish()?;
        Ok(certificate)
    }
}
