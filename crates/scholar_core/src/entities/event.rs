//! Event record.

use crate::record::{FieldReader, Record};
use crate::schema::Schema;
use scholar_codec::{CodecResult, FieldSpec, Value};
use serde::{Deserialize, Serialize};

/// A student's participation in an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Participant's student ID.
    #[serde(rename = "StudentID")]
    pub student_id: String,
    /// Event ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Where the event took place.
    pub location: String,
    /// Date the student joined.
    pub join_date: String,
    /// Organizing body.
    pub organizer: String,
    /// Free-form description.
    pub description: String,
}

impl Record for Event {
    const SCHEMA: &'static Schema = &Schema {
        name: "event",
        key_prefix: "EVENT",
        fields: &[
            FieldSpec::text("StudentID"),
            FieldSpec::text("ID"),
            FieldSpec::text("Title"),
            FieldSpec::text("Location"),
            FieldSpec::text("JoinDate"),
            FieldSpec::text("Organizer"),
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
            Value::from(&self.location),
            Value::from(&self.join_date),
            Value::from(&self.organizer),
            Value::from(&self.description),
        ]
    }

    fn from_values(values: Vec<Value>) -> CodecResult<Self> {
        let mut fields = FieldReader::new(Self::SCHEMA, values);
        let event = Self {
            student_id: fields.text()?,
            id: fields.text()?,
            title: fields.text()?,
            location: fields.text()?,
            join_date: fields.text()?,
            organizer: fields.text()?,
            description: fields.text()?,
        };
        fields.finish()?;
        Ok(event)
    }
}
