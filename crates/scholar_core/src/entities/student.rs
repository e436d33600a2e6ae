//! Student record, schema and field accessors.

use crate::field::Field;
use crate::record::{FieldReader, Record};
use crate::schema::Schema;
use scholar_codec::{CodecResult, FieldSpec, Value};
use serde::{Deserialize, Serialize};

/// A student enrolled at a university.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    /// Year of first enrollment.
    pub enrollment_year: i64,
    /// Full name.
    pub full_name: String,
    /// Student ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Speciality, e.g. "Math".
    pub speciality: String,
    /// Major within the speciality. May be empty.
    pub major: String,
    /// Current year of study.
    pub current_year: i64,
    /// Degree being prepared, e.g. "Licence" or "Master".
    pub degree: String,
    /// University name.
    pub university: String,
    /// Faculty name.
    pub faculty: String,
    /// Date of birth as written by the registrar.
    pub date_of_birth: String,
    /// Place of birth.
    pub place_of_birth: String,
    /// Postal address.
    pub address: String,
}

impl Student {
    /// The University field.
    pub const UNIVERSITY: Field<Student, String> = Field::new("University", |s| &mut s.university);
    /// The Major field.
    pub const MAJOR: Field<Student, String> = Field::new("Major", |s| &mut s.major);
    /// The Degree field.
    pub const DEGREE: Field<Student, String> = Field::new("Degree", |s| &mut s.degree);
    /// The CurrentYear field.
    pub const CURRENT_YEAR: Field<Student, i64> =
        Field::new("CurrentYear", |s| &mut s.current_year);
}

impl Record for Student {
    const SCHEMA: &'static Schema = &Schema {
        name: "student",
        key_prefix: "STUDENT",
        fields: &[
            FieldSpec::integer("EnrollmentYear"),
            FieldSpec::text("FullName"),
            FieldSpec::text("ID"),
            FieldSpec::text("Speciality"),
            FieldSpec::text("Major"),
            FieldSpec::integer("CurrentYear"),
            FieldSpec::text("Degree"),
            FieldSpec::text("University"),
            FieldSpec::text("Faculty"),
            FieldSpec::text("DateOfBirth"),
            FieldSpec::text("PlaceOfBirth"),
            FieldSpec::text("Address"),
        ],
        key_field: 2,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.enrollment_year),
            Value::from(&self.full_name),
            Value::from(&self.id),
            Value::from(&self.speciality),
            Value::from(&self.major),
            Value::from(self.current_year),
            Value::from(&self.degree),
            Value::from(&self.university),
            Value::from(&self.faculty),
            Value::from(&self.date_of_birth),
            Value::from(&self.place_of_birth),
            Value::from(&self.address),
        ]
    }

    fn from_values(values: Vec<Value>) -> CodecResult<Self> {
        let mut fields = FieldReader::new(Self::SCHEMA, values);
        let student = Self {
            enrollment_year: fields.integer()?,
            full_name: fields.text()?,
            id: fields.text()?,
            speciality: fields.text()?,
            major: fields.text()?,
            current_year: fields.integer()?,
            degree: fields.text()?,
            university: fields.text()?,
            faculty: fields.text()?,
            date_of_birth: fields.text()?,
            place_of_birth: fields.text()?,
            address: fields.text()?,
        };
        fields.finish()?;
        Ok(student)
    }
}
