//! Named field accessors for single-field mutation.

use std::fmt;

/// A named, mutable projection from a record onto one of its fields.
///
/// `Field` values are plain constants (see
/// [`Student::UNIVERSITY`](crate::Student::UNIVERSITY)), which lets one
/// [`Collection::set_field`](crate::Collection::set_field) serve every
/// record type and field.
pub struct Field<T, V> {
    name: &'static str,
    access: fn(&mut T) -> &mut V,
}

impl<T, V> Field<T, V> {
    /// Creates an accessor for the field encoded as `name`.
    #[must_use]
    pub const fn new(name: &'static str, access: fn(&mut T) -> &mut V) -> Self {
        Self { name, access }
    }

    /// Encoded field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Borrows the field out of `record`.
    pub fn get_mut<'r>(&self, record: &'r mut T) -> &'r mut V {
        (self.access)(record)
    }

    /// Stores `value` in `record` and returns the previous value.
    pub fn replace(&self, record: &mut T, value: V) -> V {
        std::mem::replace((self.access)(record), value)
    }
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Field<T, V> {}

impl<T, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Course {
        title: String,
        credits: i64,
    }

    const TITLE: Field<Course, String> = Field::new("Title", |c| &mut c.title);
    const CREDITS: Field<Course, i64> = Field::new("Credits", |c| &mut c.credits);

    #[test]
    fn replace_returns_previous_value() {
        let mut course = Course {
            title: "Algebra".into(),
            credits: 4,
        };
        assert_eq!(TITLE.replace(&mut course, "Topology".into()), "Algebra");
        assert_eq!(CREDITS.replace(&mut course, 6), 4);
        assert_eq!(course.title, "Topology");
        assert_eq!(course.credits, 6);
    }

    #[test]
    fn accessors_are_copy_and_named() {
        let copy = TITLE;
        assert_eq!(copy.name(), "Title");
        assert_eq!(format!("{CREDITS:?}"), "Field { name: \"Credits\" }");

        let mut course = Course {
            title: String::new(),
            credits: 0,
        };
        *CREDITS.get_mut(&mut course) += 2;
        assert_eq!(course.credits, 2);
    }
}
