//! Student registry contract.

use crate::collection::Collection;
use crate::config::Config;
use crate::entities::Student;
use crate::error::{CoreError, CoreResult};
use crate::field::Field;
use scholar_storage::{invoke, StateAccessor};
use tracing::info;

/// The six students seeded by [`StudentContract::init_ledger`].
#[must_use]
pub fn reference_students() -> Vec<Student> {
    let seed = |id: &str,
                full_name: &str,
                date_of_birth: &str,
                place_of_birth: &str,
                enrollment_year: i64,
                current_year: i64,
                speciality: &str,
                major: &str,
                degree: &str| Student {
        enrollment_year,
        full_name: full_name.to_string(),
        id: id.to_string(),
        speciality: speciality.to_string(),
        major: major.to_string(),
        current_year,
        degree: degree.to_string(),
        university: "Djillali Liabes".to_string(),
        faculty: "Sciences Exactes".to_string(),
        date_of_birth: date_of_birth.to_string(),
        place_of_birth: place_of_birth.to_string(),
        address: "Sidi Bel abbes,Tassala".to_string(),
    };

    vec![
        seed(
            "student1",
            "Mohamed",
            "12/06/1997",
            "Chelef",
            2018,
            2,
            "Math",
            "Probabilite",
            "Master",
        ),
        seed("student2", "Said", "12/12/2000", "Oran", 2020, 2, "Info", "", "Licence"),
        seed(
            "student3",
            "Israa",
            "12/07/1999",
            "Ain Temouchent",
            2019,
            3,
            "Math",
            "",
            "Licence",
        ),
        seed("student4", "Ali", "12/08/2001", "Oran", 2019, 3, "Info", "SI", "Licence"),
        seed(
            "student5",
            "Jenice",
            "12/02/2000",
            "Adrar",
            2021,
            1,
            "Math/Info",
            "",
            "Licence",
        ),
        seed(
            "student6",
            "Kalthoum",
            "12/12/1995",
            "Bechar",
            2018,
            2,
            "Info",
            "RSSI",
            "Master",
        ),
    ]
}

/// Student registry operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentContract {
    students: Collection<Student>,
}

impl StudentContract {
    /// Creates the contract.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            students: Collection::new(config),
        }
    }

    /// The underlying collection.
    #[must_use]
    pub const fn collection(&self) -> Collection<Student> {
        self.students
    }

    /// Seeds the [`reference_students`].
    ///
    /// Existing records under the reference IDs are overwritten, so running
    /// it again resets them. All six are written in one invocation.
    ///
    /// # Errors
    ///
    /// Fails if the world state rejects the writes, in which case none is
    /// written.
    pub fn init_ledger<S>(&self, state: &mut S) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let students = reference_students();
        let count = students.len();
        invoke(state, |inv| {
            for student in &students {
                self.students.put(inv, student)?;
            }
            Ok::<(), CoreError>(())
        })?;
        info!(count, "seeded reference students");
        Ok(())
    }

    /// Registers a new student.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if `id` is taken.
    pub fn create_student<S>(
        &self,
        state: &mut S,
        id: &str,
        full_name: &str,
        current_year: i64,
        speciality: &str,
        enrollment_year: i64,
        major: &str,
        degree: &str,
        university: &str,
        faculty: &str,
        date_of_birth: &str,
        place_of_birth: &str,
        address: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let student = Student {
            enrollment_year,
            full_name: full_name.to_string(),
            id: id.to_string(),
            speciality: speciality.to_string(),
            major: major.to_string(),
            current_year,
            degree: degree.to_string(),
            university: university.to_string(),
            faculty: faculty.to_string(),
            date_of_birth: date_of_birth.to_string(),
            place_of_birth: place_of_birth.to_string(),
            address: address.to_string(),
        };
        invoke(state, |inv| self.students.create(inv, &student))
    }

    /// Returns the student stored under `id`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn read_student<S>(&self, state: &S, id: &str) -> CoreResult<Student>
    where
        S: StateAccessor + ?Sized,
    {
        self.students.read(state, id)
    }

    /// Overwrites every field of an existing student.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn update_student<S>(
        &self,
        state: &mut S,
        id: &str,
        full_name: &str,
        current_year: i64,
        speciality: &str,
        enrollment_year: i64,
        major: &str,
        degree: &str,
        university: &str,
        faculty: &str,
        date_of_birth: &str,
        place_of_birth: &str,
        address: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let student = Student {
            enrollment_year,
            full_name: full_name.to_string(),
            id: id.to_string(),
            speciality: speciality.to_string(),
            major: major.to_string(),
            current_year,
            degree: degree.to_string(),
            university: university.to_string(),
            faculty: faculty.to_string(),
            date_of_birth: date_of_birth.to_string(),
            place_of_birth: place_of_birth.to_string(),
            address: address.to_string(),
        };
        invoke(state, |inv| self.students.update(inv, &student))
    }

    /// Removes a student.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn delete_student<S>(&self, state: &mut S, id: &str) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        invoke(state, |inv| self.students.delete(inv, id))
    }

    /// Returns true if a student with `id` exists.
    ///
    /// # Errors
    ///
    /// Fails if the world state cannot be read.
    pub fn student_exists<S>(&self, state: &S, id: &str) -> CoreResult<bool>
    where
        S: StateAccessor + ?Sized,
    {
        self.students.exists(state, id)
    }

    /// Moves a student to `new_university` and returns the previous one.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn transfer_student<S>(
        &self,
        state: &mut S,
        id: &str,
        new_university: &str,
    ) -> CoreResult<String>
    where
        S: StateAccessor + ?Sized,
    {
        self.replace(state, id, Student::UNIVERSITY, new_university.to_string())
    }

    /// Sets the major and returns the previous one.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn change_major<S>(
        &self,
        state: &mut S,
        id: &str,
        new_major: &str,
    ) -> CoreResult<String>
    where
        S: StateAccessor + ?Sized,
    {
        self.replace(state, id, Student::MAJOR, new_major.to_string())
    }

    /// Sets the degree and returns the previous one.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn change_degree<S>(
        &self,
        state: &mut S,
        id: &str,
        new_degree: &str,
    ) -> CoreResult<String>
    where
        S: StateAccessor + ?Sized,
    {
        self.replace(state, id, Student::DEGREE, new_degree.to_string())
    }

    /// Sets the current year and returns the previous one.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn change_current_year<S>(
        &self,
        state: &mut S,
        id: &str,
        new_current_year: i64,
    ) -> CoreResult<i64>
    where
        S: StateAccessor + ?Sized,
    {
        self.replace(state, id, Student::CURRENT_YEAR, new_current_year)
    }

    /// Returns every student in ID order.
    ///
    /// # Errors
    ///
    /// Fails if the scan fails or a stored value is not a student.
    pub fn get_all_students<S>(&self, state: &S) -> CoreResult<Vec<Student>>
    where
        S: StateAccessor + ?Sized,
    {
        self.students.list(state)
    }

    fn replace<S, V>(
        &self,
        state: &mut S,
        id: &str,
        field: Field<Student, V>,
        value: V,
    ) -> CoreResult<V>
    where
        S: StateAccessor + ?Sized,
    {
        invoke(state, |inv| self.students.set_field(inv, id, field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_storage::InMemoryState;

    fn seeded() -> InMemoryState {
        let mut state = InMemoryState::new();
        StudentContract::default().init_ledger(&mut state).unwrap();
        state
    }

    #[test]
    fn init_ledger_seeds_six_students() {
        let state = seeded();
        let all = StudentContract::default().get_all_students(&state).unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["student1", "student2", "student3", "student4", "student5", "student6"]
        );
        assert_eq!(all[3].major, "SI");
        assert!(all.iter().all(|s| s.university == "Djillali Liabes"));
    }

    #[test]
    fn init_ledger_resets_reference_students() {
        let contract = StudentContract::default();
        let mut state = seeded();
        contract.change_major(&mut state, "student1", "Statistique").unwrap();
        contract.delete_student(&mut state, "student4").unwrap();

        contract.init_ledger(&mut state).unwrap();
        let all = contract.get_all_students(&state).unwrap();
        assert_eq!(all, reference_students());
    }

    #[test]
    fn init_ledger_keeps_other_students() {
        let contract = StudentContract::default();
        let mut state = InMemoryState::new();
        contract
            .create_student(
                &mut state,
                "student7",
                "Amina",
                1,
                "Info",
                2023,
                "",
                "Licence",
                "USTO",
                "",
                "",
                "",
                "",
            )
            .unwrap();

        contract.init_ledger(&mut state).unwrap();
        assert_eq!(contract.get_all_students(&state).unwrap().len(), 7);
        assert_eq!(contract.read_student(&state, "student7").unwrap().full_name, "Amina");
    }

    #[test]
    fn create_uses_argument_order() {
        let contract = StudentContract::default();
        let mut state = InMemoryState::new();
        contract
            .create_student(
                &mut state,
                "student7",
                "Amina",
                1,
                "Info",
                2023,
                "IA",
                "Licence",
                "USTO",
                "Informatique",
                "01/01/2004",
                "Oran",
                "Bir El Djir",
            )
            .unwrap();

        let student = contract.read_student(&state, "student7").unwrap();
        assert_eq!(student.current_year, 1);
        assert_eq!(student.enrollment_year, 2023);
        assert_eq!(student.major, "IA");
        assert_eq!(student.faculty, "Informatique");
        assert_eq!(student.address, "Bir El Djir");
    }

    #[test]
    fn update_and_delete() {
        let contract = StudentContract::default();
        let mut state = seeded();
        contract
            .update_student(
                &mut state,
                "student2",
                "Said",
                3,
                "Info",
                2020,
                "GL",
                "Licence",
                "Djillali Liabes",
                "Sciences Exactes",
                "12/12/2000",
                "Oran",
                "Oran",
            )
            .unwrap();
        let said = contract.read_student(&state, "student2").unwrap();
        assert_eq!((said.current_year, said.major.as_str()), (3, "GL"));

        contract.delete_student(&mut state, "student2").unwrap();
        assert!(!contract.student_exists(&state, "student2").unwrap());
        assert!(contract
            .update_student(&mut state, "student2", "", 0, "", 0, "", "", "", "", "", "", "")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn transfer_returns_previous_university() {
        let contract = StudentContract::default();
        let mut state = seeded();
        let old = contract.transfer_student(&mut state, "student1", "USTO").unwrap();
        assert_eq!(old, "Djillali Liabes");
        assert_eq!(contract.read_student(&state, "student1").unwrap().university, "USTO");
    }

    #[test]
    fn field_changes_return_previous_values() {
        let contract = StudentContract::default();
        let mut state = seeded();
        assert_eq!(contract.change_major(&mut state, "student6", "SSI").unwrap(), "RSSI");
        assert_eq!(contract.change_degree(&mut state, "student5", "Master").unwrap(), "Licence");
        assert_eq!(contract.change_current_year(&mut state, "student3", 4).unwrap(), 3);

        let israa = contract.read_student(&state, "student3").unwrap();
        assert_eq!(israa.current_year, 4);
    }

    #[test]
    fn field_change_on_unknown_student() {
        let contract = StudentContract::default();
        let mut state = seeded();
        let before = state.snapshot();
        assert!(contract
            .transfer_student(&mut state, "student9", "USTO")
            .unwrap_err()
            .is_not_found());
        assert_eq!(state.snapshot(), before);
    }
}
