//! Certificate issuance contract.

use crate::collection::Collection;
use crate::config::Config;
use crate::entities::Certificate;
use crate::error::CoreResult;
use scholar_storage::{invoke, StateAccessor};

/// Certificate operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateContract {
    certificates: Collection<Certificate>,
}

impl CertificateContract {
    /// Creates the contract.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            certificates: Collection::new(config),
        }
    }

    /// The underlying collection.
    #[must_use]
    pub const fn collection(&self) -> Collection<Certificate> {
        self.certificates
    }

    /// Issues a new certificate.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if `id` is taken.
    pub fn create_certificate<S>(
        &self,
        state: &mut S,
        id: &str,
        student_id: &str,
        title: &str,
        issue_place: &str,
        issue_date: &str,
        doc_hash: &str,
        semester_averages: [i64; 6],
        years_average: i64,
        description: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let certificate = build(
            id,
            student_id,
            title,
            issue_place,
            issue_date,
            doc_hash,
            semester_averages,
            years_average,
            description,
        );
        invoke(state, |inv| self.certificates.create(inv, &certificate))
    }

    /// Returns the certificate stored under `id`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn read_certificate<S>(&self, state: &S, id: &str) -> CoreResult<Certificate>
    where
        S: StateAccessor + ?Sized,
    {
        self.certificates.read(state, id)
    }

    /// Overwrites every field of an existing certificate.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn update_certificate<S>(
        &self,
        state: &mut S,
        id: &str,
        student_id: &str,
        title: &str,
        issue_place: &str,
        issue_date: &str,
        doc_hash: &str,
        semester_averages: [i64; 6],
        years_average: i64,
        description: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let certificate = build(
            id,
            student_id,
            title,
            issue_place,
            issue_date,
            doc_hash,
            semester_averages,
            years_average,
            description,
        );
        invoke(state, |inv| self.certificates.update(inv, &certificate))
    }

    /// Removes a certificate.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn delete_certificate<S>(&self, state: &mut S, id: &str) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        invoke(state, |inv| self.certificates.delete(inv, id))
    }

    /// Returns true if a certificate with `id` exists.
    ///
    /// # Errors
    ///
    /// Fails if the world state cannot be read.
    pub fn certificate_exists<S>(&self, state: &S, id: &str) -> CoreResult<bool>
    where
        S: StateAccessor + ?Sized,
    {
        self.certificates.exists(state, id)
    }

    /// Returns every certificate in ID order.
    ///
    /// # Errors
    ///
    /// Fails if the scan fails or a stored value is not a certificate.
    pub fn get_all_certificates<S>(&self, state: &S) -> CoreResult<Vec<Certificate>>
    where
        S: StateAccessor + ?Sized,
    {
        self.certificates.list(state)
    }
}

fn build(
    id: &str,
    student_id: &str,
    title: &str,
    issue_place: &str,
    issue_date: &str,
    doc_hash: &str,
    semester_averages: [i64; 6],
    years_average: i64,
    description: &str,
) -> Certificate {
    let [s1, s2, s3, s4, s5, s6] = semester_averages;
    Certificate {
        student_id: student_id.to_string(),
        id: id.to_string(),
        title: title.to_string(),
        issue_place: issue_place.to_string(),
        issue_date: issue_date.to_string(),
        doc_hash: doc_hash.to_string(),
        semester1_average: s1,
        semester2_average: s2,
        semester3_average: s3,
        semester4_average: s4,
        semester5_average: s5,
        semester6_average: s6,
        years_average,
        description: description.to_string(),
    }
}
