//! Flat CSV projection of the person aggregate.
//!
//! One row per person with the scalar identity fields; nested profiles are
//! reduced to their headline values (current address, primary contacts,
//! current job, credit score).

use std::io::Write;

use personagen_core::Person;

use crate::errors::GenerateError;

const HEADERS: &[&str] = &[
    "id",
    "ssn",
    "first_name",
    "last_name",
    "date_of_birth",
    "age",
    "gender",
    "marital_status",
    "street",
    "city",
    "state",
    "zip_code",
    "phone",
    "email",
    "employer",
    "job_title",
    "annual_income",
    "credit_score",
];

fn row(person: &Person) -> Vec<String> {
    let address = person.current_address();
    let job = person.current_employment();
    vec![
        person.id.to_string(),
        person.ssn.clone().unwrap_or_default(),
        person.name.first.clone(),
        person.name.last.clone(),
        person.date_of_birth.format("%Y-%m-%d").to_string(),
        person.age.to_string(),
        format!("{:?}", person.gender).to_lowercase(),
        format!("{:?}", person.marital_status).to_lowercase(),
        address.map(|a| a.street_line1.clone()).unwrap_or_default(),
        address.map(|a| a.city.clone()).unwrap_or_default(),
        address.map(|a| a.state.clone()).unwrap_or_default(),
        address.map(|a| a.zip_code.clone()).unwrap_or_default(),
        person
            .primary_phone()
            .map(|phone| phone.number.clone())
            .unwrap_or_default(),
        person
            .primary_email()
            .map(|email| email.address.clone())
            .unwrap_or_default(),
        job.map(|job| job.employer.clone()).unwrap_or_default(),
        job.map(|job| job.job_title.clone()).unwrap_or_default(),
        job.map(|job| format!("{:.0}", job.annual_salary))
            .unwrap_or_default(),
        person
            .financial
            .as_ref()
            .map(|financial| financial.credit_score.to_string())
            .unwrap_or_default(),
    ]
}

/// Writes the flat projection of `people` as CSV; returns rows written.
pub fn write_csv<W: Write>(writer: W, people: &[Person]) -> Result<u64, GenerateError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    let mut rows = 0;
    for person in people {
        csv_writer.write_record(row(person))?;
        rows += 1;
    }
    csv_writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use personagen_config::{DataQualityProfile, GenerationConfig};

    use crate::engine::PersonEngine;

    fn sample(count: usize) -> Vec<Person> {
        let mut engine = PersonEngine::new(GenerationConfig {
            seed: 5,
            data_quality: DataQualityProfile::clean(),
            ..GenerationConfig::default()
        });
        (0..count).map(|_| engine.generate_person()).collect()
    }

    #[test]
    fn header_plus_one_row_per_person() {
        let people = sample(5);
        let mut buffer = Vec::new();
        let rows = write_csv(&mut buffer, &people).unwrap();
        assert_eq!(rows, 5);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("id,ssn,first_name"));
    }

    #[test]
    fn row_width_matches_headers() {
        let people = sample(3);
        for person in &people {
            assert_eq!(row(person).len(), HEADERS.len());
        }
    }

    #[test]
    fn credit_score_column_is_numeric_when_present() {
        let people = sample(10);
        for person in &people {
            let cells = row(person);
            let score = &cells[HEADERS.len() - 1];
            if !score.is_empty() {
                let value: u16 = score.parse().unwrap();
                assert!((300..=850).contains(&value));
            }
        }
    }
}
