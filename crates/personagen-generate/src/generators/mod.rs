//! Domain generators.
//!
//! Each module owns its static reference tables and produces one profile
//! from demographic inputs. Generators never validate against the rest of
//! the person and never fail; out-of-range inputs clamp or fall back.

pub mod address;
pub mod banking;
pub mod communication;
pub mod contact;
pub mod education;
pub mod employment;
pub mod financial;
pub mod legal;
pub mod lifestyle;
pub mod medical;
pub mod name;
pub mod physical;
pub mod social;
pub mod travel;
pub mod vehicle;

use rand_chacha::ChaCha8Rng;

use crate::variability::Variability;

/// Common capability implemented by every domain generator.
///
/// The composition engine holds one value per implementation and threads
/// the shared RNG and variability engine through each call.
pub trait DomainGenerator {
    type Input<'a>;
    type Profile;

    fn generate(
        &self,
        input: Self::Input<'_>,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> Self::Profile;
}

pub use address::AddressGenerator;
pub use banking::BankingGenerator;
pub use communication::CommunicationGenerator;
pub use contact::ContactGenerator;
pub use education::EducationGenerator;
pub use employment::EmploymentGenerator;
pub use financial::FinancialGenerator;
pub use legal::LegalGenerator;
pub use lifestyle::LifestyleGenerator;
pub use medical::MedicalGenerator;
pub use name::NameGenerator;
pub use physical::PhysicalGenerator;
pub use social::SocialGenerator;
pub use travel::TravelGenerator;
pub use vehicle::VehicleGenerator;
