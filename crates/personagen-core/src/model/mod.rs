//! Person aggregate and domain profile value objects.

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
pub mod person;
pub mod physical;
pub mod social;
pub mod travel;
pub mod vehicle;

pub use address::{Address, AddressStyle, AddressType};
pub use banking::{
    BankAccount, BankAccountType, BankingProfile, CreditCard, Investment, Loan, LoanKind,
    Transaction, TransactionDirection,
};
pub use communication::{
    CommunicationPattern, CommunicationProfile, CommunicationRecord, ContactEntry,
    ContactRelationship,
};
pub use contact::{EmailAddress, EmailType, PhoneNumber, PhoneType};
pub use education::{EducationEntry, EducationLevel, EducationProfile};
pub use employment::Employment;
pub use financial::FinancialProfile;
pub use legal::{
    BusinessEntity, ComplianceRecord, IntellectualProperty, LegalProfile, LegalRecord,
    ProfessionalLicense, Severity,
};
pub use lifestyle::{BigFive, DailyRoutine, LifestyleCategory, LifestyleProfile};
pub use medical::{EmergencyContact, MedicalProfile};
pub use person::{CulturalBackground, Gender, MaritalStatus, Person, PersonName};
pub use physical::PhysicalProfile;
pub use social::{
    ActivityLevel, DigitalFootprint, OnlineAccount, OnlinePresence, SocialMediaAccount,
};
pub use travel::{LocationVisit, TravelEntry, TravelFrequency, TravelProfile};
pub use vehicle::{Vehicle, VehicleOwnership, VehicleProfile};
