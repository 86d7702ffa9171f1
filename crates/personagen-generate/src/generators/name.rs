//! Name synthesis with cultural background and birth-decade weighting.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::{CulturalBackground, Gender, MaritalStatus, PersonName};

use super::DomainGenerator;
use crate::variability::Variability;

const BACKGROUND_WEIGHTS: &[(CulturalBackground, f64)] = &[
    (CulturalBackground::Anglo, 0.60),
    (CulturalBackground::Hispanic, 0.18),
    (CulturalBackground::African, 0.13),
    (CulturalBackground::Asian, 0.06),
    (CulturalBackground::Other, 0.03),
];

/// Popular first names by birth decade. Nearest decade wins for years
/// outside the table.
const DECADE_MALE: &[(i32, &[&str])] = &[
    (1940, &["James", "Robert", "John", "William", "Richard", "David", "Charles", "Thomas"]),
    (1950, &["Michael", "James", "Robert", "John", "David", "William", "Mark", "Gary"]),
    (1960, &["Michael", "David", "John", "James", "Robert", "Mark", "Jeffrey", "Scott"]),
    (1970, &["Michael", "Christopher", "Jason", "David", "James", "John", "Brian", "Matthew"]),
    (1980, &["Michael", "Christopher", "Matthew", "Joshua", "David", "Daniel", "James", "Justin"]),
    (1990, &["Michael", "Christopher", "Matthew", "Joshua", "Jacob", "Nicholas", "Andrew", "Tyler"]),
    (2000, &["Jacob", "Michael", "Joshua", "Matthew", "Ethan", "Andrew", "Daniel", "Noah"]),
];

const DECADE_FEMALE: &[(i32, &[&str])] = &[
    (1940, &["Mary", "Linda", "Barbara", "Patricia", "Carol", "Sandra", "Nancy", "Sharon"]),
    (1950, &["Mary", "Linda", "Patricia", "Susan", "Deborah", "Barbara", "Debra", "Karen"]),
    (1960, &["Lisa", "Mary", "Susan", "Karen", "Kimberly", "Patricia", "Linda", "Donna"]),
    (1970, &["Jennifer", "Amy", "Melissa", "Michelle", "Kimberly", "Lisa", "Angela", "Heather"]),
    (1980, &["Jessica", "Jennifer", "Amanda", "Ashley", "Sarah", "Stephanie", "Melissa", "Nicole"]),
    (1990, &["Jessica", "Ashley", "Emily", "Sarah", "Samantha", "Amanda", "Brittany", "Elizabeth"]),
    (2000, &["Emily", "Madison", "Emma", "Olivia", "Hannah", "Abigail", "Isabella", "Samantha"]),
];

const HISPANIC_MALE: &[&str] = &["Jose", "Luis", "Carlos", "Juan", "Miguel", "Antonio", "Francisco", "Alejandro"];
const HISPANIC_FEMALE: &[&str] = &["Maria", "Carmen", "Ana", "Rosa", "Isabella", "Sofia", "Gabriela", "Elena"];
const AFRICAN_MALE: &[&str] = &["Malik", "Jamal", "Darius", "Andre", "Marcus", "Terrell", "Xavier", "Isaiah"];
const AFRICAN_FEMALE: &[&str] = &["Aaliyah", "Imani", "Nia", "Zara", "Amara", "Keisha", "Jada", "Destiny"];
const ASIAN_MALE: &[&str] = &["Wei", "Hiroshi", "Jin", "Raj", "Kenji", "Ming", "Arjun", "Takeshi"];
const ASIAN_FEMALE: &[&str] = &["Mei", "Yuki", "Priya", "Lin", "Sakura", "Ananya", "Hana", "Jia"];
const GENERIC_FIRST: &[&str] = &["Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Avery", "Quinn"];

const SURNAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Nguyen", "Kim", "Chen", "Patel", "Washington",
];

const PREFIXES: &[&str] = &["Dr.", "Rev.", "Hon."];
const MALE_SUFFIXES: &[&str] = &["Jr.", "Sr.", "II", "III", "IV"];
const NICKNAME_MAP: &[(&str, &str)] = &[
    ("Michael", "Mike"),
    ("Christopher", "Chris"),
    ("Matthew", "Matt"),
    ("Joshua", "Josh"),
    ("Robert", "Bob"),
    ("William", "Bill"),
    ("James", "Jim"),
    ("Jennifer", "Jen"),
    ("Jessica", "Jess"),
    ("Elizabeth", "Liz"),
    ("Samantha", "Sam"),
    ("Katherine", "Kate"),
];

pub struct NameInput {
    pub gender: Gender,
    pub birth_year: i32,
    pub age: u32,
    pub marital_status: MaritalStatus,
}

/// A name plus the cultural background it was drawn from.
pub struct NameBundle {
    pub name: PersonName,
    pub cultural_background: CulturalBackground,
}

pub struct NameGenerator;

impl NameGenerator {
    fn decade_pool(gender: Gender, birth_year: i32) -> &'static [&'static str] {
        let table = match gender {
            Gender::Female => DECADE_FEMALE,
            _ => DECADE_MALE,
        };
        let decade = (birth_year / 10) * 10;
        table
            .iter()
            .min_by_key(|(year, _)| (year - decade).abs())
            .map(|(_, names)| *names)
            .unwrap_or(GENERIC_FIRST)
    }

    fn cultural_pool(
        background: CulturalBackground,
        gender: Gender,
    ) -> Option<&'static [&'static str]> {
        match (background, gender) {
            (CulturalBackground::Hispanic, Gender::Female) => Some(HISPANIC_FEMALE),
            (CulturalBackground::Hispanic, _) => Some(HISPANIC_MALE),
            (CulturalBackground::African, Gender::Female) => Some(AFRICAN_FEMALE),
            (CulturalBackground::African, _) => Some(AFRICAN_MALE),
            (CulturalBackground::Asian, Gender::Female) => Some(ASIAN_FEMALE),
            (CulturalBackground::Asian, _) => Some(ASIAN_MALE),
            _ => None,
        }
    }

    fn first_name(
        &self,
        background: CulturalBackground,
        gender: Gender,
        birth_year: i32,
        rng: &mut ChaCha8Rng,
    ) -> String {
        // Decade-popular names dominate; cultural pools carry the rest for
        // non-anglo backgrounds.
        if rng.random_bool(0.70) {
            if let Some(name) = pick(rng, Self::decade_pool(gender, birth_year)) {
                return (*name).to_string();
            }
        }
        if let Some(pool) = Self::cultural_pool(background, gender) {
            if rng.random_bool(0.80) {
                if let Some(name) = pick(rng, pool) {
                    return (*name).to_string();
                }
            }
        }
        pick(rng, GENERIC_FIRST)
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| "Alex".to_string())
    }

    fn last_name(&self, rng: &mut ChaCha8Rng) -> String {
        let base = pick(rng, SURNAMES)
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| "Smith".to_string());
        if rng.random_bool(0.02) {
            let second = pick(rng, SURNAMES)
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| "Jones".to_string());
            format!("{base}-{second}")
        } else {
            base
        }
    }
}

impl DomainGenerator for NameGenerator {
    type Input<'a> = NameInput;
    type Profile = NameBundle;

    fn generate(
        &self,
        input: NameInput,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> NameBundle {
        let background = weighted_choice(rng, BACKGROUND_WEIGHTS)
            .copied()
            .unwrap_or(CulturalBackground::Anglo);

        let first = self.first_name(background, input.gender, input.birth_year, rng);
        let last = self.last_name(rng);

        let middle = if rng.random_bool(0.70) {
            Some(self.first_name(background, input.gender, input.birth_year, rng))
        } else {
            None
        };

        let prefix = if input.age >= 30 && rng.random_bool(0.03) {
            pick(rng, PREFIXES).map(|p| (*p).to_string())
        } else {
            None
        };

        let suffix = if input.gender == Gender::Male && rng.random_bool(0.05) {
            pick(rng, MALE_SUFFIXES).map(|s| (*s).to_string())
        } else {
            None
        };

        let nickname = if rng.random_bool(0.5) {
            NICKNAME_MAP
                .iter()
                .find(|(full, _)| *full == first)
                .map(|(_, nick)| (*nick).to_string())
        } else {
            None
        };

        let married = matches!(
            input.marital_status,
            MaritalStatus::Married | MaritalStatus::Widowed | MaritalStatus::Divorced
        );
        let maiden_name = if input.gender == Gender::Female && married && rng.random_bool(0.30) {
            Some(self.last_name(rng))
        } else {
            None
        };

        let first = vary.introduce_typo(rng, &first);
        let last = vary.introduce_typo(rng, &last);

        NameBundle {
            name: PersonName {
                first,
                middle,
                last,
                prefix,
                suffix,
                nickname,
                maiden_name,
            },
            cultural_background: background,
        }
    }
}
