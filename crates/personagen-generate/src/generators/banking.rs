//! Banking profile: accounts sized from income, six months of
//! transactions with a running balance, amortized loans and credit cards.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, sample_distinct, weighted_choice};
use personagen_core::{
    BankAccount, BankAccountType, BankingProfile, CreditCard, Investment, LifestyleCategory, Loan,
    LoanKind, Transaction, TransactionDirection,
};

use super::DomainGenerator;
use crate::variability::Variability;

const BANKS: &[&str] = &[
    "Chase Bank",
    "Bank of America",
    "Wells Fargo",
    "Citibank",
    "PNC Bank",
    "Capital One",
    "TD Bank",
    "US Bank",
    "Regions Bank",
];

const BROKERAGES: &[&str] = &["Fidelity", "Vanguard", "Charles Schwab", "E*TRADE"];

const CARD_ISSUERS: &[&str] = &[
    "Chase",
    "Capital One",
    "Citi",
    "Bank of America",
    "American Express",
];

/// (category, merchants, amount lo, amount hi).
const SPEND_CATEGORIES: &[(&str, &[&str], f64, f64)] = &[
    ("groceries", &["Whole Foods", "Safeway", "Kroger", "Trader Joe's", "Walmart"], 30.0, 150.0),
    ("restaurants", &["Starbucks", "Chipotle", "Olive Garden", "Local Restaurant"], 15.0, 100.0),
    ("utilities", &["City Power & Light", "Verizon", "Comcast", "Water District"], 80.0, 300.0),
    ("transportation", &["Shell", "Chevron", "Uber", "Metro Transit"], 20.0, 100.0),
    ("entertainment", &["Netflix", "Spotify", "AMC Theaters", "Steam"], 15.0, 80.0),
    ("shopping", &["Amazon", "Target", "Best Buy", "Home Depot"], 25.0, 200.0),
    ("healthcare", &["CVS Pharmacy", "Walgreens", "Local Clinic"], 50.0, 300.0),
    ("personal_care", &["Great Clips", "Salon Central"], 20.0, 100.0),
];

/// (symbol, kind) pool for portfolio construction.
const INVESTMENT_SYMBOLS: &[(&str, &str)] = &[
    ("AAPL", "stock"),
    ("MSFT", "stock"),
    ("GOOGL", "stock"),
    ("AMZN", "stock"),
    ("SPY", "etf"),
    ("QQQ", "etf"),
    ("VTI", "etf"),
    ("VTSAX", "mutual_fund"),
    ("FXNAX", "mutual_fund"),
    ("BTC", "crypto"),
    ("ETH", "crypto"),
];

pub struct BankingInput {
    pub age: u32,
    pub annual_income: f64,
    pub credit_score: u16,
    pub lifestyle: LifestyleCategory,
    pub today: NaiveDate,
}

pub struct BankingGenerator;

impl BankingGenerator {
    fn lifestyle_spend_multiplier(lifestyle: LifestyleCategory) -> f64 {
        match lifestyle {
            LifestyleCategory::Minimalist => 0.7,
            LifestyleCategory::Luxury => 1.5,
            _ => 1.0,
        }
    }

    fn monthly_transaction_count(lifestyle: LifestyleCategory, rng: &mut ChaCha8Rng) -> i64 {
        let base = match lifestyle {
            LifestyleCategory::Minimalist => 15,
            LifestyleCategory::Luxury => 40,
            _ => 25,
        };
        (base + rng.random_range(-5..=10)).max(1)
    }

    fn monthly_payment(principal: f64, monthly_rate: f64, term_months: u32) -> f64 {
        if monthly_rate == 0.0 {
            return principal / f64::from(term_months);
        }
        let factor = (1.0 + monthly_rate).powi(term_months as i32);
        principal * monthly_rate * factor / (factor - 1.0)
    }

    fn remaining_balance(
        principal: f64,
        monthly_rate: f64,
        term_months: u32,
        payments_made: u32,
    ) -> f64 {
        if monthly_rate == 0.0 {
            return principal * f64::from(term_months - payments_made) / f64::from(term_months);
        }
        let payment = Self::monthly_payment(principal, monthly_rate, term_months);
        let mut balance = principal;
        for _ in 0..payments_made {
            let interest = balance * monthly_rate;
            balance -= payment - interest;
        }
        balance.max(0.0)
    }

    fn accounts(&self, input: &BankingInput, rng: &mut ChaCha8Rng) -> Vec<BankAccount> {
        let income = input.annual_income.max(12_000.0);
        let primary_bank = pick(rng, BANKS).copied().unwrap_or("Chase Bank");
        let mut accounts = vec![BankAccount {
            bank: primary_bank.to_string(),
            account_type: BankAccountType::Checking,
            balance: rng.random_range(income * 0.1..income * 0.5).round(),
            interest_rate: Some(0.01),
            opened: input.today - Duration::days(rng.random_range(365..3_650)),
        }];
        if rng.random_bool(0.8) {
            accounts.push(BankAccount {
                bank: primary_bank.to_string(),
                account_type: BankAccountType::Savings,
                balance: rng.random_range(income * 0.5..income * 2.0).round(),
                interest_rate: Some(
                    (rng.random_range(0.5..2.5_f64) * 100.0).round() / 100.0,
                ),
                opened: input.today - Duration::days(rng.random_range(365..2_000)),
            });
        }
        if input.annual_income > 75_000.0 && rng.random_bool(0.6) {
            accounts.push(BankAccount {
                bank: pick(rng, BROKERAGES).copied().unwrap_or("Vanguard").to_string(),
                account_type: BankAccountType::Investment,
                balance: rng.random_range(income * 0.5..income * 5.0).round(),
                interest_rate: None,
                opened: input.today - Duration::days(rng.random_range(365..1_825)),
            });
        }
        accounts
    }

    /// Six months of history on the checking account: a salary deposit each
    /// month plus lifestyle-scaled purchases, with a running balance.
    fn transactions(
        &self,
        input: &BankingInput,
        opening_balance: f64,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Transaction> {
        let monthly_income = (input.annual_income / 12.0).round();
        let spend_mult = Self::lifestyle_spend_multiplier(input.lifestyle);
        let start = input.today - Duration::days(180);
        let mut balance = opening_balance;
        let mut transactions = Vec::new();

        for month in 0..6 {
            let month_start = start + Duration::days(30 * month);
            let salary_date = month_start + Duration::days(rng.random_range(1..=5));
            balance += monthly_income;
            transactions.push(Transaction {
                date: salary_date,
                amount: monthly_income,
                category: "salary".to_string(),
                merchant: "Employer".to_string(),
                method: "direct_deposit".to_string(),
                direction: TransactionDirection::Credit,
                balance_after: (balance * 100.0).round() / 100.0,
                recurring: true,
            });

            // Rent or mortgage is the anchor expense of the month.
            let housing = rng.random_range(monthly_income * 0.2..monthly_income * 0.4);
            balance -= housing;
            transactions.push(Transaction {
                date: month_start + Duration::days(rng.random_range(1..=3)),
                amount: (housing * 100.0).round() / 100.0,
                category: "rent_mortgage".to_string(),
                merchant: "Property Management".to_string(),
                method: "online".to_string(),
                direction: TransactionDirection::Debit,
                balance_after: (balance * 100.0).round() / 100.0,
                recurring: true,
            });

            for _ in 0..Self::monthly_transaction_count(input.lifestyle, rng) {
                let (category, merchants, lo, hi) =
                    SPEND_CATEGORIES[rng.random_range(0..SPEND_CATEGORIES.len())];
                let amount = (rng.random_range(lo..hi) * spend_mult * 100.0).round() / 100.0;
                balance -= amount;
                let methods = ["card", "online", "mobile_app"];
                transactions.push(Transaction {
                    date: month_start + Duration::days(rng.random_range(0..30)),
                    amount,
                    category: category.to_string(),
                    merchant: pick(rng, merchants).copied().unwrap_or("Local Shop").to_string(),
                    method: pick(rng, &methods).copied().unwrap_or("card").to_string(),
                    direction: TransactionDirection::Debit,
                    balance_after: (balance * 100.0).round() / 100.0,
                    recurring: category == "utilities",
                });
            }
        }

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    fn investments(&self, input: &BankingInput, rng: &mut ChaCha8Rng) -> Vec<Investment> {
        let chance = if input.annual_income < 50_000.0 || input.age < 25 {
            0.3
        } else if input.annual_income < 100_000.0 {
            0.6
        } else {
            0.8
        };
        if !rng.random_bool(chance) {
            return Vec::new();
        }
        let count = rng.random_range(3..=8);
        (0..count)
            .map(|_| {
                let (symbol, kind) = pick(rng, INVESTMENT_SYMBOLS)
                    .copied()
                    .unwrap_or(("SPY", "etf"));
                let purchase_price = rng.random_range(10.0..500.0);
                let current_price = purchase_price * rng.random_range(0.7..1.5);
                let quantity = (rng.random_range(1.0..100.0_f64) * 100.0).round() / 100.0;
                Investment {
                    symbol: symbol.to_string(),
                    kind: kind.to_string(),
                    quantity,
                    purchase_value: (purchase_price * quantity * 100.0).round() / 100.0,
                    current_value: (current_price * quantity * 100.0).round() / 100.0,
                }
            })
            .collect()
    }

    fn loans(&self, input: &BankingInput, rng: &mut ChaCha8Rng) -> Vec<Loan> {
        let mut loans = Vec::new();
        if input.age > 25 && input.annual_income > 60_000.0 && rng.random_bool(0.4) {
            let terms = [180_u32, 240, 300, 360];
            loans.push(self.loan(
                LoanKind::Mortgage,
                rng.random_range(200_000.0..800_000.0),
                rng.random_range(2.5..6.5),
                pick(rng, &terms).copied().unwrap_or(360),
                input.today,
                rng,
            ));
        }
        if input.age > 18 && rng.random_bool(0.6) {
            let terms = [36_u32, 48, 60, 72];
            loans.push(self.loan(
                LoanKind::Auto,
                rng.random_range(15_000.0..60_000.0),
                rng.random_range(3.0..8.0),
                pick(rng, &terms).copied().unwrap_or(60),
                input.today,
                rng,
            ));
        }
        if input.age < 40 && rng.random_bool(0.3) {
            let terms = [120_u32, 180, 240];
            loans.push(self.loan(
                LoanKind::Student,
                rng.random_range(20_000.0..100_000.0),
                rng.random_range(3.0..7.0),
                pick(rng, &terms).copied().unwrap_or(120),
                input.today,
                rng,
            ));
        }
        loans
    }

    fn loan(
        &self,
        kind: LoanKind,
        principal: f64,
        rate: f64,
        term_months: u32,
        today: NaiveDate,
        rng: &mut ChaCha8Rng,
    ) -> Loan {
        let monthly_rate = rate / 100.0 / 12.0;
        let payments_made = rng.random_range(6..=60).min(term_months);
        Loan {
            kind,
            principal: (principal * 100.0).round() / 100.0,
            remaining_balance: (Self::remaining_balance(
                principal,
                monthly_rate,
                term_months,
                payments_made,
            ) * 100.0)
                .round()
                / 100.0,
            interest_rate: (rate * 100.0).round() / 100.0,
            term_months,
            monthly_payment: (Self::monthly_payment(principal, monthly_rate, term_months)
                * 100.0)
                .round()
                / 100.0,
            originated: today - Duration::days(rng.random_range(365..1_825)),
        }
    }

    fn credit_cards(&self, input: &BankingInput, rng: &mut ChaCha8Rng) -> Vec<CreditCard> {
        let count = if input.annual_income < 50_000.0 || input.credit_score < 650 {
            rng.random_range(1..=2)
        } else if input.annual_income < 100_000.0 {
            rng.random_range(2..=3)
        } else {
            rng.random_range(2..=4)
        };
        let score_mult = if input.credit_score >= 750 {
            1.5
        } else if input.credit_score >= 700 {
            1.2
        } else if input.credit_score >= 650 {
            1.0
        } else {
            0.7
        };
        (0..count)
            .map(|_| {
                let credit_limit = (input.annual_income.max(12_000.0) * 0.2
                    * score_mult
                    * rng.random_range(0.8..1.2))
                .round();
                let balance =
                    (credit_limit * rng.random_range(0.1..0.6) * 100.0).round() / 100.0;
                let fees = [0.0, 95.0, 195.0, 450.0];
                CreditCard {
                    issuer: pick(rng, CARD_ISSUERS).copied().unwrap_or("Chase").to_string(),
                    credit_limit,
                    balance,
                    minimum_payment: (balance * 0.02 * 100.0).round() / 100.0,
                    apr: (rng.random_range(15.0..25.0_f64) * 100.0).round() / 100.0,
                    annual_fee: pick(rng, &fees).copied().unwrap_or(0.0),
                }
            })
            .collect()
    }

    fn financial_goals(age: u32, income: f64, net_worth: f64, rng: &mut ChaCha8Rng) -> Vec<String> {
        let mut goals: Vec<&str> = if age < 30 {
            vec!["Build emergency fund", "Pay off student loans", "Start investing"]
        } else if age < 50 {
            vec![
                "Save for house down payment",
                "Increase retirement savings",
                "Children's education fund",
            ]
        } else {
            vec!["Maximize retirement savings", "Pay off mortgage", "Estate planning"]
        };
        if net_worth < income * 2.0 {
            goals.push("Increase net worth");
        }
        let count = goals.len().min(3);
        sample_distinct(rng, &goals, count)
            .into_iter()
            .map(|goal| (*goal).to_string())
            .collect()
    }

    fn risk_tolerance(age: u32, income: f64, rng: &mut ChaCha8Rng) -> String {
        let choice = if age < 35 && income > 75_000.0 {
            weighted_choice(rng, &[("moderate", 0.5), ("aggressive", 0.5)])
        } else if age > 55 {
            weighted_choice(rng, &[("conservative", 0.5), ("moderate", 0.5)])
        } else {
            Some(&"moderate")
        };
        choice.copied().unwrap_or("moderate").to_string()
    }
}

impl DomainGenerator for BankingGenerator {
    type Input<'a> = BankingInput;
    type Profile = BankingProfile;

    fn generate(
        &self,
        input: BankingInput,
        _vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> BankingProfile {
        let accounts = self.accounts(&input, rng);
        let transactions = self.transactions(&input, accounts[0].balance, rng);
        let investments = self.investments(&input, rng);
        let loans = self.loans(&input, rng);
        let credit_cards = self.credit_cards(&input, rng);

        let assets: f64 = accounts.iter().map(|account| account.balance).sum::<f64>()
            + investments
                .iter()
                .map(|investment| investment.current_value)
                .sum::<f64>();
        let liabilities: f64 = loans.iter().map(|loan| loan.remaining_balance).sum::<f64>()
            + credit_cards.iter().map(|card| card.balance).sum::<f64>();
        let net_worth = ((assets - liabilities) * 100.0).round() / 100.0;

        let financial_goals =
            Self::financial_goals(input.age, input.annual_income, net_worth, rng);
        let risk_tolerance = Self::risk_tolerance(input.age, input.annual_income, rng);

        BankingProfile {
            accounts,
            transactions,
            investments,
            loans,
            credit_cards,
            net_worth,
            financial_goals,
            risk_tolerance,
        }
    }
}
