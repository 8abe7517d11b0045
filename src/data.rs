//! Test-data loading
//!
//! Flat records read from the data directory and handed to parametrized
//! cases. Users and checkout forms ship as JSON, the product catalog as CSV;
//! both formats deserialize into typed records. Loads are read-only and
//! idempotent. A missing file or missing required field surfaces as
//! `DataFormat`, which aborts the affected suite at collection time.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::SuiteError;

/// Login credentials expected to succeed.
#[derive(Clone, Debug, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

/// Credentials expected to fail, with the exact error the application shows.
#[derive(Clone, Debug, Deserialize)]
pub struct InvalidUserRecord {
    pub username: String,
    pub password: String,
    pub error: String,
}

/// One catalog product as displayed on the inventory page.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
}

/// A complete checkout information form.
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutRecord {
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
}

/// An incomplete checkout form and the error it must provoke.
#[derive(Clone, Debug, Deserialize)]
pub struct InvalidCheckoutRecord {
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub error: String,
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    valid_users: Vec<UserRecord>,
    invalid_users: Vec<InvalidUserRecord>,
}

#[derive(Debug, Deserialize)]
struct CheckoutFile {
    valid: Vec<CheckoutRecord>,
    invalid: Vec<InvalidCheckoutRecord>,
}

pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn valid_users(&self) -> Result<Vec<UserRecord>, SuiteError> {
        let file: UsersFile = self.load_json("users.json")?;
        Ok(file.valid_users)
    }

    pub fn invalid_users(&self) -> Result<Vec<InvalidUserRecord>, SuiteError> {
        let file: UsersFile = self.load_json("users.json")?;
        Ok(file.invalid_users)
    }

    pub fn products(&self) -> Result<Vec<ProductRecord>, SuiteError> {
        self.load_csv("products.csv")
    }

    pub fn checkout_data(&self) -> Result<Vec<CheckoutRecord>, SuiteError> {
        let file: CheckoutFile = self.load_json("checkout.json")?;
        Ok(file.valid)
    }

    pub fn invalid_checkout_data(&self) -> Result<Vec<InvalidCheckoutRecord>, SuiteError> {
        let file: CheckoutFile = self.load_json("checkout.json")?;
        Ok(file.invalid)
    }

    /// Deserialize a whole JSON file into `T`.
    pub fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T, SuiteError> {
        let path = self.data_dir.join(filename);
        debug!(path = %path.display(), "loading json test data");
        let raw = read_file(&path, filename)?;
        serde_json::from_str(&raw).map_err(|err| SuiteError::data_format(filename, err.to_string()))
    }

    /// Deserialize every row of a headered CSV file into `T`.
    pub fn load_csv<T: DeserializeOwned>(&self, filename: &str) -> Result<Vec<T>, SuiteError> {
        let path = self.data_dir.join(filename);
        debug!(path = %path.display(), "loading csv test data");
        let raw = read_file(&path, filename)?;
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: T =
                row.map_err(|err| SuiteError::data_format(filename, err.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }
}

fn read_file(path: &Path, filename: &str) -> Result<String, SuiteError> {
    fs::read_to_string(path).map_err(|err| {
        SuiteError::data_format(filename, format!("{err} ({})", path.display()))
    })
}
