//! City name type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid city name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid city: {reason}")]
pub struct InvalidCity {
    reason: &'static str,
}

/// A city that flight segments depart from or arrive at.
///
/// Names are stored trimmed of surrounding whitespace and compared exactly,
/// so `"Moscow"` and `"moscow"` are different cities. Any `City` value is
/// non-empty by construction.
///
/// # Examples
///
/// ```
/// use flight_server::domain::City;
///
/// let city = City::parse("  Kazan ").unwrap();
/// assert_eq!(city.as_str(), "Kazan");
///
/// // Blank names are rejected
/// assert!(City::parse("").is_err());
/// assert!(City::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct City(String);

impl City {
    /// Parse a city name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidCity> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidCity {
                reason: "city name cannot be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidCity {
                reason: "city name cannot contain control characters",
            });
        }

        Ok(City(trimmed.to_string()))
    }

    /// Returns the city name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for City {
    type Error = InvalidCity;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        City::parse(&s)
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.0
    }
}

impl fmt::Debug for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City({})", self.0)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
