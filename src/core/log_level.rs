//! Log level definitions

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Severity of a record.
///
/// Levels are plain signed ordinals. The four named levels leave gaps so that
/// applications can define their own levels in between, e.g. `LogLevel(4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogLevel(pub i8);

impl LogLevel {
    pub const DEBUG: LogLevel = LogLevel(-8);
    pub const INFO: LogLevel = LogLevel(0);
    pub const WARN: LogLevel = LogLevel(8);
    pub const ERROR: LogLevel = LogLevel(16);

    /// Name of a named level, `None` for custom ones.
    pub fn to_str(&self) -> Option<&'static str> {
        match *self {
            LogLevel::DEBUG => Some("DEBUG"),
            LogLevel::INFO => Some("INFO"),
            LogLevel::WARN => Some("WARN"),
            LogLevel::ERROR => Some("ERROR"),
            _ => None,
        }
    }

    #[inline]
    pub fn value(&self) -> i8 {
        self.0
    }
}

impl From<i8> for LogLevel {
    fn from(value: i8) -> Self {
        LogLevel(value)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&LevelNames::default().name(*self))
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::DEBUG),
            "INFO" => Ok(LogLevel::INFO),
            "WARN" | "WARNING" => Ok(LogLevel::WARN),
            "ERROR" => Ok(LogLevel::ERROR),
            other => {
                let invalid = || format!("Invalid log level: '{}'", s);
                if let Some((base, offset)) = other.split_once('+') {
                    let base: LogLevel = base.parse()?;
                    let offset: i16 = offset.parse().map_err(|_| invalid())?;
                    return i8::try_from(i16::from(base.0) + offset)
                        .map(LogLevel)
                        .map_err(|_| invalid());
                }
                other.parse::<i8>().map(LogLevel).map_err(|_| invalid())
            }
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_str() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_i8(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Number(i8),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(LogLevel(n)),
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Table mapping levels to the names written under the severity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<i8, String>", into = "BTreeMap<i8, String>")]
pub struct LevelNames {
    names: BTreeMap<LogLevel, String>,
}

impl LevelNames {
    /// An empty table; every level renders as its number.
    pub fn empty() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, level: LogLevel, name: impl Into<String>) -> Self {
        self.names.insert(level, name.into());
        self
    }

    pub fn insert(&mut self, level: LogLevel, name: impl Into<String>) {
        self.names.insert(level, name.into());
    }

    pub fn get(&self, level: LogLevel) -> Option<&str> {
        self.names.get(&level).map(String::as_str)
    }

    /// Render a level for output.
    ///
    /// Exact matches use the table name. A level between two named ones is
    /// rendered relative to the closest named level below it (`INFO+4`).
    /// Levels below every named level use the lowest name.
    pub fn name(&self, level: LogLevel) -> String {
        if let Some(name) = self.names.get(&level) {
            return name.clone();
        }

        match self.names.range(..level).next_back() {
            Some((base, name)) => format!("{}+{}", name, i16::from(level.0) - i16::from(base.0)),
            None => match self.names.values().next() {
                Some(lowest) => lowest.clone(),
                None => level.0.to_string(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<BTreeMap<i8, String>> for LevelNames {
    fn from(raw: BTreeMap<i8, String>) -> Self {
        Self {
            names: raw.into_iter().map(|(k, v)| (LogLevel(k), v)).collect(),
        }
    }
}

impl From<LevelNames> for BTreeMap<i8, String> {
    fn from(names: LevelNames) -> Self {
        names.names.into_iter().map(|(k, v)| (k.0, v)).collect()
    }
}

impl Default for LevelNames {
    fn default() -> Self {
        Self::empty()
            .with(LogLevel::DEBUG, "DEBUG")
            .with(LogLevel::INFO, "INFO")
            .with(LogLevel::WARN, "WARN")
            .with(LogLevel::ERROR, "ERROR")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_numeric() {
        assert!(LogLevel::DEBUG < LogLevel::INFO);
        assert!(LogLevel::INFO < LogLevel::WARN);
        assert!(LogLevel::WARN < LogLevel::ERROR);
        assert!(LogLevel(-128) < LogLevel::DEBUG);
        assert!(LogLevel(4) > LogLevel::INFO && LogLevel(4) < LogLevel::WARN);
    }

    #[test]
    fn test_default_names() {
        let names = LevelNames::default();
        assert_eq!(names.name(LogLevel::DEBUG), "DEBUG");
        assert_eq!(names.name(LogLevel::INFO), "INFO");
        assert_eq!(names.name(LogLevel::WARN), "WARN");
        assert_eq!(names.name(LogLevel::ERROR), "ERROR");
    }

    #[test]
    fn test_custom_levels_fall_back() {
        let names = LevelNames::default();
        assert_eq!(names.name(LogLevel(4)), "INFO+4");
        assert_eq!(names.name(LogLevel(127)), "ERROR+111");
        assert_eq!(names.name(LogLevel(-128)), "DEBUG");
        assert_eq!(LevelNames::empty().name(LogLevel(3)), "3");
    }

    #[test]
    fn test_parse() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::DEBUG);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::WARN);
        assert_eq!("-3".parse::<LogLevel>().unwrap(), LogLevel(-3));
        assert_eq!("INFO+4".parse::<LogLevel>().unwrap(), LogLevel(4));
        assert!("verbose".parse::<LogLevel>().is_err());
        assert!("ERROR+200".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&LogLevel::WARN).unwrap(), "\"WARN\"");
        let level: LogLevel = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(level, LogLevel::ERROR);
        let level: LogLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level, LogLevel(4));
        assert_eq!(serde_json::to_string(&LogLevel(-128)).unwrap(), "-128");
    }

    #[test]
    fn test_level_names_serde() {
        let names = LevelNames::default().with(LogLevel(4), "NOTICE");
        let json = serde_json::to_string(&names).unwrap();
        let back: LevelNames = serde_json::from_str(&json).unwrap();
        assert_eq!(back, names);
        assert_eq!(back.get(LogLevel(4)), Some("NOTICE"));
    }
}
