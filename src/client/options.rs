use std::fmt;
use std::str::FromStr;

/// The query parameters the check endpoint understands.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    AccessKey,
    Format,
    Smtp,
    CatchAll,
}

impl OptionKey {
    /// Order in which the parameters are written to the query string.
    pub const ALL: [OptionKey; 4] = [
        OptionKey::AccessKey,
        OptionKey::Format,
        OptionKey::Smtp,
        OptionKey::CatchAll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessKey => "access_key",
            Self::Format => "format",
            Self::Smtp => "smtp",
            Self::CatchAll => "catch_all",
        }
    }
}

impl FromStr for OptionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access_key" => Ok(Self::AccessKey),
            "format" => Ok(Self::Format),
            "smtp" => Ok(Self::Smtp),
            "catch_all" => Ok(Self::CatchAll),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query parameter value. Booleans are rendered as `1`/`0`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("1"),
            Self::Bool(false) => f.write_str("0"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Current values of the four recognised API options.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOptions {
    access_key: OptionValue,
    format: OptionValue,
    smtp: OptionValue,
    catch_all: OptionValue,
}

impl ApiOptions {
    pub(crate) fn new(
        access_key: &str,
        smtp_check: bool,
        pretty_format: bool,
        catch_all_check: bool,
    ) -> Self {
        Self {
            access_key: OptionValue::from(access_key),
            format: OptionValue::Int(i64::from(pretty_format)),
            smtp: OptionValue::Int(i64::from(smtp_check)),
            catch_all: OptionValue::Int(i64::from(catch_all_check)),
        }
    }

    pub fn get(&self, key: OptionKey) -> &OptionValue {
        match key {
            OptionKey::AccessKey => &self.access_key,
            OptionKey::Format => &self.format,
            OptionKey::Smtp => &self.smtp,
            OptionKey::CatchAll => &self.catch_all,
        }
    }

    /// Looks an option up by its query parameter name.
    pub fn get_by_name(&self, name: &str) -> Option<&OptionValue> {
        name.parse().ok().map(|key| self.get(key))
    }

    pub(crate) fn set(&mut self, key: OptionKey, value: OptionValue) {
        let slot = match key {
            OptionKey::AccessKey => &mut self.access_key,
            OptionKey::Format => &mut self.format,
            OptionKey::Smtp => &mut self.smtp,
            OptionKey::CatchAll => &mut self.catch_all,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &OptionValue)> + '_ {
        OptionKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}
