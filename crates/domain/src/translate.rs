use std::fmt;

/// Produces display text for a translation key.
///
/// The analysis functions never contain display text themselves. They select a key such as
/// `planAnalysis.lowWeeklyVolume` and pass the numeric or textual values the message needs.
pub trait Translate {
    fn translate(&self, key: &str, params: &[(&str, Param)]) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &[(&str, Param)]) -> String,
{
    fn translate(&self, key: &str, params: &[(&str, Param)]) -> String {
        self(key, params)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Param {
    Int(u32),
    Number(f32),
    Text(String),
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(value)
    }
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Number(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(value) => write!(f, "{value}"),
            Param::Number(value) => write!(f, "{value}"),
            Param::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Renders `key{name=value,...}`, which makes the selected key and its parameters visible
/// in test assertions.
#[cfg(test)]
pub(crate) fn echo(key: &str, params: &[(&str, Param)]) -> String {
    if params.is_empty() {
        return key.to_string();
    }
    format!(
        "{key}{{{}}}",
        params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(",")
    )
}
