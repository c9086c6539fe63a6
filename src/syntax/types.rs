/// Character repertoire accepted by the local pre-check.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyntaxMode {
    /// ASCII addresses only.
    #[default]
    Ascii,
    /// Also accepts UTF-8 local parts and IDN hostnames.
    Unicode,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxReport {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl SyntaxReport {
    pub(crate) fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
        }
    }
}
