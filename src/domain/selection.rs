use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Query parameter carrying the selected album ids
pub const ALBUMS_PARAM: &str = "albums";

/// Album ids chosen by the player, round-tripped as `albums=a,b,c`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSelection(Vec<String>);

impl AlbumSelection {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Parses the comma separated value of the `albums` parameter.
    /// Blank entries are dropped.
    pub fn parse(param: Option<&str>) -> Self {
        let Some(param) = param else {
            return Self::default();
        };
        Self(
            param
                .split(',')
                .filter(|id| !id.trim().is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `albums=a,b,c`, or an empty string when nothing is selected
    pub fn to_query_param(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{ALBUMS_PARAM}={self}")
    }
}

impl Display for AlbumSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}
