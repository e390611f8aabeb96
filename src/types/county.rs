use serde::Serialize;

/// A prefecture ("county") listed on the site's top-level page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct County {
    /// Identifier used as the `Pref` parameter of the station list page (e.g. "13").
    pub id: String,
    /// Display name, as published (e.g. "東京都").
    pub name: String,
}
