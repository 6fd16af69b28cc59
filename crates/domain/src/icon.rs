//! Device icon selection by host group.

use std::fmt;

/// One of the fixed icon assets a device can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Pc,
    Switch,
    Server,
    Default,
}

impl IconKind {
    pub const ALL: [Self; 4] = [Self::Pc, Self::Switch, Self::Server, Self::Default];

    /// Resolve the icon from a device's group names.
    ///
    /// Matching is case-insensitive over every group. When several groups
    /// match, PC wins over Switch, which wins over Server.
    pub fn from_group_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let lowered: Vec<String> = names
            .into_iter()
            .map(|name| name.trim().to_lowercase())
            .collect();
        let has = |wanted: &str| lowered.iter().any(|name| name == wanted);

        if has("arm") {
            Self::Pc
        } else if has("switch") {
            Self::Switch
        } else if has("zabbix servers") {
            Self::Server
        } else {
            Self::Default
        }
    }

    /// URL path the asset is served from.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Pc => "/PC.svg",
            Self::Switch => "/Switch.svg",
            Self::Server => "/Server.svg",
            Self::Default => "/Default.svg",
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pc => "pc",
            Self::Switch => "switch",
            Self::Server => "server",
            Self::Default => "default",
        })
    }
}
