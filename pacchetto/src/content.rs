//! Content categories and packaging modes.

use std::fmt;
use std::str::FromStr;

/// A category of game content packaged alongside the server files.
///
/// The set is fixed; categories are always processed in [`ContentCategory::ALL`]
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCategory {
    Tracks,
    Cars,
    Weather,
}

impl ContentCategory {
    /// Every category, in processing order.
    pub const ALL: [ContentCategory; 3] = [
        ContentCategory::Tracks,
        ContentCategory::Cars,
        ContentCategory::Weather,
    ];

    /// Directory name of the category beneath `content/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Tracks => "tracks",
            Self::Cars => "cars",
            Self::Weather => "weather",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tracks" => Ok(Self::Tracks),
            "cars" => Ok(Self::Cars),
            "weather" => Ok(Self::Weather),
            other => Err(format!("unknown content category '{}'", other)),
        }
    }
}

/// How content files are copied into the staging tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Copy every file.
    Full,
    /// Copy only the configuration and compiled data files a server reads.
    #[default]
    Selective,
}

impl fmt::Display for CopyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Selective => write!(f, "selective"),
        }
    }
}

impl FromStr for CopyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "selective" => Ok(Self::Selective),
            other => Err(format!("unknown copy mode '{}'", other)),
        }
    }
}

/// Package topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageMode {
    /// One archive holding the server and every content category.
    #[default]
    Phat,
    /// A directory with one server archive plus one archive per category.
    Distributed,
}

impl fmt::Display for PackageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phat => write!(f, "phat"),
            Self::Distributed => write!(f, "distributed"),
        }
    }
}

impl FromStr for PackageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phat" => Ok(Self::Phat),
            "distributed" => Ok(Self::Distributed),
            other => Err(format!("unknown package mode '{}'", other)),
        }
    }
}
