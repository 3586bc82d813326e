use std::fmt;
use std::str::FromStr;

/// The detection backends this crate ships with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Local cascade classifier.
    Haar,
    /// Azure Computer Vision analyze API.
    Azure,
}

impl BackendKind {
    pub const ALL: &'static [BackendKind] = &[BackendKind::Haar, BackendKind::Azure];

    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Haar => "haar",
            BackendKind::Azure => "azure",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BackendKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let options: Vec<&str> = BackendKind::ALL.iter().map(|k| k.name()).collect();
                format!(
                    "Unknown detection type '{s}' (options: {})",
                    options.join(", ")
                )
            })
    }
}
