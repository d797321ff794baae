//! Demo selection from the page URL, e.g. `?demo=wave&seed=7&count=400`.

use std::fmt;
use std::str::FromStr;

use crate::error::{DemoError, DemoResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DemoKind {
    /// Wireframe polyhedra breathing on a sphere
    #[default]
    Swarm,
    /// Grid of cubes with a radial wave
    Wave,
    /// Rings of shapes orbiting inside a draggable group
    Orbit,
    /// A handful of large floating shapes
    Monoliths,
    /// Double helix of small shapes
    Helix,
}

impl DemoKind {
    pub const ALL: [DemoKind; 5] = [
        DemoKind::Swarm,
        DemoKind::Wave,
        DemoKind::Orbit,
        DemoKind::Monoliths,
        DemoKind::Helix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DemoKind::Swarm => "swarm",
            DemoKind::Wave => "wave",
            DemoKind::Orbit => "orbit",
            DemoKind::Monoliths => "monoliths",
            DemoKind::Helix => "helix",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| DemoError::UnknownDemo(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DemoConfig {
    pub kind: DemoKind,
    /// Fixed RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Population override, clamped per demo
    pub count: Option<usize>,
}

impl DemoConfig {
    pub fn new(kind: DemoKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Parse a URL query string. A leading `?` is accepted, unknown keys
    /// are ignored and empty values count as absent.
    pub fn from_query(query: &str) -> DemoResult<Self> {
        let mut config = DemoConfig::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if value.is_empty() {
                continue;
            }
            match key {
                "demo" => config.kind = value.parse()?,
                "seed" => config.seed = Some(parse_number("seed", value)?),
                "count" => config.count = Some(parse_number("count", value)?),
                _ => log::debug!("ignoring query parameter `{}`", key),
            }
        }
        Ok(config)
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> DemoResult<T> {
    value.parse().map_err(|_| DemoError::InvalidParameter {
        name,
        value: value.to_string(),
    })
}
