/// Level table, ascending by threshold. The first tier starts at zero, so
/// every point total resolves to some level.
pub static LEVELS: &[Level] = &[
    Level {
        tier: 1,
        name: "Buscador",
        threshold: 0,
        icon: "🔍",
    },
    Level {
        tier: 2,
        name: "Estudiante",
        threshold: 300,
        icon: "📚",
    },
    Level {
        tier: 3,
        name: "Conocedor",
        threshold: 600,
        icon: "💡",
    },
    Level {
        tier: 4,
        name: "Guerrero",
        threshold: 1000,
        icon: "⚔️",
    },
    Level {
        tier: 5,
        name: "Guardián",
        threshold: 1500,
        icon: "🛡️",
    },
    Level {
        tier: 6,
        name: "Maestro",
        threshold: 2000,
        icon: "⭐",
    },
    Level {
        tier: 7,
        name: "Iluminado",
        threshold: 2500,
        icon: "✨",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    tier: u32,
    name: &'static str,
    threshold: u32,
    icon: &'static str,
}

impl Level {
    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Id of the badge granted when this tier is reached.
    pub fn badge_id(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Tiers whose threshold the given point total has reached.
pub fn reached(total_points: u32) -> impl Iterator<Item = &'static Level> {
    LEVELS.iter().filter(move |l| l.threshold <= total_points)
}

/// Where a point total sits in the level ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStatus {
    current: &'static Level,
    next_threshold: u32,
    progress_percent: f64,
}

impl LevelStatus {
    pub fn current(&self) -> &'static Level {
        self.current
    }

    pub fn next_threshold(&self) -> u32 {
        self.next_threshold
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn at_max_tier(&self) -> bool {
        self.next_threshold <= self.current.threshold
    }
}

/// Resolve the current level: the highest tier whose threshold the total
/// has reached (inclusive at the boundary).
///
/// At or beyond the top tier the next threshold saturates to the total
/// itself and progress reports as 100 rather than dividing by zero.
pub fn resolve_level(total_points: u32) -> LevelStatus {
    let current = LEVELS
        .iter()
        .rev()
        .find(|l| l.threshold <= total_points)
        .unwrap_or(&LEVELS[0]);

    let next_threshold = LEVELS
        .iter()
        .map(|l| l.threshold)
        .find(|t| *t > total_points)
        .unwrap_or(total_points);

    let span = next_threshold.saturating_sub(current.threshold);
    let progress_percent = if span == 0 {
        100.0
    } else {
        let into = (total_points - current.threshold) as f64;
        (100.0 * into / span as f64).clamp(0.0, 100.0)
    };

    LevelStatus {
        current,
        next_threshold,
        progress_percent,
    }
}
