use itertools::Itertools;
use log::info;
use std::fmt;
use std::time::{Duration, SystemTime};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Temps restant découpé en unités affichables (arrondi inférieur).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl From<Duration> for Breakdown {
    fn from(remaining: Duration) -> Self {
        let total = remaining.as_secs();
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }
}

impl fmt::Display for Breakdown {
    /// `DD:HH:MM:SS`, chaque champ sur au moins deux chiffres.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = [self.days, self.hours, self.minutes, self.seconds]
            .iter()
            .map(|v| format!("{:02}", v))
            .join(":");
        f.write_str(&text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Affichage rafraîchi, même seconde qu'à la mise à jour précédente.
    Tick(Breakdown),
    /// Le chiffre des secondes a changé.
    Pulse(Breakdown),
    /// La cible vient d'être dépassée (une seule fois).
    Celebrate,
    Finished,
}

/// Compte à rebours vers un instant cible.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: SystemTime,
    last_seconds: Option<u64>,
    celebrated: bool,
}

impl Countdown {
    pub fn new(target: SystemTime) -> Self {
        Self {
            target,
            last_seconds: None,
            celebrated: false,
        }
    }

    pub fn starting_at(now: SystemTime, length: Duration) -> Self {
        Self::new(now + length)
    }

    pub fn target(&self) -> SystemTime {
        self.target
    }

    /// Temps restant, ramené à zéro une fois la cible passée.
    pub fn remaining(&self, now: SystemTime) -> Duration {
        self.target.duration_since(now).unwrap_or(Duration::ZERO)
    }

    pub fn breakdown(&self, now: SystemTime) -> Breakdown {
        Breakdown::from(self.remaining(now))
    }

    pub fn is_over(&self, now: SystemTime) -> bool {
        now >= self.target
    }

    pub fn update(&mut self, now: SystemTime) -> CountdownEvent {
        if self.is_over(now) {
            if self.celebrated {
                return CountdownEvent::Finished;
            }
            self.celebrated = true;
            info!("🎉 Happy New Year! 🎉");
            return CountdownEvent::Celebrate;
        }

        let breakdown = self.breakdown(now);
        let previous = self.last_seconds.replace(breakdown.seconds);
        match previous {
            Some(s) if s != breakdown.seconds => CountdownEvent::Pulse(breakdown),
            _ => CountdownEvent::Tick(breakdown),
        }
    }
}
