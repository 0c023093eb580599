/// Bip court joué à chaque seconde du compte à rebours.
///
/// Sinusoïde dont le gain suit une rampe exponentielle de `start_gain` à
/// `end_gain` sur toute la durée.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTone {
    pub frequency: f32,
    pub duration_secs: f32,
    pub start_gain: f32,
    pub end_gain: f32,
}

impl Default for TickTone {
    fn default() -> Self {
        Self {
            frequency: 880.0, // La5
            duration_secs: 0.1,
            start_gain: 0.05,
            end_gain: 0.001,
        }
    }
}

impl TickTone {
    pub fn gain_at(&self, t: f32) -> f32 {
        let progress = (t / self.duration_secs).clamp(0.0, 1.0);
        self.start_gain * (self.end_gain / self.start_gain).powf(progress)
    }

    /// Synthétise le bip en frames stéréo au taux `sample_rate`.
    pub fn render(&self, sample_rate: u32) -> Vec<[f32; 2]> {
        let n = (self.duration_secs * sample_rate as f32).round() as usize;
        let sr = sample_rate as f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / sr;
                let s = (std::f32::consts::TAU * self.frequency * t).sin() * self.gain_at(t);
                [s, s]
            })
            .collect()
    }
}
