use std::collections::BTreeMap;
use std::time::Duration;

/// Identifiant d'un timer planifié, utilisable pour l'annuler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// File de timers à usage unique, pilotée par le moteur.
///
/// Les échéances sont des instants relatifs à l'horloge de l'hôte (celle passée
/// à `frame(now)`). Deux timers de même échéance sortent dans l'ordre de
/// planification.
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: BTreeMap<(Duration, TimerId), T>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, due: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((due, id), task);
        id
    }

    /// Annule un timer ; renvoie la tâche s'il était encore en attente.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let key = self.pending.keys().find(|(_, k)| *k == id).copied()?;
        self.pending.remove(&key)
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Retire et renvoie, dans l'ordre d'échéance, les tâches arrivées à terme.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
