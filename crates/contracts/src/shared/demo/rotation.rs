//! Persona rotation for demos: switches identity every `period`.
//!
//! Чистая функция от времени, никаких таймеров внутри. Кто и как часто
//! спрашивает `current`, решает хост (gloo-timers во фронтенде, ручные
//! часы в harness).

use chrono::{DateTime, TimeDelta, Utc};

use crate::shared::navigation::PersonaContext;

#[derive(Debug, Clone)]
pub struct PersonaRotation {
    personas: Vec<PersonaContext>,
    period: TimeDelta,
    started_at: DateTime<Utc>,
}

impl PersonaRotation {
    /// A non-positive `period` freezes the rotation on the first persona.
    pub fn new(personas: Vec<PersonaContext>, period: TimeDelta, started_at: DateTime<Utc>) -> Self {
        Self {
            personas,
            period,
            started_at,
        }
    }

    pub fn personas(&self) -> &[PersonaContext] {
        &self.personas
    }

    pub fn index_at(&self, now: DateTime<Utc>) -> Option<usize> {
        if self.personas.is_empty() {
            return None;
        }
        let period_ms = self.period.num_milliseconds();
        let elapsed_ms = (now - self.started_at).num_milliseconds();
        if period_ms <= 0 || elapsed_ms < 0 {
            return Some(0);
        }
        let ticks = (elapsed_ms / period_ms) as usize;
        Some(ticks % self.personas.len())
    }

    pub fn current(&self, now: DateTime<Utc>) -> Option<&PersonaContext> {
        self.index_at(now).map(|i| &self.personas[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::Role;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    fn rotation() -> PersonaRotation {
        PersonaRotation::new(
            vec![
                PersonaContext::new("ana", Role::Compras, "acme"),
                PersonaContext::new("luis", Role::Finanzas, "beta-acme"),
                PersonaContext::new("eva", Role::Admin, "acme"),
            ],
            TimeDelta::seconds(10),
            start(),
        )
    }

    #[test]
    fn test_cycles_by_period() {
        let rotation = rotation();
        let user = |secs| {
            rotation
                .current(start() + TimeDelta::seconds(secs))
                .map(|p| p.user_id.clone())
        };
        assert_eq!(user(0).as_deref(), Some("ana"));
        assert_eq!(user(9).as_deref(), Some("ana"));
        assert_eq!(user(10).as_deref(), Some("luis"));
        assert_eq!(user(25).as_deref(), Some("eva"));
        assert_eq!(user(30).as_deref(), Some("ana"));
    }

    #[test]
    fn test_before_start_and_empty() {
        let rotation = rotation();
        assert_eq!(rotation.index_at(start() - TimeDelta::seconds(5)), Some(0));

        let empty = PersonaRotation::new(Vec::new(), TimeDelta::seconds(10), start());
        assert!(empty.current(start()).is_none());
    }

    #[test]
    fn test_zero_period_is_frozen() {
        let mut rotation = rotation();
        rotation.period = TimeDelta::zero();
        assert_eq!(rotation.index_at(start() + TimeDelta::hours(3)), Some(0));
    }
}
