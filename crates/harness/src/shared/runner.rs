//! Прогон сценария: каждая строка = одно разрешение навигации.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use contracts::shared::demo::PersonaRotation;
use contracts::shared::navigation::{
    execute, ActiveNavigation, Clock, FlagRegistry, ManualClock, NavigationCatalog,
    NavigationRequest, PersonaContext, Resolver, TerminalAction, ViewKey,
};
use serde::Serialize;

use super::config::Config;

/// One JSON line of harness output.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub at: String,
    pub location: String,
    pub persona: Option<PersonaContext>,
    pub action: Option<TerminalAction>,
    pub active: ActiveNavigation,
}

pub struct Harness {
    catalog: NavigationCatalog,
    flags: FlagRegistry,
    views: BTreeSet<ViewKey>,
    rotation: PersonaRotation,
    clock: ManualClock,
    step: TimeDelta,
}

impl Harness {
    pub fn new(catalog: NavigationCatalog, flags: FlagRegistry, config: &Config) -> anyhow::Result<Self> {
        let started_at: DateTime<Utc> =
            DateTime::parse_from_rfc3339(&config.rotation.started_at)?.with_timezone(&Utc);

        let unbound: BTreeSet<ViewKey> = config
            .views
            .unbound
            .iter()
            .map(|v| ViewKey::from(v.as_str()))
            .collect();
        let views = catalog
            .views()
            .into_iter()
            .filter(|v| !unbound.contains(*v))
            .cloned()
            .collect();

        let rotation = PersonaRotation::new(
            config.personas.clone(),
            TimeDelta::seconds(config.rotation.period_secs),
            started_at,
        );

        Ok(Self {
            catalog,
            flags,
            views,
            rotation,
            clock: ManualClock::new(started_at),
            step: TimeDelta::milliseconds(config.script.step_ms),
        })
    }

    /// Resolves `location` for the persona on duty, then advances the clock.
    pub fn step(&self, location: &str) -> StepReport {
        let now = self.clock.now();
        let request = NavigationRequest::parse(location);
        let persona = self.rotation.current(now).cloned();

        let (action, active) = match &persona {
            Some(ctx) => {
                let resolver = Resolver::new(&self.catalog, &self.flags, &self.views);
                let action = execute(resolver.resolve(&request, ctx));
                let active = self.catalog.active_navigation(&request, &self.flags, ctx);
                (Some(action), active)
            }
            None => {
                tracing::warn!("No personas configured, skipping {}", location);
                (None, ActiveNavigation::default())
            }
        };

        self.clock.advance(self.step);

        StepReport {
            at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            location: location.to_string(),
            persona,
            action,
            active,
        }
    }

    pub fn run<'l>(&self, locations: impl IntoIterator<Item = &'l str>) -> Vec<StepReport> {
        locations.into_iter().map(|l| self.step(l)).collect()
    }
}
