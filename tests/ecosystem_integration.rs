//! Integration tests for the ecosystem tick
//!
//! These tests drive the public API end to end:
//! - Forced food spawning under a source that never passes a trial
//! - Death detection and hand-off to the decomposition queue
//! - Soil credit from a full decomposition cycle
//! - Reproduction rate over many trials
//! - Statistics as a pure read

use ecosim::core::config::SimulationConfig;
use ecosim::core::random::{ChaChaSource, ScriptedSource};
use ecosim::core::types::{AgentId, Vec2};
use ecosim::entity::agent::{Agent, DeathCause};
use ecosim::entity::species::Species;
use ecosim::environment::decomposition::DecompositionQueue;
use ecosim::environment::food::FoodKind;
use ecosim::environment::resources::ResourceField;
use ecosim::rules::ruleset::{Mode, RuleKey, RuleValue};
use ecosim::simulation::events::EventKind;
use ecosim::simulation::Ecosystem;

fn quiet_ecosystem() -> Ecosystem {
    Ecosystem::with_random(100.0, 100.0, Mode::Basic, Box::new(ScriptedSource::never()))
}

fn agent_at(species: Species, name: &str, energy: f64, health: f64, x: f64, y: f64) -> Agent {
    let mut agent = Agent::with_vitals(AgentId(0), species, name, energy, health, 0.0);
    agent.position = Vec2::new(x, y);
    agent
}

#[test]
fn test_forced_food_then_quiet_tick() {
    let mut eco = quiet_ecosystem();
    eco.place_agent(agent_at(Species::Herbivore, "Bambi", 80.0, 80.0, 10.0, 10.0));
    eco.place_agent(agent_at(Species::Omnivore, "Yogi", 80.0, 80.0, 20.0, 10.0));

    assert_eq!(eco.add_food(5), 5);
    let report = eco.tick();

    assert_eq!(eco.food().len(), 5, "no natural spawn and nothing in reach");
    assert!(!report.food_spawned);
    assert!(report.disaster.is_none());
    assert_eq!(report.deaths, 0);
    for agent in eco.agents() {
        assert!(agent.alive);
        assert!((agent.age - 0.1).abs() < 1e-12);
    }
}

#[test]
fn test_add_food_respects_capacity() {
    let mut eco = quiet_ecosystem();
    eco.set_rule(RuleKey::MaxFood, RuleValue::Number(3.0)).unwrap();
    assert_eq!(eco.add_food(10), 3);
    assert_eq!(eco.food().len(), 3);
}

#[test]
fn test_death_is_harvested_at_end_of_tick() {
    let mut eco = quiet_ecosystem();
    eco.set_rule(RuleKey::EnergyDecay, RuleValue::Number(10.0)).unwrap();
    eco.place_agent(agent_at(Species::Herbivore, "Doomed", 5.0, 100.0, 50.0, 50.0));

    let report = eco.tick();
    assert_eq!(report.deaths, 1);
    assert!(eco.is_extinct());
    assert_eq!(eco.decomposition().len(), 1);

    let body = &eco.decomposition().bodies()[0];
    assert!(!body.remains.alive);
    assert!(body.remains.energy <= 0.0);
    assert_eq!(body.remains.cause_of_death, Some(DeathCause::Starvation));
    assert_eq!(body.decomposition_progress, 0);
    assert_eq!(body.died_at, 1);

    eco.tick();
    assert_eq!(eco.decomposition().bodies()[0].decomposition_progress, 1);

    assert!(eco
        .events()
        .iter()
        .any(|e| matches!(&e.kind, EventKind::Death { name, .. } if name == "Doomed")));
}

#[test]
fn test_decomposition_credits_24_5_soil() {
    let mut field = ResourceField::new();
    field.soil_nutrition = 50.0;
    let mut queue = DecompositionQueue::new();
    let mut body = Agent::new(AgentId(1), Species::Carnivore, "Simba");
    body.kill(DeathCause::OldAge);
    queue.push(body, 0);

    for tick in 1..20 {
        assert_eq!(queue.advance(&mut field), 0, "still decaying at tick {}", tick);
    }
    assert!((field.soil_nutrition - 59.5).abs() < 1e-9);

    assert_eq!(queue.advance(&mut field), 1);
    assert!(queue.is_empty());
    assert!((field.soil_nutrition - 74.5).abs() < 1e-9);
}

#[test]
fn test_reproduction_rate_is_about_ten_percent() {
    let parent = Agent::with_vitals(AgentId(1), Species::Herbivore, "Fit", 71.0, 76.0, 5.0);
    let mut rng = ChaChaSource::seeded(2024);
    let births = (0..10_000)
        .filter(|_| parent.reproduce(AgentId(2), 70.0, &mut rng).is_some())
        .count();
    assert!(
        (900..=1100).contains(&births),
        "expected ~1000 offspring, got {}",
        births
    );
}

#[test]
fn test_statistics_are_idempotent() {
    let mut eco = Ecosystem::seeded(100.0, 100.0, Mode::Advanced, 11);
    eco.populate_default();
    for _ in 0..50 {
        eco.tick();
    }
    let first = eco.statistics();
    let second = eco.statistics();
    assert_eq!(first, second);
    assert_eq!(first.total, eco.agents().len());
}

#[test]
fn test_living_agents_satisfy_vitals_after_every_tick() {
    let mut eco = Ecosystem::seeded(80.0, 60.0, Mode::Advanced, 99);
    eco.populate_default();
    eco.add_food(30);
    for _ in 0..300 {
        eco.tick();
        for agent in eco.agents() {
            assert!(agent.alive, "dead agents never survive a tick");
            assert!(agent.energy > 0.0 && agent.health > 0.0);
            assert!(agent.age <= agent.max_age);
            assert!(eco.bounds().contains(agent.position));
        }
        let field = eco.resources();
        assert!((0.0..=200.0).contains(&field.soil_nutrition));
        assert!((0.0..=200.0).contains(&field.oxygen_level));
        assert!((0.0..=200.0).contains(&field.water_level));
        assert!(eco.food().len() <= 75, "capacity only ever shrinks");
    }
}

#[test]
fn test_carnivore_hunts_inside_a_tick() {
    let mut eco = quiet_ecosystem();
    let hunter = eco.place_agent(agent_at(Species::Carnivore, "Simba", 60.0, 60.0, 50.0, 50.0));
    let prey = eco.place_agent(agent_at(Species::Herbivore, "Bambi", 60.0, 60.0, 52.0, 52.0));

    let report = eco.tick();
    assert_eq!(report.kills, 1);
    assert_eq!(report.deaths, 1);
    assert!(eco.agent(prey).is_none());
    assert!(eco.agent(hunter).is_some());
    assert_eq!(
        eco.decomposition().bodies()[0].remains.cause_of_death,
        Some(DeathCause::Predation)
    );
}

#[test]
fn test_herbivore_eats_placed_plant() {
    let mut eco = quiet_ecosystem();
    let id = eco.place_agent(agent_at(Species::Herbivore, "Thumper", 50.0, 50.0, 30.0, 30.0));
    eco.place_food(FoodKind::Meat, Vec2::new(31.0, 31.0));
    eco.place_food(FoodKind::Plant, Vec2::new(32.0, 32.0));

    eco.tick();
    assert_eq!(eco.food().len(), 1);
    assert_eq!(eco.food().items()[0].kind, FoodKind::Meat);
    // 50 - 1.6 decay - 0.2 night + 20 food
    let agent = eco.agent(id).unwrap();
    assert!((agent.energy - 68.2).abs() < 1e-9);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut eco = Ecosystem::seeded(100.0, 100.0, Mode::Basic, seed);
        eco.populate_default();
        for _ in 0..200 {
            eco.tick();
        }
        eco.statistics()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn test_from_config_applies_rule_overrides() {
    let config = SimulationConfig::from_toml_str(
        r#"
        width = 40
        height = 30
        mode = "advanced"
        seed = 5

        [rules]
        disaster_chance = 0.0
        maxFood = 10
        "#,
    )
    .unwrap();

    let eco = Ecosystem::from_config(&config).unwrap();
    assert_eq!(eco.mode(), Mode::Advanced);
    assert_eq!(eco.bounds().width, 40.0);
    assert_eq!(eco.rules().disaster_chance, 0.0);
    assert_eq!(eco.rules().max_food, 10.0);
    assert_eq!(eco.rules().energy_decay, 1.5);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimulationConfig {
        width: -1.0,
        ..SimulationConfig::default()
    };
    assert!(Ecosystem::from_config(&config).is_err());
}
