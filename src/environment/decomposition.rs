//! Decomposition queue - dead agents returning nutrition to the soil
//!
//! Each body trickles 0.5 soil nutrition per tick while it decays and
//! credits a lump 15 on the tick its progress reaches 20, at which point it
//! leaves the queue.

use serde::{Deserialize, Serialize};

use crate::core::constants::{DECOMPOSITION_LUMP, DECOMPOSITION_TICKS, DECOMPOSITION_TRICKLE};
use crate::core::types::Tick;
use crate::entity::agent::Agent;
use crate::environment::resources::ResourceField;

/// A body in the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomposingBody {
    /// Snapshot of the agent at harvest
    pub remains: Agent,
    pub decomposition_progress: u32,
    pub died_at: Tick,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecompositionQueue {
    bodies: Vec<DecomposingBody>,
}

impl DecompositionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[DecomposingBody] {
        &self.bodies
    }

    pub fn push(&mut self, remains: Agent, died_at: Tick) {
        self.bodies.push(DecomposingBody {
            remains,
            decomposition_progress: 0,
            died_at,
        });
    }

    /// Advance every body one tick and credit the soil.
    ///
    /// Returns the number of bodies fully decomposed this tick.
    pub fn advance(&mut self, field: &mut ResourceField) -> usize {
        let before = self.bodies.len();

        self.bodies.retain_mut(|body| {
            body.decomposition_progress += 1;
            if body.decomposition_progress >= DECOMPOSITION_TICKS {
                field.enrich_soil(DECOMPOSITION_LUMP);
                false
            } else {
                field.enrich_soil(DECOMPOSITION_TRICKLE);
                true
            }
        });

        before - self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AgentId;
    use crate::entity::species::Species;

    fn body() -> Agent {
        Agent::new(AgentId(1), Species::Herbivore, "Bambi")
    }

    #[test]
    fn test_body_fully_decomposes_after_20_ticks() {
        let mut queue = DecompositionQueue::new();
        let mut field = ResourceField::new();
        field.soil_nutrition = 50.0;
        queue.push(body(), 3);

        for tick in 1..20 {
            assert_eq!(queue.advance(&mut field), 0, "tick {}", tick);
            assert_eq!(queue.bodies()[0].decomposition_progress, tick);
        }
        assert!((field.soil_nutrition - 59.5).abs() < 1e-9);

        assert_eq!(queue.advance(&mut field), 1);
        assert!(queue.is_empty());
        assert!((field.soil_nutrition - 74.5).abs() < 1e-9);
    }

    #[test]
    fn test_every_body_advances_each_tick() {
        let mut queue = DecompositionQueue::new();
        let mut field = ResourceField::new();
        queue.push(body(), 0);
        for _ in 0..19 {
            queue.advance(&mut field);
        }
        queue.push(body(), 19);
        queue.push(body(), 19);

        // First body completes; the two fresh ones both advance to 1
        assert_eq!(queue.advance(&mut field), 1);
        assert_eq!(queue.len(), 2);
        assert!(queue.bodies().iter().all(|b| b.decomposition_progress == 1));
    }

    #[test]
    fn test_soil_credit_respects_ceiling() {
        let mut queue = DecompositionQueue::new();
        let mut field = ResourceField::new();
        field.soil_nutrition = 199.8;
        queue.push(body(), 0);
        queue.advance(&mut field);
        assert_eq!(field.soil_nutrition, 200.0);
    }
}
