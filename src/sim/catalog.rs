//! Vehicle archetypes and the catalog that hands them out
//!
//! Archetypes are immutable once registered and shared by every competitor
//! that drives one. The catalog also owns the two sequences that must not
//! leak between sessions: archetype ids and CPU names.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::consts::{ARCHETYPE_ID_END, ARCHETYPE_ID_START};
use crate::error::CatalogError;

/// Display color as linear RGB
pub type Color = [f32; 3];

/// Catalog-scoped archetype identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArchetypeId(pub u32);

/// Raw stat block for one vehicle preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    /// Drive torque (N)
    pub torque: f32,
    /// Top forward speed (m/s)
    pub max_speed: f32,
    /// Turn rate (rad/s)
    pub turn_rate: f32,
    /// Mass (kg)
    pub mass: f32,
    /// Pseudo-restitution, multiplied with the other body's on contact
    pub restitution: f32,
    /// Collision radius (m)
    pub size: f32,
    pub color: Color,
}

impl ArchetypeStats {
    /// The stock bit car with the given paint
    pub const fn stock(color: Color) -> Self {
        Self {
            torque: 600.0,
            max_speed: 12.0,
            turn_rate: 5.0,
            mass: 50.0,
            restitution: 0.6,
            size: 1.0,
            color,
        }
    }
}

/// Presets shipped with the game: five stock cars in different colors
pub const DEFAULT_PRESETS: [ArchetypeStats; 5] = [
    ArchetypeStats::stock([0.0, 1.0, 0.0]),
    ArchetypeStats::stock([0.0, 1.0, 1.0]),
    ArchetypeStats::stock([1.0, 1.0, 0.0]),
    ArchetypeStats::stock([0.0, 0.0, 1.0]),
    ArchetypeStats::stock([1.0, 1.0, 1.0]),
];

/// A registered vehicle archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: ArchetypeId,
    pub stats: ArchetypeStats,
}

impl Archetype {
    #[inline]
    pub fn torque(&self) -> f32 {
        self.stats.torque
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.stats.max_speed
    }

    #[inline]
    pub fn turn_rate(&self) -> f32 {
        self.stats.turn_rate
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.stats.mass
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.stats.restitution
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.stats.size
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.stats.color
    }

    /// Linear acceleration the engine can deliver (torque / mass)
    #[inline]
    pub fn drive_accel(&self) -> f32 {
        self.stats.torque / self.stats.mass
    }
}

/// Hands out archetype ids from a bounded range
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
    start: u32,
    end: u32,
}

impl IdAllocator {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            next: start,
            start,
            end,
        }
    }

    pub fn allocate(&mut self) -> Result<ArchetypeId, CatalogError> {
        if self.next >= self.end {
            return Err(CatalogError::IdSpaceExhausted {
                start: self.start,
                end: self.end,
            });
        }
        let id = self.next;
        self.next += 1;
        Ok(ArchetypeId(id))
    }

    /// Ids still available
    pub fn remaining(&self) -> u32 {
        self.end.saturating_sub(self.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(ARCHETYPE_ID_START, ARCHETYPE_ID_END)
    }
}

/// CPU1, CPU2, ... numbering for autopilot competitors
#[derive(Debug, Clone)]
pub struct CpuNames {
    next: u32,
}

impl CpuNames {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_name(&mut self) -> String {
        let name = format!("CPU{}", self.next);
        self.next += 1;
        name
    }

    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for CpuNames {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of archetypes plus the per-session naming sequences
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ids: IdAllocator,
    archetypes: Vec<Arc<Archetype>>,
    cpu_names: CpuNames,
}

impl Catalog {
    /// Empty catalog over the given id range
    pub fn with_id_range(start: u32, end: u32) -> Self {
        Self {
            ids: IdAllocator::new(start, end),
            archetypes: Vec::new(),
            cpu_names: CpuNames::new(),
        }
    }

    /// Catalog holding the shipped presets
    pub fn with_defaults() -> Result<Self, CatalogError> {
        Self::from_presets(&DEFAULT_PRESETS)
    }

    pub fn from_presets(presets: &[ArchetypeStats]) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for stats in presets {
            catalog.register(*stats)?;
        }
        log::debug!(
            "Catalog ready: {} archetypes, {} ids left",
            catalog.len(),
            catalog.ids.remaining()
        );
        Ok(catalog)
    }

    /// Register a new archetype and return the shared handle
    pub fn register(&mut self, stats: ArchetypeStats) -> Result<Arc<Archetype>, CatalogError> {
        if !(stats.mass > 0.0) {
            return Err(CatalogError::InvalidMass(stats.mass));
        }
        let id = self.ids.allocate()?;
        let archetype = Arc::new(Archetype { id, stats });
        self.archetypes.push(Arc::clone(&archetype));
        Ok(archetype)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Archetype>> {
        self.archetypes.get(index)
    }

    /// The archetype CPUs drive and the selection screen starts on
    pub fn default_archetype(&self) -> Option<&Arc<Archetype>> {
        self.archetypes.first()
    }

    pub fn archetypes(&self) -> &[Arc<Archetype>] {
        &self.archetypes
    }

    pub fn next_cpu_name(&mut self) -> String {
        self.cpu_names.next_name()
    }

    /// Restart CPU numbering for a fresh match
    pub fn reset_names(&mut self) {
        self.cpu_names.reset();
    }
}
