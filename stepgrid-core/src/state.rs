//! Live, editable pattern state for the selected pack.

use stepgrid_types::{pack, PatternEntity, SampleId, Sequence, PACKS};

use crate::codec::PatternSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct PatternState {
    selected_pack_index: usize,
    pub main_highpass: bool,
    pub main_distortion: bool,
    entities: Vec<PatternEntity>,
}

impl Default for PatternState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PatternState {
    /// Fresh state for pack `pack_index` (clamped to the catalog).
    pub fn new(pack_index: usize) -> Self {
        let index = pack_index.min(PACKS.len() - 1);
        Self {
            selected_pack_index: index,
            main_highpass: false,
            main_distortion: false,
            entities: entities_for_pack(index),
        }
    }

    pub fn selected_pack_index(&self) -> usize {
        self.selected_pack_index
    }

    pub fn entities(&self) -> &[PatternEntity] {
        &self.entities
    }

    pub fn entity(&self, id: SampleId) -> Option<&PatternEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: SampleId) -> Option<&mut PatternEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Switch packs. The previous pack's entities are dropped and a fresh
    /// default entity is created for every sample of the new pack.
    pub fn select_pack(&mut self, index: usize) -> bool {
        if pack(index).is_none() {
            log::warn!(target: "session", "no pack at index {}", index);
            return false;
        }
        self.selected_pack_index = index;
        self.entities = entities_for_pack(index);
        true
    }

    pub fn toggle_step(&mut self, id: SampleId, step: usize) -> Option<bool> {
        self.entity_mut(id)?.toggle_step(step)
    }

    pub fn set_step(&mut self, id: SampleId, step: usize, active: bool) -> bool {
        self.entity_mut(id).is_some_and(|e| e.set_step(step, active))
    }

    pub fn set_pitch(&mut self, id: SampleId, pitch: impl Into<String>) -> bool {
        match self.entity_mut(id) {
            Some(e) => {
                e.pitch = pitch.into();
                true
            }
            None => false,
        }
    }

    pub fn toggle_delay(&mut self, id: SampleId) -> Option<bool> {
        let e = self.entity_mut(id)?;
        e.delay_active = !e.delay_active;
        Some(e.delay_active)
    }

    pub fn toggle_reverb(&mut self, id: SampleId) -> Option<bool> {
        let e = self.entity_mut(id)?;
        e.reverb_active = !e.reverb_active;
        Some(e.reverb_active)
    }

    pub fn toggle_mute(&mut self, id: SampleId) -> Option<bool> {
        let e = self.entity_mut(id)?;
        e.muted = !e.muted;
        Some(e.muted)
    }

    pub fn toggle_highpass(&mut self) -> bool {
        self.main_highpass = !self.main_highpass;
        self.main_highpass
    }

    pub fn toggle_distortion(&mut self) -> bool {
        self.main_distortion = !self.main_distortion;
        self.main_distortion
    }

    pub fn clear_sample(&mut self, id: SampleId) -> bool {
        match self.entity_mut(id) {
            Some(e) => {
                e.clear();
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.entities.iter_mut().for_each(PatternEntity::clear);
    }

    /// Load a validated snapshot: switch to its pack, then copy every
    /// sample's grid, pitch and flags onto the matching entity. Returns how
    /// many samples were applied. Samples that are not part of the pack are
    /// skipped.
    pub fn apply_snapshot(&mut self, snapshot: &PatternSnapshot) -> usize {
        let Ok(index) = usize::try_from(snapshot.selected_pack_index) else {
            log::warn!(target: "session", "snapshot has pack index {}", snapshot.selected_pack_index);
            return 0;
        };
        if !self.select_pack(index) {
            return 0;
        }
        self.main_highpass = snapshot.main_highpass;
        self.main_distortion = snapshot.main_distortion;

        let mut applied = 0;
        for sample in &snapshot.entities {
            let Some(entity) = SampleId::from_wire(sample.id).and_then(|id| self.entity_mut(id))
            else {
                log::warn!(target: "session", "sample {} is not in pack {}", sample.id, index);
                continue;
            };
            let Ok(sequence) = Sequence::try_from(sample.sequence.as_slice()) else {
                log::warn!(target: "session", "sample {} has {} steps", sample.id, sample.sequence.len());
                continue;
            };
            entity.sequence = sequence;
            entity.pitch.clone_from(&sample.pitch);
            entity.delay_active = sample.delay_active;
            entity.reverb_active = sample.reverb_active;
            entity.muted = sample.muted;
            applied += 1;
        }
        applied
    }
}

fn entities_for_pack(index: usize) -> Vec<PatternEntity> {
    pack(index)
        .map(|p| p.samples.iter().map(|s| PatternEntity::new(s.id)).collect())
        .unwrap_or_default()
}
