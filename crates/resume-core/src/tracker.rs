//! Which section is active, and the connector geometry that depends on it.

use crate::connector::{compute_segments, LineSegment};
use crate::constants::CONNECTOR_CLEARANCE;
use crate::error::{check_non_negative, ParamsError};
use crate::geometry::Rect;
use crate::visibility::{ViewportBand, VisibilitySource};
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct TrackerParams {
    pub band: ViewportBand,
    pub clearance: f32,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            band: ViewportBand::default(),
            clearance: CONNECTOR_CLEARANCE,
        }
    }
}

impl TrackerParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.band.validate()?;
        check_non_negative("connector clearance", self.clearance)
    }
}

/// Result of feeding visibility into the tracker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observation {
    /// Sections that turned visible, in declared order.
    pub reported: SmallVec<[usize; 4]>,
    /// Sections seen for the first time in the page's lifetime.
    pub first_entries: SmallVec<[usize; 4]>,
    pub previous_active: Option<usize>,
    pub active: Option<usize>,
}

impl Observation {
    pub fn active_changed(&self) -> bool {
        self.previous_active != self.active
    }
}

struct SectionSlot {
    id: String,
    attached: bool,
    visible: bool,
    entered: bool,
}

/// Tracks the ordered sections of the page.
///
/// A section reports itself when its visibility predicate turns true and
/// becomes the active one; later reports win. The "entered" flag is set on
/// the first report and never cleared.
pub struct SectionTracker<V: VisibilitySource = ViewportBand> {
    slots: Vec<SectionSlot>,
    index: FnvHashMap<String, usize>,
    active: Option<usize>,
    source: V,
    clearance: f32,
}

impl SectionTracker<ViewportBand> {
    pub fn new<S: AsRef<str>>(ids: &[S], params: TrackerParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Self::with_source(ids, params.band, params.clearance)
    }
}

impl<V: VisibilitySource> SectionTracker<V> {
    pub fn with_source<S: AsRef<str>>(
        ids: &[S],
        source: V,
        clearance: f32,
    ) -> Result<Self, ParamsError> {
        check_non_negative("connector clearance", clearance)?;
        let mut index = FnvHashMap::default();
        let mut slots = Vec::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            if index.insert(id.to_string(), i).is_some() {
                return Err(ParamsError::DuplicateSection(id.to_string()));
            }
            slots.push(SectionSlot {
                id: id.to_string(),
                attached: false,
                visible: false,
                entered: false,
            });
        }
        Ok(Self {
            slots,
            index,
            active: None,
            source,
            clearance,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|s| s.id.as_str())
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|s| s.id.as_str())
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.and_then(|i| self.id(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn has_entered(&self, id: &str) -> bool {
        self.index_of(id).map_or(false, |i| self.slots[i].entered)
    }

    /// Start observing a section. Returns false for unknown ids.
    pub fn attach(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.slots[i].attached = true;
                true
            }
            None => false,
        }
    }

    /// Stop observing a section; it is no longer sampled or reported.
    pub fn detach(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(i) => {
                let slot = &mut self.slots[i];
                slot.attached = false;
                slot.visible = false;
                true
            }
            None => false,
        }
    }

    pub fn attach_all(&mut self) {
        for slot in &mut self.slots {
            slot.attached = true;
        }
    }

    pub fn detach_all(&mut self) {
        for slot in &mut self.slots {
            slot.attached = false;
            slot.visible = false;
        }
    }

    pub fn attached_count(&self) -> usize {
        self.slots.iter().filter(|s| s.attached).count()
    }

    /// Push-style report from an observer that already decided visibility.
    /// Detached and unknown sections are ignored.
    pub fn report_visible(&mut self, id: &str) -> Observation {
        let mut obs = Observation {
            previous_active: self.active,
            ..Default::default()
        };
        if let Some(i) = self.index_of(id) {
            if self.slots[i].attached {
                self.report(i, &mut obs);
            }
        }
        obs.active = self.active;
        obs
    }

    /// Poll-style sampling: evaluate every attached section against
    /// `viewport` and report the ones that just became visible.
    /// Sections whose geometry is unavailable count as not visible.
    pub fn observe<F>(&mut self, viewport: &Rect, mut rect_of: F) -> Observation
    where
        F: FnMut(&str) -> Option<Rect>,
    {
        let mut obs = Observation {
            previous_active: self.active,
            ..Default::default()
        };
        for i in 0..self.slots.len() {
            if !self.slots[i].attached {
                continue;
            }
            let now = rect_of(&self.slots[i].id)
                .map_or(false, |r| self.source.is_visible(&r, viewport));
            let was = std::mem::replace(&mut self.slots[i].visible, now);
            if now && !was {
                self.report(i, &mut obs);
            }
        }
        obs.active = self.active;
        obs
    }

    fn report(&mut self, i: usize, obs: &mut Observation) {
        let slot = &mut self.slots[i];
        obs.reported.push(i);
        if !slot.entered {
            slot.entered = true;
            obs.first_entries.push(i);
        }
        self.active = Some(i);
    }

    /// Connector segments for the current geometry and active section.
    pub fn segments<F>(&self, rect_of: F) -> Vec<LineSegment>
    where
        F: FnMut(&str) -> Option<Rect>,
    {
        let ids: SmallVec<[&str; 8]> = self.ids().collect();
        compute_segments(&ids[..], rect_of, self.active(), self.clearance)
    }
}
