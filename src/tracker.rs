use crate::bbox::{BBox, Ltrb};
use crate::error::Error;
use crate::matching::{greedy_assignment, iou_matrix};
use crate::{Detection, Track};

use log::debug;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive missed frames a track survives.
    pub max_age: u32,
    /// Matched frames (including creation) before a track is reported.
    pub min_hits: u32,
    pub iou_threshold: f32,
}

impl TrackerConfig {
    pub fn new(max_age: u32, min_hits: u32, iou_threshold: f32) -> Self {
        Self {
            max_age,
            min_hits,
            iou_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.iou_threshold > 0.0 && self.iou_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "iou_threshold must be within (0, 1], got {}",
                self.iou_threshold
            )));
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(30, 2, 0.3)
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub id: u64,
    pub bbox: BBox<Ltrb>,
    pub confidence: f32,
    pub class: i32,
    pub hits: u32,
    pub age: u32,
    pub confirmed: bool,
}

impl Participant {
    fn new(id: u64, det: &Detection, min_hits: u32) -> Self {
        Self {
            id,
            bbox: det.bbox(),
            confidence: det.confidence,
            class: det.class,
            hits: 1,
            age: 0,
            confirmed: min_hits <= 1,
        }
    }

    fn update(&mut self, det: &Detection, min_hits: u32) {
        self.bbox = det.bbox();
        self.confidence = det.confidence;
        self.class = det.class;
        self.hits += 1;
        self.age = 0;

        if !self.confirmed && self.hits >= min_hits {
            self.confirmed = true;
            debug!("track {} confirmed after {} hits", self.id, self.hits);
        }
    }
}

impl From<&Participant> for Track {
    fn from(p: &Participant) -> Track {
        Track {
            track_id: p.id,
            class: p.class,
            confidence: p.confidence,
            bbox: p.bbox,
        }
    }
}

/// Greedy IoU tracker for a single stream.
///
/// Owns its id space: ids start at 1, grow by one per created track and are
/// never handed out twice, even after the track is gone.
#[derive(Debug)]
pub struct Tracker {
    config: TrackerConfig,
    tracks: Vec<Participant>,
    removed: Vec<u64>,
    next_id: u64,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            tracks: Vec::with_capacity(64),
            removed: Vec::new(),
            next_id: 1,
        })
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Live tracks, confirmed or not, in creation order.
    #[inline]
    pub fn participants(&self) -> &[Participant] {
        &self.tracks
    }

    /// Ids destroyed by the last `update`, in removal order.
    pub fn take_removed(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.removed)
    }

    /// Consumes one frame of detections and returns the confirmed tracks that
    /// were matched or created in this frame, in creation order.
    pub fn update(&mut self, dets: &[Detection]) -> Vec<Track> {
        self.removed.clear();

        for t in &mut self.tracks {
            t.age += 1;
        }

        let boxes: Vec<_> = self.tracks.iter().map(|t| t.bbox).collect();
        let (assignments, missed) =
            greedy_assignment(iou_matrix(dets, &boxes), self.config.iou_threshold);

        for (d, t, _) in assignments {
            self.tracks[t].update(&dets[d], self.config.min_hits);
        }

        for d in missed {
            let id = self.next_id;
            self.next_id += 1;

            debug!("track {} created (class {})", id, dets[d].class);
            self.tracks
                .push(Participant::new(id, &dets[d], self.config.min_hits));
        }

        let max_age = self.config.max_age;
        let removed = &mut self.removed;

        self.tracks.retain(|t| {
            if t.age > max_age {
                debug!("track {} removed after {} missed frames", t.id, t.age);
                removed.push(t.id);
                return false;
            }

            true
        });

        self.tracks
            .iter()
            .filter(|t| t.confirmed && t.age == 0)
            .map(Into::into)
            .collect()
    }
}
