use crate::analytics::{Analytics, Stats};
use crate::classes::ClassMap;
use crate::config::Config;
use crate::error::Error;
use crate::record::FrameRecord;
use crate::tracker::Tracker;
use crate::{Frame, Track};

use log::debug;

/// Tracker and line counter of a single video stream.
#[derive(Debug)]
pub struct Session {
    tracker: Tracker,
    analytics: Analytics,
    classes: ClassMap,
    line_position: f32,
    tracks: Vec<Track>,
    frames: u64,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            tracker: Tracker::new(config.tracker.clone())?,
            analytics: Analytics::new(),
            classes: config.classes.clone(),
            line_position: config.line_position,
            tracks: Vec::new(),
            frames: 0,
        })
    }

    /// Runs one frame through the tracker and the line counter.
    ///
    /// Returns a record for every track reported in this frame. Positions of
    /// tracks the tracker destroyed are dropped from the counter.
    pub fn process(&mut self, frame: &Frame) -> Vec<FrameRecord> {
        self.frames += 1;
        debug!("frame {}: {} detections", frame.index, frame.len());

        let tracks = self.tracker.update(&frame.detections);

        for id in self.tracker.take_removed() {
            if self.analytics.forget(id) {
                debug!("dropped last position of track {}", id);
            }
        }

        let line_y = frame.line_y(self.line_position);
        let records = tracks
            .iter()
            .map(|t| {
                let label = self.classes.label(t.class);
                let event = self
                    .analytics
                    .update(t.track_id, label, t.centroid(), line_y);

                FrameRecord::new(frame.index, frame.timestamp, t, label, event)
            })
            .collect();

        self.tracks = tracks;

        records
    }

    /// Tracks reported by the last processed frame.
    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.analytics.stats()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    #[inline]
    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::Event;
    use crate::tracker::TrackerConfig;
    use crate::Detection;

    fn frame(index: u64, dets: Vec<Detection>) -> Frame {
        Frame {
            index,
            dims: (640, 200),
            detections: dets,
            timestamp: index as f32 * 0.04,
        }
    }

    fn person(y: f32) -> Detection {
        Detection::new(100.0, y - 10.0, 120.0, y + 10.0, 0.8, 0)
    }

    #[test]
    fn test_person_walks_down_across_line() {
        let mut session = Session::new(&Config::default()).unwrap();
        let mut events = Vec::new();

        for (i, y) in [80.0, 88.0, 96.0, 104.0, 112.0].iter().enumerate() {
            for r in session.process(&frame(i as u64 + 1, vec![person(*y)])) {
                assert_eq!(r.class, "Person");
                assert_eq!(r.track_id, 1);
                events.push((r.frame, r.event));
            }
        }

        assert_eq!(
            events,
            vec![
                (2, None),
                (3, None),
                (4, Some(Event::Entry)),
                (5, None)
            ]
        );

        let stats = session.stats();
        assert_eq!(stats.classes["Person"].entries, 1);
        assert_eq!(stats.grand_total, 1);
        assert_eq!(session.frames(), 5);
    }

    #[test]
    fn test_unmapped_class_is_unknown() {
        let mut session = Session::new(&Config {
            tracker: TrackerConfig::new(30, 1, 0.3),
            ..Config::default()
        })
        .unwrap();

        let records = session.process(&frame(1, vec![Detection::new(0.0, 0.0, 5.0, 5.0, 0.5, 3)]));
        assert_eq!(records[0].class, "Unknown");
        assert_eq!(session.tracks().len(), 1);
    }

    #[test]
    fn test_removed_tracks_are_forgotten() {
        let mut session = Session::new(&Config {
            tracker: TrackerConfig::new(2, 1, 0.3),
            ..Config::default()
        })
        .unwrap();

        session.process(&frame(1, vec![person(50.0)]));
        assert_eq!(session.analytics().last_position(1), Some(50.0));

        for i in 2..=4 {
            session.process(&frame(i, vec![]));
        }

        assert!(session.tracker().participants().is_empty());
        assert_eq!(session.analytics().last_position(1), None);
        assert_eq!(session.stats().grand_total, 1);
    }
}
