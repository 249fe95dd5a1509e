use serde_derive::Serialize;

use crate::analytics::Event;
use crate::Track;

/// One reported track in one frame, as handed to the frame logger.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub frame: u64,
    pub timestamp: f32,
    pub track_id: u64,
    pub class: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    pub event: Option<Event>,
}

impl FrameRecord {
    pub fn new(
        frame: u64,
        timestamp: f32,
        track: &Track,
        class: &str,
        event: Option<Event>,
    ) -> Self {
        let [x1, y1, x2, y2]: [f32; 4] = track.bbox.into();

        Self {
            frame,
            timestamp,
            track_id: track.track_id,
            class: class.to_owned(),
            x1,
            y1,
            x2,
            y2,
            confidence: track.confidence,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;

    #[test]
    fn test_serialized_layout() {
        let track = Track {
            track_id: 4,
            class: 0,
            confidence: 0.5,
            bbox: BBox::ltrb(1.0, 2.0, 3.0, 4.0),
        };
        let record = FrameRecord::new(12, 0.5, &track, "Person", Some(Event::Entry));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["frame"], 12);
        assert_eq!(json["track_id"], 4);
        assert_eq!(json["class"], "Person");
        assert_eq!(json["x2"], 3.0);
        assert_eq!(json["event"], "ENTRY");

        let quiet = FrameRecord::new(12, 0.5, &track, "Person", None);
        assert!(serde_json::to_value(&quiet).unwrap()["event"].is_null());
    }
}
