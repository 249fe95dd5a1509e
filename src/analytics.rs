use log::info;
use nalgebra as na;
use serde_derive::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Direction of a counting line crossing in image coordinates.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Event {
    /// Moved from above the line to on or below it.
    Entry,
    /// Moved from on or above the line to below it.
    Exit,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Entry => f.write_str("ENTRY"),
            Event::Exit => f.write_str("EXIT"),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassStats {
    pub total: usize,
    pub entries: u64,
    pub exits: u64,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    #[serde(rename = "class_stats")]
    pub classes: BTreeMap<String, ClassStats>,
    pub grand_total: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (class, s) in &self.classes {
            writeln!(
                f,
                "{:10} | Total:{:4} | IN:{:3} | OUT:{:3}",
                class, s.total, s.entries, s.exits
            )?;
        }

        write!(f, "{:10} | Total:{:4}", "ALL", self.grand_total)
    }
}

#[derive(Debug, Default)]
struct ClassCounter {
    seen: HashSet<u64>,
    entries: u64,
    exits: u64,
}

/// Counts objects crossing a horizontal line.
///
/// Keeps the last vertical centroid of every track id it was fed and, per
/// class label, the set of ids ever seen plus entry/exit counters. Counters
/// and seen-sets live for the whole session.
#[derive(Debug, Default)]
pub struct Analytics {
    prev: HashMap<u64, f32>,
    classes: HashMap<String, ClassCounter>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation of `track_id` and reports a crossing of `line_y`
    /// since its previous observation, if any.
    ///
    /// Must be called at most once per track per frame, in frame order.
    pub fn update(
        &mut self,
        track_id: u64,
        label: &str,
        centroid: na::Point2<f32>,
        line_y: f32,
    ) -> Option<Event> {
        let counter = self.classes.entry(label.to_owned()).or_default();
        counter.seen.insert(track_id);

        let cy = centroid.y;
        let event = match self.prev.insert(track_id, cy) {
            Some(prev) if prev < line_y && line_y <= cy => {
                counter.entries += 1;
                Some(Event::Entry)
            }
            Some(prev) if prev >= line_y && line_y > cy => {
                counter.exits += 1;
                Some(Event::Exit)
            }
            _ => None,
        };

        if let Some(event) = event {
            info!("{} #{} {} at y={}", label, track_id, event, cy);
        }

        event
    }

    /// Drops the last known position of a track that no longer exists.
    ///
    /// Seen-sets and counters are left untouched.
    pub fn forget(&mut self, track_id: u64) -> bool {
        self.prev.remove(&track_id).is_some()
    }

    #[inline]
    pub fn last_position(&self, track_id: u64) -> Option<f32> {
        self.prev.get(&track_id).copied()
    }

    /// Number of tracks with a remembered position.
    #[inline]
    pub fn tracked(&self) -> usize {
        self.prev.len()
    }

    pub fn stats(&self) -> Stats {
        let classes: BTreeMap<_, _> = self
            .classes
            .iter()
            .map(|(label, c)| {
                (
                    label.clone(),
                    ClassStats {
                        total: c.seen.len(),
                        entries: c.entries,
                        exits: c.exits,
                    },
                )
            })
            .collect();

        let grand_total = classes.values().map(|s| s.total).sum();

        Stats {
            classes,
            grand_total,
        }
    }
}
