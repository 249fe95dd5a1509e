//! Greedy IoU multi-object tracking with directional line-crossing counts.
//!
//! A [`tracker::Tracker`] turns per-frame detections into stable track ids and
//! an [`analytics::Analytics`] counts how tracked centroids cross a horizontal
//! line. [`session::Session`] wires both together for one stream and
//! [`LineCounter`] keeps one session per named source.

pub mod analytics;
pub mod bbox;
pub mod classes;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame;
pub mod matching;
pub mod record;
pub mod session;
pub mod tracker;

mod track;

pub use analytics::{Analytics, Event, Stats};
pub use config::Config;
pub use detection::Detection;
pub use frame::Frame;
pub use record::FrameRecord;
pub use session::Session;
pub use track::Track;

use error::Error;
use log::info;
use std::collections::HashMap;
use std::rc::Rc;

pub trait Tracking {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<Vec<FrameRecord>, Error>;
    fn tracks(&self, src: &str) -> Rc<[Track]>;
    fn stats(&self, src: &str) -> Option<Stats>;
}

/// Counts line crossings on any number of independent streams.
///
/// Every source gets its own session on first use, so track ids and counters
/// are never shared between streams.
pub struct LineCounter {
    config: Config,
    sessions: HashMap<String, Session>,
}

impl LineCounter {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            sessions: HashMap::new(),
        })
    }

    #[inline]
    pub fn session(&self, src: &str) -> Option<&Session> {
        self.sessions.get(src)
    }

    #[inline]
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    /// Ends the stream `src`, returning its final statistics.
    pub fn finish(&mut self, src: &str) -> Option<Stats> {
        self.sessions.remove(src).map(|s| s.stats())
    }
}

impl crate::Tracking for LineCounter {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<Vec<FrameRecord>, Error> {
        let stream = if let Some(session) = self.sessions.get_mut(src) {
            session
        } else {
            info!("new stream `{}`", src);

            let session = Session::new(&self.config)?;
            self.sessions.entry(src.to_string()).or_insert(session)
        };

        let mut records = Vec::new();
        for frame in frames {
            records.extend(stream.process(frame));
        }

        Ok(records)
    }

    #[inline]
    fn tracks(&self, src: &str) -> Rc<[Track]> {
        if let Some(session) = self.sessions.get(src) {
            return session.tracks().into();
        }

        Rc::new([])
    }

    #[inline]
    fn stats(&self, src: &str) -> Option<Stats> {
        self.sessions.get(src).map(Session::stats)
    }
}
