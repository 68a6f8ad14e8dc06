use chrono::{DateTime, Local, TimeZone};
use tokio::sync::watch;

use crate::ClockReading;

pub struct ClockService {
    reading: watch::Sender<ClockReading>,
}

impl ClockService {
    pub fn new() -> Self {
        let (reading, _) = watch::channel(format_reading(&Local::now()));
        Self { reading }
    }

    pub fn tick(&self) -> ClockReading {
        let reading = format_reading(&Local::now());
        self.reading.send_replace(reading.clone());
        reading
    }

    pub fn current(&self) -> ClockReading {
        self.reading.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.reading.subscribe()
    }
}

impl Default for ClockService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_reading<Tz>(at: &DateTime<Tz>) -> ClockReading
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ClockReading {
        time: at.format("%H:%M:%S").to_string(),
        date: at.format("%A, %d %B %Y").to_string(),
    }
}
