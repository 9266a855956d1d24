//! Countdown chess clock.
//!
//! The server is the time authority: it embeds authoritative remaining
//! times in every snapshot and move event, and [`Clock::set_time`] applies
//! them. Local ticking is cosmetic interpolation between those resets so
//! the display keeps moving.

use chess_core::Color;

/// Per-color remaining time, the ticking color and a running flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    white_time: u64,
    black_time: u64,
    active: Color,
    running: bool,
}

impl Clock {
    /// Initializes the clock state without starting anything; `time` is the
    /// starting allotment per side in seconds.
    pub fn new(time: u64, running: bool, active: Color) -> Clock {
        Clock {
            white_time: time,
            black_time: time,
            active,
            running,
        }
    }

    /// Remaining seconds for the given color.
    pub fn time(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white_time,
            Color::Black => self.black_time,
        }
    }

    /// The color whose time is counting down.
    pub fn active(&self) -> Color {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One second elapsed: decrements the active color's counter,
    /// saturating at zero. Returns the color and its new value when the
    /// display should update, `None` when stopped or already flat.
    pub fn tick(&mut self) -> Option<(Color, u64)> {
        if !self.running {
            return None;
        }
        let counter = match self.active {
            Color::White => &mut self.white_time,
            Color::Black => &mut self.black_time,
        };
        if *counter == 0 {
            return None;
        }
        *counter -= 1;
        Some((self.active, *counter))
    }

    /// Authoritative reset from the server.
    pub fn set_time(&mut self, color: Color, secs: u64) {
        match color {
            Color::White => self.white_time = secs,
            Color::Black => self.black_time = secs,
        }
    }

    /// Hands the tick to the other color.
    pub fn switch_color(&mut self) {
        self.active = self.active.opposite();
    }

    pub fn set_active(&mut self, color: Color) {
        self.active = color;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

/// Zero-padded `MM:SS` for clock displays.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_state() {
        let clock = Clock::new(300, false, Color::White);
        assert_eq!(clock.time(Color::White), 300);
        assert_eq!(clock.time(Color::Black), 300);
        assert_eq!(clock.active(), Color::White);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_tick_decrements_active_color_only() {
        let mut clock = Clock::new(300, true, Color::White);
        assert_eq!(clock.tick(), Some((Color::White, 299)));
        assert_eq!(clock.time(Color::Black), 300, "inactive side untouched");

        clock.switch_color();
        assert_eq!(clock.tick(), Some((Color::Black, 299)));
        assert_eq!(clock.time(Color::White), 299);
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        //! The counter never wraps and never goes below zero, even when the
        //! server is slow to call the flag.
        let mut clock = Clock::new(1, true, Color::White);
        assert_eq!(clock.tick(), Some((Color::White, 0)));
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.time(Color::White), 0);
        assert_eq!(clock.time(Color::Black), 1);
    }

    #[test]
    fn test_stopped_clock_does_not_tick() {
        let mut clock = Clock::new(300, false, Color::White);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.time(Color::White), 300);

        clock.start();
        assert!(clock.tick().is_some());
        clock.stop();
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_set_time_is_authoritative() {
        //! Server resets overwrite whatever local ticking produced.
        let mut clock = Clock::new(300, true, Color::White);
        clock.tick();
        clock.tick();
        clock.set_time(Color::White, 300);
        assert_eq!(clock.time(Color::White), 300);
        clock.set_time(Color::Black, 42);
        assert_eq!(clock.time(Color::Black), 42);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(600), "10:00");
    }
}
