use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: HashMap<&'static str, InnerTimer>,
}

impl InnerTimer {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    fn suspend(&mut self) {
        // bank current elapsed and suspend subtimers
        // if this timer appears active
        if let Some(instant) = self.start {
            self.elapsed += instant.elapsed();
            for t in self.subtimers.values_mut() {
                t.suspend();
            }
        }
    }

    fn resume(&mut self) {
        // refresh the start time if this timer appears active
        if self.start.is_some() {
            self.start = Some(Instant::now());
            for t in self.subtimers.values_mut() {
                t.resume();
            }
        }
    }
}

/// A stack of named wall clock timers.  `start_as_current` opens a timer
/// as a child of whichever timer is currently running.
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: HashMap<&'static str, InnerTimer>,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let mut iter = self.stack.iter();
        let key = iter.next()?;
        let mut active = self.subtimers.get_mut(key)?;
        for key in iter {
            active = active.subtimers.get_mut(key)?;
        }
        Some(active)
    }

    /// Clear a root level timer.
    pub fn reset_timer(&mut self, key: &'static str) {
        self.subtimers.remove(key);
    }

    /// Start a timer with name `key` as the current timer.
    pub fn start_as_current(&mut self, key: &'static str) {
        let map = match self.mut_active_timer() {
            Some(active) => &mut active.subtimers,
            None => &mut self.subtimers,
        };
        map.entry(key).or_default().start();
        self.stack.push(key);
    }

    /// Stop the current timer.  There should always be one active
    /// when this function is reached.
    pub fn stop_current(&mut self) {
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }
        self.stack.pop();
    }

    /// Suspend every timer in the collection.  Used by `notimeit!`.
    pub fn suspend(&mut self) {
        for t in self.subtimers.values_mut() {
            t.suspend();
        }
    }

    /// Resume every timer in the collection.  Used by `notimeit!`.
    pub fn resume(&mut self) {
        for t in self.subtimers.values_mut() {
            t.resume();
        }
    }

    /// Total elapsed time over all root level timers.
    pub fn total_time(&self) -> Duration {
        self.subtimers
            .values()
            .fold(Duration::ZERO, |acc, t| acc + t.elapsed)
    }

    /// Elapsed time of the named root level timer, including the running
    /// portion if it is currently active.
    pub fn elapsed(&self, key: &'static str) -> Duration {
        match self.subtimers.get(key) {
            Some(t) => match t.start {
                Some(instant) => t.elapsed + instant.elapsed(),
                None => t.elapsed,
            },
            None => Duration::ZERO,
        }
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_timers() {
        let mut timers = Timers::default();
        timeit! {timers => "outer"; {
            timeit!{timers => "inner"; {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }}
        }}
        assert!(timers.elapsed("outer") >= Duration::from_millis(1));
        assert!(timers.total_time() >= Duration::from_millis(1));
        assert_eq!(timers.elapsed("missing"), Duration::ZERO);
    }
}
