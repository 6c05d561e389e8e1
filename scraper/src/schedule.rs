use std::thread;
use std::time::Duration;

use chrono::{DateTime, Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// How often the scheduler checks whether the job is due.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A job that fires once a day at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// First trigger strictly after `now`: today if the time is still ahead,
    /// otherwise tomorrow.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let mut day = now.date_naive();
        loop {
            if let Some(due) = self.on_day(&tz, day) {
                if due > *now {
                    return due;
                }
            }
            day = match day.checked_add_days(Days::new(1)) {
                Some(next) => next,
                None => return now.clone(),
            };
        }
    }

    // A time skipped by a DST jump has no trigger that day; an ambiguous one
    // fires at its earlier instant.
    fn on_day<Tz: TimeZone>(&self, tz: &Tz, day: NaiveDate) -> Option<DateTime<Tz>> {
        match tz.from_local_datetime(&day.and_time(self.at)) {
            LocalResult::Single(due) => Some(due),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => None,
        }
    }
}

/// Drives a [`DailySchedule`]. The only state is the next due time.
pub struct Scheduler {
    schedule: DailySchedule,
    next_due: DateTime<Local>,
}

impl Scheduler {
    pub fn new(schedule: DailySchedule) -> Self {
        Self::starting_at(schedule, Local::now())
    }

    pub fn starting_at(schedule: DailySchedule, now: DateTime<Local>) -> Self {
        let next_due = schedule.next_after(&now);
        Self { schedule, next_due }
    }

    pub fn next_due(&self) -> DateTime<Local> {
        self.next_due
    }

    /// Run `job` if it is due at `now`, then move the next due time past the
    /// moment the job finished. Returns whether the job ran.
    pub fn tick<F, N>(&mut self, now: DateTime<Local>, job: &mut F, clock: N) -> bool
    where
        F: FnMut(),
        N: Fn() -> DateTime<Local>,
    {
        if now < self.next_due {
            return false;
        }
        job();
        self.next_due = self.schedule.next_after(&clock());
        log::info!("Next run scheduled for {}", self.next_due.format("%Y-%m-%d %H:%M:%S"));
        true
    }

    /// Poll forever, running `job` synchronously each time it falls due.
    pub fn run_forever<F: FnMut()>(&mut self, mut job: F) -> ! {
        log::info!(
            "Schedule started. Will scrape daily at {}; first run at {}",
            self.schedule.at.format("%H:%M"),
            self.next_due.format("%Y-%m-%d %H:%M:%S")
        );
        loop {
            self.tick(Local::now(), &mut job, Local::now);
            thread::sleep(POLL_INTERVAL);
        }
    }
}
