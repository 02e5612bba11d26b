//! Derived reading metrics.
//!
//! Everything here is a pure function of a book session and/or its reading
//! sessions. Nothing is persisted; callers load the children and pass them in.

use chrono::Duration;

use crate::domain::foundation::Percentage;

use super::{BookSession, ReadingSession};

/// Aggregate statistics for one book session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingStatistics {
    pub progress: Percentage,
    /// Sum of durations over ended sessions.
    pub total_reading_time: Duration,
    /// All sessions, active or ended.
    pub sessions_count: usize,
    /// Mean duration of ended sessions; zero when none ended.
    pub average_session_length: Duration,
    /// Total pages read divided by `sessions_count`; zero when there are none.
    pub pages_per_session: f64,
}

/// Statistics for one reading session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub duration: Duration,
    pub pages_read: u32,
    pub pages_per_minute: f64,
    pub is_active: bool,
}

/// Sum of `pages_read` over every session, active ones included.
pub fn total_pages_read(sessions: &[ReadingSession]) -> u64 {
    sessions.iter().map(|s| u64::from(s.pages_read)).sum()
}

/// `min(100, floor(100 * pages_read / page_number))`; zero for a non-positive page count.
pub fn calculate_progress(book: &BookSession, sessions: &[ReadingSession]) -> Percentage {
    if book.page_number <= 0 {
        return Percentage::ZERO;
    }
    Percentage::from_ratio(total_pages_read(sessions), book.page_number as u64)
}

/// `end_time - start_time`, or zero while the session is still active.
pub fn calculate_duration(session: &ReadingSession) -> Duration {
    match &session.end_time {
        Some(end) => end.duration_since(&session.start_time),
        None => Duration::zero(),
    }
}

pub fn total_reading_time(sessions: &[ReadingSession]) -> Duration {
    sessions
        .iter()
        .filter(|s| !s.is_active())
        .map(calculate_duration)
        .fold(Duration::zero(), |acc, d| acc + d)
}

pub fn reading_statistics(book: &BookSession, sessions: &[ReadingSession]) -> ReadingStatistics {
    let total_reading_time = total_reading_time(sessions);
    let ended = sessions.iter().filter(|s| !s.is_active()).count();

    let average_session_length = if ended == 0 {
        Duration::zero()
    } else {
        total_reading_time / ended as i32
    };

    let pages_per_session = if sessions.is_empty() {
        0.0
    } else {
        total_pages_read(sessions) as f64 / sessions.len() as f64
    };

    ReadingStatistics {
        progress: calculate_progress(book, sessions),
        total_reading_time,
        sessions_count: sessions.len(),
        average_session_length,
        pages_per_session,
    }
}

pub fn session_stats(session: &ReadingSession) -> SessionStats {
    let duration = calculate_duration(session);
    let seconds = duration.num_milliseconds() as f64 / 1000.0;

    let pages_per_minute = if seconds > 0.0 && session.pages_read > 0 {
        round_to_hundredths(f64::from(session.pages_read) / (seconds / 60.0))
    } else {
        0.0
    };

    SessionStats {
        duration,
        pages_read: session.pages_read,
        pages_per_minute,
        is_active: session.is_active(),
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::reading::{NewBookSession, NewReadingSession};
    use proptest::prelude::*;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap()
    }

    fn book(page_number: i32) -> BookSession {
        BookSession::create(
            UserId::new(),
            NewBookSession {
                title: "Middlemarch".to_string(),
                page_number,
                ..Default::default()
            },
            t0(),
        )
        .unwrap()
    }

    fn ended(book: &BookSession, pages: u32, start_offset: i64, secs: i64) -> ReadingSession {
        let start = t0().plus_secs(start_offset);
        let mut s = ReadingSession::start(book.id, NewReadingSession::default(), start);
        s.end(start.plus_secs(secs), Some(pages), None).unwrap();
        s
    }

    fn active(book: &BookSession, pages: u32) -> ReadingSession {
        ReadingSession::start(
            book.id,
            NewReadingSession {
                pages_read: Some(pages),
                notes: None,
            },
            t0(),
        )
    }

    #[test]
    fn progress_clamps_at_hundred() {
        let b = book(100);
        let sessions = vec![ended(&b, 40, 0, 600), ended(&b, 65, 1000, 600)];
        assert_eq!(calculate_progress(&b, &sessions), Percentage::HUNDRED);
    }

    #[test]
    fn progress_counts_active_sessions_too() {
        let b = book(200);
        let sessions = vec![ended(&b, 50, 0, 600), active(&b, 10)];
        assert_eq!(calculate_progress(&b, &sessions).value(), 30);
    }

    #[test]
    fn progress_is_zero_for_non_positive_page_count() {
        let mut b = book(10);
        b.page_number = 0;
        assert_eq!(calculate_progress(&b, &[active(&b, 5)]), Percentage::ZERO);
        b.page_number = -4;
        assert_eq!(calculate_progress(&b, &[active(&b, 5)]), Percentage::ZERO);
    }

    #[test]
    fn duration_and_pace_for_ten_minute_session() {
        let b = book(300);
        let session = ended(&b, 30, 0, 600);
        let stats = session_stats(&session);

        assert_eq!(stats.duration, Duration::seconds(600));
        assert_eq!(stats.pages_read, 30);
        assert_eq!(stats.pages_per_minute, 3.0);
        assert!(!stats.is_active);
    }

    #[test]
    fn pace_rounds_to_two_decimals() {
        let b = book(300);
        let session = ended(&b, 10, 0, 420);
        assert_eq!(session_stats(&session).pages_per_minute, 1.43);
    }

    #[test]
    fn active_session_has_zero_duration_and_pace() {
        let b = book(300);
        let stats = session_stats(&active(&b, 25));
        assert_eq!(stats.duration, Duration::zero());
        assert_eq!(stats.pages_per_minute, 0.0);
        assert!(stats.is_active);
    }

    #[test]
    fn zero_pages_gives_zero_pace() {
        let b = book(300);
        assert_eq!(session_stats(&ended(&b, 0, 0, 600)).pages_per_minute, 0.0);
    }

    #[test]
    fn statistics_average_only_ended_sessions() {
        let b = book(500);
        let sessions = vec![
            ended(&b, 20, 0, 600),
            ended(&b, 40, 1000, 1200),
            active(&b, 30),
        ];

        let stats = reading_statistics(&b, &sessions);

        assert_eq!(stats.progress.value(), 18);
        assert_eq!(stats.total_reading_time, Duration::seconds(1800));
        assert_eq!(stats.sessions_count, 3);
        assert_eq!(stats.average_session_length, Duration::seconds(900));
        assert_eq!(stats.pages_per_session, 30.0);
    }

    #[test]
    fn statistics_for_book_without_sessions() {
        let b = book(500);
        let stats = reading_statistics(&b, &[]);

        assert_eq!(stats.progress, Percentage::ZERO);
        assert_eq!(stats.total_reading_time, Duration::zero());
        assert_eq!(stats.sessions_count, 0);
        assert_eq!(stats.average_session_length, Duration::zero());
        assert_eq!(stats.pages_per_session, 0.0);
    }

    #[test]
    fn statistics_with_only_active_session_has_zero_average() {
        let b = book(500);
        let stats = reading_statistics(&b, &[active(&b, 8)]);
        assert_eq!(stats.average_session_length, Duration::zero());
        assert_eq!(stats.pages_per_session, 8.0);
    }

    proptest! {
        #[test]
        fn progress_matches_truncated_clamped_ratio(
            pages in prop::collection::vec(0u32..1_000, 0..12),
            page_number in 1i32..5_000,
        ) {
            let b = book(page_number);
            let sessions: Vec<ReadingSession> = pages
                .iter()
                .enumerate()
                .map(|(i, p)| ended(&b, *p, i as i64 * 1_000, 60))
                .collect();

            let total: u64 = pages.iter().map(|p| u64::from(*p)).sum();
            let expected = (100 * total / page_number as u64).min(100) as u8;

            prop_assert_eq!(calculate_progress(&b, &sessions).value(), expected);
        }
    }
}
