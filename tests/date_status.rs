#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use taskflow::libs::date_status::DateStatus;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(date: &str) -> Option<NaiveDate> {
        Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn test_no_due_date() {
        assert_eq!(DateStatus::classify(None, at("2024-05-10", "12:00:00")), DateStatus::None);
    }

    #[test]
    fn test_each_bucket() {
        let now = at("2024-05-10", "12:00:00");
        assert_eq!(DateStatus::classify(day("2024-05-09"), now), DateStatus::Overdue);
        assert_eq!(DateStatus::classify(day("2024-05-10"), now), DateStatus::Today);
        assert_eq!(DateStatus::classify(day("2024-05-11"), now), DateStatus::Tomorrow);
        assert_eq!(DateStatus::classify(day("2024-05-12"), now), DateStatus::Future);
        assert_eq!(DateStatus::classify(day("2023-01-01"), now), DateStatus::Overdue);
    }

    #[test]
    fn test_today_ignores_time_of_day() {
        // due at midnight, checked late in the evening: still today
        assert_eq!(DateStatus::classify(day("2024-05-10"), at("2024-05-10", "23:59:59")), DateStatus::Today);
        assert_eq!(DateStatus::classify(day("2024-05-10"), at("2024-05-10", "00:00:00")), DateStatus::Today);
    }

    #[test]
    fn test_month_and_year_boundaries() {
        assert_eq!(DateStatus::classify(day("2024-03-01"), at("2024-02-29", "08:00:00")), DateStatus::Tomorrow);
        assert_eq!(DateStatus::classify(day("2025-01-01"), at("2024-12-31", "08:00:00")), DateStatus::Tomorrow);
        assert_eq!(DateStatus::classify(day("2024-12-31"), at("2025-01-01", "08:00:00")), DateStatus::Overdue);
    }

    #[test]
    fn test_every_input_lands_in_exactly_one_bucket() {
        let now = at("2024-05-10", "09:15:00");
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        for offset in 0..90 {
            let due = start + chrono::Duration::days(offset);
            let status = DateStatus::classify(Some(due), now);
            let expected = match due.cmp(&now.date()) {
                std::cmp::Ordering::Less => DateStatus::Overdue,
                std::cmp::Ordering::Equal => DateStatus::Today,
                std::cmp::Ordering::Greater if due == now.date().succ_opt().unwrap() => DateStatus::Tomorrow,
                std::cmp::Ordering::Greater => DateStatus::Future,
            };
            assert_eq!(status, expected, "due {}", due);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(DateStatus::None.label(), "");
        assert_eq!(DateStatus::Overdue.to_string(), "overdue");
        assert_eq!(DateStatus::Today.to_string(), "today");
        assert_eq!(DateStatus::Tomorrow.to_string(), "tomorrow");
        assert_eq!(DateStatus::Future.to_string(), "upcoming");
    }
}
