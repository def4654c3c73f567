#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shelter::libs::dates::{
        age_in_months, estimated_birth_date, format_date, parse_date, parse_optional_date, parse_stored_date,
        quarantine_days_left,
    };
    use shelter::libs::validation::ValidationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_is_strict() {
        assert_eq!(parse_date("birth date", " 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert_eq!(
            parse_date("birth date", "2024-2-9"),
            Err(ValidationError::InvalidDate {
                field: "birth date",
                value: "2024-2-9".to_string()
            })
        );
        assert!(parse_date("birth date", "2023-02-29").is_err());
        assert!(parse_date("birth date", "29.02.2024").is_err());
        assert!(parse_date("birth date", "+2024-1-01").is_err());
        assert!(parse_date("birth date", "2024/01/01").is_err());
        assert!(parse_date("birth date", "２０２４-01-01").is_err());
    }

    #[test]
    fn test_optional_and_stored_dates() {
        assert_eq!(parse_optional_date("end date", None).unwrap(), None);
        assert_eq!(parse_optional_date("end date", Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_date("end date", Some("2024-05-01")).unwrap(), Some(date(2024, 5, 1)));

        assert_eq!(parse_stored_date(Some("~2023-11-20".to_string())), Some(date(2023, 11, 20)));
        assert_eq!(parse_stored_date(Some("sometime".to_string())), None);
        assert_eq!(parse_stored_date(None), None);
        assert_eq!(format_date(&date(2024, 1, 5)), "2024-01-05");
    }

    #[test]
    fn test_age_in_months() {
        assert_eq!(age_in_months(date(2023, 1, 31), date(2024, 5, 1)), 16);
        assert_eq!(age_in_months(date(2024, 5, 1), date(2024, 5, 31)), 0);
        assert_eq!(estimated_birth_date(3, date(2024, 5, 31)), date(2024, 2, 29));
    }

    #[test]
    fn test_quarantine_days_left() {
        assert_eq!(quarantine_days_left(date(2024, 5, 25), date(2024, 5, 20)), 5);
        assert_eq!(quarantine_days_left(date(2024, 5, 20), date(2024, 5, 20)), 0);
        assert_eq!(quarantine_days_left(date(2024, 5, 1), date(2024, 5, 20)), 0);
    }
}
