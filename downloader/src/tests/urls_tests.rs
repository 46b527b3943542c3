use chrono::NaiveDate;

use crate::batch::read_url_list;
use crate::urls::{archive_url, daily_urls, save_url_list, years_before};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Pull the DDMMYY token back out of a generated URL.
fn date_token(url: &str) -> &str {
    let start = url.rfind('_').unwrap() + 1;
    &url[start..start + 6]
}

#[test]
fn url_follows_the_archive_template() {
    assert_eq!(
        archive_url(date(2024, 3, 15)),
        "https://nsearchives.nseindia.com/content/equities/mrg_trading_150324.zip"
    );
}

#[test]
fn window_spans_every_day_inclusive() {
    let anchor = date(2024, 3, 15);
    let urls = daily_urls(anchor, 1);

    let start = date(2023, 3, 15);
    let expected = (anchor - start).num_days() as usize + 1;
    assert_eq!(urls.len(), expected);
    assert_eq!(date_token(&urls[0]), "150323");
    assert_eq!(date_token(urls.last().unwrap()), "150324");
}

#[test]
fn zero_year_window_is_just_the_anchor_day() {
    let urls = daily_urls(date(2024, 3, 15), 0);
    assert_eq!(urls.len(), 1);
    assert_eq!(date_token(&urls[0]), "150324");
}

#[test]
fn dates_increase_by_exactly_one_day() {
    let urls = daily_urls(date(2024, 3, 5), 1);
    let mut previous: Option<NaiveDate> = None;
    for url in &urls {
        let token = date_token(url);
        let day: u32 = token[0..2].parse().unwrap();
        let month: u32 = token[2..4].parse().unwrap();
        let year: i32 = 2000 + token[4..6].parse::<i32>().unwrap();
        let parsed = date(year, month, day);
        if let Some(previous) = previous {
            assert_eq!(previous.succ_opt().unwrap(), parsed);
        }
        previous = Some(parsed);
    }
}

#[test]
fn leap_day_anchor_clamps_to_feb_28() {
    assert_eq!(years_before(date(2024, 2, 29), 1), date(2023, 2, 28));
    assert_eq!(years_before(date(2024, 2, 29), 4), date(2020, 2, 29));
}

#[test]
fn url_list_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");

    let urls = daily_urls(date(2024, 1, 3), 0);
    save_url_list(&urls, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with('\n'));
    assert_eq!(read_url_list(&path).unwrap(), urls);
}
