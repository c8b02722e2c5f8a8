//! End-to-end checks: observatory-style CSV files on disk through the loader,
//! resolvers, sky classification and statistics.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use timepixel::config::{Config, SunSource};
use timepixel::data::load_table;
use timepixel::sky::{SkyType, classify_sky};
use timepixel::stats::{QualityReport, SeasonalStats};
use timepixel::{
    AstroTable, DailyRecord, MemoizedResolver, MoonWindow, RiseSet, VisibilityResolver,
    VisibilitySource,
};

const SUN_CSV: &str = "\
Hong Kong Observatory - Sunrise and sunset
YYYY-MM-DD,RISE,TRAN.,SET
2024-01-01,07:03,12:27,17:51
2024-01-02,07:03,12:27,17:52
2024-01-03,07:03,12:28,17:53
2024-01-04,07:04,12:28,17:53
2024-01-05,07:04,12:29,17:54
2024-01-06,07:04,12:29,17:55
";

const MOON_CSV: &str = "\
Hong Kong Observatory - Moonrise and moonset
YYYY-MM-DD,RISE,TRAN.,SET
2024-01-01,21:21,03:48,09:59
2024-01-02,22:17,04:30,10:37
2024-01-03,23:17,05:20,
2024-01-04,,06:13,11:14
2024-01-05,00:20,07:09,12:01
2024-01-06,,,
";

fn hours(h: u32, m: u32) -> f64 {
    h as f64 + m as f64 / 60.0
}

fn write_tables(dir: &Path) -> (PathBuf, PathBuf) {
    let sun = dir.join("sun.csv");
    let moon = dir.join("moon.csv");
    fs::write(&sun, SUN_CSV).unwrap();
    fs::write(&moon, MOON_CSV).unwrap();
    (sun, moon)
}

fn load_fixture() -> (TempDir, AstroTable) {
    let dir = TempDir::new().unwrap();
    let (sun, moon) = write_tables(dir.path());
    let table = load_table(&Config::default(), Some(&sun), Some(&moon), false).unwrap();
    (dir, table)
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a progress value");
    assert!(
        (actual - expected).abs() < 1e-6,
        "progress {actual} != {expected}"
    );
}

#[test]
fn test_fixture_loads_all_days() {
    let (_dir, table) = load_fixture();
    assert_eq!(table.len(), 6);
    assert_eq!(table.day_of_year(0), 1);
    assert_eq!(
        table.index_of_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()),
        Some(3)
    );
}

#[test]
fn test_moonrise_before_midnight_sets_next_day() {
    let (_dir, table) = load_fixture();
    let resolver = VisibilityResolver::new(table);

    // 2024-01-03 rises at 23:17, 2024-01-04 sets at 11:14
    let rise = hours(23, 17);
    let set = hours(11, 14);
    let total = (24.0 - rise) + set;

    assert_eq!(
        resolver.moon_window(2),
        MoonWindow::RisesToday {
            rise,
            continues_to: Some(set)
        }
    );

    let just_risen = resolver.resolve_moon(2, 23.3);
    assert!(just_risen.visible);
    assert_close(just_risen.progress, (23.3 - rise) / total);
    assert!(just_risen.progress.unwrap() < 0.01);

    let midnight = resolver.resolve_moon(3, 0.0);
    assert!(midnight.visible);
    assert_close(midnight.progress, (24.0 - rise) / total);

    let setting = resolver.resolve_moon(3, set);
    assert!(setting.visible);
    assert_close(setting.progress, 1.0);

    assert!(!resolver.resolve_moon(3, 11.3).visible);
    assert!(!resolver.resolve_moon(2, 12.0).visible);
}

#[test]
fn test_moonrise_after_midnight_is_same_day() {
    let (_dir, table) = load_fixture();
    let resolver = VisibilityResolver::new(table);

    let rise = hours(0, 20);
    let set = hours(12, 1);
    assert_eq!(resolver.moon_window(4), MoonWindow::SameDay { rise, set });

    let midpoint = (rise + set) / 2.0;
    assert_close(resolver.resolve_moon(4, midpoint).progress, 0.5);
    assert!(!resolver.resolve_moon(4, 0.1).visible);
}

#[test]
fn test_moonless_day_is_dark_all_day() {
    let (_dir, table) = load_fixture();
    let resolver = VisibilityResolver::new(table);

    // 2024-01-06 records no events and 2024-01-05 closed its own window
    assert_eq!(resolver.moon_window(5), MoonWindow::NoMoon);
    for step in 0..96 {
        let hour = step as f64 * 0.25;
        assert!(!resolver.resolve_moon(5, hour).visible, "visible at {hour}");
    }
}

#[test]
fn test_same_day_moon_midpoint() {
    let mut records = vec![DailyRecord::default(); 11];
    records[10].moon = RiseSet::new(Some(2.0), Some(10.0));
    let resolver = VisibilityResolver::new(AstroTable::new(records));

    let result = resolver.resolve_moon(10, 6.0);
    assert!(result.visible);
    assert_close(result.progress, 0.5);
}

#[test]
fn test_sun_bounds_are_inclusive() {
    let record = DailyRecord {
        sun: RiseSet::new(Some(5.67), Some(19.17)),
        ..DailyRecord::default()
    };
    let resolver = VisibilityResolver::new(AstroTable::new(vec![record]));

    assert!(resolver.resolve_sun(0, 5.67));
    assert!(!resolver.resolve_sun(0, 5.66));
    assert!(resolver.resolve_sun(0, 19.17));
    assert!(!resolver.resolve_sun(0, 19.18));
}

#[test]
fn test_memoized_resolver_matches_over_whole_fixture() {
    let (_dir, table) = load_fixture();
    let plain = VisibilityResolver::new(table);
    let memo = MemoizedResolver::new(plain.clone());

    for day in 0..plain.table().len() {
        for step in 0..48 {
            let hour = step as f64 * 0.5;
            assert_eq!(memo.resolve_moon(day, hour), plain.resolve_moon(day, hour));
            assert_eq!(memo.resolve_sun(day, hour), plain.resolve_sun(day, hour));
        }
    }
    assert_eq!(memo.cached_entries(), 6 * 48);
}

#[test]
fn test_quality_report_on_fixture() {
    let (_dir, table) = load_fixture();
    let resolver = VisibilityResolver::new(table);
    let report = QualityReport::from_resolver(&resolver);

    assert_eq!(report.total_days, 6);
    assert_eq!(report.undated_days, 0);
    // Two days record both events with the rise last, plus the rise-only day
    assert_eq!(report.same_day_windows, 1);
    assert_eq!(report.cross_day_windows, 3);
    assert_eq!(report.continuations, 1);
    assert_eq!(report.moonless_days, 1);
    assert!(report.is_clean());
}

#[test]
fn test_seasonal_stats_on_fixture() {
    let (_dir, table) = load_fixture();
    let stats = SeasonalStats::from_table(&table);

    assert_eq!(stats.days_with_sun, 6);
    let shortest = stats.shortest_day.unwrap();
    assert_eq!(shortest.day, 0);
    assert!((shortest.hours - (hours(17, 51) - hours(7, 3))).abs() < 1e-9);

    let longest = stats.longest_day.unwrap();
    assert_eq!(longest.day, 5);

    // Ties keep the first day
    assert_eq!(stats.earliest_sunrise.unwrap().day, 0);
    assert_eq!(stats.latest_sunrise.unwrap().day, 3);
    assert_eq!(stats.latest_sunset.unwrap().day, 5);
}

#[test]
fn test_sky_daylight_agrees_with_sun_visibility() {
    let (_dir, table) = load_fixture();
    let resolver = VisibilityResolver::new(table);

    for day in 0..resolver.table().len() {
        let record = resolver.table().record(day).unwrap();
        let doy = resolver.table().day_of_year(day);
        for step in 0..96 {
            let hour = step as f64 * 0.25;
            let sky = classify_sky(22.3, doy, &record.sun, hour);
            assert_eq!(
                sky.is_daylight(),
                resolver.resolve_sun(day, hour),
                "day {day} hour {hour}: {sky:?}"
            );
        }
    }

    let record = resolver.table().record(0).unwrap();
    assert_eq!(classify_sky(22.3, 1, &record.sun, 0.0), SkyType::Night);
    assert_eq!(classify_sky(22.3, 1, &record.sun, 12.0), SkyType::Day);
}

#[test]
fn test_computed_sun_source_uses_moon_dates() {
    let dir = TempDir::new().unwrap();
    let (_, moon) = write_tables(dir.path());

    let mut config = Config::default();
    config.sun_source = Some(SunSource::Computed);
    let table = load_table(&config, None, Some(&moon), false).unwrap();

    assert_eq!(table.len(), 6);
    for record in table.records() {
        assert!(record.sun.is_complete());
        let sunrise = record.sun.rise.unwrap();
        // Early January in Hong Kong: sunrise a little after 07:00
        assert!((sunrise - hours(7, 3)).abs() < 0.25, "sunrise {sunrise}");
    }
}

#[test]
fn test_computed_sun_source_requires_dates() {
    let dir = TempDir::new().unwrap();
    let moon = dir.path().join("moon.csv");
    fs::write(&moon, "RISE,SET\n21:21,09:59\n").unwrap();

    let mut config = Config::default();
    config.sun_source = Some(SunSource::Computed);
    assert!(load_table(&config, None, Some(&moon), false).is_err());
}

#[test]
fn test_config_relative_paths_resolve_against_config_dir() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let config_path = dir.path().join("timepixel.toml");
    fs::write(
        &config_path,
        "sun_table = \"sun.csv\"\nmoon_table = \"moon.csv\"\nmemoize = true\n",
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(config.sun_table_path().unwrap(), dir.path().join("sun.csv"));

    let table = load_table(&config, None, None, false).unwrap();
    assert_eq!(table.len(), 6);
}

#[test]
fn test_missing_table_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");
    let (sun, _) = write_tables(dir.path());
    assert!(load_table(&Config::default(), Some(&sun), Some(&missing), false).is_err());
}
